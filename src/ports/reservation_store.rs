use crate::domain::{NewReservation, Reservation, ReservationId, ReservationStatus, UserId};
use async_trait::async_trait;
use chrono::NaiveDate;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Reservation store port
///
/// Listings are ordered by id. `delete` exists only to undo an insert whose
/// inventory adjustment failed; finalized reservations are never removed.
#[async_trait]
pub trait ReservationStore: Send + Sync {
    /// First save of a reservation; the store assigns the id
    async fn insert(&self, reservation: NewReservation) -> Result<Reservation>;

    /// Persist the full current state of an existing reservation
    async fn save(&self, reservation: Reservation) -> Result<Reservation>;

    /// Remove a reservation; unknown ids are an error
    async fn delete(&self, id: ReservationId) -> Result<()>;

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>>;

    async fn find_all(&self) -> Result<Vec<Reservation>>;

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Reservation>>;

    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>>;

    /// ACTIVE reservations whose expected return date is before `today`
    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Reservation>>;
}
