use crate::domain::{
    NewReservation, Reservation, ReservationId, ReservationStatus, UserId,
    reservation::is_past_due,
};
use crate::ports::reservation_store::{ReservationStore as ReservationStoreTrait, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// In-memory ReservationStore
///
/// Ids come from a counter starting at 1. Every write is counted so tests can
/// check that rejected requests never reached the store.
#[derive(Default)]
pub struct ReservationStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    reservations: BTreeMap<ReservationId, Reservation>,
    last_id: i64,
    writes: usize,
}

impl ReservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of insert, save and delete calls so far
    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    fn select(&self, predicate: impl Fn(&Reservation) -> bool) -> Vec<Reservation> {
        self.state
            .lock()
            .unwrap()
            .reservations
            .values()
            .filter(|r| predicate(*r))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ReservationStoreTrait for ReservationStore {
    async fn insert(&self, reservation: NewReservation) -> Result<Reservation> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        state.last_id += 1;

        let saved = reservation.into_reservation(ReservationId::new(state.last_id));
        state.reservations.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn save(&self, reservation: Reservation) -> Result<Reservation> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;

        if !state.reservations.contains_key(&reservation.id) {
            return Err(format!("reservation {} was never inserted", reservation.id).into());
        }
        state.reservations.insert(reservation.id, reservation.clone());
        Ok(reservation)
    }

    async fn delete(&self, id: ReservationId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;

        if state.reservations.remove(&id).is_none() {
            return Err(format!("reservation {} does not exist", id).into());
        }
        Ok(())
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        Ok(self.state.lock().unwrap().reservations.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Reservation>> {
        Ok(self.select(|_| true))
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Reservation>> {
        Ok(self.select(|r| r.user_id == user_id))
    }

    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        Ok(self.select(|r| r.status == status))
    }

    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Reservation>> {
        Ok(self.select(|r| is_past_due(r, today)))
    }
}
