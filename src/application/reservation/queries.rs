use crate::domain::{Reservation, ReservationId, ReservationStatus, UserId};
use chrono::NaiveDate;

use super::errors::{ReservationApplicationError, Result};
use super::reservation_service::{ServiceDependencies, load_reservation};

pub async fn get_reservation_by_id(
    deps: &ServiceDependencies,
    id: ReservationId,
) -> Result<Reservation> {
    load_reservation(&deps.reservation_store, id).await
}

pub async fn get_all_reservations(deps: &ServiceDependencies) -> Result<Vec<Reservation>> {
    deps.reservation_store
        .find_all()
        .await
        .map_err(ReservationApplicationError::ReservationStoreError)
}

pub async fn get_reservations_by_user_id(
    deps: &ServiceDependencies,
    user_id: UserId,
) -> Result<Vec<Reservation>> {
    deps.reservation_store
        .find_by_user_id(user_id)
        .await
        .map_err(ReservationApplicationError::ReservationStoreError)
}

/// Reservations still out (status ACTIVE)
pub async fn get_active_reservations(deps: &ServiceDependencies) -> Result<Vec<Reservation>> {
    deps.reservation_store
        .find_by_status(ReservationStatus::Active)
        .await
        .map_err(ReservationApplicationError::ReservationStoreError)
}

/// Still-ACTIVE reservations past their expected return date, as of today (UTC)
///
/// Not the same as OVERDUE status: that one is assigned at return time to
/// books that came back late, and those never show up here.
pub async fn get_overdue_reservations(deps: &ServiceDependencies) -> Result<Vec<Reservation>> {
    get_overdue_reservations_as_of(deps, chrono::Utc::now().date_naive()).await
}

/// Still-ACTIVE reservations whose expected return date is before `today`
pub async fn get_overdue_reservations_as_of(
    deps: &ServiceDependencies,
    today: NaiveDate,
) -> Result<Vec<Reservation>> {
    let overdue = deps
        .reservation_store
        .find_overdue(today)
        .await
        .map_err(ReservationApplicationError::ReservationStoreError)?;

    tracing::debug!(count = overdue.len(), %today, "overdue reservations");

    Ok(overdue)
}
