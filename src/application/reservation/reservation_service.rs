use crate::domain::{
    self, CreateReservationError, Reservation, ReturnBookError,
    commands::{CreateReservation, ReturnBook},
};
use crate::ports::*;
use std::sync::Arc;

use super::errors::{ReservationApplicationError, Result};

/// Service dependencies
///
/// Plain data; the operations are free functions that receive it.
#[derive(Clone)]
pub struct ServiceDependencies {
    pub reservation_store: Arc<dyn ReservationStore>,
    pub book_inventory: Arc<dyn BookInventory>,
    pub user_directory: Arc<dyn UserDirectory>,
}

/// Load a reservation or fail with `ReservationNotFound`
///
/// Shared by return_book and the id lookup.
pub(super) async fn load_reservation(
    store: &Arc<dyn ReservationStore>,
    id: domain::ReservationId,
) -> Result<Reservation> {
    store
        .find_by_id(id)
        .await
        .map_err(ReservationApplicationError::ReservationStoreError)?
        .ok_or(ReservationApplicationError::ReservationNotFound(id))
}

/// Reserve one copy of a book
///
/// Business rules:
/// - the user must exist
/// - the book must exist and have a copy available
/// - rental days must be positive and the book must have a price
///
/// # Consistency
///
/// The store insert happens first, the inventory decrement second. If the
/// decrement fails (another request took the last copy) the inserted
/// reservation is deleted again before the error is returned. Validation
/// failures happen before either write, so they leave no side effects.
pub async fn create_reservation(
    deps: &ServiceDependencies,
    cmd: CreateReservation,
) -> Result<Reservation> {
    // 1. user
    let user = deps
        .user_directory
        .get_user(cmd.user_id)
        .await
        .map_err(ReservationApplicationError::UserDirectoryError)?
        .ok_or(ReservationApplicationError::UserNotFound(cmd.user_id))?;

    // 2. book
    let book = deps
        .book_inventory
        .find_by_external_id(cmd.book_external_id)
        .await
        .map_err(ReservationApplicationError::BookInventoryError)?
        .ok_or(ReservationApplicationError::BookNotFound(cmd.book_external_id))?;

    // 3. availability, rental days and rate
    let new_reservation = domain::reservation::open_reservation(
        &user,
        &book,
        cmd.rental_days,
        cmd.start_date,
        chrono::Utc::now(),
    )
    .map_err(|e| {
        tracing::warn!(
            user_id = %cmd.user_id,
            book_external_id = %cmd.book_external_id,
            "reservation rejected: {}",
            e
        );
        match e {
            CreateReservationError::BookUnavailable => {
                ReservationApplicationError::BookNotAvailable(book.external_id)
            }
            CreateReservationError::InvalidRentalDays(days) => {
                ReservationApplicationError::InvalidRentalDays(days)
            }
            CreateReservationError::MissingDailyRate => {
                ReservationApplicationError::MissingDailyRate(book.external_id)
            }
        }
    })?;

    // 4. persist
    let saved = deps
        .reservation_store
        .insert(new_reservation)
        .await
        .map_err(ReservationApplicationError::ReservationStoreError)?;

    // 5. one copy out, or undo the insert
    if let Err(e) = deps
        .book_inventory
        .decrease_available_quantity(saved.book_external_id)
        .await
    {
        tracing::error!(
            reservation_id = %saved.id,
            book_external_id = %saved.book_external_id,
            "inventory decrement failed, removing reservation: {}",
            e
        );
        if let Err(undo) = deps.reservation_store.delete(saved.id).await {
            tracing::error!(
                reservation_id = %saved.id,
                "reservation left without an inventory decrement: {}",
                undo
            );
        }
        return Err(ReservationApplicationError::BookInventoryError(e));
    }

    tracing::info!(
        reservation_id = %saved.id,
        user_id = %saved.user_id,
        book_external_id = %saved.book_external_id,
        total_fee = %saved.total_fee,
        expected_return_date = %saved.expected_return_date,
        "reservation created"
    );

    Ok(saved)
}

/// Record the return of a reserved book
///
/// Business rules:
/// - the reservation must exist and still be ACTIVE
/// - a late return is charged 15% of the book's current price per late day
///   and ends OVERDUE, otherwise it ends RETURNED with no late fee
///
/// # Consistency
///
/// Store save first, inventory increment second. If the increment fails the
/// previous ACTIVE state is saved back before the error is returned.
pub async fn return_book(deps: &ServiceDependencies, cmd: ReturnBook) -> Result<Reservation> {
    // 1. load
    let reservation = load_reservation(&deps.reservation_store, cmd.reservation_id).await?;
    let previous = reservation.clone();

    // 2. current price; a book gone from the catalog falls back to the daily rate
    let current_price = deps
        .book_inventory
        .find_by_external_id(reservation.book_external_id)
        .await
        .map_err(ReservationApplicationError::BookInventoryError)?
        .and_then(|book| book.price);

    // 3. fees and status
    let returned = domain::reservation::return_reservation(
        reservation,
        current_price,
        cmd.return_date,
    )
    .map_err(|e| {
        tracing::warn!(reservation_id = %cmd.reservation_id, "return rejected: {}", e);
        match e {
            ReturnBookError::AlreadyFinalized(status) => {
                ReservationApplicationError::ReservationAlreadyFinalized {
                    id: cmd.reservation_id,
                    status,
                }
            }
        }
    })?;

    // 4. persist
    let saved = deps
        .reservation_store
        .save(returned)
        .await
        .map_err(ReservationApplicationError::ReservationStoreError)?;

    // 5. one copy back, or restore the ACTIVE reservation
    if let Err(e) = deps
        .book_inventory
        .increase_available_quantity(saved.book_external_id)
        .await
    {
        tracing::error!(
            reservation_id = %saved.id,
            book_external_id = %saved.book_external_id,
            "inventory increment failed, restoring reservation: {}",
            e
        );
        if let Err(undo) = deps.reservation_store.save(previous).await {
            tracing::error!(
                reservation_id = %saved.id,
                "reservation left returned without an inventory increment: {}",
                undo
            );
        }
        return Err(ReservationApplicationError::BookInventoryError(e));
    }

    tracing::info!(
        reservation_id = %saved.id,
        status = %saved.status,
        late_fee = ?saved.late_fee,
        "reservation returned"
    );

    Ok(saved)
}
