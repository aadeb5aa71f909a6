use thiserror::Error;

use super::ReservationStatus;

/// Reasons a reservation cannot be opened
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CreateReservationError {
    /// No copies left
    #[error("book has no available copies")]
    BookUnavailable,
    /// Rental days must be positive and keep the return date on the calendar
    #[error("invalid rental days: {0}")]
    InvalidRentalDays(i32),
    /// Book has no price to use as daily rate
    #[error("book has no daily rate")]
    MissingDailyRate,
}

/// Reasons a reservation cannot be returned
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnBookError {
    /// Already returned, with the status it was finalized in
    #[error("reservation already finalized as {0}")]
    AlreadyFinalized(ReservationStatus),
}
