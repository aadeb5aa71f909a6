use crate::domain::{BookExternalId, ReservationId, ReservationStatus, UserId};
use thiserror::Error;

/// Error kind, as seen by callers of the reservation service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User, book or reservation is absent
    NotFound,
    /// Book unavailable, or reservation already finalized
    InvalidState,
    /// Non-positive rental days, or no daily rate
    InvalidInput,
    /// A collaborator (store, inventory, directory) failed
    Collaborator,
}

/// Reservation application layer errors
#[derive(Debug, Error)]
pub enum ReservationApplicationError {
    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Book not found with external id: {0}")]
    BookNotFound(BookExternalId),

    #[error("Reservation not found: {0}")]
    ReservationNotFound(ReservationId),

    #[error("No copies available for book {0}")]
    BookNotAvailable(BookExternalId),

    #[error("Reservation {id} was already finalized as {status}")]
    ReservationAlreadyFinalized {
        id: ReservationId,
        status: ReservationStatus,
    },

    #[error("Rental days must be positive, got {0}")]
    InvalidRentalDays(i32),

    #[error("Book {0} has no daily rate")]
    MissingDailyRate(BookExternalId),

    #[error("Reservation store error")]
    ReservationStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Book inventory error")]
    BookInventoryError(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ReservationApplicationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UserNotFound(_) | Self::BookNotFound(_) | Self::ReservationNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::BookNotAvailable(_) | Self::ReservationAlreadyFinalized { .. } => {
                ErrorKind::InvalidState
            }
            Self::InvalidRentalDays(_) | Self::MissingDailyRate(_) => ErrorKind::InvalidInput,
            Self::ReservationStoreError(_)
            | Self::BookInventoryError(_)
            | Self::UserDirectoryError(_) => ErrorKind::Collaborator,
        }
    }
}

/// Application layer Result
pub type Result<T> = std::result::Result<T, ReservationApplicationError>;
