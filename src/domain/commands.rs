use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{BookExternalId, ReservationId, UserId};

/// Command: reserve one copy of a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateReservation {
    pub user_id: UserId,
    pub book_external_id: BookExternalId,
    pub rental_days: i32,
    pub start_date: NaiveDate,
}

/// Command: hand a reserved book back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnBook {
    pub reservation_id: ReservationId,
    pub return_date: NaiveDate,
}
