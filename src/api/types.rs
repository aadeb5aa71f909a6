use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookExternalId, Reservation, ReservationId, ReservationStatus, UserId,
    commands::{CreateReservation, ReturnBook},
};

/// POST /reservations request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservationRequest {
    pub user_id: i64,
    pub book_external_id: i64,
    pub rental_days: i32,
    pub start_date: NaiveDate,
}

impl CreateReservationRequest {
    pub fn to_command(&self) -> CreateReservation {
        CreateReservation {
            user_id: UserId::new(self.user_id),
            book_external_id: BookExternalId::new(self.book_external_id),
            rental_days: self.rental_days,
            start_date: self.start_date,
        }
    }
}

/// POST /reservations/:id/return request body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    pub return_date: NaiveDate,
}

impl ReturnBookRequest {
    pub fn to_command(&self, reservation_id: i64) -> ReturnBook {
        ReturnBook {
            reservation_id: ReservationId::new(reservation_id),
            return_date: self.return_date,
        }
    }
}

/// Reservation projection returned by every endpoint
///
/// Money is rendered as decimal strings ("111.93").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservationResponse {
    pub id: i64,
    pub user_id: i64,
    pub user_name: String,
    pub book_external_id: i64,
    pub book_title: String,
    pub rental_days: i32,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub daily_rate: Decimal,
    pub total_fee: Decimal,
    pub late_fee: Option<Decimal>,
    pub status: ReservationStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationResponse {
    fn from(reservation: Reservation) -> Self {
        Self {
            id: reservation.id.value(),
            user_id: reservation.user_id.value(),
            user_name: reservation.user_name,
            book_external_id: reservation.book_external_id.value(),
            book_title: reservation.book_title,
            rental_days: reservation.rental_days,
            start_date: reservation.start_date,
            expected_return_date: reservation.expected_return_date,
            actual_return_date: reservation.actual_return_date,
            daily_rate: reservation.daily_rate,
            total_fee: reservation.total_fee,
            late_fee: reservation.late_fee,
            status: reservation.status,
            created_at: reservation.created_at,
        }
    }
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}
