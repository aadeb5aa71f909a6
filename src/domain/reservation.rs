use chrono::{DateTime, Days, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    Book, BookExternalId, CreateReservationError, ReservationId, ReservationStatus,
    ReturnBookError, User, UserId, fees,
};

/// A reservation that has not been persisted yet
///
/// Always ACTIVE; the store assigns the id when it is first saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub user_id: UserId,
    pub user_name: String,
    pub book_external_id: BookExternalId,
    pub book_title: String,
    pub rental_days: i32,
    pub start_date: NaiveDate,
    pub expected_return_date: NaiveDate,
    pub daily_rate: Decimal,
    pub total_fee: Decimal,
    pub created_at: DateTime<Utc>,
}

impl NewReservation {
    /// Attach the id assigned by the store
    pub fn into_reservation(self, id: ReservationId) -> Reservation {
        Reservation {
            id,
            user_id: self.user_id,
            user_name: self.user_name,
            book_external_id: self.book_external_id,
            book_title: self.book_title,
            rental_days: self.rental_days,
            start_date: self.start_date,
            expected_return_date: self.expected_return_date,
            actual_return_date: None,
            daily_rate: self.daily_rate,
            total_fee: self.total_fee,
            late_fee: None,
            status: ReservationStatus::Active,
            created_at: self.created_at,
        }
    }
}

/// Reservation - one user borrowing one copy of a book for a bounded period
///
/// Invariants:
/// - `expected_return_date == start_date + rental_days`
/// - `total_fee == round(daily_rate * rental_days)`
/// - `late_fee` and `actual_return_date` are `None` while ACTIVE
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,

    // references into the other contexts, with their display names
    pub user_id: UserId,
    pub user_name: String,
    pub book_external_id: BookExternalId,
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

/// Pure function: open a reservation for `user` on `book`
///
/// Business rules:
/// - the book must have a copy available
/// - rental days must be positive
/// - the book price becomes the daily rate, so it must be set
/// - the expected return date is `start_date + rental_days`
///
/// No side effects. The caller persists the result and adjusts inventory.
pub fn open_reservation(
    user: &User,
    book: &Book,
    rental_days: i32,
    start_date: NaiveDate,
    created_at: DateTime<Utc>,
) -> Result<NewReservation, CreateReservationError> {
    if !book.is_available() {
        return Err(CreateReservationError::BookUnavailable);
    }

    let days = u32::try_from(rental_days)
        .ok()
        .filter(|days| *days > 0)
        .ok_or(CreateReservationError::InvalidRentalDays(rental_days))?;

    let daily_rate = book.price.ok_or(CreateReservationError::MissingDailyRate)?;

    let expected_return_date = start_date
        .checked_add_days(Days::new(u64::from(days)))
        .ok_or(CreateReservationError::InvalidRentalDays(rental_days))?;

    Ok(NewReservation {
        user_id: user.id,
        user_name: user.name.clone(),
        book_external_id: book.external_id,
        book_title: book.title.clone(),
        rental_days,
        start_date,
        expected_return_date,
        daily_rate,
        total_fee: fees::total_fee(daily_rate, days),
        created_at,
    })
}

/// Pure function: record the return of a reservation
///
/// Business rules:
/// - only ACTIVE reservations can be returned
/// - returned after the expected date: late fee for each late day, OVERDUE
/// - otherwise: no late fee, RETURNED
///
/// The late fee is charged on the book's current price. When the catalog has
/// no price for it, the daily rate copied at creation is used instead.
pub fn return_reservation(
    reservation: Reservation,
    current_price: Option<Decimal>,
    return_date: NaiveDate,
) -> Result<Reservation, ReturnBookError> {
    if !reservation.status.is_active() {
        return Err(ReturnBookError::AlreadyFinalized(reservation.status));
    }

    let days_late = days_late(&reservation, return_date);
    let (late_fee, status) = if days_late > 0 {
        let price = current_price.unwrap_or(reservation.daily_rate);
        (
            fees::late_fee(price, days_late),
            ReservationStatus::Overdue,
        )
    } else {
        (fees::zero_fee(), ReservationStatus::Returned)
    };

    Ok(Reservation {
        actual_return_date: Some(return_date),
        late_fee: Some(late_fee),
        status,
        ..reservation
    })
}

/// Whole days between the expected return date and `return_date` (negative when early)
pub fn days_late(reservation: &Reservation, return_date: NaiveDate) -> i64 {
    return_date
        .signed_duration_since(reservation.expected_return_date)
        .num_days()
}

/// Pure function: still ACTIVE and the expected return date is before `today`
///
/// This is the live overdue query; it never matches a reservation already
/// finalized with OVERDUE status.
pub fn is_past_due(reservation: &Reservation, today: NaiveDate) -> bool {
    reservation.status.is_active() && reservation.expected_return_date < today
}
