use crate::domain::{
    BookExternalId, NewReservation, Reservation, ReservationId, ReservationStatus, UserId,
};
use crate::ports::reservation_store::{ReservationStore as ReservationStoreTrait, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// Columns of a reservation row, joined with the user and book names
const SELECT_RESERVATIONS: &str = r#"
    SELECT
        r.id,
        r.user_id,
        u.name AS user_name,
        r.book_external_id,
        b.title AS book_title,
        r.rental_days,
        r.start_date,
        r.expected_return_date,
        r.actual_return_date,
        r.daily_rate,
        r.total_fee,
        r.late_fee,
        r.status,
        r.created_at
    FROM reservations r
    JOIN users u ON u.id = r.user_id
    JOIN books b ON b.external_id = r.book_external_id
"#;

/// Convert a joined row into a Reservation
///
/// The status column is text; an unknown value is reported as invalid data.
fn map_row_to_reservation(row: &PgRow) -> Result<Reservation> {
    let status_str: &str = row.try_get("status")?;
    let status = ReservationStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(Reservation {
        id: ReservationId::new(row.try_get("id")?),
        user_id: UserId::new(row.try_get("user_id")?),
        user_name: row.try_get("user_name")?,
        book_external_id: BookExternalId::new(row.try_get("book_external_id")?),
        book_title: row.try_get("book_title")?,
        rental_days: row.try_get("rental_days")?,
        start_date: row.try_get("start_date")?,
        expected_return_date: row.try_get("expected_return_date")?,
        actual_return_date: row.try_get("actual_return_date")?,
        daily_rate: row.try_get("daily_rate")?,
        total_fee: row.try_get("total_fee")?,
        late_fee: row.try_get("late_fee")?,
        status,
        created_at: row.try_get("created_at")?,
    })
}

/// PostgreSQL ReservationStore
pub struct ReservationStore {
    pool: PgPool,
}

impl ReservationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReservationStoreTrait for ReservationStore {
    /// INSERT ... RETURNING the generated id and the stored timestamp
    ///
    /// TIMESTAMPTZ keeps microseconds, so `created_at` is read back rather than
    /// echoed from the nanosecond value that was bound.
    async fn insert(&self, reservation: NewReservation) -> Result<Reservation> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO reservations (
                user_id,
                book_external_id,
                rental_days,
                start_date,
                expected_return_date,
                daily_rate,
                total_fee,
                status,
                created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, created_at
            "#,
        )
        .bind(reservation.user_id.value())
        .bind(reservation.book_external_id.value())
        .bind(reservation.rental_days)
        .bind(reservation.start_date)
        .bind(reservation.expected_return_date)
        .bind(reservation.daily_rate)
        .bind(reservation.total_fee)
        .bind(ReservationStatus::Active.as_str())
        .bind(reservation.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(Reservation {
            created_at,
            ..reservation.into_reservation(ReservationId::new(id))
        })
    }

    /// Only the fields a return can change are written back
    async fn save(&self, reservation: Reservation) -> Result<Reservation> {
        let result = sqlx::query(
            r#"
            UPDATE reservations
            SET
                actual_return_date = $2,
                late_fee = $3,
                status = $4
            WHERE id = $1
            "#,
        )
        .bind(reservation.id.value())
        .bind(reservation.actual_return_date)
        .bind(reservation.late_fee)
        .bind(reservation.status.as_str())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() != 1 {
            return Err(format!("reservation {} does not exist", reservation.id).into());
        }

        Ok(reservation)
    }

    async fn delete(&self, id: ReservationId) -> Result<()> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() != 1 {
            return Err(format!("reservation {} does not exist", id).into());
        }

        Ok(())
    }

    async fn find_by_id(&self, id: ReservationId) -> Result<Option<Reservation>> {
        let sql = format!("{} WHERE r.id = $1", SELECT_RESERVATIONS);
        let row = sqlx::query(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_reservation).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Reservation>> {
        let sql = format!("{} ORDER BY r.id", SELECT_RESERVATIONS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(map_row_to_reservation).collect()
    }

    async fn find_by_user_id(&self, user_id: UserId) -> Result<Vec<Reservation>> {
        let sql = format!("{} WHERE r.user_id = $1 ORDER BY r.id", SELECT_RESERVATIONS);
        let rows = sqlx::query(&sql)
            .bind(user_id.value())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_reservation).collect()
    }

    async fn find_by_status(&self, status: ReservationStatus) -> Result<Vec<Reservation>> {
        let sql = format!("{} WHERE r.status = $1 ORDER BY r.id", SELECT_RESERVATIONS);
        let rows = sqlx::query(&sql)
            .bind(status.as_str())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_reservation).collect()
    }

    /// Uses the partial index on expected_return_date for ACTIVE rows
    async fn find_overdue(&self, today: NaiveDate) -> Result<Vec<Reservation>> {
        let sql = format!(
            "{} WHERE r.status = 'ACTIVE' AND r.expected_return_date < $1 ORDER BY r.id",
            SELECT_RESERVATIONS
        );
        let rows = sqlx::query(&sql)
            .bind(today)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_reservation).collect()
    }
}
