use crate::domain::{Book, BookExternalId};
use crate::ports::book_inventory::{BookInventory as BookInventoryTrait, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// PostgreSQL BookInventory
///
/// Availability changes are single conditional UPDATEs, so two concurrent
/// reservations for the last copy cannot both succeed.
pub struct BookInventory {
    pool: PgPool,
}

impl BookInventory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookInventoryTrait for BookInventory {
    async fn find_by_external_id(&self, external_id: BookExternalId) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT external_id, title, price, available_quantity
            FROM books
            WHERE external_id = $1
            "#,
        )
        .bind(external_id.value())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Book {
            external_id: BookExternalId::new(row.try_get("external_id")?),
            title: row.try_get("title")?,
            price: row.try_get("price")?,
            available_quantity: row.try_get("available_quantity")?,
        }))
    }

    async fn decrease_available_quantity(&self, external_id: BookExternalId) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available_quantity = available_quantity - 1
            WHERE external_id = $1 AND available_quantity > 0
            "#,
        )
        .bind(external_id.value())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("book {} has no available copies", external_id).into());
        }

        Ok(())
    }

    async fn increase_available_quantity(&self, external_id: BookExternalId) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET available_quantity = available_quantity + 1
            WHERE external_id = $1
            "#,
        )
        .bind(external_id.value())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(format!("book {} not found", external_id).into());
        }

        Ok(())
    }
}
