use crate::domain::{User, UserId};
use crate::ports::user_directory::{Result, UserDirectory as UserDirectoryTrait};
use async_trait::async_trait;
use sqlx::{PgPool, Row};

/// PostgreSQL UserDirectory
pub struct UserDirectory {
    pool: PgPool,
}

impl UserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectory {
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, email FROM users WHERE id = $1")
            .bind(user_id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| -> Result<User> {
            Ok(User {
                id: UserId::new(row.try_get("id")?),
                name: row.try_get("name")?,
                email: row.try_get("email")?,
            })
        })
        .transpose()
    }
}
