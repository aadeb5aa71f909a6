use crate::domain::{User, UserId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// User directory port
///
/// Read-only view of the user context.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch a user, `None` if the id is unknown
    async fn get_user(&self, user_id: UserId) -> Result<Option<User>>;
}
