use crate::domain::{Book, BookExternalId};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Book inventory port
///
/// Boundary to the catalog context. The reservation context reads a book's
/// price and moves its availability counter; nothing else.
#[async_trait]
pub trait BookInventory: Send + Sync {
    /// Look a book up by its catalog id
    async fn find_by_external_id(&self, external_id: BookExternalId) -> Result<Option<Book>>;

    /// Take one copy out of the available pool
    ///
    /// Implementations enforce the floor: the counter never goes below zero.
    async fn decrease_available_quantity(&self, external_id: BookExternalId) -> Result<()>;

    /// Put one copy back into the available pool
    async fn increase_available_quantity(&self, external_id: BookExternalId) -> Result<()>;
}
