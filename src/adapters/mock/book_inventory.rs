use crate::domain::{Book, BookExternalId};
use crate::ports::book_inventory::{BookInventory as BookInventoryTrait, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory BookInventory
///
/// Keeps books in a map and counts the availability adjustments it receives,
/// so tests can assert that inventory moved exactly once (or not at all).
/// `fail_adjustments` makes every adjustment fail without touching a book.
#[derive(Default)]
pub struct BookInventory {
    books: Mutex<HashMap<BookExternalId, Book>>,
    decrease_calls: Mutex<usize>,
    increase_calls: Mutex<usize>,
    failing: Mutex<bool>,
}

impl BookInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a book
    pub fn add_book(&self, book: Book) {
        self.books.lock().unwrap().insert(book.external_id, book);
    }

    pub fn available_quantity(&self, external_id: BookExternalId) -> Option<i32> {
        self.books
            .lock()
            .unwrap()
            .get(&external_id)
            .map(|book| book.available_quantity)
    }

    pub fn fail_adjustments(&self, failing: bool) {
        *self.failing.lock().unwrap() = failing;
    }

    fn check_failing(&self, external_id: BookExternalId) -> Result<()> {
        if *self.failing.lock().unwrap() {
            return Err(format!("inventory unavailable for book {}", external_id).into());
        }
        Ok(())
    }

    pub fn decrease_calls(&self) -> usize {
        *self.decrease_calls.lock().unwrap()
    }

    pub fn increase_calls(&self) -> usize {
        *self.increase_calls.lock().unwrap()
    }
}

#[async_trait]
impl BookInventoryTrait for BookInventory {
    async fn find_by_external_id(&self, external_id: BookExternalId) -> Result<Option<Book>> {
        Ok(self.books.lock().unwrap().get(&external_id).cloned())
    }

    async fn decrease_available_quantity(&self, external_id: BookExternalId) -> Result<()> {
        *self.decrease_calls.lock().unwrap() += 1;
        self.check_failing(external_id)?;

        let mut books = self.books.lock().unwrap();
        let book = books
            .get_mut(&external_id)
            .ok_or_else(|| format!("book {} not in inventory", external_id))?;
        if book.available_quantity <= 0 {
            return Err(format!("book {} has no available copies", external_id).into());
        }
        book.available_quantity -= 1;
        Ok(())
    }

    async fn increase_available_quantity(&self, external_id: BookExternalId) -> Result<()> {
        *self.increase_calls.lock().unwrap() += 1;
        self.check_failing(external_id)?;

        let mut books = self.books.lock().unwrap();
        let book = books
            .get_mut(&external_id)
            .ok_or_else(|| format!("book {} not in inventory", external_id))?;
        book.available_quantity += 1;
        Ok(())
    }
}
