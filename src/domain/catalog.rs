use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BookExternalId, UserId};

/// Book as seen by the reservation context
///
/// Only the price and the availability counter matter here; the catalog
/// owns everything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub external_id: BookExternalId,
    pub title: String,
    /// Used as the daily rate. Books without a price cannot be reserved.
    pub price: Option<Decimal>,
    pub available_quantity: i32,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_quantity > 0
    }
}

/// User as seen by the reservation context (read-only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
