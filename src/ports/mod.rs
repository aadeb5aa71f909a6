pub mod book_inventory;
pub mod reservation_store;
pub mod user_directory;

pub use book_inventory::BookInventory;
pub use reservation_store::ReservationStore;
pub use user_directory::UserDirectory;
