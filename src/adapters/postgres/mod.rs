pub mod book_inventory;
pub mod reservation_store;
pub mod user_directory;

pub use book_inventory::BookInventory as PostgresBookInventory;
pub use reservation_store::ReservationStore as PostgresReservationStore;
pub use user_directory::UserDirectory as PostgresUserDirectory;
