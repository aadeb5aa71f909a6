pub mod catalog;
pub mod commands;
pub mod errors;
pub mod fees;
pub mod reservation;
pub mod value_objects;

pub use catalog::*;
pub use errors::*;
pub use reservation::{NewReservation, Reservation};
pub use value_objects::*;
