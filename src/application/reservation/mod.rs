mod errors;
mod queries;
mod reservation_service;

pub use errors::{ErrorKind, ReservationApplicationError, Result};
pub use queries::{
    get_active_reservations, get_all_reservations, get_overdue_reservations,
    get_overdue_reservations_as_of, get_reservation_by_id, get_reservations_by_user_id,
};
pub use reservation_service::{ServiceDependencies, create_reservation, return_book};
