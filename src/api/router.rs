use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_reservation, get_reservation_by_id, list_active_reservations,
    list_overdue_reservations, list_reservations, list_reservations_by_user, return_book,
};

/// Creates the API router with all reservation endpoints
///
/// Commands:
/// - POST /reservations - Create a reservation
/// - POST /reservations/:id/return - Return a book
///
/// Queries:
/// - GET /reservations - All reservations
/// - GET /reservations/:id - One reservation
/// - GET /reservations/user/:user_id - Reservations of a user
/// - GET /reservations/active - ACTIVE reservations
/// - GET /reservations/overdue - ACTIVE reservations past their expected return date
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route(
            "/reservations",
            post(create_reservation).get(list_reservations),
        )
        .route("/reservations/active", get(list_active_reservations))
        .route("/reservations/overdue", get(list_overdue_reservations))
        .route("/reservations/user/:user_id", get(list_reservations_by_user))
        .route("/reservations/:id", get(get_reservation_by_id))
        .route("/reservations/:id/return", post(return_book))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
