use crate::application::reservation::{
    ServiceDependencies, create_reservation as execute_create_reservation,
    get_active_reservations as query_active_reservations,
    get_all_reservations as query_all_reservations,
    get_overdue_reservations as query_overdue_reservations,
    get_reservation_by_id as query_reservation_by_id,
    get_reservations_by_user_id as query_reservations_by_user_id,
    return_book as execute_return_book,
};
use crate::domain::{ReservationId, UserId};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::{
    error::ApiError,
    types::{CreateReservationRequest, ReservationResponse, ReturnBookRequest},
};

// ============================================================================
// State
// ============================================================================

/// Application state shared by the handlers
#[derive(Clone)]
pub struct AppState {
    pub service_deps: ServiceDependencies,
}

fn to_responses(
    reservations: Vec<crate::domain::Reservation>,
) -> Json<Vec<ReservationResponse>> {
    Json(reservations.into_iter().map(ReservationResponse::from).collect())
}

// ============================================================================
// Command handlers (POST)
// ============================================================================

/// POST /reservations - reserve a book
///
/// 404 for an unknown user or book, 409 when no copy is available,
/// 400 for non-positive rental days or a book without a price.
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let reservation = execute_create_reservation(&state.service_deps, req.to_command()).await?;

    Ok((StatusCode::CREATED, Json(ReservationResponse::from(reservation))))
}

/// POST /reservations/:id/return - return a reserved book
///
/// 409 when the reservation is already finalized.
pub async fn return_book(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<i64>,
    Json(req): Json<ReturnBookRequest>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation =
        execute_return_book(&state.service_deps, req.to_command(reservation_id)).await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

// ============================================================================
// Query handlers (GET)
// ============================================================================

/// GET /reservations/:id
pub async fn get_reservation_by_id(
    State(state): State<Arc<AppState>>,
    Path(reservation_id): Path<i64>,
) -> Result<Json<ReservationResponse>, ApiError> {
    let reservation =
        query_reservation_by_id(&state.service_deps, ReservationId::new(reservation_id)).await?;

    Ok(Json(ReservationResponse::from(reservation)))
}

/// GET /reservations
pub async fn list_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    Ok(to_responses(query_all_reservations(&state.service_deps).await?))
}

/// GET /reservations/user/:user_id
pub async fn list_reservations_by_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let reservations =
        query_reservations_by_user_id(&state.service_deps, UserId::new(user_id)).await?;

    Ok(to_responses(reservations))
}

/// GET /reservations/active
pub async fn list_active_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    Ok(to_responses(query_active_reservations(&state.service_deps).await?))
}

/// GET /reservations/overdue - still out and past the expected return date
pub async fn list_overdue_reservations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    Ok(to_responses(query_overdue_reservations(&state.service_deps).await?))
}
