use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use stellar_catalog::{Accommodation, Destination, SeatClass};
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/destinations", get(list_destinations))
        .route("/destinations/{id}", get(get_destination))
        .route("/destinations/{id}/seat-classes", get(list_seat_classes))
        .route("/destinations/{id}/accommodations", get(list_accommodations))
}

/// GET /destinations
async fn list_destinations(
    State(state): State<AppState>,
) -> Result<Json<Vec<Destination>>, AppError> {
    Ok(Json(state.booking_service.list_destinations().await?))
}

/// GET /destinations/{id}
async fn get_destination(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Destination>, AppError> {
    Ok(Json(state.booking_service.get_destination(id).await?))
}

/// GET /destinations/{id}/seat-classes
async fn list_seat_classes(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<SeatClass>>, AppError> {
    // Unknown destinations are a 404, not an empty list
    state.booking_service.get_destination(id).await?;
    Ok(Json(state.booking_service.list_seat_classes(id).await?))
}

/// GET /destinations/{id}/accommodations
async fn list_accommodations(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Vec<Accommodation>>, AppError> {
    state.booking_service.get_destination(id).await?;
    Ok(Json(state.booking_service.list_accommodations(id).await?))
}
