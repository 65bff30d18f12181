use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use stellar_core::{BookingReceipt, BookingRequest};
use tracing::info;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/bookings", post(create_booking))
}

/// POST /bookings
async fn create_booking(
    State(state): State<AppState>,
    Json(req): Json<BookingRequest>,
) -> Result<Json<BookingReceipt>, AppError> {
    let receipt = state.booking_service.create_booking(&req).await.map_err(|e| {
        info!("Failed to create booking: {}", e);
        AppError::from(e)
    })?;

    info!("Booking created: {} (total {})", receipt.booking_id, receipt.total_price);
    Ok(Json(receipt))
}
