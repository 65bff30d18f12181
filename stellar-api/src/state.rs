use std::sync::Arc;
use stellar_core::BookingService;

#[derive(Clone)]
pub struct AppState {
    pub booking_service: Arc<dyn BookingService>,
}
