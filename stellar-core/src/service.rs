use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stellar_catalog::{Accommodation, Destination, SeatClass};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
}

/// Booking creation payload sent to the booking service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingRequest {
    pub destination_id: u32,
    pub seat_class_id: u32,
    pub accommodation_id: u32,
    pub departure_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub passengers: u32,
}

/// What the booking service hands back for an accepted booking
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookingReceipt {
    pub booking_id: String,
    pub total_price: i64,
    pub status: BookingStatus,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Booking service unavailable: {0}")]
    Unavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

/// The remote collaborator that owns the catalog and accepts bookings
#[async_trait]
pub trait BookingService: Send + Sync {
    async fn list_destinations(&self) -> Result<Vec<Destination>, ServiceError>;

    async fn get_destination(&self, destination_id: u32) -> Result<Destination, ServiceError>;

    /// Seat classes sold for one destination
    async fn list_seat_classes(&self, destination_id: u32) -> Result<Vec<SeatClass>, ServiceError>;

    /// Accommodations available at one destination
    async fn list_accommodations(
        &self,
        destination_id: u32,
    ) -> Result<Vec<Accommodation>, ServiceError>;

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingReceipt, ServiceError>;
}
