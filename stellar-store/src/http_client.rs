use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use stellar_catalog::{Accommodation, Destination, SeatClass};
use stellar_core::{BookingReceipt, BookingRequest, BookingService, ServiceError};
use tracing::warn;
use crate::app_config::BookingServiceConfig;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Booking service reached over HTTP
pub struct HttpBookingService {
    client: Client,
    base_url: String,
}

impl HttpBookingService {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Unavailable(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    pub fn from_config(config: &BookingServiceConfig) -> Result<Self, ServiceError> {
        Self::new(config.base_url.clone(), config.timeout())
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

// Timeouts and connection failures are reported the same way
fn transport_error(e: reqwest::Error) -> ServiceError {
    warn!("Booking service request failed: {}", e);
    ServiceError::Unavailable(e.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ServiceError::Unavailable(format!("invalid response: {}", e)));
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    Err(match status {
        StatusCode::NOT_FOUND => ServiceError::NotFound(message),
        s if s.is_client_error() => ServiceError::Rejected(message),
        _ => ServiceError::Unavailable(message),
    })
}

#[async_trait]
impl BookingService for HttpBookingService {
    async fn list_destinations(&self) -> Result<Vec<Destination>, ServiceError> {
        self.get("/destinations").await
    }

    async fn get_destination(&self, destination_id: u32) -> Result<Destination, ServiceError> {
        self.get(&format!("/destinations/{}", destination_id)).await
    }

    async fn list_seat_classes(&self, destination_id: u32) -> Result<Vec<SeatClass>, ServiceError> {
        self.get(&format!("/destinations/{}/seat-classes", destination_id)).await
    }

    async fn list_accommodations(&self, destination_id: u32) -> Result<Vec<Accommodation>, ServiceError> {
        self.get(&format!("/destinations/{}/accommodations", destination_id)).await
    }

    async fn create_booking(&self, request: &BookingRequest) -> Result<BookingReceipt, ServiceError> {
        let response = self
            .client
            .post(self.url("/bookings"))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn service(server: &MockServer) -> HttpBookingService {
        HttpBookingService::new(server.uri(), Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn test_list_seat_classes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/destinations/2/seat-classes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": 4,
                "destination_id": 2,
                "name": "Economy",
                "price": 4500000,
                "features": ["Basic life support"],
                "description": "Standard accommodations"
            }])))
            .mount(&server)
            .await;

        let seats = service(&server).list_seat_classes(2).await.unwrap();
        assert_eq!(seats.len(), 1);
        assert_eq!(seats[0].price, 4_500_000);
    }

    #[tokio::test]
    async fn test_error_statuses() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/destinations/9"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "error": "Destination not found" })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/destinations"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = service(&server);
        assert_eq!(
            client.get_destination(9).await,
            Err(ServiceError::NotFound("Destination not found".to_string()))
        );
        assert!(matches!(client.list_destinations().await, Err(ServiceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_create_booking() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/bookings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "booking_id": "42",
                "total_price": 2520000,
                "status": "CONFIRMED"
            })))
            .mount(&server)
            .await;

        let departure = Utc.with_ymd_and_hms(2025, 3, 15, 0, 0, 0).unwrap();
        let request = BookingRequest {
            destination_id: 1,
            seat_class_id: 1,
            accommodation_id: 1,
            departure_date: departure,
            return_date: departure + ChronoDuration::days(10),
            passengers: 2,
        };

        let receipt = service(&server).create_booking(&request).await.unwrap();
        assert_eq!(receipt.booking_id, "42");
    }

    #[tokio::test]
    async fn test_from_config() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/destinations/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "name": "Europa Orbit Research Station",
                "destination_type": "orbital-station",
                "base_price": 12000000,
                "travel_time": "2.5 years",
                "description": "",
                "next_launch": "December 10, 2025"
            })))
            .mount(&server)
            .await;

        let config = BookingServiceConfig {
            base_url: format!("{}/", server.uri()),
            timeout_seconds: 1,
        };
        let client = HttpBookingService::from_config(&config).unwrap();
        let europa = client.get_destination(3).await.unwrap();
        assert_eq!(europa.base_price, 12_000_000);
    }

    #[tokio::test]
    async fn test_timeout_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/destinations"))
            .respond_with(ResponseTemplate::new(200).set_delay(std::time::Duration::from_secs(2)))
            .mount(&server)
            .await;

        let result = service(&server).list_destinations().await;
        assert!(matches!(result, Err(ServiceError::Unavailable(_))));
    }
}
