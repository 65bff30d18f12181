use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use stellar_api::{app, AppState};
use stellar_store::InMemoryBookingService;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    app(AppState {
        booking_service: Arc::new(InMemoryBookingService::seeded()),
    })
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = test_app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_booking(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/bookings")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_list_destinations() {
    let (status, body) = send(get("/destinations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 5);
    assert_eq!(body[1]["destination_type"], "planetary-base");
}

#[tokio::test]
async fn test_destination_options() {
    let (status, seats) = send(get("/destinations/4/seat-classes")).await;
    assert_eq!(status, StatusCode::OK);
    let seats = seats.as_array().unwrap();
    assert_eq!(seats.len(), 3);
    assert!(seats.iter().all(|s| s["destination_id"] == 4));

    let (status, rooms) = send(get("/destinations/4/accommodations")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rooms[0]["price_per_night"], 8500);
}

#[tokio::test]
async fn test_unknown_destination() {
    let (status, body) = send(get("/destinations/42")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("42"));

    let (status, _) = send(get("/destinations/42/seat-classes")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_booking() {
    let (status, body) = send(post_booking(json!({
        "destination_id": 1,
        "seat_class_id": 2,
        "accommodation_id": 2,
        "departure_date": "2025-04-01T00:00:00Z",
        "return_date": "2025-04-16T00:00:00Z",
        "passengers": 2
    })))
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "CONFIRMED");
    // Luxury Cabin 2,100,000 x 2 + Comfort Suite 30,000 x 15 nights
    assert_eq!(body["total_price"], 4_650_000);
}

#[tokio::test]
async fn test_create_booking_rejects_foreign_seat_class() {
    let (status, body) = send(post_booking(json!({
        "destination_id": 1,
        "seat_class_id": 5,
        "accommodation_id": 1,
        "departure_date": "2025-04-01T00:00:00Z",
        "return_date": "2025-04-16T00:00:00Z",
        "passengers": 1
    })))
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
