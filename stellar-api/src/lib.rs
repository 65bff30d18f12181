use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod state;
pub mod error;
pub mod catalog;
pub mod bookings;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", axum::routing::get(root))
        .merge(catalog::routes())
        .merge(bookings::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "message": "Welcome to the Stellar space travel booking API" }))
}
