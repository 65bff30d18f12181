use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stellar_core::ServiceError;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    UnavailableError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UnavailableError(msg) => {
                tracing::error!("Booking service unavailable: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => AppError::NotFoundError(msg),
            ServiceError::Rejected(msg) => AppError::ValidationError(msg),
            ServiceError::Unavailable(msg) => AppError::UnavailableError(msg),
        }
    }
}
