use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookit_core::CoreError;
use bookit_order::{CheckoutError, DraftError};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    NotFoundError(String),
    /// The remote API failed or could not be reached.
    BadGateway(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<DraftError> for AppError {
    fn from(err: DraftError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::MissingFields => AppError::ValidationError(err.to_string()),
            CheckoutError::SubmissionFailed(_) => AppError::BadGateway(err.to_string()),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Unreachable(_)
            | CoreError::RemoteError { .. }
            | CoreError::DecodeError(_) => AppError::BadGateway(err.to_string()),
            CoreError::Cancelled | CoreError::InternalError(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}
