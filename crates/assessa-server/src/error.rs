use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use assessa_auth::error::AuthError;
use assessa_backend::error::BackendError;
use assessa_core::error::CoreError;
use assessa_core::inputs::FieldErrors;
use assessa_instruments::error::InstrumentError;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    /// Field-level validation failures; nothing was sent to the backend.
    Validation(FieldErrors),
    Unauthorized(String),
    Forbidden(String),
    /// The backend refused the request with a message.
    Rejected(String),
    BadGateway(String),
    Unavailable(String),
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, fields) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Validation(fields) => (StatusCode::BAD_REQUEST, fields.to_string(), Some(fields)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::Rejected(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg, None),
            ApiError::BadGateway(msg) => {
                tracing::warn!("backend failure: {msg}");
                (StatusCode::BAD_GATEWAY, msg, None)
            }
            ApiError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg, None),
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error".to_string(), None)
            }
        };

        (status, Json(ErrorBody { error: message, fields })).into_response()
    }
}

impl From<BackendError> for ApiError {
    fn from(e: BackendError) -> Self {
        match e {
            BackendError::Rejected(message) => ApiError::Rejected(message),
            BackendError::NotFound { path } => ApiError::NotFound(format!("not found: {path}")),
            BackendError::Serialization(e) => ApiError::Internal(e.to_string()),
            BackendError::InvalidUrl(url) => ApiError::Internal(format!("invalid backend URL: {url}")),
            other => ApiError::BadGateway(other.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(fields) => ApiError::Validation(fields),
            CoreError::Serialization(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<InstrumentError> for ApiError {
    fn from(e: InstrumentError) -> Self {
        match e {
            InstrumentError::Core(e) => e.into(),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken | AuthError::TokenExpired | AuthError::InvalidToken(_) => {
                ApiError::Unauthorized(e.to_string())
            }
            AuthError::Forbidden { .. } => ApiError::Forbidden(e.to_string()),
            AuthError::UnknownRole(_) => ApiError::BadRequest(e.to_string()),
            AuthError::IdentityApi { .. } | AuthError::Transport(_) => ApiError::BadGateway(e.to_string()),
            AuthError::Key(_) | AuthError::Config(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
