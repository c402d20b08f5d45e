// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::StoreError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    MalformedInput(String),
    DuplicateIdentity(String),

    // 401 Unauthorized
    Unauthenticated(String),
    UnknownIdentity(String),
    InvalidCredentials(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    StoreFailure(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),

    // 504 Gateway Timeout
    Timeout(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::MalformedInput(_) => 400,
            ApiError::DuplicateIdentity(_) => 400,
            ApiError::Unauthenticated(_) => 401,
            ApiError::UnknownIdentity(_) => 401,
            ApiError::InvalidCredentials(_) => 401,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::StoreFailure(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::Timeout(_) => 504,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::MalformedInput(msg)
            | ApiError::DuplicateIdentity(msg)
            | ApiError::Unauthenticated(msg)
            | ApiError::UnknownIdentity(msg)
            | ApiError::InvalidCredentials(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::StoreFailure(msg)
            | ApiError::ServiceUnavailable(msg)
            | ApiError::Timeout(msg) => msg,
        }
    }

    /// Machine-readable code sent alongside the message
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MalformedInput(_) => "MALFORMED_INPUT",
            ApiError::DuplicateIdentity(_) => "DUPLICATE_IDENTITY",
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::UnknownIdentity(_) => "UNKNOWN_IDENTITY",
            ApiError::InvalidCredentials(_) => "INVALID_CREDENTIALS",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::StoreFailure(_) => "STORE_FAILURE",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
            ApiError::Timeout(_) => "TIMEOUT",
        }
    }

    /// The `error` field carries the human-readable message; `code` is for programs.
    pub fn to_json(&self) -> Value {
        json!({
            "error": self.message(),
            "code": self.error_code()
        })
    }
}

impl ApiError {
    pub fn malformed_input(message: impl Into<String>) -> Self {
        ApiError::MalformedInput(message.into())
    }

    pub fn duplicate_identity(message: impl Into<String>) -> Self {
        ApiError::DuplicateIdentity(message.into())
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn unknown_identity(message: impl Into<String>) -> Self {
        ApiError::UnknownIdentity(message.into())
    }

    pub fn invalid_credentials(message: impl Into<String>) -> Self {
        ApiError::InvalidCredentials(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn store_failure(message: impl Into<String>) -> Self {
        ApiError::StoreFailure(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        ApiError::Timeout(message.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail(_) => ApiError::duplicate_identity("Email is already registered"),
            StoreError::Timeout { operation, limit } => {
                tracing::error!("Store operation '{}' exceeded {:?}", operation, limit);
                ApiError::timeout("The request took too long to complete")
            }
            StoreError::Unavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                ApiError::service_unavailable("Database temporarily unavailable")
            }
            StoreError::Corrupt(msg) => {
                tracing::error!("Corrupt row in store: {}", msg);
                ApiError::store_failure("An error occurred while processing your request")
            }
            StoreError::Backend(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::store_failure("Database error occurred")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
