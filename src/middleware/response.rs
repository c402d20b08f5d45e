use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Success body of the form `{"message": ..., "<key>": <payload>, ...}`
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: Result<Map<String, Value>, serde_json::Error>,
}

impl ApiResponse {
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        let mut body = Map::new();
        body.insert("message".into(), Value::String(message.into()));
        Self { status, body: Ok(body) }
    }

    /// 200 OK
    pub fn ok(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::OK, message)
    }

    /// 201 Created
    pub fn created(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::CREATED, message)
    }

    /// Attaches a serialized payload under `key`.
    pub fn with(mut self, key: &str, payload: impl Serialize) -> Self {
        self.body = self.body.and_then(|mut body| {
            body.insert(key.to_string(), serde_json::to_value(payload)?);
            Ok(body)
        });
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        match self.body {
            Ok(body) => (self.status, Json(Value::Object(body))).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Failed to serialize response data",
                        "code": "STORE_FAILURE"
                    })),
                )
                    .into_response()
            }
        }
    }
}

pub type ApiResult<T = ApiResponse> = Result<T, crate::error::ApiError>;
