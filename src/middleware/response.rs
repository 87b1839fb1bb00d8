use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that automatically adds the success envelope.
/// Object payloads are flattened next to `"success": true`; anything else is
/// placed under `"data"`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": 500,
                        "message": "Internal server error",
                        "code": "INTERNAL_SERVER_ERROR"
                    })),
                )
                    .into_response();
            }
        };

        (StatusCode::OK, Json(envelope(data_value))).into_response()
    }
}

fn envelope(data: Value) -> Value {
    match data {
        Value::Object(mut fields) => {
            fields.insert("success".to_string(), Value::Bool(true));
            Value::Object(fields)
        }
        Value::Null => json!({ "success": true }),
        other => json!({ "success": true, "data": other }),
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
