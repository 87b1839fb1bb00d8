// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),

    // 401 Unauthorized
    Unauthorized { code: &'static str, message: String },

    // 403 Forbidden
    Forbidden { code: &'static str, message: String },

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity (well-formed JSON the handler cannot act on)
    Unprocessable(String),

    // 422 Unprocessable Entity (uniqueness / duplicate identity)
    Conflict(String),

    // 500 Internal Server Error
    Store(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg) => msg,
            ApiError::Unauthorized { message, .. } => message,
            ApiError::Forbidden { message, .. } => message,
            ApiError::NotFound(msg) => msg,
            ApiError::Unprocessable(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::Store(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::Unauthorized { code, .. } => code,
            ApiError::Forbidden { code, .. } => code,
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Unprocessable(_) => "UNPROCESSABLE_ENTITY",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Store(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": self.message(),
            "code": self.error_code(),
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        ApiError::Unprocessable(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn store(message: impl Into<String>) -> Self {
        ApiError::Store(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            DatabaseError::Conflict(msg) => ApiError::conflict(msg),
            DatabaseError::MissingReference(msg) => ApiError::unprocessable(msg),
            DatabaseError::Serialization(e) => {
                tracing::error!("Stored value failed to (de)serialize: {}", e);
                ApiError::store("Internal server error")
            }
            DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::store("Internal server error")
            }
            other => {
                tracing::error!("Database error: {}", other);
                ApiError::store("Internal server error")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let code = err.code();
        let message = err.to_string();
        if err.is_forbidden() {
            ApiError::Forbidden { code, message }
        } else {
            ApiError::Unauthorized { code, message }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_renders_as_unprocessable() {
        let err = ApiError::conflict("This drink name already exists");
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = err.to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], 422);
        assert_eq!(body["code"], "CONFLICT");
    }

    #[test]
    fn missing_reference_is_unprocessable() {
        let err = ApiError::from(DatabaseError::MissingReference(
            "show refers to a record that does not exist".into(),
        ));
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.error_code(), "UNPROCESSABLE_ENTITY");
    }

    #[test]
    fn store_errors_hide_driver_text() {
        let err = ApiError::from(DatabaseError::Sqlx(sqlx::Error::PoolTimedOut));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), "Internal server error");
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let err = ApiError::from(AuthError::PermissionDenied("post:drinks".into()));
        assert_eq!(err.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(err.error_code(), "unauthorized");

        let err = ApiError::from(AuthError::MissingHeader);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "authorization_header_missing");
    }
}
