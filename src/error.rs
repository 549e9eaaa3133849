// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// API error with the machine-readable codes surfaced to callers.
///
/// Every callable returns either a success envelope or one of these, wrapped
/// as `{ "success": false, "error": { "code", "message" } }`.
#[derive(Debug)]
pub enum ApiError {
    // 401 - identity missing or invalid
    Unauthenticated(String),

    // 400 - missing or out-of-bound fields
    InvalidInput(String),

    // 403 - token role below the required minimum
    Forbidden(String),

    // 403 - workspace token does not resolve to a workspace for this caller
    InvalidWorkspace(String),

    // 404 - target row absent for an id-scoped operation
    NotFound(String),

    // 500 - anything unexpected; details are logged, never returned
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthenticated(_) => 401,
            ApiError::InvalidInput(_) => 400,
            ApiError::Forbidden(_) => 403,
            ApiError::InvalidWorkspace(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Internal(_) => 500,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Unauthenticated(msg) => msg,
            ApiError::InvalidInput(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::InvalidWorkspace(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Internal(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "UNAUTHENTICATED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::Forbidden(_) => "FORBIDDEN",
            ApiError::InvalidWorkspace(_) => "INVALID_WORKSPACE",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": {
                "code": self.code(),
                "message": self.message(),
            }
        })
    }
}

// Static constructor methods
impl ApiError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        ApiError::Unauthenticated(message.into())
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        ApiError::InvalidInput(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    pub fn invalid_workspace(message: impl Into<String>) -> Self {
        ApiError::InvalidWorkspace(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert other error types to ApiError
impl From<crate::database::DatabaseError> for ApiError {
    fn from(err: crate::database::DatabaseError) -> Self {
        match err {
            crate::database::DatabaseError::NotFound(msg) => ApiError::not_found(msg),
            crate::database::DatabaseError::ConfigMissing(name) => {
                tracing::error!("Missing database configuration: {}", name);
                ApiError::internal("Service is not configured")
            }
            crate::database::DatabaseError::Migrate(e) => {
                tracing::error!("Migration error: {}", e);
                ApiError::internal("Service is being updated, please try again later")
            }
            crate::database::DatabaseError::Sqlx(sqlx_err) => {
                // Log the real error but return generic message
                tracing::error!("SQLx error: {}", sqlx_err);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("SQLx error: {}", err);
        ApiError::internal("An error occurred while processing your request")
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
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
