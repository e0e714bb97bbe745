// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse};

use crate::database::DatabaseError;

/// HTTP API error with appropriate status codes and client-friendly messages.
///
/// Error bodies are plain text; the status code carries the semantics.
/// 405 for authorization failures is inherited from the storefront admin
/// handler family this API stays wire-compatible with.
#[derive(Debug)]
pub enum ApiError {
    // 403 - mutating operation without a resolved principal
    Unauthenticated,

    // 400 - required field absent or rejected at the boundary
    MissingField(&'static str),

    // 400 - malformed request outside the per-field guards
    BadRequest(String),

    // 405 - principal present but not entitled to the referenced scope
    Unauthorized(String),

    // 500 - anything the guard clauses did not anticipate
    Internal,
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated => StatusCode::FORBIDDEN,
            ApiError::MissingField(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> String {
        match self {
            ApiError::Unauthenticated => "Unauthenticated".to_string(),
            ApiError::MissingField(field) => format!("{} is required", field),
            ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Unauthorized(msg) => msg.clone(),
            ApiError::Internal => "Internal error".to_string(),
        }
    }
}

// Static constructor methods
impl ApiError {
    pub fn unauthenticated() -> Self {
        ApiError::Unauthenticated
    }

    pub fn missing_field(field: &'static str) -> Self {
        ApiError::MissingField(field)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    /// A referenced row exists outside the acting store (or not at all)
    pub fn not_in_store(reference: &str) -> Self {
        ApiError::Unauthorized(format!("{} does not belong to store", reference))
    }

    pub fn internal() -> Self {
        ApiError::Internal
    }
}

// Convert infrastructure errors to ApiError
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        // Log the real error but return a generic message
        tracing::error!("SQLx error: {}", err);
        ApiError::Internal
    }
}

impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        // Don't expose internal database errors to clients
        tracing::error!("Database error: {}", err);
        ApiError::Internal
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
        (self.status_code(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_handler_family_convention() {
        assert_eq!(ApiError::unauthenticated().status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::missing_field("Price").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::unauthorized().status_code(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::internal().status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_field_names_the_field() {
        assert_eq!(ApiError::missing_field("Price").message(), "Price is required");
        assert_eq!(ApiError::missing_field("Stock").message(), "Stock is required");
    }

    #[test]
    fn not_in_store_names_the_reference() {
        assert_eq!(
            ApiError::not_in_store("Product Id").message(),
            "Product Id does not belong to store"
        );
    }
}
