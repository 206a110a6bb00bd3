use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;

/// Expected failure modes of the service layer. Handlers propagate these with
/// `?`; the transport mapping lives in the [`ResponseError`] impl so no other
/// code decides status codes.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Caller is missing, or lacks the required role/ownership.
    #[error("{0}")]
    Unauthorized(String),
    /// Malformed input or a business-rule violation.
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// Operation not valid for the entity's current state.
    #[error("{0}")]
    Conflict(String),
    /// Store failure. The cause is logged server-side; the message here is
    /// the generic text shown to the caller.
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn unauthorized() -> Self {
        ServiceError::Unauthorized("Unauthorized".into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ServiceError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ServiceError::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        ServiceError::Conflict(msg.into())
    }

    /// Log the underlying store error and hide it behind a generic message.
    pub fn infra(err: sqlx::Error, public_msg: &str) -> Self {
        tracing::error!(error = %err, "{}", public_msg);
        ServiceError::Internal(public_msg.to_string())
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized(_) => StatusCode::FORBIDDEN,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "error": self.to_string()
        }))
    }
}
