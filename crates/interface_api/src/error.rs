//! API error handling
//!
//! Public error bodies are German and stable; the internal cause is logged,
//! never returned.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_leads::{FieldError, LeadError};

pub const INVALID_REQUEST: &str = "Ungültige Anfrage";
pub const INTERNAL_ERROR: &str = "Interner Serverfehler";
pub const SAVE_FAILED: &str = "Speichern fehlgeschlagen";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// `public` is the message shown to the client
    #[error("Internal server error: {message}")]
    Internal { public: &'static str, message: String },
}

impl ApiError {
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            public: INTERNAL_ERROR,
            message: message.into(),
        }
    }

    /// Replaces the client-facing message of an internal error
    pub fn with_public_message(self, public: &'static str) -> Self {
        match self {
            ApiError::Internal { message, .. } => ApiError::Internal { public, message },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(details) => ErrorResponse {
                error: INVALID_REQUEST.to_string(),
                details,
            },
            ApiError::MalformedBody(message) => ErrorResponse {
                error: INVALID_REQUEST.to_string(),
                details: vec![FieldError::new("body", "invalid_json", message)],
            },
            ApiError::Unauthorized => ErrorResponse {
                error: "Nicht autorisiert".to_string(),
                details: Vec::new(),
            },
            ApiError::Forbidden(_) => ErrorResponse {
                error: "Zugriff verweigert".to_string(),
                details: Vec::new(),
            },
            ApiError::NotFound(_) => ErrorResponse {
                error: "Nicht gefunden".to_string(),
                details: Vec::new(),
            },
            ApiError::Internal { public, message } => {
                error!(error = %message, "Request failed");
                ErrorResponse {
                    error: public.to_string(),
                    details: Vec::new(),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<LeadError> for ApiError {
    fn from(err: LeadError) -> Self {
        match err {
            LeadError::Validation(details) => ApiError::Validation(details),
            other => ApiError::internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::PortError;

    #[test]
    fn test_lead_errors_map_to_status() {
        let validation = ApiError::from(LeadError::Validation(vec![FieldError::new(
            "email",
            "email",
            "Ungültige E-Mail-Adresse",
        )]));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let storage = ApiError::from(LeadError::Storage(PortError::connection("db down")));
        assert_eq!(storage.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_public_message_override_only_touches_internal() {
        let err = ApiError::internal("db down").with_public_message(SAVE_FAILED);
        assert!(matches!(err, ApiError::Internal { public: SAVE_FAILED, .. }));

        let err = ApiError::Unauthorized.with_public_message(SAVE_FAILED);
        assert!(matches!(err, ApiError::Unauthorized));
    }

    #[test]
    fn test_error_body_omits_empty_details() {
        let body = serde_json::to_value(ErrorResponse {
            error: INTERNAL_ERROR.to_string(),
            details: Vec::new(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Interner Serverfehler" }));
    }
}
