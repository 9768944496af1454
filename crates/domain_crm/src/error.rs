//! CRM error taxonomy

use thiserror::Error;

use infra_connector::ConnectorError;

/// Errors from CRM operations
///
/// Every variant carries owned text only so errors can be cloned into test
/// doubles and into [`crate::sync::SyncReport`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CrmError {
    /// 400: the CRM rejected the payload
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// 401/403
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 404
    #[error("Not found: {message}")]
    NotFound { message: String },

    /// 409: duplicate or conflicting record
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// 429
    #[error("Rate limited: {message}")]
    RateLimited { message: String },

    /// 5xx
    #[error("CRM server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Any other non-success status
    #[error("Unexpected CRM response ({status}): {message}")]
    Unexpected { status: u16, message: String },

    /// Network failure or timeout
    #[error("CRM transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded
    #[error("Invalid CRM response: {0}")]
    Decode(String),

    /// No access token could be resolved
    #[error("CRM credentials unavailable: {0}")]
    Credentials(#[from] ConnectorError),

    /// The payload has no email to key the contact on
    #[error("Email is required")]
    MissingEmail,

    /// The payload could not be turned into form fields
    #[error("Invalid sync payload: {0}")]
    Payload(String),
}

impl CrmError {
    /// Maps an HTTP status and body onto the taxonomy
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            400 => CrmError::BadRequest { message },
            401 | 403 => CrmError::Unauthorized { status, message },
            404 => CrmError::NotFound { message },
            409 => CrmError::Conflict { message },
            429 => CrmError::RateLimited { message },
            500..=599 => CrmError::Server { status, message },
            _ => CrmError::Unexpected { status, message },
        }
    }

    /// HTTP status the error was derived from, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            CrmError::BadRequest { .. } => Some(400),
            CrmError::Unauthorized { status, .. } => Some(*status),
            CrmError::NotFound { .. } => Some(404),
            CrmError::Conflict { .. } => Some(409),
            CrmError::RateLimited { .. } => Some(429),
            CrmError::Server { status, .. } | CrmError::Unexpected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Conflicts and bad requests are never retried
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CrmError::Conflict { .. } | CrmError::BadRequest { .. })
    }
}

impl From<reqwest::Error> for CrmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CrmError::Decode(err.to_string())
        } else {
            CrmError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for CrmError {
    fn from(err: serde_json::Error) -> Self {
        CrmError::Payload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(CrmError::from_status(400, ""), CrmError::BadRequest { .. }));
        assert!(matches!(CrmError::from_status(401, ""), CrmError::Unauthorized { status: 401, .. }));
        assert!(matches!(CrmError::from_status(403, ""), CrmError::Unauthorized { status: 403, .. }));
        assert!(matches!(CrmError::from_status(404, ""), CrmError::NotFound { .. }));
        assert!(matches!(CrmError::from_status(409, ""), CrmError::Conflict { .. }));
        assert!(matches!(CrmError::from_status(429, ""), CrmError::RateLimited { .. }));
        assert!(matches!(CrmError::from_status(502, ""), CrmError::Server { status: 502, .. }));
        assert!(matches!(CrmError::from_status(418, ""), CrmError::Unexpected { status: 418, .. }));
    }

    #[test]
    fn test_only_conflict_and_bad_request_are_final() {
        assert!(!CrmError::from_status(409, "dup").is_retryable());
        assert!(!CrmError::from_status(400, "bad").is_retryable());
        assert!(CrmError::from_status(429, "slow down").is_retryable());
        assert!(CrmError::from_status(503, "down").is_retryable());
        assert!(CrmError::Transport("reset".into()).is_retryable());
    }

    #[test]
    fn test_status_round_trip() {
        for status in [400u16, 401, 403, 404, 409, 429, 500, 503, 418] {
            assert_eq!(CrmError::from_status(status, "x").status(), Some(status));
        }
        assert_eq!(CrmError::MissingEmail.status(), None);
        assert_eq!(CrmError::MissingEmail.to_string(), "Email is required");
    }
}
