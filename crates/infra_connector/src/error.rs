//! Credential resolution errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    /// Neither an identity token nor a renewal token is configured
    #[error("X_REPLIT_TOKEN not found for repl/depl")]
    MissingPlatformToken,

    /// The connector has no settings or lacks the requested secret
    #[error("{connector} not connected")]
    NotConnected { connector: String },

    /// The connector service could not be reached
    #[error("Connector request failed: {0}")]
    Request(String),

    /// The connector service answered with a non-success status
    #[error("Connector service returned status {status}")]
    Status { status: u16 },

    /// The connector response body was not the expected JSON
    #[error("Invalid connector response: {0}")]
    InvalidResponse(String),
}

impl ConnectorError {
    pub fn not_connected(connector: impl Into<String>) -> Self {
        ConnectorError::NotConnected {
            connector: connector.into(),
        }
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ConnectorError::InvalidResponse(err.to_string())
        } else {
            ConnectorError::Request(err.to_string())
        }
    }
}
