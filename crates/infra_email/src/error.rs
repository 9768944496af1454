//! Email error types

use thiserror::Error;

use infra_connector::ConnectorError;

/// Errors from sending email
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmailError {
    /// No API key could be resolved
    #[error("Email credentials unavailable: {0}")]
    Credentials(#[from] ConnectorError),

    /// The provider refused the message
    #[error("Email rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Network failure or timeout
    #[error("Email transport error: {0}")]
    Transport(String),

    /// The provider's response could not be decoded
    #[error("Invalid email provider response: {0}")]
    Decode(String),

    /// The message itself is unusable, e.g. no recipient
    #[error("Invalid email: {0}")]
    Invalid(String),
}

impl From<reqwest::Error> for EmailError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EmailError::Decode(err.to_string())
        } else {
            EmailError::Transport(err.to_string())
        }
    }
}
