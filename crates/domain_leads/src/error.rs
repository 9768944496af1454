//! Lead domain errors

use thiserror::Error;

use core_kernel::PortError;

use crate::validation::FieldError;

/// Errors raised while accepting a submission
#[derive(Debug, Error)]
pub enum LeadError {
    /// One or more fields failed validation
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// Unknown form type identifier
    #[error("Unknown form type: {0}")]
    UnknownFormType(String),

    /// Stored or outbound JSON could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The submission store failed
    #[error("Storage error: {0}")]
    Storage(#[from] PortError),
}

impl LeadError {
    /// Field-level details, empty for non-validation errors
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            LeadError::Validation(details) => details,
            _ => &[],
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LeadError::Validation(_))
    }
}
