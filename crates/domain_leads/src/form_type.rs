//! Form type discriminator

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LeadError;

/// The kind of website form a submission came from
///
/// Used to pick the CRM property table, the confirmation flag and the log
/// labels for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Booking,
    Calculator,
    Partner,
    Career,
}

impl FormType {
    /// All form types, in a stable order
    pub const ALL: [FormType; 4] = [
        FormType::Booking,
        FormType::Calculator,
        FormType::Career,
        FormType::Partner,
    ];

    /// Lowercase identifier, as used in logs and property names
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::Booking => "booking",
            FormType::Calculator => "calculator",
            FormType::Partner => "partner",
            FormType::Career => "career",
        }
    }

    /// Human-readable label, capitalized
    pub fn label(&self) -> &'static str {
        match self {
            FormType::Booking => "Booking",
            FormType::Calculator => "Calculator",
            FormType::Partner => "Partner",
            FormType::Career => "Career",
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = LeadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking" => Ok(FormType::Booking),
            "calculator" => Ok(FormType::Calculator),
            "partner" => Ok(FormType::Partner),
            "career" => Ok(FormType::Career),
            other => Err(LeadError::UnknownFormType(other.to_string())),
        }
    }
}
