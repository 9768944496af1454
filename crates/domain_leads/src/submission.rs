//! Persisted submission records
//!
//! Records are created once by the submission store and never mutated. The
//! `New*` structs carry the caller-supplied fields; the store assigns the id
//! and creation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{BookingId, CalculatorSubmissionId, CareerApplicationId, PartnerRegistrationId};

use crate::error::LeadError;

/// Initial status of a partner registration
pub const PARTNER_STATUS_PENDING: &str = "pending";

/// Initial status of a career application
pub const CAREER_STATUS_NEW: &str = "new";

/// A label/value pair shown on the calculator results page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LabeledValue {
    pub label: String,
    pub value: String,
}

impl LabeledValue {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

// ============================================================================
// Booking
// ============================================================================

/// A consultation booking request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub id: BookingId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub message: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub marketing_consent: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewBookingRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub message: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub marketing_consent: bool,
}

impl NewBookingRequest {
    /// Materializes the record with a fresh id and timestamp
    pub fn into_record(self, created_at: DateTime<Utc>) -> BookingRequest {
        BookingRequest {
            id: BookingId::new_v7(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            service: self.service,
            message: self.message,
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
            marketing_consent: self.marketing_consent,
            created_at,
        }
    }
}

// ============================================================================
// Calculator
// ============================================================================

/// Calculator results sent to a visitor
///
/// `inputs` and `results` hold the JSON text of a `[{label, value}]` list,
/// exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSubmission {
    pub id: CalculatorSubmissionId,
    pub email: String,
    pub name: Option<String>,
    pub calculator_type: String,
    pub inputs: String,
    pub results: String,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CalculatorSubmission {
    /// Parses the stored inputs list
    pub fn parsed_inputs(&self) -> Result<Vec<LabeledValue>, LeadError> {
        Ok(serde_json::from_str(&self.inputs)?)
    }

    /// Parses the stored results list
    pub fn parsed_results(&self) -> Result<Vec<LabeledValue>, LeadError> {
        Ok(serde_json::from_str(&self.results)?)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCalculatorSubmission {
    pub email: String,
    pub name: Option<String>,
    pub calculator_type: String,
    pub inputs: String,
    pub results: String,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
}

impl NewCalculatorSubmission {
    pub fn into_record(self, created_at: DateTime<Utc>) -> CalculatorSubmission {
        CalculatorSubmission {
            id: CalculatorSubmissionId::new_v7(),
            email: self.email,
            name: self.name,
            calculator_type: self.calculator_type,
            inputs: self.inputs,
            results: self.results,
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
            created_at,
        }
    }
}

// ============================================================================
// Partner
// ============================================================================

/// A trade company's partner registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerRegistration {
    pub id: PartnerRegistrationId,
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: Option<String>,
    pub trades: Vec<String>,
    pub employees: String,
    pub experience: String,
    pub motivation: String,
    pub certifications: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewPartnerRegistration {
    pub company_name: String,
    pub contact_person: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub website: Option<String>,
    pub trades: Vec<String>,
    pub employees: String,
    pub experience: String,
    pub motivation: String,
    pub certifications: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
}

impl NewPartnerRegistration {
    /// Materializes the record with status `pending`
    pub fn into_record(self, created_at: DateTime<Utc>) -> PartnerRegistration {
        PartnerRegistration {
            id: PartnerRegistrationId::new_v7(),
            company_name: self.company_name,
            contact_person: self.contact_person,
            email: self.email,
            phone: self.phone,
            address: self.address,
            website: self.website,
            trades: self.trades,
            employees: self.employees,
            experience: self.experience,
            motivation: self.motivation,
            certifications: self.certifications,
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
            status: PARTNER_STATUS_PENDING.to_string(),
            created_at,
        }
    }
}

// ============================================================================
// Career
// ============================================================================

/// A job application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerApplication {
    pub id: CareerApplicationId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub experience: Option<String>,
    pub motivation: Option<String>,
    pub resume_url: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewCareerApplication {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: String,
    pub experience: Option<String>,
    pub motivation: Option<String>,
    pub resume_url: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
}

impl NewCareerApplication {
    /// Materializes the record with status `new`
    pub fn into_record(self, created_at: DateTime<Utc>) -> CareerApplication {
        CareerApplication {
            id: CareerApplicationId::new_v7(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            experience: self.experience,
            motivation: self.motivation,
            resume_url: self.resume_url,
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
            status: CAREER_STATUS_NEW.to_string(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partner_record_starts_pending() {
        let record = NewPartnerRegistration {
            company_name: "Muster Bau GmbH".into(),
            ..Default::default()
        }
        .into_record(Utc::now());

        assert_eq!(record.status, "pending");
        assert_eq!(record.company_name, "Muster Bau GmbH");
    }

    #[test]
    fn test_career_record_starts_new() {
        let record = NewCareerApplication::default().into_record(Utc::now());
        assert_eq!(record.status, "new");
    }

    #[test]
    fn test_calculator_lists_parse_back() {
        let record = NewCalculatorSubmission {
            email: "a@example.com".into(),
            calculator_type: "pv".into(),
            inputs: r#"[{"label":"Dachfläche","value":"40 m²"}]"#.into(),
            results: "[]".into(),
            ..Default::default()
        }
        .into_record(Utc::now());

        let inputs = record.parsed_inputs().unwrap();
        assert_eq!(inputs, vec![LabeledValue::new("Dachfläche", "40 m²")]);
        assert!(record.parsed_results().unwrap().is_empty());
    }

    #[test]
    fn test_booking_serializes_camel_case() {
        let record = NewBookingRequest {
            name: "Anna".into(),
            email: "anna@example.com".into(),
            service: "Energieberatung".into(),
            ..Default::default()
        }
        .into_record(Utc::now());

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("consentGiven").is_some());
        assert!(json.get("createdAt").is_some());
        assert!(json.get("created_at").is_none());
    }
}
