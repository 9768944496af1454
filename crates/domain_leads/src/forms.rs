//! Request schemas for the public forms
//!
//! Every form derives `Default` and deserializes with `#[serde(default)]`, so
//! a missing required field arrives as an empty value and is reported by the
//! validator against that field rather than as an opaque body error. The
//! calculator lists are the exception: they are `Option`s so that an absent
//! list is told apart from an empty one.
//!
//! Forms are trimmed with [`Normalize`] before validation, so length rules
//! apply to the text that is stored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::LeadError;
use crate::submission::{
    LabeledValue, NewBookingRequest, NewCalculatorSubmission, NewCareerApplication,
    NewPartnerRegistration,
};

/// Treats blank optional strings as absent
fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trims surrounding whitespace from every text field
pub trait Normalize {
    fn normalized(self) -> Self;
}

fn trim(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Booking request form (`/api/anfrage`, `/api/booking`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingForm {
    #[validate(length(min = 1, message = "Name ist erforderlich"))]
    pub name: String,
    #[validate(email(message = "Ungültige E-Mail-Adresse"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Leistung ist erforderlich"))]
    pub service: String,
    pub message: Option<String>,
    pub package_type: Option<String>,
    pub building_type: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
    pub marketing_consent: bool,
}

/// Booking fields that are forwarded to the CRM and email but not stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingExtras {
    pub package_type: Option<String>,
    pub building_type: Option<String>,
}

impl BookingForm {
    pub fn to_new_booking(&self) -> NewBookingRequest {
        NewBookingRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(&self.phone),
            service: self.service.trim().to_string(),
            message: non_blank(&self.message),
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
            marketing_consent: self.marketing_consent,
        }
    }

    pub fn extras(&self) -> BookingExtras {
        BookingExtras {
            package_type: non_blank(&self.package_type),
            building_type: non_blank(&self.building_type),
        }
    }
}

/// Calculator results form (`/api/calculator/send-results`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorForm {
    #[validate(email(message = "Ungültige E-Mail-Adresse"))]
    pub email: String,
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Rechnertyp ist erforderlich"))]
    pub calculator_type: String,
    #[validate(required(message = "Ergebnisse sind erforderlich"))]
    pub results: Option<Vec<LabeledValue>>,
    #[validate(required(message = "Eingaben sind erforderlich"))]
    pub inputs: Option<Vec<LabeledValue>>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
}

impl CalculatorForm {
    /// Builds the insert value, serializing both lists to JSON text
    pub fn to_new_submission(&self) -> Result<NewCalculatorSubmission, LeadError> {
        Ok(NewCalculatorSubmission {
            email: self.email.trim().to_string(),
            name: non_blank(&self.name),
            calculator_type: self.calculator_type.trim().to_string(),
            inputs: serde_json::to_string(self.inputs.as_deref().unwrap_or_default())?,
            results: serde_json::to_string(self.results.as_deref().unwrap_or_default())?,
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
        })
    }
}

/// Partner registration form (`/api/partner`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct PartnerForm {
    #[validate(length(min = 2, message = "Firmenname muss mindestens 2 Zeichen lang sein"))]
    pub company_name: String,
    #[validate(length(min = 2, message = "Ansprechpartner muss mindestens 2 Zeichen lang sein"))]
    pub contact_person: String,
    #[validate(email(message = "Ungültige E-Mail-Adresse"))]
    pub email: String,
    #[validate(length(min = 6, message = "Telefonnummer muss mindestens 6 Zeichen lang sein"))]
    pub phone: String,
    #[validate(length(min = 5, message = "Adresse muss mindestens 5 Zeichen lang sein"))]
    pub address: String,
    pub website: Option<String>,
    #[validate(length(min = 1, message = "Mindestens ein Gewerk auswählen"))]
    pub trades: Vec<String>,
    #[validate(length(min = 1, message = "Mitarbeiterzahl ist erforderlich"))]
    pub employees: String,
    #[validate(length(min = 10, message = "Erfahrung muss mindestens 10 Zeichen lang sein"))]
    pub experience: String,
    #[validate(length(min = 20, message = "Motivation muss mindestens 20 Zeichen lang sein"))]
    pub motivation: String,
    pub certifications: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
}

impl PartnerForm {
    pub fn to_new_registration(&self) -> NewPartnerRegistration {
        NewPartnerRegistration {
            company_name: self.company_name.trim().to_string(),
            contact_person: self.contact_person.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            website: non_blank(&self.website),
            trades: self.trades.clone(),
            employees: self.employees.clone(),
            experience: self.experience.clone(),
            motivation: self.motivation.clone(),
            certifications: non_blank(&self.certifications),
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
        }
    }
}

/// Career application form (`/api/karriere`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct CareerForm {
    #[validate(length(min = 1, message = "Name ist erforderlich"))]
    pub name: String,
    #[validate(email(message = "Ungültige E-Mail-Adresse"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "Position ist erforderlich"))]
    pub position: String,
    pub experience: Option<String>,
    pub motivation: Option<String>,
    pub resume_url: Option<String>,
    pub consent_given: bool,
    pub consent_timestamp: Option<DateTime<Utc>>,
}

impl CareerForm {
    pub fn to_new_application(&self) -> NewCareerApplication {
        NewCareerApplication {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(&self.phone),
            position: self.position.trim().to_string(),
            experience: non_blank(&self.experience),
            motivation: non_blank(&self.motivation),
            resume_url: non_blank(&self.resume_url),
            consent_given: self.consent_given,
            consent_timestamp: self.consent_timestamp,
        }
    }
}

impl Normalize for BookingForm {
    fn normalized(mut self) -> Self {
        trim(&mut self.name);
        trim(&mut self.email);
        trim(&mut self.service);
        self.phone = non_blank(&self.phone);
        self.message = non_blank(&self.message);
        self.package_type = non_blank(&self.package_type);
        self.building_type = non_blank(&self.building_type);
        self
    }
}

impl Normalize for CalculatorForm {
    fn normalized(mut self) -> Self {
        trim(&mut self.email);
        trim(&mut self.calculator_type);
        self.name = non_blank(&self.name);
        self
    }
}

impl Normalize for PartnerForm {
    fn normalized(mut self) -> Self {
        for field in [
            &mut self.company_name,
            &mut self.contact_person,
            &mut self.email,
            &mut self.phone,
            &mut self.address,
            &mut self.employees,
            &mut self.experience,
            &mut self.motivation,
        ] {
            trim(field);
        }
        self.website = non_blank(&self.website);
        self.certifications = non_blank(&self.certifications);
        self.trades = self
            .trades
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        self
    }
}

impl Normalize for CareerForm {
    fn normalized(mut self) -> Self {
        trim(&mut self.name);
        trim(&mut self.email);
        trim(&mut self.position);
        self.phone = non_blank(&self.phone);
        self.experience = non_blank(&self.experience);
        self.motivation = non_blank(&self.motivation);
        self.resume_url = non_blank(&self.resume_url);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let form: BookingForm = serde_json::from_str(r#"{"email":"a@example.com"}"#).unwrap();
        assert_eq!(form.name, "");
        assert!(!form.consent_given);
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_booking_blank_optionals_become_none() {
        let form = BookingForm {
            name: " Anna ".into(),
            email: "anna@example.com".into(),
            service: "Energieberatung".into(),
            phone: Some("   ".into()),
            package_type: Some("premium".into()),
            ..Default::default()
        };

        let new_booking = form.to_new_booking();
        assert_eq!(new_booking.name, "Anna");
        assert_eq!(new_booking.phone, None);
        assert_eq!(form.extras().package_type.as_deref(), Some("premium"));
        assert_eq!(form.extras().building_type, None);
    }

    #[test]
    fn test_consent_timestamp_accepts_rfc3339_and_null() {
        let with_ts: CareerForm = serde_json::from_str(
            r#"{"consentGiven":true,"consentTimestamp":"2024-05-01T08:30:00Z"}"#,
        )
        .unwrap();
        assert!(with_ts.consent_given);
        assert!(with_ts.consent_timestamp.is_some());

        let without: CareerForm = serde_json::from_str(r#"{"consentTimestamp":null}"#).unwrap();
        assert!(without.consent_timestamp.is_none());
    }

    #[test]
    fn test_calculator_lists_are_serialized() {
        let form = CalculatorForm {
            email: "a@example.com".into(),
            calculator_type: "heizung".into(),
            results: Some(vec![LabeledValue::new("Ersparnis", "1.200 €")]),
            inputs: Some(vec![]),
            ..Default::default()
        };

        let new_submission = form.to_new_submission().unwrap();
        assert_eq!(new_submission.inputs, "[]");
        assert_eq!(new_submission.results, r#"[{"label":"Ersparnis","value":"1.200 €"}]"#);
    }

    #[test]
    fn test_blank_required_fields_fail_after_normalizing() {
        let form = BookingForm {
            name: "   ".into(),
            email: " anna@example.com ".into(),
            service: "\t".into(),
            ..Default::default()
        }
        .normalized();

        assert_eq!(form.email, "anna@example.com");
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("service"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn test_partner_padding_does_not_count_towards_length() {
        let form = PartnerForm {
            company_name: "  ".into(),
            contact_person: " X ".into(),
            phone: "      ".into(),
            trades: vec!["  ".into(), " dach ".into()],
            ..Default::default()
        }
        .normalized();

        assert_eq!(form.trades, vec!["dach".to_string()]);
        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("company_name"));
        assert!(fields.contains_key("contact_person"));
        assert!(fields.contains_key("phone"));
    }

    #[test]
    fn test_calculator_lists_must_be_present() {
        let form: CalculatorForm =
            serde_json::from_str(r#"{"email":"a@example.com","calculatorType":"pv"}"#).unwrap();
        assert_eq!(form.results, None);

        let errors = form.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields["results"][0].code, "required");
        assert_eq!(fields["inputs"][0].code, "required");

        let empty: CalculatorForm = serde_json::from_str(
            r#"{"email":"a@example.com","calculatorType":"pv","results":[],"inputs":[]}"#,
        )
        .unwrap();
        assert!(empty.validate().is_ok());
    }
}
