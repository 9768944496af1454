//! Test Data Builders
//!
//! Builder patterns for constructing form payloads with sensible defaults.
//! Builders start from the matching fixture, so tests only specify the
//! fields relevant to them.

use chrono::{DateTime, Utc};
use serde_json::Value;

use domain_leads::{BookingForm, CalculatorForm, CareerForm, LabeledValue, PartnerForm};

use crate::fixtures::{BookingFixtures, CalculatorFixtures, CareerFixtures, PartnerFixtures};

/// Builder for booking forms
pub struct BookingFormBuilder {
    form: BookingForm,
}

impl Default for BookingFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFormBuilder {
    /// Creates a new builder with valid default values
    pub fn new() -> Self {
        Self {
            form: BookingFixtures::form(),
        }
    }

    /// Sets the full name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.form.name = name.into();
        self
    }

    /// Sets the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.form.email = email.into();
        self
    }

    /// Sets the requested service
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.form.service = service.into();
        self
    }

    /// Sets the free-text message
    pub fn with_message(mut self, message: Option<&str>) -> Self {
        self.form.message = message.map(str::to_string);
        self
    }

    /// Sets the package and building type extras
    pub fn with_extras(mut self, package_type: Option<&str>, building_type: Option<&str>) -> Self {
        self.form.package_type = package_type.map(str::to_string);
        self.form.building_type = building_type.map(str::to_string);
        self
    }

    /// Sets consent and its timestamp
    pub fn with_consent(mut self, given: bool, at: Option<DateTime<Utc>>) -> Self {
        self.form.consent_given = given;
        self.form.consent_timestamp = at;
        self
    }

    pub fn with_marketing_consent(mut self, given: bool) -> Self {
        self.form.marketing_consent = given;
        self
    }

    /// Builds the form
    pub fn build(self) -> BookingForm {
        self.form
    }

    /// Builds the camelCase JSON body the website would post
    pub fn json(self) -> Value {
        to_json(&self.form)
    }
}

/// Builder for calculator result forms
pub struct CalculatorFormBuilder {
    form: CalculatorForm,
}

impl Default for CalculatorFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorFormBuilder {
    pub fn new() -> Self {
        Self {
            form: CalculatorFixtures::form(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.form.email = email.into();
        self
    }

    pub fn with_name(mut self, name: Option<&str>) -> Self {
        self.form.name = name.map(str::to_string);
        self
    }

    /// Sets the calculator type (`heizung`, `pv`, `daemmung`, `komplett`, ...)
    pub fn with_calculator_type(mut self, calculator_type: impl Into<String>) -> Self {
        self.form.calculator_type = calculator_type.into();
        self
    }

    /// Appends an input row
    pub fn with_input(mut self, label: &str, value: &str) -> Self {
        self.form.inputs.get_or_insert_with(Vec::new).push(LabeledValue::new(label, value));
        self
    }

    /// Appends a result row
    pub fn with_result(mut self, label: &str, value: &str) -> Self {
        self.form.results.get_or_insert_with(Vec::new).push(LabeledValue::new(label, value));
        self
    }

    /// Empties both lists
    pub fn without_rows(mut self) -> Self {
        self.form.inputs = Some(Vec::new());
        self.form.results = Some(Vec::new());
        self
    }

    pub fn build(self) -> CalculatorForm {
        self.form
    }

    pub fn json(self) -> Value {
        to_json(&self.form)
    }
}

/// Builder for partner registration forms
pub struct PartnerFormBuilder {
    form: PartnerForm,
}

impl Default for PartnerFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PartnerFormBuilder {
    pub fn new() -> Self {
        Self {
            form: PartnerFixtures::form(),
        }
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Self {
        self.form.company_name = name.into();
        self
    }

    pub fn with_contact_person(mut self, person: impl Into<String>) -> Self {
        self.form.contact_person = person.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.form.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.form.phone = phone.into();
        self
    }

    /// Replaces the trade list
    pub fn with_trades(mut self, trades: &[&str]) -> Self {
        self.form.trades = trades.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_website(mut self, website: Option<&str>) -> Self {
        self.form.website = website.map(str::to_string);
        self
    }

    pub fn with_motivation(mut self, motivation: impl Into<String>) -> Self {
        self.form.motivation = motivation.into();
        self
    }

    pub fn with_certifications(mut self, certifications: Option<&str>) -> Self {
        self.form.certifications = certifications.map(str::to_string);
        self
    }

    pub fn build(self) -> PartnerForm {
        self.form
    }

    pub fn json(self) -> Value {
        to_json(&self.form)
    }
}

/// Builder for career application forms
pub struct CareerFormBuilder {
    form: CareerForm,
}

impl Default for CareerFormBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CareerFormBuilder {
    pub fn new() -> Self {
        Self {
            form: CareerFixtures::form(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.form.name = name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.form.email = email.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.form.position = position.into();
        self
    }

    pub fn with_resume_url(mut self, url: Option<&str>) -> Self {
        self.form.resume_url = url.map(str::to_string);
        self
    }

    pub fn build(self) -> CareerForm {
        self.form
    }

    pub fn json(self) -> Value {
        to_json(&self.form)
    }
}

fn to_json<T: serde::Serialize>(form: &T) -> Value {
    serde_json::to_value(form).unwrap_or(Value::Null)
}
