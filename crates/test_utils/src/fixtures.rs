//! Pre-built Test Fixtures
//!
//! Ready-to-use payloads for every form. Each fixture passes validation, so
//! tests only need to break the field they care about.

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde_json::{json, Value};

use domain_leads::{BookingForm, CalculatorForm, CareerForm, LabeledValue, PartnerForm};

/// Consent timestamp shared by all fixtures
pub static CONSENT_AT: Lazy<DateTime<Utc>> =
    Lazy::new(|| Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());

/// Fixture for booking request data
pub struct BookingFixtures;

impl BookingFixtures {
    /// Raw JSON body as the website posts it
    pub fn json() -> Value {
        json!({
            "name": "Anna Maria Muster",
            "email": "anna@example.com",
            "phone": "030 123456",
            "service": "Energieberatung",
            "message": "Bitte um Rückruf am Vormittag",
            "packageType": "premium",
            "buildingType": "Einfamilienhaus",
            "consentGiven": true,
            "consentTimestamp": "2024-03-01T10:00:00Z",
            "marketingConsent": false
        })
    }

    pub fn form() -> BookingForm {
        BookingForm {
            name: "Anna Maria Muster".into(),
            email: "anna@example.com".into(),
            phone: Some("030 123456".into()),
            service: "Energieberatung".into(),
            message: Some("Bitte um Rückruf am Vormittag".into()),
            package_type: Some("premium".into()),
            building_type: Some("Einfamilienhaus".into()),
            consent_given: true,
            consent_timestamp: Some(*CONSENT_AT),
            marketing_consent: false,
        }
    }
}

/// Fixture for calculator results data
pub struct CalculatorFixtures;

impl CalculatorFixtures {
    pub fn json() -> Value {
        json!({
            "email": "rechner@example.com",
            "name": "Jonas Beispiel",
            "calculatorType": "pv",
            "inputs": [
                { "label": "Dachfläche", "value": "40 m²" },
                { "label": "Ausrichtung", "value": "Süd" }
            ],
            "results": [
                { "label": "Jährlicher Ertrag", "value": "7.200 kWh" },
                { "label": "Amortisation", "value": "11 Jahre" }
            ],
            "consentGiven": true
        })
    }

    pub fn form() -> CalculatorForm {
        CalculatorForm {
            email: "rechner@example.com".into(),
            name: Some("Jonas Beispiel".into()),
            calculator_type: "pv".into(),
            inputs: Some(vec![
                LabeledValue::new("Dachfläche", "40 m²"),
                LabeledValue::new("Ausrichtung", "Süd"),
            ]),
            results: Some(vec![
                LabeledValue::new("Jährlicher Ertrag", "7.200 kWh"),
                LabeledValue::new("Amortisation", "11 Jahre"),
            ]),
            consent_given: true,
            consent_timestamp: None,
        }
    }
}

/// Fixture for partner registration data
pub struct PartnerFixtures;

impl PartnerFixtures {
    pub fn json() -> Value {
        json!({
            "companyName": "Muster Haustechnik GmbH",
            "contactPerson": "Max Mustermann",
            "email": "max@muster-haustechnik.de",
            "phone": "+49 30 1234567",
            "address": "Hauptstraße 1, 10115 Berlin",
            "website": "https://muster-haustechnik.de",
            "trades": ["heizung", "solar"],
            "employees": "10-20",
            "experience": "Seit 15 Jahren im Heizungsbau tätig",
            "motivation": "Wir möchten nachhaltige Sanierungen gemeinsam umsetzen",
            "consentGiven": true
        })
    }

    pub fn form() -> PartnerForm {
        PartnerForm {
            company_name: "Muster Haustechnik GmbH".into(),
            contact_person: "Max Mustermann".into(),
            email: "max@muster-haustechnik.de".into(),
            phone: "+49 30 1234567".into(),
            address: "Hauptstraße 1, 10115 Berlin".into(),
            website: Some("https://muster-haustechnik.de".into()),
            trades: vec!["heizung".into(), "solar".into()],
            employees: "10-20".into(),
            experience: "Seit 15 Jahren im Heizungsbau tätig".into(),
            motivation: "Wir möchten nachhaltige Sanierungen gemeinsam umsetzen".into(),
            certifications: None,
            consent_given: true,
            consent_timestamp: None,
        }
    }
}

/// Fixture for career application data
pub struct CareerFixtures;

impl CareerFixtures {
    pub fn json() -> Value {
        json!({
            "name": "Lena Schmidt",
            "email": "lena@example.com",
            "phone": "0171 2345678",
            "position": "Energieberater (m/w/d)",
            "experience": "5 Jahre",
            "motivation": "Ich möchte die Wärmewende mitgestalten",
            "consentGiven": true
        })
    }

    pub fn form() -> CareerForm {
        CareerForm {
            name: "Lena Schmidt".into(),
            email: "lena@example.com".into(),
            phone: Some("0171 2345678".into()),
            position: "Energieberater (m/w/d)".into(),
            experience: Some("5 Jahre".into()),
            motivation: Some("Ich möchte die Wärmewende mitgestalten".into()),
            resume_url: None,
            consent_given: true,
            consent_timestamp: None,
        }
    }
}
