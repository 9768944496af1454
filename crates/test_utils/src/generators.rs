//! Property-Based Test Generators
//!
//! Proptest strategies for form payloads plus `fake`-backed helpers for
//! realistic one-off values.

use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;

use domain_leads::{BookingForm, LabeledValue, PartnerForm};

/// Trade keys offered on the partner form
pub const TRADE_KEYS: [&str; 10] = [
    "heizung", "elektro", "daemmung", "dach", "fenster", "solar", "sanitaer", "maler",
    "trockenbau", "geruest",
];

/// Calculator types the website knows
pub const CALCULATOR_TYPES: [&str; 4] = ["heizung", "pv", "daemmung", "komplett"];

/// Strategy for syntactically valid email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,12}", "[a-z]{2,10}", prop_oneof![Just("de"), Just("com"), Just("org")])
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Strategy for strings that fail email validation
pub fn invalid_email_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,12}",
        "[a-z]{1,8}@",
        "@[a-z]{1,8}\\.de",
    ]
}

/// Strategy for full names with one to four words
pub fn full_name_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-ZÄÖÜ][a-zäöüß]{1,10}", 1..5).prop_map(|parts| parts.join(" "))
}

/// Strategy for a non-empty subset of trade keys
pub fn trades_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::sample::subsequence(TRADE_KEYS.to_vec(), 1..=TRADE_KEYS.len())
        .prop_map(|keys| keys.into_iter().map(str::to_string).collect())
}

/// Strategy for label/value rows
pub fn labeled_values_strategy() -> impl Strategy<Value = Vec<LabeledValue>> {
    prop::collection::vec(
        ("[A-Za-zäöü ]{1,20}", "[0-9.,]{1,8}( m²| kWh| €)?")
            .prop_map(|(label, value)| LabeledValue::new(label, value)),
        0..6,
    )
}

/// Strategy for booking forms that pass validation
pub fn valid_booking_strategy() -> impl Strategy<Value = BookingForm> {
    (
        full_name_strategy(),
        email_strategy(),
        prop_oneof![Just("Energieberatung"), Just("Heizungstausch"), Just("Photovoltaik")],
        any::<bool>(),
    )
        .prop_map(|(name, email, service, marketing)| BookingForm {
            name,
            email,
            service: service.to_string(),
            consent_given: true,
            marketing_consent: marketing,
            ..Default::default()
        })
}

/// Strategy for partner forms that pass validation
pub fn valid_partner_strategy() -> impl Strategy<Value = PartnerForm> {
    (
        "[A-Z][a-z]{2,12} (Bau|Haustechnik|Solar) GmbH",
        full_name_strategy().prop_filter("at least two characters", |n| n.chars().count() >= 2),
        email_strategy(),
        "0[0-9]{2} [0-9]{6,8}",
        trades_strategy(),
    )
        .prop_map(|(company_name, contact_person, email, phone, trades)| PartnerForm {
            company_name,
            contact_person,
            email,
            phone,
            address: "Hauptstraße 1, 10115 Berlin".to_string(),
            trades,
            employees: "1-5".to_string(),
            experience: "Seit zehn Jahren im Handwerk".to_string(),
            motivation: "Gemeinsam mehr Sanierungen umsetzen".to_string(),
            ..Default::default()
        })
}

/// A random, plausible full name
pub fn fake_name() -> String {
    let first: String = FirstName().fake();
    let last: String = LastName().fake();
    format!("{} {}", first, last)
}

/// A random email under a reserved example domain
pub fn fake_email() -> String {
    SafeEmail().fake()
}

pub fn fake_phone() -> String {
    PhoneNumber().fake()
}

pub fn fake_company() -> String {
    CompanyName().fake()
}
