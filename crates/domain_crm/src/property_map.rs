//! Form field to CRM property mapping
//!
//! Each form type has a static table from local (camelCase) field name to a
//! remote contact property. [`map_properties`] applies a table to a raw form
//! payload:
//!
//! 1. Excluded internal fields are dropped silently.
//! 2. `null` and empty-string values are dropped silently.
//! 3. Fields mapped to [`PropertyTarget::SplitName`] become `firstname`
//!    (first whitespace token) and `lastname` (remaining tokens).
//! 4. Arrays become a `", "`-joined string; every other value is stringified.
//! 5. Fields without a table entry are reported as unmapped.
//!
//! The mapper is pure and total: every JSON object produces a result.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

use domain_leads::FormType;

/// Remote property name to string value
pub type PropertySet = BTreeMap<String, String>;

/// Fields that never leave the service, regardless of table entries
pub const EXCLUDED_FIELDS: [&str; 9] = [
    "id",
    "createdAt",
    "updatedAt",
    "consentGiven",
    "consentTimestamp",
    "marketingConsent",
    "status",
    "internalNotes",
    "dbId",
];

/// Properties every CRM account has out of the box
pub const STANDARD_PROPERTIES: [&str; 7] = [
    "email",
    "phone",
    "company",
    "website",
    "address",
    "firstname",
    "lastname",
];

/// Value written to a confirmation flag
pub const CONFIRMATION_VALUE: &str = "true";

static EXCLUDED: Lazy<HashSet<&'static str>> = Lazy::new(|| EXCLUDED_FIELDS.into_iter().collect());

/// Declared CRM type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    String,
    Number,
    Date,
    Enumeration,
    Bool,
}

/// Where a local field ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyTarget {
    /// Split into `firstname` / `lastname`
    SplitName,
    /// Copied into the named property
    Property(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyMapping {
    pub target: PropertyTarget,
    pub kind: PropertyKind,
    pub description: Option<&'static str>,
}

impl PropertyMapping {
    fn split_name() -> Self {
        Self {
            target: PropertyTarget::SplitName,
            kind: PropertyKind::String,
            description: None,
        }
    }

    fn property(name: &'static str) -> Self {
        Self {
            target: PropertyTarget::Property(name),
            kind: PropertyKind::String,
            description: None,
        }
    }

    fn described(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Field-to-property table for one form type
#[derive(Debug, Clone)]
pub struct PropertyTable {
    form_type: FormType,
    mappings: HashMap<&'static str, PropertyMapping>,
}

impl PropertyTable {
    pub fn new(
        form_type: FormType,
        entries: impl IntoIterator<Item = (&'static str, PropertyMapping)>,
    ) -> Self {
        Self {
            form_type,
            mappings: entries.into_iter().collect(),
        }
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn get(&self, field: &str) -> Option<&PropertyMapping> {
        self.mappings.get(field)
    }

    /// Entries sorted by local field name
    pub fn entries(&self) -> Vec<(&'static str, PropertyMapping)> {
        let mut entries: Vec<_> = self.mappings.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(field, _)| *field);
        entries
    }

    /// Table registered for a form type
    pub fn for_form(form_type: FormType) -> &'static PropertyTable {
        match form_type {
            FormType::Booking => &BOOKING_TABLE,
            FormType::Calculator => &CALCULATOR_TABLE,
            FormType::Career => &CAREER_TABLE,
            FormType::Partner => &PARTNER_TABLE,
        }
    }
}

pub static BOOKING_TABLE: Lazy<PropertyTable> = Lazy::new(|| {
    PropertyTable::new(
        FormType::Booking,
        [
            ("name", PropertyMapping::split_name().described("Split into firstname/lastname")),
            ("email", PropertyMapping::property("email")),
            ("phone", PropertyMapping::property("phone")),
            ("service", PropertyMapping::property("booking_type").described("Service type requested")),
            ("message", PropertyMapping::property("booking_message").described("Customer message")),
            ("packageType", PropertyMapping::property("booking_package").described("Selected package")),
        ],
    )
});

pub static CALCULATOR_TABLE: Lazy<PropertyTable> = Lazy::new(|| {
    PropertyTable::new(
        FormType::Calculator,
        [
            ("name", PropertyMapping::split_name()),
            ("email", PropertyMapping::property("email")),
        ],
    )
});

pub static CAREER_TABLE: Lazy<PropertyTable> = Lazy::new(|| {
    PropertyTable::new(
        FormType::Career,
        [
            ("name", PropertyMapping::split_name()),
            ("email", PropertyMapping::property("email")),
            ("phone", PropertyMapping::property("phone")),
        ],
    )
});

pub static PARTNER_TABLE: Lazy<PropertyTable> = Lazy::new(|| {
    PropertyTable::new(
        FormType::Partner,
        [
            ("contactPerson", PropertyMapping::split_name()),
            ("email", PropertyMapping::property("email")),
            ("phone", PropertyMapping::property("phone")),
            ("companyName", PropertyMapping::property("company")),
            ("website", PropertyMapping::property("website")),
            ("address", PropertyMapping::property("address")),
        ],
    )
});

/// Name of the confirmation flag set after a sync of `form_type`
pub fn confirmation_property(form_type: FormType) -> &'static str {
    match form_type {
        FormType::Booking => "booking_confirmed",
        FormType::Calculator => "calculator_confirmed",
        FormType::Career => "career_confirmed",
        FormType::Partner => "partner_confirmed",
    }
}

/// Result of mapping a form payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappedProperties {
    pub properties: PropertySet,
    /// Local field names with no table entry, in payload iteration order
    pub unmapped: Vec<String>,
}

/// Applies a property table to a raw form payload
pub fn map_properties(fields: &Map<String, Value>, table: &PropertyTable) -> MappedProperties {
    let mut mapped = MappedProperties::default();

    for (field, value) in fields {
        if EXCLUDED.contains(field.as_str()) || is_blank(value) {
            continue;
        }

        let Some(mapping) = table.get(field) else {
            mapped.unmapped.push(field.clone());
            continue;
        };

        match mapping.target {
            PropertyTarget::SplitName => {
                let (first, last) = split_name(&stringify(value));
                mapped.properties.insert("firstname".to_string(), first);
                mapped.properties.insert("lastname".to_string(), last);
            }
            PropertyTarget::Property(name) => {
                mapped.properties.insert(name.to_string(), stringify(value));
            }
        }
    }

    mapped
}

/// Splits a full name into first token and remainder
pub fn split_name(full_name: &str) -> (String, String) {
    let mut tokens = full_name.split_whitespace();
    let first = tokens.next().unwrap_or_default().to_string();
    let rest = tokens.collect::<Vec<_>>().join(" ");
    (first, rest)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(", "),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A non-standard property that must exist in the CRM account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
    pub description: String,
    pub form_type: String,
}

/// Every custom property referenced by the tables plus the confirmation flags
pub fn required_custom_properties() -> Vec<CustomProperty> {
    let mut properties: Vec<CustomProperty> = Vec::new();

    for form_type in FormType::ALL {
        for (_, mapping) in PropertyTable::for_form(form_type).entries() {
            let PropertyTarget::Property(name) = mapping.target else {
                continue;
            };
            if STANDARD_PROPERTIES.contains(&name) || properties.iter().any(|p| p.name == name) {
                continue;
            }
            properties.push(CustomProperty {
                name: name.to_string(),
                kind: mapping.kind,
                description: mapping
                    .description
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Property for {} form", form_type.label())),
                form_type: form_type.label().to_string(),
            });
        }
    }

    for form_type in FormType::ALL {
        properties.push(CustomProperty {
            name: confirmation_property(form_type).to_string(),
            kind: PropertyKind::String,
            description: format!(
                "Set to \"{}\" after {} sync for workflow trigger",
                CONFIRMATION_VALUE,
                form_type.as_str()
            ),
            form_type: form_type.label().to_string(),
        });
    }

    properties
}
