//! Field-level validation reporting
//!
//! Flattens `validator`'s nested error tree into a list of
//! `{field, code, message}` entries that the HTTP layer returns verbatim.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use crate::error::LeadError;
use crate::forms::Normalize;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldError {
    /// camelCase path of the field, e.g. `companyName` or `results[0].label`
    pub field: String,
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Validates a form, returning every failing field
pub fn validate_form<T: Validate>(form: &T) -> Result<(), LeadError> {
    form.validate()
        .map_err(|errors| LeadError::Validation(field_errors(&errors)))
}

/// Trims a form and validates the trimmed copy
///
/// # Errors
///
/// Returns [`LeadError::Validation`] listing every field that fails once
/// surrounding whitespace is removed.
pub fn accept_form<T: Validate + Normalize>(form: T) -> Result<T, LeadError> {
    let form = form.normalized();
    validate_form(&form)?;
    Ok(form)
}

/// Flattens validation errors, sorted by field name
pub fn field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut out = Vec::new();
    collect(errors, "", &mut out);
    out.sort();
    out
}

fn collect(errors: &ValidationErrors, prefix: &str, out: &mut Vec<FieldError>) {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            to_camel_case(field)
        } else {
            format!("{}.{}", prefix, to_camel_case(field))
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Ungültiger Wert für {}", path));
                    out.push(FieldError::new(path.clone(), error.code.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => collect(nested, &path, out),
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// Converts a snake_case Rust field name to the camelCase wire name
pub fn to_camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = !result.is_empty();
        } else if upper_next {
            result.extend(c.to_uppercase());
            upper_next = false;
        } else {
            result.push(c);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::PartnerForm;

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("company_name"), "companyName");
        assert_eq!(to_camel_case("email"), "email");
        assert_eq!(to_camel_case("resumeUrl"), "resumeUrl");
    }

    #[test]
    fn test_partner_short_fields_are_reported() {
        let form = PartnerForm {
            company_name: "X".into(),
            contact_person: "Max Muster".into(),
            email: "max@example.com".into(),
            phone: "0301234".into(),
            address: "Hauptstr. 1".into(),
            trades: vec![],
            employees: "5".into(),
            experience: "zehn Jahre Erfahrung".into(),
            motivation: "kurz".into(),
            ..Default::default()
        };

        let Err(LeadError::Validation(details)) = validate_form(&form) else {
            panic!("expected validation failure");
        };

        let fields: Vec<&str> = details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["companyName", "motivation", "trades"]);
        assert!(details.iter().all(|d| d.code == "length"));
    }
}
