//! Lead Domain
//!
//! This crate models the four kinds of website form submissions handled by
//! the lead intake service:
//!
//! - **Booking**: a consultation request for a service package
//! - **Calculator**: the inputs and results of an online savings calculator
//! - **Partner**: a trade company registering as a partner
//! - **Career**: a job application
//!
//! Each submission arrives as a `*Form` (the request schema, validated with
//! `validator`), is turned into a `New*` insert value, and comes back from the
//! [`SubmissionStore`] as an immutable record with an id and creation
//! timestamp. Records are never updated or deleted.
//!
//! # Examples
//!
//! ```rust
//! use domain_leads::forms::BookingForm;
//! use domain_leads::validation::validate_form;
//!
//! let form = BookingForm {
//!     name: "Anna Muster".to_string(),
//!     email: "anna@example.com".to_string(),
//!     service: "Energieberatung".to_string(),
//!     ..Default::default()
//! };
//!
//! assert!(validate_form(&form).is_ok());
//! let new_booking = form.to_new_booking();
//! assert_eq!(new_booking.email, "anna@example.com");
//! ```

pub mod form_type;
pub mod submission;
pub mod forms;
pub mod validation;
pub mod error;
pub mod ports;

pub use form_type::FormType;
pub use submission::{
    BookingRequest, NewBookingRequest,
    CalculatorSubmission, NewCalculatorSubmission, LabeledValue,
    PartnerRegistration, NewPartnerRegistration,
    CareerApplication, NewCareerApplication,
};
pub use forms::{BookingForm, CalculatorForm, PartnerForm, CareerForm, BookingExtras, Normalize};
pub use validation::{accept_form, validate_form, FieldError};
pub use error::LeadError;
pub use ports::SubmissionStore;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemorySubmissionStore;
