//! Repository implementations for submission tables
//!
//! Each repository owns the SQL for one table and maps between its row type
//! and the domain record. Rows are only ever inserted and listed; nothing in
//! the service updates or deletes a submission.

pub mod bookings;
pub mod calculator;
pub mod partners;
pub mod careers;

pub use bookings::{BookingRepository, BookingRow};
pub use calculator::{CalculatorRepository, CalculatorSubmissionRow};
pub use partners::{PartnerRepository, PartnerRegistrationRow};
pub use careers::{CareerRepository, CareerApplicationRow};
