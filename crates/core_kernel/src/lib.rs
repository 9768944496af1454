//! Core Kernel - Foundational types shared by the lead intake crates
//!
//! This crate provides the building blocks used across all other crates:
//! - Strongly-typed submission identifiers
//! - The port error type and health-check abstractions for adapters

pub mod identifiers;
pub mod ports;

pub use identifiers::{
    BookingId, CalculatorSubmissionId, PartnerRegistrationId, CareerApplicationId,
};
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
