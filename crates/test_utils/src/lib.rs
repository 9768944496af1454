//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the lead
//! intake test suite.
//!
//! # Modules
//!
//! - `fixtures`: Ready-made form payloads for each submission type
//! - `builders`: Builder patterns for test form construction
//! - `database`: PostgreSQL container management for integration tests
//! - `generators`: Property-based and fake-data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use generators::*;
