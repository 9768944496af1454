//! CRM Synchronization Domain
//!
//! Mirrors accepted form submissions into the CRM as contacts:
//!
//! - [`property_map`]: static per-form field-to-property tables and the pure
//!   mapper that applies them
//! - [`retry`]: bounded exponential backoff around CRM calls
//! - [`upsert`]: find-by-email, then update or create, then stamp the
//!   form's confirmation flag
//! - [`sync`]: per-form compositions of the above plus notes and companies
//! - [`adapters`]: the HubSpot implementation of [`CrmPort`]
//!
//! Persistence of a submission never depends on this crate: callers store
//! first and treat sync failures as log-only.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_crm::{BookingSync, CrmSync, HubSpotAdapter, HubSpotConfig, RetryPolicy};
//!
//! let hubspot = HubSpotAdapter::new(HubSpotConfig::default(), credentials)?;
//! let crm = CrmSync::new(Arc::new(hubspot), RetryPolicy::default());
//!
//! let outcome = crm.sync_booking(&BookingSync::from_record(&booking, &extras)).await?;
//! tracing::info!(contact_id = %outcome.contact_id, created = outcome.created, "synced");
//! ```

pub mod error;
pub mod property_map;
pub mod retry;
pub mod ports;
pub mod upsert;
pub mod sync;
pub mod adapters;

pub use error::CrmError;
pub use property_map::{
    confirmation_property, map_properties, required_custom_properties, CustomProperty,
    MappedProperties, PropertySet, PropertyTable,
};
pub use retry::{with_retry, RetryPolicy, Retryable};
pub use ports::{CrmPort, NewNote};
pub use upsert::{best_effort, upsert_contact, UpsertOutcome};
pub use sync::{BookingSync, CalculatorSync, CareerSync, CrmSync, PartnerSync, SyncReport};
pub use adapters::{HubSpotAdapter, HubSpotConfig};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{CrmOperation, MockCrm};
