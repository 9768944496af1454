//! CRM adapters
//!
//! - [`hubspot::HubSpotAdapter`]: HubSpot CRM v3 over HTTPS
//!
//! The in-memory test double lives in [`crate::ports::mock`].

pub mod hubspot;

pub use hubspot::{HubSpotAdapter, HubSpotConfig, HUBSPOT_API_URL};
