//! Integration Credentials
//!
//! Resolves the secrets needed by outbound integrations (CRM access token,
//! email API key and sender address). Two providers implement
//! [`CredentialProvider`]:
//!
//! ```text
//! CredentialProvider (trait)
//!     |
//!     +-- StaticCredentials
//!     |       secrets taken from configuration at startup
//!     |
//!     +-- ConnectorCredentials
//!             fetched from the platform connector service and cached
//!             until the reported `expires_at`
//! ```
//!
//! Providers are constructed once at startup and injected into the adapters
//! that need them; there is no process-global credential state.

pub mod error;
pub mod settings;
pub mod provider;
pub mod connector;

pub use error::ConnectorError;
pub use settings::ConnectionSettings;
pub use provider::{CredentialProvider, StaticCredentials};
pub use connector::{ConnectorCredentials, ConnectorConfig, PlatformToken};
