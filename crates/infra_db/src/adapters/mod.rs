//! Domain Adapters
//!
//! Connects the lead domain's storage port to the PostgreSQL repositories.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresSubmissionStore;
//! use domain_leads::SubmissionStore;
//! use std::sync::Arc;
//!
//! let store: Arc<dyn SubmissionStore> = Arc::new(PostgresSubmissionStore::new(pool));
//! let bookings = store.list_bookings().await?;
//! ```

pub mod submissions;

pub use submissions::PostgresSubmissionStore;
