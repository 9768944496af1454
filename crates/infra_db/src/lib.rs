//! Infrastructure Database Layer
//!
//! PostgreSQL persistence for lead submissions, built on SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern:
//!
//! - [`repositories`]: one repository per table, owning the SQL and the row
//!   types
//! - [`adapters`]: [`PostgresSubmissionStore`], which implements the
//!   `domain_leads::SubmissionStore` port on top of the repositories
//!
//! Queries are checked at runtime rather than through `query!` macros, so
//! the crate builds without a live database.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresSubmissionStore};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/leads")).await?;
//! run_migrations(&pool).await?;
//! let store = PostgresSubmissionStore::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use adapters::PostgresSubmissionStore;
