//! Lead Domain Ports
//!
//! The [`SubmissionStore`] trait is the only storage seam of the lead intake
//! service. Two adapters implement it:
//!
//! - **PostgreSQL Adapter**: `infra_db::PostgresSubmissionStore`
//! - **In-memory Adapter**: [`mock::InMemorySubmissionStore`], for tests
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_leads::{SubmissionStore, NewBookingRequest};
//! use std::sync::Arc;
//!
//! async fn save(store: Arc<dyn SubmissionStore>, booking: NewBookingRequest) {
//!     let record = store.create_booking(booking).await?;
//!     tracing::info!(id = %record.id, "booking stored");
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable, PortError};

use crate::submission::{
    BookingRequest, CalculatorSubmission, CareerApplication, NewBookingRequest,
    NewCalculatorSubmission, NewCareerApplication, NewPartnerRegistration, PartnerRegistration,
};

/// Append-only store for form submissions
///
/// Listings return the newest record first.
#[async_trait]
pub trait SubmissionStore: DomainPort + HealthCheckable {
    // ========================================================================
    // Booking requests
    // ========================================================================

    /// Persists a booking request, assigning id and creation time
    async fn create_booking(&self, booking: NewBookingRequest) -> Result<BookingRequest, PortError>;

    /// Lists all booking requests
    async fn list_bookings(&self) -> Result<Vec<BookingRequest>, PortError>;

    // ========================================================================
    // Calculator submissions
    // ========================================================================

    async fn create_calculator_submission(
        &self,
        submission: NewCalculatorSubmission,
    ) -> Result<CalculatorSubmission, PortError>;

    async fn list_calculator_submissions(&self) -> Result<Vec<CalculatorSubmission>, PortError>;

    // ========================================================================
    // Partner registrations
    // ========================================================================

    /// Persists a partner registration with status `pending`
    async fn create_partner_registration(
        &self,
        registration: NewPartnerRegistration,
    ) -> Result<PartnerRegistration, PortError>;

    async fn list_partner_registrations(&self) -> Result<Vec<PartnerRegistration>, PortError>;

    // ========================================================================
    // Career applications
    // ========================================================================

    /// Persists a career application with status `new`
    async fn create_career_application(
        &self,
        application: NewCareerApplication,
    ) -> Result<CareerApplication, PortError>;

    async fn list_career_applications(&self) -> Result<Vec<CareerApplication>, PortError>;
}

/// In-memory adapter for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;
    use chrono::Utc;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// Vec-backed submission store
    ///
    /// Call [`InMemorySubmissionStore::fail_writes`] to make every create
    /// return a connection error, simulating a database outage.
    #[derive(Debug, Default, Clone)]
    pub struct InMemorySubmissionStore {
        bookings: Arc<RwLock<Vec<BookingRequest>>>,
        calculator_submissions: Arc<RwLock<Vec<CalculatorSubmission>>>,
        partner_registrations: Arc<RwLock<Vec<PartnerRegistration>>>,
        career_applications: Arc<RwLock<Vec<CareerApplication>>>,
        failing: Arc<AtomicBool>,
    }

    impl InMemorySubmissionStore {
        pub fn new() -> Self {
            Self::default()
        }

        /// Toggles simulated write failures
        pub fn fail_writes(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        fn check_writable(&self) -> Result<(), PortError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(PortError::connection("simulated database outage"));
            }
            Ok(())
        }

        /// Total number of stored records across all forms
        pub async fn total_records(&self) -> usize {
            self.bookings.read().await.len()
                + self.calculator_submissions.read().await.len()
                + self.partner_registrations.read().await.len()
                + self.career_applications.read().await.len()
        }
    }

    fn newest_first<T: Clone>(items: &[T]) -> Vec<T> {
        items.iter().rev().cloned().collect()
    }

    impl DomainPort for InMemorySubmissionStore {}

    #[async_trait]
    impl HealthCheckable for InMemorySubmissionStore {
        async fn health_check(&self) -> HealthCheckResult {
            if self.failing.load(Ordering::SeqCst) {
                HealthCheckResult::new(
                    "in-memory-store",
                    AdapterHealth::Unhealthy,
                    0,
                    Some("simulated database outage".to_string()),
                )
            } else {
                HealthCheckResult::new("in-memory-store", AdapterHealth::Healthy, 0, None)
            }
        }
    }

    #[async_trait]
    impl SubmissionStore for InMemorySubmissionStore {
        async fn create_booking(&self, booking: NewBookingRequest) -> Result<BookingRequest, PortError> {
            self.check_writable()?;
            let record = booking.into_record(Utc::now());
            self.bookings.write().await.push(record.clone());
            Ok(record)
        }

        async fn list_bookings(&self) -> Result<Vec<BookingRequest>, PortError> {
            Ok(newest_first(&self.bookings.read().await))
        }

        async fn create_calculator_submission(
            &self,
            submission: NewCalculatorSubmission,
        ) -> Result<CalculatorSubmission, PortError> {
            self.check_writable()?;
            let record = submission.into_record(Utc::now());
            self.calculator_submissions.write().await.push(record.clone());
            Ok(record)
        }

        async fn list_calculator_submissions(&self) -> Result<Vec<CalculatorSubmission>, PortError> {
            Ok(newest_first(&self.calculator_submissions.read().await))
        }

        async fn create_partner_registration(
            &self,
            registration: NewPartnerRegistration,
        ) -> Result<PartnerRegistration, PortError> {
            self.check_writable()?;
            let record = registration.into_record(Utc::now());
            self.partner_registrations.write().await.push(record.clone());
            Ok(record)
        }

        async fn list_partner_registrations(&self) -> Result<Vec<PartnerRegistration>, PortError> {
            Ok(newest_first(&self.partner_registrations.read().await))
        }

        async fn create_career_application(
            &self,
            application: NewCareerApplication,
        ) -> Result<CareerApplication, PortError> {
            self.check_writable()?;
            let record = application.into_record(Utc::now());
            self.career_applications.write().await.push(record.clone());
            Ok(record)
        }

        async fn list_career_applications(&self) -> Result<Vec<CareerApplication>, PortError> {
            Ok(newest_first(&self.career_applications.read().await))
        }
    }
}
