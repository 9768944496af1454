//! CRM Port
//!
//! The [`CrmPort`] trait covers the five remote operations the sync logic
//! needs. The HubSpot adapter implements it over HTTPS; [`mock::MockCrm`]
//! keeps contacts in memory and can be told to fail specific operations.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};

use core_kernel::{DomainPort, HealthCheckable};

use crate::error::CrmError;
use crate::property_map::PropertySet;

/// A note attached to a contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNote {
    pub contact_id: String,
    pub body: String,
    pub timestamp: DateTime<Utc>,
}

impl NewNote {
    /// Note stamped with the current time
    pub fn now(contact_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            contact_id: contact_id.into(),
            body: body.into(),
            timestamp: Utc::now(),
        }
    }

    /// RFC 3339 timestamp with millisecond precision
    pub fn timestamp_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Remote CRM operations
#[async_trait]
pub trait CrmPort: DomainPort + HealthCheckable {
    /// Exact-match search on the email property, first result only
    async fn find_contact_by_email(&self, email: &str) -> Result<Option<String>, CrmError>;

    /// Creates a contact and returns its id
    async fn create_contact(&self, properties: &PropertySet) -> Result<String, CrmError>;

    /// Merges properties into an existing contact
    async fn update_contact(&self, contact_id: &str, properties: &PropertySet) -> Result<(), CrmError>;

    /// Creates a note associated with a contact
    async fn create_note(&self, note: &NewNote) -> Result<String, CrmError>;

    /// Creates an unassociated company record
    async fn create_company(&self, properties: &PropertySet) -> Result<String, CrmError>;
}

/// In-memory CRM for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// Operation selector for failure injection and call counting
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum CrmOperation {
        FindContact,
        CreateContact,
        UpdateContact,
        CreateNote,
        CreateCompany,
    }

    #[derive(Debug, Clone)]
    struct FailurePlan {
        /// `None` fails forever
        remaining: Option<usize>,
        error: CrmError,
    }

    /// Contacts, notes and companies kept in memory
    #[derive(Debug, Default, Clone)]
    pub struct MockCrm {
        contacts: Arc<RwLock<BTreeMap<String, PropertySet>>>,
        notes: Arc<RwLock<Vec<NewNote>>>,
        companies: Arc<RwLock<Vec<PropertySet>>>,
        failures: Arc<RwLock<HashMap<CrmOperation, FailurePlan>>>,
        calls: Arc<RwLock<HashMap<CrmOperation, usize>>>,
        total_calls: Arc<AtomicUsize>,
        next_id: Arc<AtomicU64>,
    }

    impl MockCrm {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every call to `operation` fail with `error`
        pub async fn fail_always(&self, operation: CrmOperation, error: CrmError) {
            self.failures
                .write()
                .await
                .insert(operation, FailurePlan { remaining: None, error });
        }

        /// Makes the next `times` calls to `operation` fail with `error`
        pub async fn fail_times(&self, operation: CrmOperation, times: usize, error: CrmError) {
            self.failures.write().await.insert(
                operation,
                FailurePlan {
                    remaining: Some(times),
                    error,
                },
            );
        }

        /// Removes all injected failures
        pub async fn heal(&self) {
            self.failures.write().await.clear();
        }

        pub async fn calls(&self, operation: CrmOperation) -> usize {
            self.calls.read().await.get(&operation).copied().unwrap_or(0)
        }

        /// Calls across every operation
        pub fn total_calls(&self) -> usize {
            self.total_calls.load(Ordering::SeqCst)
        }

        pub async fn contacts(&self) -> BTreeMap<String, PropertySet> {
            self.contacts.read().await.clone()
        }

        pub async fn contact(&self, contact_id: &str) -> Option<PropertySet> {
            self.contacts.read().await.get(contact_id).cloned()
        }

        pub async fn notes(&self) -> Vec<NewNote> {
            self.notes.read().await.clone()
        }

        pub async fn companies(&self) -> Vec<PropertySet> {
            self.companies.read().await.clone()
        }

        async fn enter(&self, operation: CrmOperation) -> Result<(), CrmError> {
            self.total_calls.fetch_add(1, Ordering::SeqCst);
            *self.calls.write().await.entry(operation).or_insert(0) += 1;

            let mut failures = self.failures.write().await;
            let Some(plan) = failures.get_mut(&operation) else {
                return Ok(());
            };
            let error = plan.error.clone();
            match plan.remaining {
                None => Err(error),
                Some(0) => {
                    failures.remove(&operation);
                    Ok(())
                }
                Some(n) => {
                    plan.remaining = Some(n - 1);
                    if n == 1 {
                        failures.remove(&operation);
                    }
                    Err(error)
                }
            }
        }

        fn allocate_id(&self) -> String {
            (1001 + self.next_id.fetch_add(1, Ordering::SeqCst)).to_string()
        }
    }

    impl DomainPort for MockCrm {}

    #[async_trait]
    impl HealthCheckable for MockCrm {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::new("mock-crm", AdapterHealth::Healthy, 0, None)
        }
    }

    #[async_trait]
    impl CrmPort for MockCrm {
        async fn find_contact_by_email(&self, email: &str) -> Result<Option<String>, CrmError> {
            self.enter(CrmOperation::FindContact).await?;
            let contacts = self.contacts.read().await;
            Ok(contacts
                .iter()
                .find(|(_, props)| props.get("email").map(String::as_str) == Some(email))
                .map(|(id, _)| id.clone()))
        }

        async fn create_contact(&self, properties: &PropertySet) -> Result<String, CrmError> {
            self.enter(CrmOperation::CreateContact).await?;
            let id = self.allocate_id();
            self.contacts.write().await.insert(id.clone(), properties.clone());
            Ok(id)
        }

        async fn update_contact(&self, contact_id: &str, properties: &PropertySet) -> Result<(), CrmError> {
            self.enter(CrmOperation::UpdateContact).await?;
            let mut contacts = self.contacts.write().await;
            let contact = contacts
                .get_mut(contact_id)
                .ok_or_else(|| CrmError::from_status(404, format!("contact {} not found", contact_id)))?;
            contact.extend(properties.iter().map(|(k, v)| (k.clone(), v.clone())));
            Ok(())
        }

        async fn create_note(&self, note: &NewNote) -> Result<String, CrmError> {
            self.enter(CrmOperation::CreateNote).await?;
            self.notes.write().await.push(note.clone());
            Ok(self.allocate_id())
        }

        async fn create_company(&self, properties: &PropertySet) -> Result<String, CrmError> {
            self.enter(CrmOperation::CreateCompany).await?;
            self.companies.write().await.push(properties.clone());
            Ok(self.allocate_id())
        }
    }
}
