//! Email Port
//!
//! [`EmailPort`] is the single seam to the email provider. The Resend
//! adapter implements it over HTTPS; [`mock::MockMailer`] records messages
//! in memory.

use async_trait::async_trait;

use core_kernel::{DomainPort, HealthCheckable};

use crate::error::EmailError;
use crate::message::{EmailReceipt, OutboundEmail};

/// Sends transactional email
#[async_trait]
pub trait EmailPort: DomainPort + HealthCheckable {
    /// Hands one message to the provider
    async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailError>;
}

/// In-memory mailer for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tokio::sync::RwLock;

    use core_kernel::{AdapterHealth, HealthCheckResult};

    /// Records every accepted message
    ///
    /// Messages whose recipient appears in the reject list fail with
    /// [`EmailError::Rejected`], so tests can fail one email of a flow.
    #[derive(Debug, Default, Clone)]
    pub struct MockMailer {
        sent: Arc<RwLock<Vec<OutboundEmail>>>,
        rejected_recipients: Arc<RwLock<Vec<String>>>,
        failing: Arc<AtomicBool>,
    }

    impl MockMailer {
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes every send fail with a transport error
        pub fn fail_all(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// Rejects messages addressed to `recipient`
        pub async fn reject(&self, recipient: impl Into<String>) {
            self.rejected_recipients.write().await.push(recipient.into());
        }

        /// Accepted messages in send order
        pub async fn sent(&self) -> Vec<OutboundEmail> {
            self.sent.read().await.clone()
        }

        /// Accepted messages addressed to `recipient`
        pub async fn sent_to(&self, recipient: &str) -> Vec<OutboundEmail> {
            self.sent
                .read()
                .await
                .iter()
                .filter(|e| e.to.iter().any(|to| to == recipient))
                .cloned()
                .collect()
        }
    }

    impl DomainPort for MockMailer {}

    #[async_trait]
    impl HealthCheckable for MockMailer {
        async fn health_check(&self) -> HealthCheckResult {
            let status = if self.failing.load(Ordering::SeqCst) {
                AdapterHealth::Unhealthy
            } else {
                AdapterHealth::Healthy
            };
            HealthCheckResult::new("mock-mailer", status, 0, None)
        }
    }

    #[async_trait]
    impl EmailPort for MockMailer {
        async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(EmailError::Transport("simulated outage".to_string()));
            }
            if email.to.is_empty() {
                return Err(EmailError::Invalid("no recipient".to_string()));
            }

            let rejected = self.rejected_recipients.read().await;
            if let Some(recipient) = email.to.iter().find(|to| rejected.contains(to)) {
                return Err(EmailError::Rejected {
                    status: 422,
                    message: format!("recipient {} rejected", recipient),
                });
            }
            drop(rejected);

            let mut sent = self.sent.write().await;
            sent.push(email.clone());
            Ok(EmailReceipt {
                id: format!("mock-{}", sent.len()),
            })
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_records_and_rejects() {
            let mailer = MockMailer::new();
            mailer.reject("blocked@example.com").await;

            let ok = OutboundEmail::new("PALVAR", "anna@example.com", "Hallo", "<p/>");
            assert_eq!(mailer.send(&ok).await.unwrap().id, "mock-1");

            let blocked = OutboundEmail::new("PALVAR", "blocked@example.com", "Hallo", "<p/>");
            assert!(matches!(
                mailer.send(&blocked).await,
                Err(EmailError::Rejected { status: 422, .. })
            ));

            assert_eq!(mailer.sent().await.len(), 1);
            assert_eq!(mailer.sent_to("anna@example.com").await.len(), 1);
        }

        #[tokio::test]
        async fn test_outage() {
            let mailer = MockMailer::new();
            mailer.fail_all(true);

            let email = OutboundEmail::new("PALVAR", "anna@example.com", "Hallo", "<p/>");
            assert!(matches!(mailer.send(&email).await, Err(EmailError::Transport(_))));
            assert!(!mailer.health_check().await.is_healthy());
        }
    }
}
