//! Resend Email Adapter
//!
//! Implements [`EmailPort`] against the Resend REST API (`POST /emails`).
//! The API key and, when configured there, the sender address are resolved
//! from the injected [`CredentialProvider`] on every send.
//!
//! Sender precedence: [`ResendConfig::from_email`], then the provider's
//! `from_email`, then [`FALLBACK_SENDER`].

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};
use infra_connector::CredentialProvider;

use crate::error::EmailError;
use crate::message::{Attachment, EmailReceipt, OutboundEmail};
use crate::ports::EmailPort;

/// Production API host
pub const RESEND_API_URL: &str = "https://api.resend.com";

/// Sender used when no address is configured anywhere
pub const FALLBACK_SENDER: &str = "onboarding@resend.dev";

/// Configuration for the Resend adapter
#[derive(Debug, Clone)]
pub struct ResendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Overrides the sender address reported by the credential provider
    pub from_email: Option<String>,
}

impl Default for ResendConfig {
    fn default() -> Self {
        Self {
            base_url: RESEND_API_URL.to_string(),
            timeout_secs: 30,
            from_email: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: String,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "no_attachments")]
    attachments: &'a [Attachment],
}

fn no_attachments(attachments: &&[Attachment]) -> bool {
    attachments.is_empty()
}

/// Resend adapter implementing the EmailPort trait
pub struct ResendMailer {
    client: reqwest::Client,
    config: ResendConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl ResendMailer {
    pub fn new(config: ResendConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self, EmailError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    /// Picks the sender address by precedence
    fn sender_address(&self, provider_from: Option<String>) -> String {
        self.config
            .from_email
            .clone()
            .or(provider_from)
            .filter(|address| !address.trim().is_empty())
            .unwrap_or_else(|| FALLBACK_SENDER.to_string())
    }
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DomainPort for ResendMailer {}

#[async_trait]
impl HealthCheckable for ResendMailer {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let result = self.credentials.api_key().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::new("resend", AdapterHealth::Healthy, latency_ms, None),
            Err(err) => HealthCheckResult::new(
                "resend",
                AdapterHealth::Degraded,
                latency_ms,
                Some(err.to_string()),
            ),
        }
    }
}

#[async_trait]
impl EmailPort for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<EmailReceipt, EmailError> {
        if email.to.is_empty() {
            return Err(EmailError::Invalid("no recipient".to_string()));
        }

        let (api_key, provider_from) = self.credentials.api_key().await?;
        let from = email.from_header(&self.sender_address(provider_from));
        let body = SendRequest {
            from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            reply_to: email.reply_to.as_deref(),
            attachments: &email.attachments,
        };

        let url = format!("{}/emails", self.config.base_url.trim_end_matches('/'));
        debug!(subject = %email.subject, attachments = email.attachments.len(), "Resend request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json::<EmailReceipt>().await?)
    }
}
