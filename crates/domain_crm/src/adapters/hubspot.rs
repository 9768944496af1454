//! HubSpot CRM Adapter
//!
//! Implements [`CrmPort`] against the HubSpot CRM v3 object API. A bearer
//! token is resolved from the injected [`CredentialProvider`] on every call,
//! so connector-issued tokens are picked up as soon as they rotate.
//!
//! # Error Handling
//!
//! Non-success responses are mapped through [`CrmError::from_status`]:
//! - 400 -> `BadRequest` (not retried)
//! - 401/403 -> `Unauthorized`
//! - 404 -> `NotFound`
//! - 409 -> `Conflict` (not retried)
//! - 429 -> `RateLimited`
//! - 5xx -> `Server`
//! - Network failures and timeouts -> `Transport`

use async_trait::async_trait;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use core_kernel::{AdapterHealth, DomainPort, HealthCheckResult, HealthCheckable};
use infra_connector::CredentialProvider;

use crate::error::CrmError;
use crate::ports::{CrmPort, NewNote};
use crate::property_map::PropertySet;

/// Production API host
pub const HUBSPOT_API_URL: &str = "https://api.hubapi.com";

/// Association type id linking a note to a contact
const NOTE_TO_CONTACT_ASSOCIATION: u32 = 202;

/// Configuration for the HubSpot adapter
#[derive(Debug, Clone)]
pub struct HubSpotConfig {
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for HubSpotConfig {
    fn default() -> Self {
        Self {
            base_url: HUBSPOT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ObjectResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ObjectResponse>,
}

/// HubSpot adapter implementing the CrmPort trait
pub struct HubSpotAdapter {
    client: reqwest::Client,
    config: HubSpotConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl HubSpotAdapter {
    /// Creates an adapter with its own connection pool
    pub fn new(config: HubSpotConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self, CrmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            config,
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    async fn send(&self, method: Method, path: &str, body: &Value) -> Result<reqwest::Response, CrmError> {
        let token = self.credentials.access_token().await?;
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        debug!(method = %method, path, "HubSpot request");
        let response = self
            .client
            .request(method, &url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(CrmError::from_status(status.as_u16(), message))
    }

    async fn send_json<T: DeserializeOwned>(&self, method: Method, path: &str, body: &Value) -> Result<T, CrmError> {
        let response = self.send(method, path, body).await?;
        Ok(response.json::<T>().await?)
    }
}

impl std::fmt::Debug for HubSpotAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HubSpotAdapter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DomainPort for HubSpotAdapter {}

#[async_trait]
impl HealthCheckable for HubSpotAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let started = Instant::now();
        let result = self.credentials.access_token().await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match result {
            Ok(_) => HealthCheckResult::new("hubspot", AdapterHealth::Healthy, latency_ms, None),
            Err(err) => HealthCheckResult::new(
                "hubspot",
                AdapterHealth::Degraded,
                latency_ms,
                Some(err.to_string()),
            ),
        }
    }
}

#[async_trait]
impl CrmPort for HubSpotAdapter {
    async fn find_contact_by_email(&self, email: &str) -> Result<Option<String>, CrmError> {
        let body = json!({
            "filterGroups": [{
                "filters": [{
                    "propertyName": "email",
                    "operator": "EQ",
                    "value": email,
                }]
            }],
            "properties": ["email"],
            "limit": 1,
        });

        let response: SearchResponse = self
            .send_json(Method::POST, "/crm/v3/objects/contacts/search", &body)
            .await?;
        Ok(response.results.into_iter().next().map(|r| r.id))
    }

    async fn create_contact(&self, properties: &PropertySet) -> Result<String, CrmError> {
        let body = json!({ "properties": properties, "associations": [] });
        let created: ObjectResponse = self
            .send_json(Method::POST, "/crm/v3/objects/contacts", &body)
            .await?;
        Ok(created.id)
    }

    async fn update_contact(&self, contact_id: &str, properties: &PropertySet) -> Result<(), CrmError> {
        let body = json!({ "properties": properties });
        let path = format!("/crm/v3/objects/contacts/{}", contact_id);
        self.send(Method::PATCH, &path, &body).await?;
        Ok(())
    }

    async fn create_note(&self, note: &NewNote) -> Result<String, CrmError> {
        let body = json!({
            "properties": {
                "hs_note_body": note.body,
                "hs_timestamp": note.timestamp_rfc3339(),
            },
            "associations": [{
                "to": { "id": note.contact_id },
                "types": [{
                    "associationCategory": "HUBSPOT_DEFINED",
                    "associationTypeId": NOTE_TO_CONTACT_ASSOCIATION,
                }]
            }]
        });

        let created: ObjectResponse = self
            .send_json(Method::POST, "/crm/v3/objects/notes", &body)
            .await?;
        Ok(created.id)
    }

    async fn create_company(&self, properties: &PropertySet) -> Result<String, CrmError> {
        let body = json!({ "properties": properties, "associations": [] });
        let created: ObjectResponse = self
            .send_json(Method::POST, "/crm/v3/objects/companies", &body)
            .await?;
        Ok(created.id)
    }
}
