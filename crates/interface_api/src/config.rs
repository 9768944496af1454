//! API configuration
//!
//! Values come from an optional `config/leads` file and `API_*` environment
//! variables. Afterwards the conventional variables set by the hosting
//! platform (`PORT`, `DATABASE_URL`, `HUBSPOT_ACCESS_TOKEN`, ...) fill in
//! whatever the `API_*` variables left unset.

use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use domain_crm::{RetryPolicy, HubSpotConfig};
use domain_crm::adapters::HUBSPOT_API_URL;
use infra_connector::{
    ConnectorConfig, ConnectorCredentials, ConnectorError, CredentialProvider, PlatformToken,
    StaticCredentials,
};
use infra_email::{ResendConfig, RESEND_API_URL};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL connection string
    pub database_url: String,
    /// JWT secret for admin tokens
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    pub log_format: LogFormat,
    /// Built frontend bundle, served only when the directory exists
    pub static_dir: String,
    /// Recipient of admin notifications
    pub admin_email: String,

    /// Mirror submissions into HubSpot
    pub crm_enabled: bool,
    pub hubspot_base_url: String,
    pub hubspot_access_token: Option<String>,
    pub crm_max_attempts: u32,
    pub crm_retry_base_ms: u64,

    /// Send confirmation and admin emails through Resend
    pub notifications_enabled: bool,
    pub resend_base_url: String,
    pub resend_api_key: Option<String>,
    pub resend_from_email: Option<String>,

    /// Connector service hostname
    pub connectors_hostname: Option<String>,
    pub repl_identity: Option<String>,
    pub web_repl_renewal: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            database_url: String::new(),
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            static_dir: "dist/public".to_string(),
            admin_email: infra_email::notifier::DEFAULT_ADMIN_EMAIL.to_string(),
            crm_enabled: true,
            hubspot_base_url: HUBSPOT_API_URL.to_string(),
            hubspot_access_token: None,
            crm_max_attempts: 3,
            crm_retry_base_ms: 1000,
            notifications_enabled: false,
            resend_base_url: RESEND_API_URL.to_string(),
            resend_api_key: None,
            resend_from_email: None,
            connectors_hostname: None,
            repl_identity: None,
            web_repl_renewal: None,
        }
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl ApiConfig {
    /// Loads configuration from `config/leads` and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let mut config: Self = config::Config::builder()
            .add_source(config::File::with_name("config/leads").required(false))
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.apply_platform_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Fills unset values from the platform's conventional variables
    ///
    /// An `API_*` variable always wins over its conventional counterpart.
    pub fn apply_platform_env<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let conventional = |own: &str, name: &str| {
            if present(var(own)).is_some() {
                None
            } else {
                present(var(name))
            }
        };

        if let Some(host) = conventional("API_HOST", "HOST") {
            self.host = host;
        }
        if let Some(port) = conventional("API_PORT", "PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(url) = conventional("API_DATABASE_URL", "DATABASE_URL") {
            self.database_url = url;
        }
        if let Some(admin) = conventional("API_ADMIN_EMAIL", "ADMIN_EMAIL") {
            self.admin_email = admin;
        }

        let fill = |slot: &mut Option<String>, name: &str| {
            if present(slot.clone()).is_none() {
                *slot = present(var(name));
            }
        };
        fill(&mut self.hubspot_access_token, "HUBSPOT_ACCESS_TOKEN");
        fill(&mut self.resend_api_key, "RESEND_API_KEY");
        fill(&mut self.connectors_hostname, "REPLIT_CONNECTORS_HOSTNAME");
        fill(&mut self.repl_identity, "REPL_IDENTITY");
        fill(&mut self.web_repl_renewal, "WEB_REPL_RENEWAL");
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn database_url_set(&self) -> bool {
        !self.database_url.trim().is_empty()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.crm_max_attempts, Duration::from_millis(self.crm_retry_base_ms))
    }

    pub fn hubspot_config(&self) -> HubSpotConfig {
        HubSpotConfig {
            base_url: self.hubspot_base_url.clone(),
            ..Default::default()
        }
    }

    pub fn resend_config(&self) -> ResendConfig {
        ResendConfig {
            base_url: self.resend_base_url.clone(),
            from_email: present(self.resend_from_email.clone()),
            ..Default::default()
        }
    }

    fn platform_token(&self) -> Option<PlatformToken> {
        PlatformToken::resolve(self.repl_identity.clone(), self.web_repl_renewal.clone())
    }

    /// A configured secret wins; otherwise the connector service is asked
    fn credentials(
        &self,
        connector: &str,
        configured: Option<StaticCredentials>,
    ) -> Result<Option<Arc<dyn CredentialProvider>>, ConnectorError> {
        if let Some(credentials) = configured {
            return Ok(Some(Arc::new(credentials)));
        }

        match present(self.connectors_hostname.clone()) {
            Some(hostname) => {
                let config = ConnectorConfig::for_hostname(&hostname, self.platform_token());
                Ok(Some(Arc::new(ConnectorCredentials::new(config, connector)?)))
            }
            None => Ok(None),
        }
    }

    /// HubSpot token source, `None` when neither a token nor a connector is set
    pub fn hubspot_credentials(&self) -> Result<Option<Arc<dyn CredentialProvider>>, ConnectorError> {
        let configured = present(self.hubspot_access_token.clone())
            .map(|token| StaticCredentials::access_token("hubspot", token));
        self.credentials("hubspot", configured)
    }

    /// Resend API key source, `None` when neither a key nor a connector is set
    pub fn resend_credentials(&self) -> Result<Option<Arc<dyn CredentialProvider>>, ConnectorError> {
        let configured = present(self.resend_api_key.clone())
            .map(|key| StaticCredentials::api_key("resend", key, present(self.resend_from_email.clone())));
        self.credentials("resend", configured)
    }
}
