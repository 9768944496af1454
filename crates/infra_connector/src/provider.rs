//! Credential provider trait and the static implementation

use async_trait::async_trait;

use crate::error::ConnectorError;
use crate::settings::ConnectionSettings;

/// Source of connection settings for one integration
///
/// Callers resolve credentials on every outbound call; implementations
/// decide whether that hits the network.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Name of the integration, e.g. `hubspot` or `resend`
    fn connector_name(&self) -> &str;

    /// Returns the current settings
    async fn settings(&self) -> Result<ConnectionSettings, ConnectorError>;

    /// Resolves a bearer access token
    async fn access_token(&self) -> Result<String, ConnectorError> {
        let settings = self.settings().await?;
        settings
            .access_token()
            .map(str::to_string)
            .ok_or_else(|| ConnectorError::not_connected(self.connector_name()))
    }

    /// Resolves an API key together with the configured sender address
    async fn api_key(&self) -> Result<(String, Option<String>), ConnectorError> {
        let settings = self.settings().await?;
        let key = settings
            .api_key()
            .ok_or_else(|| ConnectorError::not_connected(self.connector_name()))?;
        Ok((key.to_string(), settings.from_email().map(str::to_string)))
    }
}

/// Settings supplied directly from configuration
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    connector: String,
    settings: ConnectionSettings,
}

impl StaticCredentials {
    pub fn new(connector: impl Into<String>, settings: ConnectionSettings) -> Self {
        Self {
            connector: connector.into(),
            settings,
        }
    }

    /// Static bearer token, e.g. a HubSpot private-app token
    pub fn access_token(connector: impl Into<String>, token: impl Into<String>) -> Self {
        Self::new(connector, ConnectionSettings::with_access_token(token))
    }

    /// Static API key with an optional sender address
    pub fn api_key(
        connector: impl Into<String>,
        api_key: impl Into<String>,
        from_email: Option<String>,
    ) -> Self {
        Self::new(connector, ConnectionSettings::with_api_key(api_key, from_email))
    }
}

#[async_trait]
impl CredentialProvider for StaticCredentials {
    fn connector_name(&self) -> &str {
        &self.connector
    }

    async fn settings(&self) -> Result<ConnectionSettings, ConnectorError> {
        Ok(self.settings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_token() {
        let provider = StaticCredentials::access_token("hubspot", "pat-123");
        assert_eq!(provider.access_token().await.unwrap(), "pat-123");
        assert!(matches!(
            provider.api_key().await,
            Err(ConnectorError::NotConnected { connector }) if connector == "hubspot"
        ));
    }

    #[tokio::test]
    async fn test_static_api_key() {
        let provider = StaticCredentials::api_key("resend", "re_123", Some("service@palvar.de".into()));
        let (key, from) = provider.api_key().await.unwrap();
        assert_eq!(key, "re_123");
        assert_eq!(from.as_deref(), Some("service@palvar.de"));
    }
}
