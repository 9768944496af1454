//! Connection settings as returned by the connector service

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Secrets and metadata for one connected integration
///
/// Only the fields used by the CRM and email adapters are modelled; unknown
/// keys in the connector payload are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSettings {
    #[serde(default)]
    pub access_token: Option<String>,
    /// RFC 3339 string or epoch milliseconds
    #[serde(default)]
    pub expires_at: Option<serde_json::Value>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub from_email: Option<String>,
    #[serde(default)]
    pub oauth: Option<OAuthSettings>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuthSettings {
    #[serde(default)]
    pub credentials: Option<OAuthCredentials>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OAuthCredentials {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl ConnectionSettings {
    /// Settings holding only an access token
    pub fn with_access_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..Default::default()
        }
    }

    /// Settings holding an API key and optional sender address
    pub fn with_api_key(api_key: impl Into<String>, from_email: Option<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            from_email,
            ..Default::default()
        }
    }

    /// Access token, falling back to the OAuth credentials block
    pub fn access_token(&self) -> Option<&str> {
        non_empty(self.access_token.as_deref()).or_else(|| {
            self.oauth
                .as_ref()
                .and_then(|o| o.credentials.as_ref())
                .and_then(|c| non_empty(c.access_token.as_deref()))
        })
    }

    pub fn api_key(&self) -> Option<&str> {
        non_empty(self.api_key.as_deref())
    }

    pub fn from_email(&self) -> Option<&str> {
        non_empty(self.from_email.as_deref())
    }

    /// Parsed expiry, if present and well-formed
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match self.expires_at.as_ref()? {
            serde_json::Value::String(s) => DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            serde_json::Value::Number(n) => n
                .as_i64()
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
            _ => None,
        }
    }

    /// True while the settings carry an expiry that lies after `now`
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expiry| expiry > now)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_access_token_falls_back_to_oauth() {
        let settings: ConnectionSettings = serde_json::from_value(serde_json::json!({
            "oauth": { "credentials": { "access_token": "oauth-token" } }
        }))
        .unwrap();
        assert_eq!(settings.access_token(), Some("oauth-token"));

        let direct = ConnectionSettings::with_access_token("direct");
        assert_eq!(direct.access_token(), Some("direct"));
    }

    #[test]
    fn test_expiry_parsing() {
        let now = Utc::now();
        let future = (now + Duration::hours(1)).to_rfc3339();
        let settings = ConnectionSettings {
            expires_at: Some(serde_json::Value::String(future)),
            ..Default::default()
        };
        assert!(settings.is_fresh_at(now));

        let past_ms = (now - Duration::minutes(5)).timestamp_millis();
        let expired = ConnectionSettings {
            expires_at: Some(serde_json::json!(past_ms)),
            ..Default::default()
        };
        assert!(!expired.is_fresh_at(now));

        assert!(!ConnectionSettings::default().is_fresh_at(now));
    }

    #[test]
    fn test_empty_secrets_are_absent() {
        let settings = ConnectionSettings::with_api_key("", Some(String::new()));
        assert_eq!(settings.api_key(), None);
        assert_eq!(settings.from_email(), None);
    }
}
