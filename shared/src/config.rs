//! Runtime configuration supplied by the shell.
//!
//! Every field has a default so a shell may send a partial JSON document.
//! The geocoding credential is held as a [`SecretString`]: it is redacted in
//! `Debug` output and never serialized back across the bridge.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_GEOCODING_ENDPOINT: &str =
    "https://geocodeapi.p.rapidapi.com/GetNearestCities";
pub const DEFAULT_GEOCODING_HOST: &str = "geocodeapi.p.rapidapi.com";
pub const DEFAULT_NOTIFICATION_TITLE: &str = "The List";
pub const DEFAULT_NOTIFICATION_ICON: &str = "/icon-192x192.png";

#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    #[error("malformed configuration: {0}")]
    Malformed(String),

    #[error("invalid geocoding endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocodingConfig {
    pub endpoint: String,
    pub api_host: String,
    #[serde(skip_serializing)]
    pub api_key: SecretString,
    pub range: u32,
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEOCODING_ENDPOINT.to_string(),
            api_host: DEFAULT_GEOCODING_HOST.to_string(),
            api_key: SecretString::new(String::new()),
            range: 0,
        }
    }
}

impl GeocodingConfig {
    #[must_use]
    pub fn has_credential(&self) -> bool {
        !self.api_key.expose_secret().trim().is_empty()
    }

    /// Parses the endpoint, accepting only absolute http(s) URLs with a host.
    pub fn endpoint_url(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            url: self.endpoint.clone(),
            reason,
        };

        let url = Url::parse(&self.endpoint).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(invalid("credentials in URL are not allowed".to_string()));
        }
        Ok(url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub title: String,
    pub icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_NOTIFICATION_TITLE.to_string(),
            icon: DEFAULT_NOTIFICATION_ICON.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub geocoding: GeocodingConfig,
    pub notifications: NotificationConfig,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.geocoding.endpoint_url()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.geocoding.api_key = SecretString::new(key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_nearest_cities_lookup() {
        let config = AppConfig::default();
        assert_eq!(config.geocoding.endpoint, DEFAULT_GEOCODING_ENDPOINT);
        assert_eq!(config.geocoding.api_host, DEFAULT_GEOCODING_HOST);
        assert_eq!(config.geocoding.range, 0);
        assert!(!config.geocoding.has_credential());
        assert_eq!(config.notifications.title, "The List");
        assert_eq!(config.notifications.icon, "/icon-192x192.png");
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config =
            AppConfig::from_json(r#"{"geocoding":{"api_key":"k-123"}}"#).unwrap();
        assert!(config.geocoding.has_credential());
        assert_eq!(config.geocoding.endpoint, DEFAULT_GEOCODING_ENDPOINT);
        assert_eq!(config.notifications, NotificationConfig::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(matches!(
            AppConfig::from_json("{not json"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn endpoint_must_be_http() {
        let result = AppConfig::from_json(r#"{"geocoding":{"endpoint":"ftp://example.com/x"}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));

        let result = AppConfig::from_json(r#"{"geocoding":{"endpoint":"not a url"}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidEndpoint { .. })));
    }

    #[test]
    fn api_key_is_redacted_and_not_serialized() {
        let config = AppConfig::default().with_api_key("super-secret");
        assert!(!format!("{config:?}").contains("super-secret"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super-secret"));
        assert!(!json.contains("api_key"));
    }
}
