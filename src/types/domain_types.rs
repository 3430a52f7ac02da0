// src/types/domain_types.rs
//! Validated secrets and endpoints.

use crate::error::ConfigurationError;
use std::fmt;
use url::Url;

/// API key for GTA API authentication.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Create a new API key; blank keys are rejected as missing.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigurationError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ConfigurationError::Missing(
                crate::constants::ENV_GTA_API_KEY,
            ));
        }
        Ok(Self(key))
    }

    /// Get the API key as a string reference
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact API key in display
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&format_args!("{}", self)).finish()
    }
}

/// Teams incoming-webhook URL, validated as http(s).
#[derive(Clone, PartialEq, Eq)]
pub struct WebhookUrl(Url);

impl WebhookUrl {
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigurationError::Missing(
                crate::constants::ENV_WEBHOOK_URL,
            ));
        }

        let url = Url::parse(raw).map_err(|e| ConfigurationError::InvalidWebhookUrl {
            url: redact_url(raw),
            reason: e.to_string(),
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ConfigurationError::InvalidWebhookUrl {
                url: redact_url(raw),
                reason: "Only HTTP and HTTPS URLs are supported".to_string(),
            });
        }

        Ok(Self(url))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn as_url(&self) -> &Url {
        &self.0
    }
}

// Webhook URLs embed their own secret in the path, so only the host is shown.
impl fmt::Display for WebhookUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", redact_url(self.0.as_str()))
    }
}

impl fmt::Debug for WebhookUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WebhookUrl")
            .field(&format_args!("{}", self))
            .finish()
    }
}

/// Parses the GTA intervention-search endpoint.
pub fn parse_endpoint(raw: &str) -> Result<Url, ConfigurationError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigurationError::InvalidEndpoint {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigurationError::InvalidEndpoint {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}

fn redact_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => match url.host_str() {
            Some(host) => format!("{}://{}/...", url.scheme(), host),
            None => "<redacted>".to_string(),
        },
        Err(_) => "<redacted>".to_string(),
    }
}
