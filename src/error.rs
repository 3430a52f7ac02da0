// src/error.rs
//! Application error types with structured error handling.
//!
//! A run has three stages that can fail, and each one owns an error type:
//! configuration (before any network call), the GTA request, and the Teams
//! webhook. `AppError` ties them together so the entry point can report
//! exactly which stage stopped the run.

use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use thiserror::Error;

/// Missing or invalid settings. Always raised before any HTTP call.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("missing {0}")]
    Missing(&'static str),

    #[error("invalid webhook URL {url}: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },

    #[error("invalid GTA endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),

    #[error("could not read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}

/// The GTA request failed or returned something we cannot use.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("GTA API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GTA API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unparsable response: {reason}")]
    Unparsable { reason: String, body: String },

    #[error("could not build GTA client: {0}")]
    ClientSetup(String),
}

impl ApiError {
    /// HTTP status reported by the GTA API, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the request was abandoned because the timeout elapsed.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_timeout())
    }
}

/// Teams rejected the payload, or the webhook could not be reached.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Teams webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Teams webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not build Teams client: {0}")]
    ClientSetup(String),
}

impl NotificationError {
    /// HTTP status reported by the webhook, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            Self::ClientSetup(_) => None,
        }
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("GTA API error: {0}")]
    Api(#[from] ApiError),

    #[error("Teams notification error: {0}")]
    Notification(#[from] NotificationError),

    #[error("Could not encode payload: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl AppError {
    /// Short name of the stage that failed, used in the final log line.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration",
            Self::Api(_) => "gta",
            Self::Notification(_) => "teams",
            Self::Encoding(_) => "formatting",
        }
    }
}

/// Shortens a response body for inclusion in an error message.
pub fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(ERROR_BODY_PREVIEW_LENGTH) {
        Some((cut, _)) => format!("{}...", &trimmed[..cut]),
        None => trimmed.to_string(),
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_keeps_short_bodies() {
        assert_eq!(preview_body("  oops \n"), "oops");
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        let body = "é".repeat(ERROR_BODY_PREVIEW_LENGTH + 10);
        let preview = preview_body(&body);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), ERROR_BODY_PREVIEW_LENGTH + 3);
    }

    #[test]
    fn test_stage_names() {
        let err: AppError = ConfigurationError::Missing("WEBHOOK_URL").into();
        assert_eq!(err.stage(), "configuration");
        assert_eq!(err.to_string(), "Configuration error: missing WEBHOOK_URL");

        let err: AppError = ApiError::Status {
            status: 500,
            body: "boom".to_string(),
        }
        .into();
        assert_eq!(err.stage(), "gta");
    }

    #[test]
    fn test_status_accessors() {
        let api = ApiError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(api.status(), Some(503));
        assert!(!api.is_timeout());

        let teams = NotificationError::Status {
            status: 400,
            body: String::new(),
        };
        assert_eq!(teams.status(), Some(400));
    }
}
