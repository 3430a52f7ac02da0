// src/lib.rs
//! gta-teams-notify library — posts Global Trade Alert interventions to Microsoft Teams.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling** — `AppError`, `ConfigurationError`, `ApiError`, `NotificationError`
//! - **Configuration** — `CommandLineInput`, `Credentials`, `RunConfig`
//! - **Domain types** — `ApiKey`, `WebhookUrl`, `InterventionQuery`, `InterventionRecord`
//! - **API client** — `GtaHttpClient`, `parse_interventions_response`
//! - **Formatting** — `format_message`, `NotificationPayload`
//! - **Notification** — `TeamsWebhookClient`
//! - **Pipeline** — `InterventionSource`, `NotificationSink`, `run_pipeline`, `execute`

mod api;
mod config;
mod constants;
mod error;
mod formatting;
mod http;
mod model;
mod notify;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, ApiError, ConfigurationError, NotificationError};

// --- Configuration ---
pub use crate::config::{
    env_lookup, load_credentials, load_env_file, CommandLineInput, Credentials, DeliveryOptions,
    RunConfig,
};

// --- Constants ---
pub use crate::constants::{DEFAULT_HTTP_TIMEOUT, GTA_API_URL, NO_INTERVENTIONS_MESSAGE};

// --- Domain Types ---
pub use crate::model::{Evaluation, InterventionRecord};
pub use crate::types::{ApiKey, InterventionQuery, WebhookUrl};

// --- API Client ---
pub use crate::api::{parse_interventions_response, GtaHttpClient};
pub use crate::http::ApiResponse;

// --- Formatting ---
pub use crate::formatting::{
    format_message, render_card, render_text, CardAttachment, CardMessage, MessageStyle,
    NotificationPayload, RecordSelection, RenderOptions, TextMessage,
};

// --- Notification ---
pub use crate::notify::TeamsWebhookClient;

// --- Pipeline ---
pub use crate::pipeline::{execute, run_pipeline, InterventionSource, NotificationSink, RunOutcome};
