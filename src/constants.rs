// src/constants.rs
//! Domain constants that define the operational boundaries of the notifier.
//!
//! Each constant is named for the domain concept it constrains. Reading them
//! in order tells the story of a run: which endpoint is asked, what is asked
//! for by default, how long we are willing to wait, and how much of the
//! answer ends up in the Teams message.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Environment variable holding the GTA API key.
pub const ENV_GTA_API_KEY: &str = "GTA_API_KEY";

/// Environment variable holding the Teams incoming-webhook URL.
pub const ENV_WEBHOOK_URL: &str = "WEBHOOK_URL";

// ---------------------------------------------------------------------------
// GTA API boundaries
// ---------------------------------------------------------------------------

/// Intervention search endpoint of the Global Trade Alert API.
pub const GTA_API_URL: &str = "https://api.globaltradealert.org/api/v1/data/";

/// Authorization scheme the GTA API expects in front of the key.
pub const GTA_AUTH_SCHEME: &str = "APIKey";

/// How many interventions a run asks for when nothing else is configured.
pub const DEFAULT_QUERY_LIMIT: u32 = 1;

/// UN country code used as the default `implementer` filter (United States).
pub const DEFAULT_IMPLEMENTER: u32 = 840;

/// Name of the `request_data` filter that selects implementing jurisdictions.
pub const IMPLEMENTER_FILTER: &str = "implementer";

// ---------------------------------------------------------------------------
// HTTP boundaries
// ---------------------------------------------------------------------------

/// Total time allowed for each of the two HTTP calls.
///
/// Neither the GTA API nor Teams documents a timeout, so every request is
/// bounded explicitly. There are no retries: one slow call fails the run.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Upper bound for establishing a TCP/TLS connection.
pub const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// ---------------------------------------------------------------------------
// Message rendering
// ---------------------------------------------------------------------------

/// Jurisdictions listed by name before the rest is summarized as "and N more".
pub const MAX_LISTED_JURISDICTIONS: usize = 5;

/// Placeholder for any field the intervention record does not carry.
pub const MISSING_FIELD: &str = "N/A";

/// Text sent when the GTA API returned no interventions.
pub const NO_INTERVENTIONS_MESSAGE: &str = "No new interventions found.";

/// Adaptive Card schema version understood by Teams.
pub const ADAPTIVE_CARD_VERSION: &str = "1.5";

/// MIME type Teams uses to recognize an Adaptive Card attachment.
pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
