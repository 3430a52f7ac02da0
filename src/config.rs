// src/config.rs
use crate::constants::{
    DEFAULT_HTTP_TIMEOUT, DEFAULT_IMPLEMENTER, DEFAULT_QUERY_LIMIT, ENV_GTA_API_KEY,
    ENV_WEBHOOK_URL, GTA_API_URL, IMPLEMENTER_FILTER,
};
use crate::error::ConfigurationError;
use crate::formatting::{MessageStyle, RecordSelection, RenderOptions};
use crate::types::{parse_endpoint, parse_filter, ApiKey, InterventionQuery, WebhookUrl};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Parsed command-line input. Every flag is optional; a bare invocation
/// posts the latest US intervention as an Adaptive Card.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Number of interventions to request from GTA
    #[arg(long, default_value_t = DEFAULT_QUERY_LIMIT)]
    pub limit: u32,

    /// Offset into the GTA result set
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Implementing jurisdiction UN code (repeatable; defaults to 840, the US)
    #[arg(long = "implementer")]
    pub implementers: Vec<u32>,

    /// Search every implementing jurisdiction instead of the US default
    #[arg(long, default_value_t = false, conflicts_with = "implementers")]
    pub all_implementers: bool,

    /// Extra request_data filter as name=value; value may be JSON (repeatable)
    #[arg(long = "filter", value_name = "NAME=VALUE")]
    pub filters: Vec<String>,

    /// Include every returned intervention instead of only the first
    #[arg(long, default_value_t = false)]
    pub all: bool,

    /// Message format posted to Teams
    #[arg(long, value_enum, default_value_t = MessageStyle::Card)]
    pub format: MessageStyle,

    /// Send a "no new interventions" message when GTA returns nothing
    #[arg(long, default_value_t = false)]
    pub send_empty: bool,

    /// Print the JSON payload to stdout
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// Print the payload and skip posting to Teams
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,

    /// Timeout in seconds applied to each HTTP request
    #[arg(long, default_value_t = DEFAULT_HTTP_TIMEOUT.as_secs())]
    pub timeout: u64,

    /// GTA intervention-search endpoint
    #[arg(long, default_value = GTA_API_URL)]
    pub gta_url: String,

    /// Env file to read secrets from (defaults to ./.env when present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Also write logs to this file (console only when omitted)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// The two secrets a run needs. Loaded once, then passed by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: ApiKey,
    pub webhook_url: WebhookUrl,
}

impl Credentials {
    /// Resolves credentials through `lookup` (the environment in production).
    ///
    /// The webhook URL is checked first so an unconfigured channel is reported
    /// even when the API key is missing too.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let webhook_url = lookup(ENV_WEBHOOK_URL)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigurationError::Missing(ENV_WEBHOOK_URL))?;
        let api_key = lookup(ENV_GTA_API_KEY)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigurationError::Missing(ENV_GTA_API_KEY))?;

        Ok(Self {
            api_key: ApiKey::new(api_key)?,
            webhook_url: WebhookUrl::parse(&webhook_url)?,
        })
    }
}

/// Reads `GTA_API_KEY` and `WEBHOOK_URL` from the process environment.
pub fn load_credentials() -> Result<Credentials, ConfigurationError> {
    Credentials::from_lookup(env_lookup)
}

/// Environment lookup used by the binary.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Loads a local env file into the process environment.
///
/// Variables already set in the environment are left untouched. An explicit
/// path must exist; the implicit `./.env` is optional.
pub fn load_env_file(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigurationError> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|_| Some(path.to_path_buf()))
            .map_err(|e| ConfigurationError::EnvFile {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        None => match dotenvy::dotenv() {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(ConfigurationError::EnvFile {
                path: ".env".to_string(),
                reason: e.to_string(),
            }),
        },
    }
}

/// What to do with the rendered payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryOptions {
    /// Skip the Teams call when GTA returned no interventions.
    pub suppress_empty: bool,
    /// Echo the payload to stdout.
    pub print_payload: bool,
    /// Render only; never call the webhook.
    pub dry_run: bool,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            suppress_empty: true,
            print_payload: false,
            dry_run: false,
        }
    }
}

/// Resolved run configuration — validated and ready to drive all stages.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub credentials: Credentials,
    pub query: InterventionQuery,
    pub render: RenderOptions,
    pub delivery: DeliveryOptions,
    pub gta_endpoint: Url,
    pub timeout: Duration,
}

impl RunConfig {
    /// Resolves a complete configuration from CLI input and an env lookup.
    pub fn resolve<F>(cli: &CommandLineInput, lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(lookup)?;

        let query = build_query(cli)?;
        let gta_endpoint = parse_endpoint(&cli.gta_url)?;

        if cli.timeout == 0 {
            return Err(ConfigurationError::InvalidTimeout(
                "timeout must be at least 1 second".to_string(),
            ));
        }

        Ok(RunConfig {
            credentials,
            query,
            render: RenderOptions {
                style: cli.format,
                selection: if cli.all {
                    RecordSelection::All
                } else {
                    RecordSelection::First
                },
            },
            delivery: DeliveryOptions {
                suppress_empty: !cli.send_empty,
                print_payload: cli.print || cli.dry_run,
                dry_run: cli.dry_run,
            },
            gta_endpoint,
            timeout: Duration::from_secs(cli.timeout),
        })
    }
}

/// The US default applies only when no implementer was chosen by flag or
/// by an explicit `--filter implementer=...`.
fn build_query(cli: &CommandLineInput) -> Result<InterventionQuery, ConfigurationError> {
    let filters = cli
        .filters
        .iter()
        .map(String::as_str)
        .map(parse_filter)
        .collect::<Result<Vec<_>, _>>()?;
    let implementer_filtered = filters.iter().any(|(name, _)| name == IMPLEMENTER_FILTER);

    let mut query = InterventionQuery::new(cli.limit, cli.offset)?;
    if !cli.implementers.is_empty() {
        query = query.with_implementers(&cli.implementers);
    } else if !cli.all_implementers && !implementer_filtered {
        query = query.with_implementers(&[DEFAULT_IMPLEMENTER]);
    }
    for (name, value) in filters {
        query = query.with_filter(name, value);
    }
    Ok(query)
}
