// src/pipeline.rs
//! Pipeline capability traits and the fetch → format → send sequence.
//!
//! The two external endpoints sit behind traits so each stage can be
//! exercised in isolation, and so tests can stand in for GTA or Teams.

use crate::api::GtaHttpClient;
use crate::config::{CommandLineInput, DeliveryOptions, RunConfig};
use crate::error::{ApiError, NotificationError, Result};
use crate::formatting::{format_message, NotificationPayload, RenderOptions};
use crate::model::InterventionRecord;
use crate::notify::TeamsWebhookClient;
use crate::types::InterventionQuery;

/// Retrieves intervention records for a query.
#[async_trait::async_trait]
pub trait InterventionSource {
    async fn fetch_interventions(
        &self,
        query: &InterventionQuery,
    ) -> Result<Vec<InterventionRecord>, ApiError>;
}

/// Delivers a rendered payload to its channel.
#[async_trait::async_trait]
pub trait NotificationSink {
    async fn send_notification(&self, payload: &NotificationPayload)
        -> Result<(), NotificationError>;
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// The payload was accepted by the webhook.
    Sent { records: usize },
    /// GTA returned nothing and empty notices are suppressed.
    Suppressed,
    /// The payload was rendered but not sent.
    DryRun { payload: NotificationPayload },
}

/// Runs one fetch → format → send cycle.
///
/// Stages run strictly in order and the first failure ends the run; nothing
/// is retried.
pub async fn run_pipeline<S, N>(
    source: &S,
    sink: &N,
    query: &InterventionQuery,
    render: &RenderOptions,
    delivery: &DeliveryOptions,
) -> Result<RunOutcome>
where
    S: InterventionSource + Sync + ?Sized,
    N: NotificationSink + Sync + ?Sized,
{
    let records = source.fetch_interventions(query).await?;

    if records.is_empty() && delivery.suppress_empty {
        log::info!("No interventions found.");
        return Ok(RunOutcome::Suppressed);
    }

    let payload = format_message(&records, render);

    if delivery.print_payload {
        println!("{}", payload.to_pretty_json()?);
    }

    if delivery.dry_run {
        log::info!("Dry run: message not sent to Teams");
        return Ok(RunOutcome::DryRun { payload });
    }

    sink.send_notification(&payload).await?;
    log::info!("Message sent successfully!");

    Ok(RunOutcome::Sent {
        records: records.len(),
    })
}

/// Resolves configuration, builds both HTTP clients, and runs the pipeline.
///
/// Configuration is validated before either client exists, so a missing
/// secret never reaches the network.
pub async fn execute<F>(cli: &CommandLineInput, lookup: F) -> Result<RunOutcome>
where
    F: Fn(&str) -> Option<String>,
{
    let config = RunConfig::resolve(cli, lookup)?;

    log::info!(
        "Querying {} (limit {}, offset {})",
        config.gta_endpoint,
        config.query.limit(),
        config.query.offset()
    );
    log::debug!(
        "Using API key {} and webhook {}",
        config.credentials.api_key,
        config.credentials.webhook_url
    );

    let source = GtaHttpClient::new(
        &config.credentials.api_key,
        config.gta_endpoint.clone(),
        config.timeout,
    )?;
    let sink = TeamsWebhookClient::new(config.credentials.webhook_url.clone(), config.timeout)?;

    run_pipeline(
        &source,
        &sink,
        &config.query,
        &config.render,
        &config.delivery,
    )
    .await
}
