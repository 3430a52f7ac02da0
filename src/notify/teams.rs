// src/notify/teams.rs
//! Teams incoming-webhook client.

use crate::error::{preview_body, NotificationError};
use crate::formatting::NotificationPayload;
use crate::http::{build_client, extract_response_text};
use crate::pipeline::NotificationSink;
use crate::types::WebhookUrl;
use reqwest::{header, Client};
use std::time::Duration;

/// Posts payloads to one Teams channel.
#[derive(Clone)]
pub struct TeamsWebhookClient {
    client: Client,
    webhook_url: WebhookUrl,
}

impl TeamsWebhookClient {
    pub fn new(webhook_url: WebhookUrl, timeout: Duration) -> Result<Self, NotificationError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = build_client(timeout, headers)
            .map_err(|e| NotificationError::ClientSetup(e.to_string()))?;
        Ok(Self {
            client,
            webhook_url,
        })
    }

    /// Sends one payload. Any non-2xx answer is a `NotificationError`.
    pub async fn send_notification(
        &self,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError> {
        log::debug!("POST {}", self.webhook_url);

        let response = self
            .client
            .post(self.webhook_url.as_url().clone())
            .json(payload)
            .send()
            .await?;

        let result = extract_response_text(response).await?;
        if !result.status.is_success() {
            log::error!("Teams webhook rejected the message: HTTP {}", result.status);
            return Err(NotificationError::Status {
                status: result.status.as_u16(),
                body: preview_body(&result.data),
            });
        }

        log::debug!("Teams response: {}", preview_body(&result.data));
        Ok(())
    }
}

#[async_trait::async_trait]
impl NotificationSink for TeamsWebhookClient {
    async fn send_notification(
        &self,
        payload: &NotificationPayload,
    ) -> Result<(), NotificationError> {
        TeamsWebhookClient::send_notification(self, payload).await
    }
}
