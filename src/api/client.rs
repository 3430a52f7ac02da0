// src/api/client.rs
//! HTTP client for the GTA intervention-search endpoint.
//!
//! Handles authentication and the single POST per run. Decoding is left to
//! `parser`.

use super::parser::parse_interventions_response;
use crate::constants::GTA_AUTH_SCHEME;
use crate::error::ApiError;
use crate::http::{build_client, extract_response_text};
use crate::model::InterventionRecord;
use crate::pipeline::InterventionSource;
use crate::types::{ApiKey, InterventionQuery};
use reqwest::{header, Client};
use std::time::Duration;
use url::Url;

/// A thin wrapper around reqwest Client for GTA API requests.
#[derive(Clone)]
pub struct GtaHttpClient {
    client: Client,
    endpoint: Url,
}

impl GtaHttpClient {
    /// Creates a client that authenticates every request with `api_key`.
    pub fn new(api_key: &ApiKey, endpoint: Url, timeout: Duration) -> Result<Self, ApiError> {
        let client = build_client(timeout, Self::create_headers(api_key)?)
            .map_err(|e| ApiError::ClientSetup(e.to_string()))?;
        Ok(Self { client, endpoint })
    }

    /// Creates the default headers for GTA API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, ApiError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("{} {}", GTA_AUTH_SCHEME, api_key.as_str());
        let mut auth_value = header::HeaderValue::from_str(&auth_header)
            .map_err(|e| ApiError::ClientSetup(format!("Invalid API key format: {}", e)))?;
        auth_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_value);

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts `query` to the search endpoint and decodes the records.
    ///
    /// One attempt only: any transport failure, timeout, non-2xx status or
    /// undecodable body is returned as an `ApiError`.
    pub async fn fetch_interventions(
        &self,
        query: &InterventionQuery,
    ) -> Result<Vec<InterventionRecord>, ApiError> {
        log::debug!("POST {}", self.endpoint);
        log::debug!(
            "Query body: {}",
            serde_json::to_string(query).unwrap_or_else(|_| "<unserializable>".to_string())
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await?;

        log::debug!("GTA responded with status {}", response.status());

        let result = extract_response_text(response).await?;
        let records = parse_interventions_response(result)?;

        log::info!("Retrieved {} intervention(s) from GTA", records.len());
        Ok(records)
    }
}

#[async_trait::async_trait]
impl InterventionSource for GtaHttpClient {
    async fn fetch_interventions(
        &self,
        query: &InterventionQuery,
    ) -> Result<Vec<InterventionRecord>, ApiError> {
        GtaHttpClient::fetch_interventions(self, query).await
    }
}
