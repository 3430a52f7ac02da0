// src/http.rs
//! Shared reqwest plumbing for the two outbound calls.
//!
//! Both the GTA client and the Teams notifier build their `reqwest::Client`
//! here so that every request carries the same bounded timeouts.

use crate::constants::HTTP_CONNECT_TIMEOUT;
use reqwest::{header, Client, Response, StatusCode};
use std::time::Duration;

/// Builds a client whose requests can never outlive `timeout`.
pub fn build_client(timeout: Duration, headers: header::HeaderMap) -> reqwest::Result<Client> {
    Client::builder()
        .default_headers(headers)
        .timeout(timeout)
        .connect_timeout(HTTP_CONNECT_TIMEOUT.min(timeout))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> reqwest::Result<ApiResponse<String>> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
