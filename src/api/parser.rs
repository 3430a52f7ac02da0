// src/api/parser.rs
//! Turns a captured GTA response into intervention records.
//!
//! Pure functions over `ApiResponse<String>`: status handling and JSON
//! decoding live here so they can be tested without a server.

use crate::error::{preview_body, ApiError};
use crate::http::ApiResponse;
use crate::model::InterventionRecord;
use serde_json::Value;

/// Keys under which a wrapped response may carry the record list.
const COLLECTION_KEYS: [&str; 3] = ["interventions", "results", "data"];

/// Parses a GTA intervention-search response.
///
/// A top-level array is the documented shape; an object wrapping the array
/// under `interventions`, `results` or `data` is accepted as well. An empty
/// collection is a valid answer, not an error.
pub fn parse_interventions_response(
    result: ApiResponse<String>,
) -> Result<Vec<InterventionRecord>, ApiError> {
    if !result.status.is_success() {
        log::error!(
            "Error retrieving interventions from {}: HTTP {}",
            result.url,
            result.status
        );
        return Err(ApiError::Status {
            status: result.status.as_u16(),
            body: preview_body(&result.data),
        });
    }

    let json: Value = serde_json::from_str(&result.data).map_err(|e| {
        log::error!("Failed to parse response from {}: {}", result.url, e);
        ApiError::Unparsable {
            reason: e.to_string(),
            body: preview_body(&result.data),
        }
    })?;

    let items = extract_collection(json).ok_or_else(|| ApiError::Unparsable {
        reason: "expected a list of interventions".to_string(),
        body: preview_body(&result.data),
    })?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(InterventionRecord::new(fields)),
            other => Err(ApiError::Unparsable {
                reason: format!("intervention #{} is not an object", index),
                body: preview_body(&other.to_string()),
            }),
        })
        .collect()
}

fn extract_collection(json: Value) -> Option<Vec<Value>> {
    match json {
        Value::Array(items) => Some(items),
        Value::Object(mut obj) => COLLECTION_KEYS
            .iter()
            .find_map(|key| match obj.remove(*key) {
                Some(Value::Array(items)) => Some(items),
                _ => None,
            }),
        _ => None,
    }
}
