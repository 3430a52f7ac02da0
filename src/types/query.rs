// src/types/query.rs
//! The filter sent verbatim as the GTA request body.

use crate::constants::{DEFAULT_IMPLEMENTER, DEFAULT_QUERY_LIMIT, IMPLEMENTER_FILTER};
use crate::error::ConfigurationError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

/// Intervention search request: `{limit, offset, request_data: {...}}`.
///
/// `request_data` keeps insertion order so the serialized body is stable
/// across runs with the same filters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterventionQuery {
    limit: u32,
    offset: u32,
    request_data: IndexMap<String, Value>,
}

impl InterventionQuery {
    /// Creates a query without filters. `limit` must be at least 1.
    pub fn new(limit: u32, offset: u32) -> Result<Self, ConfigurationError> {
        if limit == 0 {
            return Err(ConfigurationError::InvalidQuery(
                "limit must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            limit,
            offset,
            request_data: IndexMap::new(),
        })
    }

    /// Adds (or replaces) a `request_data` filter.
    pub fn with_filter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request_data.insert(name.into(), value.into());
        self
    }

    /// Restricts the search to the given implementing jurisdictions (UN codes).
    pub fn with_implementers(self, codes: &[u32]) -> Self {
        self.with_filter(IMPLEMENTER_FILTER, codes.to_vec())
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn request_data(&self) -> &IndexMap<String, Value> {
        &self.request_data
    }
}

impl Default for InterventionQuery {
    /// The latest intervention implemented by the United States.
    fn default() -> Self {
        Self {
            limit: DEFAULT_QUERY_LIMIT,
            offset: 0,
            request_data: IndexMap::new(),
        }
        .with_implementers(&[DEFAULT_IMPLEMENTER])
    }
}

/// Parses a `name=value` filter argument.
///
/// The value is read as JSON when possible (`[840, 276]`, `true`, `12`),
/// otherwise it is kept as a plain string.
pub fn parse_filter(raw: &str) -> Result<(String, Value), ConfigurationError> {
    let (name, value) = raw.split_once('=').ok_or_else(|| {
        ConfigurationError::InvalidQuery(format!("filter '{}' is not of the form name=value", raw))
    })?;

    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigurationError::InvalidQuery(format!(
            "filter '{}' has an empty name",
            raw
        )));
    }

    let value = value.trim();
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_query_body() {
        let body = serde_json::to_value(InterventionQuery::default()).unwrap();
        assert_eq!(
            body,
            json!({"limit": 1, "offset": 0, "request_data": {"implementer": [840]}})
        );
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(matches!(
            InterventionQuery::new(0, 0),
            Err(ConfigurationError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_filters_keep_insertion_order() {
        let query = InterventionQuery::new(5, 10)
            .unwrap()
            .with_filter("zeta", 1)
            .with_filter("alpha", 2);
        let text = serde_json::to_string(&query).unwrap();
        assert_eq!(
            text,
            r#"{"limit":5,"offset":10,"request_data":{"zeta":1,"alpha":2}}"#
        );
    }

    #[test]
    fn test_parse_filter_values() {
        assert_eq!(
            parse_filter("affected=[276, 250]").unwrap(),
            ("affected".to_string(), json!([276, 250]))
        );
        assert_eq!(
            parse_filter("gta_evaluation=Red").unwrap(),
            ("gta_evaluation".to_string(), json!("Red"))
        );
        assert!(parse_filter("no-equals-sign").is_err());
        assert!(parse_filter("=5").is_err());
    }
}
