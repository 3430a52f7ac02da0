// src/model/record.rs
//! A single intervention as returned by the GTA API.
//!
//! The response schema belongs to GTA and changes without notice, so the
//! record stays an open JSON object. Accessors pull out the handful of
//! fields the Teams message needs and fall back across the field names the
//! API has used over time.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One trade-policy intervention tracked by Global Trade Alert.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterventionRecord(Map<String, Value>);

/// GTA's traffic-light assessment of an intervention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    Red,
    Amber,
    Green,
}

impl Evaluation {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "red" => Some(Self::Red),
            "amber" => Some(Self::Amber),
            "green" => Some(Self::Green),
            _ => None,
        }
    }
}

impl InterventionRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw access to any field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn id(&self) -> Option<String> {
        self.text_of(&["intervention_id", "id"])
    }

    pub fn title(&self) -> Option<String> {
        self.text_of(&["state_act_title", "title"])
    }

    pub fn url(&self) -> Option<String> {
        self.text_of(&["intervention_url", "url"])
    }

    /// The evaluation as reported, e.g. "Red".
    pub fn evaluation_label(&self) -> Option<String> {
        self.text_of(&["gta_evaluation", "evaluation"])
    }

    pub fn evaluation(&self) -> Option<Evaluation> {
        self.evaluation_label().as_deref().and_then(Evaluation::parse)
    }

    pub fn intervention_type(&self) -> Option<String> {
        self.text_of(&["intervention_type", "type"])
    }

    pub fn mast_chapter(&self) -> Option<String> {
        self.text_of(&["mast_chapter"])
    }

    pub fn implementation_level(&self) -> Option<String> {
        self.text_of(&["implementation_level"])
    }

    /// Best date to show for the record: implementation, then announcement.
    ///
    /// ISO dates and RFC 3339 timestamps are normalized to `YYYY-MM-DD`;
    /// anything else is returned as the API sent it.
    pub fn date(&self) -> Option<String> {
        self.text_of(&["date_implemented", "date_announced", "date"])
            .map(|raw| normalize_date(&raw))
    }

    /// Implementation date only. `None` for measures not yet implemented.
    pub fn date_implemented(&self) -> Option<String> {
        self.text_of(&["date_implemented"])
            .map(|raw| normalize_date(&raw))
    }

    pub fn is_in_force(&self) -> bool {
        match self.0.get("is_in_force") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::String(s)) => {
                let flag = s.trim().to_ascii_lowercase();
                matches!(flag.as_str(), "1" | "true" | "yes")
            }
            _ => false,
        }
    }

    pub fn implementing_jurisdictions(&self) -> Vec<String> {
        self.names_of(&["implementing_jurisdictions", "jurisdiction", "implementer"])
    }

    pub fn affected_jurisdictions(&self) -> Vec<String> {
        self.names_of(&["affected_jurisdictions"])
    }

    pub fn affected_product_count(&self) -> usize {
        count_of(self.0.get("affected_products"))
    }

    pub fn affected_sector_count(&self) -> usize {
        count_of(self.0.get("affected_sectors"))
    }

    /// First non-empty scalar among `fields`, rendered as text.
    fn text_of(&self, fields: &[&str]) -> Option<String> {
        fields
            .iter()
            .filter_map(|field| self.0.get(*field))
            .find_map(scalar_text)
    }

    /// Names from the first field that yields any.
    ///
    /// Accepts a list of `{name: ..}` objects, a list of strings, or a single
    /// scalar.
    fn names_of(&self, fields: &[&str]) -> Vec<String> {
        fields
            .iter()
            .filter_map(|field| self.0.get(*field))
            .map(|value| -> Vec<String> {
                match value {
                    Value::Array(items) => items.iter().filter_map(jurisdiction_name).collect(),
                    other => jurisdiction_name(other).into_iter().collect(),
                }
            })
            .find(|names| !names.is_empty())
            .unwrap_or_default()
    }
}

impl From<Map<String, Value>> for InterventionRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn jurisdiction_name(value: &Value) -> Option<String> {
    match value {
        Value::Object(obj) => obj.get("name").and_then(scalar_text),
        other => scalar_text(other),
    }
}

fn count_of(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Number(n)) => n.as_u64().map(|v| v as usize).unwrap_or(0),
        _ => 0,
    }
}

fn normalize_date(raw: &str) -> String {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.date_naive().format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
