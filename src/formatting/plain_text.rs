// src/formatting/plain_text.rs
//! Markdown summary for the `{"text": ...}` message form.

use super::{display_or_missing, force_status, summarize_names};
use crate::model::InterventionRecord;

/// Separator between two intervention blocks.
const RECORD_SEPARATOR: &str = "\n\n---\n\n";

/// Renders one Markdown block per record.
///
/// Teams collapses single newlines in webhook text, so lines are separated
/// by blank lines.
pub fn render_text(records: &[&InterventionRecord]) -> String {
    let blocks: Vec<String> = records.iter().map(|record| render_record(record)).collect();
    let body = blocks.join(RECORD_SEPARATOR);

    if records.len() > 1 {
        format!(
            "**{} new interventions from Global Trade Alert**{}{}",
            records.len(),
            RECORD_SEPARATOR,
            body
        )
    } else {
        body
    }
}

fn render_record(record: &InterventionRecord) -> String {
    let mut lines = vec![
        format!("**{}**", display_or_missing(record.title())),
        format!(
            "Evaluation: {} | Status: {}",
            display_or_missing(record.evaluation_label()),
            force_status(record)
        ),
        format!("Type: {}", display_or_missing(record.intervention_type())),
        format!("Date: {}", display_or_missing(record.date())),
        format!(
            "Implementing: {}",
            summarize_names(&record.implementing_jurisdictions())
        ),
        format!(
            "Affected: {}",
            summarize_names(&record.affected_jurisdictions())
        ),
    ];

    if let Some(url) = record.url() {
        lines.push(format!("[View Full Intervention Details]({})", url));
    }

    lines.join("\n\n")
}
