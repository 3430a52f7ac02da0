// src/formatting/adaptive_card.rs
//! Adaptive Card rendering of a single intervention.

use super::{display_or_missing, force_status, summarize_names};
use crate::constants::ADAPTIVE_CARD_VERSION;
use crate::model::{Evaluation, InterventionRecord};
use serde_json::{json, Value};

const ADAPTIVE_CARD_SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";

/// Builds the card body for one intervention.
///
/// Layout: heading, evaluation/status columns, a fact set, implementing and
/// affected jurisdictions, and a link to the intervention page.
pub fn render_card(record: &InterventionRecord) -> Value {
    let title = display_or_missing(record.title());
    let evaluation = display_or_missing(record.evaluation_label());
    let status_color = if record.is_in_force() {
        "good"
    } else {
        "attention"
    };

    let mut body = vec![
        json!({
            "type": "TextBlock",
            "text": title,
            "weight": "bolder",
            "size": "medium",
            "wrap": true,
            "horizontalAlignment": "Center",
            "style": "heading"
        }),
        json!({
            "type": "ColumnSet",
            "columns": [
                {
                    "type": "Column",
                    "width": "stretch",
                    "items": [{
                        "type": "TextBlock",
                        "text": format!("GTA Evaluation: {}", evaluation),
                        "weight": "bolder",
                        "color": evaluation_color(record.evaluation()),
                        "spacing": "small"
                    }]
                },
                {
                    "type": "Column",
                    "width": "stretch",
                    "items": [{
                        "type": "TextBlock",
                        "text": format!("Status: {}", force_status(record)),
                        "weight": "bolder",
                        "color": status_color,
                        "spacing": "small",
                        "horizontalAlignment": "right"
                    }]
                }
            ]
        }),
        json!({
            "type": "Container",
            "style": "emphasis",
            "spacing": "medium",
            "items": [{
                "type": "FactSet",
                "spacing": "medium",
                "facts": [
                    fact("Intervention Type", display_or_missing(record.intervention_type())),
                    fact("MAST Chapter", display_or_missing(record.mast_chapter())),
                    fact("Implementation Level", display_or_missing(record.implementation_level())),
                    fact("Date Implemented", display_or_missing(record.date_implemented())),
                    fact("Affected Products", format!("{} product(s)", record.affected_product_count())),
                    fact("Affected Sectors", format!("{} sector(s)", record.affected_sector_count()))
                ]
            }]
        }),
        labelled_block(
            "**Implementing Jurisdictions:**",
            summarize_names(&record.implementing_jurisdictions()),
        ),
        labelled_block(
            "**Affected Jurisdictions:**",
            summarize_names(&record.affected_jurisdictions()),
        ),
    ];

    // Teams rejects Action.OpenUrl without a usable URL.
    if let Some(url) = record.url() {
        body.push(json!({
            "type": "Container",
            "spacing": "medium",
            "items": [{
                "type": "ActionSet",
                "actions": [{
                    "type": "Action.OpenUrl",
                    "title": "View Full Intervention Details",
                    "url": url,
                    "style": "positive"
                }]
            }]
        }));
    }

    json!({
        "type": "AdaptiveCard",
        "$schema": ADAPTIVE_CARD_SCHEMA,
        "version": ADAPTIVE_CARD_VERSION,
        "body": body
    })
}

fn evaluation_color(evaluation: Option<Evaluation>) -> &'static str {
    match evaluation {
        Some(Evaluation::Red) => "attention",
        Some(Evaluation::Amber) => "warning",
        Some(Evaluation::Green) => "good",
        None => "default",
    }
}

fn fact(title: &str, value: String) -> Value {
    json!({ "title": title, "value": value })
}

fn labelled_block(label: &str, text: String) -> Value {
    json!({
        "type": "Container",
        "spacing": "medium",
        "items": [
            {
                "type": "TextBlock",
                "text": label,
                "wrap": true,
                "weight": "bolder",
                "spacing": "medium"
            },
            {
                "type": "TextBlock",
                "text": text,
                "wrap": true,
                "spacing": "small"
            }
        ]
    })
}
