// src/formatting/mod.rs
//! Renders intervention records into a Teams webhook payload.
//!
//! Everything in this module is pure: the same records and options always
//! produce the same payload, byte for byte.

mod adaptive_card;
mod payload;
mod plain_text;

pub use self::adaptive_card::render_card;
pub use self::payload::{CardAttachment, CardMessage, NotificationPayload, TextMessage};
pub use self::plain_text::render_text;

use crate::constants::{MAX_LISTED_JURISDICTIONS, MISSING_FIELD, NO_INTERVENTIONS_MESSAGE};
use crate::model::InterventionRecord;

/// Shape of the Teams message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum MessageStyle {
    /// One Adaptive Card attachment per intervention
    #[default]
    Card,
    /// A Markdown `text` message
    Text,
}

/// Which of the returned records end up in the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordSelection {
    #[default]
    First,
    All,
}

/// Rendering choices for `format_message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub style: MessageStyle,
    pub selection: RecordSelection,
}

/// Converts intervention records into the payload posted to Teams.
///
/// An empty slice yields a "no new interventions found" text message rather
/// than an error; whether to send it is the caller's decision.
pub fn format_message(
    records: &[InterventionRecord],
    options: &RenderOptions,
) -> NotificationPayload {
    let selected: Vec<&InterventionRecord> = match options.selection {
        RecordSelection::First => records.iter().take(1).collect(),
        RecordSelection::All => records.iter().collect(),
    };

    if selected.is_empty() {
        return NotificationPayload::text(NO_INTERVENTIONS_MESSAGE);
    }

    match options.style {
        MessageStyle::Card => NotificationPayload::cards(selected.into_iter().map(render_card)),
        MessageStyle::Text => NotificationPayload::text(render_text(&selected)),
    }
}

/// Joins jurisdiction names, listing at most five before "and N more."
pub(crate) fn summarize_names(names: &[String]) -> String {
    if names.is_empty() {
        return MISSING_FIELD.to_string();
    }

    if names.len() > MAX_LISTED_JURISDICTIONS {
        format!(
            "{}, and {} more.",
            names[..MAX_LISTED_JURISDICTIONS].join(", "),
            names.len() - MAX_LISTED_JURISDICTIONS
        )
    } else {
        names.join(", ")
    }
}

pub(crate) fn display_or_missing(value: Option<String>) -> String {
    value.unwrap_or_else(|| MISSING_FIELD.to_string())
}

pub(crate) fn force_status(record: &InterventionRecord) -> &'static str {
    if record.is_in_force() {
        "In Force"
    } else {
        "Not In Force"
    }
}
