// src/formatting/payload.rs
//! Teams webhook message bodies.

use crate::constants::ADAPTIVE_CARD_CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;

/// The JSON body posted to a Teams incoming webhook.
///
/// Either a bare `{"text": ...}` message or a `message` envelope carrying
/// Adaptive Card attachments.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NotificationPayload {
    Text(TextMessage),
    Cards(CardMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextMessage {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardMessage {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub attachments: Vec<CardAttachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardAttachment {
    #[serde(rename = "contentType")]
    pub content_type: &'static str,
    pub content: Value,
}

impl NotificationPayload {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextMessage { text: text.into() })
    }

    /// Wraps each card in its own Adaptive Card attachment.
    pub fn cards(cards: impl IntoIterator<Item = Value>) -> Self {
        Self::Cards(CardMessage {
            kind: "message",
            attachments: cards
                .into_iter()
                .map(|content| CardAttachment {
                    content_type: ADAPTIVE_CARD_CONTENT_TYPE,
                    content,
                })
                .collect(),
        })
    }

    /// Serialized request body.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented form for printing to the operator.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
