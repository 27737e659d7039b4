//! Wire payload shaping for the analyst backend.
//!
//! The backend sees the conversation as an ordered list of role+content
//! pairs. Display-only assistant turns never cross the wire.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use vantage_core::{Block, Role, Turn, TurnContent};

/// One history entry as the analyst backend expects it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: Role,
    pub content: Vec<Block>,
}

/// Request body for the analyst chat endpoint.
#[derive(Debug, Serialize)]
pub struct AnalystRequest<'a> {
    pub messages: &'a [WireMessage],
    pub semantic_model: &'a str,
}

/// Response envelope from the analyst backend.
///
/// A body without the `success` flag fails to decode and is treated as a
/// protocol violation by the client.
#[derive(Debug, Deserialize)]
pub struct AnalystEnvelope {
    pub success: bool,
    #[serde(default)]
    pub content: Option<Value>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Serialize the conversation as the backend's history payload.
///
/// User turns become single text blocks; analyst turns resend their raw
/// blocks verbatim, preserving the backend's view of turn order. Assistant
/// display turns are UI bookkeeping and are skipped.
pub fn history_payload(turns: &[Turn]) -> Vec<WireMessage> {
    turns
        .iter()
        .filter_map(|turn| match (&turn.role, &turn.content) {
            (Role::User, TurnContent::Text(text)) => Some(WireMessage {
                role: Role::User,
                content: vec![Block::Text { text: text.clone() }],
            }),
            (Role::Analyst, TurnContent::Raw(blocks)) => Some(WireMessage {
                role: Role::Analyst,
                content: blocks.clone(),
            }),
            _ => None,
        })
        .collect()
}
