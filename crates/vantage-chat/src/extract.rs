//! Response extraction: pure functions over a structured reply.
//!
//! Walks the reply's block list once and pulls out the three things the
//! orchestrator cares about. Referentially transparent: the same reply
//! always yields the same parts.

use vantage_core::{Block, StructuredReply};

/// The extracted pieces of one structured reply.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplyParts {
    /// All text block contents, in order, joined with newlines. Empty when
    /// the reply carries no text.
    pub explanation: String,
    /// The statement of the first `sql` block in document order, if any.
    /// Later `sql` blocks are ignored.
    pub sql: Option<String>,
    /// The list of the first `suggestions` block, empty otherwise.
    pub suggestions: Vec<String>,
}

impl ReplyParts {
    /// Extract in one pass. Unknown blocks are skipped, never fatal.
    pub fn from_reply(reply: &StructuredReply) -> Self {
        let mut texts: Vec<&str> = Vec::new();
        let mut sql: Option<String> = None;
        let mut suggestions: Option<Vec<String>> = None;

        for block in reply.blocks() {
            match block {
                Block::Text { text } => texts.push(text),
                Block::Sql { statement } => {
                    if sql.is_none() {
                        sql = Some(statement.clone());
                    }
                }
                Block::Suggestions {
                    suggestions: items,
                } => {
                    if suggestions.is_none() {
                        suggestions = Some(items.clone());
                    }
                }
                Block::Unknown => {}
            }
        }

        ReplyParts {
            explanation: texts.join("\n"),
            sql,
            suggestions: suggestions.unwrap_or_default(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
