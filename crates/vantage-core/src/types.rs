use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// The author of a conversation turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// A raw question typed by the user.
    User,
    /// A display-ready reply shown in the conversation.
    Assistant,
    /// The raw structured content returned by the NL backend, kept so it
    /// can be resent as context on the next call.
    Analyst,
}

/// Heuristic label identifying which upstream system a query touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DataSourceTag {
    /// Customer-relationship data (accounts, leads, opportunities).
    Crm,
    /// Partner-hosted ERP data reached through the federation layer.
    ErpPartner,
    /// The default analytics warehouse.
    Warehouse,
}

impl fmt::Display for DataSourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataSourceTag::Crm => "crm",
            DataSourceTag::ErpPartner => "erp-partner",
            DataSourceTag::Warehouse => "warehouse",
        };
        write!(f, "{}", s)
    }
}

// =============================================================================
// Structured replies
// =============================================================================

/// A typed fragment of a structured assistant reply.
///
/// The NL backend emits an ordered list of blocks. Any block whose `type`
/// is not recognized deserializes as [`Block::Unknown`] and is ignored by
/// downstream consumers rather than failing the reply.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// Free-form explanation text.
    Text {
        #[serde(default)]
        text: String,
    },
    /// A generated SQL statement. At most one per reply is meaningful;
    /// the first occurrence wins.
    Sql {
        #[serde(default)]
        statement: String,
    },
    /// Follow-up question suggestions.
    Suggestions {
        #[serde(default)]
        suggestions: Vec<String>,
    },
    /// Any block type this build does not understand.
    #[serde(other)]
    Unknown,
}

/// The `message` envelope inside a structured reply.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub content: Vec<Block>,
}

/// The assistant's structured answer: an ordered sequence of content blocks.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredReply {
    #[serde(default)]
    pub message: ReplyMessage,
}

impl StructuredReply {
    /// Decode a reply from arbitrary JSON, leniently.
    ///
    /// Each element of `message.content` is decoded on its own; an element
    /// that is not a valid block becomes [`Block::Unknown`]. A missing or
    /// non-array content list yields an empty reply. Shape violations at
    /// the envelope level (non-object input) are the caller's concern.
    pub fn from_value(value: &serde_json::Value) -> Self {
        let content = value
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_array())
            .map(|items| {
                items
                    .iter()
                    .map(|item| {
                        serde_json::from_value::<Block>(item.clone()).unwrap_or(Block::Unknown)
                    })
                    .collect()
            })
            .unwrap_or_default();

        StructuredReply {
            message: ReplyMessage { content },
        }
    }

    /// The ordered content blocks.
    pub fn blocks(&self) -> &[Block] {
        &self.message.content
    }
}

// =============================================================================
// Query results
// =============================================================================

/// A single scalar cell value in a query result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    /// Whether this cell is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Scalar::Null)
    }

    /// Numeric view of the cell, when it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Int(v) => Some(*v as f64),
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => write!(f, ""),
            Scalar::Bool(v) => write!(f, "{}", v),
            Scalar::Int(v) => write!(f, "{}", v),
            Scalar::Float(v) => write!(f, "{}", v),
            Scalar::Text(v) => write!(f, "{}", v),
        }
    }
}

/// A named column and its ordered values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Scalar>,
}

/// Normalized tabular output of executing a SQL statement.
///
/// Column-major: every column carries the same number of values. A result
/// with columns but zero rows is valid and distinct from execution failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub columns: Vec<Column>,
}

impl QueryResult {
    /// Build a result from a row-major wire shape.
    ///
    /// Short rows pad with [`Scalar::Null`]; surplus cells beyond the named
    /// columns are dropped.
    pub fn from_rows(names: Vec<String>, rows: Vec<Vec<Scalar>>) -> Self {
        let mut columns: Vec<Column> = names
            .into_iter()
            .map(|name| Column {
                name,
                values: Vec::with_capacity(rows.len()),
            })
            .collect();

        for row in rows {
            for (i, col) in columns.iter_mut().enumerate() {
                col.values.push(row.get(i).cloned().unwrap_or(Scalar::Null));
            }
        }

        QueryResult { columns }
    }

    /// Number of rows (length of the first column).
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Whether the result holds zero rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

// =============================================================================
// Conversation
// =============================================================================

/// A display-ready assistant reply, including the error marker for turns
/// that record a contained failure.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    /// Concatenated explanation text, possibly empty.
    #[serde(default)]
    pub explanation: String,
    /// The executed (or attempted) SQL statement.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    /// Follow-up suggestions offered by the backend.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// Snapshot of the execution result for this turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<QueryResult>,
    /// Provenance tags inferred from the SQL text.
    #[serde(default)]
    pub tags: Vec<DataSourceTag>,
    /// Set when this turn records an error instead of a normal reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AssistantReply {
    /// Whether this turn records a contained failure.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Role-specific payload of a turn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnContent {
    /// Raw user text.
    Text(String),
    /// The analyst's raw content blocks, mirrored for context resend.
    Raw(Vec<Block>),
    /// A display-ready assistant reply.
    Reply(AssistantReply),
}

/// One message in a conversation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: TurnContent,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// A user question turn stamped now.
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: TurnContent::Text(text.into()),
            timestamp: Utc::now(),
        }
    }

    /// An analyst mirror turn stamped now.
    pub fn analyst(blocks: Vec<Block>) -> Self {
        Turn {
            role: Role::Analyst,
            content: TurnContent::Raw(blocks),
            timestamp: Utc::now(),
        }
    }

    /// An assistant display turn stamped now.
    pub fn assistant(reply: AssistantReply) -> Self {
        Turn {
            role: Role::Assistant,
            content: TurnContent::Reply(reply),
            timestamp: Utc::now(),
        }
    }
}

/// Ordered, append-only sequence of turns for one session.
///
/// Created at session start, cleared on explicit reset, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    pub fn new() -> Self {
        Conversation::default()
    }

    /// Append a turn at the end.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// Drop all turns (explicit session reset).
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ---- Block decoding ----

    #[test]
    fn test_block_text_decode() {
        let block: Block = serde_json::from_value(json!({
            "type": "text",
            "text": "Here are your top accounts"
        }))
        .unwrap();
        assert_eq!(
            block,
            Block::Text {
                text: "Here are your top accounts".to_string()
            }
        );
    }

    #[test]
    fn test_block_sql_decode() {
        let block: Block = serde_json::from_value(json!({
            "type": "sql",
            "statement": "SELECT 1"
        }))
        .unwrap();
        assert_eq!(
            block,
            Block::Sql {
                statement: "SELECT 1".to_string()
            }
        );
    }

    #[test]
    fn test_block_suggestions_decode() {
        let block: Block = serde_json::from_value(json!({
            "type": "suggestions",
            "suggestions": ["Top accounts by region?", "Show pipeline by stage"]
        }))
        .unwrap();
        match block {
            Block::Suggestions { suggestions } => assert_eq!(suggestions.len(), 2),
            other => panic!("expected suggestions, got {:?}", other),
        }
    }

    #[test]
    fn test_block_unknown_type_absorbed() {
        let block: Block = serde_json::from_value(json!({
            "type": "chart_hint",
            "payload": {"kind": "bar"}
        }))
        .unwrap();
        assert_eq!(block, Block::Unknown);
    }

    #[test]
    fn test_block_missing_fields_default() {
        let block: Block = serde_json::from_value(json!({"type": "text"})).unwrap();
        assert_eq!(
            block,
            Block::Text {
                text: String::new()
            }
        );

        let block: Block = serde_json::from_value(json!({"type": "sql"})).unwrap();
        assert_eq!(
            block,
            Block::Sql {
                statement: String::new()
            }
        );
    }

    // ---- StructuredReply lenient decode ----

    #[test]
    fn test_reply_from_value_full() {
        let reply = StructuredReply::from_value(&json!({
            "message": {
                "content": [
                    {"type": "text", "text": "Here are your top accounts"},
                    {"type": "sql", "statement": "SELECT name FROM salesforce.account"}
                ]
            }
        }));
        assert_eq!(reply.blocks().len(), 2);
    }

    #[test]
    fn test_reply_from_value_missing_message() {
        let reply = StructuredReply::from_value(&json!({}));
        assert!(reply.blocks().is_empty());
    }

    #[test]
    fn test_reply_from_value_content_not_array() {
        let reply = StructuredReply::from_value(&json!({
            "message": {"content": "not a list"}
        }));
        assert!(reply.blocks().is_empty());
    }

    #[test]
    fn test_reply_from_value_malformed_block_becomes_unknown() {
        let reply = StructuredReply::from_value(&json!({
            "message": {
                "content": [
                    {"type": "text", "text": "ok"},
                    42,
                    {"no_type_at_all": true}
                ]
            }
        }));
        assert_eq!(reply.blocks().len(), 3);
        assert_eq!(reply.blocks()[1], Block::Unknown);
        assert_eq!(reply.blocks()[2], Block::Unknown);
    }

    // ---- Scalar ----

    #[test]
    fn test_scalar_decode_variants() {
        let values: Vec<Scalar> =
            serde_json::from_value(json!([null, true, 42, 3.5, "acme"])).unwrap();
        assert_eq!(
            values,
            vec![
                Scalar::Null,
                Scalar::Bool(true),
                Scalar::Int(42),
                Scalar::Float(3.5),
                Scalar::Text("acme".to_string()),
            ]
        );
    }

    #[test]
    fn test_scalar_as_f64() {
        assert_eq!(Scalar::Int(7).as_f64(), Some(7.0));
        assert_eq!(Scalar::Float(1.25).as_f64(), Some(1.25));
        assert_eq!(Scalar::Text("7".to_string()).as_f64(), None);
        assert_eq!(Scalar::Bool(true).as_f64(), None);
        assert_eq!(Scalar::Null.as_f64(), None);
    }

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::Null.to_string(), "");
        assert_eq!(Scalar::Int(-3).to_string(), "-3");
        assert_eq!(Scalar::Text("west".to_string()).to_string(), "west");
    }

    // ---- QueryResult ----

    #[test]
    fn test_from_rows_normalizes() {
        let result = QueryResult::from_rows(
            vec!["region".to_string(), "revenue".to_string()],
            vec![
                vec![Scalar::Text("west".to_string()), Scalar::Int(100)],
                vec![Scalar::Text("east".to_string()), Scalar::Int(250)],
            ],
        );
        assert_eq!(result.row_count(), 2);
        assert_eq!(result.column_names(), vec!["region", "revenue"]);
        assert_eq!(result.column("revenue").unwrap().values[1], Scalar::Int(250));
    }

    #[test]
    fn test_from_rows_short_row_pads_null() {
        let result = QueryResult::from_rows(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![Scalar::Int(1)]],
        );
        assert_eq!(result.column("b").unwrap().values[0], Scalar::Null);
    }

    #[test]
    fn test_from_rows_surplus_cells_dropped() {
        let result = QueryResult::from_rows(
            vec!["a".to_string()],
            vec![vec![Scalar::Int(1), Scalar::Int(2)]],
        );
        assert_eq!(result.columns.len(), 1);
        assert_eq!(result.row_count(), 1);
    }

    #[test]
    fn test_empty_result_is_valid() {
        let result = QueryResult::from_rows(vec!["region".to_string()], vec![]);
        assert!(result.is_empty());
        assert_eq!(result.row_count(), 0);
        assert_eq!(result.column_names(), vec!["region"]);
    }

    #[test]
    fn test_column_lookup_missing() {
        let result = QueryResult::from_rows(vec!["a".to_string()], vec![]);
        assert!(result.column("missing").is_none());
    }

    // ---- Conversation ----

    #[test]
    fn test_turn_round_trip() {
        let mut conv = Conversation::new();
        let turn = Turn::user("show revenue by region");
        let expected = turn.clone();
        conv.push(turn);

        let read = conv.last().unwrap();
        assert_eq!(read.role, expected.role);
        assert_eq!(read.content, expected.content);
        assert_eq!(read.timestamp, expected.timestamp);
    }

    #[test]
    fn test_conversation_append_order() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("first"));
        conv.push(Turn::analyst(vec![Block::Text {
            text: "reply".to_string(),
        }]));
        conv.push(Turn::assistant(AssistantReply::default()));

        assert_eq!(conv.len(), 3);
        assert_eq!(conv.turns()[0].role, Role::User);
        assert_eq!(conv.turns()[1].role, Role::Analyst);
        assert_eq!(conv.turns()[2].role, Role::Assistant);
    }

    #[test]
    fn test_conversation_clear() {
        let mut conv = Conversation::new();
        conv.push(Turn::user("q"));
        assert!(!conv.is_empty());
        conv.clear();
        assert!(conv.is_empty());
        assert_eq!(conv.len(), 0);
    }

    #[test]
    fn test_assistant_reply_error_marker() {
        let reply = AssistantReply {
            error: Some("model unavailable".to_string()),
            ..AssistantReply::default()
        };
        assert!(reply.is_error());
        assert!(!AssistantReply::default().is_error());
    }

    #[test]
    fn test_turn_serde_round_trip() {
        let turn = Turn::assistant(AssistantReply {
            explanation: "Here are your top accounts".to_string(),
            sql: Some("SELECT name FROM salesforce.account".to_string()),
            suggestions: vec!["By region?".to_string()],
            result: Some(QueryResult::from_rows(
                vec!["name".to_string()],
                vec![vec![Scalar::Text("Acme".to_string())]],
            )),
            tags: vec![DataSourceTag::Crm],
            error: None,
        });
        let json = serde_json::to_string(&turn).unwrap();
        let back: Turn = serde_json::from_str(&json).unwrap();
        assert_eq!(back, turn);
    }

    // ---- Tags ----

    #[test]
    fn test_tag_display() {
        assert_eq!(DataSourceTag::Crm.to_string(), "crm");
        assert_eq!(DataSourceTag::ErpPartner.to_string(), "erp-partner");
        assert_eq!(DataSourceTag::Warehouse.to_string(), "warehouse");
    }

    #[test]
    fn test_tag_serde() {
        let json = serde_json::to_string(&DataSourceTag::ErpPartner).unwrap();
        assert_eq!(json, "\"erp-partner\"");
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Analyst).unwrap(), "\"analyst\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
