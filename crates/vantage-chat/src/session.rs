//! Session state for one conversation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vantage_core::{Conversation, QueryResult, Role, TurnContent};

/// Where a session's current turn stands.
///
/// Exactly one question may be in flight at a time; everything except
/// `Idle` rejects new submissions so conversation history ordering stays
/// intact for the backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    #[default]
    Idle,
    /// Waiting on the NL backend.
    AwaitingReply,
    /// Waiting on SQL execution.
    AwaitingExecution,
    /// Shaping the completed turn for display.
    Rendering,
}

/// One user's conversation state, owned by the caller and passed into the
/// orchestrator by reference. No process-wide singletons.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub conversation: Conversation,
    pub state: TurnState,
    pub started_at: DateTime<Utc>,
    pub last_message_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh idle session.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            conversation: Conversation::new(),
            state: TurnState::Idle,
            started_at: now,
            last_message_at: now,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == TurnState::Idle
    }

    /// Explicit reset: drop all turns, return to idle. The session id is
    /// kept so the caller's handle stays valid.
    pub fn reset(&mut self) {
        self.conversation.clear();
        self.state = TurnState::Idle;
        self.last_message_at = Utc::now();
    }

    /// The result snapshot stored on the assistant turn at `turn_index`,
    /// if that turn exists, is an assistant turn, and captured one.
    pub fn result_for_turn(&self, turn_index: usize) -> Option<&QueryResult> {
        let turn = self.conversation.turns().get(turn_index)?;
        if turn.role != Role::Assistant {
            return None;
        }
        match &turn.content {
            TurnContent::Reply(reply) => reply.result.as_ref(),
            _ => None,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
