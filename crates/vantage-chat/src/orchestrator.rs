//! Conversation orchestrator: the turn-taking state machine.
//!
//! Drives one question through the NL backend, SQL execution, and
//! provenance classification, containing failures at every stage. The
//! orchestrator is the sole decision point that turns an adapter error
//! into a user-visible turn; adapters themselves never raise past their
//! boundaries.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use vantage_analyst::AnalystClient;
use vantage_core::config::ChatConfig;
use vantage_core::{AssistantReply, Turn};
use vantage_query::{SourceClassifier, SqlExecutor};

use crate::error::ChatError;
use crate::extract::ReplyParts;
use crate::session::{Session, TurnState};

/// Central coordinator wiring the analyst adapter, SQL executor, and
/// classifier around a caller-owned [`Session`].
pub struct ChatOrchestrator {
    analyst: Arc<dyn AnalystClient>,
    executor: Arc<dyn SqlExecutor>,
    classifier: SourceClassifier,
    max_question_length: usize,
}

impl ChatOrchestrator {
    /// Create an orchestrator from its collaborators and chat settings.
    pub fn new(
        analyst: Arc<dyn AnalystClient>,
        executor: Arc<dyn SqlExecutor>,
        classifier: SourceClassifier,
        config: &ChatConfig,
    ) -> Self {
        Self {
            analyst,
            executor,
            classifier,
            max_question_length: config.max_question_length,
        }
    }

    /// Run one full turn for `question`.
    ///
    /// Input rejection (`Err`) leaves the conversation unchanged. Backend
    /// failures are contained: they come back as an [`AssistantReply`] with
    /// the error marker set, recorded on the conversation, and the session
    /// is returned to idle either way.
    pub async fn submit(
        &self,
        session: &mut Session,
        question: &str,
    ) -> Result<AssistantReply, ChatError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ChatError::EmptyQuestion);
        }
        if question.len() > self.max_question_length {
            return Err(ChatError::QuestionTooLong(self.max_question_length));
        }
        if !session.is_idle() {
            return Err(ChatError::TurnInFlight);
        }

        session.conversation.push(Turn::user(question));
        session.last_message_at = Utc::now();

        let reply = self.run_turn(session).await;

        session.conversation.push(Turn::assistant(reply.clone()));
        session.state = TurnState::Idle;
        session.last_message_at = Utc::now();

        Ok(reply)
    }

    /// Reset the session: drop the conversation, return to idle.
    pub fn reset(&self, session: &mut Session) {
        session.reset();
    }

    /// The staged turn pipeline. Every early return is a contained error;
    /// the caller restores the idle state.
    async fn run_turn(&self, session: &mut Session) -> AssistantReply {
        // Stage 1: NL backend, full history as context.
        session.state = TurnState::AwaitingReply;
        let reply = match self.analyst.ask(session.conversation.turns()).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "Analyst call failed");
                return AssistantReply {
                    error: Some(e.to_string()),
                    ..AssistantReply::default()
                };
            }
        };

        // Mirror the raw blocks so the next call resends them as context.
        session
            .conversation
            .push(Turn::analyst(reply.blocks().to_vec()));

        // Stage 2: extraction.
        let parts = ReplyParts::from_reply(&reply);

        // Text-only reply: no execution state is entered.
        let Some(sql) = parts.sql else {
            debug!("Text-only reply, no SQL to execute");
            return AssistantReply {
                explanation: parts.explanation,
                suggestions: parts.suggestions,
                ..AssistantReply::default()
            };
        };

        // Stage 3: SQL execution.
        session.state = TurnState::AwaitingExecution;
        let result = match self.executor.execute(&sql).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error = %e, "SQL execution failed");
                // The explanation produced before the failure is preserved.
                return AssistantReply {
                    explanation: parts.explanation,
                    sql: Some(sql),
                    suggestions: parts.suggestions,
                    error: Some(e.to_string()),
                    ..AssistantReply::default()
                };
            }
        };

        // Stage 4: classification + display shaping. An empty result is a
        // normal outcome here, not an error.
        session.state = TurnState::Rendering;
        let tags = self.classifier.classify(&sql);
        debug!(rows = result.row_count(), ?tags, "Turn complete");

        AssistantReply {
            explanation: parts.explanation,
            sql: Some(sql),
            suggestions: parts.suggestions,
            result: Some(result),
            tags,
            error: None,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
