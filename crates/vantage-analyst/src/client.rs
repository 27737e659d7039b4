//! HTTP client for the NL-to-SQL analyst backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use vantage_core::config::AnalystConfig;
use vantage_core::{StructuredReply, Turn};

use crate::error::AnalystError;
use crate::wire::{history_payload, AnalystEnvelope, AnalystRequest};

/// Longest body snippet quoted in protocol error messages.
const BODY_SNIPPET_LEN: usize = 200;

/// Seam for the NL query backend.
///
/// One call per user question, no retries: a failed call surfaces
/// immediately to the orchestrator, which decides whether to record an
/// error turn.
#[async_trait]
pub trait AnalystClient: Send + Sync {
    /// Send the full conversation history and return the structured reply.
    async fn ask(&self, history: &[Turn]) -> Result<StructuredReply, AnalystError>;
}

/// reqwest-backed analyst client.
pub struct HttpAnalystClient {
    http: reqwest::Client,
    base_url: String,
    semantic_model: String,
}

impl HttpAnalystClient {
    /// Build a client from configuration. The configured timeout applies to
    /// the whole request.
    pub fn new(config: &AnalystConfig) -> Result<Self, AnalystError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AnalystError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            semantic_model: config.semantic_model.clone(),
        })
    }
}

#[async_trait]
impl AnalystClient for HttpAnalystClient {
    async fn ask(&self, history: &[Turn]) -> Result<StructuredReply, AnalystError> {
        let url = format!("{}/chat", self.base_url);
        let messages = history_payload(history);
        let request = AnalystRequest {
            messages: &messages,
            semantic_model: &self.semantic_model,
        };

        debug!(url = %url, turns = messages.len(), "Calling analyst backend");

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_send_error)?;

        let envelope: AnalystEnvelope = serde_json::from_str(&body).map_err(|_| {
            AnalystError::Protocol(format!(
                "invalid envelope (status {}): {}",
                status,
                snippet(&body)
            ))
        })?;

        if !envelope.success {
            let message = envelope
                .error_message
                .unwrap_or_else(|| "unknown analyst failure".to_string());
            return Err(AnalystError::Remote(message));
        }

        let content = envelope
            .content
            .ok_or_else(|| AnalystError::Protocol("missing content on success".to_string()))?;
        if !content.is_object() {
            return Err(AnalystError::Protocol(
                "content is not an object".to_string(),
            ));
        }

        Ok(StructuredReply::from_value(&content))
    }
}

fn map_send_error(err: reqwest::Error) -> AnalystError {
    if err.is_timeout() {
        AnalystError::Timeout
    } else {
        AnalystError::Transport(err.to_string())
    }
}

fn snippet(body: &str) -> &str {
    let end = body
        .char_indices()
        .nth(BODY_SNIPPET_LEN)
        .map(|(i, _)| i)
        .unwrap_or(body.len());
    &body[..end]
}

// =============================================================================
// Tests
// =============================================================================
