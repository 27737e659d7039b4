//! HTTP adapter for the federated query engine.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vantage_core::config::ExecutorConfig;
use vantage_core::{QueryResult, Scalar};

use crate::error::QueryError;

/// Longest body snippet quoted in execution error messages.
const BODY_SNIPPET_LEN: usize = 200;

/// Seam for the SQL execution backend.
///
/// The statement is sent as-is: the backend is the enforcement boundary,
/// and no local validation or sanitization happens here.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute a statement and return the normalized tabular result.
    ///
    /// Zero rows is a valid result, distinct from an execution error.
    async fn execute(&self, sql: &str) -> Result<QueryResult, QueryError>;
}

/// Request body for the query endpoint.
#[derive(Debug, Serialize)]
struct ExecuteRequest<'a> {
    sql: &'a str,
}

/// Row-major wire shape returned by the engine.
#[derive(Debug, Deserialize)]
struct WireResult {
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<Scalar>>,
}

/// reqwest-backed executor client.
pub struct HttpSqlExecutor {
    http: reqwest::Client,
    base_url: String,
}

impl HttpSqlExecutor {
    /// Build a client from configuration. SQL execution carries a longer
    /// timeout budget than the analyst call.
    pub fn new(config: &ExecutorConfig) -> Result<Self, QueryError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| QueryError::Execution(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SqlExecutor for HttpSqlExecutor {
    async fn execute(&self, sql: &str) -> Result<QueryResult, QueryError> {
        let url = format!("{}/query", self.base_url);
        debug!(url = %url, sql_len = sql.len(), "Executing SQL");

        let response = self
            .http
            .post(&url)
            .json(&ExecuteRequest { sql })
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        let body = response.text().await.map_err(map_send_error)?;

        if !status.is_success() {
            return Err(QueryError::Execution(format!(
                "backend returned status {}: {}",
                status,
                snippet(&body)
            )));
        }

        let wire: WireResult = serde_json::from_str(&body).map_err(|_| {
            QueryError::Execution(format!("unexpected result shape: {}", snippet(&body)))
        })?;

        Ok(QueryResult::from_rows(wire.columns, wire.rows))
    }
}

fn map_send_error(err: reqwest::Error) -> QueryError {
    if err.is_timeout() {
        QueryError::Timeout
    } else {
        QueryError::Execution(err.to_string())
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
