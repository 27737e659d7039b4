//! Route handler functions for all API endpoints.
//!
//! Each handler extracts path/body parameters via axum extractors, drives
//! the orchestrator or renderer through AppState, and returns JSON.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vantage_chart::{Chart, ChartKind};
use vantage_core::{AssistantReply, Role, Turn};

use crate::error::ApiError;
use crate::state::AppState;

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct ChartRequest {
    pub x_column: String,
    pub y_column: String,
    pub kind: ChartKind,
}

// =============================================================================
// Response types
// =============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionCreatedResponse {
    pub session_id: Uuid,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub session_id: Uuid,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub session_id: Uuid,
    pub cleared: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /health - liveness and uptime.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /sessions - create a fresh conversation session.
pub async fn create_session(State(state): State<AppState>) -> Json<SessionCreatedResponse> {
    let session_id = state.create_session();
    tracing::info!(%session_id, "Session created");
    Json(SessionCreatedResponse { session_id })
}

/// POST /sessions/{id}/chat - run one orchestrated turn.
///
/// Returns 409 while a turn is in flight: the session lock is tried, not
/// awaited, so a concurrent submission is rejected rather than queued.
pub async fn chat(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<AssistantReply>, ApiError> {
    let session = state
        .session(id)
        .ok_or_else(|| ApiError::NotFound(format!("session not found: {}", id)))?;

    let mut session = session.try_lock().map_err(|_| {
        ApiError::Conflict("a turn is already in flight for this session".to_string())
    })?;

    let reply = state.orchestrator.submit(&mut session, &request.question).await?;
    Ok(Json(reply))
}

/// GET /sessions/{id}/history - the display view of the conversation.
///
/// Analyst mirror turns are wire context, not display content, and are
/// filtered out.
pub async fn history(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let session = state
        .session(id)
        .ok_or_else(|| ApiError::NotFound(format!("session not found: {}", id)))?;
    let session = session.lock().await;

    let turns = session
        .conversation
        .turns()
        .iter()
        .filter(|t| t.role != Role::Analyst)
        .cloned()
        .collect();

    Ok(Json(HistoryResponse {
        session_id: id,
        turns,
    }))
}

/// POST /sessions/{id}/reset - clear the conversation.
pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResetResponse>, ApiError> {
    let session = state
        .session(id)
        .ok_or_else(|| ApiError::NotFound(format!("session not found: {}", id)))?;

    // Resetting mid-turn is rejected like any other concurrent submission.
    let mut session = session.try_lock().map_err(|_| {
        ApiError::Conflict("a turn is already in flight for this session".to_string())
    })?;

    state.orchestrator.reset(&mut session);
    Ok(Json(ResetResponse {
        session_id: id,
        cleared: true,
    }))
}

/// POST /sessions/{id}/turns/{index}/chart - render a chart from the
/// result snapshot stored on an assistant turn.
pub async fn chart(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
    Json(request): Json<ChartRequest>,
) -> Result<Json<Chart>, ApiError> {
    let session = state
        .session(id)
        .ok_or_else(|| ApiError::NotFound(format!("session not found: {}", id)))?;
    let session = session.lock().await;

    let result = session
        .result_for_turn(index)
        .ok_or_else(|| ApiError::NotFound(format!("no result snapshot at turn {}", index)))?;

    let chart = state
        .renderer
        .render(result, &request.x_column, &request.y_column, request.kind)?;

    Ok(Json(chart))
}
