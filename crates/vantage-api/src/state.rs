//! Application state shared across all route handlers.
//!
//! AppState holds the orchestrator, renderer, and the live session table.
//! It is passed to handlers via axum's State extractor.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use uuid::Uuid;

use vantage_analyst::AnalystClient;
use vantage_chart::ChartRenderer;
use vantage_chat::{ChatOrchestrator, Session};
use vantage_core::VantageConfig;
use vantage_query::{SourceClassifier, SqlExecutor};

/// Shared application state.
///
/// The session table is a std `Mutex` (locked only to look up or insert);
/// each session sits behind its own `tokio::sync::Mutex` so exactly one
/// turn can hold it across the backend awaits. A submission that finds the
/// session lock taken is rejected, never queued behind a lock.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<VantageConfig>,
    /// The turn-taking orchestrator.
    pub orchestrator: Arc<ChatOrchestrator>,
    /// Chart renderer for stored result snapshots.
    pub renderer: Arc<ChartRenderer>,
    /// Live sessions by id.
    pub sessions: Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<Session>>>>>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState around the given backend adapters.
    pub fn new(
        config: VantageConfig,
        analyst: Arc<dyn AnalystClient>,
        executor: Arc<dyn SqlExecutor>,
    ) -> Self {
        let orchestrator = ChatOrchestrator::new(
            analyst,
            executor,
            SourceClassifier::default(),
            &config.chat,
        );
        let renderer = ChartRenderer::new(config.chart.histogram_bins);

        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            renderer: Arc::new(renderer),
            sessions: Arc::new(Mutex::new(HashMap::new())),
            start_time: Instant::now(),
        }
    }

    /// Create a fresh session and return its id.
    pub fn create_session(&self) -> Uuid {
        let session = Session::new();
        let id = session.id;
        // A poisoned table lock only means another handler panicked; the
        // map itself is still usable.
        let mut sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.insert(id, Arc::new(tokio::sync::Mutex::new(session)));
        id
    }

    /// Look up a session handle by id.
    pub fn session(&self, id: Uuid) -> Option<Arc<tokio::sync::Mutex<Session>>> {
        let sessions = self.sessions.lock().unwrap_or_else(|e| e.into_inner());
        sessions.get(&id).cloned()
    }
}
