//! REST API for Vantage.
//!
//! The explicit UI boundary: the dashboard page submits questions and
//! chart selections here and reads back render-ready turn reports. No
//! whole-page re-run semantics; every interaction is one request.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
