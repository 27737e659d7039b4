//! Conversational orchestration for Vantage.
//!
//! Owns the turn-taking state machine: user question -> NL backend ->
//! SQL extraction -> execution -> provenance classification -> display-ready
//! reply, with error containment at every stage.

pub mod error;
pub mod extract;
pub mod orchestrator;
pub mod session;

pub use error::ChatError;
pub use extract::ReplyParts;
pub use orchestrator::ChatOrchestrator;
pub use session::{Session, TurnState};
