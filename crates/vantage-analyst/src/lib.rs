//! NL query adapter for Vantage.
//!
//! Serializes the running conversation as the analyst backend's wire
//! payload, attaches the fixed semantic-model reference, and normalizes
//! the response envelope into a [`vantage_core::StructuredReply`] or a
//! typed [`AnalystError`].

pub mod client;
pub mod error;
pub mod wire;

pub use client::{AnalystClient, HttpAnalystClient};
pub use error::AnalystError;
pub use wire::{history_payload, AnalystEnvelope, AnalystRequest, WireMessage};
