//! Chart rendering for Vantage query results.
//!
//! Turns a tabular [`vantage_core::QueryResult`] plus a user-chosen axis
//! pair and chart kind into a render-ready payload for the UI boundary.

pub mod error;
pub mod render;

pub use error::ChartError;
pub use render::{Bin, BoxStats, Chart, ChartKind, ChartRenderer, Point, Slice};
