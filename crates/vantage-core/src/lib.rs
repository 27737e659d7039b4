pub mod config;
pub mod error;
pub mod types;

pub use config::VantageConfig;
pub use error::{Result, VantageError};
pub use types::*;
