use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, VantageError};

/// Top-level configuration for the Vantage service.
///
/// Loaded from `~/.vantage/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VantageConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub analyst: AnalystConfig,
    #[serde(default)]
    pub executor: ExecutorConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Default for VantageConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            analyst: AnalystConfig::default(),
            executor: ExecutorConfig::default(),
            chat: ChatConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl VantageConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VantageConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VantageError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// HTTP API port (bound on localhost).
    pub port: u16,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            port: 4020,
        }
    }
}

/// NL-to-SQL backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalystConfig {
    /// Base URL of the analyst backend.
    pub base_url: String,
    /// Semantic-model reference attached to every call.
    pub semantic_model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9050".to_string(),
            semantic_model: "models/sales.yaml".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Federated SQL execution backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Base URL of the query engine.
    pub base_url: String,
    /// Request timeout in seconds. SQL execution gets a longer budget than
    /// the analyst call.
    pub timeout_secs: u64,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:9060".to_string(),
            timeout_secs: 60,
        }
    }
}

/// Conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Maximum question length in characters.
    pub max_question_length: usize,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            max_question_length: 2000,
        }
    }
}

/// Chart rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Number of equal-width bins for histograms.
    pub histogram_bins: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self { histogram_bins: 10 }
    }
}

// =============================================================================
// Tests
// =============================================================================
