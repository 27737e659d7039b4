use thiserror::Error;

/// Top-level error type for the Vantage system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// VantageError` so that the `?` operator works seamlessly across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VantageError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Analyst error: {0}")]
    Analyst(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Chart error: {0}")]
    Chart(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for VantageError {
    fn from(err: toml::de::Error) -> Self {
        VantageError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VantageError {
    fn from(err: toml::ser::Error) -> Self {
        VantageError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VantageError {
    fn from(err: serde_json::Error) -> Self {
        VantageError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Vantage operations.
pub type Result<T> = std::result::Result<T, VantageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VantageError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(VantageError, &str)> = vec![
            (
                VantageError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                VantageError::Analyst("backend down".to_string()),
                "Analyst error: backend down",
            ),
            (
                VantageError::Query("execution failed".to_string()),
                "Query error: execution failed",
            ),
            (
                VantageError::Chat("turn in flight".to_string()),
                "Chat error: turn in flight",
            ),
            (
                VantageError::Chart("too few columns".to_string()),
                "Chart error: too few columns",
            ),
            (
                VantageError::Api("bind failed".to_string()),
                "API error: bind failed",
            ),
            (
                VantageError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: VantageError = io_err.into();
        assert!(matches!(err, VantageError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let err: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(err.is_err());
        let vantage_err: VantageError = err.unwrap_err().into();
        assert!(matches!(vantage_err, VantageError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        assert!(err.is_err());
        let vantage_err: VantageError = err.unwrap_err().into();
        assert!(matches!(vantage_err, VantageError::Serialization(_)));
    }

    #[test]
    fn test_errors_implement_debug() {
        let err = VantageError::Analyst("model unavailable".to_string());
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("Analyst"));
    }
}
