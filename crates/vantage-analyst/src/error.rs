//! Error types for the NL query adapter.

use vantage_core::VantageError;

/// Errors from the analyst backend adapter.
///
/// The adapter never raises past its boundary: every call returns a
/// `Result` carrying one of these variants, and the orchestrator decides
/// how to surface it.
#[derive(Debug, thiserror::Error)]
pub enum AnalystError {
    /// Network or connection failure reaching the backend.
    #[error("transport error: {0}")]
    Transport(String),
    /// The backend responded but the payload violates the envelope shape.
    #[error("protocol error: {0}")]
    Protocol(String),
    /// The backend executed but reported a semantic failure.
    #[error("analyst backend error: {0}")]
    Remote(String),
    /// No response within the request budget.
    #[error("analyst request timed out")]
    Timeout,
}

impl From<AnalystError> for VantageError {
    fn from(err: AnalystError) -> Self {
        VantageError::Analyst(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyst_error_display() {
        let err = AnalystError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "transport error: connection refused");

        let err = AnalystError::Protocol("missing success flag".to_string());
        assert_eq!(err.to_string(), "protocol error: missing success flag");

        let err = AnalystError::Remote("model unavailable".to_string());
        assert_eq!(err.to_string(), "analyst backend error: model unavailable");

        let err = AnalystError::Timeout;
        assert_eq!(err.to_string(), "analyst request timed out");
    }

    #[test]
    fn test_analyst_error_into_vantage_error() {
        let err: VantageError = AnalystError::Remote("model unavailable".to_string()).into();
        assert!(matches!(err, VantageError::Analyst(_)));
        assert!(err.to_string().contains("model unavailable"));
    }
}
