//! Error types for the SQL execution adapter.

use vantage_core::VantageError;

/// Errors from the federated query engine adapter.
///
/// Transport, backend-SQL, and unexpected-shape conditions all collapse
/// into [`QueryError::Execution`]; only a timeout is kept distinct so the
/// orchestrator can tell a slow backend from a broken one.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("execution error: {0}")]
    Execution(String),
    #[error("query execution timed out")]
    Timeout,
}

impl From<QueryError> for VantageError {
    fn from(err: QueryError) -> Self {
        VantageError::Query(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_display() {
        let err = QueryError::Execution("table not found".to_string());
        assert_eq!(err.to_string(), "execution error: table not found");

        let err = QueryError::Timeout;
        assert_eq!(err.to_string(), "query execution timed out");
    }

    #[test]
    fn test_query_error_into_vantage_error() {
        let err: VantageError = QueryError::Execution("boom".to_string()).into();
        assert!(matches!(err, VantageError::Query(_)));
        assert!(err.to_string().contains("boom"));
    }
}
