//! Error types for chart rendering.

use vantage_core::VantageError;

/// Errors from the chart renderer.
///
/// `InsufficientColumns` is a warning at the UI boundary: the tabular
/// result is still shown, only the chart view is unavailable.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("at least 2 columns are required to display a chart")]
    InsufficientColumns,
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("column '{0}' holds non-numeric values")]
    NonNumericColumn(String),
}

impl From<ChartError> for VantageError {
    fn from(err: ChartError) -> Self {
        VantageError::Chart(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_error_display() {
        assert_eq!(
            ChartError::InsufficientColumns.to_string(),
            "at least 2 columns are required to display a chart"
        );
        assert_eq!(
            ChartError::UnknownColumn("regoin".to_string()).to_string(),
            "unknown column: regoin"
        );
        assert_eq!(
            ChartError::NonNumericColumn("region".to_string()).to_string(),
            "column 'region' holds non-numeric values"
        );
    }

    #[test]
    fn test_chart_error_into_vantage_error() {
        let err: VantageError = ChartError::InsufficientColumns.into();
        assert!(matches!(err, VantageError::Chart(_)));
    }
}
