//! Chart rendering: tabular result + axis/kind selection -> chart payload.
//!
//! The renderer produces render-ready data structures; the UI boundary owns
//! the actual drawing. Axis and kind selection is user-driven per render
//! and not persisted beyond the turn's stored result snapshot.

use serde::{Deserialize, Serialize};

use vantage_core::{QueryResult, Scalar};

use crate::error::ChartError;

/// Supported chart renderings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
    Histogram,
    BoxPlot,
    /// Bar chart with a line overlay of the same series.
    Combo,
    /// Sum aggregate of the y column, shown as one number.
    SingleNumber,
}

/// One plotted point: the x cell as-is, the y cell as a number.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Scalar,
    pub y: f64,
}

/// One pie slice.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

/// One histogram bin over the half-open interval `[lower, upper)`; the last
/// bin is closed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Five-number summary for a box plot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Render-ready chart payload, one variant per [`ChartKind`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Line { points: Vec<Point> },
    Bar { points: Vec<Point> },
    Scatter { points: Vec<Point> },
    Combo { points: Vec<Point> },
    Pie { slices: Vec<Slice> },
    Histogram { bins: Vec<Bin> },
    /// `stats` is `None` when no numeric values survived filtering.
    BoxPlot { stats: Option<BoxStats> },
    SingleNumber { value: f64 },
}

/// Maps a tabular result plus user-chosen axes and kind to a chart payload.
pub struct ChartRenderer {
    histogram_bins: usize,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self { histogram_bins: 10 }
    }
}

impl ChartRenderer {
    /// Create a renderer with the given histogram bin count (minimum 1).
    pub fn new(histogram_bins: usize) -> Self {
        Self {
            histogram_bins: histogram_bins.max(1),
        }
    }

    /// Render a chart from the selected columns of a result.
    ///
    /// Requires at least two columns. Rows where either selected cell is
    /// NULL are dropped before rendering; zero surviving rows is valid and
    /// produces an empty chart rather than an error.
    pub fn render(
        &self,
        result: &QueryResult,
        x_column: &str,
        y_column: &str,
        kind: ChartKind,
    ) -> Result<Chart, ChartError> {
        if result.columns.len() < 2 {
            return Err(ChartError::InsufficientColumns);
        }

        let x = result
            .column(x_column)
            .ok_or_else(|| ChartError::UnknownColumn(x_column.to_string()))?;
        let y = result
            .column(y_column)
            .ok_or_else(|| ChartError::UnknownColumn(y_column.to_string()))?;

        // Joint non-null filter: both cells of a row must be present.
        let mut points = Vec::new();
        for (xv, yv) in x.values.iter().zip(y.values.iter()) {
            if xv.is_null() || yv.is_null() {
                continue;
            }
            let value = yv
                .as_f64()
                .ok_or_else(|| ChartError::NonNumericColumn(y_column.to_string()))?;
            points.push(Point {
                x: xv.clone(),
                y: value,
            });
        }

        let chart = match kind {
            ChartKind::Line => Chart::Line { points },
            ChartKind::Bar => Chart::Bar { points },
            ChartKind::Scatter => Chart::Scatter { points },
            ChartKind::Combo => Chart::Combo { points },
            ChartKind::Pie => Chart::Pie {
                slices: points
                    .into_iter()
                    .map(|p| Slice {
                        label: p.x.to_string(),
                        value: p.y,
                    })
                    .collect(),
            },
            ChartKind::Histogram => Chart::Histogram {
                bins: build_bins(&collect_ys(&points), self.histogram_bins),
            },
            ChartKind::BoxPlot => Chart::BoxPlot {
                stats: box_stats(&collect_ys(&points)),
            },
            ChartKind::SingleNumber => Chart::SingleNumber {
                value: points.iter().map(|p| p.y).sum(),
            },
        };

        Ok(chart)
    }
}

fn collect_ys(points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| p.y).collect()
}

/// Equal-width bins over `[min, max]`. All values land in one bin when the
/// range is degenerate.
fn build_bins(values: &[f64], bin_count: usize) -> Vec<Bin> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return vec![Bin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            lower: min + width * i as f64,
            upper: min + width * (i + 1) as f64,
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        bins[idx].count += 1;
    }

    bins
}

/// Five-number summary with linear interpolation between order statistics.
fn box_stats(values: &[f64]) -> Option<BoxStats> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(BoxStats {
        min: sorted[0],
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
        max: sorted[sorted.len() - 1],
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = (sorted.len() - 1) as f64 * q;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

// =============================================================================
// Tests
// =============================================================================
