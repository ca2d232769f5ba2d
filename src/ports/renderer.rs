//! Chart renderer port.
//!
//! The reporting core hands finished numeric series to a renderer; bins,
//! colors, layout and the output format belong to the adapter.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A chart ready to render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    /// Output file name without extension, e.g. `01_lead_time_histogram`.
    pub file_stem: String,
    /// Human-readable title.
    pub title: String,
    /// What to draw.
    pub kind: ChartKind,
}

/// The chart shapes produced by the aggregations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartKind {
    /// Distribution of raw values bucketed into `bins` equal-width bins.
    Histogram {
        /// Raw observations.
        values: Vec<f64>,
        /// Number of bins.
        bins: usize,
    },
    /// Stacked panels of line series sharing an x axis.
    Lines {
        /// One entry per panel, top to bottom.
        panels: Vec<Vec<LineSeries>>,
    },
    /// Horizontal bars split into stacked segments.
    StackedBars {
        /// One label per bar, top to bottom.
        labels: Vec<String>,
        /// Segment lengths per bar, drawn left to right.
        segments: Vec<Vec<u64>>,
    },
    /// Vertical bars, one per label.
    Bars {
        /// Bar labels, left to right.
        labels: Vec<String>,
        /// Bar heights.
        values: Vec<u64>,
    },
}

/// A named line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSeries {
    /// Legend label.
    pub label: String,
    /// Y values at successive x positions.
    pub values: Vec<f64>,
}

/// Turns charts into files.
pub trait ChartRenderer: Send + Sync {
    /// Renders one chart and returns the path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the chart cannot be drawn or saved.
    fn render(&self, chart: &Chart) -> Result<PathBuf, Box<dyn std::error::Error + Send + Sync>>;
}
