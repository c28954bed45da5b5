//! Read-only views for plotting backends
//!
//! Drawing happens elsewhere. A [`RenderSnapshot`] carries what a backend
//! needs to draw a histogram as a post-step plot with a statistics box:
//! vertices, title, axis labels, the formatted mean/RMS/N text, where to
//! put that text when several histograms share a figure, and whether the
//! vertical scale is logarithmic.
//!
//! 2D histograms get a snapshot without a step plot; scatter rendering is
//! not provided.

use serde::{Deserialize, Serialize};

use crate::histogram::{Dimensionality, Histogram, HistogramStats};

/// Vertices for a post-step plot
///
/// `edges` has one more entry than there are bins (the upper edge of the
/// last bin), and `heights` repeats the last population so the final step
/// is drawn out to that edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct StepPlot {
    pub edges: Vec<f64>,
    pub heights: Vec<u64>,
}

impl StepPlot {
    fn from_histogram(histogram: &Histogram) -> Option<Self> {
        if histogram.dimensionality() != Dimensionality::OneD {
            return None;
        }
        let edges = histogram.x_axis().edges();
        let mut heights = histogram.counts().to_vec();
        if let Some(&last) = heights.last() {
            heights.push(last);
        }
        Some(Self { edges, heights })
    }

    /// (x, height) pairs in drawing order
    pub fn points(&self) -> Vec<(f64, u64)> {
        self.edges
            .iter()
            .copied()
            .zip(self.heights.iter().copied())
            .collect()
    }
}

/// Position of one histogram in a grid of subplots
///
/// Panes are numbered from 1, left to right and then top to bottom. Any
/// zero field means the histogram has the figure to itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct PaneLayout {
    pub rows: u32,
    pub columns: u32,
    pub pane: u32,
}

impl PaneLayout {
    pub fn solo() -> Self {
        Self::default()
    }

    pub fn grid(rows: u32, columns: u32, pane: u32) -> Self {
        Self {
            rows,
            columns,
            pane,
        }
    }

    pub fn is_solo(&self) -> bool {
        self.rows == 0 || self.columns == 0 || self.pane == 0
    }

    /// 1-based (column, row) of the pane
    pub fn cell(&self) -> (u32, u32) {
        if self.is_solo() {
            return (1, 1);
        }
        let columns = self.columns.max(1);
        let column = match self.pane % columns {
            0 => columns,
            c => c,
        };
        let row = ((self.pane - 1) / columns + 1).max(1);
        (column, row)
    }

    /// Figure-relative anchor for the statistics text
    pub fn text_anchor(&self) -> (f64, f64) {
        let (column, row) = self.cell();
        let columns = self.columns.max(1) as f64;
        let rows = self.rows.max(1) as f64;
        let x = 0.15 + 0.85 * (column - 1) as f64 / columns;
        let y = 0.8 - 0.85 * (row - 1) as f64 / rows;
        (x, y)
    }
}

/// Everything a plotting backend needs to draw one histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub dimensionality: Dimensionality,
    pub stats: HistogramStats,
    /// `None` for 2D histograms
    pub step_plot: Option<StepPlot>,
    /// Lower edges of the y bins for 2D histograms
    pub bottom_edges: Option<Vec<f64>>,
    pub layout: PaneLayout,
    pub log_scale: bool,
}

impl RenderSnapshot {
    pub fn from_histogram(histogram: &Histogram) -> Self {
        Self {
            title: histogram.title().to_string(),
            x_label: histogram.x_label().to_string(),
            y_label: histogram.y_label().to_string(),
            dimensionality: histogram.dimensionality(),
            stats: histogram.stats(),
            step_plot: StepPlot::from_histogram(histogram),
            bottom_edges: histogram.bin_bottom_edges(),
            layout: PaneLayout::solo(),
            log_scale: false,
        }
    }

    /// Request a logarithmic vertical scale
    pub fn with_log_scale(mut self) -> Self {
        self.log_scale = true;
        self
    }

    pub fn with_layout(mut self, layout: PaneLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Text for the statistics box
    pub fn stats_message(&self) -> String {
        stats_message(&self.stats)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Mean to five decimals, RMS to three, and the accepted entry count
pub fn stats_message(stats: &HistogramStats) -> String {
    format!(
        "mean: {:.5}  \nRMS = {:.3}  \nN = {}",
        stats.x_mean, stats.x_rms, stats.entries
    )
}
