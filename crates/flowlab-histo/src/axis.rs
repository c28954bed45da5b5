//! Fixed-width binned axis
//!
//! Bins are referenced by their lower edge, hbook style. The domain is
//! closed on both ends: a value sitting exactly on `max` goes into the
//! last bin instead of being counted as an overflow.

use serde::{Deserialize, Serialize};

use crate::error::{HistoError, HistoResult};

/// One axis of a histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    bins: usize,
    min: f64,
    max: f64,
    width: f64,
}

impl Axis {
    /// Create an axis with `bins` equal-width bins spanning `[min, max]`
    pub fn new(bins: usize, min: f64, max: f64) -> HistoResult<Self> {
        if bins == 0 {
            return Err(HistoError::invalid("bin count must be positive"));
        }
        if !min.is_finite() || !max.is_finite() {
            return Err(HistoError::invalid(format!(
                "axis bounds must be finite, got [{}, {}]",
                min, max
            )));
        }
        if max <= min {
            return Err(HistoError::invalid(format!(
                "axis maximum {} must be greater than minimum {}",
                max, min
            )));
        }

        Ok(Self {
            bins,
            min,
            max,
            width: (max - min) / bins as f64,
        })
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Lower edge of the first bin
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper edge of the last bin
    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Check whether a value falls inside `[min, max]`
    ///
    /// NaN is never inside.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Bin index for a value, or `None` for an overflow
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        if !self.contains(value) {
            return None;
        }
        let index = ((value - self.min) / self.width).floor() as usize;
        // Landing exactly on the right edge
        Some(index.min(self.bins - 1))
    }

    /// Left edge of a single bin
    pub fn left_edge(&self, bin: usize) -> f64 {
        self.min + self.width * bin as f64
    }

    /// Left edges of every bin, excluding the upper edge of the last one
    pub fn left_edges(&self) -> Vec<f64> {
        (0..self.bins).map(|i| self.left_edge(i)).collect()
    }

    /// All `bins + 1` bin boundaries, ending exactly at `max`
    pub fn edges(&self) -> Vec<f64> {
        let mut edges = self.left_edges();
        edges.push(self.max);
        edges
    }

    /// Check that two axes bin values identically
    pub fn same_geometry(&self, other: &Axis) -> bool {
        self.bins == other.bins && self.min == other.min && self.max == other.max
    }
}
