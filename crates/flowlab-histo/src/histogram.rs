//! hbook-style histograms
//!
//! A [`Histogram`] is either a 1D histogram of a single variable or a 2D
//! scatter histogram of `(x, y)` pairs. Axis geometry is fixed at
//! construction. Every fill is counted as an attempt; only fills that land
//! inside the domain advance the bin populations, the accepted-entry
//! counter and the running mean/RMS.
//!
//! ```
//! use flowlab_histo::Histogram;
//!
//! let mut h = Histogram::new_1d("p0 - p1, Pascals", 10, 0.0, 100.0).unwrap();
//! h.set_axis_labels("p0 - p1", "N");
//! h.fill(55.0);
//! h.fill(150.0); // overflow
//!
//! assert_eq!(h.entries(), 1);
//! assert_eq!(h.entries_including_overflows(), 2);
//! assert_eq!(h.counts()[5], 1);
//! ```
//!
//! 1D histograms can also act as an empirical distribution: after at least
//! one accepted fill, [`Histogram::sample`] draws values whose spread
//! follows the histogram shape.

use std::fmt;
use std::slice::Chunks;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::cumulative::CumulativeDistribution;
use crate::error::{HistoError, HistoResult};
use crate::moments::RunningMoments;

pub const DEFAULT_TITLE: &str = "histogram title";
pub const DEFAULT_X_LABEL: &str = "x axis label";
pub const DEFAULT_Y_LABEL: &str = "y axis label";

/// Samples handed to each rayon task by [`Histogram::fill_par`]
#[cfg(feature = "parallel")]
const PARALLEL_CHUNK: usize = 4096;

/// Number of binned variables
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum Dimensionality {
    /// Single variable
    OneD,
    /// Paired (x, y) scatter
    TwoD,
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimensionality::OneD => write!(f, "1D"),
            Dimensionality::TwoD => write!(f, "2D"),
        }
    }
}

/// Entry counts and moments at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct HistogramStats {
    /// Accepted fills
    pub entries: u64,
    /// All fills, overflows included
    pub entries_including_overflows: u64,
    pub x_mean: f64,
    pub x_rms: f64,
    /// Present for 2D histograms only
    pub y_mean: Option<f64>,
    /// Present for 2D histograms only
    pub y_rms: Option<f64>,
}

impl HistogramStats {
    /// Fills that fell outside the domain
    pub fn overflows(&self) -> u64 {
        self.entries_including_overflows - self.entries
    }
}

/// Binned empirical distribution of one or two variables
#[derive(Debug, Clone)]
pub struct Histogram {
    title: String,
    x_axis: Axis,
    y_axis: Option<Axis>,
    /// 1D: one count per x bin. 2D: `ny` rows of `nx` counts, row = y bin.
    counts: Vec<u64>,
    entries: u64,
    attempts: u64,
    x_moments: RunningMoments,
    y_moments: RunningMoments,
    x_label: String,
    y_label: String,
    cumulative: Option<CumulativeDistribution>,
}

impl Histogram {
    /// Create a histogram from prepared axes
    ///
    /// A `y` axis makes it a 2D scatter histogram.
    pub fn new(title: impl Into<String>, x_axis: Axis, y_axis: Option<Axis>) -> Self {
        let cells = x_axis.bins() * y_axis.as_ref().map_or(1, Axis::bins);
        Self {
            title: title.into(),
            x_axis,
            y_axis,
            counts: vec![0; cells],
            entries: 0,
            attempts: 0,
            x_moments: RunningMoments::new(),
            y_moments: RunningMoments::new(),
            x_label: DEFAULT_X_LABEL.to_string(),
            y_label: DEFAULT_Y_LABEL.to_string(),
            cumulative: None,
        }
    }

    /// Create a 1D histogram with `bins` bins over `[min, max]`
    pub fn new_1d(title: impl Into<String>, bins: usize, min: f64, max: f64) -> HistoResult<Self> {
        Ok(Self::new(title, Axis::new(bins, min, max)?, None))
    }

    /// Create a 2D scatter histogram
    pub fn new_2d(
        title: impl Into<String>,
        bins_x: usize,
        x_min: f64,
        x_max: f64,
        bins_y: usize,
        y_min: f64,
        y_max: f64,
    ) -> HistoResult<Self> {
        let x_axis = Axis::new(bins_x, x_min, x_max)?;
        let y_axis = Axis::new(bins_y, y_min, y_max)?;
        Ok(Self::new(title, x_axis, Some(y_axis)))
    }

    /// Same geometry, title and labels, no entries
    pub fn empty_like(&self) -> Self {
        let mut empty = Self::new(self.title.clone(), self.x_axis.clone(), self.y_axis.clone());
        empty.x_label = self.x_label.clone();
        empty.y_label = self.y_label.clone();
        empty
    }

    // ===== Filling =====

    /// Record one x value
    ///
    /// On a 2D histogram this is a fill with no y value: it counts as an
    /// attempt but can never be accepted.
    pub fn fill(&mut self, x: f64) {
        self.fill_xy(x, f64::NAN);
    }

    /// Record one (x, y) pair
    ///
    /// A 1D histogram ignores `y`. A 2D histogram accepts the pair only
    /// when both coordinates are inside their domains.
    pub fn fill_xy(&mut self, x: f64, y: f64) {
        self.attempts += 1;

        let Some(ix) = self.x_axis.bin_index(x) else {
            return;
        };

        match &self.y_axis {
            None => {
                self.counts[ix] += 1;
            }
            Some(y_axis) => {
                let Some(iy) = y_axis.bin_index(y) else {
                    return;
                };
                self.counts[iy * self.x_axis.bins() + ix] += 1;
                self.y_moments.push(y);
            }
        }

        self.entries += 1;
        self.x_moments.push(x);
    }

    /// Record every x value from an iterator
    pub fn fill_many<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        for x in values {
            self.fill(x);
        }
    }

    /// Record a batch of x values using rayon
    ///
    /// Each task fills a private empty copy which is merged back, so the
    /// result matches sequential filling up to floating-point summation
    /// order in the moments.
    #[cfg(feature = "parallel")]
    pub fn fill_par(&mut self, values: &[f64]) {
        let template = self.empty_like();
        let partial = values
            .par_chunks(PARALLEL_CHUNK)
            .map(|chunk| {
                let mut h = template.empty_like();
                h.fill_many(chunk.iter().copied());
                h
            })
            .reduce(
                || template.empty_like(),
                |mut a, b| {
                    a.absorb(&b);
                    a
                },
            );
        self.absorb(&partial);
    }

    /// Fold another histogram with identical geometry into this one
    ///
    /// Used to combine histograms filled independently, e.g. one per
    /// worker thread. Any cumulative distribution is dropped and will be
    /// rebuilt on next use.
    pub fn merge(&mut self, other: &Histogram) -> HistoResult<()> {
        if !self.x_axis.same_geometry(&other.x_axis) {
            return Err(HistoError::GeometryMismatch {
                message: format!(
                    "x axes differ: {} bins over [{}, {}] vs {} bins over [{}, {}]",
                    self.x_axis.bins(),
                    self.x_axis.min(),
                    self.x_axis.max(),
                    other.x_axis.bins(),
                    other.x_axis.min(),
                    other.x_axis.max()
                ),
            });
        }
        let y_matches = match (&self.y_axis, &other.y_axis) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_geometry(b),
            _ => false,
        };
        if !y_matches {
            return Err(HistoError::GeometryMismatch {
                message: format!(
                    "cannot merge a {} histogram into a {} histogram",
                    other.dimensionality(),
                    self.dimensionality()
                ),
            });
        }

        self.absorb(other);
        Ok(())
    }

    fn absorb(&mut self, other: &Histogram) {
        for (mine, theirs) in self.counts.iter_mut().zip(&other.counts) {
            *mine += theirs;
        }
        self.entries += other.entries;
        self.attempts += other.attempts;
        self.x_moments.merge(&other.x_moments);
        self.y_moments.merge(&other.y_moments);
        self.cumulative = None;
    }

    // ===== Cumulative distribution and sampling =====

    /// Integrate the 1D bin populations and rebuild the sampling table
    ///
    /// Always recomputes from the current bins. 2D histograms are rejected
    /// and left untouched.
    pub fn build_cumulative(&mut self) -> HistoResult<()> {
        if self.y_axis.is_some() {
            tracing::warn!(
                "Cannot build a cumulative distribution for 2D histogram '{}'",
                self.title
            );
            return Err(self.unsupported("building a cumulative distribution"));
        }

        let cumulative = CumulativeDistribution::build(&self.counts, &self.x_axis)?;
        tracing::debug!(
            "Built cumulative distribution for '{}' ({} bins, {} entries)",
            self.title,
            self.x_axis.bins(),
            self.entries
        );
        self.cumulative = Some(cumulative);
        Ok(())
    }

    /// Draw one value from the histogram shape, reporting failures
    ///
    /// Builds the cumulative distribution on first use. Later fills do not
    /// refresh it; call [`Histogram::build_cumulative`] for that.
    pub fn try_sample_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> HistoResult<f64> {
        if self.y_axis.is_some() {
            return Err(self.unsupported("sampling"));
        }
        if self.cumulative.is_none() {
            self.build_cumulative()?;
        }

        let fraction: f64 = rng.gen();
        self.cumulative
            .as_ref()
            .map(|cumulative| cumulative.invert(fraction))
            .ok_or(HistoError::EmptyDistribution { operation: "sample" })
    }

    /// Draw one value, yielding NaN when the histogram cannot be sampled
    pub fn sample_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        match self.try_sample_with(rng) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Cannot sample histogram '{}': {}", self.title, e);
                f64::NAN
            }
        }
    }

    /// Draw one value using the thread-local generator
    pub fn sample(&mut self) -> f64 {
        self.sample_with(&mut rand::thread_rng())
    }

    fn unsupported(&self, operation: &'static str) -> HistoError {
        HistoError::UnsupportedOperation {
            operation,
            dimensionality: self.dimensionality(),
        }
    }

    // ===== Labels =====

    pub fn set_axis_labels(&mut self, x_label: impl Into<String>, y_label: impl Into<String>) {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    // ===== Geometry and contents =====

    pub fn dimensionality(&self) -> Dimensionality {
        if self.y_axis.is_some() {
            Dimensionality::TwoD
        } else {
            Dimensionality::OneD
        }
    }

    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    pub fn y_axis(&self) -> Option<&Axis> {
        self.y_axis.as_ref()
    }

    /// Raw bin populations
    ///
    /// For 2D histograms this is the grid in row-major order, one row of
    /// x bins per y bin.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Rows of the 2D grid, bottom row first
    pub fn grid_rows(&self) -> Option<Chunks<'_, u64>> {
        self.y_axis
            .as_ref()
            .map(|_| self.counts.chunks(self.x_axis.bins()))
    }

    /// Population of one 2D cell
    pub fn grid_count(&self, ix: usize, iy: usize) -> Option<u64> {
        let y_axis = self.y_axis.as_ref()?;
        if ix >= self.x_axis.bins() || iy >= y_axis.bins() {
            return None;
        }
        Some(self.counts[iy * self.x_axis.bins() + ix])
    }

    pub fn bin_left_edges(&self) -> Vec<f64> {
        self.x_axis.left_edges()
    }

    /// Lower edges of the y bins (2D only)
    pub fn bin_bottom_edges(&self) -> Option<Vec<f64>> {
        self.y_axis.as_ref().map(Axis::left_edges)
    }

    /// Cumulative distribution, once built
    pub fn cumulative(&self) -> Option<&CumulativeDistribution> {
        self.cumulative.as_ref()
    }

    pub fn has_cumulative(&self) -> bool {
        self.cumulative.is_some()
    }

    // ===== Statistics =====

    /// Accepted fills (`ntot`)
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// All fills, including those outside the domain
    pub fn entries_including_overflows(&self) -> u64 {
        self.attempts
    }

    pub fn overflows(&self) -> u64 {
        self.attempts - self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    pub fn x_mean(&self) -> f64 {
        self.x_moments.mean()
    }

    pub fn x_rms(&self) -> f64 {
        self.x_moments.rms()
    }

    pub fn y_mean(&self) -> Option<f64> {
        self.y_axis.as_ref().map(|_| self.y_moments.mean())
    }

    pub fn y_rms(&self) -> Option<f64> {
        self.y_axis.as_ref().map(|_| self.y_moments.rms())
    }

    pub fn stats(&self) -> HistogramStats {
        HistogramStats {
            entries: self.entries,
            entries_including_overflows: self.attempts,
            x_mean: self.x_mean(),
            x_rms: self.x_rms(),
            y_mean: self.y_mean(),
            y_rms: self.y_rms(),
        }
    }
}
