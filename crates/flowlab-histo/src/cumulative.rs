//! Cumulative distribution and inverse-transform lookup table
//!
//! The cumulative array is the running sum of bin populations divided by
//! the total, so it climbs to exactly 1.0 at the last bin. From it we
//! derive a table of [`PROBABILITY_SLOTS`] x positions: slot `k` holds the
//! point on the axis where the integrated population first reaches
//! `(k + 1) / PROBABILITY_SLOTS`. The distribution inside a single bin is
//! treated as flat, so positions are interpolated linearly across the bin.
//!
//! Drawing a value then reduces to throwing a flat random number in
//! `[0, 1)` and interpolating between neighbouring table entries.

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::{HistoError, HistoResult};

/// Number of uniformly spaced probability thresholds in the lookup table
pub const PROBABILITY_SLOTS: usize = 100;

/// Normalized running integral of a 1D histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeDistribution {
    /// Cumulative fraction up to the right edge of each bin
    values: Vec<f64>,
    /// x position reaching each probability threshold
    quantiles: Vec<f64>,
    min: f64,
    max: f64,
}

impl CumulativeDistribution {
    /// Integrate bin populations over `axis`
    ///
    /// Time complexity: O(bins + PROBABILITY_SLOTS)
    pub fn build(counts: &[u64], axis: &Axis) -> HistoResult<Self> {
        debug_assert_eq!(counts.len(), axis.bins());

        let mut running = 0u64;
        let mut values: Vec<f64> = counts
            .iter()
            .map(|&c| {
                running += c;
                running as f64
            })
            .collect();

        if running == 0 {
            return Err(HistoError::EmptyDistribution {
                operation: "build a cumulative distribution",
            });
        }

        let total = running as f64;
        for v in values.iter_mut() {
            *v /= total;
        }

        let quantiles = quantile_table(&values, axis);

        Ok(Self {
            values,
            quantiles,
            min: axis.min(),
            max: axis.max(),
        })
    }

    /// Cumulative fraction at the right edge of each bin
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// x positions for probabilities 0.01, 0.02, ..., 1.00
    pub fn quantile_table(&self) -> &[f64] {
        &self.quantiles
    }

    /// Map a flat fraction in `[0, 1)` onto the axis
    ///
    /// The first slot interpolates up from the domain minimum; fractions
    /// past the end of the table saturate at the domain maximum.
    pub fn invert(&self, fraction: f64) -> f64 {
        let scaled = fraction * PROBABILITY_SLOTS as f64;
        let slot = scaled.floor();
        let within = scaled - slot;

        if slot.is_nan() || slot >= PROBABILITY_SLOTS as f64 {
            return self.max;
        }
        if slot < 1.0 {
            let first = self.quantiles[0];
            return self.min + (first - self.min) * within.max(0.0);
        }

        let slot = slot as usize;
        let lower = self.quantiles[slot - 1];
        let upper = self.quantiles[slot];
        lower + (upper - lower) * within
    }
}

/// Forward-only scan pairing each probability threshold with a bin
///
/// Thresholds rise monotonically, so the bin cursor never moves back and
/// the whole table costs one pass over the bins.
fn quantile_table(values: &[f64], axis: &Axis) -> Vec<f64> {
    let mut table = Vec::with_capacity(PROBABILITY_SLOTS);
    let mut bin = 0usize;

    for k in 1..=PROBABILITY_SLOTS {
        let threshold = k as f64 / PROBABILITY_SLOTS as f64;

        while bin + 1 < values.len() && values[bin] < threshold {
            bin += 1;
        }

        let right = values[bin];
        let left = if bin > 0 { values[bin - 1] } else { 0.0 };
        let fraction = if right > left {
            ((threshold - left) / (right - left)).clamp(0.0, 1.0)
        } else {
            1.0
        };

        let x = axis.min() + axis.width() * (bin as f64 + fraction);
        table.push(x.min(axis.max()));
    }

    table
}
