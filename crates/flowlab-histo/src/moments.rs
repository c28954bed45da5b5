//! Running first and second moments
//!
//! Mean and RMS are refreshed on every push so they can be read at any
//! time without rescanning the accepted samples.

use serde::{Deserialize, Serialize};

/// Sum and sum-of-squares accumulator with cached mean and RMS
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunningMoments {
    count: u64,
    sum: f64,
    sum_sq: f64,
    mean: f64,
    rms: f64,
}

impl RunningMoments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate one value and refresh mean and RMS
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_sq += value * value;
        self.refresh();
    }

    /// Fold another accumulator into this one
    pub fn merge(&mut self, other: &RunningMoments) {
        self.count += other.count;
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.refresh();
    }

    fn refresh(&mut self) {
        if self.count == 0 {
            self.mean = 0.0;
            self.rms = 0.0;
            return;
        }
        let n = self.count as f64;
        self.mean = self.sum / n;
        let mean_square = self.sum_sq / n;
        // abs() absorbs rounding residue that would go slightly negative
        self.rms = (mean_square - self.mean * self.mean).abs().sqrt();
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn sum_of_squares(&self) -> f64 {
        self.sum_sq
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Population standard deviation of the accumulated values
    pub fn rms(&self) -> f64 {
        self.rms
    }
}
