//! flowlab-histo - hbook-style histograms for sensor data analysis
//!
//! This crate accumulates scalar or paired samples into fixed-width bins:
//!
//! - **Histogram**: 1D or 2D binning with overflow counting and running
//!   mean/RMS
//! - **CumulativeDistribution**: normalized running integral of a 1D
//!   histogram plus a lookup table for inverse-transform sampling
//! - **RenderSnapshot**: read-only data for plotting backends
//! - **HistogramBook**: a set of histograms booked from JSON or TOML
//!
//! Drawing, file input and CSV parsing belong to the caller.

pub mod axis;
pub mod book;
pub mod config;
pub mod cumulative;
pub mod error;
pub mod histogram;
pub mod moments;
pub mod render;

pub use axis::*;
pub use book::*;
pub use config::*;
pub use cumulative::*;
pub use error::*;
pub use histogram::*;
pub use moments::*;
pub use render::*;

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();
