//! Histogram definitions
//!
//! Analysis runs usually book a fixed set of histograms up front. These
//! serde structs describe them so the set can live in a JSON or TOML file:
//!
//! ```toml
//! [[histograms]]
//! title = "1. p0 - p1, Pascals"
//! x = { bins = 1401, min = -2.0, max = 12.0 }
//! x_label = "p0 - p1"
//! y_label = "N"
//! ```

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::error::{HistoError, HistoResult};
use crate::histogram::{Histogram, DEFAULT_TITLE, DEFAULT_X_LABEL, DEFAULT_Y_LABEL};

/// Bin count and domain of one axis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct AxisSpec {
    pub bins: u32,
    pub min: f64,
    pub max: f64,
}

impl AxisSpec {
    pub fn new(bins: u32, min: f64, max: f64) -> Self {
        Self { bins, min, max }
    }

    pub fn to_axis(&self) -> HistoResult<Axis> {
        Axis::new(self.bins as usize, self.min, self.max)
    }
}

impl Default for AxisSpec {
    fn default() -> Self {
        Self {
            bins: 10,
            min: 0.0,
            max: 100.0,
        }
    }
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_x_label() -> String {
    DEFAULT_X_LABEL.to_string()
}

fn default_y_label() -> String {
    DEFAULT_Y_LABEL.to_string()
}

/// Definition of a single histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct HistogramConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub x: AxisSpec,
    /// Present for a 2D scatter histogram
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<AxisSpec>,
    #[serde(default = "default_x_label")]
    pub x_label: String,
    #[serde(default = "default_y_label")]
    pub y_label: String,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x: AxisSpec::default(),
            y: None,
            x_label: default_x_label(),
            y_label: default_y_label(),
        }
    }
}

impl HistogramConfig {
    /// 1D definition with default labels
    pub fn one_d(title: impl Into<String>, bins: u32, min: f64, max: f64) -> Self {
        Self {
            title: title.into(),
            x: AxisSpec::new(bins, min, max),
            ..Self::default()
        }
    }

    /// 2D definition with default labels
    pub fn two_d(title: impl Into<String>, x: AxisSpec, y: AxisSpec) -> Self {
        Self {
            title: title.into(),
            x,
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    /// Load a definition from a JSON string
    pub fn from_json(json_str: &str) -> HistoResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize the definition to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a definition from a TOML string
    pub fn from_toml(toml_str: &str) -> HistoResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize the definition to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check bin counts and domain bounds
    pub fn validate(&self) -> HistoResult<()> {
        self.x
            .to_axis()
            .map_err(|e| prefix_axis_error("x", e))?;
        if let Some(y) = &self.y {
            y.to_axis().map_err(|e| prefix_axis_error("y", e))?;
        }
        Ok(())
    }

    /// Create the labelled histogram this definition describes
    pub fn build(&self) -> HistoResult<Histogram> {
        let x_axis = self.x.to_axis().map_err(|e| prefix_axis_error("x", e))?;
        let y_axis = match &self.y {
            Some(y) => Some(y.to_axis().map_err(|e| prefix_axis_error("y", e))?),
            None => None,
        };
        let mut histogram = Histogram::new(self.title.clone(), x_axis, y_axis);
        histogram.set_axis_labels(self.x_label.clone(), self.y_label.clone());
        Ok(histogram)
    }
}

fn prefix_axis_error(axis: &str, err: HistoError) -> HistoError {
    match err {
        HistoError::InvalidConfiguration { message } => HistoError::InvalidConfiguration {
            message: format!("{} axis: {}", axis, message),
        },
        other => other,
    }
}

/// A set of histogram definitions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookConfig {
    #[serde(default)]
    pub histograms: Vec<HistogramConfig>,
}

impl BookConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json_str: &str) -> HistoResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_toml(toml_str: &str) -> HistoResult<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate every definition and reject repeated titles
    pub fn validate(&self) -> HistoResult<()> {
        for (i, config) in self.histograms.iter().enumerate() {
            config.validate()?;
            if self.histograms[..i].iter().any(|c| c.title == config.title) {
                return Err(HistoError::DuplicateHistogram {
                    title: config.title.clone(),
                });
            }
        }
        Ok(())
    }
}
