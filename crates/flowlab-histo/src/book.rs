//! A book of histograms addressed by title
//!
//! Keeps histograms in booking order so they can be rendered in the same
//! order they were defined.

use crate::config::BookConfig;
use crate::error::{HistoError, HistoResult};
use crate::histogram::Histogram;
use crate::render::{PaneLayout, RenderSnapshot};

/// Ordered collection of uniquely titled histograms
#[derive(Debug, Clone, Default)]
pub struct HistogramBook {
    histograms: Vec<Histogram>,
}

impl HistogramBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book every histogram in a definition set
    pub fn from_config(config: &BookConfig) -> HistoResult<Self> {
        config.validate()?;
        let mut book = Self::new();
        for definition in &config.histograms {
            book.insert(definition.build()?)?;
        }
        Ok(book)
    }

    /// Add a histogram, rejecting a title that is already booked
    pub fn insert(&mut self, histogram: Histogram) -> HistoResult<()> {
        if self.contains(histogram.title()) {
            return Err(HistoError::DuplicateHistogram {
                title: histogram.title().to_string(),
            });
        }
        self.histograms.push(histogram);
        Ok(())
    }

    pub fn contains(&self, title: &str) -> bool {
        self.histograms.iter().any(|h| h.title() == title)
    }

    pub fn get(&self, title: &str) -> Option<&Histogram> {
        self.histograms.iter().find(|h| h.title() == title)
    }

    pub fn get_mut(&mut self, title: &str) -> Option<&mut Histogram> {
        self.histograms.iter_mut().find(|h| h.title() == title)
    }

    fn require_mut(&mut self, title: &str) -> HistoResult<&mut Histogram> {
        self.get_mut(title)
            .ok_or_else(|| HistoError::UnknownHistogram {
                title: title.to_string(),
            })
    }

    /// Fill one histogram with an x value
    pub fn fill(&mut self, title: &str, x: f64) -> HistoResult<()> {
        self.require_mut(title)?.fill(x);
        Ok(())
    }

    /// Fill one histogram with an (x, y) pair
    pub fn fill_xy(&mut self, title: &str, x: f64, y: f64) -> HistoResult<()> {
        self.require_mut(title)?.fill_xy(x, y);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Histogram> {
        self.histograms.iter()
    }

    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }

    /// One solo snapshot per histogram, in booking order
    pub fn snapshots(&self) -> Vec<RenderSnapshot> {
        self.histograms
            .iter()
            .map(RenderSnapshot::from_histogram)
            .collect()
    }

    /// Snapshots laid out as panes of a single `rows` x `columns` figure
    pub fn grid_snapshots(&self, rows: u32, columns: u32) -> Vec<RenderSnapshot> {
        self.histograms
            .iter()
            .enumerate()
            .map(|(i, h)| {
                RenderSnapshot::from_histogram(h)
                    .with_layout(PaneLayout::grid(rows, columns, i as u32 + 1))
            })
            .collect()
    }
}
