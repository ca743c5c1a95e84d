//! Reference table of relative sustainability scores per distance band.
//!
//! Rows are keyed by band (a multiple of the step, in km) and hold one
//! optional 0-10 score per mode column. Missing cells read as `None` and
//! the scorer treats them as zero.

pub mod loader;

pub use loader::{load_table, load_table_from_reader, TableSchema};

use serde::Serialize;
use std::collections::BTreeMap;

pub const BAND_COLUMN: &str = "distance_km";
pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTable {
    step_km: u32,
    modes: Vec<String>,
    rows: BTreeMap<u32, Vec<Option<f64>>>,
    fingerprint: Option<String>,
}

/// Borrowed view of a single band's scores.
#[derive(Debug, Clone, Copy)]
pub struct ScoreRow<'a> {
    band_km: u32,
    modes: &'a [String],
    scores: &'a [Option<f64>],
}

impl ScoreRow<'_> {
    pub fn band_km(&self) -> u32 {
        self.band_km
    }

    pub fn score(&self, mode: &str) -> Option<f64> {
        self.modes
            .iter()
            .position(|column| column == mode)
            .and_then(|index| self.scores.get(index).copied().flatten())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSummary {
    pub rows: usize,
    pub modes: Vec<String>,
    pub step_km: u32,
    pub first_band_km: Option<u32>,
    pub last_band_km: Option<u32>,
    pub missing_bands: usize,
    pub fingerprint: Option<String>,
}

impl ScoreTable {
    /// A table with no rows; every lookup misses.
    pub fn empty(step_km: u32) -> Self {
        Self {
            step_km,
            modes: Vec::new(),
            rows: BTreeMap::new(),
            fingerprint: None,
        }
    }

    /// Builds a table from in-memory rows. Scores are clamped into 0-10 and
    /// non-finite values become missing; later duplicates of a band win.
    pub fn from_rows<I>(step_km: u32, modes: Vec<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = (u32, Vec<Option<f64>>)>,
    {
        let rows = rows
            .into_iter()
            .map(|(band_km, scores)| {
                let scores = scores
                    .into_iter()
                    .map(|score| score.and_then(normalize_score))
                    .collect();
                (band_km, scores)
            })
            .collect();
        Self {
            step_km,
            modes,
            rows,
            fingerprint: None,
        }
    }

    pub(crate) fn with_fingerprint(mut self, fingerprint: String) -> Self {
        self.fingerprint = Some(fingerprint);
        self
    }

    pub fn step_km(&self) -> u32 {
        self.step_km
    }

    pub fn modes(&self) -> &[String] {
        &self.modes
    }

    pub fn has_mode(&self, mode: &str) -> bool {
        self.modes.iter().any(|column| column == mode)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    pub fn row(&self, band_km: u32) -> Option<ScoreRow<'_>> {
        self.rows.get(&band_km).map(|scores| ScoreRow {
            band_km,
            modes: &self.modes,
            scores,
        })
    }

    /// Number of step multiples in `0..=max_band_km` without a row.
    pub fn missing_bands(&self, max_band_km: u32) -> usize {
        if self.step_km == 0 {
            return 0;
        }
        (0..=max_band_km)
            .step_by(self.step_km as usize)
            .filter(|band| !self.rows.contains_key(band))
            .count()
    }

    pub fn summary(&self, max_band_km: u32) -> TableSummary {
        TableSummary {
            rows: self.len(),
            modes: self.modes.clone(),
            step_km: self.step_km,
            first_band_km: self.rows.keys().next().copied(),
            last_band_km: self.rows.keys().next_back().copied(),
            missing_bands: self.missing_bands(max_band_km),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

pub(crate) fn normalize_score(score: f64) -> Option<f64> {
    score
        .is_finite()
        .then(|| score.clamp(MIN_SCORE, MAX_SCORE))
}
