//! Scores a CSV of trips (`mode,distance_km`) against one scorer snapshot.

use crate::error::{Result, SuscoinError};
use crate::scorer::Scorer;
use crate::types::outcome::Assessment;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub mode: String,
    pub distance_km: f64,
}

#[derive(Debug, Deserialize)]
struct TripRow {
    mode: String,
    distance_km: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripScore {
    pub mode: String,
    pub input_km: f64,
    pub assessment: Assessment,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTotals {
    pub trips: usize,
    pub scored: usize,
    pub not_viable: usize,
    pub coins: u64,
    pub co2e_saved_kg: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub version: String,
    pub generated_at: String,
    pub table_fingerprint: Option<String>,
    pub baseline_mode: String,
    pub totals: BatchTotals,
    pub trips: Vec<TripScore>,
}

impl BatchReport {
    pub fn score(scorer: &Scorer, trips: &[Trip]) -> Self {
        let mut totals = BatchTotals::default();
        let scored = trips
            .iter()
            .map(|trip| {
                let assessment = scorer.assess(&trip.mode, trip.distance_km);
                let result = assessment.result();
                totals.trips += 1;
                if assessment.is_viable() {
                    totals.scored += 1;
                } else {
                    totals.not_viable += 1;
                }
                totals.coins += result.coins;
                totals.co2e_saved_kg += result.co2e_saved_kg;
                TripScore {
                    mode: trip.mode.clone(),
                    input_km: trip.distance_km,
                    assessment,
                }
            })
            .collect();
        totals.co2e_saved_kg = (totals.co2e_saved_kg * 100.0).round() / 100.0;

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            table_fingerprint: scorer.table().fingerprint().map(str::to_string),
            baseline_mode: scorer.baseline_mode().to_string(),
            totals,
            trips: scored,
        }
    }
}

pub fn read_trips(path: &Path) -> Result<Vec<Trip>> {
    if !path.exists() {
        return Err(SuscoinError::TripFile(format!(
            "{}: file not found",
            path.display()
        )));
    }
    let file = fs::File::open(path)?;
    read_trips_from_reader(file, &path.display().to_string())
}

/// Unparseable distances are kept as NaN so they score as invalid input
/// instead of aborting the batch.
pub fn read_trips_from_reader<R: Read>(reader: R, source: &str) -> Result<Vec<Trip>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut trips = Vec::new();
    for row in reader.deserialize::<TripRow>() {
        let row = row.map_err(|e| SuscoinError::TripFile(format!("{source}: {e}")))?;
        trips.push(Trip {
            mode: row.mode,
            distance_km: row.distance_km.parse().unwrap_or(f64::NAN),
        });
    }
    Ok(trips)
}

pub fn write_report(path: &Path, report: &BatchReport) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(SuscoinError::Io)?;
    }
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).map_err(SuscoinError::Io)?;
    Ok(path.to_path_buf())
}
