pub mod json;
pub mod md;

use crate::batch::{BatchReport, TripScore};
use crate::error::SuscoinError;
use crate::table::TableSummary;
use crate::types::emission::EmissionFactors;
use crate::types::rules::{DistanceRule, ModeRules};
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeInfo {
    pub mode: String,
    pub factor_g_per_km: f64,
    pub rules: Vec<DistanceRule>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeListing {
    pub baseline_mode: String,
    pub fallback_mode: String,
    pub modes: Vec<ModeInfo>,
}

impl ModeListing {
    pub fn new(factors: &EmissionFactors, rules: &ModeRules) -> Self {
        Self {
            baseline_mode: factors.baseline_mode().to_string(),
            fallback_mode: factors.fallback_mode().to_string(),
            modes: factors
                .iter()
                .map(|(mode, factor)| ModeInfo {
                    mode: mode.to_string(),
                    factor_g_per_km: factor,
                    rules: rules.for_mode(mode).to_vec(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableReport {
    pub source: String,
    #[serde(flatten)]
    pub summary: TableSummary,
}

pub fn render_trip(trip: &TripScore, format: OutputFormat) -> Result<String, SuscoinError> {
    match format {
        OutputFormat::Json => json::to_json(trip).map_err(SuscoinError::Json),
        OutputFormat::Md => Ok(md::trip_to_markdown(trip)),
    }
}

pub fn render_modes(listing: &ModeListing, format: OutputFormat) -> Result<String, SuscoinError> {
    match format {
        OutputFormat::Json => json::to_json(listing).map_err(SuscoinError::Json),
        OutputFormat::Md => Ok(md::modes_to_markdown(listing)),
    }
}

pub fn render_table(report: &TableReport, format: OutputFormat) -> Result<String, SuscoinError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SuscoinError::Json),
        OutputFormat::Md => Ok(md::table_to_markdown(report)),
    }
}

pub fn render_batch(report: &BatchReport, format: OutputFormat) -> Result<String, SuscoinError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(SuscoinError::Json),
        OutputFormat::Md => Ok(md::batch_to_markdown(report)),
    }
}
