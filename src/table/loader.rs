use super::{normalize_score, ScoreTable, BAND_COLUMN, MAX_SCORE, MIN_SCORE};
use crate::error::ResourceLoadError;
use crate::types::config::EconomySettings;
use crate::types::emission::EmissionFactors;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Shape a score table resource must have.
#[derive(Debug, Clone, PartialEq)]
pub struct TableSchema {
    pub band_column: String,
    pub step_km: u32,
    pub max_band_km: u32,
    pub known_modes: BTreeSet<String>,
}

impl TableSchema {
    pub fn new(economy: EconomySettings, factors: &EmissionFactors) -> Self {
        Self {
            band_column: BAND_COLUMN.to_string(),
            step_km: economy.step_km,
            max_band_km: economy.max_band_km,
            known_modes: factors.modes().map(str::to_string).collect(),
        }
    }
}

pub fn load_table(path: &Path, schema: &TableSchema) -> Result<ScoreTable, ResourceLoadError> {
    let source = path.display().to_string();
    if !path.exists() {
        return Err(ResourceLoadError::NotFound(source));
    }
    let bytes = std::fs::read(path).map_err(|source_err| ResourceLoadError::Unreadable {
        path: source.clone(),
        source: source_err,
    })?;
    parse_bytes(&bytes, &source, schema)
}

/// Loads a table from any reader; `source` names it in errors and logs.
pub fn load_table_from_reader<R: Read>(
    mut reader: R,
    source: &str,
    schema: &TableSchema,
) -> Result<ScoreTable, ResourceLoadError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source_err| ResourceLoadError::Unreadable {
            path: source.to_string(),
            source: source_err,
        })?;
    parse_bytes(&bytes, source, schema)
}

fn parse_bytes(
    bytes: &[u8],
    source: &str,
    schema: &TableSchema,
) -> Result<ScoreTable, ResourceLoadError> {
    if schema.step_km == 0 {
        return Err(ResourceLoadError::Malformed(format!(
            "{source}: band step must be greater than 0"
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| ResourceLoadError::Malformed(format!("{source}: {e}")))?
        .clone();
    let mut columns = headers.iter();
    match columns.next() {
        None => return Err(ResourceLoadError::Empty(source.to_string())),
        Some(column) if column == schema.band_column => {}
        Some(other) => {
            return Err(ResourceLoadError::Malformed(format!(
                "{source}: first column must be '{}' (found '{other}')",
                schema.band_column
            )));
        }
    }

    let modes = columns.map(str::to_string).collect::<Vec<_>>();
    validate_mode_columns(&modes, source, schema)?;

    let mut rows = BTreeMap::new();
    let mut missing_cells = 0usize;
    let mut clamped_cells = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| ResourceLoadError::Malformed(format!("{source}: {e}")))?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);
        let raw_band = record.get(0).unwrap_or_default();
        let band_km = parse_band(raw_band, schema)
            .map_err(|reason| ResourceLoadError::Malformed(format!("{source}:{line}: {reason}")))?;

        let scores = record
            .iter()
            .skip(1)
            .map(|cell| match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
                        clamped_cells += 1;
                    }
                    normalize_score(value)
                }
                _ => {
                    missing_cells += 1;
                    None
                }
            })
            .collect::<Vec<_>>();

        if rows.insert(band_km, scores).is_some() {
            return Err(ResourceLoadError::Malformed(format!(
                "{source}:{line}: duplicate band {band_km}"
            )));
        }
    }

    if rows.is_empty() {
        return Err(ResourceLoadError::Empty(source.to_string()));
    }

    let table = ScoreTable::from_rows(schema.step_km, modes, rows)
        .with_fingerprint(sha256_hex(bytes));

    if missing_cells > 0 {
        debug!(source, missing_cells, "non-numeric score cells read as 0");
    }
    if clamped_cells > 0 {
        warn!(source, clamped_cells, "score cells outside 0-10 were clamped");
    }
    let missing_bands = table.missing_bands(schema.max_band_km);
    if missing_bands > 0 {
        warn!(
            source,
            missing_bands,
            max_band_km = schema.max_band_km,
            "score table does not cover every band; lookups there score zero"
        );
    }
    info!(
        source,
        rows = table.len(),
        modes = table.modes().len(),
        fingerprint = table.fingerprint().unwrap_or_default(),
        "score table loaded"
    );

    Ok(table)
}

fn validate_mode_columns(
    modes: &[String],
    source: &str,
    schema: &TableSchema,
) -> Result<(), ResourceLoadError> {
    if modes.is_empty() {
        return Err(ResourceLoadError::Malformed(format!(
            "{source}: no mode columns after '{}'",
            schema.band_column
        )));
    }

    let mut seen = HashSet::new();
    for mode in modes {
        if mode.is_empty() {
            return Err(ResourceLoadError::Malformed(format!(
                "{source}: empty mode column name"
            )));
        }
        if !schema.known_modes.contains(mode) {
            return Err(ResourceLoadError::Malformed(format!(
                "{source}: unknown mode column '{mode}'"
            )));
        }
        if !seen.insert(mode.as_str()) {
            return Err(ResourceLoadError::Malformed(format!(
                "{source}: duplicate mode column '{mode}'"
            )));
        }
    }
    Ok(())
}

fn parse_band(raw: &str, schema: &TableSchema) -> Result<u32, String> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| format!("band '{raw}' is not a number"))?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(format!("band '{raw}' must be a non-negative integer"));
    }
    if value > f64::from(schema.max_band_km) {
        return Err(format!(
            "band {raw} exceeds the maximum band {}",
            schema.max_band_km
        ));
    }
    let band_km = value as u32;
    if band_km % schema.step_km != 0 {
        return Err(format!(
            "band {band_km} is not a multiple of {}",
            schema.step_km
        ));
    }
    Ok(band_km)
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:x}")
}
