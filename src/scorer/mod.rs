//! Converts a travel mode and distance into a sustainability score, a coin
//! reward and the CO2e saved relative to the baseline mode.
//!
//! Scoring is pure: a [`Scorer`] owns an immutable [`ScoreTable`] and its
//! settings, and every input maps to an [`Assessment`]. Infeasible trips
//! (bad distances, unknown modes, distance rules, table misses) come back
//! as `NotViable` rather than errors.

pub mod shared;

pub use shared::SharedScorer;

use crate::table::{ScoreTable, TableSchema};
use crate::types::config::EconomySettings;
use crate::types::emission::EmissionFactors;
use crate::types::outcome::{Assessment, NotViableReason, ScoreResult};
use crate::types::rules::{ModeRules, RuleDecision};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct ScorerSettings {
    pub economy: EconomySettings,
    pub factors: EmissionFactors,
    pub rules: ModeRules,
}

impl Default for ScorerSettings {
    fn default() -> Self {
        Self {
            economy: EconomySettings::default(),
            factors: EmissionFactors::default(),
            rules: ModeRules::standard(),
        }
    }
}

impl ScorerSettings {
    pub fn table_schema(&self) -> TableSchema {
        TableSchema::new(self.economy, &self.factors)
    }
}

#[derive(Debug, Clone)]
pub struct Scorer {
    table: Arc<ScoreTable>,
    settings: ScorerSettings,
}

impl Scorer {
    pub fn new(table: Arc<ScoreTable>, settings: ScorerSettings) -> Self {
        Self { table, settings }
    }

    pub fn table(&self) -> &ScoreTable {
        &self.table
    }

    pub fn settings(&self) -> &ScorerSettings {
        &self.settings
    }

    pub fn emission_factors(&self) -> &EmissionFactors {
        &self.settings.factors
    }

    pub fn baseline_mode(&self) -> &str {
        self.settings.factors.baseline_mode()
    }

    pub fn is_known_mode(&self, mode: &str) -> bool {
        self.settings.factors.contains(mode) || self.table.has_mode(mode)
    }

    pub fn band_km(&self, distance_km: f64) -> u32 {
        band_km(
            distance_km,
            self.settings.economy.step_km,
            self.settings.economy.max_band_km,
        )
    }

    /// Zero-shaped result for any trip that cannot be scored.
    pub fn score_transport(&self, mode: &str, distance_km: f64) -> ScoreResult {
        self.assess(mode, distance_km).result()
    }

    pub fn assess(&self, mode: &str, distance_km: f64) -> Assessment {
        if !distance_km.is_finite() || distance_km <= 0.0 {
            return Assessment::NotViable {
                reason: NotViableReason::InvalidDistance,
                distance_km: 0,
            };
        }
        if !self.is_known_mode(mode) {
            return Assessment::NotViable {
                reason: NotViableReason::UnknownMode,
                distance_km: self.band_km(distance_km),
            };
        }

        let effective_km = match self.settings.rules.apply(mode, distance_km) {
            RuleDecision::Proceed { effective_km } => effective_km,
            RuleDecision::NotViable {
                reason,
                reported_km,
            } => {
                debug!(mode, distance_km, %reason, "trip not viable");
                return Assessment::NotViable {
                    reason,
                    distance_km: self.band_km(reported_km),
                };
            }
        };

        let band = self.band_km(effective_km);
        let Some(row) = self.table.row(band) else {
            debug!(mode, band, "no score table row for band");
            return Assessment::NotViable {
                reason: NotViableReason::NoTableRow,
                distance_km: band,
            };
        };

        let score = row.score(mode).unwrap_or(0.0);
        let result = ScoreResult {
            score,
            coins: coins_for(score, band, self.settings.economy),
            co2e_saved_kg: co2e_saved_kg(&self.settings.factors, mode, band),
            distance_km: band,
        };
        debug!(
            mode,
            distance_km,
            band,
            score,
            coins = result.coins,
            co2e_saved_kg = result.co2e_saved_kg,
            "trip scored"
        );
        Assessment::Scored(result)
    }
}

/// Nearest multiple of `step_km`, capped at `max_band_km`. Non-positive and
/// non-finite distances band to 0.
pub fn band_km(distance_km: f64, step_km: u32, max_band_km: u32) -> u32 {
    if step_km == 0 || !distance_km.is_finite() || distance_km <= 0.0 {
        return 0;
    }
    let step = f64::from(step_km);
    let capped = distance_km.min(f64::from(max_band_km));
    ((capped / step).round() * step) as u32
}

fn coins_for(score: f64, band: u32, economy: EconomySettings) -> u64 {
    if economy.step_km == 0 {
        return 0;
    }
    let bands = f64::from(band) / f64::from(economy.step_km);
    let coins = (score * bands * economy.coin_per_band).round();
    if coins.is_finite() && coins > 0.0 {
        coins as u64
    } else {
        0
    }
}

/// Savings never go negative for modes dirtier than the baseline.
fn co2e_saved_kg(factors: &EmissionFactors, mode: &str, band: u32) -> f64 {
    let saved_g = (factors.baseline_factor() - factors.factor_or_fallback(mode)).max(0.0)
        * f64::from(band);
    (saved_g / 1000.0 * 100.0).round() / 100.0
}
