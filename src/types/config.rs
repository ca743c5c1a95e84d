use crate::error::SuscoinError;
use crate::scorer::ScorerSettings;
use crate::types::emission::{EmissionFactors, DEFAULT_BASELINE_MODE, DEFAULT_FALLBACK_MODE};
use crate::types::rules::{DistanceRule, ModeRules};
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};

pub const DEFAULT_TABLE_PATH: &str = "data/transport_scores_0to2500km_step5.csv";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuscoinConfig {
    pub table: Option<TableConfig>,
    pub economy: Option<EconomyConfig>,
    pub emissions: Option<EmissionsConfig>,
    pub rules: Option<Vec<RuleConfig>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EconomyConfig {
    pub step_km: Option<u32>,
    pub max_band_km: Option<u32>,
    pub coin_per_band: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmissionsConfig {
    pub baseline_mode: Option<String>,
    pub fallback_mode: Option<String>,
    /// Merged over the built-in factors.
    #[serde(default)]
    pub factors: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub modes: Vec<String>,
    pub min_km: Option<f64>,
    pub max_km: Option<f64>,
    pub cap_km: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EconomySettings {
    pub step_km: u32,
    pub max_band_km: u32,
    pub coin_per_band: f64,
}

impl Default for EconomySettings {
    fn default() -> Self {
        Self {
            step_km: 5,
            max_band_km: 2500,
            coin_per_band: 1.0,
        }
    }
}

impl SuscoinConfig {
    pub fn table_path(&self) -> &str {
        self.table
            .as_ref()
            .and_then(|table| table.path.as_deref())
            .unwrap_or(DEFAULT_TABLE_PATH)
    }

    pub fn economy(&self) -> EconomySettings {
        let defaults = EconomySettings::default();
        match &self.economy {
            Some(economy) => EconomySettings {
                step_km: economy.step_km.unwrap_or(defaults.step_km),
                max_band_km: economy.max_band_km.unwrap_or(defaults.max_band_km),
                coin_per_band: economy.coin_per_band.unwrap_or(defaults.coin_per_band),
            },
            None => defaults,
        }
    }

    pub fn emission_factors(&self) -> Result<EmissionFactors, SuscoinError> {
        let Some(emissions) = &self.emissions else {
            return Ok(EmissionFactors::default());
        };

        let mut factors = EmissionFactors::default()
            .iter()
            .map(|(mode, factor)| (mode.to_string(), factor))
            .collect::<BTreeMap<_, _>>();
        let mut configured = HashSet::new();
        for (mode, factor) in &emissions.factors {
            let normalized = mode.trim();
            if normalized.is_empty() {
                return Err(SuscoinError::ConfigParse(
                    "emissions.factors keys must be non-empty mode names".to_string(),
                ));
            }
            if !configured.insert(normalized) {
                return Err(SuscoinError::ConfigParse(format!(
                    "emissions.factors has duplicate mode '{normalized}' after trimming"
                )));
            }
            factors.insert(normalized.to_string(), *factor);
        }

        EmissionFactors::new(
            factors,
            emissions
                .baseline_mode
                .as_deref()
                .unwrap_or(DEFAULT_BASELINE_MODE),
            emissions
                .fallback_mode
                .as_deref()
                .unwrap_or(DEFAULT_FALLBACK_MODE),
        )
    }

    /// Configured rules replace the standard set entirely.
    pub fn mode_rules(&self) -> ModeRules {
        let Some(configured) = &self.rules else {
            return ModeRules::standard();
        };

        let mut rules = ModeRules::new();
        for rule in configured {
            for mode in &rule.modes {
                let mode = mode.trim();
                if let Some(min_km) = rule.min_km {
                    rules.push(mode, DistanceRule::MinimumKm(min_km));
                }
                if let Some(max_km) = rule.max_km {
                    rules.push(mode, DistanceRule::MaximumKm(max_km));
                }
                if let Some(cap_km) = rule.cap_km {
                    rules.push(mode, DistanceRule::CapKm(cap_km));
                }
            }
        }
        rules
    }

    pub fn validate(&self) -> Result<(), SuscoinError> {
        let economy = self.economy();
        if economy.step_km == 0 {
            return Err(SuscoinError::ConfigParse(
                "economy.step_km must be greater than 0".to_string(),
            ));
        }
        if economy.max_band_km % economy.step_km != 0 {
            return Err(SuscoinError::ConfigParse(format!(
                "economy.max_band_km must be a multiple of economy.step_km ({} is not a multiple of {})",
                economy.max_band_km, economy.step_km
            )));
        }
        if !economy.coin_per_band.is_finite() || economy.coin_per_band < 0.0 {
            return Err(SuscoinError::ConfigParse(
                "economy.coin_per_band must be a finite non-negative number".to_string(),
            ));
        }

        if self.table_path().trim().is_empty() {
            return Err(SuscoinError::ConfigParse(
                "table.path must not be empty".to_string(),
            ));
        }

        let factors = self.emission_factors()?;
        if let Some(rules) = &self.rules {
            validate_rules(rules, &factors)?;
        }

        Ok(())
    }

    pub fn scorer_settings(&self) -> Result<ScorerSettings, SuscoinError> {
        self.validate()?;
        Ok(ScorerSettings {
            economy: self.economy(),
            factors: self.emission_factors()?,
            rules: self.mode_rules(),
        })
    }
}

fn validate_rules(rules: &[RuleConfig], factors: &EmissionFactors) -> Result<(), SuscoinError> {
    for (index, rule) in rules.iter().enumerate() {
        if rule.modes.is_empty() {
            return Err(SuscoinError::ConfigParse(format!(
                "rules[{index}].modes must name at least one mode"
            )));
        }
        let mut seen = HashSet::new();
        for mode in &rule.modes {
            let normalized = mode.trim();
            if !factors.contains(normalized) {
                return Err(SuscoinError::ConfigParse(format!(
                    "rules[{index}] references unknown mode '{normalized}'"
                )));
            }
            if !seen.insert(normalized) {
                return Err(SuscoinError::ConfigParse(format!(
                    "rules[{index}].modes contains duplicate mode '{normalized}'"
                )));
            }
        }

        let bounds = [
            ("min_km", rule.min_km),
            ("max_km", rule.max_km),
            ("cap_km", rule.cap_km),
        ];
        if bounds.iter().all(|(_, value)| value.is_none()) {
            return Err(SuscoinError::ConfigParse(format!(
                "rules[{index}] must set at least one of min_km, max_km, cap_km"
            )));
        }
        for (field, value) in bounds {
            if let Some(value) = value {
                if !value.is_finite() || value <= 0.0 {
                    return Err(SuscoinError::ConfigParse(format!(
                        "rules[{index}].{field} must be a finite number greater than 0"
                    )));
                }
            }
        }
        if let (Some(min_km), Some(max_km)) = (rule.min_km, rule.max_km) {
            if min_km >= max_km {
                return Err(SuscoinError::ConfigParse(format!(
                    "rules[{index}].min_km must be less than max_km"
                )));
            }
        }
        if let (Some(cap_km), Some(min_km)) = (rule.cap_km, rule.min_km) {
            if cap_km < min_km {
                return Err(SuscoinError::ConfigParse(format!(
                    "rules[{index}].cap_km must not be below min_km"
                )));
            }
        }
        if let (Some(cap_km), Some(max_km)) = (rule.cap_km, rule.max_km) {
            if cap_km > max_km {
                return Err(SuscoinError::ConfigParse(format!(
                    "rules[{index}].cap_km must not exceed max_km"
                )));
            }
        }
    }

    Ok(())
}
