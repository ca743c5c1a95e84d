use crate::error::SuscoinError;
use serde::Serialize;
use std::collections::BTreeMap;

pub const DEFAULT_BASELINE_MODE: &str = "car (solo/taxi)";
pub const DEFAULT_FALLBACK_MODE: &str = "bike";

/// Approximate grams CO2e per passenger-km.
pub const DEFAULT_FACTORS_G_PER_KM: [(&str, f64); 14] = [
    ("car (solo/taxi)", 171.0),
    ("rideshare pooled", 120.0),
    ("bus (city)", 96.0),
    ("bus (coach)", 27.0),
    ("train (city)", 41.0),
    ("train (intercity)", 29.0),
    ("tram/metro", 28.0),
    ("ferry", 115.0),
    ("bike", 0.0),
    ("walking", 0.0),
    ("e-bike", 5.0),
    ("e-scooter", 10.0),
    ("plane (domestic)", 255.0),
    ("plane (intl)", 195.0),
];

/// Emission intensity per mode, plus the baseline used for savings and the
/// mode whose factor stands in for modes without an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmissionFactors {
    factors: BTreeMap<String, f64>,
    baseline_mode: String,
    fallback_mode: String,
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            factors: DEFAULT_FACTORS_G_PER_KM
                .iter()
                .map(|(mode, factor)| ((*mode).to_string(), *factor))
                .collect(),
            baseline_mode: DEFAULT_BASELINE_MODE.to_string(),
            fallback_mode: DEFAULT_FALLBACK_MODE.to_string(),
        }
    }
}

impl EmissionFactors {
    pub fn new(
        factors: BTreeMap<String, f64>,
        baseline_mode: impl Into<String>,
        fallback_mode: impl Into<String>,
    ) -> Result<Self, SuscoinError> {
        let baseline_mode = baseline_mode.into();
        let fallback_mode = fallback_mode.into();

        if let Some((mode, factor)) = factors
            .iter()
            .find(|(_, factor)| !factor.is_finite() || **factor < 0.0)
        {
            return Err(SuscoinError::ConfigParse(format!(
                "emissions.factors.\"{mode}\" must be a finite non-negative number (found {factor})"
            )));
        }
        for (field, mode) in [
            ("baseline_mode", &baseline_mode),
            ("fallback_mode", &fallback_mode),
        ] {
            if !factors.contains_key(mode) {
                return Err(SuscoinError::ConfigParse(format!(
                    "emissions.{field} '{mode}' has no emission factor"
                )));
            }
        }

        Ok(Self {
            factors,
            baseline_mode,
            fallback_mode,
        })
    }

    pub fn baseline_mode(&self) -> &str {
        &self.baseline_mode
    }

    pub fn fallback_mode(&self) -> &str {
        &self.fallback_mode
    }

    pub fn get(&self, mode: &str) -> Option<f64> {
        self.factors.get(mode).copied()
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.factors.contains_key(mode)
    }

    /// Factor for `mode`, or the fallback mode's factor when it has none.
    pub fn factor_or_fallback(&self, mode: &str) -> f64 {
        self.get(mode)
            .or_else(|| self.get(&self.fallback_mode))
            .unwrap_or(0.0)
    }

    pub fn baseline_factor(&self) -> f64 {
        self.factor_or_fallback(&self.baseline_mode)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.factors
            .iter()
            .map(|(mode, factor)| (mode.as_str(), *factor))
    }

    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.factors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_factors_contain_baseline_and_fallback() {
        let factors = EmissionFactors::default();
        assert_eq!(factors.baseline_mode(), "car (solo/taxi)");
        assert_eq!(factors.get("car (solo/taxi)"), Some(171.0));
        assert_eq!(factors.get("bike"), Some(0.0));
        assert_eq!(factors.len(), 14);
    }

    #[test]
    fn unknown_mode_uses_fallback_factor() {
        let factors = EmissionFactors::default();
        assert_eq!(factors.factor_or_fallback("hoverboard"), 0.0);
        assert_eq!(factors.factor_or_fallback("ferry"), 115.0);
    }

    #[test]
    fn new_rejects_missing_baseline() {
        let map = BTreeMap::from([("bike".to_string(), 0.0)]);
        let err = EmissionFactors::new(map, "car", "bike")
            .expect_err("baseline should be required");
        assert!(err.to_string().contains("baseline_mode 'car'"));
    }

    #[test]
    fn new_rejects_negative_factor() {
        let map = BTreeMap::from([("bike".to_string(), -1.0), ("car".to_string(), 100.0)]);
        let err = EmissionFactors::new(map, "car", "bike")
            .expect_err("negative factor should fail");
        assert!(err.to_string().contains("finite non-negative"));
    }
}
