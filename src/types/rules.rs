use crate::types::outcome::NotViableReason;
use serde::Serialize;
use std::collections::BTreeMap;

/// Distance policy attached to a mode, checked before banding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceRule {
    /// Shorter trips are not viable for the mode.
    MinimumKm(f64),
    /// Longer trips are not viable; reported at the limit's band.
    MaximumKm(f64),
    /// Longer trips are scored as if they were this long.
    CapKm(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RuleDecision {
    Proceed { effective_km: f64 },
    NotViable {
        reason: NotViableReason,
        reported_km: f64,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeRules {
    rules: BTreeMap<String, Vec<DistanceRule>>,
}

impl ModeRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Air travel needs 250 km, walking stops at 25 km, rail is flat past 1500 km.
    pub fn standard() -> Self {
        let mut rules = Self::new();
        for mode in ["plane (domestic)", "plane (intl)"] {
            rules.push(mode, DistanceRule::MinimumKm(250.0));
        }
        rules.push("walking", DistanceRule::MaximumKm(25.0));
        for mode in ["train (city)", "train (intercity)"] {
            rules.push(mode, DistanceRule::CapKm(1500.0));
        }
        rules
    }

    pub fn push(&mut self, mode: impl Into<String>, rule: DistanceRule) {
        self.rules.entry(mode.into()).or_default().push(rule);
    }

    pub fn for_mode(&self, mode: &str) -> &[DistanceRule] {
        self.rules.get(mode).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn modes(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Viability checks run first so a cap never hides an out-of-range trip.
    pub fn apply(&self, mode: &str, distance_km: f64) -> RuleDecision {
        let rules = self.for_mode(mode);
        for rule in rules {
            match *rule {
                DistanceRule::MinimumKm(min_km) if distance_km < min_km => {
                    return RuleDecision::NotViable {
                        reason: NotViableReason::BelowMinimum { min_km },
                        reported_km: distance_km,
                    };
                }
                DistanceRule::MaximumKm(max_km) if distance_km > max_km => {
                    return RuleDecision::NotViable {
                        reason: NotViableReason::BeyondMaximum { max_km },
                        reported_km: max_km,
                    };
                }
                _ => {}
            }
        }

        let effective_km = rules.iter().fold(distance_km, |km, rule| match *rule {
            DistanceRule::CapKm(cap_km) => km.min(cap_km),
            _ => km,
        });
        RuleDecision::Proceed { effective_km }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn air_travel_below_threshold_is_not_viable() {
        let rules = ModeRules::standard();
        assert_eq!(
            rules.apply("plane (domestic)", 100.0),
            RuleDecision::NotViable {
                reason: NotViableReason::BelowMinimum { min_km: 250.0 },
                reported_km: 100.0,
            }
        );
        assert_eq!(
            rules.apply("plane (intl)", 250.0),
            RuleDecision::Proceed {
                effective_km: 250.0
            }
        );
    }

    #[test]
    fn walking_beyond_limit_reports_limit() {
        let rules = ModeRules::standard();
        assert_eq!(
            rules.apply("walking", 40.0),
            RuleDecision::NotViable {
                reason: NotViableReason::BeyondMaximum { max_km: 25.0 },
                reported_km: 25.0,
            }
        );
        assert_eq!(
            rules.apply("walking", 25.0),
            RuleDecision::Proceed { effective_km: 25.0 }
        );
    }

    #[test]
    fn rail_is_capped_not_rejected() {
        let rules = ModeRules::standard();
        assert_eq!(
            rules.apply("train (intercity)", 2000.0),
            RuleDecision::Proceed {
                effective_km: 1500.0
            }
        );
    }

    #[test]
    fn modes_without_rules_pass_through() {
        let rules = ModeRules::standard();
        assert!(rules.for_mode("bike").is_empty());
        assert_eq!(
            rules.apply("bike", 3000.0),
            RuleDecision::Proceed {
                effective_km: 3000.0
            }
        );
    }
}
