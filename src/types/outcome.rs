use serde::Serialize;
use std::fmt;

/// Score, reward and savings for one trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub score: f64,
    pub coins: u64,
    pub co2e_saved_kg: f64,
    /// Banded distance the result was computed for.
    pub distance_km: u32,
}

impl ScoreResult {
    pub fn zero(distance_km: u32) -> Self {
        Self {
            score: 0.0,
            coins: 0,
            co2e_saved_kg: 0.0,
            distance_km,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NotViableReason {
    InvalidDistance,
    UnknownMode,
    #[serde(rename_all = "camelCase")]
    BelowMinimum { min_km: f64 },
    #[serde(rename_all = "camelCase")]
    BeyondMaximum { max_km: f64 },
    NoTableRow,
}

impl fmt::Display for NotViableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDistance => write!(f, "distance must be a positive finite number"),
            Self::UnknownMode => write!(f, "mode is not recognised"),
            Self::BelowMinimum { min_km } => {
                write!(f, "mode is not viable below {min_km} km")
            }
            Self::BeyondMaximum { max_km } => {
                write!(f, "mode is not viable beyond {max_km} km")
            }
            Self::NoTableRow => write!(f, "no reference score for this distance band"),
        }
    }
}

/// Outcome of scoring a trip. `NotViable` is an expected business outcome,
/// not a failure; it maps to the zero result at `distance_km`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Assessment {
    Scored(ScoreResult),
    #[serde(rename_all = "camelCase")]
    NotViable {
        reason: NotViableReason,
        distance_km: u32,
    },
}

impl Assessment {
    pub fn result(&self) -> ScoreResult {
        match self {
            Self::Scored(result) => *result,
            Self::NotViable { distance_km, .. } => ScoreResult::zero(*distance_km),
        }
    }

    pub fn is_viable(&self) -> bool {
        matches!(self, Self::Scored(_))
    }

    pub fn reason(&self) -> Option<NotViableReason> {
        match self {
            Self::Scored(_) => None,
            Self::NotViable { reason, .. } => Some(*reason),
        }
    }
}
