//! Transport scoring engine for susCoin.
//!
//! Loads a reference table of relative sustainability scores per distance
//! band, then turns `(mode, distance)` into a 0-10 score, a coin reward and
//! the CO2e saved against a baseline mode.
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use suscoin::{load_table, Scorer, ScorerSettings};
//!
//! let settings = ScorerSettings::default();
//! let table = load_table(
//!     Path::new("data/transport_scores_0to2500km_step5.csv"),
//!     &settings.table_schema(),
//! )
//! .expect("score table should load");
//! let scorer = Scorer::new(Arc::new(table), settings);
//! let result = scorer.score_transport("bike", 12.0);
//! println!("{} coins", result.coins);
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod report;
pub mod scorer;
pub mod table;
pub mod types;

pub use error::{ResourceLoadError, Result, SuscoinError};
pub use scorer::{band_km, Scorer, ScorerSettings, SharedScorer};
pub use table::{load_table, load_table_from_reader, ScoreTable, TableSchema};
pub use types::emission::EmissionFactors;
pub use types::outcome::{Assessment, NotViableReason, ScoreResult};
pub use types::rules::{DistanceRule, ModeRules};
