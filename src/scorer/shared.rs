use super::Scorer;
use crate::error::ResourceLoadError;
use crate::table::load_table;
use crate::types::outcome::{Assessment, ScoreResult};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Scorer handle that can swap in a freshly loaded table while requests are
/// in flight. Callers score against an `Arc` snapshot, so a reload is never
/// observed half-applied.
#[derive(Debug)]
pub struct SharedScorer {
    current: RwLock<Arc<Scorer>>,
}

impl SharedScorer {
    pub fn new(scorer: Scorer) -> Self {
        Self {
            current: RwLock::new(Arc::new(scorer)),
        }
    }

    pub fn snapshot(&self) -> Arc<Scorer> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Installs `scorer` and returns the one it replaced.
    pub fn replace(&self, scorer: Scorer) -> Arc<Scorer> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(scorer))
    }

    /// Loads `path` with the current settings and swaps it in. The previous
    /// table stays active when loading fails.
    pub fn reload(&self, path: &Path) -> Result<Arc<Scorer>, ResourceLoadError> {
        let settings = self.snapshot().settings().clone();
        let table = load_table(path, &settings.table_schema())?;
        let scorer = Arc::new(Scorer::new(Arc::new(table), settings));
        {
            let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
            *guard = Arc::clone(&scorer);
        }
        info!(
            path = %path.display(),
            fingerprint = scorer.table().fingerprint().unwrap_or_default(),
            "score table reloaded"
        );
        Ok(scorer)
    }

    pub fn score_transport(&self, mode: &str, distance_km: f64) -> ScoreResult {
        self.snapshot().score_transport(mode, distance_km)
    }

    pub fn assess(&self, mode: &str, distance_km: f64) -> Assessment {
        self.snapshot().assess(mode, distance_km)
    }
}
