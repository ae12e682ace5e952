//! In-memory detection result store.
//!
//! Each run gets its own id, returned to the caller and quoted back on
//! export, so concurrent requests cannot race each other onto a shared
//! "current result" slot. Retention is a small bounded window of recent
//! runs; there is no persistence and no history beyond it.

use std::collections::VecDeque;

use agriburn_core::detection::{DetectionStatus, DetectionSummary, Hotspot};
use agriburn_core::types::RunId;
use tokio::sync::RwLock;

/// Number of recent runs kept for export.
pub const RESULT_RETENTION: usize = 16;

/// One completed detection run.
#[derive(Debug, Clone)]
pub struct DetectionRun {
    pub id: RunId,
    pub state: String,
    pub district: String,
    /// Post-fire date range, for export file naming.
    pub date_range: String,
    pub status: DetectionStatus,
    pub agricultural_mask_applied: bool,
    pub hotspots: Vec<Hotspot>,
    pub summary: DetectionSummary,
}

/// Bounded FIFO store of recent detection runs.
pub struct ResultStore {
    capacity: usize,
    runs: RwLock<VecDeque<DetectionRun>>,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::with_capacity(RESULT_RETENTION)
    }
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            runs: RwLock::new(VecDeque::new()),
        }
    }

    /// Insert a run, evicting the oldest beyond capacity.
    pub async fn insert(&self, run: DetectionRun) {
        let mut runs = self.runs.write().await;
        runs.push_back(run);
        while runs.len() > self.capacity {
            let evicted = runs.pop_front();
            if let Some(run) = evicted {
                tracing::debug!(run_id = %run.id, "Evicting detection run from store");
            }
        }
    }

    /// Fetch a run by id, if it has not been evicted.
    pub async fn get(&self, id: RunId) -> Option<DetectionRun> {
        self.runs.read().await.iter().find(|run| run.id == id).cloned()
    }
}
