use log::{error, warn};

use crate::analysis::record::DayBucket;
use crate::database::Database;

const HISTORY_KEY: &str = "food_history";

/// Persists the full ledger as one JSON blob under a fixed key. History is
/// not critical to the app working, so both directions are best effort:
/// unreadable data loads as an empty history and a failed save is only
/// logged.
#[derive(Clone)]
pub struct HistoryStore {
    db: Database,
}

impl HistoryStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn load(&self) -> Vec<DayBucket> {
        let raw = match self.db.get_value(HISTORY_KEY.to_string()).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Failed to read stored history: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<DayBucket>>(&raw) {
            Ok(mut buckets) => {
                buckets.sort_by(|a, b| b.date.cmp(&a.date));
                buckets
            }
            Err(e) => {
                warn!("Discarding unreadable history: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn save(&self, buckets: &[DayBucket]) {
        let encoded = match serde_json::to_string(buckets) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!("Failed to encode history: {}", e);
                return;
            }
        };

        if let Err(e) = self.db.set_value(HISTORY_KEY.to_string(), encoded).await {
            error!("Failed to persist history: {}", e);
        }
    }
}
