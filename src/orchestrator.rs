use chrono::NaiveDate;
use image::DynamicImage;
use log::{error, info};
use parking_lot::Mutex;
use uuid::Uuid;

use crate::analysis::parser::parse_analysis;
use crate::analysis::record::{DayBucket, NutritionRecord};
use crate::error::AnalysisError;
use crate::history::ledger::DayLedger;
use crate::history::store::HistoryStore;
use crate::providers::traits::VisionProvider;

/// Where the current analysis stands. `Failed` carries the user-facing
/// message derived from the error classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisState {
    Idle,
    Analyzing,
    Succeeded(NutritionRecord),
    Failed(String),
}

struct Inner {
    state: AnalysisState,
    selected_image: Option<DynamicImage>,
    ledger: DayLedger,
}

/// Drives one analysis at a time: image in, provider call, parse, then an
/// explicit commit or discard. Callers observe progress by polling
/// [`AnalysisOrchestrator::state`]. The lock is never held across the
/// provider await; the `Analyzing` state is the busy guard.
pub struct AnalysisOrchestrator {
    provider: Box<dyn VisionProvider + Send + Sync>,
    store: HistoryStore,
    inner: Mutex<Inner>,
}

impl AnalysisOrchestrator {
    pub async fn new(provider: Box<dyn VisionProvider + Send + Sync>, store: HistoryStore) -> Self {
        let ledger = DayLedger::from_buckets(store.load().await);
        Self {
            provider,
            store,
            inner: Mutex::new(Inner {
                state: AnalysisState::Idle,
                selected_image: None,
                ledger,
            }),
        }
    }

    pub fn select_image(&self, image: DynamicImage) {
        self.inner.lock().selected_image = Some(image);
    }

    pub fn state(&self) -> AnalysisState {
        self.inner.lock().state.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        match &self.inner.lock().state {
            AnalysisState::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Runs the selected image through the vision provider and parses the
    /// reply. Exactly one analysis may be in flight; a second call while
    /// `Analyzing` is rejected without touching the running one.
    pub async fn start_analysis(&self) -> Result<(), AnalysisError> {
        let image = {
            let mut inner = self.inner.lock();
            if inner.state == AnalysisState::Analyzing {
                return Err(AnalysisError::AnalysisInProgress);
            }
            let Some(image) = inner.selected_image.clone() else {
                let err = AnalysisError::NoImageSelected;
                inner.state = AnalysisState::Failed(err.user_message());
                return Err(err);
            };
            // clears any prior error
            inner.state = AnalysisState::Analyzing;
            image
        };

        info!("Starting image analysis");
        match self.provider.analyze_food(&image).await {
            Ok(text) => {
                info!("Analysis completed ({} characters)", text.len());
                let record = parse_analysis(&text);
                self.inner.lock().state = AnalysisState::Succeeded(record);
                Ok(())
            }
            Err(err) => {
                error!("Analysis failed: {}", err);
                self.inner.lock().state = AnalysisState::Failed(err.user_message());
                Err(err)
            }
        }
    }

    /// Wholesale replacement of the held record, for the edit-before-save
    /// flow. Valid only while a completed analysis is being held.
    pub fn update_record(&self, record: NutritionRecord) -> Result<(), AnalysisError> {
        let mut inner = self.inner.lock();
        match inner.state {
            AnalysisState::Succeeded(_) => {
                inner.state = AnalysisState::Succeeded(record);
                Ok(())
            }
            _ => Err(AnalysisError::Unexpected(
                "no completed analysis to edit".to_string(),
            )),
        }
    }

    /// Files the held record under today's bucket and persists the ledger.
    /// This is the one place a successful analysis reaches storage.
    pub async fn commit(&self) -> Result<(), AnalysisError> {
        let buckets = {
            let mut inner = self.inner.lock();
            let AnalysisState::Succeeded(record) = inner.state.clone() else {
                return Err(AnalysisError::Unexpected(
                    "no completed analysis to save".to_string(),
                ));
            };
            inner.ledger.upsert(record);
            inner.selected_image = None;
            inner.state = AnalysisState::Idle;
            inner.ledger.all().to_vec()
        };

        self.store.save(&buckets).await;
        Ok(())
    }

    /// Drops whatever is held (image, record or error) and returns to idle.
    pub fn discard(&self) {
        let mut inner = self.inner.lock();
        inner.selected_image = None;
        inner.state = AnalysisState::Idle;
    }

    pub fn history(&self) -> Vec<DayBucket> {
        self.inner.lock().ledger.all().to_vec()
    }

    pub fn bucket_for(&self, date: NaiveDate) -> Option<DayBucket> {
        self.inner.lock().ledger.bucket_for(date).cloned()
    }

    /// Removes a committed record from its day bucket and persists the
    /// shrunken ledger.
    pub async fn remove_record(&self, date: NaiveDate, id: Uuid) -> bool {
        let buckets = {
            let mut inner = self.inner.lock();
            if !inner.ledger.remove_record(date, id) {
                return false;
            }
            inner.ledger.all().to_vec()
        };

        self.store.save(&buckets).await;
        true
    }
}
