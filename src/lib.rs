pub mod analysis;
pub mod config;
pub mod database;
pub mod error;
pub mod history;
pub mod orchestrator;
pub mod providers;

// Re-export commonly used items
pub use analysis::parser::parse_analysis;
pub use analysis::record::{DayBucket, NutritionRecord};
pub use error::AnalysisError;
pub use history::ledger::DayLedger;
pub use history::store::HistoryStore;
pub use orchestrator::{AnalysisOrchestrator, AnalysisState};
