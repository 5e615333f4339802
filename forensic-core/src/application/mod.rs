// forensic-core/src/application/mod.rs

pub mod aggregator;
pub mod bootstrap;
pub mod engine;
pub mod history;
pub mod registry;
pub mod report;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use forensic_core::application::{ComplianceEngine, ReportFormatter};`

pub use aggregator::Aggregator;
pub use bootstrap::build_engine;
pub use engine::ComplianceEngine;
pub use history::{EvaluationHistory, HistoryEntry, HistoryStatistics, RuleStatistics};
pub use registry::{RegistrationFailure, RegistrationSummary, RuleRegistry};
pub use report::ReportFormatter;
