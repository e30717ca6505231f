pub mod domain;
pub mod filter;
pub mod report;
pub mod risk;
pub mod segments;
mod stats;

#[cfg(test)]
mod tests;

pub use domain::{PropertyRecord, PropertyTable, RecordId, ZoneKind};
pub use filter::{FilterOptions, FilterSelection, FilteredView};
pub use report::{analyze, AnalysisOptions, PredialAnalysis};
pub use risk::{RiskScorer, ScoredRecord};
pub use segments::{RecoveryScenario, Segments};
