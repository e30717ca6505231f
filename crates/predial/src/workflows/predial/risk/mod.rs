//! Composite geospatial risk: fiscal, cadastral and behavioral tiers.

pub mod rules;

use super::domain::PropertyRecord;
use super::filter::FilteredView;
use super::stats;
use rules::{CadastralThresholds, BEHAVIORAL_RULES, CADASTRAL_RULES};
use rust_decimal::Decimal;
use tracing::debug;

/// Factor weights in tenths: fiscal, cadastral, behavioral.
const WEIGHTS_TENTHS: (u8, u8, u8) = (5, 3, 2);

/// Per-record risk levels for one filtered view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord<'a> {
    pub record: &'a PropertyRecord,
    pub fiscal_risk: u8,
    pub cadastral_risk: u8,
    pub behavioral_risk: u8,
    pub total_risk: f64,
}

pub fn composite_score(fiscal: u8, cadastral: u8, behavioral: u8) -> f64 {
    let (wf, wc, wb) = WEIGHTS_TENTHS;
    let tenths = u32::from(wf) * u32::from(fiscal)
        + u32::from(wc) * u32::from(cadastral)
        + u32::from(wb) * u32::from(behavioral);
    f64::from(tenths) / 10.0
}

pub struct RiskScorer;

impl RiskScorer {
    /// Scores every record of `view` and ranks them by composite risk,
    /// highest first; equal scores keep their filtered order.
    pub fn score<'a>(view: &FilteredView<'a>) -> Vec<ScoredRecord<'a>> {
        let records = view.records();
        let tax_due: Vec<Decimal> = records.iter().map(|record| record.tax_due).collect();
        let fiscal = stats::quintile_buckets(&tax_due);
        let thresholds = Self::cadastral_thresholds(view);

        let mut scored: Vec<ScoredRecord<'a>> = records
            .iter()
            .copied()
            .zip(fiscal)
            .map(|(record, fiscal_risk)| {
                let cadastral_risk = rules::first_match(&CADASTRAL_RULES, record, &thresholds);
                let behavioral_risk = rules::first_match(&BEHAVIORAL_RULES, record, &());
                ScoredRecord {
                    record,
                    fiscal_risk,
                    cadastral_risk,
                    behavioral_risk,
                    total_risk: composite_score(fiscal_risk, cadastral_risk, behavioral_risk),
                }
            })
            .collect();

        scored.sort_by(|a, b| b.total_risk.total_cmp(&a.total_risk));
        debug!(records = scored.len(), ?thresholds, "scored predial risk");
        scored
    }

    pub fn cadastral_thresholds(view: &FilteredView<'_>) -> CadastralThresholds {
        let assessed: Vec<Decimal> = view
            .records()
            .iter()
            .map(|record| record.assessed_value)
            .collect();
        let built_area: Vec<Decimal> = view
            .records()
            .iter()
            .map(|record| record.built_area)
            .collect();

        CadastralThresholds {
            assessed_median: stats::median(&assessed),
            assessed_p60: stats::quantile(&assessed, Decimal::new(6, 1)),
            built_area_p20: stats::quantile(&built_area, Decimal::new(2, 1)),
        }
    }
}
