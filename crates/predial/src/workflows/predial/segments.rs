use super::domain::{PropertyRecord, RecordId};
use super::filter::FilteredView;
use super::stats;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashSet;

/// Coverage levels, in percent, projected by the recovery simulation.
pub const RECOVERY_COVERAGE_PCT: [u32; 4] = [10, 30, 50, 100];

/// Named cohorts of one filtered view. Cohorts may overlap.
#[derive(Debug, Clone, Default)]
pub struct Segments<'a> {
    pub paid: Vec<&'a PropertyRecord>,
    pub unpaid: Vec<&'a PropertyRecord>,
    /// No registered construction and assessed above the median of that subset.
    pub zero_construction_high_value: Vec<&'a PropertyRecord>,
    /// Unpaid with tax due above the median of the whole view.
    pub high_delinquency: Vec<&'a PropertyRecord>,
    pub cadastral_opportunities: Vec<&'a PropertyRecord>,
    pub collection_targets: Vec<&'a PropertyRecord>,
    /// Every unpaid record, largest tax due first.
    pub simulation: Vec<&'a PropertyRecord>,
}

impl<'a> Segments<'a> {
    pub fn classify(view: &FilteredView<'a>, top_targets: usize) -> Self {
        let records = view.records();
        let (paid, unpaid): (Vec<&PropertyRecord>, Vec<&PropertyRecord>) =
            records.iter().copied().partition(|record| record.paid);

        let zero_construction_high_value = zero_construction_high_value(records);
        let high_delinquency = high_delinquency(records);
        let cadastral_opportunities =
            union_by_id(&zero_construction_high_value, &high_delinquency);

        let simulation = by_tax_due_desc(&unpaid);
        let collection_targets = simulation.iter().copied().take(top_targets).collect();

        Self {
            paid,
            unpaid,
            zero_construction_high_value,
            high_delinquency,
            cadastral_opportunities,
            collection_targets,
            simulation,
        }
    }

    pub fn total_unpaid_tax(&self) -> Decimal {
        self.unpaid.iter().map(|record| record.tax_due).sum()
    }

    pub fn recovery_scenarios(&self) -> Vec<RecoveryScenario> {
        recovery_scenarios(self.total_unpaid_tax())
    }
}

fn zero_construction_high_value<'a>(records: &[&'a PropertyRecord]) -> Vec<&'a PropertyRecord> {
    let zero_construction: Vec<&PropertyRecord> = records
        .iter()
        .copied()
        .filter(|record| !record.has_construction())
        .collect();
    let assessed: Vec<Decimal> = zero_construction
        .iter()
        .map(|record| record.assessed_value)
        .collect();

    match stats::median(&assessed) {
        Some(median) => zero_construction
            .into_iter()
            .filter(|record| record.assessed_value > median)
            .collect(),
        None => Vec::new(),
    }
}

fn high_delinquency<'a>(records: &[&'a PropertyRecord]) -> Vec<&'a PropertyRecord> {
    let tax_due: Vec<Decimal> = records.iter().map(|record| record.tax_due).collect();

    match stats::median(&tax_due) {
        Some(median) => records
            .iter()
            .copied()
            .filter(|record| !record.paid && record.tax_due > median)
            .collect(),
        None => Vec::new(),
    }
}

fn union_by_id<'a>(
    first: &[&'a PropertyRecord],
    second: &[&'a PropertyRecord],
) -> Vec<&'a PropertyRecord> {
    let mut seen: HashSet<RecordId> = HashSet::new();
    first
        .iter()
        .chain(second.iter())
        .copied()
        .filter(|record| seen.insert(record.id))
        .collect()
}

fn by_tax_due_desc<'a>(records: &[&'a PropertyRecord]) -> Vec<&'a PropertyRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.tax_due.cmp(&a.tax_due));
    sorted
}

/// Projected recovery at one coverage level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecoveryScenario {
    pub coverage_pct: u32,
    pub recoverable: Decimal,
}

pub fn recovery_scenarios(total_unpaid: Decimal) -> Vec<RecoveryScenario> {
    RECOVERY_COVERAGE_PCT
        .iter()
        .map(|&coverage_pct| RecoveryScenario {
            coverage_pct,
            recoverable: total_unpaid * Decimal::new(i64::from(coverage_pct), 2),
        })
        .collect()
}
