mod markers;
mod summary;
pub mod views;

pub use markers::format_currency;
pub use views::{
    CollectionView, ComplianceView, DelinquencyView, MapMarker, MarkerCategory,
    OpportunityView, PredialAnalysis, PropertyRow, RiskRow, RiskView, ScenarioView,
    SummaryColumns, SummaryKpis,
};

use super::domain::{PropertyRecord, PropertyTable};
use super::filter::{FilterSelection, FilteredView};
use super::risk::RiskScorer;
use super::segments::Segments;
use crate::config::{AnalysisConfig, DEFAULT_TOP_TARGETS};
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Per-request knobs for [`analyze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    pub top_targets: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_targets: DEFAULT_TOP_TARGETS,
        }
    }
}

impl From<&AnalysisConfig> for AnalysisOptions {
    fn from(config: &AnalysisConfig) -> Self {
        Self {
            top_targets: config.top_targets,
        }
    }
}

/// Filters `table` and derives every dashboard view from the result.
///
/// Medians, percentiles and ranks are taken over the filtered records
/// only, so the output is a function of `(table, selection)` alone and
/// nothing is reused between selections. An empty selection yields zeroed
/// KPIs and empty cohorts.
pub fn analyze(
    table: &PropertyTable,
    selection: &FilterSelection,
    options: &AnalysisOptions,
) -> PredialAnalysis {
    let view = selection.apply(table);
    if view.is_empty() {
        info!(total = table.len(), ?selection, "filter selection matched no records");
    }

    let analysis = analyze_view(&view, options, selection.clone(), table.len());
    debug!(
        filtered = analysis.filtered_records,
        opportunities = analysis.opportunities.count,
        targets = analysis.collection.rows.len(),
        "computed predial analysis"
    );
    analysis
}

fn analyze_view(
    view: &FilteredView<'_>,
    options: &AnalysisOptions,
    selection: FilterSelection,
    total_records: usize,
) -> PredialAnalysis {
    let records = view.records();
    let segments = Segments::classify(view, options.top_targets);

    PredialAnalysis {
        selection,
        total_records,
        filtered_records: view.len(),
        general: SummaryColumns::from_records(records),
        compliance: compliance_view(records, &segments),
        delinquency: delinquency_view(&segments),
        opportunities: opportunity_view(&segments),
        collection: CollectionView {
            target_limit: options.top_targets,
            markers: markers::markers(
                segments.collection_targets.iter().copied(),
                MarkerCategory::CollectionTarget,
                markers::arrears_label,
            ),
            rows: rows(&segments.collection_targets),
        },
        scenarios: ScenarioView {
            total_unpaid: segments.total_unpaid_tax(),
            scenarios: segments.recovery_scenarios(),
            markers: markers::markers(
                segments.simulation.iter().copied(),
                MarkerCategory::Simulation,
                markers::tax_label,
            ),
            rows: rows(&segments.simulation),
        },
        risk: risk_view(view),
    }
}

fn compliance_view(records: &[&PropertyRecord], segments: &Segments<'_>) -> ComplianceView {
    let billed: Decimal = records.iter().map(|record| record.tax_due).sum();
    let collected_by_paid: Decimal = segments
        .paid
        .iter()
        .map(|record| record.tax_collected)
        .sum();

    let mut markers = markers::markers(
        segments.paid.iter().copied(),
        MarkerCategory::Paid,
        markers::paid_label,
    );
    markers.extend(markers::markers(
        segments.unpaid.iter().copied(),
        MarkerCategory::Unpaid,
        markers::pending_label,
    ));

    let mut paid = segments.paid.clone();
    paid.sort_by(|a, b| b.tax_collected.cmp(&a.tax_collected));

    ComplianceView {
        compliance_rate_pct: summary::share_pct(segments.paid.len(), records.len()),
        collected_over_billed_pct: summary::amount_pct(collected_by_paid, billed),
        paid_count: segments.paid.len(),
        unpaid_count: segments.unpaid.len(),
        markers,
        paid_rows: rows(&paid),
    }
}

fn delinquency_view(segments: &Segments<'_>) -> DelinquencyView {
    DelinquencyView {
        unpaid_count: segments.unpaid.len(),
        unpaid_tax_total: segments.total_unpaid_tax(),
        markers: markers::markers(
            segments.unpaid.iter().copied(),
            MarkerCategory::Unpaid,
            markers::tax_label,
        ),
        rows: rows(&segments.unpaid),
    }
}

fn opportunity_view(segments: &Segments<'_>) -> OpportunityView {
    OpportunityView {
        count: segments.cadastral_opportunities.len(),
        zero_construction_count: segments.zero_construction_high_value.len(),
        high_delinquency_count: segments.high_delinquency.len(),
        markers: markers::markers(
            segments.cadastral_opportunities.iter().copied(),
            MarkerCategory::Opportunity,
            markers::opportunity_label,
        ),
        rows: rows(&segments.cadastral_opportunities),
    }
}

fn risk_view(view: &FilteredView<'_>) -> RiskView {
    let scored = RiskScorer::score(view);
    RiskView {
        markers: markers::risk_markers(&scored),
        rows: scored.iter().map(RiskRow::from).collect(),
    }
}

fn rows(records: &[&PropertyRecord]) -> Vec<PropertyRow> {
    records.iter().map(|record| PropertyRow::from(*record)).collect()
}
