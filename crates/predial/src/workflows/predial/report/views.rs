use super::super::domain::{PropertyRecord, RecordId};
use super::super::filter::FilterSelection;
use super::super::risk::ScoredRecord;
use super::super::segments::RecoveryScenario;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryKpis {
    pub properties: usize,
    pub assessed_total: Decimal,
    pub tax_total: Decimal,
    pub collected_total: Decimal,
    pub discount_total: Decimal,
    pub balance_total: Decimal,
}

/// General-information table: one KPI column per zone split.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummaryColumns {
    pub total: SummaryKpis,
    pub urban: SummaryKpis,
    pub rural: SummaryKpis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerCategory {
    Paid,
    Unpaid,
    Opportunity,
    CollectionTarget,
    Simulation,
    Risk,
}

impl MarkerCategory {
    pub const fn color(self) -> &'static str {
        match self {
            Self::Paid => "green",
            Self::Unpaid => "red",
            Self::Opportunity => "orange",
            Self::CollectionTarget | Self::Simulation => "blue",
            Self::Risk => "darkred",
        }
    }
}

/// Point handed to the map renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: RecordId,
    pub cadastral_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: MarkerCategory,
    pub color: &'static str,
    pub label: String,
}

/// Tabular projection of a canonical record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRow {
    pub id: RecordId,
    pub cadastral_code: String,
    pub zone: String,
    pub rural_district: String,
    pub land_use: String,
    pub assessed_value: Decimal,
    pub tax_due: Decimal,
    pub tax_collected: Decimal,
    pub balance: Decimal,
    pub built_area: Decimal,
}

impl From<&PropertyRecord> for PropertyRow {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            id: record.id,
            cadastral_code: record.cadastral_code.clone(),
            zone: record.zone.clone(),
            rural_district: record.rural_district.clone(),
            land_use: record.land_use.clone(),
            assessed_value: record.assessed_value,
            tax_due: record.tax_due,
            tax_collected: record.tax_collected,
            balance: record.balance(),
            built_area: record.built_area,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskRow {
    #[serde(flatten)]
    pub property: PropertyRow,
    pub fiscal_risk: u8,
    pub cadastral_risk: u8,
    pub behavioral_risk: u8,
    pub total_risk: f64,
}

impl From<&ScoredRecord<'_>> for RiskRow {
    fn from(scored: &ScoredRecord<'_>) -> Self {
        Self {
            property: PropertyRow::from(scored.record),
            fiscal_risk: scored.fiscal_risk,
            cadastral_risk: scored.cadastral_risk,
            behavioral_risk: scored.behavioral_risk,
            total_risk: scored.total_risk,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplianceView {
    pub compliance_rate_pct: f64,
    pub collected_over_billed_pct: f64,
    pub paid_count: usize,
    pub unpaid_count: usize,
    pub markers: Vec<MapMarker>,
    /// Paid records, largest collection first.
    pub paid_rows: Vec<PropertyRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DelinquencyView {
    pub unpaid_count: usize,
    pub unpaid_tax_total: Decimal,
    pub markers: Vec<MapMarker>,
    pub rows: Vec<PropertyRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OpportunityView {
    pub count: usize,
    pub zero_construction_count: usize,
    pub high_delinquency_count: usize,
    pub markers: Vec<MapMarker>,
    pub rows: Vec<PropertyRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionView {
    pub target_limit: usize,
    pub markers: Vec<MapMarker>,
    pub rows: Vec<PropertyRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScenarioView {
    pub total_unpaid: Decimal,
    pub scenarios: Vec<RecoveryScenario>,
    pub markers: Vec<MapMarker>,
    pub rows: Vec<PropertyRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RiskView {
    pub markers: Vec<MapMarker>,
    /// Highest composite risk first.
    pub rows: Vec<RiskRow>,
}

/// Everything the dashboard renders for one filter selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredialAnalysis {
    pub selection: FilterSelection,
    pub total_records: usize,
    pub filtered_records: usize,
    pub general: SummaryColumns,
    pub compliance: ComplianceView,
    pub delinquency: DelinquencyView,
    pub opportunities: OpportunityView,
    pub collection: CollectionView,
    pub scenarios: ScenarioView,
    pub risk: RiskView,
}

impl PredialAnalysis {
    /// True when the selection matched nothing; render a placeholder.
    pub fn is_empty(&self) -> bool {
        self.filtered_records == 0
    }
}
