use super::super::domain::PropertyRecord;
use rust_decimal::Decimal;

pub const LOW: u8 = 1;
pub const MEDIUM: u8 = 3;
pub const HIGH: u8 = 5;

/// One tier of a step-function risk table.
pub struct RiskRule<C> {
    pub label: &'static str,
    pub level: u8,
    predicate: fn(&PropertyRecord, &C) -> bool,
}

impl<C> RiskRule<C> {
    pub fn applies(&self, record: &PropertyRecord, context: &C) -> bool {
        (self.predicate)(record, context)
    }
}

/// Walks `rules` top-down; the first matching tier wins, otherwise [`LOW`].
pub fn first_match<C>(rules: &[RiskRule<C>], record: &PropertyRecord, context: &C) -> u8 {
    rules
        .iter()
        .find(|rule| rule.applies(record, context))
        .map_or(LOW, |rule| rule.level)
}

/// Statistics of the filtered view the cadastral rules compare against.
/// A missing statistic disables every rule that needs it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CadastralThresholds {
    pub assessed_median: Option<Decimal>,
    pub assessed_p60: Option<Decimal>,
    pub built_area_p20: Option<Decimal>,
}

pub const CADASTRAL_RULES: [RiskRule<CadastralThresholds>; 2] = [
    RiskRule {
        label: "no construction, assessed above median",
        level: HIGH,
        predicate: vacant_above_median,
    },
    RiskRule {
        label: "built area below P20, assessed above P60",
        level: MEDIUM,
        predicate: underbuilt_high_value,
    },
];

pub const BEHAVIORAL_RULES: [RiskRule<()>; 2] = [
    RiskRule {
        label: "unpaid without financing agreement",
        level: HIGH,
        predicate: unpaid_unfinanced,
    },
    RiskRule {
        label: "unpaid under financing agreement",
        level: MEDIUM,
        predicate: unpaid_financed,
    },
];

fn vacant_above_median(record: &PropertyRecord, thresholds: &CadastralThresholds) -> bool {
    !record.has_construction()
        && thresholds
            .assessed_median
            .is_some_and(|median| record.assessed_value > median)
}

fn underbuilt_high_value(record: &PropertyRecord, thresholds: &CadastralThresholds) -> bool {
    match (thresholds.built_area_p20, thresholds.assessed_p60) {
        (Some(p20), Some(p60)) => record.built_area < p20 && record.assessed_value > p60,
        _ => false,
    }
}

fn unpaid_unfinanced(record: &PropertyRecord, _: &()) -> bool {
    !record.paid && record.financing_status == "no"
}

fn unpaid_financed(record: &PropertyRecord, _: &()) -> bool {
    !record.paid && record.financing_status == "si"
}
