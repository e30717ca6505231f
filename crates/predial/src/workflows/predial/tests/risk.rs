use super::common::*;
use crate::workflows::predial::domain::PropertyTable;
use crate::workflows::predial::risk::rules::{
    first_match, CadastralThresholds, BEHAVIORAL_RULES, CADASTRAL_RULES, HIGH, LOW, MEDIUM,
};
use crate::workflows::predial::risk::RiskScorer;
use rust_decimal_macros::dec;

fn levels(table: &PropertyTable) -> Vec<(usize, u8, u8, u8)> {
    let mut scored: Vec<(usize, u8, u8, u8)> = RiskScorer::score(&view(table))
        .into_iter()
        .map(|entry| {
            (
                entry.record.id.0,
                entry.fiscal_risk,
                entry.cadastral_risk,
                entry.behavioral_risk,
            )
        })
        .collect();
    scored.sort_by_key(|entry| entry.0);
    scored
}

#[test]
fn fiscal_risk_follows_tax_due_quintiles() {
    let table = PropertyTable::new(vec![
        property(0, 100, 1, 1),
        property(1, 200, 1, 1),
        property(2, 300, 1, 1),
        property(3, 400, 1, 1),
        property(4, 500, 1, 1),
    ]);

    let fiscal: Vec<u8> = levels(&table).into_iter().map(|entry| entry.1).collect();
    assert_eq!(fiscal, vec![1, 2, 3, 4, 5]);
}

#[test]
fn identical_tax_due_collapses_fiscal_risk() {
    let table = PropertyTable::new((0..6).map(|id| property(id, 250, 10, 10)).collect());

    assert!(levels(&table).iter().all(|entry| entry.1 == 1));
}

#[test]
fn vacant_lot_above_median_is_high_cadastral_risk() {
    let table = PropertyTable::new(vec![
        property(0, 10, 1_000_000, 0),
        property(1, 10, 500_000, 50),
        property(2, 10, 100_000, 60),
    ]);

    assert_eq!(levels(&table)[0].2, HIGH);
    assert_eq!(levels(&table)[1].2, LOW);
}

#[test]
fn underbuilt_high_value_is_medium_cadastral_risk() {
    let table = PropertyTable::new(vec![
        property(0, 10, 10_000, 10),
        property(1, 10, 1, 100),
        property(2, 10, 2, 100),
        property(3, 10, 3, 100),
        property(4, 10, 4, 100),
    ]);

    let levels = levels(&table);
    assert_eq!(levels[0].2, MEDIUM);
    assert!(levels[1..].iter().all(|entry| entry.2 == LOW));
}

#[test]
fn high_cadastral_tier_takes_precedence_over_medium() {
    // Record 0 is vacant (below P20 = 80) and assessed above both the
    // median and P60, so both tiers match.
    let table = PropertyTable::new(vec![
        property(0, 10, 10_000, 0),
        property(1, 10, 1, 100),
        property(2, 10, 2, 100),
        property(3, 10, 3, 100),
        property(4, 10, 4, 100),
    ]);
    let thresholds = RiskScorer::cadastral_thresholds(&view(&table));
    assert_eq!(thresholds.built_area_p20, Some(dec!(80)));

    let record = &table.records()[0];
    assert!(CADASTRAL_RULES.iter().all(|rule| rule.applies(record, &thresholds)));
    assert_eq!(levels(&table)[0].2, HIGH);
}

#[test]
fn cadastral_rules_never_fire_without_statistics() {
    let record = property(0, 10, 10_000, 0);
    assert_eq!(
        first_match(&CADASTRAL_RULES, &record, &CadastralThresholds::default()),
        LOW
    );
}

#[test]
fn behavioral_risk_depends_on_payment_and_financing() {
    let unfinanced = property(0, 10, 10, 10);
    let financed_debt = financed(property(1, 10, 10, 10), "si");
    let settled = paid(property(2, 10, 10, 10));
    let unknown = financed(property(3, 10, 10, 10), "pendiente");

    assert_eq!(first_match(&BEHAVIORAL_RULES, &unfinanced, &()), HIGH);
    assert_eq!(first_match(&BEHAVIORAL_RULES, &financed_debt, &()), MEDIUM);
    assert_eq!(first_match(&BEHAVIORAL_RULES, &settled, &()), LOW);
    assert_eq!(first_match(&BEHAVIORAL_RULES, &unknown, &()), LOW);
}

#[test]
fn portfolio_is_ranked_by_composite_score() {
    let table = portfolio();
    let ranked: Vec<(usize, f64)> = RiskScorer::score(&view(&table))
        .into_iter()
        .map(|entry| (entry.record.id.0, entry.total_risk))
        .collect();

    assert_eq!(
        ranked,
        vec![(5, 3.4), (1, 3.0), (3, 2.8), (2, 2.7), (4, 2.5), (0, 1.8)]
    );
}

#[test]
fn equal_scores_keep_filtered_order() {
    let table = PropertyTable::new((0..4).map(|id| paid(property(id, 75, 10, 10))).collect());
    let order: Vec<usize> = RiskScorer::score(&view(&table))
        .into_iter()
        .map(|entry| entry.record.id.0)
        .collect();

    assert_eq!(order, vec![0, 1, 2, 3]);
}

#[test]
fn composite_scores_stay_within_bounds() {
    let records = (0..40)
        .map(|id| {
            let record = property(id, (id as i64 * 37) % 11, (id as i64 * 53) % 17, id as i64 % 3);
            match id % 3 {
                0 => paid(record),
                1 => financed(record, "si"),
                _ => record,
            }
        })
        .collect();
    let table = PropertyTable::new(records);

    for entry in RiskScorer::score(&view(&table)) {
        assert!(
            (1.0..=5.0).contains(&entry.total_risk),
            "score {} out of bounds",
            entry.total_risk
        );
    }
}

#[test]
fn scoring_an_empty_view_is_a_no_op() {
    let table = PropertyTable::default();
    assert!(RiskScorer::score(&view(&table)).is_empty());
}
