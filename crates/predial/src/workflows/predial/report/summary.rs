use super::super::domain::{PropertyRecord, ZoneKind};
use super::views::{SummaryColumns, SummaryKpis};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

impl SummaryKpis {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a PropertyRecord>,
    {
        records
            .into_iter()
            .fold(Self::default(), |mut kpis, record| {
                kpis.properties += 1;
                kpis.assessed_total += record.assessed_value;
                kpis.tax_total += record.tax_due;
                kpis.collected_total += record.tax_collected;
                kpis.discount_total += record.tax_discount;
                kpis.balance_total += record.balance();
                kpis
            })
    }
}

impl SummaryColumns {
    pub fn from_records(records: &[&PropertyRecord]) -> Self {
        let in_zone = |zone: ZoneKind| {
            SummaryKpis::from_records(
                records
                    .iter()
                    .copied()
                    .filter(move |record| record.zone_kind() == Some(zone)),
            )
        };

        Self {
            total: SummaryKpis::from_records(records.iter().copied()),
            urban: in_zone(ZoneKind::Urban),
            rural: in_zone(ZoneKind::Rural),
        }
    }
}

/// `part / whole * 100`, or zero when `whole` is zero.
pub(crate) fn share_pct(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// `collected / billed * 100`, or zero unless something was billed.
pub(crate) fn amount_pct(collected: Decimal, billed: Decimal) -> f64 {
    if billed <= Decimal::ZERO {
        return 0.0;
    }

    (collected / billed * Decimal::ONE_HUNDRED)
        .to_f64()
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn share_pct_guards_empty_denominator() {
        assert_eq!(share_pct(0, 0), 0.0);
        assert_eq!(share_pct(1, 4), 25.0);
    }

    #[test]
    fn amount_pct_guards_non_positive_billing() {
        assert_eq!(amount_pct(dec!(10), Decimal::ZERO), 0.0);
        assert_eq!(amount_pct(dec!(10), dec!(-5)), 0.0);
        assert_eq!(amount_pct(dec!(25), dec!(200)), 12.5);
    }
}
