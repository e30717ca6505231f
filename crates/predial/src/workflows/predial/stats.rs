use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Linearly interpolated quantile, `q` in `[0, 1]`.
///
/// `None` for an empty sample; callers turn that into "rule never fires".
pub(crate) fn quantile(values: &[Decimal], q: Decimal) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort();

    let position = q * Decimal::from(sorted.len() - 1);
    let lower = position.floor().to_usize()?;
    let fraction = position - position.floor();
    let low = sorted[lower];

    match sorted.get(lower + 1) {
        Some(high) if !fraction.is_zero() => Some(low + (*high - low) * fraction),
        _ => Some(low),
    }
}

pub(crate) fn median(values: &[Decimal]) -> Option<Decimal> {
    quantile(values, Decimal::new(5, 1))
}

pub(crate) fn distinct_count(values: &[Decimal]) -> usize {
    let mut sorted = values.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted.len()
}

pub(crate) const QUINTILES: usize = 5;

/// Buckets `values` into five equal-population bins labelled 1..=5.
///
/// Values are ranked ascending with ties broken by position, then rank `r`
/// of `n` lands in the first bin `k` whose upper edge `1 + (n - 1) * k / 5`
/// reaches it. Fewer than two distinct values put everything in bin 1.
pub(crate) fn quintile_buckets(values: &[Decimal]) -> Vec<u8> {
    let n = values.len();
    if distinct_count(values) < 2 {
        return vec![1; n];
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|a, b| values[*a].cmp(&values[*b]));

    let mut buckets = vec![1; n];
    for (offset, index) in order.into_iter().enumerate() {
        buckets[index] = bucket_for_rank(offset, n);
    }
    buckets
}

fn bucket_for_rank(zero_based_rank: usize, n: usize) -> u8 {
    let scaled_rank = QUINTILES * zero_based_rank;
    (1..=QUINTILES)
        .find(|k| scaled_rank <= (n - 1) * k)
        .unwrap_or(QUINTILES) as u8
}
