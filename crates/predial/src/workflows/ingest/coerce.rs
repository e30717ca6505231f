use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{trace, warn};

/// Lenient numeric coercion: anything that does not parse becomes zero.
///
/// Empty cells and garbage are indistinguishable from a genuine `0` after
/// this step. Digit separators (`1_000`, `1,000`) count as garbage.
pub(crate) fn amount(column: &str, raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }
    if trimmed.contains('_') {
        trace!(column, value = trimmed, "digit separators are not numeric");
        return Decimal::ZERO;
    }

    match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
        Ok(value) => value,
        Err(err) if is_numeric_literal(trimmed) => {
            warn!(column, value = trimmed, %err, "amount out of decimal range coerced to zero");
            Decimal::ZERO
        }
        Err(err) => {
            trace!(column, value = trimmed, %err, "unparsable amount coerced to zero");
            Decimal::ZERO
        }
    }
}

/// Well-formed number that `Decimal` cannot hold, such as `1e30`.
fn is_numeric_literal(raw: &str) -> bool {
    raw.parse::<f64>().is_ok_and(f64::is_finite)
}

/// Coordinates keep their absence so unplaceable records stay off the map.
pub(crate) fn coordinate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}
