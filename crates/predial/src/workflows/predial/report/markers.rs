use super::super::domain::PropertyRecord;
use super::super::risk::ScoredRecord;
use super::views::{MapMarker, MarkerCategory};
use rust_decimal::Decimal;

/// Whole-peso amount with thousands separators, e.g. `$1,250,000`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = value.round().abs().to_string();
    let mut grouped = String::with_capacity(rounded.len() + rounded.len() / 3);
    for (position, digit) in rounded.chars().enumerate() {
        if position > 0 && (rounded.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if value.round().is_sign_negative() && !value.round().is_zero() {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Builds one marker per placeable record; records without both
/// coordinates are skipped.
pub(crate) fn markers<'a, I, F>(records: I, category: MarkerCategory, label: F) -> Vec<MapMarker>
where
    I: IntoIterator<Item = &'a PropertyRecord>,
    F: Fn(&PropertyRecord) -> String,
{
    records
        .into_iter()
        .filter_map(|record| {
            let (latitude, longitude) = record.coordinates()?;
            Some(MapMarker {
                id: record.id,
                cadastral_code: record.cadastral_code.clone(),
                latitude,
                longitude,
                category,
                color: category.color(),
                label: label(record),
            })
        })
        .collect()
}

pub(crate) fn paid_label(record: &PropertyRecord) -> String {
    format!(
        "IGAC: {}\nPagado: {}",
        record.cadastral_code,
        format_currency(record.tax_collected)
    )
}

pub(crate) fn pending_label(record: &PropertyRecord) -> String {
    format!(
        "IGAC: {}\nPendiente: {}",
        record.cadastral_code,
        format_currency(record.tax_due)
    )
}

pub(crate) fn tax_label(record: &PropertyRecord) -> String {
    format!(
        "IGAC: {}\nImpuesto: {}",
        record.cadastral_code,
        format_currency(record.tax_due)
    )
}

pub(crate) fn opportunity_label(record: &PropertyRecord) -> String {
    format!(
        "IGAC: {}\nÁrea: {}\nAvalúo: {}\nImpuesto: {}",
        record.cadastral_code,
        record.built_area.normalize(),
        format_currency(record.assessed_value),
        format_currency(record.tax_due)
    )
}

pub(crate) fn arrears_label(record: &PropertyRecord) -> String {
    format!(
        "IGAC: {}\nMora: {}",
        record.cadastral_code,
        format_currency(record.tax_due)
    )
}

pub(crate) fn risk_markers(scored: &[ScoredRecord<'_>]) -> Vec<MapMarker> {
    let category = MarkerCategory::Risk;
    scored
        .iter()
        .filter_map(|entry| {
            let (latitude, longitude) = entry.record.coordinates()?;
            Some(MapMarker {
                id: entry.record.id,
                cadastral_code: entry.record.cadastral_code.clone(),
                latitude,
                longitude,
                category,
                color: category.color(),
                label: format!(
                    "IGAC: {}\nRiesgo Total: {:.2}",
                    entry.record.cadastral_code, entry.total_risk
                ),
            })
        })
        .collect()
}
