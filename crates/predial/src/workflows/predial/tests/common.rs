use crate::workflows::predial::domain::{PropertyRecord, PropertyTable, RecordId};
use crate::workflows::predial::filter::{FilterSelection, FilteredView};
use rust_decimal::Decimal;

/// Urban, unpaid, unfinanced, placeable record with the given amounts.
pub(super) fn property(id: usize, tax_due: i64, assessed_value: i64, built_area: i64) -> PropertyRecord {
    PropertyRecord {
        id: RecordId(id),
        cadastral_code: format!("25-{id:04}"),
        zone: "URBANO".to_string(),
        urban_subzone: "Centro".to_string(),
        rural_district: String::new(),
        land_use: "Habitacional".to_string(),
        horizontal_property: "No".to_string(),
        assessed_value: Decimal::from(assessed_value),
        tax_due: Decimal::from(tax_due),
        tax_collected: Decimal::ZERO,
        tax_discount: Decimal::ZERO,
        built_area: Decimal::from(built_area),
        paid: false,
        financing_status: "no".to_string(),
        latitude: Some(4.71 + id as f64 * 0.001),
        longitude: Some(-74.07),
    }
}

pub(super) fn paid(mut record: PropertyRecord) -> PropertyRecord {
    record.paid = true;
    record.tax_collected = record.tax_due;
    record
}

pub(super) fn financed(mut record: PropertyRecord, status: &str) -> PropertyRecord {
    record.financing_status = status.to_string();
    record
}

pub(super) fn rural(mut record: PropertyRecord, district: &str) -> PropertyRecord {
    record.zone = "RURAL".to_string();
    record.urban_subzone = String::new();
    record.rural_district = district.to_string();
    record
}

pub(super) fn unplaced(mut record: PropertyRecord) -> PropertyRecord {
    record.latitude = None;
    record
}

pub(super) fn view(table: &PropertyTable) -> FilteredView<'_> {
    FilterSelection::default().apply(table)
}

pub(super) fn ids(records: &[&PropertyRecord]) -> Vec<usize> {
    records.iter().map(|record| record.id.0).collect()
}

/// Mixed portfolio used across the cohort and report tests.
///
/// | id | due  | assessed | built | paid | zone  |
/// |----|------|----------|-------|------|-------|
/// | 0  | 100  | 1_000    | 0     | no   | urban |
/// | 1  | 200  | 5_000    | 0     | no   | urban |
/// | 2  | 300  | 9_000    | 0     | yes  | urban |
/// | 3  | 400  | 2_000    | 120   | no   | rural |
/// | 4  | 500  | 3_000    | 80    | yes  | rural |
/// | 5  | 600  | 4_000    | 60    | no   | urban |
pub(super) fn portfolio() -> PropertyTable {
    PropertyTable::new(vec![
        property(0, 100, 1_000, 0),
        property(1, 200, 5_000, 0),
        paid(property(2, 300, 9_000, 0)),
        rural(property(3, 400, 2_000, 120), "La Palma"),
        paid(rural(property(4, 500, 3_000, 80), "El Salitre")),
        unplaced(financed(property(5, 600, 4_000, 60), "si")),
    ])
}
