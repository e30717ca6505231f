use super::coerce;
use super::columns::{self, ColumnIndex};
use super::IngestError;
use crate::workflows::predial::domain::{is_affirmative, PropertyRecord, RecordId};
use csv::StringRecord;
use std::io::Read;

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let index = ColumnIndex::resolve(headers.iter().map(strip_bom))
        .map_err(|missing| IngestError::Schema { missing })?;

    let mut records = Vec::new();
    for (position, row) in csv_reader.records().enumerate() {
        let row = row?;
        records.push(build_record(RecordId(position), &row, &index));
    }

    Ok(records)
}

fn strip_bom(header: &str) -> &str {
    header.trim_start_matches('\u{feff}')
}

fn build_record(id: RecordId, row: &StringRecord, index: &ColumnIndex) -> PropertyRecord {
    let text = |column: &str| -> &str {
        index
            .position(column)
            .and_then(|position| row.get(position))
            .unwrap_or("")
    };
    let amount = |column: &str| coerce::amount(column, text(column));

    PropertyRecord {
        id,
        cadastral_code: text(columns::CADASTRAL_CODE).to_string(),
        zone: text(columns::ZONE).to_string(),
        urban_subzone: text(columns::URBAN_SUBZONE).to_string(),
        rural_district: text(columns::RURAL_DISTRICT).to_string(),
        land_use: text(columns::LAND_USE).to_string(),
        horizontal_property: text(columns::HORIZONTAL_PROPERTY).to_string(),
        assessed_value: amount(columns::ASSESSED_VALUE),
        tax_due: amount(columns::TAX_DUE),
        tax_collected: amount(columns::TAX_COLLECTED),
        tax_discount: amount(columns::TAX_DISCOUNT),
        built_area: amount(columns::BUILT_AREA),
        paid: is_affirmative(text(columns::PAYMENT_STATUS)),
        financing_status: text(columns::FINANCING_STATUS).to_lowercase(),
        latitude: coerce::coordinate(text(columns::LATITUDE)),
        longitude: coerce::coordinate(text(columns::LONGITUDE)),
    }
}
