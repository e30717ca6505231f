use super::domain::{PropertyRecord, PropertyTable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Values offered for the horizontal-property constraint.
pub const HORIZONTAL_PROPERTY_OPTIONS: [&str; 2] = ["Sí", "No"];

/// Five independent equality constraints; `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub zone: Option<String>,
    pub urban_subzone: Option<String>,
    pub rural_district: Option<String>,
    pub land_use: Option<String>,
    pub horizontal_property: Option<String>,
}

impl FilterSelection {
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::default()
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        exact(&self.zone, &record.zone)
            && exact(&self.urban_subzone, &record.urban_subzone)
            && exact(&self.rural_district, &record.rural_district)
            && exact(&self.land_use, &record.land_use)
            && self.horizontal_property.as_deref().map_or(true, |wanted| {
                wanted.to_lowercase() == record.horizontal_property.to_lowercase()
            })
    }

    /// Borrows the records satisfying every active constraint, in table order.
    pub fn apply<'a>(&self, table: &'a PropertyTable) -> FilteredView<'a> {
        let records = table
            .records()
            .iter()
            .filter(|record| self.matches(record))
            .collect();
        FilteredView { records }
    }
}

fn exact(constraint: &Option<String>, value: &str) -> bool {
    constraint.as_deref().map_or(true, |wanted| wanted == value)
}

/// Records of one filter selection, in their original order.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a PropertyRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn from_records(records: Vec<&'a PropertyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[&'a PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Distinct values per filter dimension, sorted, blanks dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub zones: Vec<String>,
    pub urban_subzones: Vec<String>,
    pub rural_districts: Vec<String>,
    pub land_uses: Vec<String>,
    pub horizontal_property: Vec<&'static str>,
}

impl FilterOptions {
    pub fn from_table(table: &PropertyTable) -> Self {
        let distinct = |field: fn(&PropertyRecord) -> &str| -> Vec<String> {
            table
                .records()
                .iter()
                .map(field)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        Self {
            zones: distinct(|record| record.zone.as_str()),
            urban_subzones: distinct(|record| record.urban_subzone.as_str()),
            rural_districts: distinct(|record| record.rural_district.as_str()),
            land_uses: distinct(|record| record.land_use.as_str()),
            horizontal_property: HORIZONTAL_PROPERTY_OPTIONS.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::predial::domain::RecordId;
    use rust_decimal::Decimal;

    fn record(id: usize, zone: &str, subzone: &str, land_use: &str, ph: &str) -> PropertyRecord {
        PropertyRecord {
            id: RecordId(id),
            cadastral_code: format!("{id:04}"),
            zone: zone.to_string(),
            urban_subzone: subzone.to_string(),
            rural_district: String::new(),
            land_use: land_use.to_string(),
            horizontal_property: ph.to_string(),
            assessed_value: Decimal::ZERO,
            tax_due: Decimal::ZERO,
            tax_collected: Decimal::ZERO,
            tax_discount: Decimal::ZERO,
            built_area: Decimal::ZERO,
            paid: false,
            financing_status: String::new(),
            latitude: None,
            longitude: None,
        }
    }

    fn table() -> PropertyTable {
        PropertyTable::new(vec![
            record(0, "URBANO", "Centro", "Habitacional", "SÍ"),
            record(1, "URBANO", "Norte", "Comercial", "No"),
            record(2, "RURAL", "", "Agropecuario", "no"),
            record(3, "urbano", "Centro", "Habitacional", "Sí"),
        ])
    }

    fn ids(view: &FilteredView<'_>) -> Vec<usize> {
        view.records().iter().map(|record| record.id.0).collect()
    }

    #[test]
    fn unconstrained_selection_keeps_everything() {
        let table = table();
        let selection = FilterSelection::default();
        assert!(selection.is_unconstrained());
        assert_eq!(ids(&selection.apply(&table)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn zone_match_is_case_sensitive() {
        let table = table();
        let selection = FilterSelection {
            zone: Some("URBANO".to_string()),
            ..FilterSelection::default()
        };
        assert_eq!(ids(&selection.apply(&table)), vec![0, 1]);
    }

    #[test]
    fn horizontal_property_match_ignores_case() {
        let table = table();
        let selection = FilterSelection {
            horizontal_property: Some("Sí".to_string()),
            ..FilterSelection::default()
        };
        assert_eq!(ids(&selection.apply(&table)), vec![0, 3]);

        let selection = FilterSelection {
            horizontal_property: Some("NO".to_string()),
            ..FilterSelection::default()
        };
        assert_eq!(ids(&selection.apply(&table)), vec![1, 2]);
    }

    #[test]
    fn constraints_are_conjunctive() {
        let table = table();
        let selection = FilterSelection {
            urban_subzone: Some("Centro".to_string()),
            land_use: Some("Habitacional".to_string()),
            zone: Some("urbano".to_string()),
            ..FilterSelection::default()
        };
        assert_eq!(ids(&selection.apply(&table)), vec![3]);
    }

    #[test]
    fn unmatched_selection_yields_empty_view() {
        let table = table();
        let selection = FilterSelection {
            rural_district: Some("La Palma".to_string()),
            ..FilterSelection::default()
        };
        let view = selection.apply(&table);
        assert!(view.is_empty());
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn options_are_sorted_distinct_and_skip_blanks() {
        let options = FilterOptions::from_table(&table());
        assert_eq!(options.zones, vec!["RURAL", "URBANO", "urbano"]);
        assert_eq!(options.urban_subzones, vec!["Centro", "Norte"]);
        assert!(options.rural_districts.is_empty());
        assert_eq!(
            options.land_uses,
            vec!["Agropecuario", "Comercial", "Habitacional"]
        );
        assert_eq!(options.horizontal_property, vec!["Sí", "No"]);
    }
}
