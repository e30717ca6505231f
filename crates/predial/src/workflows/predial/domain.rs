use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tokens accepted as an affirmative answer in yes/no columns.
pub const AFFIRMATIVE_TOKENS: [&str; 2] = ["si", "sí"];

/// Returns true when `raw`, lower-cased, is one of [`AFFIRMATIVE_TOKENS`].
pub fn is_affirmative(raw: &str) -> bool {
    let lowered = raw.to_lowercase();
    AFFIRMATIVE_TOKENS.contains(&lowered.as_str())
}

/// Position of a record in the uploaded table.
///
/// Cadastral codes repeat in real exports, so cohorts deduplicate on this
/// identifier instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub usize);

/// Urban/rural split used by the general-information summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Urban,
    Rural,
}

impl ZoneKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Urban => "Urbano",
            Self::Rural => "Rural",
        }
    }

    fn from_raw(raw: &str) -> Option<Self> {
        match raw.to_uppercase().as_str() {
            "URBANO" => Some(Self::Urban),
            "RURAL" => Some(Self::Rural),
            _ => None,
        }
    }
}

/// Canonical per-property record produced by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: RecordId,
    pub cadastral_code: String,
    pub zone: String,
    pub urban_subzone: String,
    pub rural_district: String,
    pub land_use: String,
    pub horizontal_property: String,
    pub assessed_value: Decimal,
    pub tax_due: Decimal,
    pub tax_collected: Decimal,
    pub tax_discount: Decimal,
    pub built_area: Decimal,
    pub paid: bool,
    pub financing_status: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PropertyRecord {
    pub fn balance(&self) -> Decimal {
        self.tax_due - self.tax_collected
    }

    pub fn is_horizontal_property(&self) -> bool {
        is_affirmative(&self.horizontal_property)
    }

    pub fn zone_kind(&self) -> Option<ZoneKind> {
        ZoneKind::from_raw(&self.zone)
    }

    pub fn has_construction(&self) -> bool {
        !self.built_area.is_zero()
    }

    /// Both coordinates, when the record can be placed on a map.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }
}

/// Normalized upload. Immutable once built; every analysis borrows it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyTable {
    records: Vec<PropertyRecord>,
}

impl PropertyTable {
    pub fn new(records: Vec<PropertyRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn affirmative_tokens_ignore_case_and_accent_variants() {
        for raw in ["si", "SI", "Si", "sí", "SÍ", "Sí"] {
            assert!(is_affirmative(raw), "{raw} should be affirmative");
        }
        for raw in ["no", "", "s", "yes", "nan", "si "] {
            assert!(!is_affirmative(raw), "{raw} should not be affirmative");
        }
    }

    #[test]
    fn zone_kind_matches_case_insensitively() {
        assert_eq!(ZoneKind::from_raw("urbano"), Some(ZoneKind::Urban));
        assert_eq!(ZoneKind::from_raw("Rural"), Some(ZoneKind::Rural));
        assert_eq!(ZoneKind::from_raw("suburbano"), None);
    }

    #[test]
    fn balance_is_due_minus_collected() {
        let record = PropertyRecord {
            id: RecordId(0),
            cadastral_code: "001".to_string(),
            zone: "URBANO".to_string(),
            urban_subzone: String::new(),
            rural_district: String::new(),
            land_use: String::new(),
            horizontal_property: "No".to_string(),
            assessed_value: dec!(1000),
            tax_due: dec!(120.50),
            tax_collected: dec!(20.25),
            tax_discount: Decimal::ZERO,
            built_area: Decimal::ZERO,
            paid: false,
            financing_status: "no".to_string(),
            latitude: Some(4.6),
            longitude: None,
        };
        assert_eq!(record.balance(), dec!(100.25));
        assert!(!record.has_construction());
        assert!(record.coordinates().is_none());
        assert!(!record.is_horizontal_property());
    }
}
