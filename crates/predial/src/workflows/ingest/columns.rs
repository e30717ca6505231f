pub(crate) const ASSESSED_VALUE: &str = "avaluo_catastral";
pub(crate) const TAX_DUE: &str = "valor_impuesto_a_pagar";
pub(crate) const TAX_COLLECTED: &str = "recaudo_predial";
pub(crate) const TAX_DISCOUNT: &str = "descuentos_impuesto_predial";
pub(crate) const PAYMENT_STATUS: &str = "pago_impuesto_predial";
pub(crate) const ZONE: &str = "sector";
pub(crate) const URBAN_SUBZONE: &str = "sector_urbano";
pub(crate) const RURAL_DISTRICT: &str = "vereda";
pub(crate) const LAND_USE: &str = "destino_economico_predio";
pub(crate) const HORIZONTAL_PROPERTY: &str = "propiedad_horizontal";
pub(crate) const LATITUDE: &str = "latitud";
pub(crate) const LONGITUDE: &str = "longitud";
pub(crate) const CADASTRAL_CODE: &str = "codigo_igac";
pub(crate) const BUILT_AREA: &str = "area_construida";
pub(crate) const FINANCING_STATUS: &str = "financiacion_impuesto_predial";

/// Canonical columns every upload must carry after normalization.
pub const REQUIRED_COLUMNS: [&str; 15] = [
    TAX_DUE,
    TAX_COLLECTED,
    PAYMENT_STATUS,
    ASSESSED_VALUE,
    TAX_DISCOUNT,
    ZONE,
    URBAN_SUBZONE,
    RURAL_DISTRICT,
    LAND_USE,
    HORIZONTAL_PROPERTY,
    LATITUDE,
    LONGITUDE,
    CADASTRAL_CODE,
    BUILT_AREA,
    FINANCING_STATUS,
];

const ACCENT_FOLDS: [(char, char); 6] = [
    ('á', 'a'),
    ('é', 'e'),
    ('í', 'i'),
    ('ó', 'o'),
    ('ú', 'u'),
    ('ñ', 'n'),
];

/// Maps a raw header onto its canonical spelling: trimmed, lower-cased,
/// spaces as underscores, and the Spanish accented letters folded to ASCII.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|ch| match ch {
            ' ' => '_',
            other => ACCENT_FOLDS
                .iter()
                .find(|(accented, _)| *accented == other)
                .map(|(_, plain)| *plain)
                .unwrap_or(other),
        })
        .collect()
}

/// Canonical column name to position in the raw header row.
#[derive(Debug)]
pub(crate) struct ColumnIndex {
    positions: Vec<(&'static str, usize)>,
}

impl ColumnIndex {
    /// Resolves every required column, or returns the full list of the
    /// ones that are absent, in canonical order.
    pub(crate) fn resolve<'a, I>(headers: I) -> Result<Self, Vec<String>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let normalized: Vec<String> = headers.into_iter().map(normalize_column_name).collect();
        let mut positions = Vec::with_capacity(REQUIRED_COLUMNS.len());
        let mut missing = Vec::new();

        for column in REQUIRED_COLUMNS {
            // First occurrence wins when two raw headers normalize alike.
            match normalized.iter().position(|name| name == column) {
                Some(position) => positions.push((column, position)),
                None => missing.push(column.to_string()),
            }
        }

        if missing.is_empty() {
            Ok(Self { positions })
        } else {
            Err(missing)
        }
    }

    pub(crate) fn position(&self, column: &str) -> Option<usize> {
        self.positions
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, position)| *position)
    }
}
