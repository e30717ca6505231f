//! Record normalizer: turns a raw predial export into a [`PropertyTable`].

mod coerce;
mod columns;
mod parser;

pub use columns::{normalize_column_name, REQUIRED_COLUMNS};

use crate::workflows::predial::PropertyTable;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("upload is missing required columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },
    #[error("failed to read predial export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid predial CSV data: {0}")]
    Csv(#[from] csv::Error),
}

pub struct PredialImporter;

impl PredialImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<PropertyTable, IngestError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<PropertyTable, IngestError> {
        match parser::parse_records(reader) {
            Ok(records) => {
                debug!(records = records.len(), "normalized predial export");
                Ok(PropertyTable::new(records))
            }
            Err(err) => {
                if let IngestError::Schema { missing } = &err {
                    warn!(?missing, "rejected predial export");
                }
                Err(err)
            }
        }
    }
}
