//! CSV ingestion

use super::record::{id_from_number, Record, ValidIds};
use crate::{Error, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

/// Columns that must be present in the CSV header
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "store_id",
    "sku_id",
    "total_price",
    "base_price",
    "is_featured_sku",
    "is_display_sku",
    "units_sold",
];

/// A row as read from disk. Empty or unparseable cells become `None`.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default, deserialize_with = "csv::invalid_option")]
    store_id: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    sku_id: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    total_price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    base_price: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    is_featured_sku: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    is_display_sku: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    units_sold: Option<f64>,
}

impl RawRow {
    fn into_record(self) -> Option<Record> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());

        let units_sold = finite(self.units_sold).filter(|u| *u >= 0.0)?;
        Some(Record {
            store_id: id_from_number(self.store_id?)?,
            sku_id: id_from_number(self.sku_id?)?,
            total_price: finite(self.total_price)?,
            base_price: finite(self.base_price)?,
            is_featured_sku: finite(self.is_featured_sku)?,
            is_display_sku: finite(self.is_display_sku)?,
            units_sold,
        })
    }
}

/// Cleaned historical dataset
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,

    /// Rows discarded because a required value was missing or malformed
    pub dropped: usize,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            dropped: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Largest `units_sold` in the dataset, the normalisation constant for
    /// demand percentages
    pub fn max_demand(&self) -> Option<f64> {
        self.records.iter().map(|r| r.units_sold).reduce(f64::max)
    }

    pub fn valid_ids(&self) -> ValidIds {
        ValidIds::from_records(&self.records)
    }
}

/// Load a dataset from a CSV file
///
/// Rows with a missing, non-numeric or non-finite required value are
/// dropped, as are rows whose identifiers are not integral or whose
/// `units_sold` is negative. Extra columns are ignored.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let dataset = read_dataset(file)?;

    info!(
        path = %path.display(),
        rows = dataset.len(),
        dropped = dataset.dropped,
        "Loaded sales dataset"
    );
    Ok(dataset)
}

/// Read a dataset from any CSV source with a header row.
///
/// Short rows are read rather than rejected; their missing cells count as
/// missing values and the row is dropped.
pub fn read_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::MissingColumn(column.to_string()));
        }
    }

    let mut dataset = Dataset::default();
    for (line, row) in reader.deserialize::<RawRow>().enumerate() {
        match row?.into_record() {
            Some(record) => dataset.records.push(record),
            None => {
                debug!(line = line + 2, "Dropping incomplete row");
                dataset.dropped += 1;
            }
        }
    }

    if dataset.dropped > 0 {
        warn!(dropped = dataset.dropped, "Dropped incomplete rows");
    }

    Ok(dataset)
}
