//! Historical sales data
//!
//! Loads sale observations from CSV and derives the dataset-level facts the
//! artifact bundle records: the identifier universe and the demand ceiling.

mod load;
mod record;

#[cfg(test)]
mod tests;

pub use load::{load_dataset, read_dataset, Dataset, REQUIRED_COLUMNS};
pub use record::{id_from_number, Record, ValidIds, TARGET};
