use super::*;
use crate::Error;
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str =
    "record_ID,week,store_id,sku_id,total_price,base_price,is_featured_sku,is_display_sku,units_sold";

fn csv(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out
}

#[test]
fn test_read_dataset_parses_rows_and_ignores_extra_columns() {
    let data = csv(&[
        "1,17/01/11,8091,216418,99.0375,111.8625,0,0,20",
        "2,17/01/11,8091,216419,99.0375,99.0375,0,0,28",
    ]);

    let dataset = read_dataset(data.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.dropped, 0);
    assert_eq!(dataset.records[0].store_id, 8091);
    assert_eq!(dataset.records[1].sku_id, 216419);
    assert_eq!(dataset.records[1].units_sold, 28.0);
}

#[test]
fn test_read_dataset_drops_incomplete_rows() {
    let data = csv(&[
        "1,w,1,10,100,110,0,0,5",
        "2,w,1,10,,110,0,0,5",
        "3,w,1,10,100,110,0,0,",
        "4,w,1,abc,100,110,0,0,5",
        "5,w,1.5,10,100,110,0,0,5",
        "6,w,1,10,100,110,1,1,-3",
    ]);

    let dataset = read_dataset(data.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.dropped, 5);
}

#[test]
fn test_read_dataset_drops_short_rows() {
    let data = csv(&[
        "1,w,1,10,100,110,0,0,5",
        "2,w,1,10,100,110",
        "3,w,2,10,90,110,1,0,12",
        "4,w,2,10,90,110,1,0",
    ]);

    let dataset = read_dataset(data.as_bytes()).unwrap();
    assert_eq!(dataset.len(), 2);
    assert_eq!(dataset.dropped, 2);
    assert_eq!(dataset.records[1].units_sold, 12.0);
}

#[test]
fn test_read_dataset_missing_column() {
    let data = "store_id,sku_id,total_price,base_price,is_featured_sku,units_sold\n1,2,3,4,0,5";
    let err = read_dataset(data.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MissingColumn(c) if c == "is_display_sku"));
}

#[test]
fn test_max_demand_and_valid_ids() {
    let data = csv(&[
        "1,w,1,10,100,110,0,0,5",
        "2,w,2,11,100,110,0,0,42",
        "3,w,1,12,100,110,0,0,17",
    ]);

    let dataset = read_dataset(data.as_bytes()).unwrap();
    assert_eq!(dataset.max_demand(), Some(42.0));

    let ids = dataset.valid_ids();
    assert_eq!(ids.store_ids.len(), 2);
    assert_eq!(ids.sku_ids.len(), 3);
    assert_eq!(ids.max_store(), Some(2));
    assert_eq!(ids.max_sku(), Some(12));
}

#[test]
fn test_max_demand_empty() {
    assert_eq!(Dataset::default().max_demand(), None);
}

#[test]
fn test_valid_ids_numeric_membership() {
    let records = vec![Record {
        store_id: 1,
        sku_id: 2,
        total_price: 100.0,
        base_price: 50.0,
        is_featured_sku: 1.0,
        is_display_sku: 0.0,
        units_sold: 10.0,
    }];
    let ids = ValidIds::from_records(&records);

    assert!(ids.contains_store(1.0));
    assert!(!ids.contains_store(1.5));
    assert!(!ids.contains_store(2.0));
    assert!(ids.contains_sku(2.0));
    assert!(!ids.contains_sku(f64::NAN));
}

#[test]
fn test_id_from_number() {
    assert_eq!(id_from_number(7.0), Some(7));
    assert_eq!(id_from_number(-7.0), Some(-7));
    assert_eq!(id_from_number(7.25), None);
    assert_eq!(id_from_number(f64::INFINITY), None);
    assert_eq!(id_from_number(1e300), None);
}

#[test]
fn test_load_dataset_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(csv(&["1,w,3,30,10,12,1,0,25"]).as_bytes())
        .unwrap();

    let dataset = load_dataset(file.path()).unwrap();
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records[0].is_featured_sku, 1.0);
}

#[test]
fn test_load_dataset_missing_file() {
    let result = load_dataset("/nonexistent/sales.csv");
    assert!(matches!(result, Err(Error::Io(_))));
}
