//! Integration tests for config module

use super::*;
use crate::io::ArtifactFormat;
use std::io::Write;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_end_to_end_config_loading() {
    let yaml = r#"
data:
  path: data/train.csv

output:
  dir: ./models/latest
  format: yaml
  pretty: false

balance:
  threshold: 25
  factor: 2

split:
  test_size: 0.25

forest:
  n_estimators: 120
  max_depth: 12
  min_samples_split: 4
  min_samples_leaf: 2
  bootstrap: true

seed: 1234
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(yaml.as_bytes()).unwrap();

    let spec = train::load_config(temp_file.path()).unwrap();

    assert_eq!(spec.data.path, PathBuf::from("data/train.csv"));
    assert_eq!(spec.output.format, ArtifactFormat::Yaml);
    assert!(!spec.output.pretty);
    assert_eq!(spec.balance.threshold, 25.0);
    assert_eq!(spec.balance.factor, 2);
    assert_eq!(spec.split.test_size, 0.25);
    assert_eq!(spec.forest.n_estimators, 120);
    assert_eq!(spec.forest.min_samples_leaf, 2);
    assert_eq!(spec.seed, 1234);
}

#[test]
fn test_minimal_config() {
    let yaml = r#"
data:
  path: sales.csv
"#;

    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(yaml.as_bytes()).unwrap();

    let spec = train::load_config(temp_file.path()).unwrap();

    // Check defaults are applied
    assert_eq!(spec.output.dir, PathBuf::from("./artifacts"));
    assert_eq!(spec.output.format, ArtifactFormat::Json);
    assert_eq!(spec.balance.threshold, 20.0);
    assert_eq!(spec.balance.factor, 3);
    assert_eq!(spec.split.test_size, 0.2);
    assert_eq!(spec.forest, ForestSpec::default());
    assert_eq!(spec.forest.n_estimators, 300);
    assert_eq!(spec.seed, 42);
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let spec = parse_config("data:\n  path: a.csv\nforest:\n  max_depth: 5\n").unwrap();
    assert_eq!(spec.forest.max_depth, 5);
    assert_eq!(spec.forest.n_estimators, 300);
    assert_eq!(spec.forest.min_samples_split, 2);
}

#[test]
fn test_unknown_artifact_format_rejected() {
    assert!(parse_config("data:\n  path: a.csv\noutput:\n  format: pickle\n").is_err());
}

#[test]
fn test_train_from_yaml_writes_artifacts() {
    let dir = TempDir::new().unwrap();
    let csv_path = dir.path().join("sales.csv");

    let mut csv = String::from(
        "record_ID,week,store_id,sku_id,total_price,base_price,is_featured_sku,is_display_sku,units_sold\n",
    );
    for i in 0..60 {
        let base = 100 + (i % 4) * 10;
        csv.push_str(&format!(
            "{i},17/01/11,{},{},{},{},{},{},{}\n",
            i % 3 + 1,
            i % 5 + 200,
            base - (i % 3) * 5,
            base,
            i % 2,
            (i / 2) % 2,
            (i * 7) % 45
        ));
    }
    std::fs::write(&csv_path, csv).unwrap();

    let out_dir = dir.path().join("artifacts");
    let yaml = format!(
        "data:\n  path: {}\noutput:\n  dir: {}\nforest:\n  n_estimators: 6\n",
        csv_path.display(),
        out_dir.display()
    );
    let config_path = dir.path().join("config.yaml");
    std::fs::write(&config_path, yaml).unwrap();

    let summary = train_from_yaml(&config_path).unwrap();
    assert_eq!(summary.artifact_paths.len(), 5);
    assert_eq!(summary.artifacts_dir, out_dir);
    assert_eq!(summary.report.rows_loaded, 60);
    assert!(out_dir.join("model.json").is_file());

    let bundle = crate::io::load_artifacts(&out_dir).unwrap();
    assert_eq!(bundle.estimator.n_estimators(), 6);
    assert_eq!(bundle.max_demand, summary.report.max_demand);
}
