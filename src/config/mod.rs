//! Declarative YAML configuration
//!
//! Training runs are described by a single YAML file; every section except
//! `data` has defaults.
//!
//! # Example
//!
//! ```yaml
//! data:
//!   path: sales.csv
//!
//! output:
//!   dir: ./artifacts
//!   format: json
//!
//! balance:
//!   threshold: 20
//!   factor: 3
//!
//! split:
//!   test_size: 0.2
//!
//! forest:
//!   n_estimators: 300
//!   max_depth: 30
//!
//! seed: 42
//! ```

mod builder;
mod cli;
mod schema;
mod train;
mod validate;

#[cfg(test)]
mod tests;


pub use builder::{build_forest_params, build_pipeline_config, build_save_config};
pub use cli::{
    apply_overrides, parse_args, Cli, Command, InfoArgs, OutputFormat, ServeArgs, TrainArgs,
    ValidateArgs,
};
pub use schema::{BalanceSpec, DataConfig, ForestSpec, OutputConfig, SplitSpec, TrainSpec};
pub use train::{load_config, parse_config, train_from_spec, train_from_yaml, TrainingSummary};
pub use validate::{validate_config, ValidationError};
