//! CLI argument parsing and validation
//!
//! This module provides the command-line interface for demanda.
//!
//! # Usage
//!
//! ```bash
//! demanda train config.yaml
//! demanda train config.yaml --output-dir ./artifacts --n-estimators 100
//! demanda validate config.yaml
//! demanda info ./artifacts --format json
//! demanda serve --artifacts ./artifacts --port 5000
//! ```

use crate::server::ServerConfig;
use clap::{Parser, Subcommand, ValueEnum};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Demanda: retail demand forecasting
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "demanda")]
#[command(author = "PAIML")]
#[command(version)]
#[command(about = "Train a random-forest demand model and serve predictions over HTTP")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Train a model from YAML configuration
    Train(TrainArgs),

    /// Validate a configuration file without training
    Validate(ValidateArgs),

    /// Summarize a trained artifact directory
    Info(InfoArgs),

    /// Serve predictions over HTTP
    Serve(ServeArgs),
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Override output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override number of trees
    #[arg(long)]
    pub n_estimators: Option<usize>,

    /// Override maximum tree depth
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Dry run (validate config but don't train)
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML configuration file
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show detailed validation report
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Directory holding the trained artifacts
    #[arg(value_name = "ARTIFACT_DIR")]
    pub artifacts: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,
}

/// Arguments for the serve command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ServeArgs {
    /// Directory holding the trained artifacts
    #[arg(short, long, default_value = "./artifacts")]
    pub artifacts: PathBuf,

    /// Address to bind
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    pub host: IpAddr,

    /// Port to bind
    #[arg(short, long, default_value_t = 5000)]
    pub port: u16,

    /// Disable permissive CORS headers
    #[arg(long)]
    pub no_cors: bool,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            address: SocketAddr::new(self.host, self.port),
            artifacts_dir: self.artifacts.clone(),
            cors_enabled: !self.no_cors,
        }
    }
}

/// Output format for info command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Apply command-line overrides to a TrainSpec
pub fn apply_overrides(spec: &mut super::TrainSpec, args: &TrainArgs) {
    if let Some(output_dir) = &args.output_dir {
        spec.output.dir = output_dir.clone();
    }
    if let Some(seed) = args.seed {
        spec.seed = seed;
    }
    if let Some(n_estimators) = args.n_estimators {
        spec.forest.n_estimators = n_estimators;
    }
    if let Some(max_depth) = args.max_depth {
        spec.forest.max_depth = max_depth;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_train_command() {
        let cli = parse_args(["demanda", "train", "config.yaml"]).unwrap();
        match cli.command {
            Command::Train(args) => {
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert!(!args.dry_run);
                assert_eq!(args.seed, None);
            }
            _ => panic!("Expected Train command"),
        }
    }

    #[test]
    fn test_parse_train_with_overrides() {
        let cli = parse_args([
            "demanda",
            "train",
            "config.yaml",
            "--output-dir",
            "./out",
            "--seed",
            "7",
            "--n-estimators",
            "50",
            "--max-depth",
            "10",
            "--dry-run",
        ])
        .unwrap();

        match cli.command {
            Command::Train(args) => {
                assert_eq!(args.output_dir, Some(PathBuf::from("./out")));
                assert_eq!(args.seed, Some(7));
                assert_eq!(args.n_estimators, Some(50));
                assert_eq!(args.max_depth, Some(10));
                assert!(args.dry_run);
            }
            _ => panic!("Expected Train command"),
        }
    }

    #[test]
    fn test_parse_validate_command() {
        let cli = parse_args(["demanda", "validate", "config.yaml", "--detailed"]).unwrap();
        match cli.command {
            Command::Validate(args) => {
                assert_eq!(args.config, PathBuf::from("config.yaml"));
                assert!(args.detailed);
            }
            _ => panic!("Expected Validate command"),
        }
    }

    #[test]
    fn test_parse_info_command() {
        let cli = parse_args(["demanda", "info", "./artifacts", "--format", "json"]).unwrap();
        match cli.command {
            Command::Info(args) => {
                assert_eq!(args.artifacts, PathBuf::from("./artifacts"));
                assert_eq!(args.format, OutputFormat::Json);
            }
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = parse_args(["demanda", "serve"]).unwrap();
        match cli.command {
            Command::Serve(args) => {
                let config = args.server_config();
                assert_eq!(config, ServerConfig::default());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_parse_serve_with_options() {
        let cli = parse_args([
            "demanda",
            "serve",
            "--artifacts",
            "/srv/model",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--no-cors",
        ])
        .unwrap();
        match cli.command {
            Command::Serve(args) => {
                let config = args.server_config();
                assert_eq!(config.address.to_string(), "0.0.0.0:8080");
                assert_eq!(config.artifacts_dir, PathBuf::from("/srv/model"));
                assert!(!config.cors_enabled);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_parse_serve_rejects_bad_host() {
        assert!(parse_args(["demanda", "serve", "--host", "not-an-ip"]).is_err());
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(["demanda", "-v", "validate", "c.yaml"]).unwrap();
        assert!(cli.verbose);
        assert!(!cli.quiet);

        let cli = parse_args(["demanda", "serve", "--quiet"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_info_format_values() {
        let format_of = |value: &str| match parse_args(["demanda", "info", "a", "--format", value])
            .map(|cli| cli.command)
        {
            Ok(Command::Info(args)) => Ok(args.format),
            Ok(_) => panic!("Expected Info command"),
            Err(e) => Err(e.kind()),
        };

        assert_eq!(format_of("text"), Ok(OutputFormat::Text));
        assert_eq!(format_of("JSON"), Ok(OutputFormat::Json));
        assert_eq!(format_of("yaml"), Ok(OutputFormat::Yaml));
        assert_eq!(format_of("xml"), Err(clap::error::ErrorKind::InvalidValue));
    }

    #[test]
    fn test_info_format_defaults_to_text() {
        match parse_args(["demanda", "info", "./artifacts"]).unwrap().command {
            Command::Info(args) => assert_eq!(args.format, OutputFormat::Text),
            _ => panic!("Expected Info command"),
        }
    }

    #[test]
    fn test_apply_overrides() {
        let mut spec: super::super::TrainSpec =
            serde_yaml::from_str("data:\n  path: sales.csv\n").unwrap();
        let args = TrainArgs {
            config: PathBuf::from("config.yaml"),
            output_dir: Some(PathBuf::from("/tmp/out")),
            seed: Some(9),
            n_estimators: Some(25),
            max_depth: None,
            dry_run: false,
        };

        apply_overrides(&mut spec, &args);
        assert_eq!(spec.output.dir, PathBuf::from("/tmp/out"));
        assert_eq!(spec.seed, 9);
        assert_eq!(spec.forest.n_estimators, 25);
        assert_eq!(spec.forest.max_depth, 30);
    }

    #[test]
    fn test_missing_subcommand() {
        assert!(parse_args(["demanda"]).is_err());
    }
}
