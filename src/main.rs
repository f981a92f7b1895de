//! Demanda CLI
//!
//! Training and serving entry point for the demanda library.
//!
//! # Usage
//!
//! ```bash
//! # Train from config
//! demanda train config.yaml
//!
//! # Train with overrides
//! demanda train config.yaml --n-estimators 100 --seed 7
//!
//! # Validate config
//! demanda validate config.yaml --detailed
//!
//! # Summarize trained artifacts
//! demanda info ./artifacts --format json
//!
//! # Serve predictions
//! demanda serve --artifacts ./artifacts --port 5000
//! ```

use clap::Parser;
use demanda::config::{
    apply_overrides, build_pipeline_config, load_config, train_from_spec, validate_config, Cli,
    Command, InfoArgs, OutputFormat, ServeArgs, TrainArgs, ValidateArgs,
};
use demanda::io::load_artifacts;
use demanda::server::DemandServer;
use demanda::train::TrainingReport;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };
    init_tracing(log_level);

    let result = match cli.command {
        Command::Train(args) => run_train(args, log_level),
        Command::Validate(args) => run_validate(args, log_level),
        Command::Info(args) => run_info(args, log_level),
        Command::Serve(args) => run_serve(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

/// `RUST_LOG` wins over the CLI flags when set
fn init_tracing(level: LogLevel) {
    let default = match level {
        LogLevel::Quiet => "error",
        LogLevel::Normal => "demanda=info,tower_http=info",
        LogLevel::Verbose => "demanda=debug,tower_http=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Demanda: Training from {}", args.config.display()),
    );

    // Load and validate config
    let mut spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    // Apply command-line overrides, then re-check them
    apply_overrides(&mut spec, &args);
    validate_config(&spec).map_err(|e| format!("Invalid override: {e}"))?;

    if args.dry_run {
        let pipeline = build_pipeline_config(&spec);
        log(
            level,
            LogLevel::Normal,
            "Dry run - config validated successfully",
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Data: {}", spec.data.path.display()),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!(
                "  Forest: {} trees, max depth {}",
                pipeline.forest.n_estimators, pipeline.forest.tree.max_depth
            ),
        );
        log(
            level,
            LogLevel::Verbose,
            &format!("  Output: {}", spec.output.dir.display()),
        );
        return Ok(());
    }

    let summary = train_from_spec(&spec).map_err(|e| format!("Training error: {e}"))?;

    if level != LogLevel::Quiet {
        print_report(&summary.report);
        println!();
        println!("Artifacts written to {}", summary.artifacts_dir.display());
        if level == LogLevel::Verbose {
            for path in &summary.artifact_paths {
                println!("  {}", path.display());
            }
        }
    }

    log(level, LogLevel::Normal, "Training complete!");
    Ok(())
}

fn print_report(report: &TrainingReport) {
    println!();
    println!("Training Report:");
    println!(
        "  Rows: {} loaded, {} dropped",
        report.rows_loaded, report.rows_dropped
    );
    println!(
        "  Balance: {} low, {} high -> {} resampled ({} total)",
        report.balance.low_demand,
        report.balance.high_demand,
        report.balance.high_resampled,
        report.balance.total
    );
    println!(
        "  Split: {} train / {} test",
        report.train_rows, report.test_rows
    );
    println!("  MSE: {:.4}", report.evaluation.mse);
    println!("  MAE: {:.4}", report.evaluation.mae);
    println!("  R² Score: {:.2}%", report.evaluation.r2_percent);
    println!("  Max demand: {}", report.max_demand);
    if let Some(probe) = &report.probe {
        println!(
            "  Probe (high-demand input): {:.2} units ({:.2}%)",
            probe.predicted_units, probe.predicted_demand_percentage
        );
    }
    println!("  Duration: {:.2}s", report.duration_secs);
}

fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let spec = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        println!();
        println!("Configuration Summary:");
        println!("  Data: {}", spec.data.path.display());
        println!();
        println!("  Output dir: {}", spec.output.dir.display());
        println!("  Output format: {}", spec.output.format.extension());
        println!();
        println!("  High-demand threshold: {}", spec.balance.threshold);
        println!("  Resampling factor: {}", spec.balance.factor);
        println!("  Test size: {}", spec.split.test_size);
        println!();
        println!("  Trees: {}", spec.forest.n_estimators);
        println!("  Max depth: {}", spec.forest.max_depth);
        println!("  Min samples split: {}", spec.forest.min_samples_split);
        println!("  Min samples leaf: {}", spec.forest.min_samples_leaf);
        println!("  Bootstrap: {}", spec.forest.bootstrap);
        println!("  Seed: {}", spec.seed);
    }

    Ok(())
}

fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let bundle = load_artifacts(&args.artifacts).map_err(|e| format!("Artifact error: {e}"))?;
    let summary = bundle.summary();

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Artifact Info:");
            println!();
            println!("  Directory: {}", args.artifacts.display());
            println!("  Trees: {}", summary.n_estimators);
            println!("  Features: {}", summary.n_features);
            println!("  Max tree depth: {}", summary.max_tree_depth);
            println!("  Total leaves: {}", summary.total_leaves);
            println!("  Scaler samples: {}", summary.scaler_samples);
            println!("  Max demand: {}", summary.max_demand);
            println!("  Store IDs: {}", summary.n_store_ids);
            println!("  SKU IDs: {}", summary.n_sku_ids);
            println!("  R² Score: {:.2}%", summary.r2_score);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&summary)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&summary)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}

fn run_serve(args: ServeArgs) -> Result<(), String> {
    let server = DemandServer::new(args.server_config());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {e}"))?;

    runtime
        .block_on(server.run())
        .map_err(|e| format!("Server error: {e}"))
}
