//! Command implementations for the transaction cleaner CLI
//!
//! Sets up logging, layers configuration and dispatches to the cleaning
//! pipeline or the output validator.

use crate::cleaner::TransactionCleaner;
use crate::cli::args::{Args, CleanArgs, Commands, ValidateArgs};
use crate::config::CleanerConfig;
use crate::models::RunOutcome;
use crate::validation::validate_output;

use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info, warn};

/// Main command runner
///
/// Runs `clean` with default settings when no subcommand was given.
pub fn run(args: Args) -> Result<()> {
    let command = args.get_command();

    setup_logging(&command);
    debug!("Command line arguments: {:?}", command);

    match command {
        Commands::Clean(clean_args) => run_clean(&clean_args),
        Commands::Validate(validate_args) => run_validate(&validate_args),
    }
}

/// Set up structured logging based on CLI arguments
fn setup_logging(command: &Commands) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = command.get_log_level();
    let quiet = log_level == "error";

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ecommerce_cleaner={}", log_level)));

    // try_init: a subscriber may already be installed when embedded
    let installed = if quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    if installed.is_ok() {
        debug!("Logging initialized at level: {}", log_level);
    }
}

/// Load configuration using layered approach (defaults -> file -> args)
pub fn load_configuration(args: &CleanArgs) -> Result<CleanerConfig> {
    args.validate().context("Invalid command line arguments")?;

    let mut config = match &args.config_file {
        Some(path) => {
            info!("Using config file: {}", path.display());
            CleanerConfig::from_toml_file(path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?
        }
        None => {
            info!("No config file given, using defaults");
            CleanerConfig::default()
        }
    };

    apply_cli_overrides(&mut config, args);

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut CleanerConfig, args: &CleanArgs) {
    if let Some(input_path) = &args.input_path {
        config.input_path = input_path.clone();
    }
    if let Some(output_path) = &args.output_path {
        config.output_path = output_path.clone();
    }
    if let Some(preview_rows) = args.preview_rows {
        config.preview_rows = preview_rows;
    }
    if !args.show_progress() {
        config.show_progress = false;
    }
}

fn run_clean(args: &CleanArgs) -> Result<()> {
    let config = load_configuration(args)?;
    debug!("Loaded configuration: {:?}", config);

    let cleaner = TransactionCleaner::new(config).context("Failed to create cleaner")?;
    let outcome = cleaner.run().with_context(|| {
        format!(
            "Failed to clean {}",
            cleaner.config().input_path.display()
        )
    })?;

    match outcome {
        RunOutcome::Completed(stats) => {
            info!(
                "Wrote {} rows to {} ({} removed)",
                stats.rows_written,
                stats.output_path.display(),
                stats.rows_removed()
            );
        }
        RunOutcome::SourceMissing { path } => {
            warn!("Nothing written, {} is missing", path.display());
        }
    }

    Ok(())
}

fn run_validate(args: &ValidateArgs) -> Result<()> {
    let report = validate_output(&args.file, &args.datetime_format)
        .with_context(|| format!("Failed to validate {}", args.file.display()))?;

    if report.is_valid() {
        if !args.quiet {
            println!(
                "{} {} ({} rows checked)",
                "Valid:".bright_green().bold(),
                report.path.display(),
                report.rows_checked
            );
        }
        return Ok(());
    }

    println!(
        "{} {} ({} rows checked)",
        "Invalid:".bright_red().bold(),
        report.path.display(),
        report.rows_checked
    );
    for violation in &report.violations {
        println!("  {} {}", "-".bright_red(), violation);
    }

    anyhow::bail!(
        "{} failed validation with {} violation(s)",
        report.path.display(),
        report.violations.len()
    )
}
