//! Engine binary for the labor market simulation.
//!
//! This is the process wrapper around `labor-core`. It carries no
//! simulation logic of its own.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `$LABOR_CONFIG` or `labor-config.yaml`
//! 2. Initialize structured logging (tracing) from the `logging` section
//! 3. Run the tick sequence with a pacing callback
//! 4. Log the result and print the run report as JSON on stdout

mod error;
mod pacing;

use std::io::Write;
use std::path::PathBuf;

use labor_core::SimulationConfig;
use labor_core::config::{LogFormat, LoggingConfig};
use labor_types::RunReport;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;
use crate::pacing::PacingCallback;

/// Environment variable naming the config file.
const CONFIG_ENV: &str = "LABOR_CONFIG";

/// Config file used when `LABOR_CONFIG` is unset.
const DEFAULT_CONFIG_PATH: &str = "labor-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, logging setup, the run, or report
/// output fails.
fn main() -> Result<(), EngineError> {
    // 1. Load configuration.
    let (config, source) = load_config()?;

    // 2. Initialize structured logging.
    init_logging(&config.logging)?;
    info!("labor-engine starting");
    info!(
        source = source.as_deref().unwrap_or("defaults"),
        world_name = config.world.name,
        seed = config.world.seed,
        ticks = config.world.ticks,
        tick_interval_ms = config.world.tick_interval_ms,
        workers = config.population.worker_count,
        "Configuration loaded"
    );

    // 3. Run the simulation.
    let mut pacing = PacingCallback::new(config.world.tick_interval_ms);
    let report = labor_core::run_tick_sequence(&config, &mut pacing)?;

    // 4. Report.
    info!(
        run_id = %report.run_id,
        ticks = report.ticks.len(),
        hires = report.total_hires(),
        negotiations = report.negotiations.len(),
        "Simulation complete"
    );
    write_report(&report)?;

    info!("labor-engine shut down cleanly");
    Ok(())
}

/// Load configuration.
///
/// An explicit `LABOR_CONFIG` path must exist. The default path falls back
/// to built-in defaults when the file is absent. Returns the config and the
/// path it was read from, if any.
fn load_config() -> Result<(SimulationConfig, Option<String>), EngineError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        let config = SimulationConfig::from_file(&path)?;
        return Ok((config, Some(path.display().to_string())));
    }
    let path = PathBuf::from(DEFAULT_CONFIG_PATH);
    if path.exists() {
        let config = SimulationConfig::from_file(&path)?;
        Ok((config, Some(path.display().to_string())))
    } else {
        Ok((SimulationConfig::default(), None))
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(logging: &LoggingConfig) -> Result<(), EngineError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&logging.level).map_err(|e| EngineError::Logging {
            level: logging.level.clone(),
            message: e.to_string(),
        })?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
    Ok(())
}

/// Print the report as pretty JSON on stdout.
fn write_report(report: &RunReport) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(report)?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
