//! Configuration loading and typed config structures for the labor market
//! simulation.
//!
//! The canonical configuration lives in `labor-config.yaml`. This module
//! defines strongly-typed structs that mirror the YAML structure, a loader,
//! and [`SimulationConfig::validate`], which rejects malformed input before
//! any world is built.
//!
//! Every field has a default, so an empty file is a valid configuration that
//! reproduces the reference market: competition 0.5, initial wage
//! 3,000,000, five ticks, three workers, population 1000.

use std::path::Path;

use labor_agents::{EfficiencyConfig, EmployerConfig, NegotiationConfig};
use labor_world::MarketConfig;
use serde::Deserialize;

use crate::negotiation::StrategyPreset;
use crate::population::WorkerGeneration;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// The configuration parsed but describes an impossible run.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// What is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
///
/// Mirrors the structure of `labor-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SimulationConfig {
    /// Run-level settings (name, seed, tick count, pacing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Market environments and their constants.
    #[serde(default)]
    pub market: MarketSection,

    /// Worker pool parameters.
    #[serde(default)]
    pub population: PopulationConfig,

    /// Negotiation strategy and wage formula constants.
    #[serde(default)]
    pub negotiation: NegotiationSection,

    /// Employer production and cost constants.
    #[serde(default)]
    pub employer: EmployerConfig,

    /// Efficiency decay and hiring gate.
    #[serde(default)]
    pub efficiency: EfficiencyConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SimulationConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        Ok(config)
    }

    /// Check that the configuration describes a runnable simulation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.worker_count == 0 {
            return invalid("population.worker_count must be at least 1");
        }
        positive("population.initial_wage", self.population.initial_wage)?;
        self.population.generation.validate()?;

        non_negative("market.competition", self.market.competition)?;
        non_negative("market.secondary_competition", self.market.secondary_competition)?;
        non_negative("market.primary_demand", self.market.primary_demand)?;
        non_negative("market.primary_supply", self.market.primary_supply)?;
        non_negative("market.secondary_demand", self.market.secondary_demand)?;
        non_negative("market.secondary_supply", self.market.secondary_supply)?;
        if let Some((field, value)) = self.market.constants.first_invalid() {
            return invalid(&format!("market.{field} must be finite and >= 0, got {value}"));
        }

        let terms = &self.negotiation.terms;
        if terms.max_attempts == 0 {
            return invalid("negotiation.max_attempts must be at least 1");
        }
        non_negative("negotiation.deduction_rate", terms.deduction_rate)?;
        non_negative("negotiation.distance_multiplier", terms.distance_multiplier)?;
        non_negative("negotiation.age_multiplier", terms.age_multiplier)?;
        non_negative("negotiation.population_multiplier", terms.population_multiplier)?;
        non_negative("negotiation.negotiation_stress", terms.negotiation_stress)?;

        positive("employer.property_size", self.employer.property_size)?;
        non_negative("employer.production_per_unit_size", self.employer.production_per_unit_size)?;
        non_negative("employer.labor_cost_ratio", self.employer.labor_cost_ratio)?;
        non_negative("employer.productivity_per_worker", self.employer.productivity_per_worker)?;
        non_negative("employer.overhead_fraction", self.employer.overhead_fraction)?;

        let efficiency = &self.efficiency;
        if !(0.0..=1.0).contains(&efficiency.floor) {
            return invalid(&format!(
                "efficiency.floor must be within [0, 1], got {}",
                efficiency.floor
            ));
        }
        non_negative("efficiency.decay_rate", efficiency.decay_rate)?;
        non_negative("efficiency.hiring_threshold", efficiency.hiring_threshold)?;

        Ok(())
    }
}

fn invalid(reason: &str) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid {
        reason: reason.to_owned(),
    })
}

fn non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        invalid(&format!("{field} must be finite and >= 0, got {value}"))
    }
}

fn positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        invalid(&format!("{field} must be finite and > 0, got {value}"))
    }
}

/// Run-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable simulation name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for sampled worker generation.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Number of ticks to run.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Real-time milliseconds the engine waits between ticks. The core
    /// ignores it.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            ticks: default_ticks(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Market environments: the primary market, a linked secondary segment, and
/// the constants that govern both.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketSection {
    /// Starting competition of the primary market.
    #[serde(default = "default_competition")]
    pub competition: f64,

    /// Starting demand of the primary market.
    #[serde(default = "default_primary_demand")]
    pub primary_demand: f64,

    /// Starting supply of the primary market.
    #[serde(default = "default_primary_supply")]
    pub primary_supply: f64,

    /// Starting competition of the secondary segment.
    #[serde(default = "default_secondary_competition")]
    pub secondary_competition: f64,

    /// Starting demand of the secondary segment.
    #[serde(default = "default_secondary_demand")]
    pub secondary_demand: f64,

    /// Starting supply of the secondary segment.
    #[serde(default = "default_secondary_supply")]
    pub secondary_supply: f64,

    /// Whether the primary market manifests `competition_rise` (spilling
    /// onto the secondary segment) at the start of every tick.
    #[serde(default = "default_true")]
    pub competition_rise_each_tick: bool,

    /// Manifestation, stress, and feedback constants.
    #[serde(flatten)]
    pub constants: MarketConfig,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            competition: default_competition(),
            primary_demand: default_primary_demand(),
            primary_supply: default_primary_supply(),
            secondary_competition: default_secondary_competition(),
            secondary_demand: default_secondary_demand(),
            secondary_supply: default_secondary_supply(),
            competition_rise_each_tick: true,
            constants: MarketConfig::default(),
        }
    }
}

/// Worker pool configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PopulationConfig {
    /// Number of workers in the pool.
    #[serde(default = "default_worker_count")]
    pub worker_count: u32,

    /// Reservation wage workers start from.
    #[serde(default = "default_initial_wage")]
    pub initial_wage: f64,

    /// Population context for the population-adjusted wage formula. `null`
    /// means no population term input (treated as 0).
    #[serde(default = "default_population")]
    pub population: Option<u64>,

    /// How worker attributes are generated.
    #[serde(default)]
    pub generation: WorkerGeneration,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            worker_count: default_worker_count(),
            initial_wage: default_initial_wage(),
            population: default_population(),
            generation: WorkerGeneration::default(),
        }
    }
}

/// Negotiation strategy selection plus the wage formula constants.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NegotiationSection {
    /// Named strategy: `classic` or `strict`.
    #[serde(default)]
    pub strategy: StrategyPreset,

    /// Wage formula and attempt constants.
    #[serde(flatten)]
    pub terms: NegotiationConfig,
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Line format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    String::from("Labor Market")
}

const fn default_seed() -> u64 {
    42
}

const fn default_ticks() -> u64 {
    5
}

const fn default_tick_interval_ms() -> u64 {
    200
}

const fn default_competition() -> f64 {
    0.5
}

const fn default_primary_demand() -> f64 {
    1000.0
}

const fn default_primary_supply() -> f64 {
    800.0
}

const fn default_secondary_competition() -> f64 {
    0.3
}

const fn default_secondary_demand() -> f64 {
    900.0
}

const fn default_secondary_supply() -> f64 {
    850.0
}

const fn default_worker_count() -> u32 {
    3
}

const fn default_initial_wage() -> f64 {
    3_000_000.0
}

#[allow(clippy::unnecessary_wraps)]
const fn default_population() -> Option<u64> {
    Some(1000)
}

fn default_log_level() -> String {
    String::from("info")
}

const fn default_true() -> bool {
    true
}
