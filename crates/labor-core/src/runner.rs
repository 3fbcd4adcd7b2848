//! Run driver: builds a world from configuration and runs the tick loop.
//!
//! [`run_tick_sequence`] is the entry point for a complete run. It validates
//! the configuration, builds the world (the primary `market`, the
//! `secondary` segment, one employer, and the worker pool), and then for
//! each tick:
//!
//! 1. applies the market shock -- a `competition_rise` manifestation from
//!    the primary market onto the secondary segment -- when enabled;
//! 2. runs [`run_tick`];
//! 3. hands the [`TickSummary`] to the [`TickCallback`].
//!
//! The returned [`RunReport`] carries per-tick metrics and the full
//! negotiation log.
//!
//! [`run_tick`]: crate::tick::run_tick

use chrono::Utc;
use labor_agents::{AgentError, Employer};
use labor_types::{EnvironmentId, ManifestationKind, RunId, RunReport};
use labor_world::{Environment, EnvironmentProperties, WorldError};
use tracing::info;

use crate::config::{ConfigError, SimulationConfig};
use crate::negotiation::NegotiationStrategy;
use crate::population;
use crate::tick::{self, TickError, TickRules, TickSummary};
use crate::world::{SetupError, World};

/// Name of the primary market environment.
pub const PRIMARY_MARKET: &str = "market";

/// Name of the secondary market segment.
pub const SECONDARY_MARKET: &str = "secondary";

/// Name of the employer.
pub const EMPLOYER_NAME: &str = "employer1";

/// Errors that can occur during a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The configuration failed validation.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The world could not be populated.
    #[error("setup error: {source}")]
    Setup {
        /// The underlying setup error.
        #[from]
        source: SetupError,
    },

    /// A tick execution failed.
    #[error("tick error: {source}")]
    Tick {
        /// The underlying tick error.
        #[from]
        source: TickError,
    },
}

impl From<WorldError> for RunnerError {
    fn from(source: WorldError) -> Self {
        Self::Setup {
            source: SetupError::World { source },
        }
    }
}

impl From<AgentError> for RunnerError {
    fn from(source: AgentError) -> Self {
        Self::Setup {
            source: SetupError::Agent { source },
        }
    }
}

/// Callback invoked after each tick completes.
///
/// Implementations can use this to pace the run, stream summaries, etc.
pub trait TickCallback {
    /// Called after a tick completes successfully.
    fn on_tick(&mut self, summary: &TickSummary, world: &World);
}

/// A no-op tick callback for testing.
pub struct NoOpCallback;

impl TickCallback for NoOpCallback {
    fn on_tick(&mut self, _summary: &TickSummary, _world: &World) {}
}

/// Per-run tick rules derived from configuration.
pub fn tick_rules(config: &SimulationConfig) -> TickRules {
    TickRules {
        market: config.market.constants,
        negotiation: config.negotiation.terms,
        efficiency: config.efficiency,
        strategy: NegotiationStrategy::from_preset(config.negotiation.strategy, &config.efficiency),
    }
}

/// Build the world for a run.
///
/// Environments come first (primary market, then the secondary segment),
/// then the employer, then the workers in generation order.
///
/// # Errors
///
/// Returns [`RunnerError::Setup`] if an environment or actor is rejected.
pub fn build_world(config: &SimulationConfig, run_id: RunId) -> Result<World, RunnerError> {
    let market = &config.market;
    let mut world = World::new(run_id, config.population.population);

    world.add_environment(Environment::new(
        PRIMARY_MARKET,
        EnvironmentProperties {
            demand: market.primary_demand,
            supply: market.primary_supply,
            competition: market.competition,
        },
    )?)?;
    world.add_environment(Environment::new(
        SECONDARY_MARKET,
        EnvironmentProperties {
            demand: market.secondary_demand,
            supply: market.secondary_supply,
            competition: market.secondary_competition,
        },
    )?)?;

    world.add_actor(Employer::new(EMPLOYER_NAME, &config.employer)?)?;
    for worker in
        population::generate_workers(&config.population, &config.negotiation.terms, config.world.seed)?
    {
        world.add_actor(worker)?;
    }

    info!(
        run_id = %run_id,
        workers = world.worker_count(),
        environments = world.environments().len(),
        "World built"
    );
    Ok(world)
}

/// Manifest a `competition_rise` on the primary market, spilling over onto
/// the secondary segment.
///
/// # Errors
///
/// Returns [`TickError::World`] if either market is missing.
pub fn apply_market_shock(world: &mut World, rules: &TickRules) -> Result<(), TickError> {
    world.manifest(
        EnvironmentId::new(0),
        ManifestationKind::CompetitionRise,
        Some(EnvironmentId::new(1)),
        &rules.market,
    )?;
    Ok(())
}

/// Run a complete simulation.
///
/// # Errors
///
/// Returns [`RunnerError::Config`] if the configuration is invalid (before
/// any world is built), [`RunnerError::Setup`] if the world cannot be
/// populated, or [`RunnerError::Tick`] if the market shock or a tick fails.
pub fn run_tick_sequence(
    config: &SimulationConfig,
    callback: &mut dyn TickCallback,
) -> Result<RunReport, RunnerError> {
    config.validate()?;

    let run_id = RunId::new();
    let started_at = Utc::now();
    let mut world = build_world(config, run_id)?;
    let rules = tick_rules(config);

    info!(
        simulation = config.world.name,
        %run_id,
        ticks = config.world.ticks,
        strategy = ?config.negotiation.strategy,
        "Simulation starting"
    );

    let mut report = RunReport {
        run_id,
        started_at,
        ticks: Vec::new(),
        negotiations: Vec::new(),
    };

    for _ in 0..config.world.ticks {
        if config.market.competition_rise_each_tick {
            apply_market_shock(&mut world, &rules)?;
        }

        let summary = tick::run_tick(&mut world, &rules)?;
        callback.on_tick(&summary, &world);
        report.ticks.push(summary.metrics);
        report.negotiations.extend(summary.negotiations);
    }

    info!(
        %run_id,
        ticks = report.ticks.len(),
        hires = report.total_hires(),
        employed = world.employed_count(),
        "Simulation ended"
    );
    Ok(report)
}
