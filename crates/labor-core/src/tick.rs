//! Tick cycle: the four-phase update that drives the labor market.
//!
//! Each tick runs through these phases:
//!
//! 1. **Stress** -- every environment applies its stress effect to every
//!    actor, in insertion order.
//!
//! 2. **Efficiency** -- every worker recomputes efficiency from its stress.
//!
//! 3. **Negotiation** -- each unemployed worker, in insertion order,
//!    negotiates with the employer (see [`crate::negotiation`]).
//!
//! 4. **Feedback** -- the primary market absorbs the hiring: supply grows
//!    with total employment and demand decays.
//!
//! The tick cycle is deterministic given the same initial world.

use labor_agents::{EfficiencyConfig, NegotiationConfig};
use labor_types::{NegotiationRecord, TickMetrics};
use labor_world::{MarketConfig, WorldError};
use tracing::{debug, info};

use crate::negotiation::{self, NegotiationContext, NegotiationStrategy};
use crate::world::World;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// Negotiation needs an employer and none was registered.
    #[error("no employer registered in the world")]
    NoEmployer,

    /// A world operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

/// Constants and strategy applied on every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickRules {
    /// Market stress and feedback constants.
    pub market: MarketConfig,
    /// Wage formula and negotiation stress constants.
    pub negotiation: NegotiationConfig,
    /// Efficiency decay constants.
    pub efficiency: EfficiencyConfig,
    /// Strategy used by every negotiation.
    pub strategy: NegotiationStrategy,
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Workers hired during this tick.
    pub hires: u32,
    /// Every negotiation round of this tick, in order.
    pub negotiations: Vec<NegotiationRecord>,
    /// Aggregate metrics for this tick.
    pub metrics: TickMetrics,
}

/// Execute one tick.
///
/// # Errors
///
/// Returns [`TickError::NoEmployer`] when the world has unemployed workers
/// but no employer, or [`TickError::World`] if a worker handle is invalid.
pub fn run_tick(world: &mut World, rules: &TickRules) -> Result<TickSummary, TickError> {
    let tick = world.advance_tick();
    info!(tick, employed = world.employed_count(), "Tick started");

    let stress = world.apply_environment_stress(&rules.market);
    debug!(tick, stress, "Stress phase complete");

    world.recompute_efficiency(&rules.efficiency);

    let negotiations = phase_negotiation(world, rules, tick)?;

    world.absorb_hiring(&rules.market);

    let metrics = compute_metrics(world, tick, &negotiations);
    info!(
        tick,
        hires = metrics.hires,
        employed = metrics.employed_total,
        total_profit = metrics.total_profit,
        average_wage = metrics.average_wage,
        "Tick complete"
    );

    Ok(TickSummary {
        tick,
        hires: metrics.hires,
        negotiations,
        metrics,
    })
}

fn phase_negotiation(
    world: &mut World,
    rules: &TickRules,
    tick: u64,
) -> Result<Vec<NegotiationRecord>, TickError> {
    let candidates = world.unemployed_worker_ids();
    if candidates.is_empty() {
        return Ok(Vec::new());
    }
    if world.employer_id().is_none() {
        return Err(TickError::NoEmployer);
    }

    let ctx = NegotiationContext {
        tick,
        population: world.population().unwrap_or(0),
        competition: world.primary_competition(),
        strategy: &rules.strategy,
        terms: &rules.negotiation,
    };

    let mut records = Vec::new();
    for worker_id in candidates {
        let (employer, worker) = world
            .employer_and_worker_mut(worker_id)
            .ok_or(WorldError::ActorNotFound(worker_id))?;
        records.extend(negotiation::negotiate(employer, worker_id, worker, &ctx));
    }
    Ok(records)
}

fn compute_metrics(world: &World, tick: u64, negotiations: &[NegotiationRecord]) -> TickMetrics {
    let accepted: Vec<&NegotiationRecord> = negotiations
        .iter()
        .filter(|r| r.outcome.is_accepted())
        .collect();
    let total_profit: f64 = accepted.iter().filter_map(|r| r.profit).sum();
    let wages: Vec<f64> = accepted.iter().filter_map(|r| r.proposed_wage).collect();
    let average_wage = if wages.is_empty() {
        0.0
    } else {
        wages.iter().sum::<f64>() / wages.len() as f64
    };

    TickMetrics {
        tick,
        total_profit,
        average_wage,
        hires: u32::try_from(accepted.len()).unwrap_or(u32::MAX),
        employed_total: world.employed_count(),
        market: world.primary_environment().map(labor_world::Environment::snapshot),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use labor_agents::{Employer, EmployerConfig, Worker, WorkerProfile};
    use labor_types::{NegotiationOutcome, RunId};
    use labor_world::{Environment, EnvironmentProperties, StressTarget};

    fn worker(name: &str, age: u32, previous_wage: f64) -> Worker {
        Worker::new(
            name,
            WorkerProfile {
                age,
                distance: 5.0,
                previous_wage,
            },
            &NegotiationConfig::default(),
        )
        .unwrap()
    }

    fn make_world(competition: f64) -> World {
        let mut world = World::new(RunId::new(), Some(1000));
        world
            .add_environment(
                Environment::new(
                    "market",
                    EnvironmentProperties {
                        demand: 1000.0,
                        supply: 800.0,
                        competition,
                    },
                )
                .unwrap(),
            )
            .unwrap();
        world
            .add_actor(Employer::new("employer1", &EmployerConfig::default()).unwrap())
            .unwrap();
        world
    }

    #[test]
    fn tick_hires_and_applies_feedback() {
        let mut world = make_world(0.5);
        let w = world.add_actor(worker("worker1", 25, 3_000_000.0)).unwrap();

        let summary = run_tick(&mut world, &TickRules::default()).unwrap();

        assert_eq!(summary.tick, 1);
        assert_eq!(summary.hires, 1);
        assert_eq!(summary.metrics.employed_total, 1);
        assert!(world.worker(w).is_some_and(Worker::is_employed));
        let market = summary.metrics.market.unwrap();
        assert!((market.supply - 1800.0).abs() < 1e-9);
        assert!((market.demand - 990.0).abs() < 1e-9);
        let expected_wage = 3_000_000.0 + (1001.0_f64).ln() * 1000.0;
        assert!((summary.metrics.average_wage - expected_wage).abs() < 1e-6);
        assert!(summary.metrics.total_profit > 0.0);
    }

    #[test]
    fn feedback_counts_workers_hired_on_earlier_ticks() {
        let mut world = make_world(0.5);
        world.add_actor(worker("worker1", 25, 3_000_000.0)).unwrap();

        let first = run_tick(&mut world, &TickRules::default()).unwrap();
        let second = run_tick(&mut world, &TickRules::default()).unwrap();

        assert_eq!(first.hires, 1);
        assert_eq!(second.hires, 0);
        assert_eq!(second.metrics.employed_total, 1);
        let market = second.metrics.market.unwrap();
        assert!((market.supply - (800.0 + 1000.0 + 1000.0)).abs() < 1e-9);
        assert!((market.demand - 1000.0 * 0.99 * 0.99).abs() < 1e-9);
    }

    #[test]
    fn tick_without_hires_reports_zero_average() {
        let mut world = make_world(0.5);
        world.add_actor(worker("worker1", 40, 80_000_000.0)).unwrap();

        let summary = run_tick(&mut world, &TickRules::default()).unwrap();

        assert_eq!(summary.hires, 0);
        assert_eq!(summary.negotiations.len(), 5);
        assert!(summary.metrics.average_wage.abs() < f64::EPSILON);
        assert!(summary.metrics.total_profit.abs() < f64::EPSILON);
    }

    #[test]
    fn hot_market_stresses_before_negotiation() {
        let mut world = make_world(0.8);
        let w = world.add_actor(worker("worker1", 40, 3_000_000.0)).unwrap();

        let summary = run_tick(&mut world, &TickRules::default()).unwrap();

        // 0.8 * 10 from the market, then 5 from the accepted negotiation.
        assert!(world.worker(w).is_some_and(|w| (w.stress() - 13.0).abs() < 1e-9));
        assert!((summary.negotiations[0].efficiency - 0.92).abs() < 1e-9);
    }

    #[test]
    fn workers_without_employer_fail_the_tick() {
        let mut world = World::new(RunId::new(), None);
        world.add_actor(worker("worker1", 40, 3_000_000.0)).unwrap();
        assert!(matches!(
            run_tick(&mut world, &TickRules::default()),
            Err(TickError::NoEmployer)
        ));
    }

    #[test]
    fn employed_workers_do_not_negotiate_again() {
        let mut world = make_world(0.5);
        world.add_actor(worker("worker1", 40, 3_000_000.0)).unwrap();

        run_tick(&mut world, &TickRules::default()).unwrap();
        let second = run_tick(&mut world, &TickRules::default()).unwrap();

        assert_eq!(second.tick, 2);
        assert!(second.negotiations.is_empty());
        assert_eq!(second.metrics.employed_total, 1);
    }

    #[test]
    fn exhausted_worker_reports_once_per_tick() {
        let mut world = make_world(0.5);
        world.add_actor(worker("worker1", 40, 80_000_000.0)).unwrap();

        run_tick(&mut world, &TickRules::default()).unwrap();
        let second = run_tick(&mut world, &TickRules::default()).unwrap();

        assert_eq!(second.negotiations.len(), 1);
        assert_eq!(second.negotiations[0].outcome, NegotiationOutcome::Exhausted);
        assert_eq!(second.negotiations[0].attempt, 5);
    }
}
