//! The wage negotiation protocol between one worker and the employer.
//!
//! Each round the worker proposes a wage, the employer projects profit for
//! that wage, and the hiring rule decides. A worker gets at most
//! `max_attempts` rounds per tick and at most `max_attempts` offers over the
//! whole run; once the run-wide budget is spent the worker produces a single
//! `exhausted` record per tick and is never hired.
//!
//! # Strategies
//!
//! Two named strategies bundle the wage formula, the headcount used for the
//! profit projection, and the hiring rule:
//!
//! | Strategy  | Wage                  | Profit basis        | Hiring rule                  |
//! |-----------|-----------------------|---------------------|------------------------------|
//! | `classic` | population adjusted   | optimal headcount   | profit > 0                   |
//! | `strict`  | flat                  | single hire         | profit > 0, efficiency ≥ 0.6 |

use labor_agents::{EfficiencyConfig, Employer, Entity, NegotiationConfig, Worker};
use labor_types::{
    ActionKind, ActorId, NegotiationOutcome, NegotiationRecord, ProfitBasis, WageStrategy,
    WorkAssignment,
};
use labor_world::StressTarget;
use serde::Deserialize;
use tracing::{debug, warn};

/// Named strategy selected in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyPreset {
    /// Population-adjusted wages, profit at optimal headcount, profit only.
    #[default]
    Classic,
    /// Flat wages, profit for a single hire, efficiency gated.
    Strict,
}

/// Acceptance rule applied to a projected profit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HiringRule {
    /// Accept whenever projected profit is positive.
    ProfitOnly,
    /// Accept when profit is positive and the worker is efficient enough.
    EfficiencyGated {
        /// Minimum worker efficiency, inclusive.
        min_efficiency: f64,
    },
}

impl HiringRule {
    /// Decide an offer.
    pub fn evaluate(self, profit: f64, efficiency: f64) -> NegotiationOutcome {
        if profit <= 0.0 {
            return NegotiationOutcome::RejectedUnprofitable;
        }
        match self {
            Self::EfficiencyGated { min_efficiency } if efficiency < min_efficiency => {
                NegotiationOutcome::RejectedLowEfficiency
            }
            Self::ProfitOnly | Self::EfficiencyGated { .. } => NegotiationOutcome::Accepted,
        }
    }
}

/// Wage formula, profit basis, and hiring rule used for a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegotiationStrategy {
    /// How workers compute their asking wage.
    pub wage: WageStrategy,
    /// Headcount the employer projects profit for.
    pub basis: ProfitBasis,
    /// How the employer decides.
    pub hiring: HiringRule,
}

impl NegotiationStrategy {
    /// The `classic` strategy.
    pub const fn classic() -> Self {
        Self {
            wage: WageStrategy::PopulationAdjusted,
            basis: ProfitBasis::OptimalHeadcount,
            hiring: HiringRule::ProfitOnly,
        }
    }

    /// The `strict` strategy with the given efficiency gate.
    pub const fn strict(min_efficiency: f64) -> Self {
        Self {
            wage: WageStrategy::Flat,
            basis: ProfitBasis::SingleHire,
            hiring: HiringRule::EfficiencyGated { min_efficiency },
        }
    }

    /// Resolve a configured preset.
    pub const fn from_preset(preset: StrategyPreset, efficiency: &EfficiencyConfig) -> Self {
        match preset {
            StrategyPreset::Classic => Self::classic(),
            StrategyPreset::Strict => Self::strict(efficiency.hiring_threshold),
        }
    }
}

impl Default for NegotiationStrategy {
    fn default() -> Self {
        Self::classic()
    }
}

/// Market context shared by every negotiation in a tick.
#[derive(Debug, Clone, Copy)]
pub struct NegotiationContext<'a> {
    /// Current tick number.
    pub tick: u64,
    /// Population context for the wage formula.
    pub population: u64,
    /// Primary market competition.
    pub competition: f64,
    /// Strategy in force.
    pub strategy: &'a NegotiationStrategy,
    /// Negotiation constants (stress on hire).
    pub terms: &'a NegotiationConfig,
}

/// Run the negotiation loop for one worker.
///
/// Returns one record per round, in order. The loop ends on the first
/// acceptance, when the worker runs out of offers, or after `max_attempts`
/// rounds. Employed workers are skipped and produce no records.
pub fn negotiate(
    employer: &mut Employer,
    worker_id: ActorId,
    worker: &mut Worker,
    ctx: &NegotiationContext<'_>,
) -> Vec<NegotiationRecord> {
    let mut records = Vec::new();
    if worker.is_employed() {
        return records;
    }

    for _ in 0..worker.max_attempts() {
        let Some(wage) = worker.negotiate_wage(ctx.strategy.wage, ctx.population) else {
            warn!(
                tick = ctx.tick,
                worker = worker.name(),
                attempts = worker.negotiation_attempts(),
                "Worker exhausted negotiation attempts"
            );
            records.push(record(
                ctx.tick,
                worker_id,
                worker,
                None,
                None,
                None,
                NegotiationOutcome::Exhausted,
            ));
            break;
        };

        let Ok(headcount) = employer.headcount_for(wage, ctx.strategy.basis) else {
            debug!(
                tick = ctx.tick,
                worker = worker.name(),
                wage,
                "Offer rejected: wage is not positive"
            );
            records.push(record(
                ctx.tick,
                worker_id,
                worker,
                Some(wage),
                None,
                None,
                NegotiationOutcome::RejectedInvalidWage,
            ));
            continue;
        };

        let profit = employer.calculate_profit(wage, headcount, ctx.competition);
        let outcome = ctx.strategy.hiring.evaluate(profit, worker.efficiency());
        debug!(
            tick = ctx.tick,
            worker = worker.name(),
            attempt = worker.negotiation_attempts(),
            wage,
            headcount,
            profit,
            ?outcome,
            "Negotiation attempt"
        );
        records.push(record(
            ctx.tick,
            worker_id,
            worker,
            Some(wage),
            Some(headcount),
            Some(profit),
            outcome,
        ));

        if outcome.is_accepted() {
            let target: &mut dyn StressTarget = &mut *worker;
            employer
                .core_mut()
                .perform_action(ActionKind::Negotiate, Some(target), ctx.terms);
            worker.hire(WorkAssignment::Production);
            employer.record_hire(worker_id, ctx.competition, profit);
            break;
        }
    }
    records
}

fn record(
    tick: u64,
    worker_id: ActorId,
    worker: &Worker,
    proposed_wage: Option<f64>,
    headcount: Option<u32>,
    profit: Option<f64>,
    outcome: NegotiationOutcome,
) -> NegotiationRecord {
    NegotiationRecord {
        tick,
        worker: worker_id,
        worker_name: worker.name().to_owned(),
        attempt: worker.negotiation_attempts(),
        proposed_wage,
        headcount,
        profit,
        efficiency: worker.efficiency(),
        outcome,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use labor_agents::{EmployerConfig, WorkerProfile};

    const EPS: f64 = 1e-6;

    fn worker(age: u32, distance: f64, previous_wage: f64) -> Worker {
        Worker::new(
            "worker1",
            WorkerProfile {
                age,
                distance,
                previous_wage,
            },
            &NegotiationConfig::default(),
        )
        .unwrap()
    }

    fn employer() -> Employer {
        Employer::new("employer1", &EmployerConfig::default()).unwrap()
    }

    fn context<'a>(
        strategy: &'a NegotiationStrategy,
        terms: &'a NegotiationConfig,
    ) -> NegotiationContext<'a> {
        NegotiationContext {
            tick: 1,
            population: 1000,
            competition: 0.5,
            strategy,
            terms,
        }
    }

    #[test]
    fn hiring_rule_decisions() {
        let gated = HiringRule::EfficiencyGated { min_efficiency: 0.6 };
        assert_eq!(HiringRule::ProfitOnly.evaluate(1.0, 0.5), NegotiationOutcome::Accepted);
        assert_eq!(HiringRule::ProfitOnly.evaluate(0.0, 1.0), NegotiationOutcome::RejectedUnprofitable);
        assert_eq!(gated.evaluate(1.0, 0.6), NegotiationOutcome::Accepted);
        assert_eq!(gated.evaluate(1.0, 0.59), NegotiationOutcome::RejectedLowEfficiency);
        assert_eq!(gated.evaluate(-1.0, 0.59), NegotiationOutcome::RejectedUnprofitable);
    }

    #[test]
    fn presets_resolve_to_named_strategies() {
        let efficiency = EfficiencyConfig::default();
        assert_eq!(
            NegotiationStrategy::from_preset(StrategyPreset::Classic, &efficiency),
            NegotiationStrategy::classic()
        );
        assert_eq!(
            NegotiationStrategy::from_preset(StrategyPreset::Strict, &efficiency),
            NegotiationStrategy::strict(0.6)
        );
    }

    #[test]
    fn profitable_first_offer_is_accepted() {
        let strategy = NegotiationStrategy::classic();
        let terms = NegotiationConfig::default();
        let mut e = employer();
        let mut w = worker(25, 5.0, 3_000_000.0);

        let records = negotiate(&mut e, ActorId::new(0), &mut w, &context(&strategy, &terms));

        assert_eq!(records.len(), 1);
        let first = &records[0];
        assert_eq!(first.outcome, NegotiationOutcome::Accepted);
        assert_eq!(first.attempt, 1);
        assert_eq!(first.headcount, Some(133));
        let expected = 3_000_000.0 + (1001.0_f64).ln() * 1000.0;
        assert!(first.proposed_wage.is_some_and(|w| (w - expected).abs() < EPS));
        assert!(w.is_employed());
        assert_eq!(w.work(), Some(WorkAssignment::Production));
        assert!((w.stress() - 5.0).abs() < EPS);
        assert_eq!(e.hired(), &[ActorId::new(0)]);
        assert_eq!(e.core().actions(), &[ActionKind::Negotiate]);
    }

    #[test]
    fn unprofitable_offers_use_every_attempt_then_exhaust() {
        let strategy = NegotiationStrategy::classic();
        let terms = NegotiationConfig::default();
        let mut e = employer();
        let mut w = worker(40, 1.0, 50_000_000.0);
        let ctx = context(&strategy, &terms);

        let first_tick = negotiate(&mut e, ActorId::new(0), &mut w, &ctx);
        assert_eq!(first_tick.len(), 5);
        assert!(first_tick
            .iter()
            .all(|r| r.outcome == NegotiationOutcome::RejectedUnprofitable));
        let attempts: Vec<u32> = first_tick.iter().map(|r| r.attempt).collect();
        assert_eq!(attempts, [1, 2, 3, 4, 5]);

        let second_tick = negotiate(&mut e, ActorId::new(0), &mut w, &ctx);
        assert_eq!(second_tick.len(), 1);
        assert_eq!(second_tick[0].outcome, NegotiationOutcome::Exhausted);
        assert_eq!(second_tick[0].proposed_wage, None);
        assert!(!w.is_employed());
        assert!(e.hired().is_empty());
    }

    #[test]
    fn non_positive_wage_is_rejected_without_fault() {
        let strategy = NegotiationStrategy::strict(0.6);
        let terms = NegotiationConfig::default();
        let mut e = employer();
        let mut w = worker(20, 0.0, 5_000.0);

        let records = negotiate(&mut e, ActorId::new(0), &mut w, &context(&strategy, &terms));

        assert_eq!(records.len(), 5);
        assert!(records
            .iter()
            .all(|r| r.outcome == NegotiationOutcome::RejectedInvalidWage && r.headcount.is_none()));
        assert_eq!(w.negotiation_attempts(), 5);
    }

    #[test]
    fn stressed_worker_fails_the_efficiency_gate() {
        let strategy = NegotiationStrategy::strict(0.6);
        let terms = NegotiationConfig::default();
        let mut e = employer();
        let mut w = worker(40, 1.0, 3_000_000.0);
        w.add_stress(45.0);
        w.recompute_efficiency(&EfficiencyConfig::default());

        let records = negotiate(&mut e, ActorId::new(0), &mut w, &context(&strategy, &terms));

        assert_eq!(records.len(), 5);
        assert!(records
            .iter()
            .all(|r| r.outcome == NegotiationOutcome::RejectedLowEfficiency));
        assert!(!w.is_employed());
    }

    #[test]
    fn employed_worker_is_not_renegotiated() {
        let strategy = NegotiationStrategy::classic();
        let terms = NegotiationConfig::default();
        let mut e = employer();
        let mut w = worker(40, 1.0, 3_000_000.0);
        w.hire(WorkAssignment::Production);

        let records = negotiate(&mut e, ActorId::new(0), &mut w, &context(&strategy, &terms));

        assert!(records.is_empty());
        assert_eq!(w.negotiation_attempts(), 0);
    }
}
