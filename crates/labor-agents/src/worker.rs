//! Workers and the wage proposal formula.
//!
//! A worker's asking wage for attempt `k` (0-based) is
//!
//! ```text
//! (previous_wage
//!     + distance * distance_multiplier
//!     + age_factor
//!     + population_factor) * (1 - deduction_rate * k)
//! ```
//!
//! where `age_factor = (age - age_pivot) * age_multiplier` for workers below
//! the pivot age (a discount) and 0 otherwise, and `population_factor` is
//! `ln(population + 1) * population_multiplier` under
//! [`WageStrategy::PopulationAdjusted`] and 0 under [`WageStrategy::Flat`].
//!
//! Each call to [`Worker::negotiate_wage`] consumes one attempt, whether or
//! not the offer is accepted. Attempts are counted over the whole run, so a
//! worker that exhausts them stays unemployed.

use labor_types::{WageStrategy, WorkAssignment};
use labor_world::StressTarget;

use crate::config::{EfficiencyConfig, NegotiationConfig};
use crate::entity::{Entity, EntityCore};
use crate::error::AgentError;

/// Starting attributes of a worker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerProfile {
    /// Age in years.
    pub age: u32,
    /// Commuting distance.
    pub distance: f64,
    /// Reservation wage the worker starts from.
    pub previous_wage: f64,
}

/// A worker seeking employment.
#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    core: EntityCore,
    profile: WorkerProfile,
    employed: bool,
    efficiency: f64,
    work: Option<WorkAssignment>,
    negotiation_attempts: u32,
    terms: NegotiationConfig,
}

impl Worker {
    /// Create an unemployed worker at full efficiency.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidAttribute`] if the distance is negative,
    /// or if the distance or previous wage is not finite.
    pub fn new(
        name: impl Into<String>,
        profile: WorkerProfile,
        terms: &NegotiationConfig,
    ) -> Result<Self, AgentError> {
        let name = name.into();
        if !profile.distance.is_finite() || profile.distance < 0.0 {
            return Err(AgentError::InvalidAttribute {
                name,
                field: "distance",
                value: profile.distance,
            });
        }
        if !profile.previous_wage.is_finite() {
            return Err(AgentError::InvalidAttribute {
                name,
                field: "previous_wage",
                value: profile.previous_wage,
            });
        }
        Ok(Self {
            core: EntityCore::new(name),
            profile,
            employed: false,
            efficiency: 1.0,
            work: None,
            negotiation_attempts: 0,
            terms: *terms,
        })
    }

    /// Starting attributes.
    pub const fn profile(&self) -> &WorkerProfile {
        &self.profile
    }

    /// Whether the worker has been hired. Never resets within a run.
    pub const fn is_employed(&self) -> bool {
        self.employed
    }

    /// Current efficiency, in `[floor, 1.0]`.
    pub const fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Work designation, set on hire.
    pub const fn work(&self) -> Option<WorkAssignment> {
        self.work
    }

    /// Offers made so far this run.
    pub const fn negotiation_attempts(&self) -> u32 {
        self.negotiation_attempts
    }

    /// Ceiling on offers for this run.
    pub const fn max_attempts(&self) -> u32 {
        self.terms.max_attempts
    }

    /// Per-attempt discount rate.
    pub const fn deduction_rate(&self) -> f64 {
        self.terms.deduction_rate
    }

    /// Offers left before the worker is exhausted.
    pub const fn remaining_attempts(&self) -> u32 {
        self.terms.max_attempts.saturating_sub(self.negotiation_attempts)
    }

    /// Whether the worker has no offers left.
    pub const fn is_exhausted(&self) -> bool {
        self.negotiation_attempts >= self.terms.max_attempts
    }

    /// Age discount; negative below the pivot age, zero otherwise.
    pub fn age_factor(&self) -> f64 {
        if self.profile.age < self.terms.age_pivot {
            (f64::from(self.profile.age) - f64::from(self.terms.age_pivot))
                * self.terms.age_multiplier
        } else {
            0.0
        }
    }

    /// Population term for `strategy`.
    pub fn population_factor(&self, strategy: WageStrategy, population: u64) -> f64 {
        match strategy {
            WageStrategy::PopulationAdjusted => {
                (population as f64 + 1.0).ln() * self.terms.population_multiplier
            }
            WageStrategy::Flat => 0.0,
        }
    }

    /// Asking wage for a given 0-based attempt, without consuming it.
    ///
    /// This is the raw formula: no exhaustion check and no clamping, so a
    /// large discount or age penalty can make it zero or negative.
    pub fn quote_wage(&self, strategy: WageStrategy, population: u64, attempt: u32) -> f64 {
        let base = self.profile.previous_wage;
        let distance_factor = self.profile.distance * self.terms.distance_multiplier;
        let wage = base
            + distance_factor
            + self.age_factor()
            + self.population_factor(strategy, population);
        wage * (1.0 - self.terms.deduction_rate * f64::from(attempt))
    }

    /// Make the next wage offer.
    ///
    /// Returns `None` once `max_attempts` offers have been made; the caller
    /// treats that as "no further offer", never as a wage of zero.
    pub fn negotiate_wage(&mut self, strategy: WageStrategy, population: u64) -> Option<f64> {
        if self.is_exhausted() {
            return None;
        }
        let wage = self.quote_wage(strategy, population, self.negotiation_attempts);
        self.negotiation_attempts = self.negotiation_attempts.saturating_add(1);
        Some(wage)
    }

    /// Recompute efficiency from accumulated stress.
    pub fn recompute_efficiency(&mut self, config: &EfficiencyConfig) -> f64 {
        self.efficiency = config.efficiency_for(self.core.stress());
        self.efficiency
    }

    /// Mark the worker hired with the given work designation.
    pub const fn hire(&mut self, work: WorkAssignment) {
        self.employed = true;
        self.work = Some(work);
    }
}

impl Entity for Worker {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl StressTarget for Worker {
    fn stress(&self) -> f64 {
        self.core.stress()
    }

    fn add_stress(&mut self, amount: f64) {
        self.core.add_stress(amount);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

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

    #[test]
    fn first_offer_composes_all_terms() {
        let mut w = worker(25, 5.0, 3_000_000.0);
        let population_factor = (1001.0_f64).ln() * 1000.0;
        let expected = 3_000_000.0 + 5_000.0 - 5_000.0 + population_factor;

        let offer = w.negotiate_wage(WageStrategy::PopulationAdjusted, 1000);

        assert!(offer.is_some_and(|wage| (wage - expected).abs() < EPS));
        assert_eq!(w.negotiation_attempts(), 1);
    }

    #[test]
    fn flat_strategy_drops_population_term() {
        let mut w = worker(40, 2.0, 3_000_000.0);
        let offer = w.negotiate_wage(WageStrategy::Flat, 1_000_000);
        assert!(offer.is_some_and(|wage| (wage - 3_002_000.0).abs() < EPS));
    }

    #[test]
    fn age_at_or_above_pivot_has_no_discount() {
        assert!(worker(30, 0.0, 1.0).age_factor().abs() < EPS);
        assert!(worker(55, 0.0, 1.0).age_factor().abs() < EPS);
        assert!((worker(20, 0.0, 1.0).age_factor() + 10_000.0).abs() < EPS);
    }

    #[test]
    fn each_attempt_applies_the_discount() {
        let mut w = worker(40, 0.0, 100_000.0);
        let offers: Vec<f64> = std::iter::from_fn(|| w.negotiate_wage(WageStrategy::Flat, 0)).collect();
        let expected = [100_000.0, 95_000.0, 90_000.0, 85_000.0, 80_000.0];
        assert_eq!(offers.len(), expected.len());
        for (offer, want) in offers.iter().zip(expected) {
            assert!((offer - want).abs() < EPS);
        }
    }

    #[test]
    fn exhausted_worker_makes_no_offer() {
        let mut w = worker(40, 1.0, 100_000.0);
        for _ in 0..5 {
            assert!(w.negotiate_wage(WageStrategy::Flat, 0).is_some());
        }
        assert!(w.is_exhausted());
        assert_eq!(w.negotiate_wage(WageStrategy::Flat, 0), None);
        assert_eq!(w.negotiate_wage(WageStrategy::PopulationAdjusted, 10), None);
        assert_eq!(w.negotiation_attempts(), 5);
        assert_eq!(w.remaining_attempts(), 0);
    }

    #[test]
    fn stress_drives_efficiency() {
        let mut w = worker(40, 1.0, 100_000.0);
        w.add_stress(30.0);
        let efficiency = w.recompute_efficiency(&EfficiencyConfig::default());
        assert!((efficiency - 0.7).abs() < EPS);
        assert!((w.efficiency() - 0.7).abs() < EPS);
    }

    #[test]
    fn hire_sets_employment_and_work() {
        let mut w = worker(40, 1.0, 100_000.0);
        w.hire(WorkAssignment::Production);
        assert!(w.is_employed());
        assert_eq!(w.work(), Some(WorkAssignment::Production));
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let result = Worker::new(
            "bad",
            WorkerProfile {
                age: 30,
                distance: -1.0,
                previous_wage: 1.0,
            },
            &NegotiationConfig::default(),
        );
        assert!(matches!(
            result,
            Err(AgentError::InvalidAttribute { field: "distance", .. })
        ));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn attempts_never_exceed_ceiling(calls in 0_usize..20) {
                let mut w = worker(35, 2.0, 2_000_000.0);
                for _ in 0..calls {
                    let _ = w.negotiate_wage(WageStrategy::PopulationAdjusted, 500);
                }
                prop_assert!(w.negotiation_attempts() <= w.max_attempts());
            }

            #[test]
            fn quotes_strictly_decrease_with_attempts(
                age in 18_u32..70,
                distance in 0.0_f64..50.0,
                previous_wage in 1_000_000.0_f64..10_000_000.0,
                population in 0_u64..1_000_000,
                attempt in 0_u32..4,
            ) {
                let w = worker(age, distance, previous_wage);
                for strategy in [WageStrategy::PopulationAdjusted, WageStrategy::Flat] {
                    let now = w.quote_wage(strategy, population, attempt);
                    let next = w.quote_wage(strategy, population, attempt + 1);
                    prop_assert!(next < now);
                }
            }
        }
    }
}
