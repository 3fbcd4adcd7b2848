//! The employer and its hiring economics.
//!
//! Two calculations drive hiring decisions:
//!
//! - [`Employer::calculate_optimal_employment`] -- how many workers the
//!   property supports at a given wage:
//!   `floor(property_size * production_per_unit_size * labor_cost_ratio / wage)`,
//!   at least 1.
//! - [`Employer::calculate_profit`] -- projected profit for a headcount:
//!   production is `productivity_per_worker * (1 + competition)` per worker,
//!   cost is the wage bill plus `overhead_fraction` of production.
//!
//! Both are pure: they read the employer's constants and their arguments and
//! never touch the accumulators.

use labor_types::{ActorId, ProfitBasis};
use labor_world::StressTarget;
use tracing::debug;

use crate::config::EmployerConfig;
use crate::entity::{Entity, EntityCore};
use crate::error::AgentError;

/// The single employer in the market.
#[derive(Debug, Clone, PartialEq)]
pub struct Employer {
    core: EntityCore,
    economics: EmployerConfig,
    production: f64,
    profit: f64,
    hired: Vec<ActorId>,
}

impl Employer {
    /// Create an employer with empty accumulators.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::InvalidAttribute`] if the property size is not
    /// positive and finite.
    pub fn new(name: impl Into<String>, economics: &EmployerConfig) -> Result<Self, AgentError> {
        let name = name.into();
        if !economics.property_size.is_finite() || economics.property_size <= 0.0 {
            return Err(AgentError::InvalidAttribute {
                name,
                field: "property_size",
                value: economics.property_size,
            });
        }
        Ok(Self {
            core: EntityCore::new(name),
            economics: *economics,
            production: 0.0,
            profit: 0.0,
            hired: Vec::new(),
        })
    }

    /// Capacity scalar of the property.
    pub const fn property_size(&self) -> f64 {
        self.economics.property_size
    }

    /// Production accumulated over accepted hires.
    pub const fn production(&self) -> f64 {
        self.production
    }

    /// Profit accumulated over accepted hires.
    pub const fn profit(&self) -> f64 {
        self.profit
    }

    /// Workers hired so far, in hiring order.
    pub fn hired(&self) -> &[ActorId] {
        &self.hired
    }

    /// Headcount the property supports at `wage`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NonPositiveWage`] for a wage that is zero,
    /// negative, or not finite.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn calculate_optimal_employment(&self, wage: f64) -> Result<u32, AgentError> {
        if !wage.is_finite() || wage <= 0.0 {
            return Err(AgentError::NonPositiveWage { wage });
        }
        let base_production = self.economics.property_size * self.economics.production_per_unit_size;
        let optimal = (base_production * self.economics.labor_cost_ratio / wage).floor();
        // Saturating: `as` clamps to the u32 range and maps NaN to 0.
        Ok((optimal as u32).max(1))
    }

    /// Production value of one worker at the given competition level.
    pub fn production_per_worker(&self, competition: f64) -> f64 {
        self.economics.productivity_per_worker * (1.0 + competition)
    }

    /// Projected profit of employing `num_workers` at `wage`.
    pub fn calculate_profit(&self, wage: f64, num_workers: u32, competition: f64) -> f64 {
        let headcount = f64::from(num_workers);
        let production = self.production_per_worker(competition) * headcount;
        let cost = wage * headcount + production * self.economics.overhead_fraction;
        production - cost
    }

    /// Headcount to evaluate profit against under `basis`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::NonPositiveWage`] if the wage cannot be evaluated.
    pub fn headcount_for(&self, wage: f64, basis: ProfitBasis) -> Result<u32, AgentError> {
        let optimal = self.calculate_optimal_employment(wage)?;
        Ok(match basis {
            ProfitBasis::OptimalHeadcount => optimal,
            ProfitBasis::SingleHire => 1,
        })
    }

    /// Record a hire and fold its economics into the accumulators.
    pub fn record_hire(&mut self, worker: ActorId, competition: f64, profit: f64) {
        self.hired.push(worker);
        self.production += self.production_per_worker(competition);
        self.profit += profit;
        debug!(
            employer = self.core.name(),
            %worker,
            headcount = self.hired.len(),
            total_profit = self.profit,
            "Hire recorded"
        );
    }
}

impl Entity for Employer {
    fn core(&self) -> &EntityCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        &mut self.core
    }
}

impl StressTarget for Employer {
    fn stress(&self) -> f64 {
        self.core.stress()
    }

    fn add_stress(&mut self, amount: f64) {
        self.core.add_stress(amount);
    }
}
