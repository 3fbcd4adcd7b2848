//! Configuration constants and defaults for actor behavior.
//!
//! These values mirror the `negotiation`, `employer`, and `efficiency`
//! sections of `labor-config.yaml`. Each struct bundles the tunables for one
//! concern so callers (tick cycle, tests) can override defaults.

use serde::Deserialize;

/// Wage negotiation parameters for workers.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct NegotiationConfig {
    /// Offers a worker may make over the whole run (default: 5).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Discount per previous attempt applied to the asking wage (default: 0.05).
    #[serde(default = "default_deduction_rate")]
    pub deduction_rate: f64,

    /// Wage added per unit of commuting distance (default: 1000).
    #[serde(default = "default_distance_multiplier")]
    pub distance_multiplier: f64,

    /// Age below which workers discount their asking wage (default: 30).
    #[serde(default = "default_age_pivot")]
    pub age_pivot: u32,

    /// Discount per year below `age_pivot` (default: 1000).
    #[serde(default = "default_age_multiplier")]
    pub age_multiplier: f64,

    /// Scale of the `ln(population + 1)` term (default: 1000).
    #[serde(default = "default_population_multiplier")]
    pub population_multiplier: f64,

    /// Stress a `negotiate` action transfers to its target (default: 5).
    #[serde(default = "default_negotiation_stress")]
    pub negotiation_stress: f64,
}

impl Default for NegotiationConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            deduction_rate: default_deduction_rate(),
            distance_multiplier: default_distance_multiplier(),
            age_pivot: default_age_pivot(),
            age_multiplier: default_age_multiplier(),
            population_multiplier: default_population_multiplier(),
            negotiation_stress: default_negotiation_stress(),
        }
    }
}

/// Production and cost constants for the employer.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EmployerConfig {
    /// Capacity scalar of the employer's property (default: 1000).
    #[serde(default = "default_property_size")]
    pub property_size: f64,

    /// Production value per unit of property size (default: 1,000,000).
    #[serde(default = "default_production_per_unit_size")]
    pub production_per_unit_size: f64,

    /// Share of production value budgeted for labor (default: 0.4).
    #[serde(default = "default_labor_cost_ratio")]
    pub labor_cost_ratio: f64,

    /// Production per worker before the competition boost (default: 3,500,000).
    #[serde(default = "default_productivity_per_worker")]
    pub productivity_per_worker: f64,

    /// Share of production lost to non-wage costs (default: 0.1).
    #[serde(default = "default_overhead_fraction")]
    pub overhead_fraction: f64,
}

impl Default for EmployerConfig {
    fn default() -> Self {
        Self {
            property_size: default_property_size(),
            production_per_unit_size: default_production_per_unit_size(),
            labor_cost_ratio: default_labor_cost_ratio(),
            productivity_per_worker: default_productivity_per_worker(),
            overhead_fraction: default_overhead_fraction(),
        }
    }
}

/// Stress-driven efficiency decay and the hiring gate.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EfficiencyConfig {
    /// Lowest efficiency a worker can decay to (default: 0.5).
    #[serde(default = "default_floor")]
    pub floor: f64,

    /// Efficiency lost per point of stress (default: 0.01).
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    /// Minimum efficiency for an efficiency-gated hire (default: 0.6).
    #[serde(default = "default_hiring_threshold")]
    pub hiring_threshold: f64,
}

impl Default for EfficiencyConfig {
    fn default() -> Self {
        Self {
            floor: default_floor(),
            decay_rate: default_decay_rate(),
            hiring_threshold: default_hiring_threshold(),
        }
    }
}

impl EfficiencyConfig {
    /// Efficiency for an accumulated stress level.
    ///
    /// `max(floor, 1.0 - decay_rate * stress)`, never above 1.0.
    pub fn efficiency_for(&self, stress: f64) -> f64 {
        (1.0 - self.decay_rate * stress).min(1.0).max(self.floor)
    }
}

const fn default_max_attempts() -> u32 {
    5
}

const fn default_deduction_rate() -> f64 {
    0.05
}

const fn default_distance_multiplier() -> f64 {
    1000.0
}

const fn default_age_pivot() -> u32 {
    30
}

const fn default_age_multiplier() -> f64 {
    1000.0
}

const fn default_population_multiplier() -> f64 {
    1000.0
}

const fn default_negotiation_stress() -> f64 {
    5.0
}

const fn default_property_size() -> f64 {
    1000.0
}

const fn default_production_per_unit_size() -> f64 {
    1_000_000.0
}

const fn default_labor_cost_ratio() -> f64 {
    0.4
}

const fn default_productivity_per_worker() -> f64 {
    3_500_000.0
}

const fn default_overhead_fraction() -> f64 {
    0.1
}

const fn default_floor() -> f64 {
    0.5
}

const fn default_decay_rate() -> f64 {
    0.01
}

const fn default_hiring_threshold() -> f64 {
    0.6
}
