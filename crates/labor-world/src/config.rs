//! Tunable market constants for environments.
//!
//! [`MarketConfig`] bundles every constant that governs manifestations,
//! environmental stress, and hiring feedback. The run driver builds it from
//! the `market` section of `labor-config.yaml` and passes it into every
//! environment operation.

use serde::Deserialize;

/// Constants for environment manifestations and market feedback.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MarketConfig {
    /// Competition added by a `competition_rise` manifestation (default: 0.1).
    #[serde(default = "default_competition_rise_delta")]
    pub competition_rise_delta: f64,

    /// Factor applied to a linked environment's demand on spillover (default: 0.95).
    #[serde(default = "default_spillover_demand_factor")]
    pub spillover_demand_factor: f64,

    /// Competition above which actors accumulate stress (default: 0.7).
    #[serde(default = "default_stress_threshold")]
    pub stress_threshold: f64,

    /// Stress added per unit of competition above the threshold (default: 10).
    #[serde(default = "default_stress_multiplier")]
    pub stress_multiplier: f64,

    /// Supply added to the primary market per employed worker (default: 1000).
    #[serde(default = "default_supply_per_employed")]
    pub supply_per_employed: f64,

    /// Factor applied to primary market demand after hiring (default: 0.99).
    #[serde(default = "default_demand_decay")]
    pub demand_decay: f64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            competition_rise_delta: default_competition_rise_delta(),
            spillover_demand_factor: default_spillover_demand_factor(),
            stress_threshold: default_stress_threshold(),
            stress_multiplier: default_stress_multiplier(),
            supply_per_employed: default_supply_per_employed(),
            demand_decay: default_demand_decay(),
        }
    }
}

impl MarketConfig {
    /// Return the first field that is negative or not finite, if any.
    pub fn first_invalid(&self) -> Option<(&'static str, f64)> {
        [
            ("competition_rise_delta", self.competition_rise_delta),
            ("spillover_demand_factor", self.spillover_demand_factor),
            ("stress_threshold", self.stress_threshold),
            ("stress_multiplier", self.stress_multiplier),
            ("supply_per_employed", self.supply_per_employed),
            ("demand_decay", self.demand_decay),
        ]
        .into_iter()
        .find(|(_, value)| !value.is_finite() || *value < 0.0)
    }
}

const fn default_competition_rise_delta() -> f64 {
    0.1
}

const fn default_spillover_demand_factor() -> f64 {
    0.95
}

const fn default_stress_threshold() -> f64 {
    0.7
}

const fn default_stress_multiplier() -> f64 {
    10.0
}

const fn default_supply_per_employed() -> f64 {
    1000.0
}

const fn default_demand_decay() -> f64 {
    0.99
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_market_model() {
        let config = MarketConfig::default();
        assert!((config.competition_rise_delta - 0.1).abs() < f64::EPSILON);
        assert!((config.spillover_demand_factor - 0.95).abs() < f64::EPSILON);
        assert!((config.stress_threshold - 0.7).abs() < f64::EPSILON);
        assert!((config.demand_decay - 0.99).abs() < f64::EPSILON);
        assert!(config.first_invalid().is_none());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: MarketConfig =
            serde_json::from_str(r#"{"stress_threshold": 0.5}"#).unwrap_or_default();
        assert!((config.stress_threshold - 0.5).abs() < f64::EPSILON);
        assert!((config.stress_multiplier - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn negative_rate_is_reported() {
        let config = MarketConfig {
            demand_decay: -0.5,
            ..MarketConfig::default()
        };
        assert_eq!(config.first_invalid().map(|(name, _)| name), Some("demand_decay"));
    }
}
