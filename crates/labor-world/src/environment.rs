//! Market environments and their manifestations.
//!
//! An [`Environment`] is a named bundle of market properties (demand, supply,
//! competition). Environments change through two channels:
//!
//! - **Manifestations** -- discrete events such as `competition_rise` that
//!   mutate the environment itself and, optionally, one linked environment.
//!   The link is a one-shot causal edge for that call only.
//! - **Hiring feedback** -- supply grows with employment and demand decays,
//!   applied to the primary market once per tick.
//!
//! Environments also push stress onto actors when competition runs hot. The
//! actor side of that seam is the [`StressTarget`] trait so this crate does
//! not depend on the agent model.
//!
//! # Spillover rule
//!
//! A target environment only loses demand when the *source's* manifestation
//! log contains `competition_rise`. An unrelated manifestation on a fresh
//! environment therefore leaves its target untouched.

use labor_types::{ManifestationKind, MarketSnapshot};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::MarketConfig;
use crate::error::WorldError;

/// Anything that can absorb environmental stress.
pub trait StressTarget {
    /// Current accumulated stress.
    fn stress(&self) -> f64;

    /// Add `amount` to the accumulated stress.
    fn add_stress(&mut self, amount: f64);
}

/// Market properties of an environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentProperties {
    /// Market demand (non-negative).
    pub demand: f64,
    /// Market supply (non-negative).
    pub supply: f64,
    /// Competition level. Expected to stay roughly within `[0, 1]` but not
    /// clamped.
    pub competition: f64,
}

/// A named market segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    name: String,
    properties: EnvironmentProperties,
    manifestations: Vec<ManifestationKind>,
}

impl Environment {
    /// Create an environment, validating its starting properties.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidProperty`] if demand or supply is negative,
    /// or if any property is not finite.
    pub fn new(name: impl Into<String>, properties: EnvironmentProperties) -> Result<Self, WorldError> {
        let name = name.into();
        for (property, value, allow_negative) in [
            ("demand", properties.demand, false),
            ("supply", properties.supply, false),
            ("competition", properties.competition, true),
        ] {
            if !value.is_finite() || (!allow_negative && value < 0.0) {
                return Err(WorldError::InvalidProperty {
                    environment: name,
                    property,
                    value,
                });
            }
        }
        Ok(Self {
            name,
            properties,
            manifestations: Vec::new(),
        })
    }

    /// Environment name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current market properties.
    pub const fn properties(&self) -> &EnvironmentProperties {
        &self.properties
    }

    /// Current competition level.
    pub const fn competition(&self) -> f64 {
        self.properties.competition
    }

    /// Manifestations in the order they happened.
    pub fn manifestations(&self) -> &[ManifestationKind] {
        &self.manifestations
    }

    /// Whether this environment has ever manifested `kind`.
    pub fn has_manifested(&self, kind: &ManifestationKind) -> bool {
        self.manifestations.contains(kind)
    }

    /// Trigger a manifestation, optionally spilling over onto `target`.
    ///
    /// `competition_rise` raises this environment's competition by
    /// `config.competition_rise_delta`. When a target is supplied and the
    /// log contains `competition_rise`, the target's demand is scaled by
    /// `config.spillover_demand_factor`.
    pub fn manifest(
        &mut self,
        kind: ManifestationKind,
        target: Option<&mut Self>,
        config: &MarketConfig,
    ) {
        if kind == ManifestationKind::CompetitionRise {
            self.properties.competition += config.competition_rise_delta;
        }
        debug!(
            environment = self.name,
            manifestation = %kind,
            competition = self.properties.competition,
            "Environment manifested"
        );
        self.manifestations.push(kind);

        if let Some(target) = target {
            if self.has_manifested(&ManifestationKind::CompetitionRise) {
                target.properties.demand *= config.spillover_demand_factor;
                debug!(
                    source = self.name,
                    target = target.name,
                    demand = target.properties.demand,
                    "Competition spillover dampened demand"
                );
            }
        }
    }

    /// Stress this environment would add to one actor this tick.
    ///
    /// Returns `None` when competition is at or below the threshold.
    pub fn stress_pressure(&self, config: &MarketConfig) -> Option<f64> {
        let competition = self.properties.competition;
        (competition > config.stress_threshold).then(|| competition * config.stress_multiplier)
    }

    /// Apply this environment's stress effect to an actor.
    ///
    /// Returns the stress added, if any.
    pub fn affect_actor(&self, actor: &mut dyn StressTarget, config: &MarketConfig) -> Option<f64> {
        let pressure = self.stress_pressure(config)?;
        actor.add_stress(pressure);
        Some(pressure)
    }

    /// Apply end-of-tick hiring feedback.
    ///
    /// Supply grows by `employed * config.supply_per_employed` and demand is
    /// scaled by `config.demand_decay`.
    pub fn absorb_hiring(&mut self, employed: u32, config: &MarketConfig) {
        self.properties.supply += f64::from(employed) * config.supply_per_employed;
        self.properties.demand *= config.demand_decay;
    }

    /// Snapshot the current properties for reporting.
    pub fn snapshot(&self) -> MarketSnapshot {
        MarketSnapshot {
            name: self.name.clone(),
            demand: self.properties.demand,
            supply: self.properties.supply,
            competition: self.properties.competition,
        }
    }
}
