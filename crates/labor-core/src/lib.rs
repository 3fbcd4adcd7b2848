//! World state, tick cycle, and run orchestration for the labor market
//! simulation.
//!
//! This crate owns the four-phase tick cycle that drives the simulation:
//! Stress, Efficiency, Negotiation, and Feedback.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `labor-config.yaml` into
//!   strongly-typed structs.
//! - [`negotiation`] -- The wage negotiation protocol and named strategies.
//! - [`population`] -- Sequential and seeded worker pool generation.
//! - [`runner`] -- [`run_tick_sequence`] and the [`TickCallback`] trait.
//! - [`tick`] -- The four-phase tick cycle.
//! - [`world`] -- [`World`], the owner of actors and environments.

pub mod config;
pub mod negotiation;
pub mod population;
pub mod runner;
pub mod tick;
pub mod world;

pub use config::{ConfigError, SimulationConfig};
pub use negotiation::{HiringRule, NegotiationStrategy, StrategyPreset};
pub use runner::{
    NoOpCallback, RunnerError, TickCallback, apply_market_shock, build_world, run_tick_sequence,
};
pub use tick::{TickError, TickRules, TickSummary, run_tick};
pub use world::{SetupError, World};
