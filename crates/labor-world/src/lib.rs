//! Market environments for the labor market simulation.
//!
//! This crate models the market side of the world: named environments with
//! demand, supply, and competition; the manifestations that move them; and
//! the stress they push onto actors.
//!
//! # Modules
//!
//! - [`config`] -- Tunable market constants ([`MarketConfig`]).
//! - [`environment`] -- [`Environment`], manifestations, stress, and hiring
//!   feedback.
//! - [`error`] -- Error types for world operations.

pub mod config;
pub mod environment;
pub mod error;

// Re-export primary types at crate root.
pub use config::MarketConfig;
pub use environment::{Environment, EnvironmentProperties, StressTarget};
pub use error::WorldError;
