//! Worker and employer state and economics for the labor market simulation.
//!
//! This crate contains the logic layer for actors -- everything that operates
//! on actor state without touching the world's collections. It sits between
//! `labor-types`/`labor-world` (data and environments) and `labor-core`
//! (tick orchestration).
//!
//! # Modules
//!
//! - [`agent`] -- The [`Actor`] sum type stored by a world
//! - [`config`] -- Negotiation, employer, and efficiency parameters
//! - [`employer`] -- Hiring economics ([`Employer`])
//! - [`entity`] -- Shared identity, action log, registration, and stress
//! - [`error`] -- Error types for actor operations ([`AgentError`])
//! - [`worker`] -- Wage proposals and efficiency ([`Worker`])

pub mod agent;
pub mod config;
pub mod employer;
pub mod entity;
pub mod error;
pub mod worker;

// Re-export primary types at crate root for convenience.
pub use agent::Actor;
pub use config::{EfficiencyConfig, EmployerConfig, NegotiationConfig};
pub use employer::Employer;
pub use entity::{Entity, EntityCore, Registration};
pub use error::AgentError;
pub use worker::{Worker, WorkerProfile};
