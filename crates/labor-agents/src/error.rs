//! Error types for the labor-agents crate.
//!
//! Construction, registration, and wage evaluation return typed errors
//! rather than panicking or producing non-finite numbers.

use labor_types::ActorId;

use crate::entity::Registration;

/// Errors that can occur during actor operations.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// The entity was already registered with a world.
    #[error("{name} is already registered as {existing}")]
    AlreadyRegistered {
        /// Name of the entity.
        name: String,
        /// The registration that is already in place.
        existing: Registration,
    },

    /// A constructor received an out-of-range attribute.
    #[error("invalid {field} = {value} for {name}")]
    InvalidAttribute {
        /// Name of the entity being built.
        name: String,
        /// Attribute name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },

    /// A wage of zero, below zero, or not finite was evaluated.
    #[error("wage must be positive and finite, got {wage}")]
    NonPositiveWage {
        /// The rejected wage.
        wage: f64,
    },

    /// The actor at this handle is not a worker.
    #[error("actor {0} is not a worker")]
    NotAWorker(ActorId),

    /// The actor at this handle is not an employer.
    #[error("actor {0} is not an employer")]
    NotAnEmployer(ActorId),
}
