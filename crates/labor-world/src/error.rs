//! Error types for the `labor-world` crate.
//!
//! All fallible world operations (environment construction, registration of
//! actors and environments, handle lookups) return [`WorldError`].

use labor_types::{ActorId, EnvironmentId};

/// Errors that can occur while building or querying a world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// An environment property was negative where it must not be, or not finite.
    #[error("invalid property {property} = {value} for environment {environment}")]
    InvalidProperty {
        /// Environment name.
        environment: String,
        /// Property name.
        property: &'static str,
        /// Offending value.
        value: f64,
    },

    /// An environment was not found in the world.
    #[error("environment not found: {0}")]
    EnvironmentNotFound(EnvironmentId),

    /// An actor was not found in the world.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// A manifestation named the same environment as source and target.
    #[error("environment {0} cannot target itself")]
    SelfTarget(EnvironmentId),

    /// An environment name was registered twice.
    #[error("duplicate environment name: {0}")]
    DuplicateEnvironmentName(String),

    /// An actor name was registered twice.
    #[error("duplicate actor name: {0}")]
    DuplicateActorName(String),

    /// A second employer was added; the market has a single employer.
    #[error("an employer is already registered ({0})")]
    EmployerAlreadyRegistered(ActorId),

    /// The world has more entries than a handle can address.
    #[error("world is full: cannot address more than u32::MAX entries")]
    CapacityExceeded,
}
