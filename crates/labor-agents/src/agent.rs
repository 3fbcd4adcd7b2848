//! The [`Actor`] sum type held by a world.
//!
//! A world keeps workers and the employer in one ordered collection so the
//! tick cycle can apply environment effects in insertion order. Kind-specific
//! access goes through the `as_*` accessors.

use labor_types::ActorId;
use labor_world::StressTarget;

use crate::employer::Employer;
use crate::entity::{Entity, EntityCore};
use crate::error::AgentError;
use crate::worker::Worker;

/// Any participant in the labor market.
#[derive(Debug, Clone, PartialEq)]
pub enum Actor {
    /// A worker seeking employment.
    Worker(Worker),
    /// The employer.
    Employer(Employer),
}

impl Actor {
    /// The worker, if this actor is one.
    pub const fn as_worker(&self) -> Option<&Worker> {
        match self {
            Self::Worker(worker) => Some(worker),
            Self::Employer(_) => None,
        }
    }

    /// The worker, mutably, if this actor is one.
    pub const fn as_worker_mut(&mut self) -> Option<&mut Worker> {
        match self {
            Self::Worker(worker) => Some(worker),
            Self::Employer(_) => None,
        }
    }

    /// The employer, if this actor is one.
    pub const fn as_employer(&self) -> Option<&Employer> {
        match self {
            Self::Employer(employer) => Some(employer),
            Self::Worker(_) => None,
        }
    }

    /// The employer, mutably, if this actor is one.
    pub const fn as_employer_mut(&mut self) -> Option<&mut Employer> {
        match self {
            Self::Employer(employer) => Some(employer),
            Self::Worker(_) => None,
        }
    }

    /// The worker at `id`, or [`AgentError::NotAWorker`].
    pub fn expect_worker_mut(&mut self, id: ActorId) -> Result<&mut Worker, AgentError> {
        self.as_worker_mut().ok_or(AgentError::NotAWorker(id))
    }

    /// The employer at `id`, or [`AgentError::NotAnEmployer`].
    pub fn expect_employer_mut(&mut self, id: ActorId) -> Result<&mut Employer, AgentError> {
        self.as_employer_mut().ok_or(AgentError::NotAnEmployer(id))
    }
}

impl Entity for Actor {
    fn core(&self) -> &EntityCore {
        match self {
            Self::Worker(worker) => worker.core(),
            Self::Employer(employer) => employer.core(),
        }
    }

    fn core_mut(&mut self) -> &mut EntityCore {
        match self {
            Self::Worker(worker) => worker.core_mut(),
            Self::Employer(employer) => employer.core_mut(),
        }
    }
}

impl StressTarget for Actor {
    fn stress(&self) -> f64 {
        self.core().stress()
    }

    fn add_stress(&mut self, amount: f64) {
        self.core_mut().add_stress(amount);
    }
}

impl From<Worker> for Actor {
    fn from(worker: Worker) -> Self {
        Self::Worker(worker)
    }
}

impl From<Employer> for Actor {
    fn from(employer: Employer) -> Self {
        Self::Employer(employer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::{EmployerConfig, NegotiationConfig};
    use crate::worker::WorkerProfile;

    fn worker_actor() -> Actor {
        Worker::new(
            "worker1",
            WorkerProfile {
                age: 30,
                distance: 1.0,
                previous_wage: 1.0,
            },
            &NegotiationConfig::default(),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn accessors_match_kind() {
        let mut worker = worker_actor();
        assert!(worker.as_worker().is_some());
        assert!(worker.as_employer().is_none());
        assert!(matches!(
            worker.expect_employer_mut(ActorId::new(0)),
            Err(AgentError::NotAnEmployer(_))
        ));

        let mut employer: Actor = Employer::new("employer1", &EmployerConfig::default())
            .unwrap()
            .into();
        assert!(employer.expect_employer_mut(ActorId::new(1)).is_ok());
        assert_eq!(employer.name(), "employer1");
    }

    #[test]
    fn stress_reaches_the_inner_core() {
        let mut actor = worker_actor();
        actor.add_stress(7.0);
        assert!((actor.as_worker().map_or(0.0, StressTarget::stress) - 7.0).abs() < f64::EPSILON);
    }
}
