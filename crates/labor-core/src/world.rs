//! The [`World`]: owner of every actor and environment in a run.
//!
//! A world is built once per run. Actors and environments are added before
//! the first tick and are never removed; their handles are stable slot
//! indices in insertion order. The first environment added is the primary
//! market, whose competition feeds the hiring economics and which absorbs
//! the end-of-tick hiring feedback.
//!
//! Adding an actor registers it: the actor receives a [`Registration`]
//! pointing back at this world's run and its own slot.

use labor_agents::{Actor, AgentError, EfficiencyConfig, Employer, Entity, Registration, Worker};
use labor_types::{ActorId, EnvironmentId, ManifestationKind, RunId};
use labor_world::{Environment, MarketConfig, WorldError};
use tracing::debug;

/// Errors raised while populating a world.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The world rejected the addition.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },

    /// The actor could not be registered.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },
}

/// Actors, environments, and run context for one simulation run.
#[derive(Debug, Clone)]
pub struct World {
    run_id: RunId,
    actors: Vec<Actor>,
    environments: Vec<Environment>,
    population: Option<u64>,
    employer: Option<ActorId>,
    tick: u64,
}

impl World {
    /// Create an empty world for `run_id` with the given population context.
    pub const fn new(run_id: RunId, population: Option<u64>) -> Self {
        Self {
            run_id,
            actors: Vec::new(),
            environments: Vec::new(),
            population,
            employer: None,
            tick: 0,
        }
    }

    /// The run this world belongs to.
    pub const fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Last completed tick; 0 before the first tick.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Population context for wage proposals.
    pub const fn population(&self) -> Option<u64> {
        self.population
    }

    /// Add an actor and register it with this world.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::World`] if the name is taken, if a second
    /// employer is added, or if the world is full. Returns
    /// [`SetupError::Agent`] if the actor is already registered elsewhere.
    pub fn add_actor(&mut self, actor: impl Into<Actor>) -> Result<ActorId, SetupError> {
        let mut actor = actor.into();
        if self.actors.iter().any(|a| a.name() == actor.name()) {
            return Err(WorldError::DuplicateActorName(actor.name().to_owned()).into());
        }
        if let (Some(existing), Actor::Employer(_)) = (self.employer, &actor) {
            return Err(WorldError::EmployerAlreadyRegistered(existing).into());
        }

        let id = ActorId::try_from(self.actors.len())
            .map_err(|_overflow| WorldError::CapacityExceeded)?;
        actor.core_mut().register(Registration {
            run_id: self.run_id,
            actor_id: id,
        })?;
        if actor.as_employer().is_some() {
            self.employer = Some(id);
        }
        debug!(actor = actor.name(), %id, "Actor added");
        self.actors.push(actor);
        Ok(id)
    }

    /// Add an environment. The first one added is the primary market.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicateEnvironmentName`] if the name is taken,
    /// or [`WorldError::CapacityExceeded`] if the world is full.
    pub fn add_environment(&mut self, environment: Environment) -> Result<EnvironmentId, WorldError> {
        if self.environment_by_name(environment.name()).is_some() {
            return Err(WorldError::DuplicateEnvironmentName(environment.name().to_owned()));
        }
        let id = EnvironmentId::try_from(self.environments.len())
            .map_err(|_overflow| WorldError::CapacityExceeded)?;
        debug!(environment = environment.name(), %id, "Environment added");
        self.environments.push(environment);
        Ok(id)
    }

    /// All actors in insertion order.
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// The actor at `id`.
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(id.index())
    }

    /// The actor at `id`, mutably.
    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(id.index())
    }

    /// The worker at `id`, if that slot holds one.
    pub fn worker(&self, id: ActorId) -> Option<&Worker> {
        self.actor(id).and_then(Actor::as_worker)
    }

    /// Handle of the registered employer.
    pub const fn employer_id(&self) -> Option<ActorId> {
        self.employer
    }

    /// The registered employer.
    pub fn employer(&self) -> Option<&Employer> {
        self.employer
            .and_then(|id| self.actor(id))
            .and_then(Actor::as_employer)
    }

    /// Workers with their handles, in insertion order.
    pub fn workers(&self) -> impl Iterator<Item = (ActorId, &Worker)> {
        self.actors
            .iter()
            .enumerate()
            .filter_map(|(slot, actor)| Some((ActorId::try_from(slot).ok()?, actor.as_worker()?)))
    }

    /// Handles of workers not yet employed, in insertion order.
    pub fn unemployed_worker_ids(&self) -> Vec<ActorId> {
        self.workers()
            .filter(|(_, worker)| !worker.is_employed())
            .map(|(id, _)| id)
            .collect()
    }

    /// Number of employed workers.
    pub fn employed_count(&self) -> u32 {
        let employed = self.workers().filter(|(_, worker)| worker.is_employed()).count();
        u32::try_from(employed).unwrap_or(u32::MAX)
    }

    /// Number of workers.
    pub fn worker_count(&self) -> usize {
        self.workers().count()
    }

    /// All environments in insertion order.
    pub fn environments(&self) -> &[Environment] {
        &self.environments
    }

    /// The environment at `id`.
    pub fn environment(&self, id: EnvironmentId) -> Option<&Environment> {
        self.environments.get(id.index())
    }

    /// The environment named `name`, with its handle.
    pub fn environment_by_name(&self, name: &str) -> Option<(EnvironmentId, &Environment)> {
        self.environments
            .iter()
            .enumerate()
            .find(|(_, env)| env.name() == name)
            .and_then(|(slot, env)| Some((EnvironmentId::try_from(slot).ok()?, env)))
    }

    /// The primary market, if any environment exists.
    pub fn primary_environment(&self) -> Option<&Environment> {
        self.environments.first()
    }

    /// Competition of the primary market; 0 when there is none.
    pub fn primary_competition(&self) -> f64 {
        self.primary_environment().map_or(0.0, Environment::competition)
    }

    /// Trigger a manifestation on `source`, optionally spilling onto `target`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EnvironmentNotFound`] for an unknown handle, or
    /// [`WorldError::SelfTarget`] when `target` equals `source`.
    pub fn manifest(
        &mut self,
        source: EnvironmentId,
        kind: ManifestationKind,
        target: Option<EnvironmentId>,
        config: &MarketConfig,
    ) -> Result<(), WorldError> {
        let Some(target) = target else {
            let env = self
                .environments
                .get_mut(source.index())
                .ok_or(WorldError::EnvironmentNotFound(source))?;
            env.manifest(kind, None, config);
            return Ok(());
        };
        if target == source {
            return Err(WorldError::SelfTarget(source));
        }
        for id in [source, target] {
            if self.environment(id).is_none() {
                return Err(WorldError::EnvironmentNotFound(id));
            }
        }
        if let Some((env, other)) = pair_mut(&mut self.environments, source.index(), target.index()) {
            env.manifest(kind, Some(other), config);
        }
        Ok(())
    }

    /// Apply every environment's stress effect to every actor.
    ///
    /// Returns the total stress added.
    pub fn apply_environment_stress(&mut self, config: &MarketConfig) -> f64 {
        let mut total = 0.0;
        for env in &self.environments {
            for actor in &mut self.actors {
                total += env.affect_actor(actor, config).unwrap_or(0.0);
            }
        }
        total
    }

    /// Recompute every worker's efficiency from its stress.
    pub fn recompute_efficiency(&mut self, config: &EfficiencyConfig) {
        for worker in self.actors.iter_mut().filter_map(Actor::as_worker_mut) {
            worker.recompute_efficiency(config);
        }
    }

    /// Apply hiring feedback to the primary market.
    pub fn absorb_hiring(&mut self, config: &MarketConfig) {
        let employed = self.employed_count();
        if let Some(primary) = self.environments.first_mut() {
            primary.absorb_hiring(employed, config);
        }
    }

    /// The employer and the worker at `worker`, both mutably.
    ///
    /// Returns `None` if there is no employer or `worker` is not a worker.
    pub fn employer_and_worker_mut(&mut self, worker: ActorId) -> Option<(&mut Employer, &mut Worker)> {
        let employer = self.employer?;
        let (employer, worker) = pair_mut(&mut self.actors, employer.index(), worker.index())?;
        Some((employer.as_employer_mut()?, worker.as_worker_mut()?))
    }

    /// Advance the tick counter and return the new tick number.
    pub(crate) const fn advance_tick(&mut self) -> u64 {
        self.tick = self.tick.saturating_add(1);
        self.tick
    }
}

/// Two distinct elements of `items`, both mutably.
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> Option<(&mut T, &mut T)> {
    if a == b || a >= items.len() || b >= items.len() {
        return None;
    }
    if a < b {
        let (left, right) = items.split_at_mut(b);
        Some((left.get_mut(a)?, right.first_mut()?))
    } else {
        let (left, right) = items.split_at_mut(a);
        Some((right.first_mut()?, left.get_mut(b)?))
    }
}
