//! Shared entity core: identity, action log, world registration, stress.
//!
//! Every actor embeds an [`EntityCore`]. The core carries the parts the
//! tick cycle treats uniformly across workers and employers:
//!
//! - a display name, unique within a world;
//! - an append-only log of [`ActionKind`]s;
//! - a [`Registration`] handle, set exactly once when the actor joins a world;
//! - accumulated stress, which environments raise for every actor.
//!
//! # Action effects
//!
//! [`EntityCore::perform_action`] appends the action and, when a target is
//! supplied and the log contains `negotiate`, transfers negotiation stress to
//! the target. The check is against the whole log, not just the current
//! action. Any other action is logged with no effect.

use core::fmt;

use labor_types::{ActionKind, ActorId, RunId};
use labor_world::StressTarget;
use serde::Serialize;

use crate::config::NegotiationConfig;
use crate::error::AgentError;

/// Back-reference from an actor to the world it was added to.
///
/// Read-only: it identifies the world and the actor's slot in it, and never
/// changes once set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Registration {
    /// The owning world's run.
    pub run_id: RunId,
    /// The actor's handle in that world.
    pub actor_id: ActorId,
}

impl fmt::Display for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in run {}", self.actor_id, self.run_id)
    }
}

/// State common to every actor.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCore {
    name: String,
    actions: Vec<ActionKind>,
    registration: Option<Registration>,
    stress: f64,
}

impl EntityCore {
    /// Create an unregistered entity with no history and no stress.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            actions: Vec::new(),
            registration: None,
            stress: 0.0,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Actions performed, oldest first.
    pub fn actions(&self) -> &[ActionKind] {
        &self.actions
    }

    /// The world registration, if the entity has joined a world.
    pub const fn registration(&self) -> Option<Registration> {
        self.registration
    }

    /// The entity's handle, if registered.
    pub fn id(&self) -> Option<ActorId> {
        self.registration.map(|r| r.actor_id)
    }

    /// Accumulated stress.
    pub const fn stress(&self) -> f64 {
        self.stress
    }

    /// Attach the entity to a world.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AlreadyRegistered`] if a registration is already
    /// in place; the existing one is kept.
    pub fn register(&mut self, registration: Registration) -> Result<(), AgentError> {
        if let Some(existing) = self.registration {
            return Err(AgentError::AlreadyRegistered {
                name: self.name.clone(),
                existing,
            });
        }
        self.registration = Some(registration);
        Ok(())
    }

    /// Record an action and apply its effect on `target`, if any.
    ///
    /// Returns the stress transferred to the target.
    pub fn perform_action(
        &mut self,
        action: ActionKind,
        target: Option<&mut dyn StressTarget>,
        config: &NegotiationConfig,
    ) -> Option<f64> {
        self.actions.push(action);
        let target = target?;
        if self.actions.contains(&ActionKind::Negotiate) {
            target.add_stress(config.negotiation_stress);
            return Some(config.negotiation_stress);
        }
        None
    }
}

impl StressTarget for EntityCore {
    fn stress(&self) -> f64 {
        self.stress
    }

    fn add_stress(&mut self, amount: f64) {
        self.stress += amount;
    }
}

/// Access to the embedded [`EntityCore`].
pub trait Entity {
    /// Shared core, read-only.
    fn core(&self) -> &EntityCore;

    /// Shared core, mutable.
    fn core_mut(&mut self) -> &mut EntityCore;

    /// Display name.
    fn name(&self) -> &str {
        self.core().name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration(slot: u32) -> Registration {
        Registration {
            run_id: RunId::new(),
            actor_id: ActorId::new(slot),
        }
    }

    #[test]
    fn negotiate_transfers_stress_to_target() {
        let config = NegotiationConfig::default();
        let mut employer = EntityCore::new("employer1");
        let mut worker = EntityCore::new("worker1");

        let added = employer.perform_action(ActionKind::Negotiate, Some(&mut worker), &config);

        assert_eq!(added, Some(5.0));
        assert!((worker.stress() - 5.0).abs() < f64::EPSILON);
        assert_eq!(employer.actions(), &[ActionKind::Negotiate]);
    }

    #[test]
    fn unknown_action_is_logged_without_effect() {
        let config = NegotiationConfig::default();
        let mut actor = EntityCore::new("a");
        let mut target = EntityCore::new("b");

        let added = actor.perform_action(ActionKind::from("wave"), Some(&mut target), &config);

        assert_eq!(added, None);
        assert!(target.stress().abs() < f64::EPSILON);
        assert_eq!(actor.actions().len(), 1);
    }

    #[test]
    fn any_targeted_action_after_negotiate_adds_stress() {
        let config = NegotiationConfig::default();
        let mut actor = EntityCore::new("a");
        let mut target = EntityCore::new("b");

        actor.perform_action(ActionKind::Negotiate, None, &config);
        actor.perform_action(ActionKind::from("inspect"), Some(&mut target), &config);

        assert!((target.stress() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn untargeted_negotiate_only_logs() {
        let config = NegotiationConfig::default();
        let mut actor = EntityCore::new("a");
        assert_eq!(actor.perform_action(ActionKind::Negotiate, None, &config), None);
        assert!(actor.stress().abs() < f64::EPSILON);
    }

    #[test]
    fn registration_is_set_once() {
        let mut entity = EntityCore::new("worker1");
        let first = registration(1);
        assert!(entity.register(first).is_ok());
        assert_eq!(entity.id(), Some(ActorId::new(1)));

        let second = entity.register(registration(2));
        assert!(matches!(second, Err(AgentError::AlreadyRegistered { .. })));
        assert_eq!(entity.registration(), Some(first));
    }
}
