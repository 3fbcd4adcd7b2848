//! Type-safe identifiers for simulation entities.
//!
//! Actors and environments are addressed by index handles into the owning
//! `World`'s collections. A handle is only meaningful for the world that
//! issued it, so every registered entity also carries the [`RunId`] of that
//! world. Runs themselves use UUID v7 (time-ordered) identifiers.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a newtype index handle with standard derives.
macro_rules! define_handle {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub u32);

        impl $name {
            /// Create a handle pointing at the given collection slot.
            pub const fn new(slot: u32) -> Self {
                Self(slot)
            }

            /// Return the collection slot this handle points at.
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}#{}", $prefix, self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = core::num::TryFromIntError;

            fn try_from(slot: usize) -> Result<Self, Self::Error> {
                u32::try_from(slot).map(Self)
            }
        }
    };
}

define_handle! {
    /// Handle of an actor (worker or employer) inside a world.
    ActorId, "actor"
}

define_handle! {
    /// Handle of an environment inside a world.
    EnvironmentId, "env"
}

/// Unique identifier for one simulation run (one `World` lifecycle).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunId(pub Uuid);

impl RunId {
    /// Create a new run identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for RunId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
