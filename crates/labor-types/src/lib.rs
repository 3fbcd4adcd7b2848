//! Shared type definitions for the labor market simulation.
//!
//! This crate is the single source of truth for types used across the
//! workspace. Records that leave the simulation core flow downstream to
//! `TypeScript` via `ts-rs` for a results dashboard.
//!
//! # Modules
//!
//! - [`ids`] -- Index handles for actors/environments and UUID run ids
//! - [`enums`] -- Action, manifestation, strategy, and outcome enums
//! - [`structs`] -- Negotiation narrative, tick metrics, and run reports

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{
    ActionKind, ManifestationKind, NegotiationOutcome, ProfitBasis, WageStrategy, WorkAssignment,
};
pub use ids::{ActorId, EnvironmentId, RunId};
pub use structs::{MarketSnapshot, NegotiationRecord, RunReport, TickMetrics};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs writes the bindings when `export_all` is called. The files
        // land in `bindings/` relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::ActorId::export_all();
        let _ = crate::ids::EnvironmentId::export_all();
        let _ = crate::ids::RunId::export_all();

        // Enums
        let _ = crate::enums::ActionKind::export_all();
        let _ = crate::enums::ManifestationKind::export_all();
        let _ = crate::enums::WorkAssignment::export_all();
        let _ = crate::enums::WageStrategy::export_all();
        let _ = crate::enums::ProfitBasis::export_all();
        let _ = crate::enums::NegotiationOutcome::export_all();

        // Structs
        let _ = crate::structs::NegotiationRecord::export_all();
        let _ = crate::structs::MarketSnapshot::export_all();
        let _ = crate::structs::TickMetrics::export_all();
        let _ = crate::structs::RunReport::export_all();
    }
}
