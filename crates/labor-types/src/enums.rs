//! Enumeration types for the labor market simulation.
//!
//! Event tags that were free-form strings in earlier models are closed enums
//! here, with an `Other` variant so unrecognized tags are still logged.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Actor actions
// ---------------------------------------------------------------------------

/// An action an actor performs, recorded in its action log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Wage negotiation pressure applied to a counterpart.
    Negotiate,
    /// Any other tag. Logged, but has no defined effect.
    Other(String),
}

impl ActionKind {
    /// Return the tag used for this action in narrative output.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Negotiate => "negotiate",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for ActionKind {
    fn from(tag: &str) -> Self {
        match tag {
            "negotiate" => Self::Negotiate,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl core::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Environment manifestations
// ---------------------------------------------------------------------------

/// A discrete event an environment can manifest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ManifestationKind {
    /// Competition in this market segment rises; linked segments lose demand.
    CompetitionRise,
    /// Any other tag. Logged only.
    Other(String),
}

impl ManifestationKind {
    /// Return the tag used for this manifestation in narrative output.
    pub fn as_str(&self) -> &str {
        match self {
            Self::CompetitionRise => "competition_rise",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for ManifestationKind {
    fn from(tag: &str) -> Self {
        match tag {
            "competition_rise" => Self::CompetitionRise,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl core::fmt::Display for ManifestationKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Work and negotiation
// ---------------------------------------------------------------------------

/// Work designation given to a worker when hired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum WorkAssignment {
    /// Production line work.
    Production,
}

/// How a worker composes its asking wage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum WageStrategy {
    /// Base, distance and age terms plus `ln(population + 1)` scaled.
    #[default]
    PopulationAdjusted,
    /// Base, distance and age terms only.
    Flat,
}

/// Headcount the employer evaluates profit against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum ProfitBasis {
    /// Profit for the optimal headcount at the proposed wage.
    #[default]
    OptimalHeadcount,
    /// Profit for hiring this one worker.
    SingleHire,
}

/// Result of a single negotiation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
#[serde(rename_all = "snake_case")]
pub enum NegotiationOutcome {
    /// The employer hired the worker at the proposed wage.
    Accepted,
    /// Projected profit was zero or negative.
    RejectedUnprofitable,
    /// Profit was positive but the worker's efficiency was below the gate.
    RejectedLowEfficiency,
    /// The proposed wage was zero, negative, or not finite.
    RejectedInvalidWage,
    /// The worker has no attempts left and made no offer.
    Exhausted,
}

impl NegotiationOutcome {
    /// Whether this outcome ends the worker's search with a hire.
    pub const fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Whether this outcome is a rejection of an actual offer.
    pub const fn is_rejection(self) -> bool {
        matches!(
            self,
            Self::RejectedUnprofitable | Self::RejectedLowEfficiency | Self::RejectedInvalidWage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tags_parse_known_and_unknown() {
        assert_eq!(ActionKind::from("negotiate"), ActionKind::Negotiate);
        assert_eq!(
            ActionKind::from("wave"),
            ActionKind::Other(String::from("wave"))
        );
        assert_eq!(ActionKind::Negotiate.to_string(), "negotiate");
    }

    #[test]
    fn manifestation_tags_parse_known_and_unknown() {
        assert_eq!(
            ManifestationKind::from("competition_rise"),
            ManifestationKind::CompetitionRise
        );
        assert_eq!(ManifestationKind::from("drought").as_str(), "drought");
    }

    #[test]
    fn strategies_serialize_snake_case() {
        let json = serde_json::to_string(&WageStrategy::PopulationAdjusted).unwrap_or_default();
        assert_eq!(json, "\"population_adjusted\"");
        let basis: Result<ProfitBasis, _> = serde_json::from_str("\"single_hire\"");
        assert_eq!(basis.ok(), Some(ProfitBasis::SingleHire));
    }

    #[test]
    fn outcome_classification() {
        assert!(NegotiationOutcome::Accepted.is_accepted());
        assert!(NegotiationOutcome::RejectedInvalidWage.is_rejection());
        assert!(!NegotiationOutcome::Exhausted.is_rejection());
        assert!(!NegotiationOutcome::Exhausted.is_accepted());
    }
}
