//! Records that cross the boundary between the simulation core and its
//! presentation layer: the negotiation narrative and per-tick metrics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::NegotiationOutcome;
use crate::ids::{ActorId, RunId};

/// One negotiation attempt between a worker and the employer.
///
/// Every attempt is recorded, including rejections and the terminal
/// `Exhausted` outcome, so the narrative log is complete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NegotiationRecord {
    /// Tick during which the attempt happened (1-based).
    pub tick: u64,
    /// Handle of the negotiating worker.
    pub worker: ActorId,
    /// Display name of the worker.
    pub worker_name: String,
    /// Attempts the worker has used this run, including this one. For an
    /// exhausted record this is the ceiling that was hit.
    pub attempt: u32,
    /// Wage the worker proposed, or `None` when it had no offer left.
    pub proposed_wage: Option<f64>,
    /// Headcount the employer evaluated, when a valid wage was offered.
    pub headcount: Option<u32>,
    /// Projected profit at that wage and headcount.
    pub profit: Option<f64>,
    /// Worker efficiency at the time of the attempt.
    pub efficiency: f64,
    /// What happened.
    pub outcome: NegotiationOutcome,
}

/// Point-in-time view of an environment's market properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct MarketSnapshot {
    /// Environment name.
    pub name: String,
    /// Market demand.
    pub demand: f64,
    /// Market supply.
    pub supply: f64,
    /// Competition level.
    pub competition: f64,
}

/// Aggregate metrics for one tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TickMetrics {
    /// Tick number (1-based).
    pub tick: u64,
    /// Sum of projected profit over the hires accepted this tick.
    pub total_profit: f64,
    /// Mean accepted wage this tick, 0 when nobody was hired.
    pub average_wage: f64,
    /// Workers hired this tick.
    pub hires: u32,
    /// Workers employed at the end of this tick.
    pub employed_total: u32,
    /// Primary market state at the end of this tick, if one exists.
    pub market: Option<MarketSnapshot>,
}

/// Everything a finished run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct RunReport {
    /// Identifier of the run's world.
    pub run_id: RunId,
    /// Wall-clock time the run started.
    pub started_at: DateTime<Utc>,
    /// Metrics per tick, in tick order.
    pub ticks: Vec<TickMetrics>,
    /// Full negotiation narrative, in the order attempts happened.
    pub negotiations: Vec<NegotiationRecord>,
}

impl RunReport {
    /// Total workers hired across the whole run.
    pub fn total_hires(&self) -> u32 {
        self.ticks
            .iter()
            .fold(0_u32, |acc, t| acc.saturating_add(t.hires))
    }
}
