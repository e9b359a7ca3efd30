//! Read-only view of a session for the presentation layer.

use serde::Serialize;

use crisis_core::enums::{Defcon, PhaseId, ReviewState};
use crisis_core::events::GameOutcome;
use crisis_core::state::MetricState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub metrics: MetricState,
    pub defcon: Defcon,
    pub scenario_id: String,
    pub scenario_title: String,
    pub situation: String,
    pub review: ReviewState,
    /// An interpretation is in flight.
    pub busy: bool,
    pub draft: String,
    /// Breakdown of the orders awaiting approval.
    pub pending_review: Option<String>,
    /// Menu options on offer, in selection order.
    pub options: Vec<String>,
    pub phase: Option<PhaseId>,
    pub outcome: Option<GameOutcome>,
    pub map_view: String,
}

impl SessionSnapshot {
    /// One-line status: turn, DEFCON and every metric.
    pub fn status_line(&self) -> String {
        let metrics = self
            .metrics
            .iter()
            .map(|(metric, value)| format!("{}: {value}", metric.label()))
            .collect::<Vec<_>>()
            .join(" | ");
        format!("Turn {} | DEFCON {} | {metrics}", self.metrics.turn, self.defcon)
    }
}
