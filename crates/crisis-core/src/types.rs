//! Order and option types shared by both order paths.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::CATASTROPHIC_MARKERS;
use crate::enums::{Intensity, Metric, OrderType, PhaseId, Timeline};

/// Signed metric deltas. Keys are always known metrics.
pub type Effects = BTreeMap<Metric, i64>;

/// A single concrete order parsed from a player directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "type")]
    pub kind: OrderType,
    pub action: String,
    pub target: String,
    pub timeline: Timeline,
    pub intensity: Intensity,
}

impl Order {
    /// Whether the action text names a nuclear option (case-insensitive).
    pub fn mentions_nuclear(&self) -> bool {
        let action = self.action.to_lowercase();
        CATASTROPHIC_MARKERS.iter().any(|m| action.contains(m))
    }

    /// Whether this is a high-intensity military order.
    pub fn is_heavy_military(&self) -> bool {
        self.kind == OrderType::Military && self.intensity == Intensity::High
    }
}

/// The oracle's verdict on whether the directive can be carried out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feasibility {
    pub possible: bool,
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Structured interpretation of one player directive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSet {
    pub orders: Vec<Order>,
    pub predicted_effects: Effects,
    #[serde(default)]
    pub risks: Vec<String>,
    #[serde(default)]
    pub opportunities: Vec<String>,
    pub feasibility: Feasibility,
    #[serde(default)]
    pub clarifications_needed: Vec<String>,
}

impl OrderSet {
    pub fn needs_clarification(&self) -> bool {
        !self.clarifications_needed.is_empty()
    }
}

/// One menu choice in the phase branch tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOption {
    pub text: String,
    pub effects: Effects,
    /// Consequence line reported as soon as the option is taken.
    pub intel: String,
    /// Where the branch goes next; `None` ends the chain.
    #[serde(default)]
    pub next_phase: Option<PhaseId>,
}

impl PhaseOption {
    pub fn new(
        text: &str,
        effects: &[(Metric, i64)],
        intel: &str,
        next_phase: Option<PhaseId>,
    ) -> Self {
        Self {
            text: text.to_string(),
            effects: effects.iter().copied().collect(),
            intel: intel.to_string(),
            next_phase,
        }
    }
}
