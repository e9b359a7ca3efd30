//! Enumeration types used throughout the simulation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the six strategic metrics tracked on the scoreboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Stability,
    Diplomacy,
    /// Military readiness.
    Military,
    /// Public support at home.
    Support,
    /// Allied confidence.
    Allies,
    Intelligence,
}

impl Metric {
    /// All metrics in scoreboard order.
    pub const ALL: [Metric; 6] = [
        Metric::Stability,
        Metric::Diplomacy,
        Metric::Military,
        Metric::Support,
        Metric::Allies,
        Metric::Intelligence,
    ];

    /// Wire name, as used in effect maps and save records.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Stability => "stability",
            Metric::Diplomacy => "diplomacy",
            Metric::Military => "military",
            Metric::Support => "support",
            Metric::Allies => "allies",
            Metric::Intelligence => "intelligence",
        }
    }

    /// Display label for status panels.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Stability => "Stability",
            Metric::Diplomacy => "Diplomacy",
            Metric::Military => "Military Readiness",
            Metric::Support => "Public Support",
            Metric::Allies => "Allied Confidence",
            Metric::Intelligence => "Intelligence",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A metric name that is not one of the six known metrics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metric '{0}'")]
pub struct UnknownMetric(pub String);

impl FromStr for Metric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| UnknownMetric(s.to_string()))
    }
}

/// Alert level derived from stability. The simulation never reaches DEFCON 1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Defcon {
    Two,
    Three,
    Four,
    #[default]
    Five,
}

impl Defcon {
    /// Derive the alert level from a stability value.
    ///
    /// Bands are half-open on the low side: 30 is DEFCON 3, not 2.
    pub fn from_stability(stability: u8) -> Self {
        use crate::constants::{DEFCON_3_FLOOR, DEFCON_4_FLOOR, DEFCON_5_FLOOR};

        if stability < DEFCON_3_FLOOR {
            Defcon::Two
        } else if stability < DEFCON_4_FLOOR {
            Defcon::Three
        } else if stability < DEFCON_5_FLOOR {
            Defcon::Four
        } else {
            Defcon::Five
        }
    }

    pub fn level(self) -> u8 {
        match self {
            Defcon::Two => 2,
            Defcon::Three => 3,
            Defcon::Four => 4,
            Defcon::Five => 5,
        }
    }
}

impl fmt::Display for Defcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

// Serialized as the bare level number so save records read naturally.
impl Serialize for Defcon {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Defcon {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            2 => Ok(Defcon::Two),
            3 => Ok(Defcon::Three),
            4 => Ok(Defcon::Four),
            5 => Ok(Defcon::Five),
            other => Err(serde::de::Error::custom(format!(
                "DEFCON {other} is outside 2..=5"
            ))),
        }
    }
}

/// How the player issues directives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayMode {
    /// Free-text orders interpreted by the oracle.
    #[default]
    FreeText,
    /// Discrete choices from the phase branch tree.
    Menu,
}

/// Category of an interpreted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    Military,
    Diplomatic,
    Economic,
    Intelligence,
    PublicStatement,
}

impl OrderType {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderType::Military => "military",
            OrderType::Diplomatic => "diplomatic",
            OrderType::Economic => "economic",
            OrderType::Intelligence => "intelligence",
            OrderType::PublicStatement => "public_statement",
        }
    }
}

/// When an order takes effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeline {
    Immediate,
    Hours,
    Days,
    Weeks,
}

impl Timeline {
    pub fn as_str(self) -> &'static str {
        match self {
            Timeline::Immediate => "immediate",
            Timeline::Hours => "hours",
            Timeline::Days => "days",
            Timeline::Weeks => "weeks",
        }
    }
}

/// How forcefully an order is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    pub fn as_str(self) -> &'static str {
        match self {
            Intensity::Low => "low",
            Intensity::Medium => "medium",
            Intensity::High => "high",
        }
    }
}

/// Named node of the menu-driven consequence graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseId {
    Escalation,
    Negotiation,
    Coalition,
    EconomicWar,
    Standoff,
    Ultimatum,
    Resolution,
}

impl PhaseId {
    pub const ALL: [PhaseId; 7] = [
        PhaseId::Escalation,
        PhaseId::Negotiation,
        PhaseId::Coalition,
        PhaseId::EconomicWar,
        PhaseId::Standoff,
        PhaseId::Ultimatum,
        PhaseId::Resolution,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PhaseId::Escalation => "escalation",
            PhaseId::Negotiation => "negotiation",
            PhaseId::Coalition => "coalition",
            PhaseId::EconomicWar => "economic_war",
            PhaseId::Standoff => "standoff",
            PhaseId::Ultimatum => "ultimatum",
            PhaseId::Resolution => "resolution",
        }
    }
}

impl fmt::Display for PhaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of the order review and approval machine.
///
/// `ClarificationNeeded`, `Rejected`, `Approved`, `Modifying` and `Cancelled`
/// are pass-through states: the machine settles back in `Idle` (or moves on to
/// `Executing`) within the same step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewState {
    #[default]
    Idle,
    Interpreting,
    ClarificationNeeded,
    Rejected,
    Reviewing,
    Approved,
    Executing,
    Modifying,
    Cancelled,
}

/// Intel feed severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntelLevel {
    Info,
    Warning,
    Critical,
}
