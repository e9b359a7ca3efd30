//! Events emitted by the engine for the intel feed and game-over screen.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::IntelLevel;

/// One line in the player's intel feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelEntry {
    pub level: IntelLevel,
    pub message: String,
    /// Turn counter when the entry was raised.
    pub turn: u32,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndReason {
    DomesticInstability,
    AllianceCollapse,
    CatastrophicEscalation,
    CrisisDefused,
}

impl EndReason {
    pub fn is_victory(self) -> bool {
        matches!(self, EndReason::CrisisDefused)
    }

    /// Game-over text shown to the player.
    pub fn message(self) -> &'static str {
        match self {
            EndReason::DomesticInstability => {
                "Domestic instability has forced your resignation. The crisis continues without coherent leadership."
            }
            EndReason::AllianceCollapse => {
                "Alliance structure has collapsed. Isolated and vulnerable, strategic options have evaporated."
            }
            EndReason::CatastrophicEscalation => {
                "Your orders triggered a catastrophic escalation spiral."
            }
            EndReason::CrisisDefused => {
                "Through careful maneuvering, the crisis has been defused."
            }
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndReason::DomesticInstability => "domestic instability",
            EndReason::AllianceCollapse => "alliance collapse",
            EndReason::CatastrophicEscalation => "catastrophic escalation",
            EndReason::CrisisDefused => "crisis defused",
        };
        f.write_str(s)
    }
}

/// Result of the termination check after a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    Continue,
    Defeat(EndReason),
    Victory(EndReason),
}

impl Verdict {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Verdict::Continue)
    }

    pub fn reason(self) -> Option<EndReason> {
        match self {
            Verdict::Continue => None,
            Verdict::Defeat(r) | Verdict::Victory(r) => Some(r),
        }
    }
}

/// Final outcome surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub victory: bool,
    pub reason: EndReason,
    pub title: String,
    pub message: String,
}

impl GameOutcome {
    pub fn from_reason(reason: EndReason) -> Self {
        let victory = reason.is_victory();
        Self {
            victory,
            reason,
            title: if victory {
                "CRISIS RESOLVED".to_string()
            } else {
                "SCENARIO FAILURE".to_string()
            },
            message: reason.message().to_string(),
        }
    }
}
