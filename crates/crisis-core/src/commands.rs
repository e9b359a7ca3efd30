//! Player commands sent from the front-end to the engine.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Free-text orders ---
    /// Submit a directive for interpretation.
    SubmitDirective { directive: String },
    /// Approve the orders under review and execute the turn.
    ApproveOrders,
    /// Discard the orders under review but keep the directive for editing.
    ModifyOrders,
    /// Discard the orders under review and the directive text.
    CancelOrders,
    /// Ask the oracle for a few suggested directives.
    SuggestOptions,

    // --- Menu-driven play ---
    /// Pick one of the options on offer (zero-based).
    SelectOption { index: usize },

    // --- Session control ---
    /// Abandon the current game and start over.
    Restart,
}
