//! Branch state machine over named phases.
//!
//! Pure functions that pick the consequence line for a choice and decide
//! whether the branch moves into its next phase. No engine dependency;
//! operates on plain data plus an injected RNG.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crisis_core::constants::MENU_BRANCH_TURN_LIMIT;
use crisis_core::enums::PhaseId;
use crisis_core::types::PhaseOption;

use crate::catalog::{consequence_pool, phase_node, DEFAULT_PHASE};

/// Where the branch currently stands: the phase and the options on offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchPosition {
    /// `None` while the scenario's opening options are on offer.
    pub phase: Option<PhaseId>,
    pub description: String,
    pub options: Vec<PhaseOption>,
}

impl BranchPosition {
    /// Scenario opening, before any phase has been entered.
    pub fn opening(description: impl Into<String>, options: Vec<PhaseOption>) -> Self {
        Self {
            phase: None,
            description: description.into(),
            options,
        }
    }

    /// Enter a phase from the catalog.
    pub fn enter(phase: PhaseId) -> Self {
        let node = phase_node(phase);
        Self {
            phase: Some(phase),
            description: node.description.to_string(),
            options: node.options,
        }
    }

    pub fn option(&self, index: usize) -> Option<&PhaseOption> {
        self.options.get(index)
    }
}

/// Outcome of taking one option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchStep {
    /// Narrates the immediate aftermath, drawn from the current phase's pool.
    pub consequence: &'static str,
    /// The position to move to, or `None` to stay where we are.
    pub next: Option<BranchPosition>,
}

/// Phase an option leads to; an unset pointer ends the chain at the default.
pub fn resolve_next(option: &PhaseOption) -> PhaseId {
    option.next_phase.unwrap_or(DEFAULT_PHASE)
}

/// Pick a consequence line for a choice made while in `current`.
pub fn consequence_line<R: Rng + ?Sized>(current: Option<PhaseId>, rng: &mut R) -> &'static str {
    let pool = consequence_pool(current.unwrap_or(DEFAULT_PHASE));
    // Pools are non-empty literals.
    pool.choose(rng).copied().unwrap_or(pool[0])
}

/// Evaluate the branch for one choice.
///
/// `turn` is the turn counter after the turn completed and `continuing` is the
/// termination verdict. The branch only advances while the game continues and
/// the turn is below the branch limit.
pub fn advance<R: Rng + ?Sized>(
    current: Option<PhaseId>,
    option: &PhaseOption,
    turn: u32,
    continuing: bool,
    rng: &mut R,
) -> BranchStep {
    let consequence = consequence_line(current, rng);

    if !continuing || turn >= MENU_BRANCH_TURN_LIMIT {
        debug!(turn, continuing, "branch holds position");
        return BranchStep {
            consequence,
            next: None,
        };
    }

    let next_phase = resolve_next(option);
    debug!(from = ?current, to = %next_phase, "branch advances");
    BranchStep {
        consequence,
        next: Some(BranchPosition::enter(next_phase)),
    }
}
