//! Termination evaluator.
//!
//! Pure function of the scoreboard and the order set just executed. Rules are
//! checked in precedence order and the first match wins.

use crisis_core::constants::*;
use crisis_core::enums::PlayMode;
use crisis_core::events::{EndReason, Verdict};
use crisis_core::state::MetricState;
use crisis_core::types::{Order, OrderSet};

/// Decide whether the game continues after a completed turn.
pub fn evaluate(metrics: &MetricState, executed: Option<&OrderSet>) -> Verdict {
    if metrics.stability() < DOMESTIC_COLLAPSE_BELOW || metrics.support() < DOMESTIC_COLLAPSE_BELOW {
        return Verdict::Defeat(EndReason::DomesticInstability);
    }

    if metrics.allies() < ALLIANCE_COLLAPSE_BELOW {
        return Verdict::Defeat(EndReason::AllianceCollapse);
    }

    if metrics.mode == PlayMode::FreeText {
        if let Some(set) = executed {
            if set.orders.iter().any(|o| is_catastrophic(o, metrics.stability())) {
                return Verdict::Defeat(EndReason::CatastrophicEscalation);
            }
        }
    }

    if metrics.stability() > VICTORY_STABILITY_ABOVE
        && metrics.allies() > VICTORY_ALLIES_ABOVE
        && metrics.turn >= VICTORY_MIN_TURN
    {
        return Verdict::Victory(EndReason::CrisisDefused);
    }

    Verdict::Continue
}

fn is_catastrophic(order: &Order, stability: u8) -> bool {
    order.mentions_nuclear() || (order.is_heavy_military() && stability < CATASTROPHIC_STABILITY_BELOW)
}
