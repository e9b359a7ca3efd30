//! Order review and approval machine.
//!
//! Owns the interpretation latch, the directive draft and the single pending
//! resolution. Transitions are plain methods; the engine decides what to tell
//! the player about each one.

use std::fmt::Write;

use tracing::debug;

use crisis_core::constants::CRITICAL_RISK_MARKERS;
use crisis_core::enums::{Metric, ReviewState};
use crisis_core::types::OrderSet;
use crisis_oracle::InterpretError;

use crate::source::Resolution;

/// Where an interpretation landed once the latch was released.
#[derive(Debug)]
pub enum Settled {
    /// The oracle asked questions; nothing is kept.
    Clarification(Vec<String>),
    /// The oracle judged the directive infeasible; nothing is kept.
    Rejected(Vec<String>),
    /// Orders are pending approval.
    Reviewing,
    /// Interpretation failed; nothing is kept.
    Failed(InterpretError),
    /// No interpretation was in flight; the result was dropped unread.
    Ignored,
}

#[derive(Debug, Default)]
pub struct ReviewDesk {
    state: ReviewState,
    /// Held from the start of an interpretation until it settles.
    in_flight: bool,
    draft: String,
    pending: Option<Resolution>,
}

impl ReviewDesk {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }

    /// Directive text kept for editing.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn pending_orders(&self) -> Option<&OrderSet> {
        self.pending.as_ref().and_then(|r| r.orders.as_ref())
    }

    /// Take the latch for a new interpretation.
    ///
    /// Returns `false` and changes nothing if an interpretation is already in
    /// flight.
    pub fn try_begin(&mut self, directive: &str) -> bool {
        if self.in_flight {
            debug!("interpretation in flight, submission ignored");
            return false;
        }
        self.in_flight = true;
        self.state = ReviewState::Interpreting;
        self.draft = directive.to_string();
        true
    }

    /// Release the latch and classify the interpretation result.
    ///
    /// A result arriving while nothing is in flight changes nothing.
    pub fn settle(&mut self, result: Result<Resolution, InterpretError>) -> Settled {
        if !self.in_flight {
            debug!(state = ?self.state, "unrequested interpretation result dropped");
            return Settled::Ignored;
        }
        self.in_flight = false;

        let resolution = match result {
            Ok(resolution) => resolution,
            Err(e) => {
                self.state = ReviewState::Idle;
                return Settled::Failed(e);
            }
        };

        let Some(orders) = resolution.orders.as_ref() else {
            self.state = ReviewState::Idle;
            return Settled::Failed(InterpretError::Uninterpretable {
                reason: "no orders in interpretation".to_string(),
            });
        };

        if orders.needs_clarification() {
            self.state = ReviewState::ClarificationNeeded;
            let questions = orders.clarifications_needed.clone();
            self.state = ReviewState::Idle;
            return Settled::Clarification(questions);
        }

        if !orders.feasibility.possible {
            self.state = ReviewState::Rejected;
            let issues = orders.feasibility.issues.clone();
            self.state = ReviewState::Idle;
            return Settled::Rejected(issues);
        }

        self.pending = Some(resolution);
        self.state = ReviewState::Reviewing;
        Settled::Reviewing
    }

    /// Move the pending orders into execution.
    pub fn approve(&mut self) -> Option<Resolution> {
        if self.state != ReviewState::Reviewing {
            return None;
        }
        self.state = ReviewState::Approved;
        let resolution = self.pending.take();
        self.state = ReviewState::Executing;
        resolution
    }

    /// Execution finished; the desk is ready for the next directive.
    pub fn finish_execution(&mut self) {
        self.state = ReviewState::Idle;
        self.draft.clear();
    }

    /// Drop the pending orders, keep the draft for editing.
    pub fn modify(&mut self) -> bool {
        if self.state != ReviewState::Reviewing {
            return false;
        }
        self.state = ReviewState::Modifying;
        self.pending = None;
        self.state = ReviewState::Idle;
        true
    }

    /// Drop the pending orders and the draft.
    pub fn cancel(&mut self) -> bool {
        if self.state != ReviewState::Reviewing {
            return false;
        }
        self.state = ReviewState::Cancelled;
        self.pending = None;
        self.draft.clear();
        self.state = ReviewState::Idle;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether a risk line should be flagged critical.
pub fn is_critical_risk(risk: &str) -> bool {
    let lower = risk.to_lowercase();
    CRITICAL_RISK_MARKERS.iter().any(|m| lower.contains(m))
}

fn signed(delta: i64) -> String {
    if delta == 0 {
        "0".to_string()
    } else {
        format!("{delta:+}")
    }
}

/// Human-readable breakdown of an order set for review.
pub fn breakdown(set: &OrderSet) -> String {
    let mut out = String::from("ORDERS:\n");
    for (i, order) in set.orders.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {}: {}",
            i + 1,
            order.kind.as_str().to_uppercase(),
            order.action
        );
        let _ = writeln!(
            out,
            "   Target: {} | Timeline: {} | Intensity: {}",
            order.target,
            order.timeline.as_str(),
            order.intensity.as_str()
        );
    }

    out.push_str("\nPREDICTED EFFECTS:\n");
    for metric in Metric::ALL {
        if let Some(&delta) = set.predicted_effects.get(&metric) {
            let _ = writeln!(out, "  {}: {}", metric.label(), signed(delta));
        }
    }

    if !set.risks.is_empty() {
        out.push_str("\nRISKS:\n");
        for risk in &set.risks {
            let marker = if is_critical_risk(risk) { "[CRITICAL]" } else { "-" };
            let _ = writeln!(out, "  {marker} {risk}");
        }
    }

    if !set.opportunities.is_empty() {
        out.push_str("\nOPPORTUNITIES:\n");
        for opportunity in &set.opportunities {
            let _ = writeln!(out, "  + {opportunity}");
        }
    }

    out.trim_end().to_string()
}
