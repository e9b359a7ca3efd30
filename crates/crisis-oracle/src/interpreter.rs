//! Order interpreter: free-text directive to structured order set.
//!
//! One request per submission, no automatic retries. Replies are normalised
//! before parsing because the oracle does not always honour the "plain JSON,
//! plain integers" instruction.

use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crisis_core::enums::Metric;
use crisis_core::state::MetricState;
use crisis_core::types::{Effects, Feasibility, Order, OrderSet};

use crate::client::{Channel, Oracle, OracleRequest};
use crate::error::InterpretError;
use crate::prompts::{self, ScenarioBrief};

static CODE_FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?:json)?\n?").expect("valid regex"));

static SIGNED_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":\s*\+(\d+)").expect("valid regex"));

/// Reply shape before metric names are checked.
#[derive(Debug, Deserialize)]
struct RawOrderSet {
    orders: Vec<Order>,
    predicted_effects: BTreeMap<String, i64>,
    #[serde(default)]
    risks: Vec<String>,
    #[serde(default)]
    opportunities: Vec<String>,
    feasibility: Feasibility,
    #[serde(default)]
    clarifications_needed: Vec<String>,
}

/// Trim the directive and reject it if nothing is left.
///
/// # Errors
///
/// Returns `InterpretError::EmptyDirective` for empty or whitespace-only input.
pub fn validate_directive(raw: &str) -> Result<&str, InterpretError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InterpretError::EmptyDirective);
    }
    Ok(trimmed)
}

/// Strip code fences and explicit `+` signs on numbers.
pub fn normalize_reply(text: &str) -> String {
    let unfenced = CODE_FENCE_RE.replace_all(text, "");
    SIGNED_NUMBER_RE
        .replace_all(unfenced.trim(), ": $1")
        .into_owned()
}

/// Parse a (raw) oracle reply into an order set.
///
/// Effect keys that are not metric names are dropped.
///
/// # Errors
///
/// Returns `InterpretError::Uninterpretable` if the normalised text is not a
/// JSON object matching the order-set schema.
pub fn parse_order_set(text: &str) -> Result<OrderSet, InterpretError> {
    let normalized = normalize_reply(text);
    let raw: RawOrderSet =
        serde_json::from_str(&normalized).map_err(|e| InterpretError::Uninterpretable {
            reason: e.to_string(),
        })?;

    let mut predicted_effects = Effects::new();
    for (name, delta) in raw.predicted_effects {
        match name.parse::<Metric>() {
            Ok(metric) => {
                predicted_effects.insert(metric, delta);
            }
            Err(e) => warn!(error = %e, "dropping predicted effect"),
        }
    }

    Ok(OrderSet {
        orders: raw.orders,
        predicted_effects,
        risks: raw.risks,
        opportunities: raw.opportunities,
        feasibility: raw.feasibility,
        clarifications_needed: raw.clarifications_needed,
    })
}

/// Wraps the oracle's command channel.
#[derive(Clone)]
pub struct OrderInterpreter {
    oracle: Arc<dyn Oracle>,
}

impl std::fmt::Debug for OrderInterpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderInterpreter").finish_non_exhaustive()
    }
}

impl OrderInterpreter {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Interpret one directive against the current scoreboard.
    ///
    /// Never touches the metric state; the caller decides what to do with the
    /// returned order set.
    ///
    /// # Errors
    ///
    /// `EmptyDirective` without contacting the oracle, `Unreachable` on any
    /// oracle failure, `Uninterpretable` on a reply that does not parse.
    pub async fn interpret(
        &self,
        brief: &ScenarioBrief,
        metrics: &MetricState,
        directive: &str,
    ) -> Result<OrderSet, InterpretError> {
        let directive = validate_directive(directive)?;
        let prompt = prompts::interpret(brief, metrics, directive);

        debug!(chars = directive.len(), turn = metrics.turn, "interpreting directive");
        let reply = self
            .oracle
            .complete(OracleRequest::new(Channel::Command, prompt))
            .await?;

        let order_set = parse_order_set(&reply)?;
        info!(
            orders = order_set.orders.len(),
            possible = order_set.feasibility.possible,
            clarifications = order_set.clarifications_needed.len(),
            "directive interpreted"
        );
        Ok(order_set)
    }
}
