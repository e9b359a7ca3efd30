//! Prompt construction for every oracle channel.
//!
//! Prompts carry the full metric snapshot so the oracle reasons from the same
//! numbers the player sees.

use std::fmt::Write;

use crisis_core::state::MetricState;
use crisis_core::types::Order;

/// What the oracle needs to know about the active scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScenarioBrief {
    pub title: String,
    pub description: String,
}

impl ScenarioBrief {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

const ORDER_SCHEMA: &str = r#"{
    "orders": [
        {
            "type": "military|diplomatic|economic|intelligence|public_statement",
            "action": "specific action description",
            "target": "who/what/where",
            "timeline": "immediate|hours|days|weeks",
            "intensity": "low|medium|high"
        }
    ],
    "predicted_effects": {
        "stability": -20,
        "diplomacy": 10,
        "military": 5,
        "support": -5,
        "allies": 15,
        "intelligence": 0
    },
    "risks": ["specific risk"],
    "opportunities": ["potential positive outcome"],
    "feasibility": {
        "possible": true,
        "issues": []
    },
    "clarifications_needed": []
}"#;

fn metric_block(metrics: &MetricState) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "- Turn: {}", metrics.turn);
    for (metric, value) in metrics.iter() {
        let _ = writeln!(out, "- {}: {value}/100", metric.label());
    }
    let _ = write!(out, "- DEFCON: {}", metrics.defcon());
    out
}

fn orders_json(orders: &[Order]) -> String {
    serde_json::to_string(orders).unwrap_or_else(|_| "[]".to_string())
}

/// Interpretation request: free-text directive to structured order set.
pub fn interpret(brief: &ScenarioBrief, metrics: &MetricState, directive: &str) -> String {
    format!(
        "You are the game master for a geopolitical crisis simulation. \
Turn the player's directive into executable orders.

CURRENT GAME STATE:
- Scenario: {title}
{metrics}

SCENARIO CONTEXT:
{description}

PLAYER DIRECTIVE:
\"{directive}\"

Reply with one JSON object and nothing else (no markdown, no code fences), using this schema:
{schema}

Numbers in predicted_effects are plain integers: write 10, never +10.

RULES:
1. Predict realistic consequences.
2. Catastrophic decisions (nuclear use, full mobilization) are allowed but carry severe consequences.
3. List anything vague or ambiguous in clarifications_needed.
4. If the directive is gibberish or impossible, set feasibility.possible to false and explain in issues.
5. Larger actions have larger effects, positive and negative.
6. Respect current metrics: low military readiness limits military options.",
        title = brief.title,
        metrics = metric_block(metrics),
        description = brief.description,
        schema = ORDER_SCHEMA,
    )
}

/// Adversary reaction to the orders just executed (prose only).
pub fn adversary_response(brief: &ScenarioBrief, orders: &[Order], metrics: &MetricState) -> String {
    format!(
        "You are simulating the adversary nation's response in a crisis.

SCENARIO: {title}
PLAYER ORDERS: {orders}
CURRENT DEFCON: {defcon}
STABILITY: {stability}

Write a realistic adversary response in 2-4 sentences. Weigh proportional response, \
face-saving needs, domestic pressure, strategic calculation and the escalation ladder. \
If the player did something catastrophic, respond accordingly.
Plain text only, no JSON.",
        title = brief.title,
        orders = orders_json(orders),
        defcon = metrics.defcon(),
        stability = metrics.stability(),
    )
}

/// The next phase of the crisis after a continuing turn (prose only).
pub fn next_situation(brief: &ScenarioBrief, orders: &[Order], metrics: &MetricState) -> String {
    format!(
        "Generate the next phase of this crisis based on the player's actions.

SCENARIO: {title}
PREVIOUS ORDERS: {orders}
CURRENT STATE: Stability {stability}, DEFCON {defcon}, Turn {turn}

Describe the new situation in 2-3 sentences: what has developed and what decision the player now faces.
Plain text only.",
        title = brief.title,
        orders = orders_json(orders),
        stability = metrics.stability(),
        defcon = metrics.defcon(),
        turn = metrics.turn,
    )
}

/// A handful of candidate directives for the player (prose only).
pub fn suggested_options(brief: &ScenarioBrief, metrics: &MetricState) -> String {
    format!(
        "Suggest 3-4 response options for this crisis.

SCENARIO: {title}
DESCRIPTION: {description}
CURRENT STATE: Stability {stability}, DEFCON {defcon}

Give one brief directive per line, ranging from cautious to aggressive. Plain text list.",
        title = brief.title,
        description = brief.description,
        stability = metrics.stability(),
        defcon = metrics.defcon(),
    )
}
