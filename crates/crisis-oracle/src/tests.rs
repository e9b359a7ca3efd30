//! Tests for the interpreter, reply normalisation, and narrator fallbacks.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crisis_core::enums::{Intensity, Metric, OrderType, Timeline};
use crisis_core::state::MetricState;

use crate::client::{Channel, Oracle, OracleRequest};
use crate::error::{InterpretError, OracleError};
use crate::interpreter::{normalize_reply, parse_order_set, validate_directive, OrderInterpreter};
use crate::narrator::{Narrator, ADVERSARY_FALLBACK, SITUATION_FALLBACK, SUGGESTIONS_FALLBACK};
use crate::prompts::ScenarioBrief;

/// Replays queued replies and records every request.
#[derive(Default)]
struct ScriptedOracle {
    replies: Mutex<VecDeque<Result<String, OracleError>>>,
    requests: Mutex<Vec<OracleRequest>>,
}

impl ScriptedOracle {
    fn with(replies: Vec<Result<String, OracleError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<OracleRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError> {
        self.requests.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(OracleError::Transport("script exhausted".to_string())))
    }
}

fn brief() -> ScenarioBrief {
    ScenarioBrief::new("Strait Standoff", "Naval forces converge on a contested strait.")
}

const NAVAL_REPLY: &str = r#"{
    "orders": [{"type": "military", "action": "Deploy naval forces to the flashpoint",
                "target": "contested strait", "timeline": "immediate", "intensity": "medium"}],
    "predicted_effects": {"stability": -10, "military": 5},
    "risks": ["Miscalculation at sea"],
    "opportunities": ["Reassure allies"],
    "feasibility": {"possible": true, "issues": []},
    "clarifications_needed": []
}"#;

// ---- Directive validation ----

#[test]
fn test_validate_directive_trims() {
    assert_eq!(validate_directive("  Hold the line \n").unwrap(), "Hold the line");
    assert!(matches!(
        validate_directive(" \t\n"),
        Err(InterpretError::EmptyDirective)
    ));
}

#[tokio::test]
async fn test_blank_directive_never_reaches_oracle() {
    let oracle = ScriptedOracle::with(vec![Ok(NAVAL_REPLY.to_string())]);
    let interpreter = OrderInterpreter::new(oracle.clone());
    let result = interpreter
        .interpret(&brief(), &MetricState::default(), "   ")
        .await;
    assert!(matches!(result, Err(InterpretError::EmptyDirective)));
    assert!(oracle.requests().is_empty());
}

// ---- Normalisation and parsing ----

#[test]
fn test_normalize_strips_code_fences() {
    let fenced = "```json\n{\"a\": 1}\n```";
    assert_eq!(normalize_reply(fenced), "{\"a\": 1}");
    let bare = "```\n{\"a\": 1}```";
    assert_eq!(normalize_reply(bare), "{\"a\": 1}");
}

#[test]
fn test_normalize_drops_plus_signs() {
    let text = r#"{"stability": +10, "allies":+5, "support": -3}"#;
    assert_eq!(
        normalize_reply(text),
        r#"{"stability": 10, "allies": 5, "support": -3}"#
    );
}

#[test]
fn test_parse_signed_fenced_reply() {
    let reply = format!("```json\n{}\n```", NAVAL_REPLY.replace("\"military\": 5", "\"military\": +5"));
    let set = parse_order_set(&reply).unwrap();
    assert_eq!(set.orders.len(), 1);
    assert_eq!(set.orders[0].kind, OrderType::Military);
    assert_eq!(set.orders[0].timeline, Timeline::Immediate);
    assert_eq!(set.orders[0].intensity, Intensity::Medium);
    assert_eq!(set.predicted_effects.get(&Metric::Stability), Some(&-10));
    assert_eq!(set.predicted_effects.get(&Metric::Military), Some(&5));
    assert!(set.feasibility.possible);
}

#[test]
fn test_parse_drops_unknown_metrics() {
    let reply = NAVAL_REPLY.replace("\"military\": 5", "\"military\": 5, \"morale\": 12");
    let set = parse_order_set(&reply).unwrap();
    assert_eq!(set.predicted_effects.len(), 2);
    assert!(set
        .predicted_effects
        .keys()
        .all(|m| matches!(m, Metric::Stability | Metric::Military)));
}

#[test]
fn test_parse_rejects_prose() {
    let result = parse_order_set("I cannot help with that request.");
    assert!(matches!(result, Err(InterpretError::Uninterpretable { .. })));
}

#[test]
fn test_parse_rejects_schema_violations() {
    let bad_intensity = NAVAL_REPLY.replace("\"medium\"", "\"extreme\"");
    assert!(matches!(
        parse_order_set(&bad_intensity),
        Err(InterpretError::Uninterpretable { .. })
    ));

    let fractional = NAVAL_REPLY.replace("\"stability\": -10", "\"stability\": -10.5");
    assert!(matches!(
        parse_order_set(&fractional),
        Err(InterpretError::Uninterpretable { .. })
    ));

    let no_feasibility = r#"{"orders": [], "predicted_effects": {}}"#;
    assert!(matches!(
        parse_order_set(no_feasibility),
        Err(InterpretError::Uninterpretable { .. })
    ));
}

// ---- Interpreter round trips through the oracle ----

#[tokio::test]
async fn test_interpret_sends_snapshot_and_directive() {
    let oracle = ScriptedOracle::with(vec![Ok(NAVAL_REPLY.to_string())]);
    let interpreter = OrderInterpreter::new(oracle.clone());
    let set = interpreter
        .interpret(
            &brief(),
            &MetricState::default(),
            "  Deploy naval forces to the flashpoint ",
        )
        .await
        .unwrap();
    assert_eq!(set.risks, vec!["Miscalculation at sea".to_string()]);

    let requests = oracle.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].channel, Channel::Command);
    let prompt = &requests[0].prompt;
    assert!(prompt.contains("\"Deploy naval forces to the flashpoint\""));
    assert!(prompt.contains("Strait Standoff"));
    assert!(prompt.contains("Naval forces converge on a contested strait."));
    assert!(prompt.contains("Stability: 85/100"));
    assert!(prompt.contains("Intelligence: 65/100"));
    assert!(prompt.contains("DEFCON: 5"));
}

#[tokio::test]
async fn test_interpret_oracle_failure_is_unreachable() {
    let oracle = ScriptedOracle::with(vec![Err(OracleError::HttpStatus {
        status: 529,
        message: "overloaded".to_string(),
    })]);
    let interpreter = OrderInterpreter::new(oracle);
    let err = interpreter
        .interpret(&brief(), &MetricState::default(), "Open talks")
        .await
        .unwrap_err();
    assert!(matches!(err, InterpretError::Unreachable(_)));
    assert!(err.to_string().starts_with("Oracle unreachable"));
}

#[tokio::test]
async fn test_interpret_garbage_reply_is_uninterpretable() {
    let oracle = ScriptedOracle::with(vec![Ok("{ not json".to_string())]);
    let interpreter = OrderInterpreter::new(oracle);
    let err = interpreter
        .interpret(&brief(), &MetricState::default(), "Open talks")
        .await
        .unwrap_err();
    assert!(matches!(err, InterpretError::Uninterpretable { .. }));
    assert!(err.to_string().contains("Please try a different command."));
}

#[tokio::test]
async fn test_interpret_unreadable_envelope_is_uninterpretable() {
    let oracle = ScriptedOracle::with(vec![Err(OracleError::Malformed(
        "reply contained no text block".to_string(),
    ))]);
    let interpreter = OrderInterpreter::new(oracle);
    let err = interpreter
        .interpret(&brief(), &MetricState::default(), "Open talks")
        .await
        .unwrap_err();
    assert!(matches!(err, InterpretError::Uninterpretable { ref reason } if reason.contains("no text block")));
    assert!(!err.to_string().starts_with("Oracle unreachable"));
}

// ---- Narrator ----

#[tokio::test]
async fn test_narrator_trims_reply() {
    let oracle = ScriptedOracle::with(vec![Ok("  The adversary recalls its fleet.\n".to_string())]);
    let narrator = Narrator::new(oracle.clone());
    let narration = narrator
        .adversary_response(&brief(), &[], &MetricState::default())
        .await;
    assert!(!narration.fallback);
    assert_eq!(narration.text, "The adversary recalls its fleet.");
    assert_eq!(oracle.requests()[0].channel, Channel::GameMaster);
}

#[tokio::test]
async fn test_narrator_falls_back_on_failure() {
    let oracle = ScriptedOracle::with(vec![
        Err(OracleError::Timeout(std::time::Duration::from_secs(1))),
        Ok("   ".to_string()),
        Err(OracleError::Transport("connection refused".to_string())),
    ]);
    let narrator = Narrator::new(oracle.clone());
    let metrics = MetricState::default();

    let adversary = narrator.adversary_response(&brief(), &[], &metrics).await;
    assert!(adversary.fallback);
    assert_eq!(adversary.text, ADVERSARY_FALLBACK);

    let situation = narrator.next_situation(&brief(), &[], &metrics).await;
    assert!(situation.fallback);
    assert_eq!(situation.text, SITUATION_FALLBACK);

    let suggestions = narrator.suggested_options(&brief(), &metrics).await;
    assert!(suggestions.fallback);
    assert_eq!(suggestions.text, SUGGESTIONS_FALLBACK);

    let channels: Vec<Channel> = oracle.requests().iter().map(|r| r.channel).collect();
    assert_eq!(
        channels,
        vec![Channel::GameMaster, Channel::Situation, Channel::GameMaster]
    );
}
