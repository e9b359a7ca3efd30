//! Order sources.
//!
//! Both ways of issuing orders reduce to one operation: produce the effects to
//! apply plus how the story continues afterwards. The turn controller only ever
//! sees a [`Resolution`].

use async_trait::async_trait;

use crisis_core::state::MetricState;
use crisis_core::types::{Effects, OrderSet, PhaseOption};
use crisis_oracle::{InterpretError, OrderInterpreter, ScenarioBrief};

/// How the turn continues once effects are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Continuation {
    /// Ask the narrator for the next situation.
    Narrate,
    /// Follow the branch tree from the option that was taken.
    Branch(PhaseOption),
}

/// What an order source hands to the turn controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub effects: Effects,
    /// The interpreted orders, when the source was a free-text directive.
    pub orders: Option<OrderSet>,
    pub continuation: Continuation,
}

#[async_trait]
pub trait OrderSource: Send + Sync {
    async fn produce(&self) -> Result<Resolution, InterpretError>;
}

/// Free-text directive interpreted by the oracle.
///
/// Holds its own copy of everything the request needs, so it can run without
/// borrowing the engine.
#[derive(Debug, Clone)]
pub struct OracleSource {
    interpreter: OrderInterpreter,
    brief: ScenarioBrief,
    metrics: MetricState,
    directive: String,
}

impl OracleSource {
    pub fn new(
        interpreter: OrderInterpreter,
        brief: ScenarioBrief,
        metrics: MetricState,
        directive: impl Into<String>,
    ) -> Self {
        Self {
            interpreter,
            brief,
            metrics,
            directive: directive.into(),
        }
    }

    pub fn directive(&self) -> &str {
        &self.directive
    }
}

#[async_trait]
impl OrderSource for OracleSource {
    async fn produce(&self) -> Result<Resolution, InterpretError> {
        let order_set = self
            .interpreter
            .interpret(&self.brief, &self.metrics, &self.directive)
            .await?;
        Ok(Resolution {
            effects: order_set.predicted_effects.clone(),
            orders: Some(order_set),
            continuation: Continuation::Narrate,
        })
    }
}

/// A menu option taken from the branch tables. Never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSource {
    option: PhaseOption,
}

impl TableSource {
    pub fn new(option: PhaseOption) -> Self {
        Self { option }
    }

    pub fn resolve(&self) -> Resolution {
        Resolution {
            effects: self.option.effects.clone(),
            orders: None,
            continuation: Continuation::Branch(self.option.clone()),
        }
    }
}

#[async_trait]
impl OrderSource for TableSource {
    async fn produce(&self) -> Result<Resolution, InterpretError> {
        Ok(self.resolve())
    }
}
