//! Narrator for prose-only oracle calls.
//!
//! None of these calls has a mechanical effect, so failures degrade to fixed
//! fallback text instead of surfacing as errors.

use std::sync::Arc;

use tracing::warn;

use crisis_core::state::MetricState;
use crisis_core::types::Order;

use crate::client::{Channel, Oracle, OracleRequest};
use crate::prompts::{self, ScenarioBrief};

pub const ADVERSARY_FALLBACK: &str =
    "Adversary response unclear. Intelligence gathering in progress.";

pub const SITUATION_FALLBACK: &str = "Failed to generate next phase. Crisis continues...";

pub const SUGGESTIONS_FALLBACK: &str = "Failed to generate suggestions.";

/// Prose from the oracle, or the fallback line when the call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    pub text: String,
    pub fallback: bool,
}

impl Narration {
    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fallback: true,
        }
    }
}

#[derive(Clone)]
pub struct Narrator {
    oracle: Arc<dyn Oracle>,
}

impl std::fmt::Debug for Narrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Narrator").finish_non_exhaustive()
    }
}

impl Narrator {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub async fn adversary_response(
        &self,
        brief: &ScenarioBrief,
        orders: &[Order],
        metrics: &MetricState,
    ) -> Narration {
        let prompt = prompts::adversary_response(brief, orders, metrics);
        self.narrate(Channel::GameMaster, prompt, ADVERSARY_FALLBACK)
            .await
    }

    pub async fn next_situation(
        &self,
        brief: &ScenarioBrief,
        orders: &[Order],
        metrics: &MetricState,
    ) -> Narration {
        let prompt = prompts::next_situation(brief, orders, metrics);
        self.narrate(Channel::Situation, prompt, SITUATION_FALLBACK)
            .await
    }

    pub async fn suggested_options(&self, brief: &ScenarioBrief, metrics: &MetricState) -> Narration {
        let prompt = prompts::suggested_options(brief, metrics);
        self.narrate(Channel::GameMaster, prompt, SUGGESTIONS_FALLBACK)
            .await
    }

    async fn narrate(&self, channel: Channel, prompt: String, fallback: &str) -> Narration {
        match self.oracle.complete(OracleRequest::new(channel, prompt)).await {
            Ok(text) if !text.trim().is_empty() => Narration {
                text: text.trim().to_string(),
                fallback: false,
            },
            Ok(_) => {
                warn!(channel = channel.as_str(), "oracle returned empty narrative");
                Narration::fallback(fallback)
            }
            Err(e) => {
                warn!(channel = channel.as_str(), error = %e, "narrative call failed");
                Narration::fallback(fallback)
            }
        }
    }
}
