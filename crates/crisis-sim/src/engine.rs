//! Crisis engine: the turn controller.
//!
//! `CrisisEngine` owns one player session. It routes free-text directives
//! through the review desk, menu choices through the branch tables, and runs
//! every executed turn through the same path: apply effects, evaluate
//! termination, continue the story, persist. Headless and runtime-agnostic;
//! the only suspension points are oracle calls.

use std::path::PathBuf;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crisis_branching::fsm::{self, BranchPosition};
use crisis_core::constants::{DEFAULT_MAP_VIEW, DIRECTIVE_ECHO_CHARS, MENU_CRITICAL_STABILITY_BELOW};
use crisis_core::enums::{Defcon, IntelLevel, PlayMode, ReviewState};
use crisis_core::events::{GameOutcome, IntelEntry, Verdict};
use crisis_core::state::MetricState;
use crisis_core::types::PhaseOption;
use crisis_oracle::interpreter::validate_directive;
use crisis_oracle::{InterpretError, Narration, Narrator, Oracle, OrderInterpreter};

use crate::error::EngineError;
use crate::persistence::{SaveRecord, SaveStore};
use crate::review::{self, ReviewDesk, Settled};
use crate::scenario::{self, Scenario};
use crate::snapshot::SessionSnapshot;
use crate::source::{Continuation, OracleSource, OrderSource, Resolution, TableSource};
use crate::termination;

/// Configuration for starting a session.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub mode: PlayMode,
    /// Scenario id; a random scenario is picked when unset.
    pub scenario: Option<String>,
    /// RNG seed for scenario and consequence picks. Entropy when unset.
    pub seed: Option<u64>,
    /// Save file location. Nothing is persisted when unset.
    pub save_path: Option<PathBuf>,
}

/// Summary of one executed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub verdict: Verdict,
    /// Turn counter after the turn.
    pub turn: u32,
    pub defcon: Defcon,
}

/// One player session.
pub struct CrisisEngine {
    config: EngineConfig,
    metrics: MetricState,
    scenario: Scenario,
    desk: ReviewDesk,
    branch: BranchPosition,
    situation: String,
    outcome: Option<GameOutcome>,
    map_view: String,
    rng: ChaCha8Rng,
    intel: Vec<IntelEntry>,
    store: Option<SaveStore>,
    interpreter: OrderInterpreter,
    narrator: Narrator,
}

impl std::fmt::Debug for CrisisEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CrisisEngine")
            .field("scenario", &self.scenario.id)
            .field("metrics", &self.metrics)
            .field("review", &self.desk.state())
            .finish_non_exhaustive()
    }
}

impl CrisisEngine {
    /// Start a fresh game, overwriting any existing save.
    pub fn new(config: EngineConfig, oracle: Arc<dyn Oracle>) -> Result<Self, EngineError> {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let scenario = choose_scenario(config.scenario.as_deref(), &mut rng)?;
        let store = config.save_path.clone().map(SaveStore::new);

        let mut engine = Self {
            metrics: MetricState::baseline(config.mode),
            branch: BranchPosition::opening(scenario.description, scenario.opening.clone()),
            situation: String::new(),
            scenario,
            desk: ReviewDesk::new(),
            outcome: None,
            map_view: DEFAULT_MAP_VIEW.to_string(),
            rng,
            intel: Vec::new(),
            store,
            interpreter: OrderInterpreter::new(oracle.clone()),
            narrator: Narrator::new(oracle),
            config,
        };
        engine.open_scenario();
        engine.persist_strict()?;
        Ok(engine)
    }

    /// Resume from the save file when it holds an unfinished game, otherwise
    /// start fresh.
    pub fn boot(config: EngineConfig, oracle: Arc<dyn Oracle>) -> Result<Self, EngineError> {
        let Some(store) = config.save_path.clone().map(SaveStore::new) else {
            return Self::new(config, oracle);
        };

        match store.load() {
            Ok(Some(record)) if !record.game_over => match scenario::by_id(&record.scenario_id) {
                Some(scenario) => return Ok(Self::restore(config, oracle, store, record, scenario)),
                None => warn!(scenario = %record.scenario_id, "save names unknown scenario"),
            },
            Ok(Some(_)) => debug!("save holds a finished game"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "discarding unreadable save"),
        }

        store.clear()?;
        Self::new(config, oracle)
    }

    fn restore(
        config: EngineConfig,
        oracle: Arc<dyn Oracle>,
        store: SaveStore,
        record: SaveRecord,
        scenario: Scenario,
    ) -> Self {
        let metrics = record.restore_metrics();
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut engine = Self {
            situation: format!(
                "TURN {}: {}\n\n{}",
                metrics.turn, scenario.title, scenario.description
            ),
            branch: BranchPosition::opening(scenario.description, scenario.opening.clone()),
            scenario,
            desk: ReviewDesk::new(),
            outcome: None,
            map_view: record.map_view,
            rng,
            intel: Vec::new(),
            store: Some(store),
            interpreter: OrderInterpreter::new(oracle.clone()),
            narrator: Narrator::new(oracle),
            config: EngineConfig {
                mode: metrics.mode,
                ..config
            },
            metrics,
        };

        info!(
            scenario = engine.scenario.id,
            turn = engine.metrics.turn,
            defcon = engine.metrics.defcon().level(),
            "game restored"
        );
        let message = format!(
            "Game restored. Turn {}, DEFCON {}.",
            engine.metrics.turn,
            engine.metrics.defcon()
        );
        engine.push_intel(IntelLevel::Info, message);
        engine
    }

    /// Abandon the session and start over with the configured (or a new
    /// random) scenario.
    ///
    /// Refused while an interpretation is in flight.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        if self.desk.is_busy() {
            return Err(EngineError::NotIdle(self.desk.state()));
        }
        if let Some(store) = &self.store {
            store.clear()?;
        }
        self.scenario = choose_scenario(self.config.scenario.as_deref(), &mut self.rng)?;
        self.metrics = MetricState::baseline(self.config.mode);
        self.desk.reset();
        self.branch = BranchPosition::opening(self.scenario.description, self.scenario.opening.clone());
        self.outcome = None;
        self.map_view = DEFAULT_MAP_VIEW.to_string();
        self.open_scenario();
        self.persist_strict()?;
        info!(scenario = self.scenario.id, "game restarted");
        Ok(())
    }

    // ---- Free-text orders ----

    /// Start interpreting a directive.
    ///
    /// Returns the source to run, or `None` when nothing should be sent: a
    /// blank directive (reported locally) or an interpretation already in
    /// flight (ignored).
    pub fn begin_directive(&mut self, directive: &str) -> Result<Option<OracleSource>, EngineError> {
        self.ensure_active(PlayMode::FreeText)?;

        let directive = match validate_directive(directive) {
            Ok(d) => d,
            Err(e) => {
                self.push_intel(IntelLevel::Warning, e.to_string());
                return Ok(None);
            }
        };

        if self.desk.is_busy() {
            return Ok(None);
        }
        if self.desk.state() != ReviewState::Idle {
            return Err(EngineError::NotIdle(self.desk.state()));
        }

        self.desk.try_begin(directive);
        self.push_intel(IntelLevel::Info, format!("Processing command: {}", echo(directive)));
        Ok(Some(OracleSource::new(
            self.interpreter.clone(),
            self.scenario.brief(),
            self.metrics.clone(),
            directive,
        )))
    }

    /// Hand the interpretation result back to the review desk.
    pub fn finish_interpretation(&mut self, result: Result<Resolution, InterpretError>) -> Settled {
        let settled = self.desk.settle(result);
        match &settled {
            Settled::Clarification(questions) => {
                let message = format!("CLARIFICATION REQUIRED: {}", questions.join(" "));
                self.push_intel(IntelLevel::Warning, message);
            }
            Settled::Rejected(issues) => {
                let message = format!("ORDER REJECTED: {}", issues.join(" "));
                self.push_intel(IntelLevel::Critical, message);
            }
            Settled::Reviewing => {
                self.push_intel(IntelLevel::Info, "Orders parsed and ready for review.".to_string());
            }
            Settled::Failed(e) => {
                warn!(error = %e, "interpretation failed");
                self.push_intel(IntelLevel::Critical, e.to_string());
            }
            Settled::Ignored => {}
        }
        settled
    }

    /// Interpret a directive in one step.
    ///
    /// Returns `None` when nothing was sent (see [`Self::begin_directive`]).
    pub async fn submit_directive(&mut self, directive: &str) -> Result<Option<Settled>, EngineError> {
        let Some(source) = self.begin_directive(directive)? else {
            return Ok(None);
        };
        let result = source.produce().await;
        Ok(Some(self.finish_interpretation(result)))
    }

    /// Execute the orders under review.
    pub async fn approve(&mut self) -> Result<TurnReport, EngineError> {
        self.ensure_active(PlayMode::FreeText)?;
        let resolution = self.desk.approve().ok_or(EngineError::NoPendingOrders)?;
        self.push_intel(IntelLevel::Warning, "ORDERS APPROVED. Executing...".to_string());
        Ok(self.execute(resolution).await)
    }

    /// Discard the orders under review, keeping the directive for editing.
    pub fn modify(&mut self) -> Result<(), EngineError> {
        self.ensure_active(PlayMode::FreeText)?;
        if !self.desk.modify() {
            return Err(EngineError::NoPendingOrders);
        }
        self.push_intel(IntelLevel::Info, "Modify your orders and resubmit.".to_string());
        Ok(())
    }

    /// Discard the orders under review and the directive.
    pub fn cancel(&mut self) -> Result<(), EngineError> {
        self.ensure_active(PlayMode::FreeText)?;
        if !self.desk.cancel() {
            return Err(EngineError::NoPendingOrders);
        }
        self.push_intel(IntelLevel::Info, "Orders cancelled.".to_string());
        Ok(())
    }

    /// Ask the oracle for a few candidate directives.
    pub async fn suggest_options(&self) -> Result<Narration, EngineError> {
        self.ensure_active(PlayMode::FreeText)?;
        let brief = self.scenario.brief();
        Ok(self.narrator.suggested_options(&brief, &self.metrics).await)
    }

    // ---- Menu-driven play ----

    /// Take one of the options on offer (zero-based).
    pub async fn select_option(&mut self, index: usize) -> Result<TurnReport, EngineError> {
        self.ensure_active(PlayMode::Menu)?;
        let option = self
            .branch
            .option(index)
            .cloned()
            .ok_or(EngineError::NoSuchOption {
                index,
                available: self.branch.options.len(),
            })?;

        debug!(index, option = %option.text, "option selected");
        let resolution = TableSource::new(option).produce().await?;
        Ok(self.execute(resolution).await)
    }

    // ---- Turn execution ----

    async fn execute(&mut self, resolution: Resolution) -> TurnReport {
        let Resolution {
            effects,
            orders,
            continuation,
        } = resolution;

        self.metrics.apply_effects(&effects);
        info!(
            turn = self.metrics.turn,
            stability = self.metrics.stability(),
            defcon = self.metrics.defcon().level(),
            "effects applied"
        );

        if let Continuation::Branch(option) = &continuation {
            let level = if self.metrics.stability() < MENU_CRITICAL_STABILITY_BELOW {
                IntelLevel::Critical
            } else {
                IntelLevel::Warning
            };
            self.push_intel(level, option.intel.clone());
        }

        let verdict = termination::evaluate(&self.metrics, orders.as_ref());
        let continuing = !verdict.is_terminal();
        if continuing {
            self.metrics.turn += 1;
        }

        let brief = self.scenario.brief();
        match continuation {
            Continuation::Narrate => {
                let executed = orders.map(|set| set.orders).unwrap_or_default();
                let adversary = self
                    .narrator
                    .adversary_response(&brief, &executed, &self.metrics)
                    .await;
                self.push_intel(
                    IntelLevel::Critical,
                    format!("ADVERSARY RESPONSE: {}", adversary.text),
                );

                if continuing {
                    let next = self
                        .narrator
                        .next_situation(&brief, &executed, &self.metrics)
                        .await;
                    self.situation = format!(
                        "TURN {}: {}\n\n{}",
                        self.metrics.turn, self.scenario.title, next.text
                    );
                }
            }
            Continuation::Branch(option) => {
                let step = fsm::advance(
                    self.branch.phase,
                    &option,
                    self.metrics.turn,
                    continuing,
                    &mut self.rng,
                );
                self.push_intel(IntelLevel::Warning, step.consequence.to_string());
                if let Some(next) = step.next {
                    self.situation = format!("SITUATION DEVELOPMENT\n\n{}", next.description);
                    self.branch = next;
                }
            }
        }

        match verdict.reason() {
            Some(reason) => self.end_game(GameOutcome::from_reason(reason)),
            None => self.persist(),
        }
        self.desk.finish_execution();

        TurnReport {
            verdict,
            turn: self.metrics.turn,
            defcon: self.metrics.defcon(),
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        self.metrics.game_over = true;
        info!(
            victory = outcome.victory,
            reason = %outcome.reason,
            turn = self.metrics.turn,
            "game over"
        );
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                warn!(error = %e, "failed to clear save after game over");
            }
        }
        let level = if outcome.victory {
            IntelLevel::Info
        } else {
            IntelLevel::Critical
        };
        self.push_intel(level, outcome.message.clone());
        self.outcome = Some(outcome);
    }

    // ---- Accessors ----

    pub fn metrics(&self) -> &MetricState {
        &self.metrics
    }

    pub fn scenario(&self) -> &Scenario {
        &self.scenario
    }

    pub fn review_state(&self) -> ReviewState {
        self.desk.state()
    }

    pub fn is_busy(&self) -> bool {
        self.desk.is_busy()
    }

    pub fn draft(&self) -> &str {
        self.desk.draft()
    }

    pub fn situation(&self) -> &str {
        &self.situation
    }

    pub fn options(&self) -> &[PhaseOption] {
        &self.branch.options
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    pub fn mode(&self) -> PlayMode {
        self.metrics.mode
    }

    /// Take all intel raised since the last drain.
    pub fn drain_intel(&mut self) -> Vec<IntelEntry> {
        std::mem::take(&mut self.intel)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            metrics: self.metrics.clone(),
            defcon: self.metrics.defcon(),
            scenario_id: self.scenario.id.to_string(),
            scenario_title: self.scenario.title.to_string(),
            situation: self.situation.clone(),
            review: self.desk.state(),
            busy: self.desk.is_busy(),
            draft: self.desk.draft().to_string(),
            pending_review: self.desk.pending_orders().map(review::breakdown),
            options: match self.metrics.mode {
                PlayMode::Menu => self.branch.options.iter().map(|o| o.text.clone()).collect(),
                PlayMode::FreeText => Vec::new(),
            },
            phase: self.branch.phase,
            outcome: self.outcome.clone(),
            map_view: self.map_view.clone(),
        }
    }

    // ---- Internals ----

    fn open_scenario(&mut self) {
        self.situation = format!("{}\n\n{}", self.scenario.title, self.scenario.description);
        info!(
            scenario = self.scenario.id,
            mode = ?self.metrics.mode,
            "scenario started"
        );
        let message = format!("New crisis detected: {}", self.scenario.title);
        self.push_intel(IntelLevel::Critical, message);
    }

    fn ensure_active(&self, mode: PlayMode) -> Result<(), EngineError> {
        if self.metrics.game_over {
            return Err(EngineError::GameOver);
        }
        if self.metrics.mode != mode {
            return Err(EngineError::WrongMode {
                expected: mode,
                actual: self.metrics.mode,
            });
        }
        Ok(())
    }

    fn push_intel(&mut self, level: IntelLevel, message: String) {
        self.intel.push(IntelEntry {
            level,
            message,
            turn: self.metrics.turn,
        });
    }

    fn record(&self) -> SaveRecord {
        SaveRecord::capture(&self.metrics, self.scenario.id, &self.map_view)
    }

    fn persist_strict(&self) -> Result<(), EngineError> {
        if let Some(store) = &self.store {
            store.save(&self.record())?;
        }
        Ok(())
    }

    /// Save after a turn. The turn has already happened, so a failed write is
    /// reported to the player rather than unwinding it.
    fn persist(&mut self) {
        if let Err(e) = self.persist_strict() {
            warn!(error = %e, "failed to save game");
            self.push_intel(IntelLevel::Warning, format!("Save failed: {e}"));
        }
    }
}

fn choose_scenario(id: Option<&str>, rng: &mut ChaCha8Rng) -> Result<Scenario, EngineError> {
    match id {
        Some(id) => scenario::by_id(id).ok_or_else(|| EngineError::UnknownScenario(id.to_string())),
        None => Ok(scenario::pick_random(rng)),
    }
}

/// Directive as echoed in the intel feed.
fn echo(directive: &str) -> String {
    let mut chars = directive.chars();
    let head: String = chars.by_ref().take(DIRECTIVE_ECHO_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
