//! Game loop task: owns the engine and processes commands one at a time.
//!
//! Interpretation is the one long oracle call a player waits on, so it runs in
//! its own task and reports back over the command channel. Meanwhile the loop
//! keeps serving commands; further directives hit the engine's latch and are
//! dropped.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crisis_core::commands::PlayerCommand;
use crisis_sim::source::OrderSource;
use crisis_sim::CrisisEngine;

use crate::state::{LoopCommand, LoopUpdate};

/// Bound on queued commands.
const COMMAND_BUFFER: usize = 32;

/// Handles to a running game loop.
pub struct GameLoop {
    pub commands: mpsc::Sender<LoopCommand>,
    pub updates: mpsc::UnboundedReceiver<LoopUpdate>,
    pub handle: JoinHandle<()>,
}

/// Spawn the game loop on the current runtime.
///
/// The loop publishes an initial update, then one update per command. It ends
/// on `Shutdown` or when every command sender is gone.
pub fn spawn_game_loop(engine: CrisisEngine) -> GameLoop {
    let (cmd_tx, cmd_rx) = mpsc::channel(COMMAND_BUFFER);
    let (update_tx, update_rx) = mpsc::unbounded_channel();
    // Interpretation tasks report back through a weak handle so the loop does
    // not keep its own channel open.
    let reply_tx = cmd_tx.downgrade();
    let handle = tokio::spawn(run_game_loop(engine, cmd_rx, reply_tx, update_tx));
    GameLoop {
        commands: cmd_tx,
        updates: update_rx,
        handle,
    }
}

async fn run_game_loop(
    mut engine: CrisisEngine,
    mut cmd_rx: mpsc::Receiver<LoopCommand>,
    reply_tx: mpsc::WeakSender<LoopCommand>,
    update_tx: mpsc::UnboundedSender<LoopUpdate>,
) {
    publish(&mut engine, &update_tx, None);

    while let Some(command) = cmd_rx.recv().await {
        let notice = match command {
            LoopCommand::Shutdown => break,
            LoopCommand::Status => None,
            LoopCommand::Interpreted(result) => {
                engine.finish_interpretation(result);
                None
            }
            LoopCommand::Player(PlayerCommand::SubmitDirective { directive }) => {
                match engine.begin_directive(&directive) {
                    Ok(Some(source)) => {
                        if let Some(tx) = reply_tx.upgrade() {
                            tokio::spawn(async move {
                                let result = source.produce().await;
                                if tx.send(LoopCommand::Interpreted(result)).await.is_err() {
                                    debug!("game loop gone before interpretation finished");
                                }
                            });
                        }
                        None
                    }
                    Ok(None) => None,
                    Err(e) => Some(e.to_string()),
                }
            }
            LoopCommand::Player(command) => handle_player(&mut engine, command).await,
        };

        if update_tx.is_closed() {
            break;
        }
        publish(&mut engine, &update_tx, notice);
    }
    debug!("game loop stopped");
}

async fn handle_player(engine: &mut CrisisEngine, command: PlayerCommand) -> Option<String> {
    let result = match command {
        PlayerCommand::ApproveOrders => engine.approve().await.map(|_| None),
        PlayerCommand::ModifyOrders => engine.modify().map(|()| None),
        PlayerCommand::CancelOrders => engine.cancel().map(|()| None),
        PlayerCommand::SuggestOptions => engine
            .suggest_options()
            .await
            .map(|n| Some(format!("SUGGESTED OPTIONS:\n{}", n.text))),
        PlayerCommand::SelectOption { index } => engine.select_option(index).await.map(|_| None),
        PlayerCommand::Restart => engine.restart().map(|()| None),
        PlayerCommand::SubmitDirective { .. } => Ok(None),
    };
    result.unwrap_or_else(|e| {
        warn!(error = %e, "command refused");
        Some(e.to_string())
    })
}

fn publish(
    engine: &mut CrisisEngine,
    update_tx: &mpsc::UnboundedSender<LoopUpdate>,
    notice: Option<String>,
) {
    let update = LoopUpdate {
        intel: engine.drain_intel(),
        notice,
        snapshot: engine.snapshot(),
    };
    let _ = update_tx.send(update);
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crisis_core::enums::{PlayMode, ReviewState};
    use crisis_oracle::{OfflineOracle, Oracle, OracleError, OracleRequest};
    use crisis_sim::EngineConfig;

    use super::*;

    const REPLY: &str = r#"{
        "orders": [{"type": "diplomatic", "action": "Recall the ambassador",
                    "target": "adversary", "timeline": "hours", "intensity": "low"}],
        "predicted_effects": {"diplomacy": -5},
        "feasibility": {"possible": true}
    }"#;

    /// Holds every reply until released.
    #[derive(Default)]
    struct GatedOracle {
        gate: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Oracle for GatedOracle {
        async fn complete(&self, _request: OracleRequest) -> Result<String, OracleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate.notified().await;
            Ok(REPLY.to_string())
        }
    }

    fn config(mode: PlayMode) -> EngineConfig {
        EngineConfig {
            mode,
            scenario: Some("strait_standoff".to_string()),
            seed: Some(5),
            save_path: None,
        }
    }

    #[tokio::test]
    async fn test_menu_command_round_trip() {
        let engine = CrisisEngine::new(config(PlayMode::Menu), Arc::new(OfflineOracle)).unwrap();
        let mut game = spawn_game_loop(engine);

        let initial = game.updates.recv().await.unwrap();
        assert_eq!(initial.snapshot.metrics.turn, 0);
        assert!(!initial.intel.is_empty());

        game.commands
            .send(LoopCommand::Player(PlayerCommand::SelectOption { index: 0 }))
            .await
            .unwrap();
        let update = game.updates.recv().await.unwrap();
        assert_eq!(update.snapshot.metrics.turn, 1);
        assert!(update.notice.is_none());

        game.commands
            .send(LoopCommand::Player(PlayerCommand::ApproveOrders))
            .await
            .unwrap();
        let refused = game.updates.recv().await.unwrap();
        assert!(refused.notice.unwrap().contains("mode"));

        game.commands.send(LoopCommand::Shutdown).await.unwrap();
        game.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_submissions_during_interpretation_are_dropped() {
        let oracle = Arc::new(GatedOracle::default());
        let engine = CrisisEngine::new(config(PlayMode::FreeText), oracle.clone()).unwrap();
        let mut game = spawn_game_loop(engine);
        game.updates.recv().await.unwrap();

        for directive in ["Recall the ambassador", "Expel their diplomats"] {
            game.commands
                .send(LoopCommand::Player(PlayerCommand::SubmitDirective {
                    directive: directive.to_string(),
                }))
                .await
                .unwrap();
        }
        let first = game.updates.recv().await.unwrap();
        assert!(first.snapshot.busy);
        assert_eq!(first.snapshot.draft, "Recall the ambassador");
        let second = game.updates.recv().await.unwrap();
        assert!(second.snapshot.busy);
        assert_eq!(second.snapshot.draft, "Recall the ambassador");

        oracle.gate.notify_one();
        let settled = game.updates.recv().await.unwrap();
        assert!(!settled.snapshot.busy);
        assert_eq!(settled.snapshot.review, ReviewState::Reviewing);
        assert!(settled.snapshot.pending_review.is_some());
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);

        drop(game.commands);
        game.handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_restart_during_interpretation_is_refused() {
        let oracle = Arc::new(GatedOracle::default());
        let engine = CrisisEngine::new(config(PlayMode::FreeText), oracle.clone()).unwrap();
        let mut game = spawn_game_loop(engine);
        game.updates.recv().await.unwrap();

        game.commands
            .send(LoopCommand::Player(PlayerCommand::SubmitDirective {
                directive: "Recall the ambassador".to_string(),
            }))
            .await
            .unwrap();
        game.updates.recv().await.unwrap();

        game.commands
            .send(LoopCommand::Player(PlayerCommand::Restart))
            .await
            .unwrap();
        let refused = game.updates.recv().await.unwrap();
        assert!(refused.notice.unwrap().contains("Interpreting"));
        assert!(refused.snapshot.busy);

        oracle.gate.notify_one();
        let settled = game.updates.recv().await.unwrap();
        assert_eq!(settled.snapshot.review, ReviewState::Reviewing);
        assert_eq!(oracle.calls.load(Ordering::SeqCst), 1);

        drop(game.commands);
        game.handle.await.unwrap();
    }
}
