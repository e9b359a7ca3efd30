//! Messages exchanged between the console and the game loop task.

use crisis_core::commands::PlayerCommand;
use crisis_core::events::IntelEntry;
use crisis_oracle::InterpretError;
use crisis_sim::source::Resolution;
use crisis_sim::SessionSnapshot;

/// Commands sent to the game loop task.
#[derive(Debug)]
pub enum LoopCommand {
    /// A player command to forward to the engine.
    Player(PlayerCommand),
    /// An interpretation finished in its background task.
    Interpreted(Result<Resolution, InterpretError>),
    /// Publish the current state without changing it.
    Status,
    /// Stop the game loop.
    Shutdown,
}

/// What the game loop publishes after handling a command.
#[derive(Debug, Clone)]
pub struct LoopUpdate {
    pub intel: Vec<IntelEntry>,
    /// Command feedback that is not part of the intel feed.
    pub notice: Option<String>,
    pub snapshot: SessionSnapshot,
}
