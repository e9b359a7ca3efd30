//! Engine and persistence errors.

use std::path::PathBuf;

use thiserror::Error;

use crisis_core::enums::{PlayMode, ReviewState};
use crisis_oracle::InterpretError;

/// A player command that is not valid in the current session state.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("the game is over; restart to play again")]
    GameOver,

    #[error("command requires {expected:?} mode, session is in {actual:?} mode")]
    WrongMode { expected: PlayMode, actual: PlayMode },

    #[error("no orders are awaiting review")]
    NoPendingOrders,

    #[error("command not available while {0:?}")]
    NotIdle(ReviewState),

    #[error("option {index} is not on offer ({available} available)")]
    NoSuchOption { index: usize, available: usize },

    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Failure reading or writing the save record.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to access save file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("save file {path} is not a valid record: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
