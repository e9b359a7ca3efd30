//! Top-level errors and process exit codes.

use thiserror::Error;

use crisis_oracle::OracleError;
use crisis_sim::{EngineError, PersistenceError};

/// Exit codes for the `crisis` binary.
pub struct ExitCode;

impl ExitCode {
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Invalid or incomplete configuration
    pub const CONFIG_ERROR: i32 = 2;

    /// Save file or terminal I/O failure
    pub const IO_ERROR: i32 = 3;

    /// Interrupted by SIGINT (Ctrl+C)
    pub const INTERRUPTED: i32 = 130;
}

/// Configuration problems found before a session starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("free-text mode needs an API key (set ANTHROPIC_API_KEY or pass --api-key), or use --mode menu")]
    MissingApiKey,

    #[error("oracle timeout must be at least one second")]
    InvalidTimeout,

    #[error("unknown scenario '{0}' (see --list-scenarios)")]
    UnknownScenario(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("game loop stopped unexpectedly: {0}")]
    GameLoop(String),
}

impl AppError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Oracle(OracleError::MissingApiKey) => ExitCode::CONFIG_ERROR,
            Self::Engine(EngineError::UnknownScenario(_)) => ExitCode::CONFIG_ERROR,
            Self::Engine(EngineError::Persistence(PersistenceError::Io { .. })) | Self::Io(_) => {
                ExitCode::IO_ERROR
            }
            Self::Engine(_) | Self::Oracle(_) | Self::GameLoop(_) => ExitCode::ERROR,
        }
    }
}
