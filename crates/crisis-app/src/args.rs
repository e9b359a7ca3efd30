//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crisis_core::enums::PlayMode;
use crisis_oracle::client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::logging::LogFormat;

/// Turn-based geopolitical crisis simulation in the terminal.
#[derive(Parser, Debug)]
#[command(name = "crisis", author, version, about)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Diagnostic log format on stderr.
    #[arg(long, value_enum, default_value = "human")]
    pub log_format: LogFormatArg,

    /// How orders are issued.
    #[arg(long, value_enum, default_value = "free-text", env = "CRISIS_MODE")]
    pub mode: ModeArg,

    /// Scenario id (random when omitted).
    #[arg(long)]
    pub scenario: Option<String>,

    /// RNG seed for reproducible scenario and consequence picks.
    #[arg(long, env = "CRISIS_SEED")]
    pub seed: Option<u64>,

    /// Save file, written at the end of every turn.
    #[arg(long, default_value = "crisis_save.json", env = "CRISIS_SAVE_FILE")]
    pub save_file: PathBuf,

    /// Do not read or write a save file.
    #[arg(long)]
    pub no_save: bool,

    /// Ignore any saved game and start fresh.
    #[arg(long)]
    pub new_game: bool,

    /// Oracle API key.
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Oracle model name.
    #[arg(long, default_value = DEFAULT_MODEL, env = "CRISIS_MODEL")]
    pub model: String,

    /// Oracle base URL.
    #[arg(long, default_value = DEFAULT_BASE_URL, env = "CRISIS_BASE_URL")]
    pub base_url: String,

    /// Give up on an oracle call after this many seconds.
    #[arg(long, default_value_t = 60, env = "CRISIS_TIMEOUT_SECS")]
    pub timeout_secs: u64,

    /// Print the scenario catalog and exit.
    #[arg(long)]
    pub list_scenarios: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    FreeText,
    Menu,
}

impl From<ModeArg> for PlayMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::FreeText => PlayMode::FreeText,
            ModeArg::Menu => PlayMode::Menu,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Human,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Human => LogFormat::Human,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}
