//! Line-oriented console: input parsing and rendering.
//!
//! Rendering returns strings so the caller decides where they go.

use std::fmt::Write;

use crisis_core::commands::PlayerCommand;
use crisis_core::enums::{IntelLevel, PlayMode};
use crisis_core::events::IntelEntry;

use crate::state::LoopUpdate;

/// One parsed line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Command(PlayerCommand),
    Status,
    Help,
    Quit,
    /// Input that could not be understood, with a hint for the player.
    Unknown(String),
}

/// Parse a line typed by the player.
pub fn parse_line(line: &str, mode: PlayMode) -> Input {
    let trimmed = line.trim();

    if let Some(word) = trimmed.strip_prefix('/') {
        return match word.to_ascii_lowercase().as_str() {
            "approve" => Input::Command(PlayerCommand::ApproveOrders),
            "modify" => Input::Command(PlayerCommand::ModifyOrders),
            "cancel" => Input::Command(PlayerCommand::CancelOrders),
            "suggest" => Input::Command(PlayerCommand::SuggestOptions),
            "restart" => Input::Command(PlayerCommand::Restart),
            "status" => Input::Status,
            "help" => Input::Help,
            "quit" | "exit" => Input::Quit,
            other => Input::Unknown(format!("Unknown command '/{other}'. Type /help.")),
        };
    }

    match mode {
        PlayMode::FreeText => Input::Command(PlayerCommand::SubmitDirective {
            directive: line.to_string(),
        }),
        PlayMode::Menu => match trimmed.parse::<usize>() {
            Ok(n) if n >= 1 => Input::Command(PlayerCommand::SelectOption { index: n - 1 }),
            _ => Input::Unknown("Enter the number of an option.".to_string()),
        },
    }
}

pub fn help_text(mode: PlayMode) -> String {
    let orders = match mode {
        PlayMode::FreeText => {
            "Type a directive to issue orders.\n  /approve  execute the orders under review\n  /modify   discard them and edit the directive\n  /cancel   discard them\n  /suggest  ask for suggested directives"
        }
        PlayMode::Menu => "Type the number of an option to take it.",
    };
    format!("{orders}\n  /status   show the scoreboard\n  /restart  start a new game\n  /quit     leave")
}

pub fn render_intel(entry: &IntelEntry) -> String {
    let tag = match entry.level {
        IntelLevel::Info => "INFO",
        IntelLevel::Warning => "WARNING",
        IntelLevel::Critical => "CRITICAL",
    };
    format!("[T{} {tag}] {}", entry.turn, entry.message)
}

/// Renders updates, printing the situation only when it changes.
#[derive(Debug, Default)]
pub struct Console {
    last_situation: String,
    last_options: Vec<String>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, update: &LoopUpdate) -> String {
        let snapshot = &update.snapshot;
        let mut out = String::new();

        if snapshot.situation != self.last_situation {
            let _ = writeln!(out, "\n{}\n", snapshot.situation);
            self.last_situation = snapshot.situation.clone();
        }

        for entry in &update.intel {
            let _ = writeln!(out, "{}", render_intel(entry));
        }

        if let Some(notice) = &update.notice {
            let _ = writeln!(out, "{notice}");
        }

        if snapshot.busy {
            let _ = writeln!(out, "Interpreting orders...");
        }

        if let Some(review) = &snapshot.pending_review {
            let _ = writeln!(out, "\n{review}\n\n/approve, /modify or /cancel");
        }

        if let Some(outcome) = &snapshot.outcome {
            let _ = writeln!(out, "\n=== {} ===\n{}\n/restart or /quit", outcome.title, outcome.message);
        } else if snapshot.options != self.last_options && !snapshot.options.is_empty() {
            let _ = writeln!(out, "\nRESPONSE OPTIONS");
            for (i, option) in snapshot.options.iter().enumerate() {
                let _ = writeln!(out, "  [{}] {option}", i + 1);
            }
        }
        self.last_options = snapshot.options.clone();

        out
    }

    /// Full status block for `/status`.
    pub fn render_status(&self, update: &LoopUpdate) -> String {
        let snapshot = &update.snapshot;
        let mut out = format!("{}\n{}", snapshot.scenario_title, snapshot.status_line());
        if !snapshot.options.is_empty() {
            for (i, option) in snapshot.options.iter().enumerate() {
                let _ = write!(out, "\n  [{}] {option}", i + 1);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crisis_oracle::OfflineOracle;
    use crisis_sim::{CrisisEngine, EngineConfig};

    use super::*;

    fn menu_update() -> LoopUpdate {
        let config = EngineConfig {
            mode: PlayMode::Menu,
            scenario: Some("embassy_siege".to_string()),
            seed: Some(1),
            save_path: None,
        };
        let mut engine = CrisisEngine::new(config, Arc::new(OfflineOracle)).unwrap();
        LoopUpdate {
            intel: engine.drain_intel(),
            notice: None,
            snapshot: engine.snapshot(),
        }
    }

    #[test]
    fn test_slash_commands() {
        let mode = PlayMode::FreeText;
        assert_eq!(parse_line("/approve", mode), Input::Command(PlayerCommand::ApproveOrders));
        assert_eq!(parse_line(" /MODIFY ", mode), Input::Command(PlayerCommand::ModifyOrders));
        assert_eq!(parse_line("/cancel", mode), Input::Command(PlayerCommand::CancelOrders));
        assert_eq!(parse_line("/suggest", mode), Input::Command(PlayerCommand::SuggestOptions));
        assert_eq!(parse_line("/restart", PlayMode::Menu), Input::Command(PlayerCommand::Restart));
        assert_eq!(parse_line("/status", mode), Input::Status);
        assert_eq!(parse_line("/exit", mode), Input::Quit);
        assert!(matches!(parse_line("/launch", mode), Input::Unknown(_)));
    }

    #[test]
    fn test_free_text_passes_line_through() {
        assert_eq!(
            parse_line("Hold the line", PlayMode::FreeText),
            Input::Command(PlayerCommand::SubmitDirective {
                directive: "Hold the line".to_string()
            })
        );
        // Blank lines go to the engine, which reports them.
        assert_eq!(
            parse_line("   ", PlayMode::FreeText),
            Input::Command(PlayerCommand::SubmitDirective {
                directive: "   ".to_string()
            })
        );
    }

    #[test]
    fn test_menu_numbers_are_one_based() {
        assert_eq!(
            parse_line("2", PlayMode::Menu),
            Input::Command(PlayerCommand::SelectOption { index: 1 })
        );
        assert!(matches!(parse_line("0", PlayMode::Menu), Input::Unknown(_)));
        assert!(matches!(parse_line("escalate", PlayMode::Menu), Input::Unknown(_)));
    }

    #[test]
    fn test_intel_tags() {
        let entry = IntelEntry {
            level: IntelLevel::Critical,
            message: "Alliance wavering.".to_string(),
            turn: 3,
        };
        assert_eq!(render_intel(&entry), "[T3 CRITICAL] Alliance wavering.");
    }

    #[test]
    fn test_render_prints_situation_and_options_once() {
        let update = menu_update();
        let mut console = Console::new();

        let first = console.render(&update);
        assert!(first.contains("Embassy Siege"));
        assert!(first.contains("[T0 CRITICAL] New crisis detected: Embassy Siege"));
        assert!(first.contains("RESPONSE OPTIONS"));
        assert!(first.contains("  [1] Prepare a special forces extraction"));

        let quiet = LoopUpdate {
            intel: Vec::new(),
            ..update.clone()
        };
        assert_eq!(console.render(&quiet), "");
        assert!(console.render_status(&quiet).contains("Turn 0 | DEFCON 5"));
    }

    #[test]
    fn test_help_mentions_mode_commands() {
        assert!(help_text(PlayMode::FreeText).contains("/approve"));
        assert!(!help_text(PlayMode::Menu).contains("/approve"));
        assert!(help_text(PlayMode::Menu).contains("/quit"));
    }
}
