//! Terminal front-end for the crisis simulation.
//!
//! Wires configuration, the engine and the game loop task to a line-oriented
//! console on stdin/stdout.

pub mod args;
pub mod config;
pub mod console;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod state;

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crisis_core::enums::PlayMode;
use crisis_sim::{scenario, CrisisEngine};

pub use crisis_core as core;

use crate::args::Cli;
use crate::config::AppConfig;
use crate::console::{help_text, parse_line, Console, Input};
use crate::error::AppError;
use crate::game_loop::spawn_game_loop;
use crate::state::LoopCommand;

/// Run one interactive session until the player quits or stdin closes.
pub async fn run(cli: Cli) -> Result<(), AppError> {
    if cli.list_scenarios {
        let mut stdout = std::io::stdout().lock();
        for s in scenario::all() {
            writeln!(stdout, "{:<22} {}", s.id, s.title)?;
        }
        return Ok(());
    }

    let config = AppConfig::from_cli(&cli)?;
    let oracle = config.build_oracle()?;
    let engine = if config.fresh {
        CrisisEngine::new(config.engine.clone(), oracle)?
    } else {
        CrisisEngine::boot(config.engine.clone(), oracle)?
    };
    info!(scenario = engine.scenario().id, mode = ?engine.mode(), "session started");

    let mut mode: PlayMode = engine.mode();
    let mut game = spawn_game_loop(engine);
    let mut console = Console::new();
    let mut status_requested = false;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", help_text(mode));

    loop {
        tokio::select! {
            update = game.updates.recv() => {
                let Some(update) = update else { break };
                mode = update.snapshot.metrics.mode;
                let mut out = console.render(&update);
                if std::mem::take(&mut status_requested) {
                    out.push_str(&console.render_status(&update));
                    out.push('\n');
                }
                print!("{out}");
                std::io::stdout().flush()?;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    let _ = game.commands.send(LoopCommand::Shutdown).await;
                    break;
                };
                let command = match parse_line(&line, mode) {
                    Input::Command(command) => LoopCommand::Player(command),
                    Input::Status => {
                        status_requested = true;
                        LoopCommand::Status
                    }
                    Input::Help => {
                        println!("{}", help_text(mode));
                        continue;
                    }
                    Input::Unknown(hint) => {
                        println!("{hint}");
                        continue;
                    }
                    Input::Quit => {
                        let _ = game.commands.send(LoopCommand::Shutdown).await;
                        break;
                    }
                };
                if game.commands.send(command).await.is_err() {
                    break;
                }
            }
        }
    }

    drop(game.commands);
    game.handle
        .await
        .map_err(|e| AppError::GameLoop(e.to_string()))?;
    info!("session ended");
    Ok(())
}
