//! Core types and definitions for the crisis simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the metric scoreboard, orders and menu options, commands, intel events,
//! and constants. It has no dependency on the oracle or any runtime.

pub mod commands;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
