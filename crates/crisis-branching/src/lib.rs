//! Phase branch tree for menu-driven play.
//!
//! A fixed directed graph of named phases. Each phase offers literal options
//! with effects and a next-phase pointer; a small pool of consequence lines
//! per phase narrates the immediate aftermath of a choice.

pub mod catalog;
pub mod fsm;

pub use crisis_core as core;

#[cfg(test)]
mod tests;
