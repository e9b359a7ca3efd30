//! Metric state: the strategic scoreboard and the only place it is mutated.

use serde::Serialize;

use crate::constants::*;
use crate::enums::{Defcon, Metric, PlayMode};
use crate::types::Effects;

/// The six bounded metrics plus turn, mode and game-over flag.
///
/// Metrics are private so every write goes through [`MetricState::apply_effects`]
/// (or [`MetricState::set`]), which clamp to `[0, 100]`. DEFCON is never
/// stored; [`MetricState::defcon`] derives it from stability on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricState {
    stability: u8,
    diplomacy: u8,
    military: u8,
    support: u8,
    allies: u8,
    intelligence: u8,
    /// Completed turns.
    pub turn: u32,
    pub game_over: bool,
    pub mode: PlayMode,
}

impl Default for MetricState {
    fn default() -> Self {
        Self::baseline(PlayMode::default())
    }
}

impl MetricState {
    /// Fresh scoreboard at game start.
    pub fn baseline(mode: PlayMode) -> Self {
        Self {
            stability: BASELINE_STABILITY,
            diplomacy: BASELINE_DIPLOMACY,
            military: BASELINE_MILITARY,
            support: BASELINE_SUPPORT,
            allies: BASELINE_ALLIES,
            intelligence: BASELINE_INTELLIGENCE,
            turn: 0,
            game_over: false,
            mode,
        }
    }

    pub fn get(&self, metric: Metric) -> u8 {
        match metric {
            Metric::Stability => self.stability,
            Metric::Diplomacy => self.diplomacy,
            Metric::Military => self.military,
            Metric::Support => self.support,
            Metric::Allies => self.allies,
            Metric::Intelligence => self.intelligence,
        }
    }

    /// Overwrite one metric, clamping to the valid range.
    pub fn set(&mut self, metric: Metric, value: i64) {
        let clamped = clamp_metric(value);
        match metric {
            Metric::Stability => self.stability = clamped,
            Metric::Diplomacy => self.diplomacy = clamped,
            Metric::Military => self.military = clamped,
            Metric::Support => self.support = clamped,
            Metric::Allies => self.allies = clamped,
            Metric::Intelligence => self.intelligence = clamped,
        }
    }

    /// Add each delta to its metric and clamp. Metrics absent from the map are
    /// untouched. Every call is a distinct event; nothing is deduplicated.
    pub fn apply_effects(&mut self, effects: &Effects) {
        for (&metric, &delta) in effects {
            let current = i64::from(self.get(metric));
            self.set(metric, current.saturating_add(delta));
        }
    }

    pub fn defcon(&self) -> Defcon {
        Defcon::from_stability(self.stability)
    }

    pub fn stability(&self) -> u8 {
        self.stability
    }

    pub fn diplomacy(&self) -> u8 {
        self.diplomacy
    }

    pub fn military(&self) -> u8 {
        self.military
    }

    pub fn support(&self) -> u8 {
        self.support
    }

    pub fn allies(&self) -> u8 {
        self.allies
    }

    pub fn intelligence(&self) -> u8 {
        self.intelligence
    }

    /// `(metric, value)` pairs in scoreboard order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, u8)> + '_ {
        Metric::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

fn clamp_metric(value: i64) -> u8 {
    // Clamped into 0..=100 first, so the narrowing cast is lossless.
    value.clamp(i64::from(METRIC_MIN), i64::from(METRIC_MAX)) as u8
}
