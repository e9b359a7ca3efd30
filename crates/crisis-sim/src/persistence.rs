//! Save record written at completed-turn boundaries.
//!
//! Only the scoreboard, scenario and presentation settings are stored. Order
//! sets and branch history are not, so a restore always lands on a clean turn
//! boundary.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crisis_core::constants::DEFAULT_MAP_VIEW;
use crisis_core::enums::{Metric, PlayMode};
use crisis_core::state::MetricState;

use crate::error::PersistenceError;

fn default_map_view() -> String {
    DEFAULT_MAP_VIEW.to_string()
}

/// Flat on-disk record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveRecord {
    pub turn: u32,
    pub stability: u8,
    pub diplomacy: u8,
    pub military: u8,
    pub support: u8,
    pub allies: u8,
    pub intelligence: u8,
    /// DEFCON level written for readers of the file; never read back.
    #[serde(default)]
    pub defcon: u8,
    pub scenario_id: String,
    pub game_over: bool,
    pub mode: PlayMode,
    #[serde(default = "default_map_view")]
    pub map_view: String,
}

impl SaveRecord {
    pub fn capture(metrics: &MetricState, scenario_id: &str, map_view: &str) -> Self {
        Self {
            turn: metrics.turn,
            stability: metrics.stability(),
            diplomacy: metrics.diplomacy(),
            military: metrics.military(),
            support: metrics.support(),
            allies: metrics.allies(),
            intelligence: metrics.intelligence(),
            defcon: metrics.defcon().level(),
            scenario_id: scenario_id.to_string(),
            game_over: metrics.game_over,
            mode: metrics.mode,
            map_view: map_view.to_string(),
        }
    }

    /// Rebuild the scoreboard. DEFCON is derived from stability again, never
    /// taken from the stored field.
    pub fn restore_metrics(&self) -> MetricState {
        let mut metrics = MetricState::baseline(self.mode);
        metrics.set(Metric::Stability, i64::from(self.stability));
        metrics.set(Metric::Diplomacy, i64::from(self.diplomacy));
        metrics.set(Metric::Military, i64::from(self.military));
        metrics.set(Metric::Support, i64::from(self.support));
        metrics.set(Metric::Allies, i64::from(self.allies));
        metrics.set(Metric::Intelligence, i64::from(self.intelligence));
        metrics.turn = self.turn;
        metrics.game_over = self.game_over;
        metrics
    }
}

/// A single save slot on disk.
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, record: &SaveRecord) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|source| self.io(source))?;
        }
        let json = serde_json::to_string_pretty(record).map_err(|source| self.format(source))?;
        fs::write(&self.path, json).map_err(|source| self.io(source))?;
        debug!(path = %self.path.display(), turn = record.turn, "game saved");
        Ok(())
    }

    /// Read the record, or `None` if no save exists.
    pub fn load(&self) -> Result<Option<SaveRecord>, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io(source)),
        };
        let record = serde_json::from_str(&json).map_err(|source| self.format(source))?;
        Ok(Some(record))
    }

    /// Remove the record. A missing file is not an error.
    pub fn clear(&self) -> Result<(), PersistenceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "save cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(self.io(source)),
        }
    }

    fn io(&self, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn format(&self, source: serde_json::Error) -> PersistenceError {
        PersistenceError::Format {
            path: self.path.clone(),
            source,
        }
    }
}
