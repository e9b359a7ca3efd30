//! Simulation constants and tuning parameters.

// --- Metric bounds ---

/// Lowest value any metric can take.
pub const METRIC_MIN: u8 = 0;

/// Highest value any metric can take.
pub const METRIC_MAX: u8 = 100;

// --- Baseline scoreboard at game start ---

pub const BASELINE_STABILITY: u8 = 85;
pub const BASELINE_DIPLOMACY: u8 = 75;
pub const BASELINE_MILITARY: u8 = 70;
pub const BASELINE_SUPPORT: u8 = 80;
pub const BASELINE_ALLIES: u8 = 75;
pub const BASELINE_INTELLIGENCE: u8 = 65;

// --- DEFCON bands (lower bound of each band, on stability) ---

pub const DEFCON_3_FLOOR: u8 = 30;
pub const DEFCON_4_FLOOR: u8 = 50;
pub const DEFCON_5_FLOOR: u8 = 70;

// --- Termination thresholds ---

/// Stability or public support strictly below this forces resignation.
pub const DOMESTIC_COLLAPSE_BELOW: u8 = 20;

/// Allied confidence strictly below this collapses the alliance.
pub const ALLIANCE_COLLAPSE_BELOW: u8 = 20;

/// A high-intensity military order is catastrophic when stability is below this.
pub const CATASTROPHIC_STABILITY_BELOW: u8 = 30;

/// Action text substrings (lowercase) that mark an order as catastrophic.
pub const CATASTROPHIC_MARKERS: [&str; 2] = ["nuclear", "nuke"];

/// Victory requires stability strictly above this...
pub const VICTORY_STABILITY_ABOVE: u8 = 80;

/// ...allied confidence strictly above this...
pub const VICTORY_ALLIES_ABOVE: u8 = 70;

/// ...and at least this many completed turns.
pub const VICTORY_MIN_TURN: u32 = 3;

// --- Menu-driven play ---

/// The branch tree only advances into follow-up phases while the turn is below this.
pub const MENU_BRANCH_TURN_LIMIT: u32 = 5;

/// Stability below which menu intel is reported as critical.
pub const MENU_CRITICAL_STABILITY_BELOW: u8 = 40;

// --- Presentation ---

/// Directives longer than this are truncated in the processing echo.
pub const DIRECTIVE_ECHO_CHARS: usize = 60;

/// Risk texts containing any of these (lowercase) are flagged critical.
pub const CRITICAL_RISK_MARKERS: [&str; 3] = ["catastrophic", "war", "nuclear"];

/// Default map view identifier stored in save records.
pub const DEFAULT_MAP_VIEW: &str = "world";
