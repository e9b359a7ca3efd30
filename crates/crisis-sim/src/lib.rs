//! Crisis progression engine.
//!
//! Turns player directives and menu choices into metric changes, decides when
//! the game ends, and carries the story forward. Headless: the front-end talks
//! to [`CrisisEngine`] and renders its [`SessionSnapshot`] and intel feed.

pub mod engine;
pub mod error;
pub mod persistence;
pub mod review;
pub mod scenario;
pub mod snapshot;
pub mod source;
pub mod termination;

pub use crisis_core as core;
pub use engine::{CrisisEngine, EngineConfig, TurnReport};
pub use error::{EngineError, PersistenceError};
pub use review::Settled;
pub use snapshot::SessionSnapshot;
