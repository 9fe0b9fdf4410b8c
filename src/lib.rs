//! Ski team manager core.
//!
//! A deterministic, tick-based engine for a cross-country ski management
//! game: race simulation (grouping, drafting, gear, terrain), season
//! standings, weekly training and finances, and a transfer market. The
//! whole game lives in [`GameState`]; a UI layer drives it by dispatching
//! [`Action`]s and playing back the recorded race snapshots.

pub mod data;
pub mod domain;
pub mod error;
pub mod finance;
pub mod market;
pub mod race;
pub mod state;
pub mod training;

pub use error::GameError;
pub use state::{Action, ActiveRace, GameState};
