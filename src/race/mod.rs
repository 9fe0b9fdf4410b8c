//! Race Engine
//!
//! Deterministic tick-based race simulation: per-tick grouping and lane
//! assignment, a pure per-athlete advance step, and the snapshot sequence
//! that drives playback and final standings.

pub mod advance;
pub mod engine;
pub mod gear;
pub mod grouping;
pub mod outcome;
pub mod prep;

pub use advance::{advance_athlete, RaceTuning};
pub use engine::{
    continue_race, simulate_race, snapshot_at, AthleteRuntime, RaceInput, RaceSnapshot,
    RaceStartState, SnapshotAthlete, MAX_TICKS, TICK_SECONDS,
};
pub use gear::{resolve_gear, GearModifiers};
pub use grouping::{compute_groups, GroupInfo, Grouping, GROUP_GAP, LANE_OFFSETS};
pub use outcome::{
    apply_race_effects, score_race, RaceMeta, RaceResultEntry, RaceResultSummary, Standings,
};
pub use prep::{Aggression, Pacing, RaceOrders, RacePrep, ResolvedPlan, Tactic};
