//! Race simulator - orchestrates ticks and emits the snapshot sequence.
//!
//! One call runs a whole race to completion (or the safety cap) and
//! materializes every snapshot in memory; playback reads the immutable
//! sequence afterwards and never touches simulation state.

use serde::{Deserialize, Serialize};

use crate::domain::{Athlete, EquipmentInventory, RaceConditions, RaceCourse};
use crate::race::advance::{advance_athlete, RaceTuning};
use crate::race::gear::resolve_gear;
use crate::race::grouping::{compute_groups, Grouping, LANE_OFFSETS};
use crate::race::prep::{RacePrep, ResolvedPlan};

/// Simulated seconds per tick.
pub const TICK_SECONDS: f32 = 2.0;

/// Hard cap on ticks per race; a backstop against degenerate inputs, not a
/// normal exit path. Sized so even a 90 km marathon crawled at the
/// floor speed of 1.2 m/s (37,500 ticks) finishes well inside it.
pub const MAX_TICKS: u32 = 45_000;

/// Everything a race needs, borrowed from the game state.
#[derive(Debug, Clone)]
pub struct RaceInput<'a> {
    pub course: &'a RaceCourse,
    pub athletes: Vec<&'a Athlete>,
    pub prep: Option<&'a RacePrep>,
    pub conditions: Option<RaceConditions>,
    pub equipment: Option<&'a EquipmentInventory>,
    pub tuning: RaceTuning,
}

/// Mid-race seed for resuming a simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceStartState {
    pub id: String,
    pub distance: f32,
    pub energy: f32,
    pub lane_offset: f32,
}

/// Per-athlete mutable tick state. Exists only for the duration of one
/// simulation call; never persisted.
#[derive(Debug, Clone)]
pub struct AthleteRuntime<'a> {
    pub athlete: &'a Athlete,
    pub distance: f32,
    pub energy: f32,
    pub lane_offset: f32,
    pub effort: f32,
}

impl AthleteRuntime<'_> {
    pub fn id(&self) -> &str {
        &self.athlete.id
    }
}

/// One athlete's slice of a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotAthlete {
    pub id: String,
    pub distance: f32,
    pub lane_offset: f32,
    pub energy: f32,
    pub effort: f32,
    pub group_id: u32,
}

/// The full positional/energy state of the field at one simulated instant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceSnapshot {
    /// Seconds from the gun.
    pub t: f32,
    pub athletes: Vec<SnapshotAthlete>,
}

/// Simulates a race from the start line. Snapshots come out in strictly
/// increasing time order; the first is the t=0 grid and the last has every
/// athlete at (or past) the course total, barring the safety cap.
pub fn simulate_race(input: &RaceInput) -> Vec<RaceSnapshot> {
    run_race(input, None, 0.0)
}

/// Resumes a race from a mid-race state instead of the start line.
/// Athletes missing from `start` line up fresh at distance zero.
pub fn continue_race(
    input: &RaceInput,
    start: &[RaceStartState],
    start_time: f32,
) -> Vec<RaceSnapshot> {
    run_race(input, Some(start), start_time)
}

fn run_race(
    input: &RaceInput,
    start: Option<&[RaceStartState]>,
    start_time: f32,
) -> Vec<RaceSnapshot> {
    let plan = ResolvedPlan::from_prep(input.prep);
    let gear = resolve_gear(
        input.equipment,
        input.prep.and_then(|p| p.ski_choice.as_deref()),
        input.prep.and_then(|p| p.wax_choice.as_deref()),
    );
    let total_distance = input.course.total_distance;

    let mut runtimes: Vec<AthleteRuntime> = input
        .athletes
        .iter()
        .enumerate()
        .map(|(idx, athlete)| {
            let seed = start.and_then(|states| states.iter().find(|s| s.id == athlete.id));
            match seed {
                Some(s) => AthleteRuntime {
                    athlete,
                    distance: s.distance,
                    energy: s.energy,
                    lane_offset: s.lane_offset,
                    effort: 1.0,
                },
                None => AthleteRuntime {
                    athlete,
                    distance: 0.0,
                    energy: 100.0,
                    lane_offset: LANE_OFFSETS[idx % LANE_OFFSETS.len()],
                    effort: 1.0,
                },
            }
        })
        .collect();

    let mut snapshots = Vec::new();
    let mut t = start_time;
    let mut ticks = 0u32;

    loop {
        let groups = compute_groups(&runtimes);
        for (idx, rt) in runtimes.iter_mut().enumerate() {
            rt.lane_offset = groups.lanes[idx];
        }
        snapshots.push(make_snapshot(t, &runtimes, &groups));

        let finished = runtimes.iter().all(|rt| rt.distance >= total_distance);
        if finished {
            break;
        }
        if ticks >= MAX_TICKS {
            log::warn!(
                "race {} hit the {}-tick safety cap before all athletes finished",
                input.course.id,
                MAX_TICKS
            );
            break;
        }

        for (idx, rt) in runtimes.iter_mut().enumerate() {
            advance_athlete(
                rt,
                idx,
                TICK_SECONDS,
                input.course,
                total_distance,
                &plan,
                gear,
                input.conditions.as_ref(),
                &groups,
                &input.tuning,
            );
        }
        t += TICK_SECONDS;
        ticks += 1;
    }

    log::debug!(
        "race {} simulated: {} athletes, {} snapshots",
        input.course.id,
        runtimes.len(),
        snapshots.len()
    );
    snapshots
}

fn make_snapshot(t: f32, runtimes: &[AthleteRuntime], groups: &Grouping) -> RaceSnapshot {
    RaceSnapshot {
        t,
        athletes: runtimes
            .iter()
            .enumerate()
            .map(|(idx, rt)| SnapshotAthlete {
                id: rt.athlete.id.clone(),
                distance: rt.distance,
                lane_offset: rt.lane_offset,
                energy: rt.energy,
                effort: rt.effort,
                group_id: groups.group_of[idx],
            })
            .collect(),
    }
}

/// Latest snapshot at or before simulated time `t`, by binary search.
/// Times before the first snapshot clamp to the first.
pub fn snapshot_at(snapshots: &[RaceSnapshot], t: f32) -> Option<&RaceSnapshot> {
    if snapshots.is_empty() {
        return None;
    }
    let after = snapshots.partition_point(|s| s.t <= t);
    Some(&snapshots[after.saturating_sub(1)])
}
