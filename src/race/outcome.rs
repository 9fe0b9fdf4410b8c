//! Race outcome - classification, season standings and post-race effects.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Athlete, Health, RaceConditions};
use crate::race::engine::RaceSnapshot;
use crate::race::prep::{Pacing, Tactic};

/// World-cup style points by placement; placements past the table still
/// score the 1-point floor, so every finisher is on the board.
const POINTS_TABLE: [u32; 10] = [25, 18, 15, 12, 10, 8, 6, 4, 2, 1];

/// One line of the final classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResultEntry {
    pub athlete_id: String,
    pub team_id: String,
    /// Finish time in seconds, estimated from the gap to the leader.
    pub time_seconds: f32,
    pub points: u32,
}

/// The prep choices a result was raced under, archived with it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RaceMeta {
    pub lineup: Vec<String>,
    pub pacing: Pacing,
    pub tactic: Option<Tactic>,
    pub ski_choice: Option<String>,
    pub wax_choice: Option<String>,
    pub conditions: Option<RaceConditions>,
}

/// A finished race: classification plus the meta it was raced under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceResultSummary {
    pub race_id: String,
    pub results: Vec<RaceResultEntry>,
    pub meta: RaceMeta,
}

/// Classifies the field from the final snapshot. Order is descending
/// distance with ties broken by ascending athlete id; finish times are
/// projected from each athlete's gap at the leader's average speed.
/// Athletes missing from the roster map score under an empty team id.
pub fn score_race(
    final_snapshot: &RaceSnapshot,
    athletes: &BTreeMap<String, Athlete>,
) -> Vec<RaceResultEntry> {
    let mut ordered: Vec<_> = final_snapshot.athletes.iter().collect();
    ordered.sort_by(|a, b| {
        b.distance
            .partial_cmp(&a.distance)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let leader_time = final_snapshot.t;
    let leader_speed = match ordered.first() {
        Some(leader) if leader.distance > 0.0 && leader_time > 0.0 => {
            leader.distance / leader_time
        }
        _ => 1.0,
    };
    let leader_distance = ordered.first().map_or(0.0, |l| l.distance);

    ordered
        .iter()
        .enumerate()
        .map(|(place, snap)| {
            let gap = (leader_distance - snap.distance) / leader_speed.max(0.1);
            RaceResultEntry {
                athlete_id: snap.id.clone(),
                team_id: athletes
                    .get(&snap.id)
                    .map(|a| a.team_id.clone())
                    .unwrap_or_default(),
                time_seconds: leader_time + gap,
                points: POINTS_TABLE.get(place).copied().unwrap_or(1),
            }
        })
        .collect()
}

/// Season-long points tallies. BTreeMaps keep iteration order stable for
/// serialization and display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Standings {
    pub athletes: BTreeMap<String, u32>,
    pub teams: BTreeMap<String, u32>,
}

impl Standings {
    /// Folds one race classification into the tallies.
    pub fn record(&mut self, results: &[RaceResultEntry]) {
        for entry in results {
            *self.athletes.entry(entry.athlete_id.clone()).or_default() += entry.points;
            if !entry.team_id.is_empty() {
                *self.teams.entry(entry.team_id.clone()).or_default() += entry.points;
            }
        }
    }
}

/// Applies post-race fatigue and morale to the raced lineup. Morale tracks
/// placement; fatigue cost follows the pacing the race was ridden at, and
/// an athlete pushed past 96 fatigue falls sick.
pub fn apply_race_effects(
    athletes: &mut BTreeMap<String, Athlete>,
    lineup: &[String],
    results: &[RaceResultEntry],
    pacing: Pacing,
) {
    let placements: BTreeMap<&str, usize> = results
        .iter()
        .enumerate()
        .map(|(place, r)| (r.athlete_id.as_str(), place))
        .collect();
    let pacing_fatigue = match pacing {
        Pacing::Aggressive => 8.0,
        Pacing::Defensive => 3.0,
        Pacing::Steady => 6.0,
    };

    for id in lineup {
        let Some(athlete) = athletes.get_mut(id) else {
            continue;
        };
        let morale_delta = match placements.get(id.as_str()) {
            None => -2.0,
            Some(&place) if place < 3 => 6.0,
            Some(&place) if place < 10 => 3.0,
            Some(&place) if place < 20 => 1.0,
            Some(_) => -1.0,
        };
        athlete.state.add_fatigue(10.0 + pacing_fatigue);
        athlete.state.add_morale(morale_delta);
        if athlete.state.fatigue > 96.0 {
            athlete.state.health = Health::Sick;
        }
    }
}
