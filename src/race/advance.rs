//! Athlete advancer - the per-tick physics/tactics step.
//!
//! A pure step function: one runner's distance and energy move forward by
//! `dt` simulated seconds given terrain, tactics, gear, conditions and the
//! tick's grouping context. All guards are floors/clamps, never errors.

use serde::{Deserialize, Serialize};

use crate::domain::{RaceConditions, RaceCourse, Role, SnowKind};
use crate::race::engine::AthleteRuntime;
use crate::race::gear::GearModifiers;
use crate::race::grouping::Grouping;
use crate::race::prep::{Aggression, Pacing, ResolvedPlan, Tactic};

/// Floor velocity (m/s); runners never fully stall.
const FLOOR_SPEED: f32 = 1.2;
/// Scales the dimensionless power term into m/s.
const SPEED_SCALE: f32 = 9.0;
/// Minimum distance a runner keeps behind a same-lane runner ahead.
const MIN_GAP: f32 = 0.8;
/// Forward progress still allowed when fully blocked in lane.
const BLOCKED_CREEP: f32 = 0.5;
/// Base energy drain per simulated second at difficulty 1.
const BASE_ENERGY_COST: f32 = 0.08;

/// Balance knobs exposed instead of baked-in constants. Defaults preserve
/// the shipped game balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RaceTuning {
    /// Power multiplier applied to female athletes.
    pub female_power_mult: f32,
}

impl Default for RaceTuning {
    fn default() -> Self {
        Self {
            female_power_mult: 0.9,
        }
    }
}

/// Advances one runner by `dt` seconds. Identity and lane reassignment stay
/// with the grouping engine; this only moves distance/energy and records the
/// effort multiplier for the snapshot.
pub fn advance_athlete(
    rt: &mut AthleteRuntime,
    idx: usize,
    dt: f32,
    course: &RaceCourse,
    total_distance: f32,
    plan: &ResolvedPlan,
    gear: GearModifiers,
    conditions: Option<&RaceConditions>,
    groups: &Grouping,
    tuning: &RaceTuning,
) {
    let stats = &rt.athlete.stats;
    let state = &rt.athlete.state;
    let segment = course.segment_at(rt.distance);
    let role = plan.role_of(rt.athlete);

    let terrain_factor = if segment.gradient > 2.0 {
        stats.climbing
    } else if segment.gradient < -2.0 {
        stats.technique
    } else {
        stats.flat
    };

    let mut power = (stats.endurance * 0.5 + terrain_factor * 0.4 + state.form * 0.2
        - state.fatigue * 0.3
        + state.morale * 0.1)
        / 100.0;

    if rt.athlete.gender == crate::domain::Gender::Female {
        power *= tuning.female_power_mult;
    }

    // Drafting: the group leader breaks the wind, followers save energy.
    let group = groups.info_of(idx);
    let is_leader = groups.is_leader(idx);
    power *= if is_leader { 0.98 } else { 1.06 };

    let tactic_mult = match plan.tactic {
        Tactic::Breakaway => 1.15,
        Tactic::Survive => 0.9,
        Tactic::ProtectLeader | Tactic::SprintPoints => 1.0,
    };
    let pacing_mult = match plan.pacing {
        Pacing::Aggressive => 1.08,
        Pacing::Defensive => 0.94,
        Pacing::Steady => 1.0,
    };
    power *= tactic_mult * pacing_mult;
    rt.effort = tactic_mult * pacing_mult;

    match role {
        Role::Captain => power *= 1.04,
        Role::Sprinter if segment.is_sprint => power *= 1.08,
        Role::Climber if segment.is_climb => power *= 1.08,
        Role::Domestique if group.size > 1 && !is_leader => power *= 1.03,
        _ => {}
    }

    let orders = &plan.orders;
    if orders.protect_leader && role == Role::Domestique && group.size > 1 {
        power *= 1.02;
    }
    if orders.sprint_focus && segment.is_sprint && role == Role::Sprinter {
        power *= 1.05;
    }
    if orders.climb_focus && segment.is_climb && role == Role::Climber {
        power *= 1.05;
    }
    match orders.aggression {
        Aggression::Low => power *= 0.97,
        Aggression::High => power *= 1.03,
        Aggression::Normal => {}
    }

    power *= gear.glide_mod;
    let energy_penalty = gear.grip_mod;

    if let Some(conditions) = conditions {
        match conditions.snow {
            SnowKind::Cold => power *= 0.98,
            SnowKind::Icy => power *= 0.99,
            SnowKind::Fresh => power *= 0.97,
            SnowKind::Wet => {}
        }
        if conditions.wind_kph > 10.0 {
            power *= 0.99;
        }
    }

    // Sub-linear falloff: low energy hurts but never zeroes speed.
    power *= (rt.energy / 100.0).max(0.0).powf(0.7);

    let speed = (power * SPEED_SCALE).max(FLOOR_SPEED);

    let energy_cost = dt
        * BASE_ENERGY_COST
        * segment.difficulty as f32
        * (1.0 + segment.gradient.max(0.0) / 10.0)
        * match plan.pacing {
            Pacing::Aggressive => 1.2,
            Pacing::Defensive => 0.85,
            Pacing::Steady => 1.0,
        }
        * if is_leader { 1.08 } else { 0.9 };

    let mut distance = (rt.distance + speed * dt).min(total_distance);
    if let Some(ahead) = groups.lane_ahead[idx] {
        // Same-lane blocking: never close within MIN_GAP of the runner
        // ahead, but always creep forward a little.
        let limit = (ahead - MIN_GAP).max(rt.distance + BLOCKED_CREEP);
        if distance > limit {
            distance = limit;
        }
    }

    rt.distance = distance;
    rt.energy = (rt.energy - energy_cost - energy_penalty).clamp(0.0, 100.0);
}
