//! Race preparation - the player's pre-race configuration.
//!
//! All choices are closed enums; optional fields resolve to explicit
//! defaults exactly once at race start via [`ResolvedPlan`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Athlete, RaceConditions, Role};

/// Team-wide energy management for the race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pacing {
    Defensive,
    Steady,
    Aggressive,
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::Steady
    }
}

/// Overall race plan. Breakaway and Survive are the aggressive/defensive
/// poles; the other tactics shape effort through pacing alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tactic {
    ProtectLeader,
    SprintPoints,
    Breakaway,
    Survive,
}

impl Default for Tactic {
    fn default() -> Self {
        Tactic::ProtectLeader
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Aggression {
    Low,
    Normal,
    High,
}

impl Default for Aggression {
    fn default() -> Self {
        Aggression::Normal
    }
}

/// Fine-grained in-race orders layered on top of role bonuses.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RaceOrders {
    pub protect_leader: bool,
    pub chase_breaks: bool,
    pub sprint_focus: bool,
    pub climb_focus: bool,
    pub aggression: Aggression,
}

/// Pre-race configuration chosen by the player. Created once per race,
/// consumed at race start, then archived into the result metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RacePrep {
    pub race_id: String,
    pub lineup: Vec<String>,
    pub ski_choice: Option<String>,
    pub wax_choice: Option<String>,
    pub pacing: Pacing,
    /// Per-athlete role overrides; athletes keep their own role otherwise.
    pub roles: BTreeMap<String, Role>,
    pub tactic: Option<Tactic>,
    pub orders: Option<RaceOrders>,
    pub conditions: Option<RaceConditions>,
}

/// Prep with every optional field resolved, built once at race start so the
/// tick loop never re-derives defaults.
#[derive(Debug, Clone, Default)]
pub struct ResolvedPlan {
    pub tactic: Tactic,
    pub pacing: Pacing,
    pub orders: RaceOrders,
    pub roles: BTreeMap<String, Role>,
}

impl ResolvedPlan {
    pub fn from_prep(prep: Option<&RacePrep>) -> Self {
        match prep {
            Some(prep) => Self {
                tactic: prep.tactic.unwrap_or_default(),
                pacing: prep.pacing,
                orders: prep.orders.unwrap_or_default(),
                roles: prep.roles.clone(),
            },
            None => Self::default(),
        }
    }

    /// Role the athlete races with: prep override, else their own role.
    pub fn role_of(&self, athlete: &Athlete) -> Role {
        self.roles.get(&athlete.id).copied().unwrap_or(athlete.role)
    }
}
