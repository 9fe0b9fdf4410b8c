//! Athlete - identity, base stats, and mutable season state.
//!
//! Stats live on a 0-100 scale. The mutable state block (form, fatigue,
//! morale, health) is adjusted weekly and after every race; every setter
//! clamps back into the documented range.

use serde::{Deserialize, Serialize};

/// Stat scale used across the game (0-100).
pub type StatValue = f32;

/// Squad role an athlete fills during a race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Captain,
    Domestique,
    Sprinter,
    Climber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Default for Gender {
    fn default() -> Self {
        Gender::Male
    }
}

/// Health status gating race participation and training effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Health {
    Ok,
    Sick,
    Injured,
}

/// Six base stats, each 0-100.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AthleteStats {
    pub endurance: StatValue,
    pub climbing: StatValue,
    pub flat: StatValue,
    pub sprint: StatValue,
    pub technique: StatValue,
    pub race_iq: StatValue,
}

/// Short-term condition: form is a -20..+20 boost/penalty, fatigue and
/// morale run 0..100.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AthleteState {
    pub form: f32,
    pub fatigue: f32,
    pub morale: f32,
    pub health: Health,
}

impl Default for AthleteState {
    fn default() -> Self {
        Self {
            form: 0.0,
            fatigue: 20.0,
            morale: 70.0,
            health: Health::Ok,
        }
    }
}

impl AthleteState {
    pub fn add_form(&mut self, delta: f32) {
        self.form = (self.form + delta).clamp(-20.0, 20.0);
    }

    pub fn add_fatigue(&mut self, delta: f32) {
        self.fatigue = (self.fatigue + delta).clamp(0.0, 100.0);
    }

    pub fn add_morale(&mut self, delta: f32) {
        self.morale = (self.morale + delta).clamp(0.0, 100.0);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Contract {
    pub salary_per_week: i64,
    pub weeks_remaining: u32,
}

/// A rostered (or free-agent) skier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Athlete {
    pub id: String,
    pub name: String,
    pub age: u8,
    /// Soft ceiling on long-term stat growth.
    pub potential: StatValue,
    pub role: Role,
    #[serde(default)]
    pub gender: Gender,
    pub stats: AthleteStats,
    pub state: AthleteState,
    pub contract: Contract,
    pub team_id: String,
}

impl Athlete {
    /// Weighted blend of base stats used for roster building and lineup
    /// auto-selection.
    pub fn overall_score(&self) -> f32 {
        let s = &self.stats;
        s.endurance * 0.35
            + s.climbing * 0.25
            + s.flat * 0.15
            + s.sprint * 0.1
            + s.technique * 0.1
            + s.race_iq * 0.05
    }
}
