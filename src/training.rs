//! Weekly training - session plans, staff/facility bonuses, stat growth.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{Athlete, FacilityLevels, StaffMember, StaffRole};

/// Effort level of one training session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingIntensity {
    Easy,
    Medium,
    Hard,
    Rest,
}

/// Which stat a (non-rest) session develops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingFocus {
    Endurance,
    Climb,
    Speed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TrainingSession {
    pub intensity: TrainingIntensity,
    pub focus: TrainingFocus,
}

/// One athlete's sessions for the coming week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyTrainingPlan {
    pub athlete_id: String,
    pub sessions: Vec<TrainingSession>,
}

/// Head coach quality plus the training center level.
pub fn coach_bonus(staff: &[StaffMember], facilities: &FacilityLevels) -> f32 {
    let base = staff
        .iter()
        .find(|s| s.role == StaffRole::Coach)
        .map_or(1.0, |coach| 1.0 + coach.skill / 200.0);
    base + facilities.training_center.max(1) as f32 * 0.05
}

/// Physio quality plus the recovery center level.
pub fn recovery_bonus(staff: &[StaffMember], facilities: &FacilityLevels) -> f32 {
    let base = staff
        .iter()
        .find(|s| s.role == StaffRole::Physio)
        .map_or(1.0, |physio| 1.0 + physio.skill / 300.0);
    base + facilities.recovery_center.max(1) as f32 * 0.05
}

/// Applies every athlete's plan for the week. Athletes without a plan are
/// untouched; stat gains cap at the athlete's potential.
pub fn apply_weekly_training(
    athletes: &mut BTreeMap<String, Athlete>,
    plans: &[WeeklyTrainingPlan],
    staff: &[StaffMember],
    facilities: &FacilityLevels,
) {
    let coach = coach_bonus(staff, facilities);
    let recovery = recovery_bonus(staff, facilities);

    for plan in plans {
        let Some(athlete) = athletes.get_mut(&plan.athlete_id) else {
            continue;
        };
        apply_plan(athlete, plan, coach, recovery);
    }
}

fn apply_plan(athlete: &mut Athlete, plan: &WeeklyTrainingPlan, coach: f32, recovery: f32) {
    let mut fatigue_gain = 0.0;
    let mut form_delta = 0.0;
    let mut endurance_gain = 0.0;
    let mut climbing_gain = 0.0;
    let mut sprint_gain = 0.0;

    for session in &plan.sessions {
        match session.intensity {
            TrainingIntensity::Easy => {
                fatigue_gain += 3.0;
                form_delta += 1.0;
            }
            TrainingIntensity::Medium => fatigue_gain += 6.0,
            TrainingIntensity::Hard => {
                fatigue_gain += 10.0;
                form_delta -= 2.0;
            }
            TrainingIntensity::Rest => {
                fatigue_gain -= 8.0 * recovery;
                form_delta += 2.0;
            }
        }

        if session.intensity != TrainingIntensity::Rest {
            match session.focus {
                TrainingFocus::Endurance => endurance_gain += 0.2 * coach,
                TrainingFocus::Climb => climbing_gain += 0.2 * coach,
                TrainingFocus::Speed => sprint_gain += 0.2 * coach,
            }
        }
    }

    athlete.state.add_fatigue(fatigue_gain);
    athlete.state.add_form(form_delta);

    let potential = athlete.potential;
    let stats = &mut athlete.stats;
    stats.endurance = (stats.endurance + endurance_gain).clamp(0.0, potential);
    stats.climbing = (stats.climbing + climbing_gain).clamp(0.0, potential);
    stats.sprint = (stats.sprint + sprint_gain).clamp(0.0, potential);
}
