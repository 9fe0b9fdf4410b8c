//! Staff, facilities and sponsors - support structures consumed by the
//! training and finance engines.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffRole {
    Coach,
    Wax,
    Physio,
    Scout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StaffFocus {
    Endurance,
    Climb,
    Sprint,
    Technique,
    Recovery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: String,
    pub name: String,
    pub role: StaffRole,
    /// Effectiveness 0-100.
    pub skill: f32,
    pub salary: i64,
    #[serde(default)]
    pub focus: Option<StaffFocus>,
}

/// Facility upgrade levels. Centers run 1-5; `altitude_access` starts at 0
/// and stays there until the camp is unlocked (the bonus math treats 0 as
/// level 1).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FacilityLevels {
    pub training_center: u8,
    pub recovery_center: u8,
    pub altitude_access: u8,
}

impl Default for FacilityLevels {
    fn default() -> Self {
        Self {
            training_center: 1,
            recovery_center: 1,
            altitude_access: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SponsorTier {
    Main,
    Co,
    Equipment,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sponsor {
    pub id: String,
    pub name: String,
    pub tier: SponsorTier,
    pub weekly_income: i64,
}
