//! Domain Model
//!
//! Reference data (courses, equipment, season calendar) and the athlete/team
//! records the engines operate on. Mutable athlete state is always clamped
//! at the point of mutation.

pub mod athlete;
pub mod course;
pub mod equipment;
pub mod staff;
pub mod team;

pub use athlete::{Athlete, AthleteState, AthleteStats, Contract, Gender, Health, Role};
pub use course::{RaceConditions, RaceCourse, RaceSegment, RaceType, SeasonRace, SnowKind};
pub use equipment::{EquipmentInventory, EquipmentItem, EquipmentKind};
pub use staff::{FacilityLevels, Sponsor, SponsorTier, StaffFocus, StaffMember, StaffRole};
pub use team::{build_team_from_budget, Team};
