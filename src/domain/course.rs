//! Course - immutable race geography and weather reference data.

use serde::{Deserialize, Serialize};

/// One stretch of a course with uniform gradient and difficulty.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RaceSegment {
    /// Segment length in meters.
    pub distance: f32,
    /// Gradient in percent; negative is downhill.
    pub gradient: f32,
    /// Heuristic difficulty, 1-5.
    pub difficulty: u8,
    pub is_sprint: bool,
    pub is_climb: bool,
}

/// A full race course as an ordered list of segments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceCourse {
    pub id: String,
    pub name: String,
    /// Total distance in meters.
    pub total_distance: f32,
    pub segments: Vec<RaceSegment>,
    /// Sprint point markers, meters from start.
    #[serde(default)]
    pub sprints: Vec<f32>,
    /// Climb markers, meters from start.
    #[serde(default)]
    pub climbs: Vec<f32>,
}

// Fallback for a course with no segments; keeps the lookup total.
static NEUTRAL_SEGMENT: RaceSegment = RaceSegment {
    distance: 0.0,
    gradient: 0.0,
    difficulty: 1,
    is_sprint: false,
    is_climb: false,
};

impl RaceCourse {
    /// Returns the segment covering `distance` meters from the start.
    /// Distances past the course total clamp to the last segment.
    pub fn segment_at(&self, distance: f32) -> &RaceSegment {
        let mut covered = 0.0;
        for segment in &self.segments {
            if distance <= covered + segment.distance {
                return segment;
            }
            covered += segment.distance;
        }
        self.segments.last().unwrap_or(&NEUTRAL_SEGMENT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnowKind {
    Cold,
    Wet,
    Icy,
    Fresh,
}

/// Environmental snapshot applied uniformly for a whole race.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RaceConditions {
    pub temperature_c: f32,
    pub snow: SnowKind,
    pub wind_kph: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceType {
    Marathon,
    Hilly,
    Sprinty,
    Climb,
}

/// Calendar entry tying a course to a season week and prize purse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonRace {
    pub id: String,
    pub course_id: String,
    pub week: u32,
    pub race_type: RaceType,
    pub prize_money: i64,
}
