//! Game data provider - the seam between the engine and its content.
//!
//! Everything a new game needs comes through [`GameDataGateway`], so
//! alternate content packs (or test fixtures) plug in without touching the
//! state machine. [`SeedGateway`] ships the default season.

use rand::{Rng, RngCore};
use std::collections::BTreeMap;

use crate::domain::{
    Athlete, AthleteState, AthleteStats, Contract, EquipmentInventory, EquipmentItem,
    EquipmentKind, FacilityLevels, Gender, RaceConditions, RaceCourse, RaceSegment, RaceType,
    Role, SeasonRace, SnowKind, Sponsor, SponsorTier, StaffFocus, StaffMember, StaffRole, Team,
};
use crate::finance::FinanceState;

/// Teams and athletes seeded together so roster membership stays in sync.
#[derive(Debug, Clone, Default)]
pub struct RosterSeed {
    pub teams: BTreeMap<String, Team>,
    pub athletes: BTreeMap<String, Athlete>,
}

/// Source of all initial game content.
pub trait GameDataGateway {
    fn race_courses(&self) -> BTreeMap<String, RaceCourse>;
    fn race_conditions(&self) -> BTreeMap<String, RaceConditions>;
    fn season_races(&self) -> Vec<SeasonRace>;
    fn equipment(&self) -> EquipmentInventory;
    fn staff(&self) -> Vec<StaffMember>;
    fn facilities(&self) -> FacilityLevels;
    fn sponsors(&self) -> Vec<Sponsor>;
    fn finance_template(&self) -> FinanceState;
    /// Generated content draws from the caller's rng so runs are
    /// reproducible under a seeded source.
    fn roster(&self, rng: &mut dyn RngCore) -> RosterSeed;
}

/// The default content pack: six classic long-distance courses, a
/// twelve-team world and the stock staff/sponsor/equipment sets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedGateway;

const TEAM_NAMES: [&str; 12] = [
    "Nordlys Ski Team",
    "Team Fjellvind",
    "Vasa Racing",
    "Alpin Progress",
    "Team Snøfall",
    "Lumi Ski Club",
    "Team Granlund",
    "Polar Edge",
    "Team Vinterled",
    "Skarva Racing",
    "Team Isbre",
    "Dalarna Ski Lag",
];

const FIRST_NAMES: [&str; 16] = [
    "Emil", "Johan", "Petter", "Anders", "Simen", "Oskar", "Mikael", "Kalle", "Ida", "Emilie",
    "Astrid", "Sanna", "Jenny", "Marit", "Silje", "Tuva",
];

const LAST_NAMES: [&str; 16] = [
    "Berg", "Holm", "Dahl", "Iversen", "Nyström", "Eklund", "Svensson", "Moen", "Lindqvist",
    "Aukland", "Persson", "Fleten", "Gjerde", "Korsgren", "Theodorsen", "Larsson",
];

// The first eight first names are male, the rest female.
const MALE_FIRST_NAMES: usize = 8;

impl GameDataGateway for SeedGateway {
    fn race_courses(&self) -> BTreeMap<String, RaceCourse> {
        let courses = [
            course(
                "vasaloppet",
                "Vasaloppet",
                &[
                    (20_000.0, 2.0, 2, false, false),
                    (25_000.0, 4.0, 4, false, true),
                    (30_000.0, 1.0, 2, true, false),
                    (15_000.0, -2.0, 1, false, false),
                ],
                &[30_000.0],
                &[25_000.0],
            ),
            course(
                "marcialonga",
                "Marcialonga",
                &[
                    (15_000.0, 1.0, 2, false, false),
                    (20_000.0, 3.0, 3, false, true),
                    (20_000.0, -1.0, 2, true, false),
                    (15_000.0, 5.0, 4, false, true),
                ],
                &[35_000.0],
                &[20_000.0, 55_000.0],
            ),
            course(
                "jizerska",
                "Jizerská 50",
                &[
                    (15_000.0, 2.0, 3, false, true),
                    (20_000.0, 1.0, 2, true, false),
                    (15_000.0, -1.0, 1, false, false),
                ],
                &[25_000.0],
                &[10_000.0],
            ),
            course(
                "birken",
                "Birkebeinerrennet",
                &[
                    (18_000.0, 3.0, 3, false, true),
                    (18_000.0, 0.0, 2, true, false),
                    (18_000.0, -2.0, 2, false, false),
                ],
                &[30_000.0],
                &[15_000.0],
            ),
            course(
                "reistad",
                "Reistadløpet",
                &[
                    (12_000.0, 5.0, 4, false, true),
                    (20_000.0, 1.0, 2, true, false),
                    (18_000.0, -3.0, 3, false, false),
                ],
                &[22_000.0],
                &[8_000.0],
            ),
            course(
                "are",
                "Årefjällsloppet",
                &[
                    (20_000.0, 2.0, 3, false, true),
                    (25_000.0, 0.0, 2, true, false),
                    (20_000.0, -1.0, 2, false, false),
                ],
                &[30_000.0],
                &[15_000.0],
            ),
        ];
        courses.into_iter().map(|c| (c.id.clone(), c)).collect()
    }

    fn race_conditions(&self) -> BTreeMap<String, RaceConditions> {
        [
            ("vasaloppet", -8.0, SnowKind::Cold, 5.0),
            ("marcialonga", -2.0, SnowKind::Fresh, 8.0),
            ("jizerska", -5.0, SnowKind::Cold, 6.0),
            ("birken", -4.0, SnowKind::Fresh, 10.0),
            ("reistad", -6.0, SnowKind::Icy, 12.0),
            ("are", -3.0, SnowKind::Fresh, 7.0),
        ]
        .into_iter()
        .map(|(id, temperature_c, snow, wind_kph)| {
            (
                id.to_string(),
                RaceConditions {
                    temperature_c,
                    snow,
                    wind_kph,
                },
            )
        })
        .collect()
    }

    fn season_races(&self) -> Vec<SeasonRace> {
        [
            ("race-1", "marcialonga", 3, RaceType::Hilly, 40_000),
            ("race-2", "jizerska", 4, RaceType::Hilly, 30_000),
            ("race-3", "vasaloppet", 5, RaceType::Marathon, 50_000),
            ("race-4", "birken", 7, RaceType::Hilly, 35_000),
            ("race-5", "reistad", 9, RaceType::Climb, 35_000),
            ("race-6", "are", 11, RaceType::Marathon, 45_000),
        ]
        .into_iter()
        .map(|(id, course_id, week, race_type, prize_money)| SeasonRace {
            id: id.into(),
            course_id: course_id.into(),
            week,
            race_type,
            prize_money,
        })
        .collect()
    }

    fn equipment(&self) -> EquipmentInventory {
        let items = [
            ("ski-1", "SnowTech Glide", EquipmentKind::Ski, 60.0, 80.0, 1_200, 8),
            ("ski-2", "Nordic GripPro", EquipmentKind::Ski, 80.0, 65.0, 1_000, 6),
            ("ski-3", "Feather Carbon", EquipmentKind::Ski, 68.0, 85.0, 1_500, 4),
            ("wax-1", "GlideWax Cold", EquipmentKind::Wax, 55.0, 75.0, 200, 20),
            ("wax-2", "KickMax Warm", EquipmentKind::Wax, 80.0, 60.0, 180, 14),
            ("wax-3", "Midnight Fluoro", EquipmentKind::Wax, 65.0, 88.0, 260, 10),
        ];
        EquipmentInventory {
            items: items
                .into_iter()
                .map(|(id, name, kind, grip, glide, cost, stock)| EquipmentItem {
                    id: id.into(),
                    name: name.into(),
                    kind,
                    grip,
                    glide,
                    cost,
                    stock,
                })
                .collect(),
        }
    }

    fn staff(&self) -> Vec<StaffMember> {
        vec![
            StaffMember {
                id: "coach-1".into(),
                name: "Lena Berg".into(),
                role: StaffRole::Coach,
                skill: 78.0,
                salary: 6_000,
                focus: Some(StaffFocus::Endurance),
            },
            StaffMember {
                id: "wax-1".into(),
                name: "Mads Iversen".into(),
                role: StaffRole::Wax,
                skill: 74.0,
                salary: 4_500,
                focus: None,
            },
            StaffMember {
                id: "physio-1".into(),
                name: "Sara Holm".into(),
                role: StaffRole::Physio,
                skill: 80.0,
                salary: 5_000,
                focus: Some(StaffFocus::Recovery),
            },
            StaffMember {
                id: "scout-1".into(),
                name: "Jonas Dahl".into(),
                role: StaffRole::Scout,
                skill: 70.0,
                salary: 4_000,
                focus: None,
            },
        ]
    }

    fn facilities(&self) -> FacilityLevels {
        FacilityLevels {
            training_center: 2,
            recovery_center: 2,
            altitude_access: 1,
        }
    }

    fn sponsors(&self) -> Vec<Sponsor> {
        vec![
            Sponsor {
                id: "sp-main".into(),
                name: "Nordic Energy".into(),
                tier: SponsorTier::Main,
                weekly_income: 12_000,
            },
            Sponsor {
                id: "sp-co".into(),
                name: "GlideWax Co".into(),
                tier: SponsorTier::Co,
                weekly_income: 5_000,
            },
            Sponsor {
                id: "sp-eq".into(),
                name: "SnowTech Skis".into(),
                tier: SponsorTier::Equipment,
                weekly_income: 3_000,
            },
        ]
    }

    fn finance_template(&self) -> FinanceState {
        FinanceState {
            balance: 300_000,
            weekly_income: 20_000,
            weekly_expenses: 0,
            history: Vec::new(),
        }
    }

    fn roster(&self, rng: &mut dyn RngCore) -> RosterSeed {
        let mut seed = RosterSeed::default();

        for (team_idx, team_name) in TEAM_NAMES.iter().enumerate() {
            let team_id = format!("team-{:02}", team_idx);
            let mut roster_ids = Vec::new();

            for slot in 0..8 {
                let id = format!("ath-{:02}-{}", team_idx, slot);
                let athlete = generate_athlete(rng, &id, &team_id, slot);
                roster_ids.push(id.clone());
                seed.athletes.insert(id, athlete);
            }

            seed.teams.insert(
                team_id.clone(),
                Team {
                    id: team_id,
                    name: (*team_name).into(),
                    budget: 200_000,
                    athletes: roster_ids,
                    reputation: 60.0,
                },
            );
        }

        seed
    }
}

fn course(
    id: &str,
    name: &str,
    segments: &[(f32, f32, u8, bool, bool)],
    sprints: &[f32],
    climbs: &[f32],
) -> RaceCourse {
    let segments: Vec<RaceSegment> = segments
        .iter()
        .map(|&(distance, gradient, difficulty, is_sprint, is_climb)| RaceSegment {
            distance,
            gradient,
            difficulty,
            is_sprint,
            is_climb,
        })
        .collect();
    RaceCourse {
        id: id.into(),
        name: name.into(),
        total_distance: segments.iter().map(|s| s.distance).sum(),
        segments,
        sprints: sprints.to_vec(),
        climbs: climbs.to_vec(),
    }
}

/// Generates one athlete. Roster slots follow a tier layout so every team
/// gets a star, a couple of solid riders and some depth.
fn generate_athlete(rng: &mut dyn RngCore, id: &str, team_id: &str, slot: usize) -> Athlete {
    // Tier base stat by slot within the team.
    let base: f32 = match slot {
        0 => rng.gen_range(78.0..88.0),
        1..=2 => rng.gen_range(70.0..80.0),
        3..=5 => rng.gen_range(62.0..72.0),
        _ => rng.gen_range(55.0..66.0),
    };
    let spread = |rng: &mut dyn RngCore| rng.gen_range(-8.0f32..8.0);

    let role = match slot {
        0 => Role::Captain,
        1 => Role::Climber,
        2 => Role::Sprinter,
        _ => Role::Domestique,
    };

    let first_idx = rng.gen_range(0..FIRST_NAMES.len());
    let gender = if first_idx < MALE_FIRST_NAMES {
        Gender::Male
    } else {
        Gender::Female
    };
    let name = format!(
        "{} {}",
        FIRST_NAMES[first_idx],
        LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
    );

    let stats = AthleteStats {
        endurance: (base + spread(rng)).clamp(30.0, 99.0),
        climbing: (base + spread(rng)).clamp(30.0, 99.0),
        flat: (base + spread(rng)).clamp(30.0, 99.0),
        sprint: (base + spread(rng)).clamp(30.0, 99.0),
        technique: (base + spread(rng)).clamp(30.0, 99.0),
        race_iq: (base + spread(rng)).clamp(30.0, 99.0),
    };

    let age = rng.gen_range(19..=36);
    let potential = (base + rng.gen_range(2.0..14.0)).clamp(40.0, 99.0);
    // Salary tracks ability so roster building has a real tradeoff.
    let salary_per_week = 400 + (base as i64 - 50).max(0) * 60;

    Athlete {
        id: id.into(),
        name,
        age,
        potential,
        role,
        gender,
        stats,
        state: AthleteState::default(),
        contract: Contract {
            salary_per_week,
            weeks_remaining: 52,
        },
        team_id: team_id.into(),
    }
}
