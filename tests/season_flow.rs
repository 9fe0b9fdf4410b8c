//! Full-season exercise of the public API: new game, race weekend loop,
//! market moves, and persistence.

use std::collections::BTreeMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use ski_manager::data::{GameDataGateway, RosterSeed, SeedGateway};
use ski_manager::domain::{
    EquipmentInventory, FacilityLevels, RaceConditions, RaceCourse, SeasonRace, Sponsor,
    StaffMember,
};
use ski_manager::finance::FinanceState;
use ski_manager::race::{simulate_race, RaceInput, RaceTuning, MAX_TICKS};
use ski_manager::{Action, GameState};

/// Seed content with courses shrunk so a race simulates in a few ticks.
struct ShortSeasonGateway;

impl GameDataGateway for ShortSeasonGateway {
    fn race_courses(&self) -> BTreeMap<String, RaceCourse> {
        SeedGateway
            .race_courses()
            .into_iter()
            .map(|(id, mut course)| {
                for segment in &mut course.segments {
                    segment.distance /= 100.0;
                }
                course.total_distance /= 100.0;
                (id, course)
            })
            .collect()
    }

    fn race_conditions(&self) -> BTreeMap<String, RaceConditions> {
        SeedGateway.race_conditions()
    }
    fn season_races(&self) -> Vec<SeasonRace> {
        SeedGateway.season_races()
    }
    fn equipment(&self) -> EquipmentInventory {
        SeedGateway.equipment()
    }
    fn staff(&self) -> Vec<StaffMember> {
        SeedGateway.staff()
    }
    fn facilities(&self) -> FacilityLevels {
        SeedGateway.facilities()
    }
    fn sponsors(&self) -> Vec<Sponsor> {
        SeedGateway.sponsors()
    }
    fn finance_template(&self) -> FinanceState {
        SeedGateway.finance_template()
    }
    fn roster(&self, rng: &mut dyn RngCore) -> RosterSeed {
        SeedGateway.roster(rng)
    }
}

fn new_game(seed: u64) -> GameState {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    GameState::new_game(&ShortSeasonGateway, &mut rng, None)
}

#[test]
fn a_whole_season_runs_to_the_final_standings() {
    let mut state = new_game(7);
    let race_count = state.season_races.len();

    for _ in 0..race_count {
        state.apply(Action::StartNextRace).unwrap();
        assert!(state.active_race.is_some());
        state.apply(Action::FinishRace).unwrap();
    }

    assert_eq!(state.past_results.len(), race_count);
    // Every calendar race awarded its winner's points.
    let total_points: u32 = state.standings.athletes.values().sum();
    assert!(total_points >= 25 * race_count as u32);
    // A season of weekly settlements left a ledger trail.
    assert!(!state.finance.history.is_empty());
    // Racing cost the lineup energy reserves.
    let lineup = &state.past_results.last().unwrap().meta.lineup;
    assert!(lineup.iter().any(|id| state.athletes[id].state.fatigue > 20.0));
}

#[test]
fn seeded_games_replay_identically() {
    let mut first = new_game(99);
    let mut second = new_game(99);

    for state in [&mut first, &mut second] {
        state.apply(Action::StartNextRace).unwrap();
        state.apply(Action::FinishRace).unwrap();
    }

    assert_eq!(first.player_team_id, second.player_team_id);
    assert_eq!(first.standings.athletes, second.standings.athletes);
    let a = &first.past_results[0].results;
    let b = &second.past_results[0].results;
    for (x, y) in a.iter().zip(b) {
        assert_eq!(x.athlete_id, y.athlete_id);
        assert_eq!(x.points, y.points);
    }
}

#[test]
fn market_cycle_buys_a_rival_and_fields_them_next_race() {
    let mut state = new_game(3);
    state.apply(Action::RefreshTransferMarket).unwrap();
    let target = state.transfer_list[0].athlete_id.clone();

    state
        .apply(Action::BuyTransferTarget {
            athlete_id: target.clone(),
        })
        .unwrap();
    assert_eq!(state.athletes[&target].team_id, state.player_team_id);

    // The signing is eligible for the player's auto-picked lineup.
    state.apply(Action::StartNextRace).unwrap();
    let lineup = state.active_race.as_ref().unwrap().lineup.clone();
    assert!(!lineup.is_empty());
    state.apply(Action::FinishRace).unwrap();
}

#[test]
fn saves_survive_a_round_trip_mid_season() {
    let mut state = new_game(12);
    state.apply(Action::StartNextRace).unwrap();
    state.apply(Action::FinishRace).unwrap();
    state.apply(Action::AdvanceWeek).unwrap();

    let json = state.to_json().unwrap();
    let loaded = GameState::from_json(&json).unwrap();

    assert_eq!(loaded.current_week, state.current_week);
    assert_eq!(loaded.standings.teams, state.standings.teams);
    assert_eq!(loaded.finance.balance, state.finance.balance);
    assert_eq!(loaded.past_results.len(), 1);
    // Continuing from the load works.
    let mut loaded = loaded;
    loaded.apply(Action::StartNextRace).unwrap();
    assert!(loaded.active_race.is_some());
}

#[test]
fn the_longest_seed_marathon_finishes_under_the_tick_cap() {
    let gateway = SeedGateway;
    let courses = gateway.race_courses();
    let course = &courses["vasaloppet"];
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let roster = gateway.roster(&mut rng);
    let field: Vec<_> = roster.athletes.values().take(8).collect();

    let snapshots = simulate_race(&RaceInput {
        course,
        athletes: field,
        prep: None,
        conditions: gateway.race_conditions().get("vasaloppet").copied(),
        equipment: Some(&gateway.equipment()),
        tuning: RaceTuning::default(),
    });

    // Full 90 km at seed lengths, no shrinking: the whole field must cross
    // the line before the cap fires.
    assert!((snapshots.len() as u32) < MAX_TICKS);
    let last = snapshots.last().unwrap();
    for athlete in &last.athletes {
        assert!(
            athlete.distance >= course.total_distance,
            "{} stalled at {} m",
            athlete.id,
            athlete.distance
        );
    }
}

#[test]
fn direct_engine_use_finishes_a_kilometer_course() {
    let gateway = ShortSeasonGateway;
    let courses = gateway.race_courses();
    let course = &courses["jizerska"];
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let roster = gateway.roster(&mut rng);
    let field: Vec<_> = roster.athletes.values().take(10).collect();

    let snapshots = simulate_race(&RaceInput {
        course,
        athletes: field,
        prep: None,
        conditions: gateway.race_conditions().get("jizerska").copied(),
        equipment: Some(&gateway.equipment()),
        tuning: RaceTuning::default(),
    });

    assert!(snapshots.len() > 1);
    let last = snapshots.last().unwrap();
    for athlete in &last.athletes {
        assert!(athlete.distance >= course.total_distance);
    }
}
