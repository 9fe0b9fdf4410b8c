//! Game state - the single owner of a season in progress.
//!
//! Every mutation goes through [`GameState::apply`] with an explicit
//! [`Action`], so the UI layer above can stay a thin dispatcher and
//! every transition is testable in isolation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::data::GameDataGateway;
use crate::domain::{
    Athlete, EquipmentInventory, FacilityLevels, RaceConditions, RaceCourse, Role, SeasonRace,
    Sponsor, StaffMember, Team,
};
use crate::error::GameError;
use crate::finance::{apply_weekly_finance, FinanceState};
use crate::market::{
    build_transfer_candidates, generate_incoming_offers, listing_interest, TransferCandidate,
    TransferOffer, TransferStatus,
};
use crate::race::{
    apply_race_effects, score_race, simulate_race, Pacing, RaceInput, RaceMeta, RacePrep,
    RaceResultSummary, RaceSnapshot, RaceTuning, Standings, Tactic,
};
use crate::training::{apply_weekly_training, WeeklyTrainingPlan};

/// A race mid-playback: its snapshot sequence plus the prep it was started
/// with. Never persisted; a reload simply drops the unfinished race.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRace {
    pub race_id: String,
    pub course_id: String,
    /// The player athletes entered for post-race effects.
    pub lineup: Vec<String>,
    pub pacing: Pacing,
    pub tactic: Option<Tactic>,
    pub ski_choice: Option<String>,
    pub wax_choice: Option<String>,
    pub conditions: Option<RaceConditions>,
    pub snapshots: Vec<RaceSnapshot>,
}

/// A saved roster arrangement: slot -> athlete plus slot -> role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TeamFormation {
    pub slots: BTreeMap<String, String>,
    pub roles: BTreeMap<String, Role>,
    pub last_updated_week: u32,
}

/// Every state transition the game supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Action {
    AdvanceWeek,
    StartRace { race_id: String },
    StartNextRace,
    FinishRace,
    RefreshTransferMarket,
    BuyTransferTarget { athlete_id: String },
    ListForTransfer { athlete_id: String, asking_price: i64 },
    SetRacePrep { prep: Option<RacePrep> },
    SetTrainingPlans { plans: Vec<WeeklyTrainingPlan> },
    SetFormation {
        team_id: String,
        slots: BTreeMap<String, String>,
        roles: BTreeMap<String, Role>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub current_week: u32,
    pub season_length_weeks: u32,
    pub player_team_id: String,
    pub teams: BTreeMap<String, Team>,
    pub athletes: BTreeMap<String, Athlete>,
    pub finance: FinanceState,
    pub staff: Vec<StaffMember>,
    pub facilities: FacilityLevels,
    pub sponsors: Vec<Sponsor>,
    pub equipment: EquipmentInventory,
    pub transfer_list: Vec<TransferCandidate>,
    pub transfer_offers: Vec<TransferOffer>,
    pub race_courses: BTreeMap<String, RaceCourse>,
    pub race_conditions: BTreeMap<String, RaceConditions>,
    pub season_races: Vec<SeasonRace>,
    pub race_prep: Option<RacePrep>,
    pub training_plans: Vec<WeeklyTrainingPlan>,
    pub past_results: Vec<RaceResultSummary>,
    pub standings: Standings,
    pub formations: BTreeMap<String, TeamFormation>,
    #[serde(default)]
    pub tuning: RaceTuning,
    /// Snapshot sequences are too heavy to persist; a save made mid-race
    /// reloads without the unfinished race.
    #[serde(skip)]
    pub active_race: Option<ActiveRace>,
}

impl GameState {
    /// Builds a fresh season from the given content provider. With no
    /// explicit team choice the player gets a random one.
    pub fn new_game<R: Rng>(
        gateway: &dyn GameDataGateway,
        rng: &mut R,
        player_team_id: Option<&str>,
    ) -> Self {
        let roster = gateway.roster(rng);
        let player_team_id = player_team_id
            .filter(|id| roster.teams.contains_key(*id))
            .map(str::to_string)
            .unwrap_or_else(|| {
                let ids: Vec<&String> = roster.teams.keys().collect();
                if ids.is_empty() {
                    String::new()
                } else {
                    ids[rng.gen_range(0..ids.len())].clone()
                }
            });

        Self {
            current_week: 1,
            season_length_weeks: 16,
            player_team_id,
            teams: roster.teams,
            athletes: roster.athletes,
            finance: gateway.finance_template(),
            staff: gateway.staff(),
            facilities: gateway.facilities(),
            sponsors: gateway.sponsors(),
            equipment: gateway.equipment(),
            transfer_list: Vec::new(),
            transfer_offers: Vec::new(),
            race_courses: gateway.race_courses(),
            race_conditions: gateway.race_conditions(),
            season_races: gateway.season_races(),
            race_prep: None,
            training_plans: Vec::new(),
            past_results: Vec::new(),
            standings: Standings::default(),
            formations: BTreeMap::new(),
            tuning: RaceTuning::default(),
            active_race: None,
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<(), GameError> {
        match action {
            Action::AdvanceWeek => {
                self.advance_week();
                Ok(())
            }
            Action::StartRace { race_id } => self.start_race(&race_id),
            Action::StartNextRace => self.start_next_race(),
            Action::FinishRace => self.finish_race(),
            Action::RefreshTransferMarket => {
                self.refresh_transfer_market();
                Ok(())
            }
            Action::BuyTransferTarget { athlete_id } => self.buy_transfer_target(&athlete_id),
            Action::ListForTransfer {
                athlete_id,
                asking_price,
            } => self.list_for_transfer(&athlete_id, asking_price),
            Action::SetRacePrep { prep } => {
                self.race_prep = prep;
                Ok(())
            }
            Action::SetTrainingPlans { plans } => {
                self.training_plans = plans;
                Ok(())
            }
            Action::SetFormation {
                team_id,
                slots,
                roles,
            } => {
                self.set_formation(&team_id, slots, roles);
                Ok(())
            }
        }
    }

    /// One calendar week: training, finances, then natural recovery.
    pub fn advance_week(&mut self) {
        apply_weekly_training(
            &mut self.athletes,
            &self.training_plans,
            &self.staff,
            &self.facilities,
        );
        self.settle_weekly_finance();
        self.apply_weekly_recovery();
        self.current_week += 1;
    }

    fn settle_weekly_finance(&mut self) {
        let payroll: Vec<&Athlete> = self
            .teams
            .get(&self.player_team_id)
            .map(|team| {
                team.athletes
                    .iter()
                    .filter_map(|id| self.athletes.get(id))
                    .collect()
            })
            .unwrap_or_default();
        apply_weekly_finance(&mut self.finance, self.current_week, payroll.into_iter());
    }

    fn apply_weekly_recovery(&mut self) {
        use crate::domain::Health;
        for athlete in self.athletes.values_mut() {
            let state = &mut athlete.state;
            if state.fatigue < 40.0 && state.health != Health::Ok {
                state.health = Health::Ok;
            }
            if state.fatigue > 95.0 {
                state.health = Health::Sick;
                state.add_morale(-5.0);
            }
            if state.fatigue > 20.0 {
                state.fatigue = (state.fatigue - 5.0).max(0.0);
            }
        }
    }

    /// Simulates a season race to completion and stores the playback.
    /// The whole world races; the player lineup comes from prep, or is
    /// auto-picked from the roster.
    pub fn start_race(&mut self, race_id: &str) -> Result<(), GameError> {
        let race = self
            .season_races
            .iter()
            .find(|r| r.id == race_id)
            .ok_or_else(|| GameError::UnknownRace(race_id.to_string()))?;
        let course = self
            .race_courses
            .get(&race.course_id)
            .ok_or_else(|| GameError::UnknownCourse(race.course_id.clone()))?;

        let prep = self.race_prep.as_ref().filter(|p| p.race_id == race_id);
        let lineup: Vec<String> = match prep {
            Some(p) if !p.lineup.is_empty() => p
                .lineup
                .iter()
                .filter(|id| self.athletes.contains_key(*id))
                .cloned()
                .collect(),
            _ => {
                let roster = self
                    .teams
                    .get(&self.player_team_id)
                    .map(|team| {
                        team.athletes
                            .iter()
                            .filter_map(|id| self.athletes.get(id))
                            .collect::<Vec<_>>()
                    })
                    .unwrap_or_default();
                pick_top_lineup(roster.into_iter(), 8)
            }
        };
        let conditions = prep
            .and_then(|p| p.conditions)
            .or_else(|| self.race_conditions.get(&course.id).copied());

        let field: Vec<&Athlete> = self.athletes.values().collect();
        let snapshots = simulate_race(&RaceInput {
            course,
            athletes: field,
            prep,
            conditions,
            equipment: Some(&self.equipment),
            tuning: self.tuning,
        });

        log::info!(
            "race {} started on {} with {} in the player lineup",
            race_id,
            course.id,
            lineup.len()
        );
        let active = ActiveRace {
            race_id: race_id.to_string(),
            course_id: course.id.clone(),
            lineup,
            pacing: prep.map(|p| p.pacing).unwrap_or_default(),
            tactic: prep.and_then(|p| p.tactic),
            ski_choice: prep.and_then(|p| p.ski_choice.clone()),
            wax_choice: prep.and_then(|p| p.wax_choice.clone()),
            conditions,
            snapshots,
        };
        self.active_race = Some(active);
        Ok(())
    }

    /// Fast-forwards to the next uncompleted race week (training and
    /// finances settle for every skipped week) and starts that race. A
    /// completed calendar is a no-op. Missing prep falls back to the saved
    /// formation.
    pub fn start_next_race(&mut self) -> Result<(), GameError> {
        let completed: Vec<&str> = self.past_results.iter().map(|r| r.race_id.as_str()).collect();
        let mut upcoming: Vec<(u32, String)> = self
            .season_races
            .iter()
            .filter(|r| !completed.contains(&r.id.as_str()))
            .map(|r| (r.week, r.id.clone()))
            .collect();
        upcoming.sort();
        let Some((week, race_id)) = upcoming.into_iter().next() else {
            return Ok(());
        };

        while self.current_week < week {
            apply_weekly_training(
                &mut self.athletes,
                &self.training_plans,
                &self.staff,
                &self.facilities,
            );
            self.settle_weekly_finance();
            self.current_week += 1;
        }

        let prep_has_lineup = self
            .race_prep
            .as_ref()
            .is_some_and(|p| !p.lineup.is_empty());
        if !prep_has_lineup {
            if let Some(formation) = self.formations.get(&self.player_team_id) {
                let mut lineup = Vec::new();
                for athlete_id in formation.slots.values() {
                    if !lineup.contains(athlete_id) {
                        lineup.push(athlete_id.clone());
                    }
                }
                let roles: BTreeMap<String, Role> = formation
                    .roles
                    .iter()
                    .filter_map(|(slot_id, role)| {
                        formation
                            .slots
                            .get(slot_id)
                            .map(|athlete_id| (athlete_id.clone(), *role))
                    })
                    .collect();
                self.race_prep = Some(RacePrep {
                    race_id: race_id.clone(),
                    lineup,
                    pacing: Pacing::Steady,
                    roles,
                    ..RacePrep::default()
                });
            }
        }

        self.start_race(&race_id)
    }

    /// Commits the active race: classification, standings, prize money,
    /// lineup fatigue/morale, and the archived summary. One call settles
    /// everything; the active race is gone afterwards.
    pub fn finish_race(&mut self) -> Result<(), GameError> {
        let active = self.active_race.take().ok_or(GameError::NoActiveRace)?;
        let Some(final_snapshot) = active.snapshots.last() else {
            return Err(GameError::NoActiveRace);
        };

        let results = score_race(final_snapshot, &self.athletes);
        log::info!(
            "race {} finished, {} athletes classified",
            active.race_id,
            results.len()
        );
        self.standings.record(&results);

        if let Some(race) = self.season_races.iter().find(|r| r.id == active.race_id) {
            let player_on_podium = results
                .iter()
                .take(3)
                .any(|r| r.team_id == self.player_team_id);
            if player_on_podium {
                let prize = race.prize_money;
                let reason = format!("Prize money {}", active.course_id);
                self.finance.record(self.current_week, prize, reason);
            }
        }

        apply_race_effects(&mut self.athletes, &active.lineup, &results, active.pacing);

        self.past_results.push(RaceResultSummary {
            race_id: active.race_id,
            results,
            meta: RaceMeta {
                lineup: active.lineup,
                pacing: active.pacing,
                tactic: active.tactic,
                ski_choice: active.ski_choice,
                wax_choice: active.wax_choice,
                conditions: active.conditions,
            },
        });
        Ok(())
    }

    /// Rebuilds the buyable candidate list from the non-player rosters.
    pub fn refresh_transfer_market(&mut self) {
        self.transfer_list = build_transfer_candidates(
            &self.athletes,
            &self.player_team_id,
            &self.standings.athletes,
        );
    }

    /// Buys a listed athlete onto the player roster at the asking price.
    /// Entries marked anything other than [`TransferStatus::Listed`] are
    /// visible on the market but refuse a sale.
    pub fn buy_transfer_target(&mut self, athlete_id: &str) -> Result<(), GameError> {
        let candidate = self
            .transfer_list
            .iter()
            .find(|c| c.athlete_id == athlete_id)
            .ok_or_else(|| GameError::UnknownAthlete(athlete_id.to_string()))?;
        if candidate.status != TransferStatus::Listed {
            return Err(GameError::NotForSale(athlete_id.to_string()));
        }
        let price = candidate.asking_price;
        if !self.athletes.contains_key(athlete_id) {
            return Err(GameError::UnknownAthlete(athlete_id.to_string()));
        }
        if self.finance.balance < price {
            return Err(GameError::InsufficientFunds {
                needed: price,
                available: self.finance.balance,
            });
        }

        let (name, old_team_id) = {
            let athlete = &self.athletes[athlete_id];
            (athlete.name.clone(), athlete.team_id.clone())
        };
        self.finance.record(
            self.current_week,
            -price,
            format!("Transfer fee for {}", name),
        );

        if let Some(old_team) = self.teams.get_mut(&old_team_id) {
            old_team.athletes.retain(|id| id != athlete_id);
        }
        if let Some(player_team) = self.teams.get_mut(&self.player_team_id) {
            if !player_team.athletes.iter().any(|id| id == athlete_id) {
                player_team.athletes.push(athlete_id.to_string());
            }
        }
        if let Some(athlete) = self.athletes.get_mut(athlete_id) {
            athlete.team_id = self.player_team_id.clone();
            athlete.state.add_morale(5.0);
        }
        self.transfer_list.retain(|c| c.athlete_id != athlete_id);
        Ok(())
    }

    /// Lists (or re-lists) one of the player's athletes at an asking price.
    pub fn list_for_transfer(
        &mut self,
        athlete_id: &str,
        asking_price: i64,
    ) -> Result<(), GameError> {
        let athlete = self
            .athletes
            .get(athlete_id)
            .ok_or_else(|| GameError::UnknownAthlete(athlete_id.to_string()))?;
        let listing = TransferCandidate {
            athlete_id: athlete_id.to_string(),
            asking_price,
            status: TransferStatus::Listed,
            interest: listing_interest(athlete),
        };
        match self
            .transfer_list
            .iter_mut()
            .find(|c| c.athlete_id == athlete_id)
        {
            Some(existing) => *existing = listing,
            None => self.transfer_list.push(listing),
        }
        Ok(())
    }

    /// Rolls this week's incoming offers for the player's listed athletes
    /// and appends them to the offer inbox.
    pub fn roll_transfer_offers<R: Rng>(&mut self, rng: &mut R) {
        let offers = generate_incoming_offers(
            rng,
            &self.transfer_list,
            &self.athletes,
            self.current_week,
        );
        self.transfer_offers.extend(offers);
    }

    /// Saves a formation and applies the morale/form nudge: athletes placed
    /// in their natural role settle in, miscast athletes chafe.
    pub fn set_formation(
        &mut self,
        team_id: &str,
        slots: BTreeMap<String, String>,
        roles: BTreeMap<String, Role>,
    ) {
        for (slot_id, athlete_id) in &slots {
            let Some(athlete) = self.athletes.get_mut(athlete_id) else {
                continue;
            };
            let assigned = roles.get(slot_id).copied().unwrap_or(athlete.role);
            if assigned == athlete.role {
                athlete.state.add_morale(4.0);
                athlete.state.add_form(1.0);
            } else {
                athlete.state.add_morale(-2.0);
                athlete.state.add_form(-1.0);
            }
        }
        self.formations.insert(
            team_id.to_string(),
            TeamFormation {
                slots,
                roles,
                last_updated_week: self.current_week,
            },
        );
    }

    pub fn to_json(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, GameError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Auto-selects the strongest fresh athletes: weighted base stats plus a
/// freshness term, ties broken by id, capped at `limit`.
pub fn pick_top_lineup<'a>(athletes: impl Iterator<Item = &'a Athlete>, limit: usize) -> Vec<String> {
    let score = |a: &Athlete| {
        a.stats.endurance * 0.35
            + a.stats.climbing * 0.25
            + a.stats.flat * 0.2
            + a.stats.sprint * 0.1
            + (20.0 - a.state.fatigue) * 0.1
    };
    let mut ranked: Vec<(&'a Athlete, f32)> = athletes.map(|a| (a, score(a))).collect();
    ranked.sort_by(|(a, sa), (b, sb)| {
        sb.partial_cmp(sa)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked
        .into_iter()
        .take(limit)
        .map(|(a, _)| a.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RosterSeed, SeedGateway};
    use crate::domain::Health;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    /// Seed content with every course shrunk to sprint length so race
    /// tests finish in a handful of ticks.
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

    fn new_game() -> GameState {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        GameState::new_game(&ShortSeasonGateway, &mut rng, None)
    }

    #[test]
    fn new_game_starts_on_week_one_with_a_valid_player_team() {
        let state = new_game();
        assert_eq!(state.current_week, 1);
        assert!(state.teams.contains_key(&state.player_team_id));
        assert_eq!(state.finance.balance, 300_000);
        assert!(state.past_results.is_empty());
        assert!(state.active_race.is_none());
    }

    #[test]
    fn explicit_team_choice_wins_over_the_random_pick() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let state = GameState::new_game(&SeedGateway, &mut rng, Some("team-03"));
        assert_eq!(state.player_team_id, "team-03");
    }

    #[test]
    fn advance_week_settles_finances_once_and_ticks_the_calendar() {
        let mut state = new_game();
        let roster_salary: i64 = state.teams[&state.player_team_id]
            .athletes
            .iter()
            .map(|id| state.athletes[id].contract.salary_per_week)
            .sum();

        state.apply(Action::AdvanceWeek).unwrap();

        assert_eq!(state.current_week, 2);
        assert_eq!(state.finance.history.len(), 1);
        assert_eq!(
            state.finance.balance,
            300_000 + state.finance.weekly_income - roster_salary
        );
    }

    #[test]
    fn weekly_recovery_decays_fatigue_and_cures_the_rested() {
        let mut state = new_game();
        let id = state.teams[&state.player_team_id].athletes[0].clone();
        {
            let athlete = state.athletes.get_mut(&id).unwrap();
            athlete.state.fatigue = 30.0;
            athlete.state.health = Health::Sick;
        }

        state.apply(Action::AdvanceWeek).unwrap();

        let athlete = &state.athletes[&id];
        assert_eq!(athlete.state.health, Health::Ok);
        assert_eq!(athlete.state.fatigue, 25.0);
    }

    #[test]
    fn unknown_race_id_is_an_error() {
        let mut state = new_game();
        let err = state
            .apply(Action::StartRace {
                race_id: "nope".into(),
            })
            .unwrap_err();
        assert!(matches!(err, GameError::UnknownRace(_)));
    }

    #[test]
    fn finish_without_a_race_in_progress_is_an_error() {
        let mut state = new_game();
        assert!(matches!(
            state.apply(Action::FinishRace),
            Err(GameError::NoActiveRace)
        ));
    }

    #[test]
    fn race_flow_simulates_scores_and_archives() {
        let mut state = new_game();
        state
            .apply(Action::StartRace {
                race_id: "race-1".into(),
            })
            .unwrap();

        let active = state.active_race.as_ref().unwrap();
        assert!(active.snapshots.len() > 1);
        assert_eq!(active.lineup.len(), 8);

        state.apply(Action::FinishRace).unwrap();

        assert!(state.active_race.is_none());
        assert_eq!(state.past_results.len(), 1);
        let summary = &state.past_results[0];
        assert_eq!(summary.race_id, "race-1");
        assert_eq!(summary.results.len(), state.athletes.len());
        // The winner's points landed in the standings.
        let winner = &summary.results[0];
        assert_eq!(state.standings.athletes[&winner.athlete_id], 25);
        // The raced lineup paid the fatigue bill.
        let raced = &state.athletes[&summary.meta.lineup[0]];
        assert!(raced.state.fatigue > 20.0);
    }

    #[test]
    fn start_next_race_fast_forwards_to_the_race_week() {
        let mut state = new_game();
        state.apply(Action::StartNextRace).unwrap();

        // First race is on week 3; two weeks of finances settled on the way.
        assert_eq!(state.current_week, 3);
        assert_eq!(state.finance.history.len(), 2);
        let active = state.active_race.as_ref().unwrap();
        assert_eq!(active.race_id, "race-1");
    }

    #[test]
    fn completed_calendar_makes_start_next_race_a_no_op() {
        let mut state = new_game();
        for race in ["race-1", "race-2", "race-3", "race-4", "race-5", "race-6"] {
            state
                .apply(Action::StartRace {
                    race_id: race.into(),
                })
                .unwrap();
            state.apply(Action::FinishRace).unwrap();
        }

        state.apply(Action::StartNextRace).unwrap();
        assert!(state.active_race.is_none());
        assert_eq!(state.past_results.len(), 6);
    }

    #[test]
    fn transfer_market_lists_only_rivals_and_buying_moves_the_athlete() {
        let mut state = new_game();
        state.apply(Action::RefreshTransferMarket).unwrap();
        assert!(!state.transfer_list.is_empty());

        let target = state.transfer_list[0].clone();
        let balance_before = state.finance.balance;
        state
            .apply(Action::BuyTransferTarget {
                athlete_id: target.athlete_id.clone(),
            })
            .unwrap();

        let bought = &state.athletes[&target.athlete_id];
        assert_eq!(bought.team_id, state.player_team_id);
        assert_eq!(state.finance.balance, balance_before - target.asking_price);
        assert!(state.teams[&state.player_team_id]
            .athletes
            .contains(&target.athlete_id));
        assert!(!state
            .transfer_list
            .iter()
            .any(|c| c.athlete_id == target.athlete_id));
    }

    #[test]
    fn not_for_sale_entries_cannot_be_bought() {
        let mut state = new_game();
        state.apply(Action::RefreshTransferMarket).unwrap();
        let target = state.transfer_list[0].athlete_id.clone();
        state.transfer_list[0].status = TransferStatus::NotForSale;
        let balance_before = state.finance.balance;

        let err = state
            .apply(Action::BuyTransferTarget {
                athlete_id: target.clone(),
            })
            .unwrap_err();

        assert!(matches!(err, GameError::NotForSale(_)));
        assert_eq!(state.finance.balance, balance_before);
        assert_ne!(state.athletes[&target].team_id, state.player_team_id);
    }

    #[test]
    fn buying_beyond_the_balance_fails_cleanly() {
        let mut state = new_game();
        state.apply(Action::RefreshTransferMarket).unwrap();
        state.finance.balance = 0;
        let target = state.transfer_list[0].athlete_id.clone();

        let err = state
            .apply(Action::BuyTransferTarget { athlete_id: target })
            .unwrap_err();
        assert!(matches!(err, GameError::InsufficientFunds { .. }));
        assert_eq!(state.finance.history.len(), 0);
    }

    #[test]
    fn listing_a_player_athlete_upserts_the_entry() {
        let mut state = new_game();
        let id = state.teams[&state.player_team_id].athletes[0].clone();

        state
            .apply(Action::ListForTransfer {
                athlete_id: id.clone(),
                asking_price: 15_000,
            })
            .unwrap();
        state
            .apply(Action::ListForTransfer {
                athlete_id: id.clone(),
                asking_price: 18_000,
            })
            .unwrap();

        let listings: Vec<_> = state
            .transfer_list
            .iter()
            .filter(|c| c.athlete_id == id)
            .collect();
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].asking_price, 18_000);
    }

    #[test]
    fn offers_accumulate_in_the_inbox() {
        let mut state = new_game();
        let id = state.teams[&state.player_team_id].athletes[0].clone();
        state.list_for_transfer(&id, 20_000).unwrap();
        // Force certain interest so the seeded roll always converts.
        state.transfer_list.last_mut().unwrap().interest = 100.0;

        let mut rng = ChaCha8Rng::seed_from_u64(5);
        state.roll_transfer_offers(&mut rng);
        assert_eq!(state.transfer_offers.len(), 1);
        assert_eq!(state.transfer_offers[0].athlete_id, id);
    }

    #[test]
    fn formation_rewards_natural_roles_and_punishes_miscasts() {
        let mut state = new_game();
        let team_id = state.player_team_id.clone();
        let ids = state.teams[&team_id].athletes.clone();
        let natural = ids[0].clone();
        let miscast = ids[3].clone();
        let natural_role = state.athletes[&natural].role;
        let wrong_role = if state.athletes[&miscast].role == Role::Captain {
            Role::Sprinter
        } else {
            Role::Captain
        };

        let slots = BTreeMap::from([
            ("s1".to_string(), natural.clone()),
            ("s2".to_string(), miscast.clone()),
        ]);
        let roles = BTreeMap::from([
            ("s1".to_string(), natural_role),
            ("s2".to_string(), wrong_role),
        ]);
        state
            .apply(Action::SetFormation {
                team_id: team_id.clone(),
                slots,
                roles,
            })
            .unwrap();

        assert_eq!(state.athletes[&natural].state.morale, 74.0);
        assert_eq!(state.athletes[&miscast].state.morale, 68.0);
        assert!(state.formations.contains_key(&team_id));
    }

    #[test]
    fn lineup_auto_pick_prefers_strong_fresh_athletes() {
        let state = new_game();
        let lineup = pick_top_lineup(state.athletes.values(), 8);
        assert_eq!(lineup.len(), 8);

        // Freshness breaks the tie between otherwise identical athletes.
        let mut fresh = state.athletes.values().next().unwrap().clone();
        fresh.id = "fresh".into();
        fresh.state.fatigue = 10.0;
        let mut tired = fresh.clone();
        tired.id = "tired".into();
        tired.state.fatigue = 90.0;

        let pair = vec![&tired, &fresh];
        let picked = pick_top_lineup(pair.into_iter(), 1);
        assert_eq!(picked, vec!["fresh".to_string()]);
    }

    #[test]
    fn save_and_load_round_trip_drops_the_active_race() {
        let mut state = new_game();
        state
            .apply(Action::StartRace {
                race_id: "race-1".into(),
            })
            .unwrap();
        state.apply(Action::FinishRace).unwrap();
        state
            .apply(Action::StartRace {
                race_id: "race-2".into(),
            })
            .unwrap();

        let json = state.to_json().unwrap();
        let loaded = GameState::from_json(&json).unwrap();

        assert_eq!(loaded.current_week, state.current_week);
        assert_eq!(loaded.past_results.len(), 1);
        assert_eq!(loaded.standings.athletes, state.standings.athletes);
        assert_eq!(loaded.finance.balance, state.finance.balance);
        assert!(loaded.active_race.is_none());
    }
}
