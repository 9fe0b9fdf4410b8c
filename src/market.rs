//! Transfer market - pricing, candidate lists and incoming offers.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::Athlete;

/// Candidate list cap; only the first athletes outside the player roster
/// make the market each refresh.
const MARKET_CAP: usize = 40;

/// Availability of a market entry. Only `Listed` athletes can be bought or
/// draw offers; the other statuses surface athletes the market knows about
/// without putting them up for sale outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferStatus {
    Listed,
    Free,
    Loan,
    NotForSale,
}

/// One athlete on the market, priced and with buyer interest 10-95.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferCandidate {
    pub athlete_id: String,
    pub asking_price: i64,
    pub status: TransferStatus,
    pub interest: f32,
}

/// A bid from another team for a listed player athlete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferOffer {
    pub athlete_id: String,
    pub amount: i64,
    pub week: u32,
}

/// Prices an athlete from base stats, potential, age and season points.
/// Deterministic for a given athlete and standings.
pub fn compute_market_value(athlete: &Athlete, season_points: &BTreeMap<String, u32>) -> i64 {
    let stats = &athlete.stats;
    let stats_score =
        stats.endurance * 0.35 + stats.climbing * 0.25 + stats.flat * 0.2 + stats.sprint * 0.2;
    let performance = season_points.get(&athlete.id).copied().unwrap_or(0) as f32;
    let age_curve = if athlete.age < 24 {
        1.08
    } else if athlete.age > 34 {
        0.88
    } else if athlete.age > 30 {
        0.94
    } else {
        1.0
    };
    let base = 10_000.0 + stats_score * 40.0 + athlete.potential * 10.0;
    (base * age_curve + performance * 500.0).round() as i64
}

/// Regenerates the candidate list from every athlete outside the player
/// roster, capped to [`MARKET_CAP`]. Interest tracks season points and
/// current fatigue.
pub fn build_transfer_candidates(
    athletes: &BTreeMap<String, Athlete>,
    player_team_id: &str,
    season_points: &BTreeMap<String, u32>,
) -> Vec<TransferCandidate> {
    athletes
        .values()
        .filter(|a| a.team_id != player_team_id)
        .take(MARKET_CAP)
        .map(|athlete| {
            let points = season_points.get(&athlete.id).copied().unwrap_or(0) as f32;
            TransferCandidate {
                athlete_id: athlete.id.clone(),
                asking_price: compute_market_value(athlete, season_points),
                status: TransferStatus::Listed,
                interest: (60.0 + points / 4.0 - athlete.state.fatigue / 2.0).clamp(10.0, 95.0),
            }
        })
        .collect()
}

/// Interest drawn when the player lists one of their own athletes; fresher
/// and higher-potential athletes attract more buyers.
pub fn listing_interest(athlete: &Athlete) -> f32 {
    (70.0 - athlete.state.fatigue / 2.0 + athlete.potential / 4.0).clamp(10.0, 95.0)
}

/// Rolls incoming offers for the player's listed athletes. Each listing
/// converts with probability `interest / 100`; a successful bid lands within
/// 85-110 percent of the asking price. An empty result is a normal week.
pub fn generate_incoming_offers<R: Rng>(
    rng: &mut R,
    listings: &[TransferCandidate],
    athletes: &BTreeMap<String, Athlete>,
    week: u32,
) -> Vec<TransferOffer> {
    listings
        .iter()
        .filter(|c| c.status == TransferStatus::Listed)
        .filter(|c| athletes.contains_key(&c.athlete_id))
        .filter_map(|candidate| {
            if rng.gen_range(0.0..100.0) >= candidate.interest {
                return None;
            }
            let factor = rng.gen_range(0.85..1.10);
            Some(TransferOffer {
                athlete_id: candidate.athlete_id.clone(),
                amount: (candidate.asking_price as f64 * factor).round() as i64,
                week,
            })
        })
        .collect()
}
