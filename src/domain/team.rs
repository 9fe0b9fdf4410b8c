//! Team - roster membership and budget-constrained squad building.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::athlete::Athlete;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub budget: i64,
    /// Athlete ids on the roster.
    pub athletes: Vec<String>,
    /// 0-100.
    pub reputation: f32,
}

/// Result of building a roster under a salary budget.
#[derive(Debug, Clone)]
pub struct BuildResult {
    pub team: Team,
    pub athletes: BTreeMap<String, Athlete>,
    pub remaining_budget: i64,
}

/// Greedily signs candidates by overall-score-per-salary ratio until the
/// weekly budget is spent. Entry point for custom-team setup screens; the
/// stock [`SeedGateway`](crate::data::SeedGateway) roster ships
/// pre-assigned and does not go through it.
pub fn build_team_from_budget(
    team_id: &str,
    team_name: &str,
    budget: i64,
    candidates: &[Athlete],
) -> BuildResult {
    let mut scored: Vec<&Athlete> = candidates.iter().collect();
    scored.sort_by(|a, b| {
        let ratio = |athlete: &Athlete| {
            athlete.overall_score() / athlete.contract.salary_per_week.max(1) as f32
        };
        ratio(b)
            .partial_cmp(&ratio(a))
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut remaining = budget;
    let mut roster_ids = Vec::new();
    let mut athletes = BTreeMap::new();
    for candidate in scored {
        if candidate.contract.salary_per_week <= remaining {
            remaining -= candidate.contract.salary_per_week;
            let mut signed = candidate.clone();
            signed.team_id = team_id.to_string();
            roster_ids.push(signed.id.clone());
            athletes.insert(signed.id.clone(), signed);
        }
    }

    BuildResult {
        team: Team {
            id: team_id.to_string(),
            name: team_name.to_string(),
            budget,
            athletes: roster_ids,
            reputation: 55.0,
        },
        athletes,
        remaining_budget: remaining,
    }
}
