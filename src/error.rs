//! Game-level errors. The simulation loop itself never fails; errors only
//! arise at the state-transition boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown race: {0}")]
    UnknownRace(String),

    #[error("unknown course: {0}")]
    UnknownCourse(String),

    #[error("unknown athlete: {0}")]
    UnknownAthlete(String),

    #[error("insufficient funds: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    #[error("not for sale: {0}")]
    NotForSale(String),

    #[error("no race in progress")]
    NoActiveRace,

    #[error("save data error: {0}")]
    Save(#[from] serde_json::Error),
}
