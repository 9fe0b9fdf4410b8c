//! Weekly finances - balance, income and the append-only ledger.

use serde::{Deserialize, Serialize};

use crate::domain::Athlete;

/// One ledger line; the ledger is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinanceEntry {
    pub week: u32,
    pub delta: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinanceState {
    pub balance: i64,
    pub weekly_income: i64,
    /// Last computed weekly salary bill.
    pub weekly_expenses: i64,
    pub history: Vec<FinanceEntry>,
}

impl FinanceState {
    /// Moves the balance and appends the matching ledger line.
    pub fn record(&mut self, week: u32, delta: i64, reason: impl Into<String>) {
        self.balance += delta;
        self.history.push(FinanceEntry {
            week,
            delta,
            reason: reason.into(),
        });
    }
}

/// Settles one week: sponsor income minus the salary bill of the given
/// roster, recorded as a single ledger entry. Only the player's rostered
/// athletes are on the payroll.
pub fn apply_weekly_finance<'a>(
    finance: &mut FinanceState,
    week: u32,
    payroll: impl Iterator<Item = &'a Athlete>,
) {
    let salary: i64 = payroll.map(|a| a.contract.salary_per_week).sum();
    let delta = finance.weekly_income - salary;
    finance.weekly_expenses = salary;
    finance.record(week, delta, "Weekly finances");
}
