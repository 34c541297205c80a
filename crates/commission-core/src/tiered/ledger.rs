use rust_decimal::Decimal;
use std::collections::HashMap;

use super::month::Month;
use crate::error::CommissionError;
use crate::types::{Money, UserId};
use crate::CommissionResult;

/// Running totals per user, then per month. An unseen month reads as zero,
/// so each month starts fresh without any explicit reset.
#[derive(Debug, Clone, Default)]
struct MonthlyTotals {
    totals: HashMap<UserId, HashMap<Month, Money>>,
}

impl MonthlyTotals {
    fn get(&self, user: UserId, month: &Month) -> Money {
        self.totals
            .get(&user)
            .and_then(|months| months.get(month))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    fn add(&mut self, user: UserId, month: &Month, amount: Money, what: &str) -> CommissionResult<Money> {
        let months = self.totals.entry(user).or_default();
        let current = months.get(month).copied().unwrap_or(Decimal::ZERO);
        let total = current
            .checked_add(amount)
            .ok_or_else(|| CommissionError::overflow(format!("{what} of user {user} in {month}")))?;
        match months.get_mut(month) {
            Some(slot) => *slot = total,
            None => {
                months.insert(month.clone(), total);
            }
        }
        Ok(total)
    }
}

/// Amount each user has sold toward their objective, per month.
#[derive(Debug, Clone, Default)]
pub struct ProgressLedger {
    inner: MonthlyTotals,
}

impl ProgressLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Progress to use as "before this deal".
    pub fn progress_before(&self, user: UserId, month: &Month) -> Money {
        self.inner.get(user, month)
    }

    /// Record a deal's amount; returns the progress after it.
    pub fn advance(&mut self, user: UserId, month: &Month, amount: Money) -> CommissionResult<Money> {
        self.inner.add(user, month, amount, "progress")
    }
}

/// Commission each user has earned so far, per month.
#[derive(Debug, Clone, Default)]
pub struct MonthlyAccrual {
    inner: MonthlyTotals,
}

impl MonthlyAccrual {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn accrual_before(&self, user: UserId, month: &Month) -> Money {
        self.inner.get(user, month)
    }

    /// Add a deal's commission; returns the month's cumulative total.
    pub fn advance(&mut self, user: UserId, month: &Month, commission: Money) -> CommissionResult<Money> {
        self.inner.add(user, month, commission, "accrued commission")
    }
}
