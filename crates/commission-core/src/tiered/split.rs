use serde::{Deserialize, Serialize};

use super::tier::{mid_threshold, tier_of, Tier};
use crate::error::CommissionError;
use crate::types::Money;
use crate::CommissionResult;

/// Portion of a deal's amount paid at a single tier's rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierSlice {
    pub tier: Tier,
    pub amount: Money,
}

impl TierSlice {
    pub fn commission(&self) -> CommissionResult<Money> {
        self.amount
            .checked_mul(self.tier.rate())
            .ok_or_else(|| CommissionError::overflow("amount"))
    }
}

fn sub(a: Money, b: Money) -> CommissionResult<Money> {
    a.checked_sub(b).ok_or_else(|| CommissionError::overflow("amount"))
}

/// Break `amount` into the tier bands it crosses, given `progress` already
/// accrued this month.
///
/// Progress plus amount never decreases, so only the transitions
/// Low→Low, Mid→Mid, High→High, Low→Mid, Mid→High and Low→High can occur.
/// Anything else means the tier model and the progress input disagree and
/// is reported as an invariant violation.
pub fn split(objective: Money, progress: Money, amount: Money) -> CommissionResult<Vec<TierSlice>> {
    let reached = progress
        .checked_add(amount)
        .ok_or_else(|| CommissionError::overflow("amount"))?;
    let current = tier_of(objective, progress);
    let next = tier_of(objective, reached);
    let half = mid_threshold(objective);

    let slices = match (current, next) {
        (Tier::Low, Tier::Low) | (Tier::Mid, Tier::Mid) | (Tier::High, Tier::High) => {
            vec![TierSlice { tier: next, amount }]
        }
        (Tier::Low, Tier::Mid) => two_way(half, progress, amount, Tier::Low, Tier::Mid)?,
        (Tier::Mid, Tier::High) => two_way(objective, progress, amount, Tier::Mid, Tier::High)?,
        (Tier::Low, Tier::High) => {
            let below_half = sub(half, progress)?;
            // the whole Mid band is crossed
            let mid_band = half;
            vec![
                TierSlice {
                    tier: Tier::Low,
                    amount: below_half,
                },
                TierSlice {
                    tier: Tier::Mid,
                    amount: mid_band,
                },
                TierSlice {
                    tier: Tier::High,
                    amount: sub(sub(amount, below_half)?, mid_band)?,
                },
            ]
        }
        (Tier::Mid, Tier::Low) | (Tier::High, Tier::Low) | (Tier::High, Tier::Mid) => {
            return Err(CommissionError::InvariantViolation {
                from: current,
                to: next,
            });
        }
    };

    Ok(slices)
}

fn two_way(
    threshold: Money,
    progress: Money,
    amount: Money,
    lower: Tier,
    upper: Tier,
) -> CommissionResult<Vec<TierSlice>> {
    let cross_amount = sub(threshold, progress)?;
    Ok(vec![
        TierSlice {
            tier: lower,
            amount: cross_amount,
        },
        TierSlice {
            tier: upper,
            amount: sub(amount, cross_amount)?,
        },
    ])
}

/// Commission earned on a deal of `amount` closed when the user had already
/// reached `progress` toward `objective` this month.
pub fn commission(objective: Money, progress: Money, amount: Money) -> CommissionResult<Money> {
    split(objective, progress, amount)?
        .iter()
        .try_fold(Money::ZERO, |acc, slice| {
            acc.checked_add(slice.commission()?)
                .ok_or_else(|| CommissionError::overflow("amount"))
        })
}
