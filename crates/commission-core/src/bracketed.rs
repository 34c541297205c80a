use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::CommissionError;
use crate::model::{ensure_non_negative_amount, ensure_non_negative_objective, CommissionInput, UserDirectory};
use crate::tiered::split;
use crate::types::*;
use crate::CommissionResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketedOutput {
    pub commissions: Vec<UserCommission>,
}

/// Bracketed commission on each user's total sales over the whole input.
///
/// 5% of what falls up to half the objective, 10% of what falls between
/// half and the full objective, 15% beyond. Equivalent to a single tiered
/// deal for the whole book, starting from zero progress.
pub fn calculate_bracketed_commissions(
    input: &CommissionInput,
) -> CommissionResult<ComputationOutput<BracketedOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for user in &input.users {
        ensure_non_negative_objective(user)?;
        if user.objective.is_zero() {
            warnings.push(format!(
                "User {} has a zero objective; all sales are paid at the HIGH rate",
                user.id
            ));
        }
    }

    let directory = UserDirectory::new(&input.users)?;
    let mut totals = vec![Decimal::ZERO; input.users.len()];
    for deal in &input.deals {
        directory
            .position_of(deal)
            .and_then(|idx| ensure_non_negative_amount(deal).map(|_| idx))
            .and_then(|idx| {
                totals[idx] = totals[idx]
                    .checked_add(deal.amount)
                    .ok_or_else(|| CommissionError::overflow(format!("deals[{}].amount", deal.id)))?;
                Ok(idx)
            })
            .map_err(|e| {
                warn!(deal_id = deal.id, error = %e, "bracketed commission run aborted");
                e
            })?;
    }

    let mut commissions = Vec::with_capacity(input.users.len());
    for (user, total) in input.users.iter().zip(&totals) {
        let commission = split::commission(user.objective, Decimal::ZERO, *total)?;
        debug!(user_id = user.id, total = %total, %commission, "bracketed book");
        commissions.push(UserCommission {
            user_id: user.id,
            commission,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bracketed commission on total sales (5% / 10% / 15% at 50% and 100% of objective)",
        &serde_json::json!({
            "num_users": input.users.len(),
            "num_deals": input.deals.len(),
        }),
        warnings,
        elapsed,
        BracketedOutput { commissions },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Deal, User};
    use rust_decimal_macros::dec;

    fn input(objective: Money, amounts: &[Money]) -> CommissionInput {
        CommissionInput {
            users: vec![User {
                id: 1,
                name: "Alice".into(),
                objective,
            }],
            deals: amounts
                .iter()
                .enumerate()
                .map(|(i, amount)| Deal {
                    id: i as DealId + 1,
                    amount: *amount,
                    user: 1,
                    payment_date: String::new(),
                })
                .collect(),
        }
    }

    fn commission_for(objective: Money, amounts: &[Money]) -> Money {
        calculate_bracketed_commissions(&input(objective, amounts))
            .unwrap()
            .result
            .commissions[0]
            .commission
    }

    #[test]
    fn test_below_half_objective() {
        assert_eq!(commission_for(dec!(1000), &[dec!(200), dec!(100)]), dec!(15));
    }

    #[test]
    fn test_between_half_and_objective() {
        // 500 * 5% + 300 * 10%
        assert_eq!(commission_for(dec!(1000), &[dec!(800)]), dec!(55));
    }

    #[test]
    fn test_above_objective() {
        // 25 + 50 + 500 * 15%
        assert_eq!(commission_for(dec!(1000), &[dec!(1000), dec!(500)]), dec!(150));
    }

    #[test]
    fn test_order_does_not_matter() {
        let a = commission_for(dec!(1000), &[dec!(900), dec!(300)]);
        let b = commission_for(dec!(1000), &[dec!(300), dec!(900)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_user() {
        let mut inp = input(dec!(1000), &[dec!(1)]);
        inp.deals[0].user = 5;
        assert!(matches!(
            calculate_bracketed_commissions(&inp),
            Err(CommissionError::UnknownUser { user_id: 5, .. })
        ));
    }

    #[test]
    fn test_zero_objective_warns_and_pays_high() {
        let result = calculate_bracketed_commissions(&input(Decimal::ZERO, &[dec!(200)])).unwrap();
        assert_eq!(result.result.commissions[0].commission, dec!(30));
        assert!(result.warnings.iter().any(|w| w.contains("zero objective")));
    }

    #[test]
    fn test_negative_objective_rejected() {
        match calculate_bracketed_commissions(&input(dec!(-1), &[dec!(10)])) {
            Err(CommissionError::InvalidInput { field, .. }) => assert!(field.contains("objective")),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_total_overflow_is_an_error() {
        let big = dec!(50000000000000000000000000000);
        match calculate_bracketed_commissions(&input(dec!(1000), &[big, big])) {
            Err(CommissionError::InvalidInput { field, reason }) => {
                assert_eq!(field, "deals[2].amount");
                assert_eq!(reason, "amount overflows");
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }
}
