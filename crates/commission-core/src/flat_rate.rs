use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::CommissionError;
use crate::model::{ensure_non_negative_amount, Deal, User, UserDirectory};
use crate::types::*;
use crate::CommissionResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Rates and bonus rule for the flat-rate policy. Fields missing from a
/// JSON schedule keep their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlatRateSchedule {
    /// Rate paid when the user closed at most `small_book_max_deals` deals
    pub small_book_rate: Rate,
    /// Rate paid above that deal count
    pub large_book_rate: Rate,
    pub small_book_max_deals: usize,
    /// Flat bonus once total sales reach `bonus_threshold`
    pub bonus: Money,
    pub bonus_threshold: Money,
}

impl Default for FlatRateSchedule {
    fn default() -> Self {
        Self {
            small_book_rate: dec!(0.10),
            large_book_rate: dec!(0.20),
            small_book_max_deals: 2,
            bonus: dec!(500),
            bonus_threshold: dec!(2000),
        }
    }
}

/// Input for the flat-rate policy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlatRateInput {
    pub users: Vec<User>,
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub schedule: FlatRateSchedule,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatRateOutput {
    pub commissions: Vec<UserCommission>,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Per-user sales book: how many deals and how much in total.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Book {
    count: usize,
    total: Money,
}

fn book_commission(user: UserId, book: Book, schedule: &FlatRateSchedule) -> CommissionResult<Money> {
    let rate = if book.count <= schedule.small_book_max_deals {
        schedule.small_book_rate
    } else {
        schedule.large_book_rate
    };
    let bonus = if book.total >= schedule.bonus_threshold {
        schedule.bonus
    } else {
        Decimal::ZERO
    };
    rate.checked_mul(book.total)
        .and_then(|paid| paid.checked_add(bonus))
        .ok_or_else(|| CommissionError::overflow(format!("users[{user}].commission")))
}

/// Flat-rate commission over the whole input: one rate for the user's entire
/// book, chosen by deal count, plus a bonus for large books.
pub fn calculate_flat_rate_commissions(
    input: &FlatRateInput,
) -> CommissionResult<ComputationOutput<FlatRateOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let directory = UserDirectory::new(&input.users)?;
    let mut books = vec![Book::default(); input.users.len()];

    for deal in &input.deals {
        let idx = directory
            .position_of(deal)
            .and_then(|idx| ensure_non_negative_amount(deal).map(|_| idx))
            .map_err(|e| {
                warn!(deal_id = deal.id, error = %e, "flat-rate commission run aborted");
                e
            })?;
        let book = &mut books[idx];
        book.total = book.total.checked_add(deal.amount).ok_or_else(|| {
            let e = CommissionError::overflow(format!("deals[{}].amount", deal.id));
            warn!(deal_id = deal.id, error = %e, "flat-rate commission run aborted");
            e
        })?;
        book.count += 1;
    }

    let mut commissions = Vec::with_capacity(input.users.len());
    for (user, book) in input.users.iter().zip(&books) {
        if book.count == 0 {
            warnings.push(format!("User {} closed no deals", user.id));
        }
        let commission = book_commission(user.id, *book, &input.schedule)?;
        debug!(user_id = user.id, deals = book.count, total = %book.total, %commission, "flat-rate book");
        commissions.push(UserCommission {
            user_id: user.id,
            commission,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Flat-rate commission by deal count with volume bonus",
        &input.schedule,
        warnings,
        elapsed,
        FlatRateOutput { commissions },
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
