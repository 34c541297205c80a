use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::ledger::{MonthlyAccrual, ProgressLedger};
use super::month::Month;
use super::split;
use crate::model::{ensure_non_negative_amount, ensure_non_negative_objective, CommissionInput, Deal, UserDirectory};
use crate::types::*;
use crate::CommissionResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Cumulative commission per month for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCommission {
    pub user_id: UserId,
    /// Month ("YYYY-MM") to commission earned in that month
    pub commission: BTreeMap<Month, Money>,
}

/// Commission earned on a single deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealCommission {
    pub id: DealId,
    pub commission: Money,
}

/// Tiered commission result, one entry per user in user input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TieredOutput {
    pub commissions: Vec<MonthlyCommission>,
    /// Per-user deal commissions, each list in deal input order
    pub deals: Vec<Vec<DealCommission>>,
}

// ---------------------------------------------------------------------------
// Calculation
// ---------------------------------------------------------------------------

/// Mutable state threaded through the deal fold.
struct TieredRun<'a> {
    directory: UserDirectory<'a>,
    progress: ProgressLedger,
    accrual: MonthlyAccrual,
    output: TieredOutput,
}

impl<'a> TieredRun<'a> {
    fn new(directory: UserDirectory<'a>) -> Self {
        let users = directory.users();
        let output = TieredOutput {
            commissions: users
                .iter()
                .map(|u| MonthlyCommission {
                    user_id: u.id,
                    commission: BTreeMap::new(),
                })
                .collect(),
            deals: vec![Vec::new(); users.len()],
        };
        Self {
            directory,
            progress: ProgressLedger::new(),
            accrual: MonthlyAccrual::new(),
            output,
        }
    }

    fn apply(&mut self, deal: &Deal) -> CommissionResult<()> {
        let idx = self.directory.position_of(deal)?;
        let user = &self.directory.users()[idx];
        let month = Month::from_payment_date(deal.id, &deal.payment_date)?;
        ensure_non_negative_amount(deal)?;

        let progress = self.progress.progress_before(user.id, &month);
        let commission = split::commission(user.objective, progress, deal.amount)?;

        let month_total = self.accrual.advance(user.id, &month, commission)?;
        let progress_after = self.progress.advance(user.id, &month, deal.amount)?;

        debug!(
            deal_id = deal.id,
            user_id = user.id,
            month = %month,
            %progress,
            %progress_after,
            %commission,
            "applied deal"
        );

        self.output.commissions[idx].commission.insert(month, month_total);
        self.output.deals[idx].push(DealCommission {
            id: deal.id,
            commission,
        });
        Ok(())
    }
}

/// Compute tiered, progress-aware monthly commissions.
///
/// Deals are applied in the order given. Each deal is paid at the rates of
/// the tier bands its amount spans, measured from its owner's progress so
/// far in the deal's month. Progress and accruals start from zero in every
/// (user, month) pair. Processing stops at the first failing deal.
pub fn calculate_tiered_commissions(
    input: &CommissionInput,
) -> CommissionResult<ComputationOutput<TieredOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    for user in &input.users {
        ensure_non_negative_objective(user)?;
        if user.objective.is_zero() {
            warnings.push(format!(
                "User {} has a zero objective; every sale above zero is paid at the HIGH rate",
                user.id
            ));
        }
    }

    let directory = UserDirectory::new(&input.users)?;
    let mut run = TieredRun::new(directory);

    for deal in &input.deals {
        if let Err(e) = run.apply(deal) {
            warn!(deal_id = deal.id, error = %e, "tiered commission run aborted");
            return Err(e);
        }
    }

    for (user, deals) in input.users.iter().zip(&run.output.deals) {
        if deals.is_empty() {
            warnings.push(format!("User {} closed no deals", user.id));
        }
    }

    // Monthly totals are individually bounded; only the log line sums across them
    let total: Option<Money> = run
        .output
        .commissions
        .iter()
        .flat_map(|c| c.commission.values())
        .try_fold(Decimal::ZERO, |acc, m| acc.checked_add(*m));
    info!(
        users = input.users.len(),
        deals = input.deals.len(),
        ?total,
        "tiered commissions computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Tiered monthly commission (5% / 10% / 15% bands at 50% and 100% of objective)",
        &serde_json::json!({
            "num_users": input.users.len(),
            "num_deals": input.deals.len(),
            "month_key": "first 7 characters of payment_date",
            "threshold_rule": "progress exactly on a threshold stays in the lower band",
        }),
        warnings,
        elapsed,
        run.output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
