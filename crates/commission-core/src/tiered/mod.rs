//! Tiered, progress-aware monthly commissions.
//!
//! A deal's commission depends on how far its owner had already progressed
//! toward their objective in the deal's calendar month, so deals are folded
//! strictly in input order.

pub mod driver;
pub mod ledger;
pub mod month;
pub mod split;
pub mod tier;

pub use driver::{calculate_tiered_commissions, DealCommission, MonthlyCommission, TieredOutput};
pub use ledger::{MonthlyAccrual, ProgressLedger};
pub use month::Month;
pub use split::commission;
pub use tier::{tier_of, Tier};
