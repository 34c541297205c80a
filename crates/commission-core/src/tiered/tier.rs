use rust_decimal_macros::dec;

use crate::types::Money;
pub use crate::types::Tier;

/// Progress at which the Low band ends and the Mid band begins.
pub fn mid_threshold(objective: Money) -> Money {
    objective / dec!(2)
}

/// Tier reached with `progress` toward `objective`.
///
/// Comparisons are strict, so progress sitting exactly on a threshold stays
/// in the lower band. With a zero objective both thresholds are zero: zero
/// progress is `Low` and any positive progress is `High`.
pub fn tier_of(objective: Money, progress: Money) -> Tier {
    if progress > objective {
        Tier::High
    } else if progress > mid_threshold(objective) {
        Tier::Mid
    } else {
        Tier::Low
    }
}
