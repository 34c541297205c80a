use serde_json::Value;

use super::{commission_rows, result_of};

/// Print one bare line per commission figure: `user_id period commission`.
pub fn print_minimal(value: &Value) {
    for row in commission_rows(result_of(value)) {
        println!("{} {} {}", row.user_id, row.period, row.commission);
    }
}
