use serde_json::Value;
use std::io;

use super::{commission_rows, result_of};

/// Write commissions as CSV to stdout, one row per user and period.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record(["user_id", "period", "commission"]);
    for row in commission_rows(result_of(value)) {
        let _ = wtr.write_record([&row.user_id, &row.period, &row.commission]);
    }

    let _ = wtr.flush();
}
