use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{commission_rows, deal_rows, result_of};

/// Format a commission report as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    let rows = commission_rows(result);
    if rows.is_empty() {
        println!("(no commissions)");
    } else {
        let mut builder = Builder::default();
        builder.push_record(["User", "Period", "Commission"]);
        for row in rows {
            builder.push_record([row.user_id, row.period, row.commission]);
        }
        println!("{}", Table::from(builder));
    }

    let deals = deal_rows(result);
    if !deals.is_empty() {
        let mut builder = Builder::default();
        builder.push_record(["User", "Deal", "Commission"]);
        for row in deals {
            builder.push_record(row);
        }
        println!("\n{}", Table::from(builder));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}
