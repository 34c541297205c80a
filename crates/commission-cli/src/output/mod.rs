pub mod csv_out;
pub mod file;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// One commission figure for one user: either a whole-input total or a
/// single month.
#[derive(Debug, Clone, PartialEq)]
pub struct CommissionRow {
    pub user_id: String,
    pub period: String,
    pub commission: String,
}

/// The `result` object of an envelope, or the value itself.
pub fn result_of(value: &Value) -> &Value {
    value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value)
}

/// Flatten `commissions` into rows. Monthly maps yield one row per month.
pub fn commission_rows(result: &Value) -> Vec<CommissionRow> {
    let mut rows = Vec::new();
    let Some(Value::Array(commissions)) = result.get("commissions") else {
        return rows;
    };

    for entry in commissions {
        let user_id = entry.get("user_id").map(format_scalar).unwrap_or_default();
        match entry.get("commission") {
            Some(Value::Object(months)) => {
                for (month, amount) in months {
                    rows.push(CommissionRow {
                        user_id: user_id.clone(),
                        period: month.clone(),
                        commission: format_scalar(amount),
                    });
                }
            }
            Some(amount) => rows.push(CommissionRow {
                user_id,
                period: "total".to_string(),
                commission: format_scalar(amount),
            }),
            None => {}
        }
    }
    rows
}

/// Per-deal rows as (user_id, deal_id, commission). `deals` lists are
/// aligned with `commissions` by position.
pub fn deal_rows(result: &Value) -> Vec<[String; 3]> {
    let (Some(Value::Array(commissions)), Some(Value::Array(deals))) =
        (result.get("commissions"), result.get("deals"))
    else {
        return Vec::new();
    };

    commissions
        .iter()
        .zip(deals)
        .flat_map(|(entry, user_deals)| {
            let user_id = entry.get("user_id").map(format_scalar).unwrap_or_default();
            user_deals
                .as_array()
                .into_iter()
                .flatten()
                .map(move |d| {
                    [
                        user_id.clone(),
                        d.get("id").map(format_scalar).unwrap_or_default(),
                        d.get("commission").map(format_scalar).unwrap_or_default(),
                    ]
                })
        })
        .collect()
}

pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
