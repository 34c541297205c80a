use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CommissionError;
use crate::types::DealId;
use crate::CommissionResult;

/// Calendar month in `YYYY-MM` form. Lexical order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Month(String);

impl Month {
    /// Accepts exactly `YYYY-MM` naming a real month.
    pub fn parse(s: &str) -> Option<Month> {
        let b = s.as_bytes();
        let shaped = b.len() == 7
            && b[..4].iter().all(u8::is_ascii_digit)
            && b[4] == b'-'
            && b[5..].iter().all(u8::is_ascii_digit);
        if !shaped {
            return None;
        }
        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d").ok()?;
        Some(Month(s.to_string()))
    }

    /// Month of a deal, taken from the first seven characters of its
    /// payment date.
    pub fn from_payment_date(deal_id: DealId, payment_date: &str) -> CommissionResult<Month> {
        payment_date
            .get(..7)
            .and_then(Month::parse)
            .ok_or_else(|| CommissionError::MalformedDate {
                deal_id,
                payment_date: payment_date.to_string(),
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
