use thiserror::Error;

use crate::types::Tier;

#[derive(Debug, Error)]
pub enum CommissionError {
    #[error("Unknown user: deal {deal_id} references user {user_id}, which is not in the user list")]
    UnknownUser { deal_id: u64, user_id: u64 },

    #[error("Malformed date: deal {deal_id} has payment_date '{payment_date}', expected a YYYY-MM prefix")]
    MalformedDate { deal_id: u64, payment_date: String },

    #[error("Invariant violation: tier transition {from} -> {to} cannot follow from non-decreasing progress")]
    InvariantViolation { from: Tier, to: Tier },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CommissionError {
    /// A running total or product no longer fits in a `Decimal`.
    pub fn overflow(field: impl Into<String>) -> Self {
        CommissionError::InvalidInput {
            field: field.into(),
            reason: "amount overflows".into(),
        }
    }
}

impl From<serde_json::Error> for CommissionError {
    fn from(e: serde_json::Error) -> Self {
        CommissionError::SerializationError(e.to_string())
    }
}
