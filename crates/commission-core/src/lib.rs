pub mod error;
pub mod model;
pub mod types;

#[cfg(feature = "tiered")]
pub mod tiered;

#[cfg(feature = "flat_rate")]
pub mod flat_rate;

#[cfg(feature = "bracketed")]
pub mod bracketed;

pub use error::CommissionError;
pub use types::*;

/// Standard result type for all commission operations
pub type CommissionResult<T> = Result<T, CommissionError>;
