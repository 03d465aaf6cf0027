pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "lease_accounting")]
pub mod lease_accounting;

pub use error::LeaseCalcError;
pub use types::*;

/// Standard result type for all lease-calc operations
pub type LeaseCalcResult<T> = Result<T, LeaseCalcError>;
