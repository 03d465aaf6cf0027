pub mod measurement;
pub mod validation;

#[cfg(feature = "journal")]
pub mod journal;

pub use measurement::{
    calculate_lease, compute, LeaseParameters, LeaseResult, PaymentTiming, ScheduleRow,
};
