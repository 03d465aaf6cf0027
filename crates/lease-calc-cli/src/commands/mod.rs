pub mod lease;
pub mod time_value;
