use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use lease_calc_core::lease_accounting::{self, journal, validation, LeaseParameters};
use lease_calc_core::time_value;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_decimal(field: &str, text: &str) -> NapiResult<Decimal> {
    Decimal::from_str(text).map_err(|e| to_napi_error(format!("{field}: {e}")))
}

// ---------------------------------------------------------------------------
// Lease accounting
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_lease(input_json: String) -> NapiResult<String> {
    let input: LeaseParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = lease_accounting::calculate_lease(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn lease_journal(input_json: String) -> NapiResult<String> {
    let input: LeaseParameters = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = journal::generate_journal(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Time value
// ---------------------------------------------------------------------------

/// Decimal amounts cross the boundary as strings to keep full precision.
#[napi]
pub fn present_value(payment: String, rate: String, periods: u32) -> NapiResult<String> {
    let payment = parse_decimal("payment", &payment)?;
    let rate = parse_decimal("rate", &rate)?;
    validation::check_amount("payment", payment).map_err(to_napi_error)?;
    validation::validate_rate(rate).map_err(to_napi_error)?;
    validation::check_periods("periods", periods, 0, validation::MAX_TERM)
        .map_err(to_napi_error)?;
    Ok(time_value::pv_ordinary_annuity(payment, rate, periods).to_string())
}
