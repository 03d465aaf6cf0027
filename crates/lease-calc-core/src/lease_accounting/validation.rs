//! Input bounds for lease parameters.
//!
//! The calculator itself trusts its caller; every presentation surface runs
//! parameters through [`validate_parameters`] before measuring a lease.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::LeaseCalcError;
use crate::lease_accounting::measurement::LeaseParameters;
use crate::types::{Money, Periods, Rate};
use crate::LeaseCalcResult;

pub const MIN_TERM: Periods = 1;
pub const MAX_TERM: Periods = 50;
pub const MIN_USEFUL_LIFE: Periods = 1;
pub const MAX_USEFUL_LIFE: Periods = 50;
pub const MAX_AMOUNT: Money = dec!(1000000);
/// 100% per period
pub const MAX_RATE: Rate = Decimal::ONE;

/// Convert a percentage (5 = 5%) into a per-period rate fraction.
pub fn rate_from_percent(pct: Decimal) -> Rate {
    pct / dec!(100)
}

/// Check every field against its declared bounds, returning the first
/// violation.
pub fn validate_parameters(params: &LeaseParameters) -> LeaseCalcResult<()> {
    check_periods("term", params.term, MIN_TERM, MAX_TERM)?;
    check_periods(
        "useful_life",
        params.useful_life,
        MIN_USEFUL_LIFE,
        MAX_USEFUL_LIFE,
    )?;
    check_amount("payment", params.payment)?;

    validate_rate(params.rate)?;
    check_amount("initial_direct_costs", params.initial_direct_costs)?;
    check_amount("prepaid_payments", params.prepaid_payments)?;
    check_amount("lease_incentives", params.lease_incentives)?;
    Ok(())
}

/// Discount rate must be a fraction between 0 and [`MAX_RATE`].
pub fn validate_rate(rate: Rate) -> LeaseCalcResult<()> {
    if rate < Decimal::ZERO {
        return Err(LeaseCalcError::InvalidInput {
            field: "rate".into(),
            reason: "Discount rate cannot be negative".into(),
        });
    }
    if rate > MAX_RATE {
        return Err(LeaseCalcError::InvalidInput {
            field: "rate".into(),
            reason: format!(
                "Discount rate {rate} exceeds 100% per period (rates are fractions, e.g. 0.05 = 5%)"
            ),
        });
    }
    Ok(())
}

/// Period counts lie between `min` and `max` inclusive.
pub fn check_periods(
    field: &str,
    value: Periods,
    min: Periods,
    max: Periods,
) -> LeaseCalcResult<()> {
    if value < min || value > max {
        return Err(LeaseCalcError::InvalidInput {
            field: field.into(),
            reason: format!("Must be between {min} and {max} periods, got {value}"),
        });
    }
    Ok(())
}

/// Monetary inputs lie between zero and [`MAX_AMOUNT`].
pub fn check_amount(field: &str, value: Money) -> LeaseCalcResult<()> {
    if value < Decimal::ZERO {
        return Err(LeaseCalcError::InvalidInput {
            field: field.into(),
            reason: "Amount cannot be negative".into(),
        });
    }
    if value > MAX_AMOUNT {
        return Err(LeaseCalcError::InvalidInput {
            field: field.into(),
            reason: format!("Amount {value} exceeds the maximum of {MAX_AMOUNT}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: LeaseCalcError) -> String {
        match err {
            LeaseCalcError::InvalidInput { field, .. } => field,
            other => panic!("Expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(validate_parameters(&LeaseParameters::default()).is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let params = LeaseParameters {
            term: MAX_TERM,
            useful_life: MIN_USEFUL_LIFE,
            payment: MAX_AMOUNT,
            rate: MAX_RATE,
            initial_direct_costs: MAX_AMOUNT,
            prepaid_payments: Decimal::ZERO,
            lease_incentives: MAX_AMOUNT,
            ..LeaseParameters::default()
        };
        assert!(validate_parameters(&params).is_ok());
    }

    #[test]
    fn test_term_out_of_range() {
        for term in [0, 51] {
            let params = LeaseParameters {
                term,
                ..LeaseParameters::default()
            };
            assert_eq!(field_of(validate_parameters(&params).unwrap_err()), "term");
        }
    }

    #[test]
    fn test_useful_life_out_of_range() {
        let params = LeaseParameters {
            useful_life: 0,
            ..LeaseParameters::default()
        };
        assert_eq!(
            field_of(validate_parameters(&params).unwrap_err()),
            "useful_life"
        );
    }

    #[test]
    fn test_negative_rate_rejected() {
        let params = LeaseParameters {
            rate: dec!(-0.01),
            ..LeaseParameters::default()
        };
        assert_eq!(field_of(validate_parameters(&params).unwrap_err()), "rate");
    }

    #[test]
    fn test_rate_given_as_percentage_rejected() {
        let params = LeaseParameters {
            rate: dec!(5),
            ..LeaseParameters::default()
        };
        let err = validate_parameters(&params).unwrap_err();
        assert!(err.to_string().contains("fractions"));
    }

    #[test]
    fn test_amounts_out_of_range() {
        let params = LeaseParameters {
            payment: dec!(1000000.01),
            ..LeaseParameters::default()
        };
        assert_eq!(field_of(validate_parameters(&params).unwrap_err()), "payment");

        let params = LeaseParameters {
            prepaid_payments: dec!(-1),
            ..LeaseParameters::default()
        };
        assert_eq!(
            field_of(validate_parameters(&params).unwrap_err()),
            "prepaid_payments"
        );
    }

    #[test]
    fn test_rate_from_percent() {
        assert_eq!(rate_from_percent(dec!(5)), dec!(0.05));
        assert_eq!(rate_from_percent(dec!(0.25)), dec!(0.0025));
        assert_eq!(rate_from_percent(dec!(100)), MAX_RATE);
    }
}
