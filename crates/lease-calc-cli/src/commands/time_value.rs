use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use std::time::Instant;

use lease_calc_core::lease_accounting::validation::{
    check_amount, check_periods, rate_from_percent, validate_rate, MAX_TERM,
};
use lease_calc_core::time_value::{pv_annuity_due, pv_ordinary_annuity};
use lease_calc_core::with_metadata;

use super::lease::TimingArg;

/// Arguments for present value of a level payment stream
#[derive(Args)]
pub struct PvArgs {
    /// Payment per period
    #[arg(long)]
    pub payment: Decimal,

    /// Discount rate per period in percent
    #[arg(long)]
    pub rate_pct: Decimal,

    /// Number of payments
    #[arg(long)]
    pub periods: u32,

    /// Payment timing
    #[arg(long, value_enum, default_value = "arrears")]
    pub timing: TimingArg,
}

pub fn run_pv(args: PvArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let rate = rate_from_percent(args.rate_pct);
    check_amount("payment", args.payment)?;
    validate_rate(rate)?;
    check_periods("periods", args.periods, 0, MAX_TERM)?;

    let present_value = match args.timing {
        TimingArg::Arrears => pv_ordinary_annuity(args.payment, rate, args.periods),
        TimingArg::Advance => pv_annuity_due(args.payment, rate, args.periods),
    };
    let undiscounted = args.payment * Decimal::from(args.periods);

    let output = with_metadata(
        "Present value of a level annuity",
        &json!({
            "payment": args.payment,
            "rate": rate,
            "periods": args.periods,
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        json!({
            "present_value": present_value,
            "undiscounted_total": undiscounted,
            "discount": undiscounted - present_value,
        }),
    );
    Ok(serde_json::to_value(output)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn pv_of(value: &Value) -> Decimal {
        Decimal::from_str(value["result"]["present_value"].as_str().unwrap()).unwrap()
    }

    #[test]
    fn test_run_pv_arrears() {
        let value = run_pv(PvArgs {
            payment: dec!(25000),
            rate_pct: dec!(5),
            periods: 4,
            timing: TimingArg::Arrears,
        })
        .unwrap();
        assert!((pv_of(&value) - dec!(88648.76)).abs() < dec!(0.01));
    }

    #[test]
    fn test_run_pv_zero_rate() {
        let value = run_pv(PvArgs {
            payment: dec!(100),
            rate_pct: Decimal::ZERO,
            periods: 7,
            timing: TimingArg::Advance,
        })
        .unwrap();
        assert_eq!(pv_of(&value), dec!(700));
    }

    #[test]
    fn test_run_pv_rejects_negative_rate() {
        let err = run_pv(PvArgs {
            payment: dec!(100),
            rate_pct: dec!(-1),
            periods: 3,
            timing: TimingArg::Arrears,
        })
        .unwrap_err();
        assert!(err.to_string().contains("rate"));
    }
}
