//! IFRS 16 lessee measurement at commencement.
//!
//! Computes the initial lease liability as the present value of the lease
//! payments, the right-of-use (ROU) asset built up from it, straight-line
//! depreciation over the shorter of lease term and useful life, and the
//! period-by-period liability amortisation schedule using the effective
//! interest method.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::lease_accounting::validation::validate_parameters;
use crate::time_value::{pv_annuity_due, pv_ordinary_annuity};
use crate::types::{with_metadata, ComputationOutput, Money, Periods, Rate};
use crate::LeaseCalcResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// When in each period the lease payment falls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTiming {
    /// End of period
    #[default]
    Arrears,
    /// Start of period; the first payment is made at commencement
    Advance,
}

/// Lease parameters for a single calculation.
///
/// All amounts are per period and the rate is a per-period fraction
/// (0.05 = 5%), not a percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseParameters {
    /// Lease term in periods
    pub term: Periods,
    /// Periodic lease payment
    pub payment: Money,
    /// Per-period discount rate
    pub rate: Rate,
    /// Arrears or advance
    #[serde(default)]
    pub payment_timing: PaymentTiming,
    /// Economic useful life of the underlying asset in periods
    pub useful_life: Periods,
    /// Initial direct costs incurred by the lessee
    #[serde(default)]
    pub initial_direct_costs: Money,
    /// Lease payments made at or before commencement
    #[serde(default)]
    pub prepaid_payments: Money,
    /// Lease incentives received from the lessor
    #[serde(default)]
    pub lease_incentives: Money,
}

impl Default for LeaseParameters {
    /// 4-year plant lease, 25,000 annually in arrears, 5% discount rate,
    /// 4-year useful life.
    fn default() -> Self {
        Self {
            term: 4,
            payment: Decimal::from(25_000),
            rate: Decimal::new(5, 2),
            payment_timing: PaymentTiming::Arrears,
            useful_life: 4,
            initial_direct_costs: Decimal::ZERO,
            prepaid_payments: Decimal::ZERO,
            lease_incentives: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single row of the lease liability amortisation schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Period number; 0 only for the commencement payment of an advance lease
    pub period: Periods,
    /// Liability at start of period
    pub opening: Money,
    /// Interest accrued on the opening balance
    pub interest: Money,
    /// Cash paid this period
    pub payment: Money,
    /// Portion of the payment reducing the liability
    pub principal_reduction: Money,
    /// Liability at end of period
    pub closing: Money,
}

/// Initial measurement and amortisation schedule of a lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseResult {
    /// PV of unpaid lease payments at commencement
    pub initial_liability: Money,
    /// Liability + direct costs + prepayments − incentives
    pub initial_rou_asset: Money,
    /// Straight-line depreciation charge per period
    pub annual_depreciation: Money,
    /// Shorter of lease term and useful life
    pub depreciation_periods: Periods,
    /// One row per period (plus period 0 for advance timing)
    pub schedule: Vec<ScheduleRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Measure a lease at commencement and build its amortisation schedule.
///
/// Pure and total: the caller is trusted to pass parameters inside the
/// bounds checked by [`validate_parameters`].
pub fn compute(params: LeaseParameters) -> LeaseResult {
    let initial_liability = match params.payment_timing {
        PaymentTiming::Arrears => pv_ordinary_annuity(params.payment, params.rate, params.term),
        PaymentTiming::Advance => pv_annuity_due(params.payment, params.rate, params.term),
    };

    let initial_rou_asset = initial_liability + params.initial_direct_costs
        + params.prepaid_payments
        - params.lease_incentives;

    let schedule = build_schedule(&params, initial_liability);

    let depreciation_periods = params.term.min(params.useful_life);
    let annual_depreciation = if depreciation_periods == 0 {
        Decimal::ZERO
    } else {
        initial_rou_asset / Decimal::from(depreciation_periods)
    };

    LeaseResult {
        initial_liability,
        initial_rou_asset,
        annual_depreciation,
        depreciation_periods,
        schedule,
    }
}

/// Validate parameters, measure the lease and wrap the result with
/// methodology, assumptions and warnings.
pub fn calculate_lease(
    params: &LeaseParameters,
) -> LeaseCalcResult<ComputationOutput<LeaseResult>> {
    let start = Instant::now();
    validate_parameters(params)?;

    let result = compute(*params);
    let warnings = measurement_warnings(params, &result);

    debug!(
        term = params.term,
        timing = ?params.payment_timing,
        liability = %result.initial_liability,
        rou_asset = %result.initial_rou_asset,
        rows = result.schedule.len(),
        "lease measured"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "IFRS 16 lessee: PV of lease payments, effective interest amortisation, straight-line ROU depreciation",
        params,
        warnings,
        elapsed,
        result,
    ))
}

// ---------------------------------------------------------------------------
// Amortisation schedule
// ---------------------------------------------------------------------------

fn build_schedule(params: &LeaseParameters, initial_liability: Money) -> Vec<ScheduleRow> {
    let advance = params.payment_timing == PaymentTiming::Advance;
    let mut schedule = Vec::with_capacity(params.term as usize + usize::from(advance));
    let mut opening = initial_liability;

    if advance {
        // Commencement payment: no interest has accrued yet
        let principal = params.payment.min(opening);
        let closing = opening - principal;
        schedule.push(ScheduleRow {
            period: 0,
            opening,
            interest: Decimal::ZERO,
            payment: params.payment,
            principal_reduction: principal,
            closing,
        });
        opening = closing;
    }

    for period in 1..=params.term {
        let interest = opening * params.rate;
        let (principal, payment) = if period == params.term {
            // Final period clears whatever balance remains
            (opening, interest + opening)
        } else {
            (params.payment - interest, params.payment)
        };
        let closing = opening - principal;

        schedule.push(ScheduleRow {
            period,
            opening,
            interest,
            payment,
            principal_reduction: principal,
            closing,
        });
        opening = closing;
    }

    schedule
}

fn measurement_warnings(params: &LeaseParameters, result: &LeaseResult) -> Vec<String> {
    let mut warnings = Vec::new();

    if params.rate.is_zero() {
        warnings.push("Discount rate is zero; lease payments are not discounted".into());
    }
    if result.initial_rou_asset < Decimal::ZERO {
        warnings.push(format!(
            "Lease incentives of {} exceed the other ROU components; ROU asset is negative",
            params.lease_incentives
        ));
    }
    if params.useful_life < params.term {
        warnings.push(format!(
            "Useful life ({}) is shorter than lease term ({}); ROU asset depreciated over useful life",
            params.useful_life, params.term
        ));
    }
    if let Some(first) = result.schedule.first() {
        if first.period == 0 && first.principal_reduction < first.payment {
            warnings.push(
                "Commencement payment exceeds the lease liability; principal reduction capped at the liability"
                    .into(),
            );
        }
    }

    warnings
}
