use rust_decimal::Decimal;

use crate::types::{Money, Periods, Rate};

/// Compound growth factor (1 + r)^n by iterative multiplication.
///
/// Returns `None` when the factor exceeds the decimal range, which only
/// happens for rates far outside any lease discount rate.
pub fn compound_factor(rate: Rate, periods: Periods) -> Option<Decimal> {
    let one_plus_r = Decimal::ONE + rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = factor.checked_mul(one_plus_r)?;
    }
    Some(factor)
}

/// Discount factor (1 + r)^-n. Underflows to zero instead of failing.
pub fn discount_factor(rate: Rate, periods: Periods) -> Decimal {
    match compound_factor(rate, periods) {
        Some(f) if !f.is_zero() => Decimal::ONE / f,
        _ => Decimal::ZERO,
    }
}

/// Present value of an ordinary annuity: `periods` equal payments made at
/// the end of each period.
///
/// `payment × (1 − (1 + r)^−n) / r`, or `payment × n` when the rate is zero.
/// Total over non-negative inputs; nothing is rounded.
pub fn pv_ordinary_annuity(payment: Money, rate: Rate, periods: Periods) -> Money {
    if rate.is_zero() {
        return payment * Decimal::from(periods);
    }
    payment * (Decimal::ONE - discount_factor(rate, periods)) / rate
}

/// Present value of an annuity due: the first payment is made immediately
/// and the remaining `periods - 1` are discounted as an ordinary annuity.
pub fn pv_annuity_due(payment: Money, rate: Rate, periods: Periods) -> Money {
    if periods == 0 {
        return Decimal::ZERO;
    }
    payment + pv_ordinary_annuity(payment, rate, periods - 1)
}
