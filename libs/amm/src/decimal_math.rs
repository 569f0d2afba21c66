//! Decimal exponentiation for weighted pool math
//!
//! Every weighted formula raises a balance ratio to a non-integer power. `rust_decimal`
//! keeps 28 fractional digits, so the helpers here evaluate `ln`, `exp` and `pow` with
//! series that run until their terms round to zero at that scale instead of stopping
//! at a fixed tolerance.
//!
//! All arithmetic is checked: overflow and division by zero surface as
//! [`PricingError`] arithmetic variants instead of panics.

use crate::error::{PricingError, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Natural logarithm of 2, rounded to 28 fractional digits
pub const LN_2: Decimal = dec!(0.6931471805599453094172321215);

/// `exp(x)` overflows `Decimal::MAX` (~7.9e28) above this argument
const EXP_UPPER_BOUND: Decimal = dec!(66.5);

/// `exp(x)` rounds to zero at 28 fractional digits below this argument
const EXP_LOWER_BOUND: Decimal = dec!(-66);

/// Iteration budget for the log and exp series
const MAX_SERIES_TERMS: usize = 256;

pub(crate) fn add(a: Decimal, b: Decimal, operation: &'static str) -> Result<Decimal> {
    a.checked_add(b).ok_or(PricingError::Overflow { operation })
}

pub(crate) fn sub(a: Decimal, b: Decimal, operation: &'static str) -> Result<Decimal> {
    a.checked_sub(b).ok_or(PricingError::Overflow { operation })
}

pub(crate) fn mul(a: Decimal, b: Decimal, operation: &'static str) -> Result<Decimal> {
    a.checked_mul(b).ok_or(PricingError::Overflow { operation })
}

pub(crate) fn div(a: Decimal, b: Decimal, operation: &'static str) -> Result<Decimal> {
    if b.is_zero() {
        return Err(PricingError::DivisionByZero { operation });
    }
    a.checked_div(b).ok_or(PricingError::Overflow { operation })
}

/// Natural logarithm of a strictly positive decimal
///
/// Reduces `x = m * 2^k` with `m` in `[0.75, 1.5]`, then sums
/// `ln(m) = 2 * atanh((m - 1) / (m + 1))`, whose argument stays below 0.2.
pub fn decimal_ln(x: Decimal) -> Result<Decimal> {
    if x <= Decimal::ZERO {
        return Err(PricingError::InvalidAmount {
            name: "ln argument",
            value: x,
            reason: "logarithm requires a positive argument",
        });
    }
    if x == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }

    let mut m = x;
    let mut k: i64 = 0;
    while m > dec!(1.5) {
        m /= Decimal::TWO;
        k += 1;
    }
    while m < dec!(0.75) {
        m *= Decimal::TWO;
        k -= 1;
    }

    let z = div(m - Decimal::ONE, m + Decimal::ONE, "decimal_ln")?;
    let z_squared = z * z;
    let mut term = z;
    let mut sum = z;
    let mut converged = false;

    for n in 1..MAX_SERIES_TERMS {
        term *= z_squared;
        let delta = term / Decimal::from(2 * n + 1);
        if delta.is_zero() {
            converged = true;
            break;
        }
        sum += delta;
    }

    if !converged {
        return Err(PricingError::NonConvergent {
            operation: "decimal_ln",
            iterations: MAX_SERIES_TERMS,
        });
    }

    let scaled = mul(Decimal::from(k), LN_2, "decimal_ln")?;
    add(sum * Decimal::TWO, scaled, "decimal_ln")
}

/// Exponential function
///
/// Reduces `x = k * ln2 + r` with `|r| <= ln2 / 2`, sums the Taylor series for `e^r`
/// and rescales by `2^k`. Arguments small enough to round to zero return zero.
pub fn decimal_exp(x: Decimal) -> Result<Decimal> {
    if x.is_zero() {
        return Ok(Decimal::ONE);
    }
    if x > EXP_UPPER_BOUND {
        return Err(PricingError::Overflow {
            operation: "decimal_exp",
        });
    }
    if x < EXP_LOWER_BOUND {
        return Ok(Decimal::ZERO);
    }

    let k = (x / LN_2).round();
    let r = x - k * LN_2;
    let k = k.to_i64().ok_or(PricingError::Overflow {
        operation: "decimal_exp",
    })?;

    let mut term = Decimal::ONE;
    let mut sum = Decimal::ONE;
    let mut converged = false;

    for n in 1..MAX_SERIES_TERMS {
        term = term * r / Decimal::from(n);
        if term.is_zero() {
            converged = true;
            break;
        }
        sum += term;
    }

    if !converged {
        return Err(PricingError::NonConvergent {
            operation: "decimal_exp",
            iterations: MAX_SERIES_TERMS,
        });
    }

    let mut result = sum;
    if k >= 0 {
        for _ in 0..k {
            result = mul(result, Decimal::TWO, "decimal_exp")?;
        }
    } else {
        for _ in 0..k.unsigned_abs() {
            result /= Decimal::TWO;
        }
    }

    Ok(result)
}

/// Raise a decimal to a non-negative integer power by repeated squaring
pub fn decimal_powi(base: Decimal, exponent: u64) -> Result<Decimal> {
    let mut result = Decimal::ONE;
    let mut square = base;
    let mut remaining = exponent;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result = mul(result, square, "decimal_powi")?;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = mul(square, square, "decimal_powi")?;
        }
    }

    Ok(result)
}

/// Raise a non-negative decimal to a non-negative, possibly fractional, power
///
/// The integer part of the exponent is applied exactly by repeated squaring and the
/// fractional remainder through `exp(frac * ln(base))`, so integral weight ratios
/// reproduce plain products.
pub fn decimal_pow(base: Decimal, exponent: Decimal) -> Result<Decimal> {
    if base.is_sign_negative() && !base.is_zero() {
        return Err(PricingError::InvalidAmount {
            name: "pow base",
            value: base,
            reason: "base must be non-negative",
        });
    }
    if exponent.is_sign_negative() && !exponent.is_zero() {
        return Err(PricingError::InvalidAmount {
            name: "pow exponent",
            value: exponent,
            reason: "exponent must be non-negative",
        });
    }

    if exponent.is_zero() || base == Decimal::ONE {
        return Ok(Decimal::ONE);
    }
    if base.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let whole = exponent.trunc();
    let frac = exponent - whole;
    let whole = whole.to_u64().ok_or(PricingError::Overflow {
        operation: "decimal_pow",
    })?;

    let integral = decimal_powi(base, whole)?;
    if frac.is_zero() {
        return Ok(integral);
    }

    let fractional = decimal_exp(mul(frac, decimal_ln(base)?, "decimal_pow")?)?;
    mul(integral, fractional, "decimal_pow")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tolerance: Decimal) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_ln_known_values() {
        assert_eq!(decimal_ln(Decimal::ONE).unwrap(), Decimal::ZERO);
        assert_close(decimal_ln(Decimal::TWO).unwrap(), LN_2, Decimal::new(1, 26));
        assert_close(
            decimal_ln(dec!(10)).unwrap(),
            dec!(2.3025850929940456840179914547),
            Decimal::new(1, 25),
        );
        assert_close(decimal_ln(dec!(0.5)).unwrap(), -LN_2, Decimal::new(1, 26));
    }

    #[test]
    fn test_ln_rejects_non_positive() {
        assert!(decimal_ln(Decimal::ZERO).unwrap_err().is_invalid_domain());
        assert!(decimal_ln(dec!(-1)).unwrap_err().is_invalid_domain());
    }

    #[test]
    fn test_exp_known_values() {
        assert_eq!(decimal_exp(Decimal::ZERO).unwrap(), Decimal::ONE);
        assert_close(
            decimal_exp(Decimal::ONE).unwrap(),
            dec!(2.7182818284590452353602874714),
            Decimal::new(1, 25),
        );
        assert_close(
            decimal_exp(dec!(-1)).unwrap(),
            dec!(0.3678794411714423215955237702),
            Decimal::new(1, 26),
        );
        assert_close(decimal_exp(LN_2).unwrap(), Decimal::TWO, Decimal::new(1, 26));
    }

    #[test]
    fn test_exp_bounds() {
        assert!(decimal_exp(dec!(100)).unwrap_err().is_arithmetic());
        assert_eq!(decimal_exp(dec!(-100)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_exp_inverts_ln() {
        for x in [dec!(0.0001), dec!(0.9), dec!(1.0000001), dec!(3.5), dec!(123456.789)] {
            let roundtrip = decimal_exp(decimal_ln(x).unwrap()).unwrap();
            assert_close(roundtrip / x, Decimal::ONE, Decimal::new(1, 20));
        }
    }

    #[test]
    fn test_powi_exact() {
        assert_eq!(decimal_powi(dec!(1.1), 2).unwrap(), dec!(1.21));
        assert_eq!(decimal_powi(dec!(2), 10).unwrap(), dec!(1024));
        assert_eq!(decimal_powi(dec!(7), 0).unwrap(), Decimal::ONE);
        assert!(decimal_powi(dec!(10), 40).unwrap_err().is_arithmetic());
    }

    #[test]
    fn test_pow_integral_exponent_matches_product() {
        let y = dec!(100) / dec!(109.9);
        assert_eq!(decimal_pow(y, dec!(2)).unwrap(), y * y);
        assert_eq!(decimal_pow(y, Decimal::ONE).unwrap(), y);
    }

    #[test]
    fn test_pow_fractional_exponent() {
        assert_close(decimal_pow(dec!(4), dec!(0.5)).unwrap(), dec!(2), Decimal::new(1, 25));
        assert_close(
            decimal_pow(dec!(8), dec!(1.5)).unwrap(),
            dec!(22.627416997969520780827019587),
            Decimal::new(1, 24),
        );
        assert_close(decimal_pow(dec!(0.25), dec!(0.5)).unwrap(), dec!(0.5), Decimal::new(1, 26));
    }

    #[test]
    fn test_pow_edge_cases() {
        assert_eq!(decimal_pow(Decimal::ZERO, dec!(0.5)).unwrap(), Decimal::ZERO);
        assert_eq!(decimal_pow(dec!(42), Decimal::ZERO).unwrap(), Decimal::ONE);
        assert_eq!(decimal_pow(Decimal::ONE, dec!(1234.5)).unwrap(), Decimal::ONE);
        assert!(decimal_pow(dec!(-2), dec!(0.5)).unwrap_err().is_invalid_domain());
        assert!(decimal_pow(dec!(2), dec!(-0.5)).unwrap_err().is_invalid_domain());
    }

    #[test]
    fn test_pow_base_near_one() {
        // (1 + 1e-12)^0.5 ~= 1 + 5e-13
        let result = decimal_pow(dec!(1.000000000001), dec!(0.5)).unwrap();
        assert_close(result, dec!(1.0000000000005), Decimal::new(1, 24));
    }

    #[test]
    fn test_pow_tiny_and_large_exponents() {
        let small = decimal_pow(dec!(0.9), dec!(0.0001)).unwrap();
        assert!(small < Decimal::ONE && small > dec!(0.99998));

        // 0.5^64.5 = 2^-64.5
        let large = decimal_pow(dec!(0.5), dec!(64.5)).unwrap();
        assert_close(large, dec!(0.0000000000000000000383323354), Decimal::new(1, 26));
    }
}
