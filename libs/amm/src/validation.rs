//! Input guards shared by the pricing formulas
//!
//! Rejections are logged at debug level and returned to the caller; nothing is clamped.

use crate::error::{PricingError, Result};
use rust_decimal::Decimal;
use tracing::debug;

pub(crate) fn ensure_positive_balance(name: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        debug!(name, %value, "rejecting non-positive balance");
        return Err(PricingError::InvalidBalance { name, value });
    }
    Ok(())
}

pub(crate) fn ensure_non_negative_balance(name: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        debug!(name, %value, "rejecting negative balance");
        return Err(PricingError::InvalidBalance { name, value });
    }
    Ok(())
}

pub(crate) fn ensure_positive_weight(name: &'static str, value: Decimal) -> Result<()> {
    if value <= Decimal::ZERO {
        debug!(name, %value, "rejecting non-positive weight");
        return Err(PricingError::InvalidWeight {
            name,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

/// Validate a token weight against the pool's total weight and return the normalized weight
pub(crate) fn normalized_weight(weight: Decimal, total_weight: Decimal) -> Result<Decimal> {
    ensure_positive_weight("token_weight", weight)?;
    ensure_positive_weight("total_weight", total_weight)?;
    if weight > total_weight {
        debug!(%weight, %total_weight, "rejecting weight above total weight");
        return Err(PricingError::InvalidWeight {
            name: "token_weight",
            value: weight,
            reason: "must not exceed total weight",
        });
    }
    crate::decimal_math::div(weight, total_weight, "normalized_weight")
}

pub(crate) fn ensure_non_negative_amount(name: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        debug!(name, %value, "rejecting negative amount");
        return Err(PricingError::InvalidAmount {
            name,
            value,
            reason: "must be non-negative",
        });
    }
    Ok(())
}

/// `1 - fee` for a fee that multiplies an amount
///
/// Any fee outside `[0, 1)` is invalid input.
pub(crate) fn fee_complement(name: &'static str, fee: Decimal) -> Result<Decimal> {
    if fee < Decimal::ZERO || fee >= Decimal::ONE {
        debug!(name, %fee, "rejecting fee outside [0, 1)");
        return Err(PricingError::InvalidFee { name, value: fee });
    }
    Ok(Decimal::ONE - fee)
}

/// `1 - fee` for a fee whose complement is used as a denominator
///
/// A fee of exactly one makes the denominator vanish and is reported as a division by
/// zero; other values outside `[0, 1)` are invalid input.
pub(crate) fn fee_divisor(
    name: &'static str,
    fee: Decimal,
    operation: &'static str,
) -> Result<Decimal> {
    if fee == Decimal::ONE {
        debug!(name, operation, "fee of one zeroes the denominator");
        return Err(PricingError::DivisionByZero { operation });
    }
    fee_complement(name, fee)
}

pub(crate) fn ensure_unit_ratio(name: &'static str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        debug!(name, %value, "rejecting ratio outside [0, 1]");
        return Err(PricingError::InvalidRatio { name, value });
    }
    Ok(())
}
