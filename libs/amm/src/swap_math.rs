//! Weighted pool swap math
//!
//! Closed-form solutions of the weighted product invariant
//! `balance_in^weight_in * balance_out^weight_out = k` for a single swap, with the
//! swap fee taken from the input side before the trade crosses the curve.

use crate::decimal_math::{add, decimal_pow, div, mul, sub};
use crate::error::{PricingError, Result};
use crate::validation::{
    ensure_non_negative_amount, ensure_positive_balance, ensure_positive_weight,
    fee_complement, fee_divisor,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Amount produced by a swap formula together with the fee it retained
///
/// For [`SwapMath::calc_out_given_in`] `amount` is the output and `fee_amount` the part of
/// the input kept by the pool; for [`SwapMath::calc_in_given_out`] `amount` is the
/// required input, fee included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    pub amount: Decimal,
    pub fee_amount: Decimal,
}

/// Swap formulas for weighted pools
pub struct SwapMath;

impl SwapMath {
    /// Marginal price of `token_in` denominated in `token_out`
    ///
    /// ```text
    ///        ( b_in / w_in )        1
    /// sp =  ----------------- * ---------
    ///        ( b_out / w_out )   1 - fee
    /// ```
    pub fn calc_spot_price(
        balance_in: Decimal,
        weight_in: Decimal,
        balance_out: Decimal,
        weight_out: Decimal,
        swap_fee: Decimal,
    ) -> Result<Decimal> {
        const OP: &str = "calc_spot_price";

        ensure_positive_balance("balance_in", balance_in)?;
        ensure_positive_weight("weight_in", weight_in)?;
        ensure_positive_balance("balance_out", balance_out)?;
        ensure_positive_weight("weight_out", weight_out)?;
        let fee_scale = fee_divisor("swap_fee", swap_fee, OP)?;

        let numer = div(balance_in, weight_in, OP)?;
        let denom = div(balance_out, weight_out, OP)?;
        let ratio = div(numer, denom, OP)?;
        let spot_price = div(ratio, fee_scale, OP)?;

        trace!(%spot_price, "calculated spot price");
        Ok(spot_price)
    }

    /// Output amount for a given input amount
    ///
    /// ```text
    /// adjusted_in = a_in * (1 - fee)
    /// a_out = b_out * (1 - (b_in / (b_in + adjusted_in)) ^ (w_in / w_out))
    /// ```
    ///
    /// The output is always strictly smaller than `balance_out`; a trade whose output
    /// would round up to the whole reserve fails with [`PricingError::Underflow`].
    pub fn calc_out_given_in(
        balance_in: Decimal,
        weight_in: Decimal,
        balance_out: Decimal,
        weight_out: Decimal,
        amount_in: Decimal,
        swap_fee: Decimal,
    ) -> Result<SwapResult> {
        const OP: &str = "calc_out_given_in";

        ensure_positive_balance("balance_in", balance_in)?;
        ensure_positive_weight("weight_in", weight_in)?;
        ensure_positive_balance("balance_out", balance_out)?;
        ensure_positive_weight("weight_out", weight_out)?;
        ensure_non_negative_amount("amount_in", amount_in)?;
        let fee_multiplier = fee_complement("swap_fee", swap_fee)?;

        let weight_ratio = div(weight_in, weight_out, OP)?;
        let adjusted_in = mul(amount_in, fee_multiplier, OP)?;
        let y = div(balance_in, add(balance_in, adjusted_in, OP)?, OP)?;
        let remaining = decimal_pow(y, weight_ratio)?;
        let amount_out = mul(balance_out, Decimal::ONE - remaining, OP)?;
        if amount_out >= balance_out {
            // y^(w_in/w_out) rounded below 28-digit resolution
            debug!(%remaining, %balance_out, "output rounds up to the full reserve");
            return Err(PricingError::Underflow { operation: OP });
        }
        let fee_amount = amount_in - adjusted_in;

        trace!(%amount_in, %amount_out, %fee_amount, "calculated out given in");
        Ok(SwapResult {
            amount: amount_out,
            fee_amount,
        })
    }

    /// Input amount, fee included, required to receive a given output amount
    ///
    /// ```text
    /// pre_fee = b_in * ((b_out / (b_out - a_out)) ^ (w_out / w_in) - 1)
    /// a_in = pre_fee / (1 - fee)
    /// ```
    pub fn calc_in_given_out(
        balance_in: Decimal,
        weight_in: Decimal,
        balance_out: Decimal,
        weight_out: Decimal,
        amount_out: Decimal,
        swap_fee: Decimal,
    ) -> Result<SwapResult> {
        const OP: &str = "calc_in_given_out";

        ensure_positive_balance("balance_in", balance_in)?;
        ensure_positive_weight("weight_in", weight_in)?;
        ensure_positive_balance("balance_out", balance_out)?;
        ensure_positive_weight("weight_out", weight_out)?;
        ensure_non_negative_amount("amount_out", amount_out)?;
        let fee_scale = fee_divisor("swap_fee", swap_fee, OP)?;

        if amount_out >= balance_out {
            debug!(%amount_out, %balance_out, "output would deplete reserve");
            return Err(PricingError::InsufficientBalance {
                requested: amount_out,
                available: balance_out,
                context: OP,
            });
        }

        let weight_ratio = div(weight_out, weight_in, OP)?;
        let diff = sub(balance_out, amount_out, OP)?;
        let y = div(balance_out, diff, OP)?;
        let growth = decimal_pow(y, weight_ratio)?;
        let pre_fee_in = mul(balance_in, growth - Decimal::ONE, OP)?;
        let amount_in = div(pre_fee_in, fee_scale, OP)?;
        let fee_amount = amount_in - pre_fee_in;

        trace!(%amount_out, %amount_in, %fee_amount, "calculated in given out");
        Ok(SwapResult {
            amount: amount_in,
            fee_amount,
        })
    }
}
