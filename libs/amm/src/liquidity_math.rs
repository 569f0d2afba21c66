//! Single-asset join and exit math
//!
//! Depositing or withdrawing one token changes the pool's composition, so the portion
//! of the trade that implicitly swaps against the other tokens pays the swap fee:
//! `(1 - normalized_weight) * swap_fee`. Exits additionally pay the exit fee on the
//! pool tokens burned.

use crate::decimal_math::{add, decimal_pow, div, mul, sub};
use crate::error::{PricingError, Result};
use crate::validation::{
    ensure_non_negative_amount, ensure_positive_balance, fee_complement, fee_divisor,
    normalized_weight,
};
use rust_decimal::Decimal;
use tracing::{debug, trace};

/// Pool token mint/burn formulas for single-asset joins and exits
pub struct LiquidityMath;

impl LiquidityMath {
    /// Pool tokens minted for a single-asset deposit
    ///
    /// ```text
    /// nw = w_in / w_total
    /// a_in_after_fee = a_in * (1 - (1 - nw) * fee)
    /// p_out = p_supply * ((b_in + a_in_after_fee) / b_in) ^ nw - p_supply
    /// ```
    pub fn calc_pool_out_given_single_in(
        balance_in: Decimal,
        weight_in: Decimal,
        pool_supply: Decimal,
        total_weight: Decimal,
        amount_in: Decimal,
        swap_fee: Decimal,
    ) -> Result<Decimal> {
        const OP: &str = "calc_pool_out_given_single_in";

        ensure_positive_balance("balance_in", balance_in)?;
        ensure_positive_balance("pool_supply", pool_supply)?;
        ensure_non_negative_amount("amount_in", amount_in)?;
        let nw = normalized_weight(weight_in, total_weight)?;
        fee_complement("swap_fee", swap_fee)?;

        let effective_fee = mul(Decimal::ONE - nw, swap_fee, OP)?;
        let amount_in_after_fee = mul(amount_in, Decimal::ONE - effective_fee, OP)?;
        let new_balance_in = add(balance_in, amount_in_after_fee, OP)?;
        let token_in_ratio = div(new_balance_in, balance_in, OP)?;
        let pool_ratio = decimal_pow(token_in_ratio, nw)?;
        let new_pool_supply = mul(pool_ratio, pool_supply, OP)?;
        let pool_amount_out = sub(new_pool_supply, pool_supply, OP)?;

        trace!(%amount_in, %pool_amount_out, "calculated pool out given single in");
        Ok(pool_amount_out)
    }

    /// Single-asset deposit required to mint a given amount of pool tokens
    ///
    /// ```text
    /// token_in_ratio = ((p_supply + p_out) / p_supply) ^ (1 / nw)
    /// a_in = (token_in_ratio * b_in - b_in) / (1 - (1 - nw) * fee)
    /// ```
    pub fn calc_single_in_given_pool_out(
        balance_in: Decimal,
        weight_in: Decimal,
        pool_supply: Decimal,
        total_weight: Decimal,
        pool_amount_out: Decimal,
        swap_fee: Decimal,
    ) -> Result<Decimal> {
        const OP: &str = "calc_single_in_given_pool_out";

        ensure_positive_balance("balance_in", balance_in)?;
        ensure_positive_balance("pool_supply", pool_supply)?;
        ensure_non_negative_amount("pool_amount_out", pool_amount_out)?;
        let nw = normalized_weight(weight_in, total_weight)?;
        fee_complement("swap_fee", swap_fee)?;

        let new_pool_supply = add(pool_supply, pool_amount_out, OP)?;
        let pool_ratio = div(new_pool_supply, pool_supply, OP)?;
        let exponent = div(Decimal::ONE, nw, OP)?;
        let token_in_ratio = decimal_pow(pool_ratio, exponent)?;
        let new_balance_in = mul(token_in_ratio, balance_in, OP)?;
        let amount_in_after_fee = sub(new_balance_in, balance_in, OP)?;
        let effective_fee = mul(Decimal::ONE - nw, swap_fee, OP)?;
        let amount_in = div(amount_in_after_fee, Decimal::ONE - effective_fee, OP)?;

        trace!(%pool_amount_out, %amount_in, "calculated single in given pool out");
        Ok(amount_in)
    }

    /// Single-asset withdrawal received for burning a given amount of pool tokens
    ///
    /// ```text
    /// p_in_after_exit_fee = p_in * (1 - exit_fee)
    /// token_out_ratio = ((p_supply - p_in_after_exit_fee) / p_supply) ^ (1 / nw)
    /// a_out = (b_out - token_out_ratio * b_out) * (1 - (1 - nw) * fee)
    /// ```
    pub fn calc_single_out_given_pool_in(
        balance_out: Decimal,
        weight_out: Decimal,
        pool_supply: Decimal,
        total_weight: Decimal,
        pool_amount_in: Decimal,
        swap_fee: Decimal,
        exit_fee: Decimal,
    ) -> Result<Decimal> {
        const OP: &str = "calc_single_out_given_pool_in";

        ensure_positive_balance("balance_out", balance_out)?;
        ensure_positive_balance("pool_supply", pool_supply)?;
        ensure_non_negative_amount("pool_amount_in", pool_amount_in)?;
        let nw = normalized_weight(weight_out, total_weight)?;
        fee_complement("swap_fee", swap_fee)?;
        let exit_multiplier = fee_complement("exit_fee", exit_fee)?;

        let pool_in_after_exit_fee = mul(pool_amount_in, exit_multiplier, OP)?;
        if pool_in_after_exit_fee >= pool_supply {
            debug!(%pool_in_after_exit_fee, %pool_supply, "burn would exhaust pool supply");
            return Err(PricingError::InsufficientBalance {
                requested: pool_in_after_exit_fee,
                available: pool_supply,
                context: OP,
            });
        }

        let new_pool_supply = sub(pool_supply, pool_in_after_exit_fee, OP)?;
        let pool_ratio = div(new_pool_supply, pool_supply, OP)?;
        let exponent = div(Decimal::ONE, nw, OP)?;
        let token_out_ratio = decimal_pow(pool_ratio, exponent)?;
        let new_balance_out = mul(token_out_ratio, balance_out, OP)?;
        let before_swap_fee = sub(balance_out, new_balance_out, OP)?;
        if before_swap_fee >= balance_out {
            debug!(%token_out_ratio, %balance_out, "burn would withdraw the entire reserve");
            return Err(PricingError::InsufficientBalance {
                requested: before_swap_fee,
                available: balance_out,
                context: OP,
            });
        }
        let effective_fee = mul(Decimal::ONE - nw, swap_fee, OP)?;
        let amount_out = mul(before_swap_fee, Decimal::ONE - effective_fee, OP)?;

        trace!(%pool_amount_in, %amount_out, "calculated single out given pool in");
        Ok(amount_out)
    }

    /// Pool tokens that must be burned, exit fee included, to withdraw a given amount
    ///
    /// ```text
    /// before_swap_fee = a_out / (1 - (1 - nw) * fee)
    /// new_p_supply = ((b_out - before_swap_fee) / b_out) ^ nw * p_supply
    /// p_in = (p_supply - new_p_supply) / (1 - exit_fee)
    /// ```
    pub fn calc_pool_in_given_single_out(
        balance_out: Decimal,
        weight_out: Decimal,
        pool_supply: Decimal,
        total_weight: Decimal,
        amount_out: Decimal,
        swap_fee: Decimal,
        exit_fee: Decimal,
    ) -> Result<Decimal> {
        const OP: &str = "calc_pool_in_given_single_out";

        ensure_positive_balance("balance_out", balance_out)?;
        ensure_positive_balance("pool_supply", pool_supply)?;
        ensure_non_negative_amount("amount_out", amount_out)?;
        let nw = normalized_weight(weight_out, total_weight)?;
        fee_complement("swap_fee", swap_fee)?;
        let exit_scale = fee_divisor("exit_fee", exit_fee, OP)?;

        let effective_fee = mul(Decimal::ONE - nw, swap_fee, OP)?;
        let before_swap_fee = div(amount_out, Decimal::ONE - effective_fee, OP)?;
        if before_swap_fee >= balance_out {
            debug!(%before_swap_fee, %balance_out, "withdrawal would deplete reserve");
            return Err(PricingError::InsufficientBalance {
                requested: before_swap_fee,
                available: balance_out,
                context: OP,
            });
        }

        let new_balance_out = sub(balance_out, before_swap_fee, OP)?;
        let token_out_ratio = div(new_balance_out, balance_out, OP)?;
        let pool_ratio = decimal_pow(token_out_ratio, nw)?;
        let new_pool_supply = mul(pool_ratio, pool_supply, OP)?;
        let pool_in_after_exit_fee = sub(pool_supply, new_pool_supply, OP)?;
        let pool_amount_in = div(pool_in_after_exit_fee, exit_scale, OP)?;

        trace!(%amount_out, %pool_amount_in, "calculated pool in given single out");
        Ok(pool_amount_in)
    }
}
