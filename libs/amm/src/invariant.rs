//! Pool invariant and proportional (all-asset) joins and exits

use crate::decimal_math::{add, decimal_pow, div, mul};
use crate::error::{PricingError, Result};
use crate::validation::{
    ensure_non_negative_amount, ensure_non_negative_balance, ensure_positive_balance,
    ensure_positive_weight, fee_complement,
};
use rust_decimal::Decimal;
use tracing::trace;

/// Invariant and proportional liquidity formulas
pub struct InvariantMath;

impl InvariantMath {
    /// Weighted geometric mean `prod(b_i ^ (w_i / sum(w)))`
    ///
    /// Swaps without fees leave this value unchanged; proportional joins and exits
    /// scale it by the same factor as the pool supply.
    pub fn calc_invariant(balances: &[Decimal], weights: &[Decimal]) -> Result<Decimal> {
        const OP: &str = "calc_invariant";

        if balances.is_empty() || balances.len() != weights.len() {
            return Err(PricingError::MismatchedInputs {
                left: "balances",
                left_len: balances.len(),
                right: "weights",
                right_len: weights.len(),
            });
        }

        let mut total_weight = Decimal::ZERO;
        for (&balance, &weight) in balances.iter().zip(weights) {
            ensure_positive_balance("balance", balance)?;
            ensure_positive_weight("weight", weight)?;
            total_weight = add(total_weight, weight, OP)?;
        }

        let mut invariant = Decimal::ONE;
        for (&balance, &weight) in balances.iter().zip(weights) {
            let normalized = div(weight, total_weight, OP)?;
            invariant = mul(invariant, decimal_pow(balance, normalized)?, OP)?;
        }

        trace!(%invariant, tokens = balances.len(), "calculated invariant");
        Ok(invariant)
    }

    /// Token amounts required to mint `pool_amount_out` pool tokens proportionally
    ///
    /// No swap fee applies since the pool composition does not change.
    pub fn calc_all_assets_in_given_pool_out(
        balances: &[Decimal],
        pool_supply: Decimal,
        pool_amount_out: Decimal,
    ) -> Result<Vec<Decimal>> {
        const OP: &str = "calc_all_assets_in_given_pool_out";

        ensure_positive_balance("pool_supply", pool_supply)?;
        ensure_non_negative_amount("pool_amount_out", pool_amount_out)?;
        let ratio = div(pool_amount_out, pool_supply, OP)?;

        balances
            .iter()
            .map(|&balance| {
                ensure_non_negative_balance("balance", balance)?;
                mul(balance, ratio, OP)
            })
            .collect()
    }

    /// Token amounts returned for burning `pool_amount_in` pool tokens proportionally
    ///
    /// The exit fee is withheld from the burned pool tokens before the ratio is taken.
    pub fn calc_all_assets_out_given_pool_in(
        balances: &[Decimal],
        pool_supply: Decimal,
        pool_amount_in: Decimal,
        exit_fee: Decimal,
    ) -> Result<Vec<Decimal>> {
        const OP: &str = "calc_all_assets_out_given_pool_in";

        ensure_positive_balance("pool_supply", pool_supply)?;
        ensure_non_negative_amount("pool_amount_in", pool_amount_in)?;
        let exit_multiplier = fee_complement("exit_fee", exit_fee)?;

        if pool_amount_in > pool_supply {
            return Err(PricingError::InsufficientBalance {
                requested: pool_amount_in,
                available: pool_supply,
                context: OP,
            });
        }

        let pool_in_after_exit_fee = mul(pool_amount_in, exit_multiplier, OP)?;
        let ratio = div(pool_in_after_exit_fee, pool_supply, OP)?;

        balances
            .iter()
            .map(|&balance| {
                ensure_non_negative_balance("balance", balance)?;
                mul(balance, ratio, OP)
            })
            .collect()
    }
}
