//! Pool views over the stateless formulas
//!
//! The formulas take every parameter explicitly. These value types bundle the
//! parameters of one pool so callers can evaluate several formulas against the same
//! reserve state.

use crate::error::Result;
use crate::liquidity_math::LiquidityMath;
use crate::swap_math::{SwapMath, SwapResult};
use crate::validation::{ensure_non_negative_balance, ensure_positive_weight};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance and weight of one token in a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenState {
    pub balance: Decimal,
    pub weight: Decimal,
}

impl TokenState {
    pub fn new(balance: Decimal, weight: Decimal) -> Result<Self> {
        ensure_non_negative_balance("balance", balance)?;
        ensure_positive_weight("weight", weight)?;
        Ok(Self { balance, weight })
    }
}

/// Swap interface for a directed token pair
pub trait PricingPool {
    /// Marginal price of the input token in units of the output token
    fn spot_price(&self) -> Result<Decimal>;

    /// Output amount and fee for a given input
    fn amount_out(&self, amount_in: Decimal) -> Result<SwapResult>;

    /// Input amount, fee included, for a desired output
    fn amount_in(&self, amount_out: Decimal) -> Result<SwapResult>;

    /// Current reserves (in, out)
    fn reserves(&self) -> (Decimal, Decimal);

    /// Swap fee as a fraction
    fn swap_fee(&self) -> Decimal;
}

/// Single-asset join/exit interface for one token of a pool
pub trait LiquidityPool {
    /// Pool tokens minted for depositing `amount_in`
    fn pool_out_given_single_in(&self, amount_in: Decimal) -> Result<Decimal>;

    /// Deposit required to mint `pool_amount_out`
    fn single_in_given_pool_out(&self, pool_amount_out: Decimal) -> Result<Decimal>;

    /// Withdrawal received for burning `pool_amount_in`
    fn single_out_given_pool_in(&self, pool_amount_in: Decimal) -> Result<Decimal>;

    /// Pool tokens burned to withdraw `amount_out`
    fn pool_in_given_single_out(&self, amount_out: Decimal) -> Result<Decimal>;
}

/// Two tokens of a weighted pool, in swap direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedPair {
    pub token_in: TokenState,
    pub token_out: TokenState,
    pub swap_fee: Decimal,
}

impl WeightedPair {
    pub fn new(token_in: TokenState, token_out: TokenState, swap_fee: Decimal) -> Self {
        Self {
            token_in,
            token_out,
            swap_fee,
        }
    }

    /// The same pair traded in the opposite direction
    pub fn reversed(&self) -> Self {
        Self {
            token_in: self.token_out,
            token_out: self.token_in,
            swap_fee: self.swap_fee,
        }
    }
}

impl PricingPool for WeightedPair {
    fn spot_price(&self) -> Result<Decimal> {
        SwapMath::calc_spot_price(
            self.token_in.balance,
            self.token_in.weight,
            self.token_out.balance,
            self.token_out.weight,
            self.swap_fee,
        )
    }

    fn amount_out(&self, amount_in: Decimal) -> Result<SwapResult> {
        SwapMath::calc_out_given_in(
            self.token_in.balance,
            self.token_in.weight,
            self.token_out.balance,
            self.token_out.weight,
            amount_in,
            self.swap_fee,
        )
    }

    fn amount_in(&self, amount_out: Decimal) -> Result<SwapResult> {
        SwapMath::calc_in_given_out(
            self.token_in.balance,
            self.token_in.weight,
            self.token_out.balance,
            self.token_out.weight,
            amount_out,
            self.swap_fee,
        )
    }

    fn reserves(&self) -> (Decimal, Decimal) {
        (self.token_in.balance, self.token_out.balance)
    }

    fn swap_fee(&self) -> Decimal {
        self.swap_fee
    }
}

/// One token of a weighted pool together with the pool-wide parameters joins and
/// exits depend on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleAssetPool {
    pub token: TokenState,
    pub pool_supply: Decimal,
    pub total_weight: Decimal,
    pub swap_fee: Decimal,
    pub exit_fee: Decimal,
}

impl LiquidityPool for SingleAssetPool {
    fn pool_out_given_single_in(&self, amount_in: Decimal) -> Result<Decimal> {
        LiquidityMath::calc_pool_out_given_single_in(
            self.token.balance,
            self.token.weight,
            self.pool_supply,
            self.total_weight,
            amount_in,
            self.swap_fee,
        )
    }

    fn single_in_given_pool_out(&self, pool_amount_out: Decimal) -> Result<Decimal> {
        LiquidityMath::calc_single_in_given_pool_out(
            self.token.balance,
            self.token.weight,
            self.pool_supply,
            self.total_weight,
            pool_amount_out,
            self.swap_fee,
        )
    }

    fn single_out_given_pool_in(&self, pool_amount_in: Decimal) -> Result<Decimal> {
        LiquidityMath::calc_single_out_given_pool_in(
            self.token.balance,
            self.token.weight,
            self.pool_supply,
            self.total_weight,
            pool_amount_in,
            self.swap_fee,
            self.exit_fee,
        )
    }

    fn pool_in_given_single_out(&self, amount_out: Decimal) -> Result<Decimal> {
        LiquidityMath::calc_pool_in_given_single_out(
            self.token.balance,
            self.token.weight,
            self.pool_supply,
            self.total_weight,
            amount_out,
            self.swap_fee,
            self.exit_fee,
        )
    }
}
