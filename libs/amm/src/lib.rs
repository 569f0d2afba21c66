//! # Weighted AMM Pricing Engine
//!
//! ## Purpose
//!
//! Reference implementation of the pricing formulas of a weighted constant-value
//! automated market maker, where the pool keeps `prod(balance_i ^ weight_i)` constant
//! across swaps (up to fees). Every formula is evaluated with `Decimal` arithmetic so
//! the results can validate a fixed-point integer implementation of the same math by
//! relative-error comparison.
//!
//! ## Formulas
//!
//! - **Swaps** ([`SwapMath`]): spot price, out-given-in, in-given-out
//! - **Single-asset joins/exits** ([`LiquidityMath`]): pool tokens minted or burned
//!   for a one-token deposit or withdrawal, and the inverses
//! - **Reserves** ([`ReserveMath`], [`ReserveSplit`]): protocol share of collected fees
//! - **Invariant** ([`InvariantMath`]): weighted geometric mean and proportional
//!   joins/exits
//! - **Comparison** ([`ToleranceProfile`], [`calc_relative_diff`]): relative-error
//!   checks against an implementation under test
//!
//! ## Integration Points
//!
//! - **Input Sources**: pool balances, weights and fees supplied by a comparison harness
//! - **Output Destinations**: the harness asserting agreement within per-formula tolerances
//! - **Configuration**: tolerances and reserve policy from `pricing-config`
//! - **Precision**: 28 fractional digits, no floating point anywhere in the engine
//!
//! ## Error Model
//!
//! All formulas return [`Result`] with a [`PricingError`]. Invalid domain input
//! (non-positive balances, fees outside `[0, 1)`, withdrawals that would deplete a
//! reserve) is kept distinct from arithmetic singularities (division by zero,
//! overflow) through [`PricingError::kind`].
//!
//! ## Example
//!
//! ```rust
//! use weighted_amm::{dec, SwapMath};
//!
//! let swap = SwapMath::calc_out_given_in(
//!     dec!(100), dec!(2), dec!(50), dec!(1), dec!(10), dec!(0.01),
//! )
//! .unwrap();
//! assert_eq!(swap.fee_amount, dec!(0.1));
//! assert!(swap.amount < dec!(50));
//! ```

pub mod comparison;
pub mod decimal_math;
pub mod error;
pub mod invariant;
pub mod liquidity_math;
pub mod pool_traits;
pub mod reserves;
pub mod swap_math;

mod validation;

pub use comparison::{calc_relative_diff, ComparisonOutcome, Formula, ToleranceProfile};
pub use decimal_math::{decimal_exp, decimal_ln, decimal_pow, decimal_powi};
pub use error::{ErrorKind, PricingError, Result};
pub use invariant::InvariantMath;
pub use liquidity_math::LiquidityMath;
pub use pool_traits::{LiquidityPool, PricingPool, SingleAssetPool, TokenState, WeightedPair};
pub use reserves::{ReserveMath, ReserveSplit};
pub use swap_math::{SwapMath, SwapResult};

/// Common types for pricing calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
