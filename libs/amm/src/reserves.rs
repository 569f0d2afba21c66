//! Protocol reserve share of collected fees
//!
//! Two split policies exist side by side: a configurable ratio and the older fixed
//! 50/50 split. Both are exposed through [`ReserveSplit`] so a comparison harness can
//! pick whichever one the implementation under test uses.

use crate::decimal_math::{div, mul, sub};
use crate::error::{PricingError, Result};
use crate::validation::{ensure_non_negative_amount, ensure_unit_ratio};
use pricing_config::defaults::reserves::{FIXED_HALF_POLICY, RATIO_POLICY};
use pricing_config::ReserveConfig;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fee split policy between liquidity providers and protocol reserves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "ratio", rename_all = "snake_case")]
pub enum ReserveSplit {
    /// Reserves keep `ratio` of the fee, `ratio` in [0, 1]
    Ratio(Decimal),
    /// Reserves keep half of the fee
    FixedHalf,
}

impl ReserveSplit {
    /// Reserve share of the fee implied by an amount with and without fee
    pub fn reserve_share(
        &self,
        amount_with_fee: Decimal,
        amount_without_fee: Decimal,
    ) -> Result<Decimal> {
        match self {
            Self::Ratio(ratio) => {
                ReserveMath::calc_reserves(amount_with_fee, amount_without_fee, *ratio)
            }
            Self::FixedHalf => {
                ReserveMath::calc_reserves_fixed_half(amount_with_fee, amount_without_fee)
            }
        }
    }

    /// Reserve share of an already separated fee amount
    pub fn reserve_share_of_fee(&self, fee: Decimal) -> Result<Decimal> {
        match self {
            Self::Ratio(ratio) => ReserveMath::calc_reserves_from_fee(fee, *ratio),
            Self::FixedHalf => ReserveMath::calc_reserves_from_fee(fee, Decimal::new(5, 1)),
        }
    }
}

impl TryFrom<&ReserveConfig> for ReserveSplit {
    type Error = PricingError;

    fn try_from(config: &ReserveConfig) -> Result<Self> {
        match (config.policy.as_str(), config.ratio) {
            (RATIO_POLICY, Some(ratio)) => {
                ensure_unit_ratio("reserves_ratio", ratio)?;
                Ok(Self::Ratio(ratio))
            }
            (FIXED_HALF_POLICY, _) => Ok(Self::FixedHalf),
            (_, ratio) => Err(PricingError::InvalidRatio {
                name: "reserves_ratio",
                value: ratio.unwrap_or_default(),
            }),
        }
    }
}

/// Reserve accounting formulas
pub struct ReserveMath;

impl ReserveMath {
    /// `(amount_with_fee - amount_without_fee) * reserves_ratio`
    pub fn calc_reserves(
        amount_with_fee: Decimal,
        amount_without_fee: Decimal,
        reserves_ratio: Decimal,
    ) -> Result<Decimal> {
        ensure_unit_ratio("reserves_ratio", reserves_ratio)?;
        let fee = Self::fee_portion(amount_with_fee, amount_without_fee)?;
        mul(fee, reserves_ratio, "calc_reserves")
    }

    /// `(amount_with_fee - amount_without_fee) / 2`
    pub fn calc_reserves_fixed_half(
        amount_with_fee: Decimal,
        amount_without_fee: Decimal,
    ) -> Result<Decimal> {
        let fee = Self::fee_portion(amount_with_fee, amount_without_fee)?;
        div(fee, Decimal::TWO, "calc_reserves_fixed_half")
    }

    /// `fee * reserves_ratio`
    pub fn calc_reserves_from_fee(fee: Decimal, reserves_ratio: Decimal) -> Result<Decimal> {
        ensure_non_negative_amount("fee", fee)?;
        ensure_unit_ratio("reserves_ratio", reserves_ratio)?;
        mul(fee, reserves_ratio, "calc_reserves_from_fee")
    }

    fn fee_portion(amount_with_fee: Decimal, amount_without_fee: Decimal) -> Result<Decimal> {
        ensure_non_negative_amount("amount_without_fee", amount_without_fee)?;
        if amount_with_fee < amount_without_fee {
            debug!(%amount_with_fee, %amount_without_fee, "fee-inclusive amount below fee-exclusive amount");
            return Err(PricingError::InvalidAmount {
                name: "amount_with_fee",
                value: amount_with_fee,
                reason: "must not be less than amount_without_fee",
            });
        }
        sub(amount_with_fee, amount_without_fee, "fee_portion")
    }
}
