//! Relative-error comparison against fixed-point implementations
//!
//! The reference engine is used to validate integer implementations of the same
//! formulas. A comparison that exceeds its tolerance is reported as an outcome, not as
//! an engine error.

use crate::decimal_math::{div, sub};
use crate::error::Result;
use pricing_config::{PricingConfig, ToleranceConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// `|(expected - actual) / expected|`
pub fn calc_relative_diff(expected: Decimal, actual: Decimal) -> Result<Decimal> {
    const OP: &str = "calc_relative_diff";
    let diff = sub(expected, actual, OP)?;
    Ok(div(diff, expected, OP)?.abs())
}

/// Formulas that can be compared against a fixed-point implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    SpotPrice,
    OutGivenIn,
    InGivenOut,
    PoolOutGivenSingleIn,
    SingleInGivenPoolOut,
    SingleOutGivenPoolIn,
    PoolInGivenSingleOut,
    Reserves,
}

impl Formula {
    pub const ALL: [Formula; 8] = [
        Formula::SpotPrice,
        Formula::OutGivenIn,
        Formula::InGivenOut,
        Formula::PoolOutGivenSingleIn,
        Formula::SingleInGivenPoolOut,
        Formula::SingleOutGivenPoolIn,
        Formula::PoolInGivenSingleOut,
        Formula::Reserves,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::SpotPrice => "spot_price",
            Self::OutGivenIn => "out_given_in",
            Self::InGivenOut => "in_given_out",
            Self::PoolOutGivenSingleIn => "pool_out_given_single_in",
            Self::SingleInGivenPoolOut => "single_in_given_pool_out",
            Self::SingleOutGivenPoolIn => "single_out_given_pool_in",
            Self::PoolInGivenSingleOut => "pool_in_given_single_out",
            Self::Reserves => "reserves",
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of comparing a reference value with an implementation's value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub formula: Formula,
    pub expected: Decimal,
    pub actual: Decimal,
    pub relative_diff: Decimal,
    pub tolerance: Decimal,
    pub within_tolerance: bool,
}

/// Relative tolerance per formula
#[derive(Debug, Clone, PartialEq)]
pub struct ToleranceProfile {
    tolerances: ToleranceConfig,
}

impl Default for ToleranceProfile {
    fn default() -> Self {
        Self::from_config(&ToleranceConfig::default())
    }
}

impl From<&PricingConfig> for ToleranceProfile {
    fn from(config: &PricingConfig) -> Self {
        Self::from_config(&config.tolerances)
    }
}

impl ToleranceProfile {
    pub fn from_config(tolerances: &ToleranceConfig) -> Self {
        Self {
            tolerances: tolerances.clone(),
        }
    }

    /// Relative tolerance configured for a formula
    pub fn tolerance_for(&self, formula: Formula) -> Decimal {
        let t = &self.tolerances;
        match formula {
            Formula::SpotPrice => t.spot_price,
            Formula::OutGivenIn => t.out_given_in,
            Formula::InGivenOut => t.in_given_out,
            Formula::PoolOutGivenSingleIn => t.pool_out_given_single_in,
            Formula::SingleInGivenPoolOut => t.single_in_given_pool_out,
            Formula::SingleOutGivenPoolIn => t.single_out_given_pool_in,
            Formula::PoolInGivenSingleOut => t.pool_in_given_single_out,
            Formula::Reserves => t.reserves,
        }
    }

    /// Compare an implementation's result with the reference value
    ///
    /// Two zero values are considered equal; a zero reference with a non-zero actual
    /// has no defined relative difference and fails as a division by zero.
    pub fn check(
        &self,
        formula: Formula,
        expected: Decimal,
        actual: Decimal,
    ) -> Result<ComparisonOutcome> {
        let relative_diff = if expected.is_zero() && actual.is_zero() {
            Decimal::ZERO
        } else {
            calc_relative_diff(expected, actual)?
        };
        let tolerance = self.tolerance_for(formula);
        let within_tolerance = relative_diff < tolerance;

        if within_tolerance {
            debug!(%formula, %relative_diff, %tolerance, "comparison within tolerance");
        } else {
            warn!(%formula, %expected, %actual, %relative_diff, %tolerance, "comparison exceeds tolerance");
        }

        Ok(ComparisonOutcome {
            formula,
            expected,
            actual,
            relative_diff,
            tolerance,
            within_tolerance,
        })
    }
}
