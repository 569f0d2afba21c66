//! Default tolerances and policies
//!
//! Relative tolerances used when comparing the reference engine against a
//! fixed-point implementation. Simple ratios are held tightest; formulas that chain a
//! fractional `pow` get the loosest bound.

/// Relative tolerance defaults per formula family
pub mod tolerances {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Spot price: a handful of divisions, no exponentiation
    pub const SPOT_PRICE: Decimal = dec!(0.000000000001);

    /// Swap formulas: one `pow` with a weight-ratio exponent
    pub const SWAP: Decimal = dec!(0.0000000001);

    /// Single-asset join/exit formulas: `pow` with a normalized-weight exponent
    /// (or its reciprocal) chained with fee corrections
    pub const SINGLE_ASSET: Decimal = dec!(0.00000001);

    /// Reserve split: one subtraction and one multiplication
    pub const RESERVES: Decimal = dec!(0.000000000001);
}

/// Reserve split defaults
pub mod reserves {
    /// Policy name for the configurable ratio split
    pub const RATIO_POLICY: &str = "ratio";

    /// Policy name for the legacy fixed 50/50 split
    pub const FIXED_HALF_POLICY: &str = "fixed_half";

    /// Default policy applied when none is configured
    pub const DEFAULT_POLICY: &str = FIXED_HALF_POLICY;
}

/// Environment override settings
pub mod environment {
    /// Prefix for environment overrides (`AMM_TOLERANCES__OUT_GIVEN_IN=0.000000001`)
    pub const ENV_PREFIX: &str = "AMM";

    /// Separator between nested keys in environment overrides
    pub const ENV_SEPARATOR: &str = "__";

    /// Default log filter for binaries
    pub const DEFAULT_LOG_LEVEL: &str = "info";
}
