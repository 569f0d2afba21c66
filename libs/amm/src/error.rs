//! Pricing errors for weighted pool formulas
//!
//! Two families are kept apart: invalid domain input (a caller supplied values the
//! formula is not defined for) and arithmetic singularities (a division by zero,
//! overflow or series failure inside the computation). Comparator harnesses usually
//! treat the first as an expected edge case and the second as a bug signal.

use rust_decimal::Decimal;
use thiserror::Error;

/// Broad classification of a [`PricingError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Inputs outside the domain of the formula
    InvalidDomain,
    /// Degenerate arithmetic encountered while evaluating a formula
    Arithmetic,
}

/// Errors reported by the pricing engine
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// Balance must be strictly positive (or non-negative where noted)
    #[error("Invalid balance for {name}: {value} (must be positive)")]
    InvalidBalance { name: &'static str, value: Decimal },

    /// Weight must be strictly positive and no larger than the total weight
    #[error("Invalid weight for {name}: {value} ({reason})")]
    InvalidWeight {
        name: &'static str,
        value: Decimal,
        reason: &'static str,
    },

    /// Fee outside the half-open interval [0, 1)
    #[error("Invalid fee for {name}: {value} (must be in [0, 1))")]
    InvalidFee { name: &'static str, value: Decimal },

    /// Trade or pool amount outside its valid range
    #[error("Invalid amount for {name}: {value} ({reason})")]
    InvalidAmount {
        name: &'static str,
        value: Decimal,
        reason: &'static str,
    },

    /// Requested withdrawal would deplete or exceed the available reserve
    #[error("Insufficient balance: requested {requested}, available {available} ({context})")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
        context: &'static str,
    },

    /// Ratio outside [0, 1]
    #[error("Invalid ratio for {name}: {value} (must be in [0, 1])")]
    InvalidRatio { name: &'static str, value: Decimal },

    /// Parallel input slices are empty or of differing lengths
    #[error("Mismatched inputs: {left} {left_len} vs {right} {right_len}")]
    MismatchedInputs {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },

    /// Denominator evaluated to zero
    #[error("Division by zero in {operation}")]
    DivisionByZero { operation: &'static str },

    /// Intermediate value exceeded the Decimal range
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },

    /// Result fell below the smallest representable Decimal step and rounded away
    #[error("Arithmetic underflow in {operation}")]
    Underflow { operation: &'static str },

    /// Series evaluation did not settle within its iteration budget
    #[error("Series did not converge in {operation} after {iterations} iterations")]
    NonConvergent {
        operation: &'static str,
        iterations: usize,
    },
}

impl PricingError {
    /// Classify the error as invalid input or arithmetic failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidBalance { .. }
            | Self::InvalidWeight { .. }
            | Self::InvalidFee { .. }
            | Self::InvalidAmount { .. }
            | Self::InsufficientBalance { .. }
            | Self::InvalidRatio { .. }
            | Self::MismatchedInputs { .. } => ErrorKind::InvalidDomain,
            Self::DivisionByZero { .. }
            | Self::Overflow { .. }
            | Self::Underflow { .. }
            | Self::NonConvergent { .. } => ErrorKind::Arithmetic,
        }
    }

    pub fn is_invalid_domain(&self) -> bool {
        self.kind() == ErrorKind::InvalidDomain
    }

    pub fn is_arithmetic(&self) -> bool {
        self.kind() == ErrorKind::Arithmetic
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
