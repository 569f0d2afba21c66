//! # Pricing Engine Configuration
//!
//! Centralized configuration for the weighted AMM pricing engine and the tools that
//! compare it against fixed-point implementations.
//!
//! ## Features
//!
//! - **Tolerances**: per-formula relative tolerance bounds
//! - **Reserve Policy**: which fee split the implementation under test uses
//! - **Overrides**: TOML file plus `AMM_` environment variables
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pricing_config::load_config;
//!
//! let config = load_config(None).unwrap();
//! let swap_tolerance = config.tolerances.out_given_in;
//! ```

pub mod defaults;
pub mod pricing_config;

// Re-export commonly used types
pub use pricing_config::{load_config, LoggingConfig, PricingConfig, ReserveConfig, ToleranceConfig};
