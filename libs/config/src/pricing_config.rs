//! Pricing Configuration Module
//!
//! Loads comparison tolerances and the reserve split policy from a TOML file, layered
//! over built-in defaults and overridden by `AMM_` environment variables.

use crate::defaults::{environment, reserves, tolerances};
use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// Main pricing configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PricingConfig {
    /// Per-formula relative tolerances
    #[serde(default)]
    pub tolerances: ToleranceConfig,

    /// Protocol reserve split policy
    #[serde(default)]
    pub reserves: ReserveConfig,

    /// Logging settings for binaries
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Relative tolerance for each comparable formula
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ToleranceConfig {
    pub spot_price: Decimal,
    pub out_given_in: Decimal,
    pub in_given_out: Decimal,
    pub pool_out_given_single_in: Decimal,
    pub single_in_given_pool_out: Decimal,
    pub single_out_given_pool_in: Decimal,
    pub pool_in_given_single_out: Decimal,
    pub reserves: Decimal,
}

/// Reserve split settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ReserveConfig {
    /// "ratio" or "fixed_half"
    pub policy: String,
    /// Share of fees kept as reserves, required by the "ratio" policy
    pub ratio: Option<Decimal>,
}

/// Logging settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            spot_price: tolerances::SPOT_PRICE,
            out_given_in: tolerances::SWAP,
            in_given_out: tolerances::SWAP,
            pool_out_given_single_in: tolerances::SINGLE_ASSET,
            single_in_given_pool_out: tolerances::SINGLE_ASSET,
            single_out_given_pool_in: tolerances::SINGLE_ASSET,
            pool_in_given_single_out: tolerances::SINGLE_ASSET,
            reserves: tolerances::RESERVES,
        }
    }
}

impl Default for ReserveConfig {
    fn default() -> Self {
        Self {
            policy: reserves::DEFAULT_POLICY.to_string(),
            ratio: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: environment::DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl ToleranceConfig {
    fn entries(&self) -> [(&'static str, Decimal); 8] {
        [
            ("spot_price", self.spot_price),
            ("out_given_in", self.out_given_in),
            ("in_given_out", self.in_given_out),
            ("pool_out_given_single_in", self.pool_out_given_single_in),
            ("single_in_given_pool_out", self.single_in_given_pool_out),
            ("single_out_given_pool_in", self.single_out_given_pool_in),
            ("pool_in_given_single_out", self.pool_in_given_single_out),
            ("reserves", self.reserves),
        ]
    }
}

impl PricingConfig {
    /// Load configuration from an optional TOML file with environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Config::try_from(&PricingConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        if let Some(path) = path {
            info!("Loading pricing config: {:?}", path);
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix(environment::ENV_PREFIX)
                .prefix_separator("_")
                .separator(environment::ENV_SEPARATOR)
                .try_parsing(true),
        );

        let config: PricingConfig = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(?config, "pricing configuration loaded");
        Ok(config)
    }

    /// Check tolerances are positive and the reserve policy is complete
    pub fn validate(&self) -> Result<()> {
        for (name, tolerance) in self.tolerances.entries() {
            if tolerance <= Decimal::ZERO {
                bail!("Tolerance for {} must be positive, got {}", name, tolerance);
            }
        }

        match self.reserves.policy.as_str() {
            reserves::RATIO_POLICY => match self.reserves.ratio {
                Some(ratio) if ratio >= Decimal::ZERO && ratio <= Decimal::ONE => {}
                Some(ratio) => bail!("Reserve ratio must be in [0, 1], got {}", ratio),
                None => bail!("Reserve policy \"ratio\" requires reserves.ratio"),
            },
            reserves::FIXED_HALF_POLICY => {}
            other => bail!("Unknown reserve policy: {}", other),
        }

        Ok(())
    }

    /// Render the configuration as TOML, e.g. to seed a config file
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to render configuration as TOML")
    }
}

/// Convenience function to load configuration from an optional file
pub fn load_config(path: Option<&Path>) -> Result<PricingConfig> {
    PricingConfig::load(path)
}
