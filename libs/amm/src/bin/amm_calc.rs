//! Command-line calculator for the weighted pool formulas
//!
//! Usage:
//!   amm-calc out-given-in --balance-in 100 --weight-in 2 --balance-out 50 \
//!       --weight-out 1 --amount 10 --swap-fee 0.01
//!   amm-calc --actual 8.6024518939 out-given-in ...
//!   amm-calc --config pricing.toml show-config
//!
//! Results are printed to stdout as JSON; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use pricing_config::{load_config, PricingConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use weighted_amm::{
    calc_relative_diff, ComparisonOutcome, Decimal, Formula, LiquidityMath, ReserveSplit, SwapMath,
    ToleranceProfile,
};

#[derive(Parser, Debug)]
#[command(name = "amm-calc")]
#[command(about = "Evaluate weighted AMM pricing formulas")]
#[command(version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter, overrides the configured level (trace, debug, info, warn, error)
    #[arg(short, long)]
    log_level: Option<String>,

    /// Enable JSON logging format
    #[arg(long)]
    json_logs: bool,

    /// Value produced by the implementation under test, compared against the result
    #[arg(long, global = true)]
    actual: Option<Decimal>,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug)]
struct SwapArgs {
    #[arg(long)]
    balance_in: Decimal,
    #[arg(long)]
    weight_in: Decimal,
    #[arg(long)]
    balance_out: Decimal,
    #[arg(long)]
    weight_out: Decimal,
    #[arg(long, default_value = "0")]
    swap_fee: Decimal,
}

#[derive(ClapArgs, Debug)]
struct PoolArgs {
    /// Balance of the token being deposited or withdrawn
    #[arg(long)]
    balance: Decimal,
    /// Weight of the token being deposited or withdrawn
    #[arg(long)]
    weight: Decimal,
    #[arg(long)]
    pool_supply: Decimal,
    #[arg(long)]
    total_weight: Decimal,
    #[arg(long, default_value = "0")]
    swap_fee: Decimal,
    #[arg(long, default_value = "0")]
    exit_fee: Decimal,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[command(flatten)]
    Formula(FormulaCommand),
    /// Relative difference between an expected and an actual value
    RelativeDiff {
        #[arg(long)]
        expected: Decimal,
        #[arg(long)]
        value: Decimal,
    },
    /// Print the effective configuration as TOML
    ShowConfig,
}

#[derive(Subcommand, Debug)]
enum FormulaCommand {
    /// Spot price of the input token in units of the output token
    SpotPrice(SwapArgs),
    /// Output amount for an input amount
    OutGivenIn {
        #[command(flatten)]
        swap: SwapArgs,
        #[arg(long)]
        amount: Decimal,
    },
    /// Input amount for an output amount
    InGivenOut {
        #[command(flatten)]
        swap: SwapArgs,
        #[arg(long)]
        amount: Decimal,
    },
    /// Pool tokens minted for a single-asset deposit
    PoolOutGivenSingleIn {
        #[command(flatten)]
        pool: PoolArgs,
        #[arg(long)]
        amount: Decimal,
    },
    /// Deposit required to mint an amount of pool tokens
    SingleInGivenPoolOut {
        #[command(flatten)]
        pool: PoolArgs,
        #[arg(long)]
        amount: Decimal,
    },
    /// Withdrawal received for burning pool tokens
    SingleOutGivenPoolIn {
        #[command(flatten)]
        pool: PoolArgs,
        #[arg(long)]
        amount: Decimal,
    },
    /// Pool tokens burned for a single-asset withdrawal
    PoolInGivenSingleOut {
        #[command(flatten)]
        pool: PoolArgs,
        #[arg(long)]
        amount: Decimal,
    },
    /// Protocol reserve share of a fee
    Reserves {
        #[arg(long)]
        amount_with_fee: Decimal,
        #[arg(long)]
        amount_without_fee: Decimal,
        /// Reserve ratio, overrides the configured policy
        #[arg(long)]
        ratio: Option<Decimal>,
    },
}

#[derive(Serialize, Debug)]
struct Evaluation {
    formula: &'static str,
    value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    fee_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<ComparisonOutcome>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_logging(&args, &config);
    debug!(?args, "parsed arguments");

    let command = match &args.command {
        Command::Formula(command) => command,
        Command::RelativeDiff { expected, value } => {
            let relative_diff = calc_relative_diff(*expected, *value)?;
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({ "relative_diff": relative_diff }))?
            );
            return Ok(());
        }
        Command::ShowConfig => {
            print!("{}", config.to_toml_string()?);
            return Ok(());
        }
    };

    let (formula, value, fee_amount) = evaluate(command, &config)?;
    info!(%formula, %value, "evaluated formula");

    let comparison = match args.actual {
        Some(actual) => Some(
            ToleranceProfile::from(&config)
                .check(formula, value, actual)
                .context("Failed to compare against actual value")?,
        ),
        None => None,
    };

    let evaluation = Evaluation {
        formula: formula.name(),
        value,
        fee_amount,
        comparison,
    };
    println!("{}", serde_json::to_string_pretty(&evaluation)?);

    if comparison.is_some_and(|outcome| !outcome.within_tolerance) {
        std::process::exit(2);
    }
    Ok(())
}

fn evaluate(
    command: &FormulaCommand,
    config: &PricingConfig,
) -> Result<(Formula, Decimal, Option<Decimal>)> {
    let evaluated = match command {
        FormulaCommand::SpotPrice(s) => (
            Formula::SpotPrice,
            SwapMath::calc_spot_price(
                s.balance_in,
                s.weight_in,
                s.balance_out,
                s.weight_out,
                s.swap_fee,
            )?,
            None,
        ),
        FormulaCommand::OutGivenIn { swap: s, amount } => {
            let result = SwapMath::calc_out_given_in(
                s.balance_in,
                s.weight_in,
                s.balance_out,
                s.weight_out,
                *amount,
                s.swap_fee,
            )?;
            (Formula::OutGivenIn, result.amount, Some(result.fee_amount))
        }
        FormulaCommand::InGivenOut { swap: s, amount } => {
            let result = SwapMath::calc_in_given_out(
                s.balance_in,
                s.weight_in,
                s.balance_out,
                s.weight_out,
                *amount,
                s.swap_fee,
            )?;
            (Formula::InGivenOut, result.amount, Some(result.fee_amount))
        }
        FormulaCommand::PoolOutGivenSingleIn { pool: p, amount } => (
            Formula::PoolOutGivenSingleIn,
            LiquidityMath::calc_pool_out_given_single_in(
                p.balance,
                p.weight,
                p.pool_supply,
                p.total_weight,
                *amount,
                p.swap_fee,
            )?,
            None,
        ),
        FormulaCommand::SingleInGivenPoolOut { pool: p, amount } => (
            Formula::SingleInGivenPoolOut,
            LiquidityMath::calc_single_in_given_pool_out(
                p.balance,
                p.weight,
                p.pool_supply,
                p.total_weight,
                *amount,
                p.swap_fee,
            )?,
            None,
        ),
        FormulaCommand::SingleOutGivenPoolIn { pool: p, amount } => (
            Formula::SingleOutGivenPoolIn,
            LiquidityMath::calc_single_out_given_pool_in(
                p.balance,
                p.weight,
                p.pool_supply,
                p.total_weight,
                *amount,
                p.swap_fee,
                p.exit_fee,
            )?,
            None,
        ),
        FormulaCommand::PoolInGivenSingleOut { pool: p, amount } => (
            Formula::PoolInGivenSingleOut,
            LiquidityMath::calc_pool_in_given_single_out(
                p.balance,
                p.weight,
                p.pool_supply,
                p.total_weight,
                *amount,
                p.swap_fee,
                p.exit_fee,
            )?,
            None,
        ),
        FormulaCommand::Reserves {
            amount_with_fee,
            amount_without_fee,
            ratio,
        } => {
            let split = match ratio {
                Some(ratio) => ReserveSplit::Ratio(*ratio),
                None => ReserveSplit::try_from(&config.reserves)?,
            };
            debug!(?split, "using reserve split");
            let share = split.reserve_share(*amount_with_fee, *amount_without_fee)?;
            let fee = amount_with_fee - amount_without_fee;
            (Formula::Reserves, share, Some(fee))
        }
    };
    Ok(evaluated)
}

fn init_logging(args: &Args, config: &PricingConfig) {
    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if args.json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
}
