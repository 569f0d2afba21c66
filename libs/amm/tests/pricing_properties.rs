//! Pricing Formula Property Tests
//!
//! Properties that must hold for every valid pool state: swaps and single-asset
//! joins/exits invert each other, outputs grow with inputs and never drain a reserve.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use weighted_amm::{
    decimal_pow, InvariantMath, LiquidityMath, PricingError, ReserveMath, SwapMath,
};

fn relative_diff(expected: Decimal, actual: Decimal) -> Decimal {
    ((expected - actual) / expected).abs()
}

// Property test strategies
prop_compose! {
    fn valid_balance()
        (balance in 1_000u64..10_000_000u64) -> Decimal {
        Decimal::from(balance)
    }
}

prop_compose! {
    fn valid_weight()
        (weight in 1u32..25u32) -> Decimal {
        Decimal::from(weight)
    }
}

prop_compose! {
    fn valid_fee()
        (fee_basis_points in 0u32..1000u32) -> Decimal {
        Decimal::from(fee_basis_points) / dec!(10_000)
    }
}

prop_compose! {
    /// Trade size as a fraction of a balance, between 1% and 40%
    fn trade_fraction()
        (percent in 1u32..=40u32) -> Decimal {
        Decimal::from(percent) / dec!(100)
    }
}

proptest! {
    /// Property: in-given-out inverts out-given-in
    #[test]
    fn swap_round_trip(
        balance_in in valid_balance(),
        weight_in in valid_weight(),
        balance_out in valid_balance(),
        weight_out in valid_weight(),
        fraction in trade_fraction(),
        swap_fee in valid_fee(),
    ) {
        let amount_in = balance_in * fraction;
        let out = SwapMath::calc_out_given_in(
            balance_in, weight_in, balance_out, weight_out, amount_in, swap_fee,
        ).unwrap();
        let back = SwapMath::calc_in_given_out(
            balance_in, weight_in, balance_out, weight_out, out.amount, swap_fee,
        ).unwrap();

        let diff = relative_diff(amount_in, back.amount);
        prop_assert!(diff < Decimal::new(1, 10),
                    "round trip of {} returned {} (relative diff {})",
                    amount_in, back.amount, diff);
    }

    /// Property: larger inputs always buy strictly more output
    #[test]
    fn out_given_in_strictly_increasing(
        balance_in in valid_balance(),
        weight_in in valid_weight(),
        balance_out in valid_balance(),
        weight_out in valid_weight(),
        small in 1u32..20u32,
        step in 1u32..20u32,
        swap_fee in valid_fee(),
    ) {
        let amount_small = balance_in * Decimal::from(small) / dec!(100);
        let amount_large = balance_in * Decimal::from(small + step) / dec!(100);

        let out_small = SwapMath::calc_out_given_in(
            balance_in, weight_in, balance_out, weight_out, amount_small, swap_fee,
        ).unwrap();
        let out_large = SwapMath::calc_out_given_in(
            balance_in, weight_in, balance_out, weight_out, amount_large, swap_fee,
        ).unwrap();

        prop_assert!(out_large.amount > out_small.amount,
                    "output {} for {} not above {} for {}",
                    out_large.amount, amount_large, out_small.amount, amount_small);
    }

    /// Property: a swap never drains the output reserve, even where the remaining
    /// balance falls below Decimal resolution
    #[test]
    fn out_given_in_below_balance(
        balance_in in valid_balance(),
        weight_in in 1u32..200u32,
        balance_out in valid_balance(),
        weight_out in 1u32..5u32,
        multiple in 1u64..1_000_000u64,
        swap_fee in valid_fee(),
    ) {
        let amount_in = balance_in * Decimal::from(multiple);
        let result = SwapMath::calc_out_given_in(
            balance_in,
            Decimal::from(weight_in),
            balance_out,
            Decimal::from(weight_out),
            amount_in,
            swap_fee,
        );

        match result {
            Ok(out) => {
                prop_assert!(out.amount < balance_out);
                prop_assert!(out.amount > Decimal::ZERO);
            }
            Err(err) => prop_assert!(matches!(err, PricingError::Underflow { .. }), "{}", err),
        }
    }

    /// Property: a single-asset exit never withdraws the whole balance
    #[test]
    fn single_out_below_balance(
        balance in valid_balance(),
        weight in 1u32..5u32,
        other_weight in 1u32..200u32,
        pool_supply in valid_balance(),
        burn_percent in 1u32..100u32,
        swap_fee in valid_fee(),
    ) {
        let pool_amount_in = pool_supply * Decimal::from(burn_percent) / dec!(100);
        let result = LiquidityMath::calc_single_out_given_pool_in(
            balance,
            Decimal::from(weight),
            pool_supply,
            Decimal::from(weight + other_weight),
            pool_amount_in,
            swap_fee,
            Decimal::ZERO,
        );

        match result {
            Ok(amount_out) => prop_assert!(amount_out < balance),
            Err(err) => prop_assert!(
                matches!(err, PricingError::InsufficientBalance { .. }),
                "{}",
                err
            ),
        }
    }

    /// Property: without a fee nothing is withheld and the output solves the invariant
    #[test]
    fn zero_fee_matches_invariant_solution(
        balance_in in valid_balance(),
        weight_in in valid_weight(),
        balance_out in valid_balance(),
        weight_out in valid_weight(),
        fraction in trade_fraction(),
    ) {
        let amount_in = balance_in * fraction;
        let out = SwapMath::calc_out_given_in(
            balance_in, weight_in, balance_out, weight_out, amount_in, Decimal::ZERO,
        ).unwrap();
        prop_assert_eq!(out.fee_amount, Decimal::ZERO);

        let y = balance_in / (balance_in + amount_in);
        let expected = balance_out * (Decimal::ONE - decimal_pow(y, weight_in / weight_out).unwrap());
        prop_assert_eq!(out.amount, expected);

        let before = InvariantMath::calc_invariant(
            &[balance_in, balance_out], &[weight_in, weight_out],
        ).unwrap();
        let after = InvariantMath::calc_invariant(
            &[balance_in + amount_in, balance_out - out.amount], &[weight_in, weight_out],
        ).unwrap();
        prop_assert!(relative_diff(before, after) < Decimal::new(1, 18));
    }

    /// Property: a fee never increases the output
    #[test]
    fn fee_reduces_output(
        balance_in in valid_balance(),
        weight_in in valid_weight(),
        balance_out in valid_balance(),
        weight_out in valid_weight(),
        fraction in trade_fraction(),
        swap_fee in valid_fee(),
    ) {
        let amount_in = balance_in * fraction;
        let free = SwapMath::calc_out_given_in(
            balance_in, weight_in, balance_out, weight_out, amount_in, Decimal::ZERO,
        ).unwrap();
        let charged = SwapMath::calc_out_given_in(
            balance_in, weight_in, balance_out, weight_out, amount_in, swap_fee,
        ).unwrap();

        prop_assert!(charged.amount <= free.amount);
        prop_assert_eq!(charged.fee_amount, amount_in * swap_fee);
    }

    /// Property: depositing then minting back the same pool tokens costs the same amount
    #[test]
    fn join_round_trip(
        balance in valid_balance(),
        weight in valid_weight(),
        other_weight in valid_weight(),
        pool_supply in valid_balance(),
        fraction in trade_fraction(),
        swap_fee in valid_fee(),
    ) {
        let total_weight = weight + other_weight;
        let amount_in = balance * fraction;

        let minted = LiquidityMath::calc_pool_out_given_single_in(
            balance, weight, pool_supply, total_weight, amount_in, swap_fee,
        ).unwrap();
        let deposit = LiquidityMath::calc_single_in_given_pool_out(
            balance, weight, pool_supply, total_weight, minted, swap_fee,
        ).unwrap();

        let diff = relative_diff(amount_in, deposit);
        prop_assert!(diff < Decimal::new(1, 10),
                    "join of {} round-tripped to {} (relative diff {})",
                    amount_in, deposit, diff);
    }

    /// Property: burning the pool tokens priced for a withdrawal returns that withdrawal
    #[test]
    fn exit_round_trip(
        balance in valid_balance(),
        weight in valid_weight(),
        other_weight in valid_weight(),
        pool_supply in valid_balance(),
        fraction in trade_fraction(),
        swap_fee in valid_fee(),
        exit_fee in valid_fee(),
    ) {
        let total_weight = weight + other_weight;
        let amount_out = balance * fraction;

        let burned = LiquidityMath::calc_pool_in_given_single_out(
            balance, weight, pool_supply, total_weight, amount_out, swap_fee, exit_fee,
        ).unwrap();
        let withdrawn = LiquidityMath::calc_single_out_given_pool_in(
            balance, weight, pool_supply, total_weight, burned, swap_fee, exit_fee,
        ).unwrap();

        let diff = relative_diff(amount_out, withdrawn);
        prop_assert!(diff < Decimal::new(1, 10),
                    "exit of {} round-tripped to {} (relative diff {})",
                    amount_out, withdrawn, diff);
    }

    /// Property: the ratio and fixed-half reserve policies agree at one half
    #[test]
    fn reserve_policies_agree_at_half(
        amount_without_fee in 0u64..1_000_000_000u64,
        fee in 0u64..1_000_000u64,
    ) {
        let without = Decimal::from(amount_without_fee);
        let with = without + Decimal::from(fee);

        let by_ratio = ReserveMath::calc_reserves(with, without, dec!(0.5)).unwrap();
        let fixed = ReserveMath::calc_reserves_fixed_half(with, without).unwrap();
        prop_assert_eq!(by_ratio, fixed);
        prop_assert!(by_ratio <= with - without);
    }
}
