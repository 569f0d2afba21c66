//! Performance benchmarks for the pricing formulas
//!
//! Every non-integer exponent goes through the ln/exp series, so pow dominates the
//! cost of the swap and join/exit formulas.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use weighted_amm::{dec, decimal_pow, Decimal, LiquidityMath, ReserveMath, SwapMath};

fn bench_decimal_pow(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal_pow");
    for exponent in [dec!(2), dec!(0.5), dec!(3.75), dec!(24)] {
        group.bench_with_input(BenchmarkId::from_parameter(exponent), &exponent, |b, &exp| {
            b.iter(|| {
                let result = decimal_pow(criterion::black_box(dec!(0.909)), exp);
                criterion::black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_swaps(c: &mut Criterion) {
    c.bench_function("spot_price", |b| {
        b.iter(|| {
            let price = SwapMath::calc_spot_price(
                criterion::black_box(dec!(100)),
                dec!(2),
                dec!(50),
                dec!(1),
                dec!(0.01),
            );
            criterion::black_box(price)
        })
    });

    c.bench_function("out_given_in_integer_ratio", |b| {
        b.iter(|| {
            let swap = SwapMath::calc_out_given_in(
                criterion::black_box(dec!(100)),
                dec!(2),
                dec!(50),
                dec!(1),
                dec!(10),
                dec!(0.01),
            );
            criterion::black_box(swap)
        })
    });

    c.bench_function("out_given_in_fractional_ratio", |b| {
        b.iter(|| {
            let swap = SwapMath::calc_out_given_in(
                criterion::black_box(dec!(1000)),
                dec!(3),
                dec!(250),
                dec!(7),
                dec!(40),
                dec!(0.003),
            );
            criterion::black_box(swap)
        })
    });

    c.bench_function("in_given_out_fractional_ratio", |b| {
        b.iter(|| {
            let swap = SwapMath::calc_in_given_out(
                criterion::black_box(dec!(1000)),
                dec!(3),
                dec!(250),
                dec!(7),
                dec!(40),
                dec!(0.003),
            );
            criterion::black_box(swap)
        })
    });
}

fn bench_single_asset(c: &mut Criterion) {
    c.bench_function("pool_out_given_single_in", |b| {
        b.iter(|| {
            let minted = LiquidityMath::calc_pool_out_given_single_in(
                criterion::black_box(dec!(1000)),
                dec!(5),
                dec!(100),
                dec!(20),
                dec!(40),
                dec!(0.003),
            );
            criterion::black_box(minted)
        })
    });

    c.bench_function("pool_in_given_single_out", |b| {
        b.iter(|| {
            let burned = LiquidityMath::calc_pool_in_given_single_out(
                criterion::black_box(dec!(1000)),
                dec!(5),
                dec!(100),
                dec!(20),
                dec!(40),
                dec!(0.003),
                dec!(0.001),
            );
            criterion::black_box(burned)
        })
    });
}

fn bench_reserves(c: &mut Criterion) {
    c.bench_function("calc_reserves", |b| {
        b.iter(|| {
            let reserves = ReserveMath::calc_reserves(
                criterion::black_box(dec!(110)),
                dec!(100),
                Decimal::new(25, 2),
            );
            criterion::black_box(reserves)
        })
    });
}

criterion_group!(
    benches,
    bench_decimal_pow,
    bench_swaps,
    bench_single_asset,
    bench_reserves
);

criterion_main!(benches);
