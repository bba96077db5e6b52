use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use europricer::core::PricingEngine;
use europricer::engines::analytic::BlackScholesEngine;
use europricer::engines::monte_carlo::MonteCarloEngine;
use europricer::engines::pde::CrankNicolsonEngine;
use europricer::engines::tree::BinomialTreeEngine;
use europricer::instruments::VanillaOption;
use europricer::market::Market;
use std::hint::black_box;

fn benchmark_market() -> Market {
    Market::builder()
        .spot(100.0)
        .rate(0.05)
        .dividend_yield(0.0)
        .vol(0.20)
        .build()
        .expect("benchmark market should be valid")
}

fn bench_black_scholes(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::call(100.0, 1.0);
    let engine = BlackScholesEngine::new();

    c.bench_function("black_scholes_european_call", |b| {
        b.iter(|| {
            let px = engine
                .price(black_box(&option), black_box(&market))
                .expect("pricing should succeed")
                .price;
            black_box(px)
        })
    });
}

fn bench_binomial_steps(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::call(100.0, 1.0);
    let mut group = c.benchmark_group("binomial_european_call");

    for steps in [100_usize, 500, 1000] {
        let engine = BinomialTreeEngine::new(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, _| {
            b.iter(|| {
                let px = engine
                    .price(black_box(&option), black_box(&market))
                    .expect("pricing should succeed")
                    .price;
                black_box(px)
            })
        });
    }

    group.finish();
}

fn bench_crank_nicolson(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::call(100.0, 1.0);
    let engine = CrankNicolsonEngine::new(200, 200);

    c.bench_function("crank_nicolson_200x200", |b| {
        b.iter(|| {
            let px = engine
                .price(black_box(&option), black_box(&market))
                .expect("pricing should succeed")
                .price;
            black_box(px)
        })
    });
}

fn bench_monte_carlo(c: &mut Criterion) {
    let market = benchmark_market();
    let option = VanillaOption::call(100.0, 1.0);
    let engine = MonteCarloEngine::new(100_000).with_seed(42);

    c.bench_function("monte_carlo_100k_paths", |b| {
        b.iter(|| {
            let result = engine
                .price(black_box(&option), black_box(&market))
                .expect("pricing should succeed");
            black_box((result.price, result.stderr))
        })
    });
}

criterion_group!(
    benches,
    bench_black_scholes,
    bench_binomial_steps,
    bench_crank_nicolson,
    bench_monte_carlo
);
criterion_main!(benches);
