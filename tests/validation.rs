//! Input validation behaves identically across engines: non-positive spot,
//! strike, or vol, and negative expiry are invalid everywhere; a zero expiry
//! is priceable only by the analytic engine's intrinsic-value shortcut.

use europricer::core::{PricingEngine, PricingError, PricingResult};
use europricer::engines::analytic::BlackScholesEngine;
use europricer::engines::monte_carlo::MonteCarloEngine;
use europricer::engines::pde::CrankNicolsonEngine;
use europricer::engines::tree::BinomialTreeEngine;
use europricer::instruments::VanillaOption;
use europricer::market::Market;

fn price_with_each_engine(
    option: &VanillaOption,
    market: &Market,
) -> Vec<(&'static str, Result<PricingResult, PricingError>)> {
    vec![
        ("analytic", BlackScholesEngine::new().price(option, market)),
        ("binomial", BinomialTreeEngine::new(100).price(option, market)),
        (
            "pde",
            CrankNicolsonEngine::new(50, 50).price(option, market),
        ),
        (
            "monte_carlo",
            MonteCarloEngine::new(1_000).with_seed(1).price(option, market),
        ),
    ]
}

fn assert_all_invalid(option: &VanillaOption, market: &Market, label: &str) {
    for (name, result) in price_with_each_engine(option, market) {
        assert!(
            matches!(result, Err(PricingError::InvalidInput(_))),
            "{name} accepted {label}: {result:?}"
        );
    }
}

fn valid_market() -> Market {
    Market::builder().spot(100.0).rate(0.01).vol(0.2).build().unwrap()
}

#[test]
fn non_positive_spot_is_invalid_everywhere() {
    let market = Market {
        spot: 0.0,
        ..valid_market()
    };
    assert_all_invalid(&VanillaOption::call(100.0, 0.5), &market, "spot=0");
}

#[test]
fn negative_strike_is_invalid_everywhere() {
    assert_all_invalid(&VanillaOption::call(-1.0, 0.5), &valid_market(), "strike=-1");
}

#[test]
fn zero_vol_is_invalid_everywhere() {
    let market = Market {
        vol: 0.0,
        ..valid_market()
    };
    assert_all_invalid(&VanillaOption::call(100.0, 0.5), &market, "vol=0");
}

#[test]
fn negative_expiry_is_invalid_everywhere() {
    assert_all_invalid(&VanillaOption::call(100.0, -0.1), &valid_market(), "expiry=-0.1");
}

#[test]
fn zero_expiry_is_analytic_only() {
    let option = VanillaOption::call(100.0, 0.0);
    let market = valid_market();

    for (name, result) in price_with_each_engine(&option, &market) {
        if name == "analytic" {
            assert!(result.is_ok(), "analytic rejected zero expiry: {result:?}");
        } else {
            assert!(
                matches!(result, Err(PricingError::InvalidInput(_))),
                "{name} accepted zero expiry: {result:?}"
            );
        }
    }
}

#[test]
fn zero_expiry_intrinsic_values_are_exact() {
    let market_itm = Market {
        spot: 110.0,
        ..valid_market()
    };
    let market_otm = Market {
        spot: 90.0,
        ..valid_market()
    };
    let engine = BlackScholesEngine::new();

    let itm = engine
        .price(&VanillaOption::call(100.0, 0.0), &market_itm)
        .unwrap();
    assert_eq!(itm.price, 10.0);

    let otm = engine
        .price(&VanillaOption::call(100.0, 0.0), &market_otm)
        .unwrap();
    assert_eq!(otm.price, 0.0);
}
