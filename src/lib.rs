//! Europricer prices European vanilla options under the Black-Scholes market
//! model with four independent numerical methods, and derives sensitivities
//! by closed-form and bump-and-revalue means.
//!
//! The four engines share one contract ([`core::PricingEngine`]) over one
//! instrument ([`instruments::VanillaOption`]) and one market snapshot
//! ([`market::Market`]):
//!
//! - [`engines::analytic::BlackScholesEngine`] — closed form, with analytic
//!   Greeks.
//! - [`engines::tree::BinomialTreeEngine`] — Cox-Ross-Rubinstein lattice.
//! - [`engines::pde::CrankNicolsonEngine`] — finite differences on the
//!   Black-Scholes PDE.
//! - [`engines::monte_carlo::MonteCarloEngine`] — simulation with antithetic
//!   sampling and a control variate, reporting a standard error.
//!
//! Numerical considerations:
//! - Lattice, PDE, and simulation accuracy are controlled entirely by their
//!   resolution knobs (steps, grid sizes, path count); with enough resolution
//!   all four agree on the same value.
//! - Monte Carlo results are bit-identical for a fixed seed and
//!   configuration; without a seed each call draws fresh entropy.
//!
//! # Quick Start
//! Price a call with the closed form:
//! ```rust
//! use europricer::core::PricingEngine;
//! use europricer::engines::analytic::BlackScholesEngine;
//! use europricer::instruments::VanillaOption;
//! use europricer::market::Market;
//!
//! let market = Market::builder().spot(100.0).rate(0.01).vol(0.20).build().unwrap();
//! let option = VanillaOption::call(100.0, 0.5);
//!
//! let result = BlackScholesEngine::new().price(&option, &market).unwrap();
//! assert!((result.price - 5.876).abs() < 1e-2);
//! ```
//!
//! Select an engine through the closed method enum:
//! ```rust
//! use europricer::engines::PricingMethod;
//! use europricer::instruments::VanillaOption;
//! use europricer::market::Market;
//!
//! let market = Market::builder().spot(100.0).rate(0.01).vol(0.20).build().unwrap();
//! let option = VanillaOption::call(100.0, 0.5);
//!
//! let method = PricingMethod::Binomial { steps: 500 };
//! let lattice = method.price(&option, &market).unwrap();
//! assert!((lattice.price - 5.876).abs() < 1e-2);
//! ```
//!
//! Differentiate any engine without engine-specific code:
//! ```rust
//! use europricer::engines::analytic::BlackScholesEngine;
//! use europricer::greeks::{finite_difference_greeks, BumpConfig};
//! use europricer::instruments::VanillaOption;
//! use europricer::market::Market;
//!
//! let market = Market::builder().spot(100.0).rate(0.01).vol(0.20).build().unwrap();
//! let option = VanillaOption::call(100.0, 0.5);
//!
//! let greeks = finite_difference_greeks(
//!     &BlackScholesEngine::new(),
//!     &option,
//!     &market,
//!     BumpConfig::default(),
//! )
//! .unwrap();
//! assert!(greeks.delta.unwrap() > 0.0);
//! ```

pub mod core;
pub mod engines;
pub mod greeks;
pub mod instruments;
pub mod market;
pub mod math;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::{Greeks, OptionType, PricingEngine, PricingError, PricingResult};
    pub use crate::engines::PricingMethod;
    pub use crate::engines::analytic::BlackScholesEngine;
    pub use crate::engines::monte_carlo::MonteCarloEngine;
    pub use crate::engines::pde::CrankNicolsonEngine;
    pub use crate::engines::tree::BinomialTreeEngine;
    pub use crate::greeks::{BumpConfig, finite_difference_greeks};
    pub use crate::instruments::VanillaOption;
    pub use crate::market::Market;
}
