//! Monte Carlo engine for European vanilla options.
//!
//! One terminal GBM draw per path (the European payoff depends only on the
//! terminal fixing, so no intermediate stepping is needed), with antithetic
//! sampling and a discounted-terminal-price control variate as variance
//! reduction. References: Glasserman (2004) Ch. 4 for both estimators.
//!
//! The estimator series keeps one entry per path: antithetic sampling
//! concatenates the mirrored draws rather than averaging pairs, and the
//! reported standard error is the sample (n-1) deviation of the series over
//! sqrt(n).

use crate::core::{PricingEngine, PricingError, PricingResult};
use crate::engines::analytic::bs_price;
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;
use crate::math::NormalSource;

/// Monte Carlo pricing engine with optional variance reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonteCarloEngine {
    /// Number of simulated paths (rounded up to even under antithetic
    /// sampling).
    pub num_paths: usize,
    /// Pair each draw with its negation.
    pub antithetic: bool,
    /// Use the discounted terminal price as a control variate.
    pub control_variate: bool,
    /// RNG seed; `None` draws a fresh seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for MonteCarloEngine {
    fn default() -> Self {
        Self {
            num_paths: 100_000,
            antithetic: true,
            control_variate: true,
            seed: None,
        }
    }
}

impl MonteCarloEngine {
    /// Creates an engine with an explicit path count.
    pub fn new(num_paths: usize) -> Self {
        Self {
            num_paths,
            ..Self::default()
        }
    }

    /// Enables or disables antithetic sampling.
    pub fn with_antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Enables or disables the control variate.
    pub fn with_control_variate(mut self, control_variate: bool) -> Self {
        self.control_variate = control_variate;
        self
    }

    /// Fixes the RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn mean_and_stderr(series: &[f64]) -> (f64, f64) {
    let n = series.len() as f64;
    let mean = series.iter().sum::<f64>() / n;
    if series.len() < 2 {
        return (mean, 0.0);
    }
    let var = series.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / (n - 1.0);
    (mean, (var / n).sqrt())
}

impl PricingEngine<VanillaOption> for MonteCarloEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        market.validate()?;

        if self.num_paths == 0 {
            return Err(PricingError::InvalidInput(
                "num_paths must be > 0".to_string(),
            ));
        }
        if instrument.expiry == 0.0 {
            return Err(PricingError::InvalidInput(
                "simulation expiry must be > 0; paths collapse at zero expiry".to_string(),
            ));
        }

        let expiry = instrument.expiry;
        let mut source = NormalSource::from_seed(self.seed);

        let num_paths = if self.antithetic {
            self.num_paths.div_ceil(2) * 2
        } else {
            self.num_paths
        };

        let mut z = vec![0.0_f64; num_paths];
        if self.antithetic {
            let half = num_paths / 2;
            let (head, tail) = z.split_at_mut(half);
            source.fill_normals(head);
            for (mirror, &draw) in tail.iter_mut().zip(head.iter()) {
                *mirror = -draw;
            }
        } else {
            source.fill_normals(&mut z);
        }

        let drift = (market.rate - market.dividend_yield - 0.5 * market.vol * market.vol) * expiry;
        let vol_sqrt_t = market.vol * expiry.sqrt();
        let df = (-market.rate * expiry).exp();

        let terminal: Vec<f64> = z
            .iter()
            .map(|&zi| market.spot * (vol_sqrt_t.mul_add(zi, drift)).exp())
            .collect();
        let discounted: Vec<f64> = terminal.iter().map(|&st| df * instrument.payoff(st)).collect();

        let (estimate, stderr) = if self.control_variate {
            // The discounted terminal price has known mean spot * exp(-qT).
            let control: Vec<f64> = terminal.iter().map(|&st| df * st).collect();
            let control_expectation = market.spot * (-market.dividend_yield * expiry).exp();

            let n = num_paths as f64;
            let mean_x = discounted.iter().sum::<f64>() / n;
            let mean_y = control.iter().sum::<f64>() / n;
            let mut cov = 0.0;
            let mut var_y = 0.0;
            for (&x, &y) in discounted.iter().zip(control.iter()) {
                cov += (x - mean_x) * (y - mean_y);
                var_y += (y - mean_y) * (y - mean_y);
            }
            cov /= n;
            var_y /= n;

            let beta = if var_y > 0.0 {
                cov / var_y
            } else {
                // Degenerate all-equal-paths case.
                tracing::debug!("control variate variance is zero; skipping adjustment");
                0.0
            };

            let adjusted: Vec<f64> = discounted
                .iter()
                .zip(control.iter())
                .map(|(&x, &y)| x - beta * (y - control_expectation))
                .collect();
            mean_and_stderr(&adjusted)
        } else {
            mean_and_stderr(&discounted)
        };

        // Closed-form companion value, surfaced next to the estimate so the
        // sampling error is visible at a glance.
        let analytic_reference = bs_price(
            instrument.option_type,
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            expiry,
        );

        let mut diagnostics = std::collections::HashMap::new();
        diagnostics.insert("num_paths".to_string(), num_paths as f64);
        diagnostics.insert("analytic_reference".to_string(), analytic_reference);
        diagnostics.insert("seed".to_string(), source.seed() as f64);

        Ok(PricingResult {
            price: estimate,
            stderr: Some(stderr),
            greeks: None,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;

    fn vanilla_market() -> Market {
        Market::builder()
            .spot(100.0)
            .rate(0.05)
            .dividend_yield(0.0)
            .vol(0.20)
            .build()
            .unwrap()
    }

    #[test]
    fn converges_to_black_scholes_with_control_variate() {
        let market = vanilla_market();
        let option = VanillaOption::call(100.0, 1.0);

        let result = MonteCarloEngine::new(100_000)
            .with_seed(42)
            .price(&option, &market)
            .unwrap();

        let bs = bs_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);
        assert!(
            (result.price - bs).abs() <= 0.05,
            "mc={} bs={} stderr={:?}",
            result.price,
            bs,
            result.stderr
        );
        assert!(result.stderr.unwrap() > 0.0);
        assert_eq!(result.diagnostics["analytic_reference"], bs);
    }

    #[test]
    fn antithetic_rounds_odd_path_counts_up() {
        let market = vanilla_market();
        let option = VanillaOption::call(100.0, 1.0);

        let result = MonteCarloEngine::new(1001)
            .with_seed(7)
            .price(&option, &market)
            .unwrap();
        assert_eq!(result.diagnostics["num_paths"], 1002.0);
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let market = vanilla_market();
        let option = VanillaOption::put(95.0, 0.5);
        let engine = MonteCarloEngine::new(20_000).with_seed(123);

        let a = engine.price(&option, &market).unwrap();
        let b = engine.price(&option, &market).unwrap();
        assert_eq!(a.price.to_bits(), b.price.to_bits());
        assert_eq!(a.stderr.unwrap().to_bits(), b.stderr.unwrap().to_bits());
    }

    #[test]
    fn zero_expiry_is_invalid() {
        let market = vanilla_market();
        let result = MonteCarloEngine::new(1000).price(&VanillaOption::call(100.0, 0.0), &market);
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }
}
