//! Cox-Ross-Rubinstein binomial lattice engine for European vanilla options.
//!
//! References: Cox-Ross-Rubinstein (1979); Hull (11th ed.) Ch. 13 and the
//! backward-induction recursion around Eq. (13.10). Convergence to the
//! closed form is first- to second-order in the step count.

use crate::core::{PricingEngine, PricingError, PricingResult};
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;

/// Cox-Ross-Rubinstein binomial tree engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinomialTreeEngine {
    /// Number of tree steps.
    pub steps: usize,
}

impl BinomialTreeEngine {
    /// Creates a tree engine with the given number of steps.
    pub fn new(steps: usize) -> Self {
        Self { steps }
    }
}

impl PricingEngine<VanillaOption> for BinomialTreeEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        market.validate()?;

        if self.steps == 0 {
            return Err(PricingError::InvalidInput(
                "binomial steps must be > 0".to_string(),
            ));
        }
        if instrument.expiry == 0.0 {
            return Err(PricingError::InvalidInput(
                "binomial expiry must be > 0; the tree collapses at zero expiry".to_string(),
            ));
        }

        let dt = instrument.expiry / self.steps as f64;
        let u = (market.vol * dt.sqrt()).exp();
        let d = 1.0 / u;
        let growth = ((market.rate - market.dividend_yield) * dt).exp();
        let p = (growth - d) / (u - d);
        if !(0.0..=1.0).contains(&p) {
            // Modeling warning, not an error: extreme vol/step combinations
            // push the risk-neutral probability outside [0, 1].
            tracing::warn!(
                p,
                steps = self.steps,
                vol = market.vol,
                "risk-neutral probability outside [0, 1]"
            );
        }
        let disc = (-market.rate * dt).exp();

        let option_type = instrument.option_type;
        let strike = instrument.strike;

        // Multiplicative recurrence for the terminal layer:
        // spot * u^j * d^(steps-j) = spot * d^steps * (u/d)^j.
        let ratio = u / d;
        let disc_p = disc * p;
        let disc_1mp = disc * (1.0 - p);

        let mut values = vec![0.0_f64; self.steps + 1];
        {
            let mut st = market.spot * d.powi(self.steps as i32);
            for value in values.iter_mut() {
                *value = option_type.payoff(st, strike);
                st *= ratio;
            }
        }

        for i in (0..self.steps).rev() {
            for j in 0..=i {
                values[j] = disc_p.mul_add(values[j + 1], disc_1mp * values[j]);
            }
        }

        let mut diagnostics = std::collections::HashMap::new();
        diagnostics.insert("num_steps".to_string(), self.steps as f64);
        diagnostics.insert("risk_neutral_p".to_string(), p);

        Ok(PricingResult {
            price: values[0],
            stderr: None,
            greeks: None,
            diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::OptionType;
    use crate::engines::analytic::bs_price;

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
    fn converges_to_black_scholes_with_500_steps() {
        let market = vanilla_market();
        let option = VanillaOption::call(100.0, 1.0);

        let tree = BinomialTreeEngine::new(500).price(&option, &market).unwrap();
        let bs = bs_price(OptionType::Call, 100.0, 100.0, 0.05, 0.0, 0.20, 1.0);

        assert!(
            (tree.price - bs).abs() <= 1e-2,
            "tree={} bs={}",
            tree.price,
            bs
        );
    }

    #[test]
    fn one_step_tree_matches_hand_computed_value() {
        let market = vanilla_market();
        let option = VanillaOption::call(100.0, 1.0);

        let u = (0.20_f64).exp();
        let d = 1.0 / u;
        let p = ((0.05_f64).exp() - d) / (u - d);
        let expected = (-0.05_f64).exp()
            * (p * (100.0 * u - 100.0).max(0.0) + (1.0 - p) * (100.0 * d - 100.0).max(0.0));

        let tree = BinomialTreeEngine::new(1).price(&option, &market).unwrap();
        assert!((tree.price - expected).abs() < 1e-12);
    }

    #[test]
    fn deterministic_across_repeated_calls() {
        let market = vanilla_market();
        let option = VanillaOption::put(95.0, 0.75);
        let engine = BinomialTreeEngine::new(200);

        let a = engine.price(&option, &market).unwrap().price;
        let b = engine.price(&option, &market).unwrap().price;
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn zero_expiry_is_invalid() {
        let market = vanilla_market();
        let result = BinomialTreeEngine::new(100).price(&VanillaOption::call(100.0, 0.0), &market);
        assert!(matches!(result, Err(PricingError::InvalidInput(_))));
    }
}
