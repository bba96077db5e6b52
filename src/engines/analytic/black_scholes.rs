//! Analytic Black-Scholes-Merton engine for European vanilla options.
//!
//! References: Hull (11th ed.) Ch. 15 for the closed forms and Ch. 19 for the
//! Greeks. Prices carry a continuous dividend yield `q` through the
//! `r - q` drift and the `exp(-qT)` spot discount.

use crate::core::{Greeks, OptionType, PricingEngine, PricingError, PricingResult};
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;
use crate::math::{normal_cdf, normal_pdf};

/// Analytic Black-Scholes engine for European vanilla options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackScholesEngine;

impl BlackScholesEngine {
    /// Creates a Black-Scholes engine instance.
    pub fn new() -> Self {
        Self
    }

    /// Closed-form Greeks for the instrument under the given market.
    ///
    /// All five sensitivities are `None` when `expiry == 0` or `vol <= 0`;
    /// the formulas degenerate there and no value is reported rather than an
    /// approximation.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] on invalid instrument or market
    /// fields.
    pub fn greeks(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<Greeks, PricingError> {
        instrument.validate()?;
        market.validate()?;
        Ok(black_scholes_merton_greeks(
            instrument.option_type,
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            instrument.expiry,
        ))
    }
}

#[inline]
fn d1_d2(
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> (f64, f64) {
    let sig_sqrt_t = vol * expiry.sqrt();
    let d1 =
        ((spot / strike).ln() + (rate - dividend_yield + 0.5 * vol * vol) * expiry) / sig_sqrt_t;
    (d1, d1 - sig_sqrt_t)
}

/// Black-Scholes-Merton closed-form price.
///
/// `expiry <= 0` returns intrinsic value without evaluating `d1`/`d2`;
/// `vol <= 0` collapses to the discounted-forward intrinsic value.
#[inline]
pub fn bs_price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> f64 {
    if expiry <= 0.0 {
        return option_type.payoff(spot, strike);
    }
    let df_r = (-rate * expiry).exp();
    let df_q = (-dividend_yield * expiry).exp();
    if vol <= 0.0 {
        return match option_type {
            OptionType::Call => (spot * df_q - strike * df_r).max(0.0),
            OptionType::Put => (strike * df_r - spot * df_q).max(0.0),
        };
    }

    let (d1, d2) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    match option_type {
        OptionType::Call => spot * df_q * normal_cdf(d1) - strike * df_r * normal_cdf(d2),
        OptionType::Put => strike * df_r * normal_cdf(-d2) - spot * df_q * normal_cdf(-d1),
    }
}

/// Closed-form BSM Greeks: delta, gamma, vega (per unit vol), theta (per
/// year), rho.
///
/// Returns [`Greeks::undefined`] when `expiry <= 0` or `vol <= 0`.
pub fn black_scholes_merton_greeks(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
    expiry: f64,
) -> Greeks {
    if expiry <= 0.0 || vol <= 0.0 || spot <= 0.0 || strike <= 0.0 {
        return Greeks::undefined();
    }

    let (d1, d2) = d1_d2(spot, strike, rate, dividend_yield, vol, expiry);
    let sqrt_t = expiry.sqrt();
    let df_q = (-dividend_yield * expiry).exp();
    let df_r = (-rate * expiry).exp();
    let pdf_d1 = normal_pdf(d1);

    let delta = match option_type {
        OptionType::Call => df_q * normal_cdf(d1),
        OptionType::Put => df_q * (normal_cdf(d1) - 1.0),
    };

    let gamma = df_q * pdf_d1 / (spot * vol * sqrt_t);
    let vega = spot * df_q * pdf_d1 * sqrt_t;

    let theta = match option_type {
        OptionType::Call => {
            -spot * df_q * pdf_d1 * vol / (2.0 * sqrt_t) - rate * strike * df_r * normal_cdf(d2)
                + dividend_yield * spot * df_q * normal_cdf(d1)
        }
        OptionType::Put => {
            -spot * df_q * pdf_d1 * vol / (2.0 * sqrt_t) + rate * strike * df_r * normal_cdf(-d2)
                - dividend_yield * spot * df_q * normal_cdf(-d1)
        }
    };

    let rho = match option_type {
        OptionType::Call => strike * expiry * df_r * normal_cdf(d2),
        OptionType::Put => -strike * expiry * df_r * normal_cdf(-d2),
    };

    Greeks {
        delta: Some(delta),
        gamma: Some(gamma),
        vega: Some(vega),
        theta: Some(theta),
        rho: Some(rho),
    }
}

impl PricingEngine<VanillaOption> for BlackScholesEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        market.validate()?;

        if instrument.expiry == 0.0 {
            // Intrinsic-value shortcut: d1/d2 are singular at zero expiry.
            return Ok(PricingResult {
                price: instrument.payoff(market.spot),
                stderr: None,
                greeks: Some(Greeks::undefined()),
                diagnostics: std::collections::HashMap::new(),
            });
        }

        let price = bs_price(
            instrument.option_type,
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            instrument.expiry,
        );
        let greeks = black_scholes_merton_greeks(
            instrument.option_type,
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            instrument.expiry,
        );

        let (d1, d2) = d1_d2(
            market.spot,
            instrument.strike,
            market.rate,
            market.dividend_yield,
            market.vol,
            instrument.expiry,
        );
        let mut diagnostics = std::collections::HashMap::new();
        diagnostics.insert("d1".to_string(), d1);
        diagnostics.insert("d2".to_string(), d2);

        Ok(PricingResult {
            price,
            stderr: None,
            greeks: Some(greeks),
            diagnostics,
        })
    }
}
