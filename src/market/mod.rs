//! Market snapshot consumed by all pricing engines.
//!
//! The model is the flat Black-Scholes market: one spot, one continuously
//! compounded rate, one continuous dividend/carry yield, one volatility.
//! [`MarketBuilder`] validates the snapshot at construction; engines
//! re-validate on entry so a hand-assembled `Market` cannot bypass the checks.

use serde::{Deserialize, Serialize};

use crate::core::PricingError;

/// Market snapshot used by all pricing engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Market {
    /// Spot price.
    pub spot: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    /// Continuously compounded dividend yield.
    pub dividend_yield: f64,
    /// Flat annualized volatility.
    pub vol: f64,
}

impl Market {
    /// Starts a market builder.
    #[inline]
    pub fn builder() -> MarketBuilder {
        MarketBuilder::default()
    }

    /// Validates the snapshot fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when `spot <= 0` or `vol <= 0`,
    /// or when any field is non-finite. Rate and dividend yield are
    /// unconstrained reals (negative values are legitimate).
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.spot > 0.0) || !self.spot.is_finite() {
            return Err(PricingError::InvalidInput(
                "market spot must be finite and > 0".to_string(),
            ));
        }
        if !(self.vol > 0.0) || !self.vol.is_finite() {
            return Err(PricingError::InvalidInput(
                "market vol must be finite and > 0".to_string(),
            ));
        }
        if !self.rate.is_finite() || !self.dividend_yield.is_finite() {
            return Err(PricingError::InvalidInput(
                "market rate and dividend yield must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`Market`].
#[derive(Debug, Clone, Default)]
pub struct MarketBuilder {
    spot: Option<f64>,
    rate: Option<f64>,
    dividend_yield: Option<f64>,
    vol: Option<f64>,
}

impl MarketBuilder {
    /// Sets the spot price.
    #[inline]
    pub fn spot(mut self, spot: f64) -> Self {
        self.spot = Some(spot);
        self
    }

    /// Sets the flat risk-free rate.
    #[inline]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Sets the continuous dividend yield.
    #[inline]
    pub fn dividend_yield(mut self, dividend_yield: f64) -> Self {
        self.dividend_yield = Some(dividend_yield);
        self
    }

    /// Sets the flat volatility.
    #[inline]
    pub fn vol(mut self, vol: f64) -> Self {
        self.vol = Some(vol);
        self
    }

    /// Validates and builds a [`Market`].
    ///
    /// Rate and dividend yield default to zero when unset; spot and vol are
    /// required.
    pub fn build(self) -> Result<Market, PricingError> {
        let spot = self
            .spot
            .ok_or_else(|| PricingError::InvalidInput("market spot is required".to_string()))?;
        let vol = self
            .vol
            .ok_or_else(|| PricingError::InvalidInput("market vol is required".to_string()))?;

        let market = Market {
            spot,
            rate: self.rate.unwrap_or(0.0),
            dividend_yield: self.dividend_yield.unwrap_or(0.0),
            vol,
        };
        market.validate()?;
        Ok(market)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_rate_and_yield_to_zero() {
        let market = Market::builder().spot(100.0).vol(0.2).build().unwrap();
        assert_eq!(market.rate, 0.0);
        assert_eq!(market.dividend_yield, 0.0);
    }

    #[test]
    fn builder_rejects_non_positive_spot_and_vol() {
        assert!(Market::builder().spot(0.0).vol(0.2).build().is_err());
        assert!(Market::builder().spot(100.0).vol(0.0).build().is_err());
        assert!(Market::builder().spot(100.0).vol(-0.2).build().is_err());
        assert!(Market::builder().vol(0.2).build().is_err());
    }

    #[test]
    fn negative_rates_are_valid() {
        let market = Market::builder()
            .spot(100.0)
            .rate(-0.005)
            .dividend_yield(-0.01)
            .vol(0.2)
            .build();
        assert!(market.is_ok());
    }
}
