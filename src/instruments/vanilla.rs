//! Canonical European vanilla option contract used throughout the library.
//!
//! [`VanillaOption`] stores side, strike, and expiry. Validation accepts
//! `expiry == 0` (immediate-expiry intrinsic-value edge case); whether a zero
//! expiry is actually priceable is an engine decision — only the analytic
//! engine takes the intrinsic-value shortcut, the grid/tree/path engines
//! reject it.

use serde::{Deserialize, Serialize};

use crate::core::{Instrument, OptionType, PricingError};

/// European vanilla option contract.
///
/// This is the canonical input for every engine in the crate: strike `K`,
/// expiry `T` in year fractions, and option side.
///
/// # Examples
/// ```
/// use europricer::core::OptionType;
/// use europricer::instruments::VanillaOption;
///
/// let option = VanillaOption {
///     option_type: OptionType::Call,
///     strike: 100.0,
///     expiry: 0.5,
/// };
/// assert!(option.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VanillaOption {
    /// Call or put.
    pub option_type: OptionType,
    /// Strike level.
    pub strike: f64,
    /// Expiry in years.
    pub expiry: f64,
}

impl VanillaOption {
    /// Builds a European call option.
    pub fn call(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Call,
            strike,
            expiry,
        }
    }

    /// Builds a European put option.
    pub fn put(strike: f64, expiry: f64) -> Self {
        Self {
            option_type: OptionType::Put,
            strike,
            expiry,
        }
    }

    /// Terminal payoff of this contract at the given spot.
    #[inline]
    pub fn payoff(&self, spot: f64) -> f64 {
        self.option_type.payoff(spot, self.strike)
    }

    /// Validates instrument fields.
    ///
    /// # Errors
    /// Returns [`PricingError::InvalidInput`] when `strike <= 0` or
    /// `expiry < 0`. `expiry == 0` is accepted here to support the analytic
    /// engine's intrinsic-value shortcut.
    pub fn validate(&self) -> Result<(), PricingError> {
        if !(self.strike > 0.0) || !self.strike.is_finite() {
            return Err(PricingError::InvalidInput(
                "vanilla strike must be finite and > 0".to_string(),
            ));
        }
        if self.expiry < 0.0 || !self.expiry.is_finite() {
            return Err(PricingError::InvalidInput(
                "vanilla expiry must be finite and >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Instrument for VanillaOption {
    fn instrument_type(&self) -> &str {
        "VanillaOption"
    }
}
