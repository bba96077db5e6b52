//! Core traits, common domain types, and library-wide result/error structures.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::market::Market;

/// Plain-vanilla option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionType {
    /// Call option payoff profile.
    Call,
    /// Put option payoff profile.
    Put,
}

impl OptionType {
    /// Returns +1.0 for calls and -1.0 for puts.
    pub fn sign(self) -> f64 {
        match self {
            Self::Call => 1.0,
            Self::Put => -1.0,
        }
    }

    /// Terminal payoff against a strike.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (spot - strike).max(0.0),
            Self::Put => (strike - spot).max(0.0),
        }
    }
}

/// Standardized Greeks container used by engine results.
///
/// Each sensitivity is `None` when the producing formula degenerates
/// (`expiry == 0` or `vol == 0` for the closed forms, zero maturity for the
/// finite-difference theta) so callers cannot mistake "undefined" for zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Greeks {
    /// First derivative to spot.
    pub delta: Option<f64>,
    /// Second derivative to spot.
    pub gamma: Option<f64>,
    /// First derivative to volatility, per unit vol.
    pub vega: Option<f64>,
    /// First derivative to calendar time, per year.
    pub theta: Option<f64>,
    /// First derivative to rate.
    pub rho: Option<f64>,
}

impl Greeks {
    /// All five sensitivities reported as undefined.
    pub fn undefined() -> Self {
        Self::default()
    }
}

/// Common trait implemented by every priceable instrument.
pub trait Instrument: std::fmt::Debug {
    /// Returns a short type identifier for diagnostics.
    fn instrument_type(&self) -> &str;
}

/// Pricing engine abstraction over an instrument type.
pub trait PricingEngine<I: Instrument> {
    /// Prices an instrument under the provided market state.
    fn price(&self, instrument: &I, market: &Market) -> Result<PricingResult, PricingError>;
}

/// Unified engine result payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingResult {
    /// Present value.
    pub price: f64,
    /// Standard error (Monte Carlo only).
    pub stderr: Option<f64>,
    /// Greeks when available from the engine.
    pub greeks: Option<Greeks>,
    /// Engine-specific scalar diagnostics.
    pub diagnostics: HashMap<String, f64>,
}

impl PricingResult {
    /// Result carrying a price and nothing else.
    pub fn from_price(price: f64) -> Self {
        Self {
            price,
            stderr: None,
            greeks: None,
            diagnostics: HashMap::new(),
        }
    }
}

/// Engine and model errors surfaced by the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Input validation error.
    InvalidInput(String),
    /// Numerical issue (singular system, invalid state, etc.).
    NumericalError(String),
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::NumericalError(msg) => write!(f, "numerical error: {msg}"),
        }
    }
}

impl std::error::Error for PricingError {}
