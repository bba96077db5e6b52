//! Crank-Nicolson finite-difference engine for the Black-Scholes PDE.
//!
//! Uniform price grid on `[0, s_max_multiplier * max(spot, strike)]`, uniform
//! time grid on `[0, T]`, terminal payoff condition, and one tridiagonal
//! solve per backward time step. Accuracy is controlled entirely by the grid
//! resolution; no adaptive refinement is performed.
//!
//! Boundary rows follow the classic textbook form indexed by time slice:
//! `S_max - K*exp(-r*dt*n)` for calls at the upper edge and
//! `K*exp(-r*dt*n)` for puts at the lower edge. The put boundary carries no
//! dividend-yield adjustment; that is deliberate and flagged for domain
//! review rather than silently corrected.

use crate::core::{OptionType, PricingEngine, PricingError, PricingResult};
use crate::instruments::vanilla::VanillaOption;
use crate::market::Market;

/// Crank-Nicolson finite-difference engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrankNicolsonEngine {
    /// Number of time steps.
    pub time_steps: usize,
    /// Number of price-grid intervals.
    pub space_steps: usize,
    /// Grid upper bound multiplier, `S_max = s_max_multiplier * max(spot, strike)`.
    pub s_max_multiplier: f64,
}

impl Default for CrankNicolsonEngine {
    fn default() -> Self {
        Self {
            time_steps: 400,
            space_steps: 400,
            s_max_multiplier: 3.0,
        }
    }
}

impl CrankNicolsonEngine {
    /// Creates a Crank-Nicolson engine with explicit grid sizes.
    pub fn new(time_steps: usize, space_steps: usize) -> Self {
        Self {
            time_steps,
            space_steps,
            ..Self::default()
        }
    }

    /// Sets `S_max = multiplier * max(spot, strike)`.
    pub fn with_s_max_multiplier(mut self, s_max_multiplier: f64) -> Self {
        self.s_max_multiplier = s_max_multiplier;
        self
    }
}

/// Boundary pair `(lower, upper)` for time-slice index `n`.
#[inline]
fn boundary_values(
    option_type: OptionType,
    strike: f64,
    rate: f64,
    s_max: f64,
    dt: f64,
    time_index: usize,
) -> (f64, f64) {
    let df = (-rate * dt * time_index as f64).exp();
    match option_type {
        OptionType::Call => (0.0, s_max - strike * df),
        OptionType::Put => (strike * df, 0.0),
    }
}

/// In-place Thomas tridiagonal solve using pre-allocated scratch buffers.
/// Writes the solution into `x`; `c_star` and `d_star` are scratch space.
#[inline]
fn solve_tridiagonal_inplace(
    lower: &[f64],
    diag: &[f64],
    upper: &[f64],
    rhs: &[f64],
    c_star: &mut [f64],
    d_star: &mut [f64],
    x: &mut [f64],
) -> Result<(), PricingError> {
    let n = diag.len();

    if diag[0].abs() <= 1.0e-14 {
        return Err(PricingError::NumericalError(
            "tridiagonal solver singular matrix".to_string(),
        ));
    }
    let inv_denom0 = 1.0 / diag[0];
    c_star[0] = if n > 1 { upper[0] * inv_denom0 } else { 0.0 };
    d_star[0] = rhs[0] * inv_denom0;

    for i in 1..n {
        let denom = (-lower[i]).mul_add(c_star[i - 1], diag[i]);
        if denom.abs() <= 1.0e-14 {
            return Err(PricingError::NumericalError(
                "tridiagonal solver singular matrix".to_string(),
            ));
        }
        let inv_denom = 1.0 / denom;
        c_star[i] = if i < n - 1 { upper[i] * inv_denom } else { 0.0 };
        d_star[i] = (-lower[i]).mul_add(d_star[i - 1], rhs[i]) * inv_denom;
    }

    x[n - 1] = d_star[n - 1];
    for i in (0..(n - 1)).rev() {
        x[i] = (-c_star[i]).mul_add(x[i + 1], d_star[i]);
    }
    Ok(())
}

impl PricingEngine<VanillaOption> for CrankNicolsonEngine {
    fn price(
        &self,
        instrument: &VanillaOption,
        market: &Market,
    ) -> Result<PricingResult, PricingError> {
        instrument.validate()?;
        market.validate()?;

        if self.time_steps == 0 || self.space_steps < 2 {
            return Err(PricingError::InvalidInput(
                "time_steps must be > 0 and space_steps must be >= 2".to_string(),
            ));
        }
        if !(self.s_max_multiplier > 0.0) || !self.s_max_multiplier.is_finite() {
            return Err(PricingError::InvalidInput(
                "s_max_multiplier must be finite and > 0".to_string(),
            ));
        }
        if instrument.expiry == 0.0 {
            return Err(PricingError::InvalidInput(
                "finite-difference expiry must be > 0; the time grid collapses at zero expiry"
                    .to_string(),
            ));
        }

        let n_t = self.time_steps;
        let n_s = self.space_steps;
        let dt = instrument.expiry / n_t as f64;
        let s_max = self.s_max_multiplier * market.spot.max(instrument.strike);
        let ds = s_max / n_s as f64;

        let option_type = instrument.option_type;
        let strike = instrument.strike;

        // Terminal condition, with the boundary rows applied on top.
        let mut values = vec![0.0_f64; n_s + 1];
        for (i, v) in values.iter_mut().enumerate() {
            *v = option_type.payoff(i as f64 * ds, strike);
        }
        let (lower_t, upper_t) = boundary_values(option_type, strike, market.rate, s_max, dt, n_t);
        values[0] = lower_t;
        values[n_s] = upper_t;

        // Crank-Nicolson bands: A (implicit, unknown slice) and B (explicit,
        // known slice) built from the per-node diffusion and drift terms.
        let interior_n = n_s - 1;
        let mut lhs_lower = vec![0.0_f64; interior_n];
        let mut lhs_diag = vec![0.0_f64; interior_n];
        let mut lhs_upper = vec![0.0_f64; interior_n];
        let mut rhs_lower = vec![0.0_f64; interior_n];
        let mut rhs_diag = vec![0.0_f64; interior_n];
        let mut rhs_upper = vec![0.0_f64; interior_n];

        let inv_ds2 = 1.0 / (ds * ds);
        let inv_2ds = 1.0 / (2.0 * ds);
        let half_vol2 = 0.5 * market.vol * market.vol;
        let drift = market.rate - market.dividend_yield;
        let half_dt = 0.5 * dt;

        for k in 0..interior_n {
            let s = (k + 1) as f64 * ds;
            let alpha = half_vol2 * s * s * inv_ds2;
            let beta = drift * s * inv_2ds;

            let a = alpha - beta;
            let b = -2.0 * alpha - market.rate;
            let c = alpha + beta;

            lhs_lower[k] = -half_dt * a;
            lhs_diag[k] = 1.0 - half_dt * b;
            lhs_upper[k] = -half_dt * c;

            rhs_lower[k] = half_dt * a;
            rhs_diag[k] = 1.0 + half_dt * b;
            rhs_upper[k] = half_dt * c;
        }

        // Scratch buffers allocated once for the whole backward sweep.
        let mut rhs_buf = vec![0.0_f64; interior_n];
        let mut solve_lower = vec![0.0_f64; interior_n];
        let mut solve_upper = vec![0.0_f64; interior_n];
        let mut c_star = vec![0.0_f64; interior_n];
        let mut d_star = vec![0.0_f64; interior_n];
        let mut next_values = vec![0.0_f64; n_s + 1];

        // LHS bands with zeroed boundary entries; they never change.
        solve_lower.copy_from_slice(&lhs_lower);
        solve_lower[0] = 0.0;
        solve_upper.copy_from_slice(&lhs_upper);
        solve_upper[interior_n - 1] = 0.0;

        for n in (0..n_t).rev() {
            let (lower_new, upper_new) =
                boundary_values(option_type, strike, market.rate, s_max, dt, n);

            // RHS = B * values over the known slice.
            for k in 0..interior_n {
                let i = k + 1;
                rhs_buf[k] = rhs_diag[k].mul_add(
                    values[i],
                    rhs_lower[k].mul_add(values[i - 1], rhs_upper[k] * values[i + 1]),
                );
            }

            // Boundary corrections: move the A-side boundary terms to the RHS.
            rhs_buf[0] -= lhs_lower[0] * lower_new;
            rhs_buf[interior_n - 1] -= lhs_upper[interior_n - 1] * upper_new;

            next_values[0] = lower_new;
            next_values[n_s] = upper_new;

            solve_tridiagonal_inplace(
                &solve_lower,
                &lhs_diag,
                &solve_upper,
                &rhs_buf,
                &mut c_star,
                &mut d_star,
                &mut next_values[1..n_s],
            )?;

            std::mem::swap(&mut values, &mut next_values);
        }

        // The spot need not land on a grid node; interpolate the t = 0 slice.
        let price = if market.spot >= s_max {
            values[n_s]
        } else {
            let x = market.spot / ds;
            let i = x.floor() as usize;
            let w = x - i as f64;
            (1.0 - w) * values[i] + w * values[i + 1]
        };

        let mut diagnostics = std::collections::HashMap::new();
        diagnostics.insert("num_time_steps".to_string(), n_t as f64);
        diagnostics.insert("num_space_steps".to_string(), n_s as f64);
        diagnostics.insert("s_max".to_string(), s_max);

        Ok(PricingResult {
            price,
            stderr: None,
            greeks: None,
            diagnostics,
        })
    }
}
