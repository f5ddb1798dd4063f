//! CRRA preferences.
//!
//! ```text
//! u(c)  = ln c                         σ = 1
//! u(c)  = (c^(1-σ) - 1) / (1 - σ)      otherwise
//! u'(c) = c^(-σ)
//! ```
//!
//! Consumption is floored at [`CONSUMPTION_FLOOR`] before evaluation so that
//! infeasible candidate savings during root finding produce a huge but
//! finite marginal utility instead of `inf` or `NaN`.

use crate::error::ModelError;

/// Lower bound applied to consumption (and marginal utility in the inverse).
pub const CONSUMPTION_FLOOR: f64 = 1e-8;

/// Constant relative risk aversion preferences with geometric discounting.
///
/// # Examples
/// ```
/// use aiyagari_models::Crra;
///
/// let prefs = Crra::new(2.0, 0.96).unwrap();
/// assert_eq!(prefs.marginal_utility(2.0), 0.25);
/// assert!((prefs.inverse_marginal_utility(0.25) - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crra {
    sigma: f64,
    beta: f64,
}

impl Crra {
    /// Creates CRRA preferences.
    ///
    /// # Errors
    /// - `ModelError::InvalidRiskAversion` if `sigma <= 0` or not finite
    /// - `ModelError::InvalidDiscountFactor` unless `0 < beta < 1`
    pub fn new(sigma: f64, beta: f64) -> Result<Self, ModelError> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(ModelError::InvalidRiskAversion { sigma });
        }
        if !(beta > 0.0 && beta < 1.0) {
            return Err(ModelError::InvalidDiscountFactor { beta });
        }
        Ok(Self { sigma, beta })
    }

    /// Relative risk aversion σ.
    #[inline]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Discount factor β.
    #[inline]
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Period utility.
    pub fn utility(&self, c: f64) -> f64 {
        let c = c.max(CONSUMPTION_FLOOR);
        if self.sigma == 1.0 {
            c.ln()
        } else {
            (c.powf(1.0 - self.sigma) - 1.0) / (1.0 - self.sigma)
        }
    }

    /// Marginal utility `u'(c)`.
    #[inline]
    pub fn marginal_utility(&self, c: f64) -> f64 {
        c.max(CONSUMPTION_FLOOR).powf(-self.sigma)
    }

    /// Consumption delivering marginal utility `m`.
    #[inline]
    pub fn inverse_marginal_utility(&self, m: f64) -> f64 {
        m.max(CONSUMPTION_FLOOR).powf(-1.0 / self.sigma)
    }

    /// Effective discounting of asset returns, `(1 + r) β`.
    ///
    /// A stationary wealth distribution exists only when this is below one.
    #[inline]
    pub fn gross_patience(&self, rate: f64) -> f64 {
        (1.0 + rate) * self.beta
    }

    /// Complete-markets interest rate `1/β - 1`.
    #[inline]
    pub fn complete_markets_rate(&self) -> f64 {
        1.0 / self.beta - 1.0
    }
}
