//! Cobb-Douglas technology with capital depreciation.
//!
//! Output per worker is `f(k) = k^α`. Competitive factor markets pay
//!
//! ```text
//! r = f'(K) - δ
//! w = f(k) - f'(k) k,   k = f'^{-1}(r + δ)
//! ```
//!
//! so the wage is a function of the interest rate alone.

use crate::error::ModelError;

/// Lower bound applied to capital (and to the marginal product in the inverse).
const CAPITAL_FLOOR: f64 = 1e-8;

/// Cobb-Douglas production with capital share α and depreciation δ.
///
/// # Examples
/// ```
/// use aiyagari_models::CobbDouglas;
///
/// let firm = CobbDouglas::new(0.36, 0.08).unwrap();
/// let k = firm.capital_demand(0.04);
/// assert!((firm.marginal_product(k) - 0.12).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CobbDouglas {
    alpha: f64,
    delta: f64,
}

impl CobbDouglas {
    /// Creates the technology.
    ///
    /// # Errors
    /// - `ModelError::InvalidCapitalShare` unless `0 < alpha < 1`
    /// - `ModelError::InvalidDepreciation` unless `0 <= delta <= 1`
    pub fn new(alpha: f64, delta: f64) -> Result<Self, ModelError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ModelError::InvalidCapitalShare { alpha });
        }
        if !(0.0..=1.0).contains(&delta) {
            return Err(ModelError::InvalidDepreciation { delta });
        }
        Ok(Self { alpha, delta })
    }

    /// Capital share α.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Depreciation rate δ.
    #[inline]
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Output per worker `k^α`.
    #[inline]
    pub fn output(&self, k: f64) -> f64 {
        k.max(CAPITAL_FLOOR).powf(self.alpha)
    }

    /// Marginal product of capital `α k^(α-1)`.
    #[inline]
    pub fn marginal_product(&self, k: f64) -> f64 {
        self.alpha * k.max(CAPITAL_FLOOR).powf(self.alpha - 1.0)
    }

    /// Capital per worker with marginal product `mpk`.
    #[inline]
    pub fn inverse_marginal_product(&self, mpk: f64) -> f64 {
        (mpk.max(CAPITAL_FLOOR) / self.alpha).powf(1.0 / (self.alpha - 1.0))
    }

    /// Interest rate implied by an aggregate capital stock.
    #[inline]
    pub fn rate_from_capital(&self, k: f64) -> f64 {
        self.marginal_product(k) - self.delta
    }

    /// Wage implied by an interest rate.
    pub fn wage_from_rate(&self, rate: f64) -> f64 {
        let k = self.inverse_marginal_product(rate + self.delta);
        self.output(k) - self.marginal_product(k) * k
    }

    /// Capital demanded by the firm at interest rate `rate`.
    ///
    /// Requires `rate + δ > 0`; returns `inf` or `NaN` otherwise.
    #[inline]
    pub fn capital_demand(&self, rate: f64) -> f64 {
        (self.alpha / (rate + self.delta)).powf(1.0 / (1.0 - self.alpha))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn firm() -> CobbDouglas {
        CobbDouglas::new(0.36, 0.08).unwrap()
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(matches!(
            CobbDouglas::new(1.0, 0.08),
            Err(ModelError::InvalidCapitalShare { .. })
        ));
        assert!(matches!(
            CobbDouglas::new(0.36, -0.01),
            Err(ModelError::InvalidDepreciation { .. })
        ));
    }

    #[test]
    fn test_wage_at_reference_rate() {
        // k = (0.36 / 0.11)^(1/0.64), w = (1 - α) k^α
        let k = (0.36_f64 / 0.11).powf(1.0 / 0.64);
        let expected = 0.64 * k.powf(0.36);
        assert_relative_eq!(firm().wage_from_rate(0.03), expected, max_relative = 1e-12);
        assert_relative_eq!(firm().wage_from_rate(0.03), 1.2469, epsilon = 1e-3);
    }

    #[test]
    fn test_demand_and_rate_are_inverse() {
        let firm = firm();
        for r in [0.0, 0.02, 0.04, 0.1] {
            let k = firm.capital_demand(r);
            assert_relative_eq!(firm.rate_from_capital(k), r, epsilon = 1e-12);
            assert_relative_eq!(
                firm.inverse_marginal_product(r + firm.delta()),
                k,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_factor_shares_exhaust_output() {
        let firm = firm();
        let r = 0.035;
        let k = firm.capital_demand(r);
        let w = firm.wage_from_rate(r);
        assert_relative_eq!(w + (r + firm.delta()) * k, firm.output(k), max_relative = 1e-12);
    }

    #[test]
    fn test_demand_falls_with_rate() {
        let firm = firm();
        assert!(firm.capital_demand(0.02) > firm.capital_demand(0.04));
    }
}
