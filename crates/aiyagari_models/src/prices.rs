//! Factor prices.

use crate::technology::CobbDouglas;

/// Interest rate and wage faced by households.
///
/// Always built from the rate so that the wage is consistent with the
/// firm's first-order conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Prices {
    /// Net interest rate r
    pub rate: f64,
    /// Wage per efficiency unit w
    pub wage: f64,
}

impl Prices {
    /// Prices implied by the interest rate `rate`.
    pub fn from_rate(rate: f64, technology: &CobbDouglas) -> Self {
        Self {
            rate,
            wage: technology.wage_from_rate(rate),
        }
    }

    /// Gross return `1 + r`.
    #[inline]
    pub fn gross_return(&self) -> f64 {
        1.0 + self.rate
    }

    /// Cash on hand `(1 + r) a + w z`.
    #[inline]
    pub fn cash_on_hand(&self, assets: f64, productivity: f64) -> f64 {
        self.gross_return() * assets + self.wage * productivity
    }
}
