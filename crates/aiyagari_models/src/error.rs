//! Error types for model construction.

use thiserror::Error;

/// Invalid model parameters.
///
/// # Examples
/// ```
/// use aiyagari_models::ModelError;
///
/// let err = ModelError::InvalidDiscountFactor { beta: 1.2 };
/// assert!(format!("{}", err).contains("1.2"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelError {
    /// Relative risk aversion must be positive and finite.
    #[error("Invalid risk aversion: σ = {sigma}")]
    InvalidRiskAversion {
        /// The invalid coefficient
        sigma: f64,
    },

    /// Discount factor must lie in (0, 1).
    #[error("Invalid discount factor: β = {beta}, expected 0 < β < 1")]
    InvalidDiscountFactor {
        /// The invalid discount factor
        beta: f64,
    },

    /// Capital share must lie in (0, 1).
    #[error("Invalid capital share: α = {alpha}, expected 0 < α < 1")]
    InvalidCapitalShare {
        /// The invalid capital share
        alpha: f64,
    },

    /// Depreciation must lie in [0, 1].
    #[error("Invalid depreciation rate: δ = {delta}, expected 0 <= δ <= 1")]
    InvalidDepreciation {
        /// The invalid depreciation rate
        delta: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_values() {
        let err = ModelError::InvalidCapitalShare { alpha: 1.5 };
        assert!(err.to_string().contains("1.5"));

        let err = ModelError::InvalidDepreciation { delta: -0.1 };
        assert!(err.to_string().contains("-0.1"));
    }

    #[test]
    fn test_clone_and_eq() {
        let err = ModelError::InvalidRiskAversion { sigma: 0.0 };
        assert_eq!(err.clone(), err);
    }
}
