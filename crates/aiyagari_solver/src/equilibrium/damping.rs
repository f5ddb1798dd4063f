//! Damped interest-rate updates.

use crate::config::{DampingRule, EquilibriumConfig};

/// Chooses the step `guess -= factor * residual` of the outer loop.
///
/// Under [`DampingRule::Adaptive`] the small factor is used whenever the
/// absolute residual grew relative to the previous outer iteration;
/// [`DampingRule::Fixed`] always uses the large factor.
///
/// # Examples
///
/// ```
/// use aiyagari_solver::config::DampingRule;
/// use aiyagari_solver::equilibrium::Damping;
///
/// let mut damping = Damping::new(DampingRule::Adaptive, 0.1, 0.01);
/// assert_eq!(damping.factor(0.02), 0.1);
/// assert_eq!(damping.factor(0.03), 0.01); // residual grew
/// assert_eq!(damping.factor(0.01), 0.1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Damping {
    rule: DampingRule,
    large: f64,
    small: f64,
    previous: Option<f64>,
}

impl Damping {
    /// New damping state with no residual history.
    pub fn new(rule: DampingRule, large: f64, small: f64) -> Self {
        Self {
            rule,
            large,
            small,
            previous: None,
        }
    }

    /// Damping from the equilibrium settings.
    pub fn from_config(config: &EquilibriumConfig) -> Self {
        Self::new(config.damping_rule, config.damping, config.damping_small)
    }

    /// Factor for `residual`, recording it for the next call.
    pub fn factor(&mut self, residual: f64) -> f64 {
        let factor = match (self.rule, self.previous) {
            (DampingRule::Adaptive, Some(previous)) if residual.abs() > previous.abs() => self.small,
            _ => self.large,
        };
        self.previous = Some(residual);
        factor
    }

    /// Next guess after observing `residual` at `guess`, with the factor used.
    pub fn update(&mut self, guess: f64, residual: f64) -> (f64, f64) {
        let factor = self.factor(residual);
        (guess - factor * residual, factor)
    }
}
