//! Finite-state Markov chains for idiosyncratic income.
//!
//! A chain is a vector of productivity values plus a row-stochastic
//! transition matrix `P[i][j] = Pr(z' = j | z = i)`. Its stationary
//! distribution is obtained directly from the linear system
//!
//! ```text
//! x (P - I) = 0,   sum(x) = 1
//! ```
//!
//! by replacing the last column of `P - I` with ones, so there is no
//! iteration and no convergence failure, only singularity.

use crate::types::MarkovError;
use nalgebra::{DMatrix, DVector};

/// Row sums must be within this distance of one.
pub const ROW_SUM_TOLERANCE: f64 = 1e-8;

/// Negative roundoff in the stationary solve smaller than this is set to zero.
const NEGATIVE_ROUNDOFF: f64 = 1e-10;

/// Stationary distribution of a row-stochastic matrix.
///
/// # Errors
///
/// - `MarkovError::Empty` for a 0x0 matrix
/// - `MarkovError::NotSquare`, `MarkovError::InvalidProbability`,
///   `MarkovError::NotRowStochastic` for malformed matrices
/// - `MarkovError::Singular` when the chain has no unique stationary
///   distribution (e.g. the identity matrix)
///
/// # Example
///
/// ```
/// use aiyagari_core::math::markov::stationary_distribution;
///
/// let pi = stationary_distribution(&[vec![0.9, 0.1], vec![0.5, 0.5]]).unwrap();
/// assert!((pi[0] - 5.0 / 6.0).abs() < 1e-12);
/// assert!((pi[1] - 1.0 / 6.0).abs() < 1e-12);
/// ```
pub fn stationary_distribution(transition: &[Vec<f64>]) -> Result<Vec<f64>, MarkovError> {
    validate_transition(transition, transition.len())?;
    let n = transition.len();

    // Transpose of [P - I with last column := 1]
    let system = DMatrix::from_fn(n, n, |row, col| {
        if row == n - 1 {
            1.0
        } else if row == col {
            transition[col][row] - 1.0
        } else {
            transition[col][row]
        }
    });
    let mut rhs = DVector::zeros(n);
    rhs[n - 1] = 1.0;

    let solution = system
        .lu()
        .solve(&rhs)
        .ok_or_else(|| MarkovError::Singular("LU factorisation has a zero pivot".to_string()))?;

    let mut pi: Vec<f64> = solution.iter().copied().collect();
    for (state, p) in pi.iter_mut().enumerate() {
        if !p.is_finite() || *p < -NEGATIVE_ROUNDOFF {
            return Err(MarkovError::Singular(format!(
                "stationary probability {} for state {}",
                p, state
            )));
        }
        *p = p.max(0.0);
    }
    let total: f64 = pi.iter().sum();
    pi.iter_mut().for_each(|p| *p /= total);

    Ok(pi)
}

fn validate_transition(transition: &[Vec<f64>], n_states: usize) -> Result<(), MarkovError> {
    if n_states == 0 {
        return Err(MarkovError::Empty);
    }
    if transition.len() != n_states {
        return Err(MarkovError::NotSquare {
            expected: n_states,
            row: transition.len().min(n_states),
            got: transition.len(),
        });
    }
    for (row, probs) in transition.iter().enumerate() {
        if probs.len() != n_states {
            return Err(MarkovError::NotSquare {
                expected: n_states,
                row,
                got: probs.len(),
            });
        }
        if let Some((col, &value)) = probs
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p < 0.0)
        {
            return Err(MarkovError::InvalidProbability { row, col, value });
        }
        let sum: f64 = probs.iter().sum();
        if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
            return Err(MarkovError::NotRowStochastic { row, sum });
        }
    }
    Ok(())
}

/// Income process: productivity states, transition matrix and the
/// stationary distribution, validated once and then shared read-only.
///
/// # Example
///
/// ```
/// use aiyagari_core::math::markov::MarkovChain;
///
/// let chain = MarkovChain::new(vec![1.0, 3.0], vec![vec![0.5, 0.5], vec![0.5, 0.5]])
///     .unwrap()
///     .normalised_to_unit_mean()
///     .unwrap();
/// assert!((chain.mean_value() - 1.0).abs() < 1e-12);
/// assert!((chain.value(1) - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MarkovChain {
    values: Vec<f64>,
    transition: Vec<Vec<f64>>,
    stationary: Vec<f64>,
}

impl MarkovChain {
    /// Validate the chain and solve for its stationary distribution.
    pub fn new(values: Vec<f64>, transition: Vec<Vec<f64>>) -> Result<Self, MarkovError> {
        validate_transition(&transition, values.len())?;
        let stationary = stationary_distribution(&transition)?;
        Ok(Self {
            values,
            transition,
            stationary,
        })
    }

    /// Rescale the state values so their stationary mean is one.
    pub fn normalised_to_unit_mean(mut self) -> Result<Self, MarkovError> {
        let mean = self.mean_value();
        if !mean.is_finite() || mean <= 0.0 {
            return Err(MarkovError::DegenerateMean(mean));
        }
        self.values.iter_mut().for_each(|z| *z /= mean);
        Ok(self)
    }

    /// Number of states.
    #[inline]
    pub fn n_states(&self) -> usize {
        self.values.len()
    }

    /// State values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of state `i`.
    #[inline]
    pub fn value(&self, i: usize) -> f64 {
        self.values[i]
    }

    /// Transition probabilities out of state `i`.
    #[inline]
    pub fn row(&self, i: usize) -> &[f64] {
        &self.transition[i]
    }

    /// Full transition matrix, row-major.
    #[inline]
    pub fn transition(&self) -> &[Vec<f64>] {
        &self.transition
    }

    /// Stationary distribution over states.
    #[inline]
    pub fn stationary(&self) -> &[f64] {
        &self.stationary
    }

    /// Mean state value under the stationary distribution.
    pub fn mean_value(&self) -> f64 {
        self.values
            .iter()
            .zip(self.stationary.iter())
            .map(|(z, p)| z * p)
            .sum()
    }

    /// Next state for a uniform draw `u` in `[0, 1]`, conditional on state `i`.
    ///
    /// Cumulative probabilities are accumulated from the highest state
    /// downwards: with two states the agent moves to the high state exactly
    /// when `u <= P[i][high]`.
    pub fn next_state(&self, i: usize, u: f64) -> usize {
        let row = &self.transition[i];
        let mut cumulative = 0.0;
        for j in (1..row.len()).rev() {
            cumulative += row[j];
            if u <= cumulative {
                return j;
            }
        }
        0
    }

    /// State assigned to quantile `u` of the stationary distribution.
    ///
    /// Cumulative probabilities run from the lowest state upwards, so with two
    /// states `u <= pi[0]` maps to the low state.
    pub fn stationary_state(&self, u: f64) -> usize {
        let mut cumulative = 0.0;
        for (j, p) in self.stationary.iter().enumerate() {
            cumulative += p;
            if u <= cumulative {
                return j;
            }
        }
        self.stationary.len() - 1
    }
}
