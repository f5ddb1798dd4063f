//! Error types for structured error handling.
//!
//! This module provides:
//! - `InterpolationError`: Errors from interpolation operations
//! - `SolverError`: Errors from root-finding solvers
//! - `GridError`: Errors from asset grid construction
//! - `MarkovError`: Errors from Markov chain validation and the stationary solve

use thiserror::Error;

/// Interpolation-related errors.
///
/// # Variants
/// - `OutOfBounds`: Query point outside valid interpolation domain
/// - `InsufficientData`: Not enough data points for interpolation
/// - `NonMonotonicData`: Knots are not strictly increasing
/// - `InvalidInput`: General invalid input error
///
/// # Examples
/// ```
/// use aiyagari_core::types::InterpolationError;
///
/// let err = InterpolationError::OutOfBounds { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterpolationError {
    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Knots are not strictly increasing.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Root-finding solver errors.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: Non-finite function values
///
/// # Examples
/// ```
/// use aiyagari_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Asset grid construction errors.
///
/// # Examples
/// ```
/// use aiyagari_core::types::GridError;
///
/// let err = GridError::TooFewPoints { got: 1 };
/// assert!(format!("{}", err).contains("at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Fewer than two grid points requested.
    #[error("Grid needs at least 2 points, got {got}")]
    TooFewPoints {
        /// Requested number of points
        got: usize,
    },

    /// Upper bound not above the lower bound.
    #[error("Grid bounds must satisfy min < max, got [{min}, {max}]")]
    InvalidBounds {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Curvature must be a positive finite number.
    #[error("Grid curvature must be positive and finite, got {0}")]
    InvalidCurvature(f64),

    /// Points collapse in floating point (too many points for the spacing).
    #[error("Grid point {index} coincides with its successor; reduce the point count or the curvature")]
    Collapsed {
        /// Index of the first coinciding point
        index: usize,
    },
}

/// Markov chain errors.
///
/// Raised when a transition matrix is malformed or when the linear system for
/// its stationary distribution is singular.
///
/// # Examples
/// ```
/// use aiyagari_core::types::MarkovError;
///
/// let err = MarkovError::NotRowStochastic { row: 1, sum: 0.9 };
/// assert!(format!("{}", err).contains("row 1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarkovError {
    /// The chain has no states.
    #[error("Markov chain has no states")]
    Empty,

    /// State values and transition matrix disagree in size.
    #[error("Transition matrix must be {expected}x{expected}, row {row} has {got} entries")]
    NotSquare {
        /// Number of states implied by the values / row count
        expected: usize,
        /// Offending row
        row: usize,
        /// Number of entries found in that row
        got: usize,
    },

    /// A transition probability is negative or not finite.
    #[error("Invalid transition probability {value} at ({row}, {col})")]
    InvalidProbability {
        /// Row index
        row: usize,
        /// Column index
        col: usize,
        /// Offending value
        value: f64,
    },

    /// A row does not sum to one.
    #[error("Transition matrix row {row} sums to {sum}, expected 1")]
    NotRowStochastic {
        /// Row index
        row: usize,
        /// Row sum
        sum: f64,
    },

    /// The stationary linear system has no unique solution.
    #[error("Stationary distribution system is singular: {0}")]
    Singular(String),

    /// Income values cannot be normalised to mean one.
    #[error("Cannot normalise income states: stationary mean is {0}")]
    DegenerateMean(f64),
}
