//! Core error types.
//!
//! This module provides:
//! - `error`: Structured error types for interpolation, root finding, grid
//!   construction and Markov chain validation
//!
//! # Re-exports
//!
//! [`InterpolationError`], [`SolverError`], [`GridError`], [`MarkovError`] from `error`

pub mod error;

pub use error::{GridError, InterpolationError, MarkovError, SolverError};
