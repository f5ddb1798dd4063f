//! Exact stationary density from the unit eigenvector of the joint
//! transition matrix.
//!
//! The `(states * fine) x (states * fine)` matrix `Q` moves mass from cell
//! `(z, i)` to `(z', j)` with the same linear lottery as forward iteration,
//! weighted by `P[z][z']`. The stationary density is the eigenvector of `Q^T`
//! for the eigenvalue closest to one. Eigenvalues come from a real Schur
//! decomposition; the eigenvector from shifted inverse iteration on an LU
//! factorisation. Dense and cubic in the cell count, so this is a
//! cross-check rather than the default engine.

use super::lottery::policy_lotteries;
use super::StationaryDensity;
use crate::economy::Economy;
use crate::error::DistributionError;
use crate::household::Policy;
use aiyagari_core::math::grid::Lottery;
use aiyagari_core::math::stats::sup_norm_distance;
use nalgebra::{DMatrix, DVector};
use std::time::Instant;
use tracing::debug;

/// Rows of `Q` must sum to one within this distance.
const ROW_SUM_TOLERANCE: f64 = 1e-10;

/// Largest accepted imaginary part of the selected eigenvalue.
const IMAGINARY_TOLERANCE: f64 = 1e-6;

/// Shift below the selected eigenvalue for inverse iteration.
const SHIFT: f64 = 1e-9;

const MAX_INVERSE_STEPS: usize = 50;

/// Negative mass below this magnitude is treated as roundoff.
const NEGATIVE_ROUNDOFF: f64 = 1e-10;

/// Eigenvector engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EigenvectorMethod;

impl EigenvectorMethod {
    /// Stationary density for `policy`.
    ///
    /// # Errors
    ///
    /// - `DistributionError::TransitionRowSum` if a row of `Q` leaks mass
    /// - `DistributionError::ComplexEigenvector` if the eigenvalue closest
    ///   to one has an imaginary part above `1e-6`
    /// - `DistributionError::Eigen` if inverse iteration breaks down
    pub fn solve(&self, economy: &Economy, policy: &Policy) -> Result<StationaryDensity, DistributionError> {
        let start = Instant::now();
        let rule = policy.savings_rule()?;
        let lotteries = policy_lotteries(economy, &rule);
        let q = transition_matrix(economy, &lotteries);
        check_rows(&q)?;

        let qt = q.transpose();
        let eigenvalue = unit_eigenvalue(&qt)?;
        let mass = inverse_iteration(&qt, eigenvalue)?;

        debug!(
            eigenvalue,
            cells = mass.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "eigenvector density computed"
        );

        Ok(StationaryDensity::new(
            economy.fine_grid().points().to_vec(),
            economy.income().n_states(),
            mass,
            0,
        ))
    }
}

/// Dense joint transition matrix, rows indexed by the current cell.
pub fn transition_matrix(economy: &Economy, lotteries: &[Lottery]) -> DMatrix<f64> {
    let income = economy.income();
    let n_fine = economy.fine_grid().len();
    let n = economy.n_cells();
    let mut q = DMatrix::zeros(n, n);

    for (k, lottery) in lotteries.iter().enumerate() {
        let z = k / n_fine;
        for (j, p) in income.row(z).iter().enumerate() {
            q[(k, j * n_fine + lottery.lower)] += p * lottery.lower_weight();
            q[(k, j * n_fine + lottery.upper)] += p * lottery.upper_weight;
        }
    }
    q
}

fn check_rows(q: &DMatrix<f64>) -> Result<(), DistributionError> {
    for (row, values) in q.row_iter().enumerate() {
        let sum = values.sum();
        if (sum - 1.0).abs() > ROW_SUM_TOLERANCE {
            return Err(DistributionError::TransitionRowSum { row, sum });
        }
    }
    Ok(())
}

/// Real part of the eigenvalue of `qt` closest to one.
fn unit_eigenvalue(qt: &DMatrix<f64>) -> Result<f64, DistributionError> {
    let eigenvalues = qt.complex_eigenvalues();
    let closest = eigenvalues
        .iter()
        .min_by(|x, y| {
            let dx = (x.re - 1.0).hypot(x.im);
            let dy = (y.re - 1.0).hypot(y.im);
            dx.total_cmp(&dy)
        })
        .ok_or_else(|| DistributionError::Eigen("matrix has no eigenvalues".to_string()))?;

    if closest.im.abs() > IMAGINARY_TOLERANCE {
        return Err(DistributionError::ComplexEigenvector {
            re: closest.re,
            im: closest.im,
        });
    }
    Ok(closest.re)
}

/// Eigenvector of `qt` for `eigenvalue`, normalised to sum to one.
fn inverse_iteration(qt: &DMatrix<f64>, eigenvalue: f64) -> Result<Vec<f64>, DistributionError> {
    let n = qt.nrows();
    let shifted = qt - DMatrix::identity(n, n) * (eigenvalue - SHIFT);
    let lu = shifted.lu();

    let mut x = DVector::from_element(n, 1.0 / n as f64);
    for _ in 0..MAX_INVERSE_STEPS {
        let y = lu
            .solve(&x)
            .ok_or_else(|| DistributionError::Eigen("shifted matrix is singular".to_string()))?;
        let total = y.sum();
        if !total.is_finite() || total == 0.0 {
            return Err(DistributionError::Eigen(format!(
                "eigenvector cannot be normalised (sum {})",
                total
            )));
        }
        let y = y / total;
        let change = sup_norm_distance(y.as_slice(), x.as_slice());
        x = y;
        if change < 1e-14 {
            break;
        }
    }

    let mut mass = Vec::with_capacity(n);
    for (cell, &m) in x.iter().enumerate() {
        if m < -NEGATIVE_ROUNDOFF {
            return Err(DistributionError::Eigen(format!(
                "negative stationary mass {} at cell {}",
                m, cell
            )));
        }
        mass.push(m.max(0.0));
    }
    let total: f64 = mass.iter().sum();
    mass.iter_mut().for_each(|m| *m /= total);
    Ok(mass)
}
