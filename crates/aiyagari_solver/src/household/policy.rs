//! Converged household decision rules.

use aiyagari_core::math::interpolators::LinearInterpolator;
use aiyagari_core::types::InterpolationError;
use aiyagari_models::Prices;

/// Savings and consumption tables over (income state, policy-grid point).
///
/// Tables are stored row-major: entry `z * n_points + i` belongs to income
/// state `z` and grid point `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    grid: Vec<f64>,
    n_states: usize,
    savings: Vec<f64>,
    consumption: Vec<f64>,
    prices: Prices,
    iterations: usize,
}

impl Policy {
    pub(crate) fn new(
        grid: Vec<f64>,
        n_states: usize,
        savings: Vec<f64>,
        consumption: Vec<f64>,
        prices: Prices,
        iterations: usize,
    ) -> Self {
        debug_assert_eq!(savings.len(), n_states * grid.len());
        debug_assert_eq!(consumption.len(), savings.len());
        Self {
            grid,
            n_states,
            savings,
            consumption,
            prices,
            iterations,
        }
    }

    /// Policy grid.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Number of income states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Number of policy-grid points.
    pub fn n_points(&self) -> usize {
        self.grid.len()
    }

    /// Prices the policy was solved at.
    pub fn prices(&self) -> Prices {
        self.prices
    }

    /// Sweeps needed to converge.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Full savings table, row-major.
    pub fn savings(&self) -> &[f64] {
        &self.savings
    }

    /// Full consumption table, row-major.
    pub fn consumption(&self) -> &[f64] {
        &self.consumption
    }

    /// Savings of income state `z` over the grid.
    pub fn savings_row(&self, z: usize) -> &[f64] {
        let n = self.grid.len();
        &self.savings[z * n..(z + 1) * n]
    }

    /// Consumption of income state `z` over the grid.
    pub fn consumption_row(&self, z: usize) -> &[f64] {
        let n = self.grid.len();
        &self.consumption[z * n..(z + 1) * n]
    }

    /// Savings chosen at the top grid point in state `z`.
    pub fn top_savings(&self, z: usize) -> f64 {
        self.savings[(z + 1) * self.grid.len() - 1]
    }

    /// Interpolating rule for off-grid asset levels.
    pub fn savings_rule(&self) -> Result<SavingsRule, InterpolationError> {
        SavingsRule::from_table(&self.grid, &self.savings, self.grid[0])
    }
}

/// Savings policy evaluated at arbitrary asset levels.
///
/// Linear between grid points, flat beyond either end, and never below the
/// borrowing limit.
#[derive(Debug, Clone)]
pub struct SavingsRule {
    rows: Vec<LinearInterpolator<f64>>,
    floor: f64,
}

impl SavingsRule {
    /// Build from a row-major `table` with one row per income state.
    pub fn from_table(grid: &[f64], table: &[f64], floor: f64) -> Result<Self, InterpolationError> {
        let rows = table
            .chunks(grid.len())
            .map(|row| LinearInterpolator::new(grid, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rows, floor })
    }

    /// Next-period assets of an agent in state `z` holding `assets`.
    #[inline]
    pub fn next_assets(&self, z: usize, assets: f64) -> f64 {
        self.rows[z].interpolate_flat(assets).max(self.floor)
    }

    /// Number of income states.
    pub fn n_states(&self) -> usize {
        self.rows.len()
    }
}
