//! Validated, immutable economy shared by every solver stage.

use crate::config::EconomyConfig;
use crate::error::ConfigError;
use aiyagari_core::math::grid::AssetGrid;
use aiyagari_core::math::markov::MarkovChain;
use aiyagari_models::{CobbDouglas, Crra, Prices};

/// Grids, income process and model primitives built from an
/// [`EconomyConfig`].
///
/// Constructed once per run and borrowed read-only by the household solver,
/// the distribution engines and the diagnostics.
///
/// # Examples
///
/// ```
/// use aiyagari_solver::config::EconomyConfig;
/// use aiyagari_solver::economy::Economy;
///
/// let economy = Economy::new(EconomyConfig::default()).unwrap();
/// assert_eq!(economy.grid().len(), 200);
/// assert_eq!(economy.fine_grid().len(), 600);
/// assert!((economy.income().mean_value() - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Economy {
    config: EconomyConfig,
    grid: AssetGrid,
    fine_grid: AssetGrid,
    income: MarkovChain,
    preferences: Crra,
    technology: CobbDouglas,
}

impl Economy {
    /// Validate `config` and build the economy.
    pub fn new(config: EconomyConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let g = &config.grid;
        let grid = AssetGrid::new(g.borrowing_limit, g.max_assets, g.points, g.curvature)?;
        let fine_grid = grid.resized(g.fine_points())?;

        let mut income = MarkovChain::new(
            config.income.states.clone(),
            config.income.transition.clone(),
        )?;
        if config.income.normalise {
            income = income.normalised_to_unit_mean()?;
        }

        let preferences = Crra::new(config.preferences.sigma, config.preferences.beta)?;
        let technology = CobbDouglas::new(config.technology.alpha, config.technology.delta)?;

        Ok(Self {
            config,
            grid,
            fine_grid,
            income,
            preferences,
            technology,
        })
    }

    /// Configuration the economy was built from.
    pub fn config(&self) -> &EconomyConfig {
        &self.config
    }

    /// Policy grid.
    pub fn grid(&self) -> &AssetGrid {
        &self.grid
    }

    /// Grid used by the density engines and the full-grid diagnostics.
    pub fn fine_grid(&self) -> &AssetGrid {
        &self.fine_grid
    }

    /// Borrowing limit.
    pub fn borrowing_limit(&self) -> f64 {
        self.grid.min()
    }

    /// Income process (normalised if configured).
    pub fn income(&self) -> &MarkovChain {
        &self.income
    }

    /// Household preferences.
    pub fn preferences(&self) -> &Crra {
        &self.preferences
    }

    /// Firm technology.
    pub fn technology(&self) -> &CobbDouglas {
        &self.technology
    }

    /// Prices implied by the interest rate `rate`.
    pub fn prices(&self, rate: f64) -> Prices {
        Prices::from_rate(rate, &self.technology)
    }

    /// Number of (income state, fine-grid point) cells.
    pub fn n_cells(&self) -> usize {
        self.income.n_states() * self.fine_grid.len()
    }
}
