//! Stationary cross-sectional distribution engines.
//!
//! Three interchangeable strategies recover the long-run distribution of
//! households over (income state, assets) implied by a savings policy:
//!
//! - [`DiscreteIteration`]: forward iteration on a fine-grid density
//! - [`EigenvectorMethod`]: unit eigenvector of the joint transition matrix
//! - [`MonteCarloSimulation`]: a large simulated panel
//!
//! The engine is chosen once from the configuration as a
//! [`DistributionEngine`] and dispatched statically. Every engine reports
//! aggregate capital through [`StationaryOutcome`].

pub mod discrete;
pub mod eigenvector;
pub mod lottery;
pub mod monte_carlo;

pub use discrete::DiscreteIteration;
pub use eigenvector::EigenvectorMethod;
pub use monte_carlo::{Agent, MonteCarloSimulation};

use crate::config::{DistributionMethod, EconomyConfig};
use crate::economy::Economy;
use crate::error::DistributionError;
use crate::household::Policy;

/// Joint probability mass over (income state, fine-grid point).
///
/// Stored row-major: `mass[z * n_points + i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StationaryDensity {
    grid: Vec<f64>,
    n_states: usize,
    mass: Vec<f64>,
    iterations: usize,
}

impl StationaryDensity {
    /// Wrap a mass table over `grid` with `n_states` rows.
    pub fn new(grid: Vec<f64>, n_states: usize, mass: Vec<f64>, iterations: usize) -> Self {
        Self {
            grid,
            n_states,
            mass,
            iterations,
        }
    }

    /// Asset grid of the density.
    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    /// Number of income states.
    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Full mass table.
    pub fn mass(&self) -> &[f64] {
        &self.mass
    }

    /// Mass of income state `z` over the grid.
    pub fn row(&self, z: usize) -> &[f64] {
        let n = self.grid.len();
        &self.mass[z * n..(z + 1) * n]
    }

    /// Sweeps used to compute the density (zero for the eigenvector method).
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Total mass.
    pub fn total(&self) -> f64 {
        self.mass.iter().sum()
    }

    /// Mean assets.
    pub fn aggregate_capital(&self) -> f64 {
        self.mass
            .chunks(self.grid.len())
            .map(|row| row.iter().zip(&self.grid).map(|(m, a)| m * a).sum::<f64>())
            .sum()
    }

    /// Marginal wealth density, summed over income states.
    pub fn wealth_marginal(&self) -> Vec<f64> {
        let n = self.grid.len();
        (0..n)
            .map(|i| (0..self.n_states).map(|z| self.mass[z * n + i]).sum())
            .collect()
    }

    /// Marginal distribution over income states.
    pub fn income_marginal(&self) -> Vec<f64> {
        self.mass
            .chunks(self.grid.len())
            .map(|row| row.iter().sum())
            .collect()
    }
}

/// Result of a Monte Carlo run: the capital path and the final cross-section.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelSimulation {
    capital_path: Vec<f64>,
    burn_in: usize,
    agents: Vec<Agent>,
    edge_share: f64,
}

impl PanelSimulation {
    pub(crate) fn new(capital_path: Vec<f64>, burn_in: usize, agents: Vec<Agent>, edge_share: f64) -> Self {
        Self {
            capital_path,
            burn_in,
            agents,
            edge_share,
        }
    }

    /// Cross-sectional mean assets at the start of every period.
    pub fn capital_path(&self) -> &[f64] {
        &self.capital_path
    }

    /// Discarded initial periods.
    pub fn burn_in(&self) -> usize {
        self.burn_in
    }

    /// Agents after the last period.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Share of post-burn-in observations saving at the top of the grid.
    pub fn edge_share(&self) -> f64 {
        self.edge_share
    }

    /// Time average of mean assets after burn-in.
    pub fn aggregate_capital(&self) -> f64 {
        monte_carlo::post_burn_in_mean(&self.capital_path, self.burn_in)
    }

    /// Euler equation errors of the final cross-section.
    pub fn euler_errors(&self) -> Vec<f64> {
        self.agents.iter().map(|a| a.euler_error).collect()
    }
}

/// Output of a distribution engine.
#[derive(Debug, Clone, PartialEq)]
pub enum StationaryOutcome {
    /// Joint density (discrete or eigenvector engine)
    Density(StationaryDensity),
    /// Simulated panel (Monte Carlo engine)
    Panel(PanelSimulation),
}

impl StationaryOutcome {
    /// Aggregate capital supplied by households.
    pub fn aggregate_capital(&self) -> f64 {
        match self {
            Self::Density(density) => density.aggregate_capital(),
            Self::Panel(panel) => panel.aggregate_capital(),
        }
    }

    /// The density, if the engine produced one.
    pub fn density(&self) -> Option<&StationaryDensity> {
        match self {
            Self::Density(density) => Some(density),
            Self::Panel(_) => None,
        }
    }

    /// The panel, if the engine produced one.
    pub fn panel(&self) -> Option<&PanelSimulation> {
        match self {
            Self::Density(_) => None,
            Self::Panel(panel) => Some(panel),
        }
    }
}

/// Common interface of the distribution engines.
pub trait StationaryDistribution {
    /// Stationary outcome implied by `policy`.
    fn stationary(&self, economy: &Economy, policy: &Policy) -> Result<StationaryOutcome, DistributionError>;
}

impl StationaryDistribution for DiscreteIteration {
    fn stationary(&self, economy: &Economy, policy: &Policy) -> Result<StationaryOutcome, DistributionError> {
        self.solve(economy, policy).map(StationaryOutcome::Density)
    }
}

impl StationaryDistribution for EigenvectorMethod {
    fn stationary(&self, economy: &Economy, policy: &Policy) -> Result<StationaryOutcome, DistributionError> {
        self.solve(economy, policy).map(StationaryOutcome::Density)
    }
}

impl StationaryDistribution for MonteCarloSimulation {
    fn stationary(&self, economy: &Economy, policy: &Policy) -> Result<StationaryOutcome, DistributionError> {
        self.solve(economy, policy).map(StationaryOutcome::Panel)
    }
}

/// Engine selected at configuration time.
///
/// # Examples
///
/// ```
/// use aiyagari_solver::config::{DistributionMethod, EconomyConfig};
/// use aiyagari_solver::distribution::DistributionEngine;
///
/// let mut config = EconomyConfig::default();
/// config.distribution.method = DistributionMethod::Eigenvector;
/// let engine = DistributionEngine::from_config(&config);
/// assert_eq!(engine.method(), DistributionMethod::Eigenvector);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum DistributionEngine {
    /// Forward iteration
    Discrete(DiscreteIteration),
    /// Eigenvector
    Eigenvector(EigenvectorMethod),
    /// Simulation
    MonteCarlo(MonteCarloSimulation),
}

impl DistributionEngine {
    /// Engine named by `config.distribution.method`.
    pub fn from_config(config: &EconomyConfig) -> Self {
        match config.distribution.method {
            DistributionMethod::Discrete => {
                Self::Discrete(DiscreteIteration::from_config(&config.distribution))
            }
            DistributionMethod::Eigenvector => Self::Eigenvector(EigenvectorMethod),
            DistributionMethod::MonteCarlo => {
                Self::MonteCarlo(MonteCarloSimulation::from_config(&config.simulation))
            }
        }
    }

    /// Method implemented by this engine.
    pub fn method(&self) -> DistributionMethod {
        match self {
            Self::Discrete(_) => DistributionMethod::Discrete,
            Self::Eigenvector(_) => DistributionMethod::Eigenvector,
            Self::MonteCarlo(_) => DistributionMethod::MonteCarlo,
        }
    }
}

impl StationaryDistribution for DistributionEngine {
    fn stationary(&self, economy: &Economy, policy: &Policy) -> Result<StationaryOutcome, DistributionError> {
        match self {
            Self::Discrete(engine) => engine.stationary(economy, policy),
            Self::Eigenvector(engine) => engine.stationary(economy, policy),
            Self::MonteCarlo(engine) => engine.stationary(economy, policy),
        }
    }
}
