//! Economy configuration.
//!
//! [`EconomyConfig`] is the single immutable input of a solve run. Every
//! field has a default matching the reference calibration, so a TOML file
//! only needs the entries it changes:
//!
//! ```toml
//! [preferences]
//! sigma = 3.0
//!
//! [distribution]
//! method = "monte carlo"
//! ```
//!
//! Validation collects every violation instead of stopping at the first.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stationary distribution strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionMethod {
    /// Forward iteration on a discretised density.
    #[default]
    Discrete,
    /// Unit eigenvector of the joint transition matrix.
    Eigenvector,
    /// Simulation of a large agent panel.
    #[serde(alias = "monte carlo", alias = "monte-carlo")]
    MonteCarlo,
}

impl FromStr for DistributionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "discrete" => Ok(Self::Discrete),
            "eigenvector" => Ok(Self::Eigenvector),
            "monte carlo" | "monte-carlo" | "monte_carlo" => Ok(Self::MonteCarlo),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for DistributionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discrete => write!(f, "discrete"),
            Self::Eigenvector => write!(f, "eigenvector"),
            Self::MonteCarlo => write!(f, "monte carlo"),
        }
    }
}

/// Rule choosing the damping factor of the interest-rate update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DampingRule {
    /// Large factor, switching to the small factor whenever the absolute
    /// residual grew relative to the previous outer iteration.
    #[default]
    Adaptive,
    /// Large factor on every iteration.
    Fixed,
}

impl FromStr for DampingRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "adaptive" => Ok(Self::Adaptive),
            "fixed" => Ok(Self::Fixed),
            _ => Err(ConfigError::UnknownDampingRule(s.to_string())),
        }
    }
}

impl fmt::Display for DampingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adaptive => write!(f, "adaptive"),
            Self::Fixed => write!(f, "fixed"),
        }
    }
}

/// CRRA preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceConfig {
    /// Relative risk aversion σ
    pub sigma: f64,
    /// Discount factor β
    pub beta: f64,
}

impl Default for PreferenceConfig {
    fn default() -> Self {
        Self {
            sigma: 2.0,
            beta: 0.96,
        }
    }
}

/// Cobb-Douglas technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnologyConfig {
    /// Capital share α
    pub alpha: f64,
    /// Depreciation rate δ
    pub delta: f64,
}

impl Default for TechnologyConfig {
    fn default() -> Self {
        Self {
            alpha: 0.36,
            delta: 0.08,
        }
    }
}

/// Idiosyncratic productivity process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeConfig {
    /// Productivity states, lowest first
    pub states: Vec<f64>,
    /// Row-stochastic transition matrix
    pub transition: Vec<Vec<f64>>,
    /// Rescale states to unit mean under the stationary distribution
    pub normalise: bool,
}

impl Default for IncomeConfig {
    fn default() -> Self {
        Self {
            states: vec![0.5, 1.5],
            transition: vec![vec![0.75, 0.25], vec![0.25, 0.75]],
            normalise: true,
        }
    }
}

/// Asset grids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Borrowing limit (first grid point)
    pub borrowing_limit: f64,
    /// Last grid point
    pub max_assets: f64,
    /// Points on the policy grid
    pub points: usize,
    /// Power spacing exponent
    pub curvature: f64,
    /// Density and diagnostics grid size as a multiple of `points`
    pub fine_multiplier: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            borrowing_limit: 0.0,
            max_assets: 100.0,
            points: 200,
            curvature: 3.0,
            fine_multiplier: 3,
        }
    }
}

impl GridConfig {
    /// Size of the fine grid.
    pub fn fine_points(&self) -> usize {
        self.points * self.fine_multiplier
    }
}

/// Policy function iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseholdConfig {
    /// Sup-norm tolerance on the savings policy
    pub tolerance: f64,
    /// Sweep cap
    pub max_iterations: usize,
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 2000,
        }
    }
}

/// Stationary distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistributionConfig {
    /// Engine
    pub method: DistributionMethod,
    /// Sup-norm tolerance of forward iteration
    pub tolerance: f64,
    /// Sweep cap of forward iteration
    pub max_iterations: usize,
}

impl Default for DistributionConfig {
    fn default() -> Self {
        Self {
            method: DistributionMethod::Discrete,
            tolerance: 1e-6,
            max_iterations: 2000,
        }
    }
}

/// Monte Carlo panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of agents
    pub agents: usize,
    /// Number of simulated periods
    pub periods: usize,
    /// Periods discarded before averaging
    pub burn_in: usize,
    /// Seed of the shuffling generator
    pub seed: u64,
    /// Assets of every agent at t = 0
    pub initial_assets: f64,
    /// Largest tolerated share of post-burn-in observations at the grid edge
    pub max_edge_share: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            agents: 50_000,
            periods: 2_000,
            burn_in: 1_000,
            seed: 123,
            initial_assets: 1.0,
            max_edge_share: 0.01,
        }
    }
}

/// Outer interest-rate loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquilibriumConfig {
    /// First interest rate guess
    pub initial_rate: f64,
    /// Absolute tolerance on the rate residual
    pub tolerance: f64,
    /// Outer iteration cap
    pub max_iterations: usize,
    /// Default damping factor
    pub damping: f64,
    /// Damping factor after a residual increase
    pub damping_small: f64,
    /// Damping factor selection
    pub damping_rule: DampingRule,
}

impl Default for EquilibriumConfig {
    fn default() -> Self {
        Self {
            initial_rate: 0.02,
            tolerance: 1e-4,
            max_iterations: 100,
            damping: 0.1,
            damping_small: 0.01,
            damping_rule: DampingRule::Adaptive,
        }
    }
}

/// Complete description of one solve run.
///
/// # Examples
///
/// ```
/// use aiyagari_solver::config::{DistributionMethod, EconomyConfig};
///
/// let mut config = EconomyConfig::default();
/// assert!(config.validate().is_ok());
///
/// config.distribution.method = "monte carlo".parse().unwrap();
/// assert_eq!(config.distribution.method, DistributionMethod::MonteCarlo);
///
/// config.preferences.beta = 1.5;
/// assert!(config.validate().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Household preferences
    pub preferences: PreferenceConfig,
    /// Firm technology
    pub technology: TechnologyConfig,
    /// Income process
    pub income: IncomeConfig,
    /// Asset grids
    pub grid: GridConfig,
    /// Policy function iteration
    pub household: HouseholdConfig,
    /// Stationary distribution
    pub distribution: DistributionConfig,
    /// Monte Carlo panel
    pub simulation: SimulationConfig,
    /// Outer loop
    pub equilibrium: EquilibriumConfig,
}

impl EconomyConfig {
    /// Check every field, reporting all violations at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let p = &self.preferences;
        if !(p.sigma.is_finite() && p.sigma > 0.0) {
            errors.push(format!("preferences.sigma must be positive, got {}", p.sigma));
        }
        if !(p.beta > 0.0 && p.beta < 1.0) {
            errors.push(format!("preferences.beta must lie in (0, 1), got {}", p.beta));
        }

        let t = &self.technology;
        if !(t.alpha > 0.0 && t.alpha < 1.0) {
            errors.push(format!("technology.alpha must lie in (0, 1), got {}", t.alpha));
        }
        if !(0.0..=1.0).contains(&t.delta) {
            errors.push(format!("technology.delta must lie in [0, 1], got {}", t.delta));
        }

        let inc = &self.income;
        if inc.states.is_empty() {
            errors.push("income.states must not be empty".to_string());
        }
        if let Some(z) = inc.states.iter().find(|z| !(z.is_finite() && **z >= 0.0)) {
            errors.push(format!("income.states must be non-negative, got {}", z));
        }
        if inc.transition.len() != inc.states.len()
            || inc.transition.iter().any(|row| row.len() != inc.states.len())
        {
            errors.push(format!(
                "income.transition must be {n}x{n} to match income.states",
                n = inc.states.len()
            ));
        }

        let g = &self.grid;
        if !(g.borrowing_limit.is_finite() && g.max_assets.is_finite()) || g.max_assets <= g.borrowing_limit {
            errors.push(format!(
                "grid.max_assets ({}) must exceed grid.borrowing_limit ({})",
                g.max_assets, g.borrowing_limit
            ));
        }
        if g.points < 2 {
            errors.push(format!("grid.points must be at least 2, got {}", g.points));
        }
        if !(g.curvature.is_finite() && g.curvature > 0.0) {
            errors.push(format!("grid.curvature must be positive, got {}", g.curvature));
        }
        if g.fine_multiplier == 0 {
            errors.push("grid.fine_multiplier must be at least 1".to_string());
        }

        check_stage(&mut errors, "household", self.household.tolerance, self.household.max_iterations);
        check_stage(
            &mut errors,
            "distribution",
            self.distribution.tolerance,
            self.distribution.max_iterations,
        );
        check_stage(
            &mut errors,
            "equilibrium",
            self.equilibrium.tolerance,
            self.equilibrium.max_iterations,
        );

        let s = &self.simulation;
        if self.distribution.method == DistributionMethod::MonteCarlo {
            if s.agents == 0 {
                errors.push("simulation.agents must be greater than 0".to_string());
            }
            if s.burn_in >= s.periods {
                errors.push(format!(
                    "simulation.burn_in ({}) must be smaller than simulation.periods ({})",
                    s.burn_in, s.periods
                ));
            }
            if !(s.max_edge_share > 0.0 && s.max_edge_share < 1.0) {
                errors.push(format!(
                    "simulation.max_edge_share must lie in (0, 1), got {}",
                    s.max_edge_share
                ));
            }
            if !s.initial_assets.is_finite() {
                errors.push("simulation.initial_assets must be finite".to_string());
            }
        }

        let e = &self.equilibrium;
        if !(e.damping > 0.0 && e.damping <= 1.0) {
            errors.push(format!("equilibrium.damping must lie in (0, 1], got {}", e.damping));
        }
        if !(e.damping_small > 0.0 && e.damping_small <= e.damping) {
            errors.push(format!(
                "equilibrium.damping_small must lie in (0, damping], got {}",
                e.damping_small
            ));
        }
        if (1.0 + e.initial_rate) * p.beta >= 1.0 {
            errors.push(format!(
                "equilibrium.initial_rate {} violates (1 + r)β < 1",
                e.initial_rate
            ));
        }
        if e.initial_rate + t.delta <= 0.0 {
            errors.push(format!(
                "equilibrium.initial_rate {} must exceed -delta",
                e.initial_rate
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn check_stage(errors: &mut Vec<String>, stage: &str, tolerance: f64, max_iterations: usize) {
    if !(tolerance.is_finite() && tolerance > 0.0) {
        errors.push(format!("{}.tolerance must be positive, got {}", stage, tolerance));
    }
    if max_iterations == 0 {
        errors.push(format!("{}.max_iterations must be greater than 0", stage));
    }
}
