//! Monte Carlo simulation of a household panel.
//!
//! Every agent starts with the same assets and an income state assigned by
//! quantile of the stationary income distribution. Each period a fresh
//! shuffle of evenly spaced draws on `[0, 1]` decides income transitions,
//! savings follow the interpolated policy (never below the borrowing limit)
//! and consumption is the residual of the budget constraint. Aggregate
//! capital is the time average, after burn-in, of cross-sectional mean
//! assets at the start of each period.

use super::PanelSimulation;
use crate::config::SimulationConfig;
use crate::economy::Economy;
use crate::error::DistributionError;
use crate::household::{euler_equation_error, Policy, SavingsRule};
use aiyagari_core::math::stats::mean;
use aiyagari_models::Prices;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use std::time::Instant;
use tracing::debug;

/// One simulated household at the end of a period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    /// Income state index
    pub state: usize,
    /// Productivity of the income state
    pub productivity: f64,
    /// Assets carried into the next period
    pub savings: f64,
    /// Consumption this period
    pub consumption: f64,
    /// Cash on hand this period, `(1 + r) a + w z`
    pub cash_on_hand: f64,
    /// Euler equation error this period; `NaN` when constrained or at the
    /// top of the grid
    pub euler_error: f64,
}

impl Agent {
    fn new(state: usize, productivity: f64, assets: f64) -> Self {
        Self {
            state,
            productivity,
            savings: assets,
            consumption: f64::NAN,
            cash_on_hand: f64::NAN,
            euler_error: f64::NAN,
        }
    }
}

/// Monte Carlo engine.
///
/// # Examples
///
/// ```
/// use aiyagari_solver::config::SimulationConfig;
/// use aiyagari_solver::distribution::MonteCarloSimulation;
///
/// let engine = MonteCarloSimulation::from_config(&SimulationConfig::default());
/// assert_eq!(engine.agents(), 50_000);
/// assert_eq!(engine.seed(), 123);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloSimulation {
    agents: usize,
    periods: usize,
    burn_in: usize,
    seed: u64,
    initial_assets: f64,
    max_edge_share: f64,
}

impl MonteCarloSimulation {
    /// Engine using the configured panel.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            agents: config.agents,
            periods: config.periods,
            burn_in: config.burn_in,
            seed: config.seed,
            initial_assets: config.initial_assets,
            max_edge_share: config.max_edge_share,
        }
    }

    /// Number of agents.
    pub fn agents(&self) -> usize {
        self.agents
    }

    /// Number of simulated periods.
    pub fn periods(&self) -> usize {
        self.periods
    }

    /// Discarded initial periods.
    pub fn burn_in(&self) -> usize {
        self.burn_in
    }

    /// Seed of the shuffling generator.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Simulate the panel under `policy`.
    ///
    /// # Errors
    ///
    /// `DistributionError::InvalidPanel` when the panel leaves no
    /// post-burn-in observations, `DistributionError::GridTooSmall` when more
    /// than the permitted share of post-burn-in observations save at the top
    /// of the grid.
    pub fn solve(&self, economy: &Economy, policy: &Policy) -> Result<PanelSimulation, DistributionError> {
        self.check_panel()?;
        let start = Instant::now();
        let income = economy.income();
        let prices = policy.prices();
        let rule = policy.savings_rule()?;
        let edges: Vec<f64> = (0..income.n_states()).map(|z| policy.top_savings(z)).collect();

        let spaced = evenly_spaced(self.agents);
        let mut panel: Vec<Agent> = spaced
            .iter()
            .map(|&u| {
                let z = income.stationary_state(u);
                Agent::new(z, income.value(z), self.initial_assets)
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut draws = spaced.clone();
        let mut capital_path = Vec::with_capacity(self.periods);
        let mut edge_hits = 0usize;

        for t in 0..self.periods {
            draws.copy_from_slice(&spaced);
            draws.shuffle(&mut rng);

            capital_path.push(panel.iter().map(|agent| agent.savings).sum::<f64>() / self.agents as f64);

            let hits: usize = panel
                .par_iter_mut()
                .zip(draws.par_iter())
                .map(|(agent, &u)| {
                    usize::from(self.step(economy, &prices, &rule, &edges, agent, u))
                })
                .sum();

            if t >= self.burn_in {
                edge_hits += hits;
            }
        }

        let observations = self.agents * (self.periods - self.burn_in);
        let edge_share = edge_hits as f64 / observations as f64;
        if edge_share > self.max_edge_share {
            return Err(DistributionError::GridTooSmall {
                share: edge_share,
                limit: self.max_edge_share,
            });
        }

        debug!(
            agents = self.agents,
            periods = self.periods,
            edge_share,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "panel simulated"
        );

        Ok(PanelSimulation::new(capital_path, self.burn_in, panel, edge_share))
    }

    fn check_panel(&self) -> Result<(), DistributionError> {
        if self.agents == 0 {
            return Err(DistributionError::InvalidPanel("at least one agent is required".to_string()));
        }
        if self.burn_in >= self.periods {
            return Err(DistributionError::InvalidPanel(format!(
                "burn-in ({}) must be shorter than the simulation ({} periods)",
                self.burn_in, self.periods
            )));
        }
        if !(self.max_edge_share > 0.0 && self.max_edge_share < 1.0) {
            return Err(DistributionError::InvalidPanel(format!(
                "edge share limit {} must lie in (0, 1)",
                self.max_edge_share
            )));
        }
        if !self.initial_assets.is_finite() {
            return Err(DistributionError::InvalidPanel(format!(
                "initial assets {} must be finite",
                self.initial_assets
            )));
        }
        Ok(())
    }

    /// Advance one agent by a period; returns whether it saved at the grid edge.
    fn step(
        &self,
        economy: &Economy,
        prices: &Prices,
        rule: &SavingsRule,
        edges: &[f64],
        agent: &mut Agent,
        draw: f64,
    ) -> bool {
        let income = economy.income();
        let floor = economy.borrowing_limit();
        let assets = agent.savings;

        let z = income.next_state(agent.state, draw);
        let productivity = income.value(z);
        let cash = prices.cash_on_hand(assets, productivity);
        let savings = rule.next_assets(z, assets);
        let consumption = cash - savings;

        let at_edge = savings >= edges[z];
        let constrained = savings <= floor;
        let euler_error = if !at_edge && !constrained {
            euler_equation_error(
                economy.preferences(),
                income,
                prices,
                rule,
                z,
                savings,
                consumption,
            )
        } else {
            f64::NAN
        };

        *agent = Agent {
            state: z,
            productivity,
            savings,
            consumption,
            cash_on_hand: cash,
            euler_error,
        };
        at_edge
    }
}

fn evenly_spaced(n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![0.0; n];
    }
    let last = (n - 1) as f64;
    (0..n).map(|i| i as f64 / last).collect()
}

/// Mean of the capital path after burn-in.
pub(crate) fn post_burn_in_mean(capital_path: &[f64], burn_in: usize) -> f64 {
    mean(&capital_path[burn_in.min(capital_path.len())..])
}
