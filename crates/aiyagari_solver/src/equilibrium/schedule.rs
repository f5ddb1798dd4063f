//! Capital market schedule: firm demand and household supply over a range
//! of interest rates.
//!
//! Supply at each rate comes from the household problem and the discrete
//! density engine, independent of the engine configured for the
//! equilibrium loop.

use crate::distribution::DiscreteIteration;
use crate::economy::Economy;
use crate::error::SolveError;
use crate::household::HouseholdSolver;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};

/// Demand and supply of capital at one interest rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SchedulePoint {
    /// Interest rate
    pub rate: f64,
    /// Wage implied by the rate
    pub wage: f64,
    /// Capital demanded by the firm
    pub capital_demand: f64,
    /// Capital supplied by households
    pub capital_supply: f64,
}

/// `n` evenly spaced rates from `-0.01` to just below the rate of time
/// preference `1/β - 1`.
pub fn default_rates(economy: &Economy, n: usize) -> Vec<f64> {
    let low = -0.01;
    let high = economy.preferences().complete_markets_rate() - 0.001;
    match n {
        0 => Vec::new(),
        1 => vec![low],
        _ => (0..n)
            .map(|i| low + (high - low) * i as f64 / (n - 1) as f64)
            .collect(),
    }
}

/// Capital demand and supply at every rate in `rates`.
///
/// # Errors
///
/// - `SolveError::UnstableRate` if a rate violates `(1 + r)β < 1`
/// - household and density failures at any rate
pub fn capital_schedule(economy: &Economy, rates: &[f64]) -> Result<Vec<SchedulePoint>, SolveError> {
    let start = Instant::now();
    let household = HouseholdSolver::new(economy);
    let density = DiscreteIteration::from_config(&economy.config().distribution);
    let technology = economy.technology();

    let points = rates
        .iter()
        .map(|&rate| {
            let patience = economy.preferences().gross_patience(rate);
            if patience >= 1.0 || rate + technology.delta() <= 0.0 {
                return Err(SolveError::UnstableRate { rate, patience });
            }
            let prices = economy.prices(rate);
            let policy = household.solve(prices)?;
            let supply = density.solve(economy, &policy)?.aggregate_capital();
            debug!(rate, capital_supply = supply, "schedule point");
            Ok(SchedulePoint {
                rate,
                wage: prices.wage,
                capital_demand: technology.capital_demand(rate),
                capital_supply: supply,
            })
        })
        .collect::<Result<Vec<_>, SolveError>>()?;

    info!(
        points = points.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "capital market schedule computed"
    );
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;

    fn economy() -> Economy {
        let mut config = EconomyConfig::default();
        config.grid.points = 50;
        config.grid.max_assets = 80.0;
        Economy::new(config).unwrap()
    }

    #[test]
    fn test_default_rates_span() {
        let economy = economy();
        let rates = default_rates(&economy, 25);
        assert_eq!(rates.len(), 25);
        assert_eq!(rates[0], -0.01);
        assert!((rates[24] - (1.0 / 0.96 - 1.0 - 0.001)).abs() < 1e-12);
    }

    #[test]
    fn test_supply_rises_and_demand_falls() {
        let economy = economy();
        let schedule = capital_schedule(&economy, &[0.0, 0.02, 0.035]).unwrap();
        for pair in schedule.windows(2) {
            assert!(pair[1].capital_supply > pair[0].capital_supply);
            assert!(pair[1].capital_demand < pair[0].capital_demand);
        }
        // Excess demand at low rates, excess supply near 1/β - 1
        assert!(schedule[0].capital_demand > schedule[0].capital_supply);
        assert!(schedule[2].capital_demand < schedule[2].capital_supply);
    }

    #[test]
    fn test_rejects_impatient_rate() {
        let economy = economy();
        assert!(matches!(
            capital_schedule(&economy, &[0.05]),
            Err(SolveError::UnstableRate { .. })
        ));
    }
}
