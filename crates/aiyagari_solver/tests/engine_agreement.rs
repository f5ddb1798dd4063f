//! Cross-checks of the three distribution engines on a common policy

use aiyagari_solver::config::SimulationConfig;
use aiyagari_solver::prelude::*;

fn economy() -> Economy {
    let mut config = EconomyConfig::default();
    config.grid.points = 100;
    config.grid.fine_multiplier = 2;
    config.distribution.tolerance = 1e-10;
    config.distribution.max_iterations = 20_000;
    Economy::new(config).unwrap()
}

fn policy(economy: &Economy) -> Policy {
    HouseholdSolver::new(economy)
        .solve(economy.prices(0.03))
        .unwrap()
}

#[test]
fn test_discrete_and_eigenvector_agree() {
    let economy = economy();
    let policy = policy(&economy);

    let discrete = DiscreteIteration::from_config(&economy.config().distribution)
        .solve(&economy, &policy)
        .unwrap();
    let exact = EigenvectorMethod.solve(&economy, &policy).unwrap();

    for density in [&discrete, &exact] {
        assert!((density.total() - 1.0).abs() < 1e-10);
        assert!(density.mass().iter().all(|m| *m >= 0.0));
    }
    let (k1, k2) = (discrete.aggregate_capital(), exact.aggregate_capital());
    assert!((k1 - k2).abs() / k2 < 1e-4, "discrete {} vs eigenvector {}", k1, k2);
}

#[test]
fn test_engines_agree_through_trait() {
    let economy = economy();
    let policy = policy(&economy);

    let mut config = economy.config().clone();
    let engines: Vec<DistributionEngine> = [DistributionMethod::Discrete, DistributionMethod::Eigenvector]
        .into_iter()
        .map(|method| {
            config.distribution.method = method;
            DistributionEngine::from_config(&config)
        })
        .collect();

    let capital: Vec<f64> = engines
        .iter()
        .map(|engine| engine.stationary(&economy, &policy).unwrap().aggregate_capital())
        .collect();
    assert!((capital[0] - capital[1]).abs() / capital[1] < 1e-4);
}

#[test]
fn test_monte_carlo_matches_discrete_capital() {
    let economy = economy();
    let policy = policy(&economy);
    let discrete = DiscreteIteration::default().solve(&economy, &policy).unwrap();

    let simulation = MonteCarloSimulation::from_config(&SimulationConfig {
        agents: 20_000,
        periods: 1_000,
        burn_in: 500,
        ..SimulationConfig::default()
    });
    let panel = simulation.solve(&economy, &policy).unwrap();

    let (k_mc, k_d) = (panel.aggregate_capital(), discrete.aggregate_capital());
    assert!((k_mc - k_d).abs() / k_d < 0.03, "monte carlo {} vs discrete {}", k_mc, k_d);
    assert!(panel.edge_share() < 0.01);

    let errors = simulation_euler_errors(&panel);
    assert!(errors.valid > 0);
    assert!(errors.max < -1.0);
}

#[test]
#[ignore = "full-size panel, run with --ignored"]
fn test_monte_carlo_full_panel_within_one_percent() {
    let economy = economy();
    let policy = policy(&economy);
    let discrete = DiscreteIteration::default().solve(&economy, &policy).unwrap();

    let panel = MonteCarloSimulation::from_config(&SimulationConfig::default())
        .solve(&economy, &policy)
        .unwrap();
    let (k_mc, k_d) = (panel.aggregate_capital(), discrete.aggregate_capital());
    assert!((k_mc - k_d).abs() / k_d < 0.01, "monte carlo {} vs discrete {}", k_mc, k_d);
}

#[test]
fn test_monte_carlo_equilibrium_near_discrete() {
    let mut config = EconomyConfig::default();
    config.grid.points = 100;
    let discrete = {
        let economy = Economy::new(config.clone()).unwrap();
        EquilibriumSolver::new(&economy).solve().unwrap()
    };

    config.distribution.method = DistributionMethod::MonteCarlo;
    config.simulation.agents = 10_000;
    config.simulation.periods = 600;
    config.simulation.burn_in = 300;
    config.equilibrium.tolerance = 5e-4;
    let economy = Economy::new(config).unwrap();
    let simulated = EquilibriumSolver::new(&economy).solve().unwrap();

    assert!(simulated.outcome.panel().is_some());
    assert_eq!(simulated.summary.method, "monte carlo");
    assert!((simulated.rate() - discrete.rate()).abs() < 2e-3);
}
