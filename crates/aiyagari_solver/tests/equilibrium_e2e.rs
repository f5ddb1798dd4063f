//! End-to-end equilibrium tests at the reference calibration
//!
//! Income {0.5, 1.5} with persistence 0.75, σ = 2, β = 0.96, δ = 0.08,
//! α = 0.36, borrowing limit 0.

use aiyagari_solver::prelude::*;

fn reference_economy() -> Economy {
    Economy::new(EconomyConfig::default()).unwrap()
}

#[test]
fn test_equilibrium_rate_below_time_preference() {
    let economy = reference_economy();
    let equilibrium = EquilibriumSolver::new(&economy).solve().unwrap();
    let summary = &equilibrium.summary;

    assert!(equilibrium.converged());
    assert!(summary.residual.abs() < 1e-4);
    assert!(equilibrium.rate() < 1.0 / 0.96 - 1.0);
    assert!(summary.benchmark.precautionary_savings_rate > 0.0);
    assert_eq!(summary.method, "discrete");
}

#[test]
fn test_precautionary_capital_exceeds_complete_markets() {
    let economy = reference_economy();
    let equilibrium = EquilibriumSolver::new(&economy).solve().unwrap();

    let cm_rate = economy.preferences().complete_markets_rate();
    let cm_capital = economy.technology().capital_demand(cm_rate);
    assert!(equilibrium.capital() > cm_capital);
    assert!(equilibrium.summary.benchmark.capital_excess > 0.0);

    // Markets clear: supply and demand agree up to the rate tolerance
    let demand = equilibrium.summary.capital_demand;
    assert!((equilibrium.capital() - demand).abs() / demand < 0.01);
}

#[test]
fn test_equilibrium_wage_matches_rate() {
    let economy = reference_economy();
    let equilibrium = EquilibriumSolver::new(&economy).solve().unwrap();
    let wage = economy.technology().wage_from_rate(equilibrium.rate());
    assert!((equilibrium.wage() - wage).abs() < 1e-12);
    assert_eq!(equilibrium.policy.prices().rate, equilibrium.rate());
}

#[test]
fn test_fixed_damping_reaches_same_equilibrium() {
    let adaptive = EquilibriumSolver::new(&reference_economy()).solve().unwrap();

    let mut config = EconomyConfig::default();
    config.equilibrium.damping_rule = DampingRule::Fixed;
    let economy = Economy::new(config).unwrap();
    let fixed = EquilibriumSolver::new(&economy).solve().unwrap();

    assert!(fixed.converged());
    assert!((fixed.rate() - adaptive.rate()).abs() < 5e-4);
}

#[test]
fn test_full_grid_euler_errors_are_small() {
    let economy = reference_economy();
    let policy = HouseholdSolver::new(&economy)
        .solve(economy.prices(0.03))
        .unwrap();
    let errors = full_grid_euler_errors(&economy, &policy).unwrap();
    let summary = errors.summary();

    assert!(summary.max < -2.0, "max log10 Euler error {}", summary.max);
    assert!(summary.mean <= summary.max);
    assert!(summary.valid > economy.n_cells() / 2);
}
