//! Property tests: every engine returns a normalised, non-negative density

use aiyagari_solver::prelude::*;
use proptest::prelude::*;

fn small_economy(sigma: f64, curvature: f64) -> Economy {
    let mut config = EconomyConfig::default();
    config.preferences.sigma = sigma;
    config.grid.points = 30;
    config.grid.max_assets = 50.0;
    config.grid.curvature = curvature;
    config.grid.fine_multiplier = 2;
    Economy::new(config).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn prop_density_is_normalised(
        rate in 0.0f64..0.035,
        sigma in 1.0f64..4.0,
        curvature in 1.0f64..3.0,
    ) {
        let economy = small_economy(sigma, curvature);
        let policy = HouseholdSolver::new(&economy).solve(economy.prices(rate)).unwrap();

        for density in [
            DiscreteIteration::default().solve(&economy, &policy).unwrap(),
            EigenvectorMethod.solve(&economy, &policy).unwrap(),
        ] {
            prop_assert!((density.total() - 1.0).abs() < 1e-10);
            prop_assert!(density.mass().iter().all(|m| *m >= 0.0));

            let pi = economy.income().stationary();
            for (share, expected) in density.income_marginal().iter().zip(pi) {
                prop_assert!((share - expected).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn prop_savings_respect_borrowing_limit(rate in -0.01f64..0.035) {
        let economy = small_economy(2.0, 3.0);
        let policy = HouseholdSolver::new(&economy).solve(economy.prices(rate)).unwrap();
        prop_assert!(policy.savings().iter().all(|s| *s >= economy.borrowing_limit()));
        prop_assert!(policy.consumption().iter().all(|c| *c > 0.0));
    }
}
