//! Property-based tests for grids, lotteries, interpolation and Markov chains.

use aiyagari_core::math::grid::{make_grid, AssetGrid};
use aiyagari_core::math::interpolators::LinearInterpolator;
use aiyagari_core::math::markov::MarkovChain;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn grid_is_strictly_increasing_with_exact_bounds(
        min in -10.0f64..10.0,
        width in 0.5f64..500.0,
        n in 2usize..400,
        curvature in 0.5f64..4.0,
    ) {
        let max = min + width;
        let grid = make_grid(min, max, n, curvature).unwrap();
        prop_assert_eq!(grid.len(), n);
        prop_assert_eq!(grid[0], min);
        prop_assert_eq!(grid[n - 1], max);
        for w in grid.windows(2) {
            prop_assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn lottery_reproduces_interior_points(x in 0.0f64..100.0) {
        let grid = AssetGrid::new(0.0, 100.0, 60, 2.0).unwrap();
        let lottery = grid.lottery(x);
        let points = grid.points();
        prop_assert!(lottery.upper_weight >= 0.0 && lottery.upper_weight <= 1.0);
        let rebuilt = lottery.lower_weight() * points[lottery.lower]
            + lottery.upper_weight * points[lottery.upper];
        prop_assert!((rebuilt - x).abs() < 1e-9);
    }

    #[test]
    fn flat_interpolation_stays_within_knot_values(x in -50.0f64..150.0) {
        let xs = [0.0, 1.0, 5.0, 20.0, 100.0];
        let ys = [0.0, 0.8, 3.5, 12.0, 70.0];
        let interp = LinearInterpolator::new(&xs, &ys).unwrap();
        let y = interp.interpolate_flat(x);
        prop_assert!((0.0..=70.0).contains(&y));
    }

    #[test]
    fn two_state_stationary_distribution_is_invariant(
        p_stay_low in 0.05f64..0.95,
        p_stay_high in 0.05f64..0.95,
    ) {
        let transition = vec![
            vec![p_stay_low, 1.0 - p_stay_low],
            vec![1.0 - p_stay_high, p_stay_high],
        ];
        let chain = MarkovChain::new(vec![0.5, 1.5], transition.clone()).unwrap();
        let pi = chain.stationary();
        prop_assert!((pi.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        for j in 0..2 {
            prop_assert!(pi[j] >= 0.0);
            let next = pi[0] * transition[0][j] + pi[1] * transition[1][j];
            prop_assert!((next - pi[j]).abs() < 1e-12);
        }
    }
}
