//! Property tests linking preferences, technology and prices.

use aiyagari_models::{CobbDouglas, Crra, Prices};
use proptest::prelude::*;

proptest! {
    #[test]
    fn wage_falls_as_rate_rises(r in -0.05f64..0.2, dr in 0.001f64..0.05) {
        let firm = CobbDouglas::new(0.36, 0.08).unwrap();
        let low = Prices::from_rate(r, &firm);
        let high = Prices::from_rate(r + dr, &firm);
        prop_assert!(high.wage < low.wage);
    }

    #[test]
    fn marginal_utility_is_decreasing(sigma in 0.5f64..6.0, c in 0.01f64..50.0) {
        let prefs = Crra::new(sigma, 0.96).unwrap();
        prop_assert!(prefs.marginal_utility(c * 1.01) < prefs.marginal_utility(c));
    }

    #[test]
    fn euler_inverse_recovers_consumption(sigma in 0.5f64..4.0, c in 0.01f64..5.0) {
        let prefs = Crra::new(sigma, 0.96).unwrap();
        let back = prefs.inverse_marginal_utility(prefs.marginal_utility(c));
        prop_assert!((back - c).abs() <= 1e-9 * c);
    }
}
