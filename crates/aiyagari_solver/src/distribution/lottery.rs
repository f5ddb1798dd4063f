//! Where each fine-grid cell's mass goes next period.

use crate::economy::Economy;
use crate::household::SavingsRule;
use aiyagari_core::math::grid::Lottery;

/// Lottery over fine-grid points for the savings choice in every
/// (income state, fine-grid point) cell, row-major by income state.
///
/// Savings at or beyond either end of the fine grid put all mass on that end.
pub fn policy_lotteries(economy: &Economy, rule: &SavingsRule) -> Vec<Lottery> {
    let fine = economy.fine_grid();
    (0..economy.income().n_states())
        .flat_map(|z| {
            fine.points()
                .iter()
                .map(move |&a| fine.lottery(rule.next_assets(z, a)))
        })
        .collect()
}

/// Scatter `from` one period forward into `to`, then renormalise `to`.
///
/// `to` is overwritten; both slices are indexed `z * n_fine + i`.
pub fn push_forward(
    economy: &Economy,
    lotteries: &[Lottery],
    from: &[f64],
    to: &mut [f64],
) {
    let income = economy.income();
    let n_fine = economy.fine_grid().len();
    to.iter_mut().for_each(|m| *m = 0.0);

    for (k, (&mass, lottery)) in from.iter().zip(lotteries.iter()).enumerate() {
        if mass == 0.0 {
            continue;
        }
        let z = k / n_fine;
        let lower = mass * lottery.lower_weight();
        let upper = mass * lottery.upper_weight;
        for (j, p) in income.row(z).iter().enumerate() {
            to[j * n_fine + lottery.lower] += p * lower;
            to[j * n_fine + lottery.upper] += p * upper;
        }
    }

    let total: f64 = to.iter().sum();
    if total > 0.0 {
        to.iter_mut().for_each(|m| *m /= total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EconomyConfig;

    fn tiny_economy() -> Economy {
        let mut config = EconomyConfig::default();
        config.grid.points = 5;
        config.grid.max_assets = 4.0;
        config.grid.curvature = 1.0;
        config.grid.fine_multiplier = 1;
        Economy::new(config).unwrap()
    }

    #[test]
    fn test_lotteries_follow_the_rule() {
        let economy = tiny_economy();
        // Save half of current assets in state 0, keep everything in state 1
        let table = vec![0.0, 0.5, 1.0, 1.5, 2.0, 0.0, 1.0, 2.0, 3.0, 4.0];
        let rule = SavingsRule::from_table(economy.grid().points(), &table, 0.0).unwrap();
        let lotteries = policy_lotteries(&economy, &rule);
        assert_eq!(lotteries.len(), 10);

        // State 0, a = 1 -> a' = 0.5, split evenly between points 0 and 1
        assert_eq!((lotteries[1].lower, lotteries[1].upper), (0, 1));
        assert!((lotteries[1].upper_weight - 0.5).abs() < 1e-12);

        // State 1, a = 4 -> top edge
        assert_eq!((lotteries[9].lower, lotteries[9].upper), (4, 4));
    }

    #[test]
    fn test_push_forward_conserves_mass() {
        let economy = tiny_economy();
        let table = vec![0.0, 0.5, 1.0, 1.5, 2.0, 0.0, 1.0, 2.0, 3.0, 4.0];
        let rule = SavingsRule::from_table(economy.grid().points(), &table, 0.0).unwrap();
        let lotteries = policy_lotteries(&economy, &rule);

        let from = vec![0.1; 10];
        let mut to = vec![0.0; 10];
        push_forward(&economy, &lotteries, &from, &mut to);
        assert!((to.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert!(to.iter().all(|m| *m >= 0.0));
    }
}
