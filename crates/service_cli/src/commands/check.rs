//! Check command implementation
//!
//! Validates the resolved configuration and prints the derived economy.

use aiyagari_solver::config::EconomyConfig;
use aiyagari_solver::economy::Economy;
use tracing::info;

use crate::Result;

/// Run the check command
pub fn run(config: EconomyConfig, show_config: bool) -> Result<()> {
    info!("Checking configuration...");

    if show_config {
        println!("{}", toml::to_string_pretty(&config)?);
    }

    let economy = Economy::new(config)?;
    let income = economy.income();
    let preferences = economy.preferences();
    let technology = economy.technology();

    println!("Configuration OK");
    println!();
    println!(
        "Asset grid:        {} points on [{}, {}], density grid {} points",
        economy.grid().len(),
        economy.grid().min(),
        economy.grid().max(),
        economy.fine_grid().len()
    );
    println!("Income states:     {:?}", income.values());
    println!("Stationary shares: {:?}", income.stationary());
    println!("Mean productivity: {:.6}", income.mean_value());

    let rate = preferences.complete_markets_rate();
    println!(
        "Complete markets:  r = {:.6}, K = {:.6}, w = {:.6}",
        rate,
        technology.capital_demand(rate),
        technology.wage_from_rate(rate)
    );
    println!(
        "Distribution:      {} (damping rule {})",
        economy.config().distribution.method,
        economy.config().equilibrium.damping_rule
    );

    info!("Check complete");
    Ok(())
}
