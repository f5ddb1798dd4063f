//! Solve command implementation
//!
//! Computes the stationary equilibrium, evaluates Euler equation errors and
//! renders the report.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use aiyagari_solver::config::EconomyConfig;
use aiyagari_solver::diagnostics::{full_grid_euler_errors, simulation_euler_errors, ErrorSummary, EulerErrors};
use aiyagari_solver::distribution::StationaryOutcome;
use aiyagari_solver::economy::Economy;
use aiyagari_solver::equilibrium::{Equilibrium, EquilibriumSolver, EquilibriumSummary};
use serde::Serialize;
use tracing::info;

use crate::output::{self, Format};
use crate::Result;

#[derive(Serialize)]
struct SolveReport<'a> {
    #[serde(flatten)]
    summary: &'a EquilibriumSummary,
    euler_full_grid: &'a ErrorSummary,
    euler_simulation: Option<&'a ErrorSummary>,
}

/// Run the solve command
pub fn run(config: EconomyConfig, format: Format, output_dir: Option<&Path>) -> Result<()> {
    let economy = Economy::new(config)?;
    info!(
        method = %economy.config().distribution.method,
        grid_points = economy.grid().len(),
        "Solving stationary equilibrium"
    );

    let equilibrium = EquilibriumSolver::new(&economy).solve()?;
    let full_grid = full_grid_euler_errors(&economy, &equilibrium.policy)?;
    let grid_summary = full_grid.summary();
    let panel_summary = equilibrium.outcome.panel().map(simulation_euler_errors);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        Format::Table => output::print_summary(
            &mut out,
            &equilibrium.summary,
            Some(&grid_summary),
            panel_summary.as_ref(),
        )?,
        Format::Json => {
            let report = SolveReport {
                summary: &equilibrium.summary,
                euler_full_grid: &grid_summary,
                euler_simulation: panel_summary.as_ref(),
            };
            output::write_json(&mut out, &report)?;
        }
        Format::Csv => output::write_records(&mut out, &equilibrium.summary.history)?,
    }

    if let Some(dir) = output_dir {
        write_tables(dir, &economy, &equilibrium, &full_grid)?;
    }

    info!("Solve complete");
    Ok(())
}

fn write_tables(
    dir: &Path,
    economy: &Economy,
    equilibrium: &Equilibrium,
    euler: &EulerErrors,
) -> Result<()> {
    fs::create_dir_all(dir)?;
    let create = |name: &str| -> Result<BufWriter<File>> { Ok(BufWriter::new(File::create(dir.join(name))?)) };

    output::write_json(create("summary.json")?, &equilibrium.summary)?;
    output::write_policy(create("policy.csv")?, economy, &equilibrium.policy)?;
    output::write_euler_errors(create("euler_errors.csv")?, euler)?;
    match &equilibrium.outcome {
        StationaryOutcome::Density(density) => output::write_density(create("density.csv")?, density)?,
        StationaryOutcome::Panel(panel) => output::write_capital_path(create("capital_path.csv")?, panel)?,
    }

    info!(dir = %dir.display(), "Report tables written");
    Ok(())
}
