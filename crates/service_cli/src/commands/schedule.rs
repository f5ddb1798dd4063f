//! Schedule command implementation
//!
//! Tabulates capital demand and household supply over a range of rates.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use aiyagari_solver::config::EconomyConfig;
use aiyagari_solver::economy::Economy;
use aiyagari_solver::equilibrium::{capital_schedule, default_rates};
use tracing::info;

use crate::output::{self, Format};
use crate::{CliError, Result};

/// Run the schedule command
pub fn run(config: EconomyConfig, points: usize, format: Format, output: Option<&Path>) -> Result<()> {
    if points < 2 {
        return Err(CliError::InvalidArgument(format!(
            "schedule needs at least 2 points, got {}",
            points
        )));
    }

    let economy = Economy::new(config)?;
    let rates = default_rates(&economy, points);
    info!(
        points,
        low = rates[0],
        high = rates[rates.len() - 1],
        "Computing capital market schedule"
    );
    let schedule = capital_schedule(&economy, &rates)?;

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(io::stdout().lock()),
    };
    match format {
        Format::Table => output::print_schedule(&mut out, &schedule)?,
        Format::Json => output::write_json(&mut out, &schedule)?,
        Format::Csv => output::write_records(&mut out, &schedule)?,
    }
    out.flush()?;

    Ok(())
}
