//! Report rendering: summary tables on stdout, CSV tables and JSON files.

use crate::{CliError, Result};
use aiyagari_solver::diagnostics::{ErrorSummary, EulerErrors};
use aiyagari_solver::distribution::{PanelSimulation, StationaryDensity};
use aiyagari_solver::economy::Economy;
use aiyagari_solver::equilibrium::{EquilibriumSummary, SchedulePoint};
use aiyagari_solver::household::Policy;
use serde::Serialize;
use std::io::Write;
use std::str::FromStr;

/// Output format of the `solve` and `schedule` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Box-drawn table
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV
    Csv,
}

impl FromStr for Format {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct PolicyRow {
    state: usize,
    productivity: f64,
    assets: f64,
    savings: f64,
    consumption: f64,
}

#[derive(Serialize)]
struct DensityRow {
    state: usize,
    assets: f64,
    mass: f64,
}

#[derive(Serialize)]
struct EulerRow {
    state: usize,
    assets: f64,
    log10_error: Option<f64>,
}

#[derive(Serialize)]
struct CapitalRow {
    period: usize,
    capital: f64,
}

/// Print the equilibrium summary as a table.
pub fn print_summary<W: Write>(
    out: &mut W,
    summary: &EquilibriumSummary,
    full_grid: Option<&ErrorSummary>,
    simulation: Option<&ErrorSummary>,
) -> Result<()> {
    let status = if summary.converged { "converged" } else { "NOT converged" };
    let cm = &summary.benchmark;
    let rows = [
        ("Method", summary.method.clone()),
        ("Status", format!("{} ({} iterations)", status, summary.iterations)),
        ("Interest rate r*", format!("{:.6}", summary.rate)),
        ("Wage w*", format!("{:.6}", summary.wage)),
        ("Capital supply K*", format!("{:.6}", summary.capital)),
        ("Capital demand K_d(r*)", format!("{:.6}", summary.capital_demand)),
        ("Residual", format!("{:.2e}", summary.residual)),
        ("Complete-markets rate", format!("{:.6}", cm.rate)),
        ("Complete-markets capital", format!("{:.6}", cm.capital)),
        ("Precautionary savings rate", format!("{:.6}", cm.precautionary_savings_rate)),
        ("Capital excess", format!("{:.2}%", 100.0 * cm.capital_excess)),
    ];

    writeln!(out)?;
    writeln!(out, "┌────────────────────────────────┬──────────────────────────────┐")?;
    for (label, value) in rows {
        writeln!(out, "│ {:<30} │ {:<28} │", label, value)?;
    }
    for (label, errors) in [("Euler error (grid)", full_grid), ("Euler error (panel)", simulation)] {
        if let Some(e) = errors {
            let value = format!("max {:.3}, mean {:.3}", e.max, e.mean);
            writeln!(out, "│ {:<30} │ {:<28} │", label, value)?;
        }
    }
    writeln!(out, "└────────────────────────────────┴──────────────────────────────┘")?;
    Ok(())
}

/// Print a capital market schedule as a table.
pub fn print_schedule<W: Write>(out: &mut W, points: &[SchedulePoint]) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "┌────────────┬────────────┬────────────┬────────────┐")?;
    writeln!(out, "│ Rate       │ Wage       │ Demand     │ Supply     │")?;
    writeln!(out, "├────────────┼────────────┼────────────┼────────────┤")?;
    for p in points {
        writeln!(
            out,
            "│ {:>10.5} │ {:>10.5} │ {:>10.4} │ {:>10.4} │",
            p.rate, p.wage, p.capital_demand, p.capital_supply
        )?;
    }
    writeln!(out, "└────────────┴────────────┴────────────┴────────────┘")?;
    Ok(())
}

/// Write `value` as pretty-printed JSON.
pub fn write_json<W: Write, T: Serialize + ?Sized>(out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(out, value)?;
    Ok(())
}

/// Write serialisable records as CSV with a header row.
pub fn write_records<W: Write, T: Serialize>(out: W, records: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Savings and consumption policy over the policy grid.
pub fn write_policy<W: Write>(out: W, economy: &Economy, policy: &Policy) -> Result<()> {
    let rows = (0..policy.n_states()).flat_map(move |z| {
        let productivity = economy.income().value(z);
        policy
            .grid()
            .iter()
            .zip(policy.savings_row(z).iter().zip(policy.consumption_row(z)))
            .map(move |(&assets, (&savings, &consumption))| PolicyRow {
                state: z,
                productivity,
                assets,
                savings,
                consumption,
            })
    });
    write_records(out, rows)
}

/// Joint stationary density.
pub fn write_density<W: Write>(out: W, density: &StationaryDensity) -> Result<()> {
    let rows = (0..density.n_states()).flat_map(move |z| {
        density
            .grid()
            .iter()
            .zip(density.row(z))
            .map(move |(&assets, &mass)| DensityRow { state: z, assets, mass })
    });
    write_records(out, rows)
}

/// Full-grid `log10` Euler errors; masked cells are left empty.
pub fn write_euler_errors<W: Write>(out: W, errors: &EulerErrors) -> Result<()> {
    let rows = (0..errors.n_states()).flat_map(move |z| {
        errors
            .grid()
            .iter()
            .zip(errors.row(z))
            .map(move |(&assets, &e)| EulerRow {
                state: z,
                assets,
                log10_error: (!e.is_nan()).then_some(e),
            })
    });
    write_records(out, rows)
}

/// Cross-sectional mean assets per simulated period.
pub fn write_capital_path<W: Write>(out: W, panel: &PanelSimulation) -> Result<()> {
    let rows = panel
        .capital_path()
        .iter()
        .enumerate()
        .map(|(period, &capital)| CapitalRow { period, capital });
    write_records(out, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiyagari_solver::config::EconomyConfig;
    use aiyagari_solver::equilibrium::CompleteMarkets;

    #[test]
    fn test_format_parse() {
        assert_eq!("json".parse::<Format>().unwrap(), Format::Json);
        assert!(matches!("xml".parse::<Format>(), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_density_csv_layout() {
        let density = StationaryDensity::new(vec![0.0, 1.0], 2, vec![0.1, 0.2, 0.3, 0.4], 3);
        let mut buf = Vec::new();
        write_density(&mut buf, &density).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "state,assets,mass");
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[3], "1,0.0,0.3");
    }

    #[test]
    fn test_schedule_csv_header() {
        let point = SchedulePoint {
            rate: 0.01,
            wage: 1.3,
            capital_demand: 8.0,
            capital_supply: 3.0,
        };
        let mut buf = Vec::new();
        write_records(&mut buf, [point]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("rate,wage,capital_demand,capital_supply"));
    }

    #[test]
    fn test_summary_table_mentions_status() {
        let mut config = EconomyConfig::default();
        config.grid.points = 20;
        let economy = Economy::new(config).unwrap();
        let summary = EquilibriumSummary {
            method: "discrete".to_string(),
            converged: false,
            iterations: 100,
            rate: 0.033,
            wage: 1.23,
            capital: 6.1,
            capital_demand: 6.1,
            residual: 2e-4,
            benchmark: CompleteMarkets::compare(&economy, 0.033, 6.1),
            history: Vec::new(),
        };
        let mut buf = Vec::new();
        print_summary(&mut buf, &summary, None, None).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("NOT converged (100 iterations)"));
        assert!(text.contains("0.033000"));
    }
}
