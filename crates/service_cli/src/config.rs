//! Run configuration: TOML file, then `AIYAGARI_*` environment overrides,
//! then command-line flags, then validation.

use crate::{CliError, Result};
use aiyagari_solver::config::EconomyConfig;
use std::path::Path;
use std::str::FromStr;

/// File read when `--config` is not given, if it exists.
pub const DEFAULT_CONFIG_PATH: &str = "aiyagari.toml";

/// Load the configuration file.
///
/// An explicit path must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// read if present and the built-in calibration is used otherwise.
pub fn load(path: Option<&Path>) -> Result<EconomyConfig> {
    match path {
        Some(path) if !path.exists() => Err(CliError::FileNotFound(path.display().to_string())),
        Some(path) => read(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => read(Path::new(DEFAULT_CONFIG_PATH)),
        None => Ok(EconomyConfig::default()),
    }
}

fn read(path: &Path) -> Result<EconomyConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content, &path.display().to_string())
}

/// Parse TOML `content`, naming `origin` in errors.
pub fn parse(content: &str, origin: &str) -> Result<EconomyConfig> {
    toml::from_str(content).map_err(|source| CliError::Parse {
        path: origin.to_string(),
        source,
    })
}

/// Apply `AIYAGARI_*` overrides from the process environment.
pub fn with_env_override(config: EconomyConfig) -> Result<EconomyConfig> {
    apply_overrides(config, |var| std::env::var(var).ok())
}

/// Apply overrides read through `lookup`.
pub fn apply_overrides<F>(mut config: EconomyConfig, lookup: F) -> Result<EconomyConfig>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("AIYAGARI_METHOD") {
        config.distribution.method = v.parse()?;
    }
    if let Some(v) = lookup("AIYAGARI_DAMPING_RULE") {
        config.equilibrium.damping_rule = v.parse()?;
    }
    override_value(&lookup, "AIYAGARI_SIGMA", &mut config.preferences.sigma)?;
    override_value(&lookup, "AIYAGARI_BETA", &mut config.preferences.beta)?;
    override_value(&lookup, "AIYAGARI_GRID_POINTS", &mut config.grid.points)?;
    override_value(&lookup, "AIYAGARI_MAX_ASSETS", &mut config.grid.max_assets)?;
    override_value(&lookup, "AIYAGARI_AGENTS", &mut config.simulation.agents)?;
    override_value(&lookup, "AIYAGARI_PERIODS", &mut config.simulation.periods)?;
    override_value(&lookup, "AIYAGARI_BURN_IN", &mut config.simulation.burn_in)?;
    override_value(&lookup, "AIYAGARI_SEED", &mut config.simulation.seed)?;
    override_value(&lookup, "AIYAGARI_INITIAL_RATE", &mut config.equilibrium.initial_rate)?;

    Ok(config)
}

fn override_value<T, F>(get: &F, var: &str, slot: &mut T) -> Result<()>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = get(var) {
        *slot = value.trim().parse().map_err(|_| CliError::InvalidEnv {
            var: var.to_string(),
            value,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aiyagari_solver::config::DistributionMethod;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn test_overrides_apply() {
        let config = apply_overrides(
            EconomyConfig::default(),
            env(&[
                ("AIYAGARI_METHOD", "monte-carlo"),
                ("AIYAGARI_GRID_POINTS", "120"),
                ("AIYAGARI_SEED", " 7 "),
            ]),
        )
        .unwrap();
        assert_eq!(config.distribution.method, DistributionMethod::MonteCarlo);
        assert_eq!(config.grid.points, 120);
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.preferences.sigma, 2.0);
    }

    #[test]
    fn test_bad_override_is_reported() {
        let result = apply_overrides(EconomyConfig::default(), env(&[("AIYAGARI_BETA", "high")]));
        assert!(matches!(result, Err(CliError::InvalidEnv { ref var, .. }) if var == "AIYAGARI_BETA"));

        let result = apply_overrides(EconomyConfig::default(), env(&[("AIYAGARI_METHOD", "spectral")]));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_parse_names_origin() {
        let err = parse("[grid\npoints = 3", "broken.toml").unwrap_err();
        assert!(err.to_string().contains("broken.toml"));

        let config = parse("[technology]\nalpha = 0.3\n", "inline").unwrap();
        assert_eq!(config.technology.alpha, 0.3);
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = load(Some(Path::new("/nonexistent/aiyagari.toml")));
        assert!(matches!(result, Err(CliError::FileNotFound(_))));
    }
}
