//! Configuration file parsing and report serialisation

use aiyagari_solver::config::{DampingRule, DistributionMethod, EconomyConfig};
use aiyagari_solver::economy::Economy;
use aiyagari_solver::equilibrium::{capital_schedule, CompleteMarkets};
use aiyagari_solver::error::ConfigError;

#[test]
fn test_partial_toml_keeps_defaults() {
    let config: EconomyConfig = toml::from_str(
        r#"
        [preferences]
        sigma = 3.0

        [grid]
        points = 150

        [distribution]
        method = "monte carlo"

        [equilibrium]
        damping_rule = "fixed"
        "#,
    )
    .unwrap();

    assert_eq!(config.preferences.sigma, 3.0);
    assert_eq!(config.preferences.beta, 0.96);
    assert_eq!(config.grid.points, 150);
    assert_eq!(config.grid.max_assets, 100.0);
    assert_eq!(config.distribution.method, DistributionMethod::MonteCarlo);
    assert_eq!(config.equilibrium.damping_rule, DampingRule::Fixed);
    assert_eq!(config.simulation.agents, 50_000);
    assert!(config.validate().is_ok());
}

#[test]
fn test_income_process_from_toml() {
    let config: EconomyConfig = toml::from_str(
        r#"
        [income]
        states = [0.2, 1.0, 1.8]
        transition = [[0.8, 0.2, 0.0], [0.1, 0.8, 0.1], [0.0, 0.2, 0.8]]
        "#,
    )
    .unwrap();
    let economy = Economy::new(config).unwrap();
    assert_eq!(economy.income().n_states(), 3);
    assert!((economy.income().mean_value() - 1.0).abs() < 1e-12);
}

#[test]
fn test_unknown_method_is_rejected() {
    let result: Result<EconomyConfig, _> = toml::from_str(
        r#"
        [distribution]
        method = "quadrature"
        "#,
    );
    assert!(result.is_err());
    assert!(matches!(
        "quadrature".parse::<DistributionMethod>(),
        Err(ConfigError::UnknownMethod(_))
    ));
}

#[test]
fn test_validation_reports_every_violation() {
    let config: EconomyConfig = toml::from_str(
        r#"
        [preferences]
        beta = 1.2

        [grid]
        points = 1
        "#,
    )
    .unwrap();
    match config.validate() {
        Err(ConfigError::Validation(errors)) => assert!(errors.len() >= 2, "{:?}", errors),
        other => panic!("expected validation errors, got {:?}", other),
    }
}

#[test]
fn test_config_survives_toml_round_trip() {
    let config = EconomyConfig::default();
    let text = toml::to_string(&config).unwrap();
    let parsed: EconomyConfig = toml::from_str(&text).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn test_report_types_serialise_to_json() {
    let mut config = EconomyConfig::default();
    config.grid.points = 40;
    let economy = Economy::new(config).unwrap();

    let schedule = capital_schedule(&economy, &[0.01]).unwrap();
    let json = serde_json::to_value(&schedule).unwrap();
    assert_eq!(json[0]["rate"], 0.01);
    assert!(json[0]["capital_supply"].as_f64().unwrap() > 0.0);

    let benchmark = CompleteMarkets::compare(&economy, 0.03, 6.0);
    let json = serde_json::to_value(benchmark).unwrap();
    assert!(json.get("precautionary_savings_rate").is_some());
}
