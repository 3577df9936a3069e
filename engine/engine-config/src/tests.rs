//! Tests for the configuration module.

use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = CentralConfig::default();
    assert_eq!(config.common.log_level, "info");
    assert!((config.search.exploration_weight - 1.0).abs() < f32::EPSILON);
    assert_eq!(config.search.num_rollouts, 10);
    assert_eq!(config.search.simulation_depth, 10);
    assert_eq!(config.search.time_budget_ms, 1000);
    assert_eq!(config.search.seed, 0);
}

#[test]
fn test_search_env_overrides() {
    std::env::set_var("CHESS_MCTS_SEARCH_NUM_ROLLOUTS", "25");
    std::env::set_var("CHESS_MCTS_SEARCH_EXPLORATION_WEIGHT", "1.5");
    std::env::set_var("CHESS_MCTS_SEARCH_SEED", "not-a-number");

    let config = apply_env_overrides(CentralConfig::default());
    assert_eq!(config.search.num_rollouts, 25);
    assert!((config.search.exploration_weight - 1.5).abs() < f32::EPSILON);
    // Unparseable values keep the previous setting
    assert_eq!(config.search.seed, 0);

    std::env::remove_var("CHESS_MCTS_SEARCH_NUM_ROLLOUTS");
    std::env::remove_var("CHESS_MCTS_SEARCH_EXPLORATION_WEIGHT");
    std::env::remove_var("CHESS_MCTS_SEARCH_SEED");
}

#[test]
fn test_parse_config_toml() {
    let toml_content = r#"
[common]
log_level = "debug"

[search]
exploration_weight = 0.7
num_rollouts = 4
simulation_depth = 24
time_budget_ms = 250
seed = 99
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.common.log_level, "debug");
    assert!((config.search.exploration_weight - 0.7).abs() < f32::EPSILON);
    assert_eq!(config.search.num_rollouts, 4);
    assert_eq!(config.search.simulation_depth, 24);
    assert_eq!(config.search.time_budget_ms, 250);
    assert_eq!(config.search.seed, 99);
}

#[test]
fn test_partial_config() {
    let toml_content = r#"
[search]
time_budget_ms = 50
"#;
    let config: CentralConfig = toml::from_str(toml_content).unwrap();
    assert_eq!(config.search.time_budget_ms, 50);
    assert_eq!(config.search.num_rollouts, 10); // Default
    assert_eq!(config.common.log_level, "info"); // Default
}

#[test]
fn test_empty_config() {
    let config: CentralConfig = toml::from_str("").unwrap();
    assert_eq!(config, CentralConfig::default());
}

#[test]
fn test_load_from_path() {
    let path = std::env::temp_dir().join(format!("chess-mcts-config-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[search]\nsimulation_depth = 3").unwrap();
    drop(file);

    let config = load_from_path(&path);
    assert_eq!(config.search.simulation_depth, 3);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_malformed_file_falls_back_to_defaults() {
    let path = std::env::temp_dir().join(format!("chess-mcts-bad-{}.toml", std::process::id()));
    std::fs::write(&path, "[search\nnum_rollouts = ").unwrap();

    let config = load_from_path(&path);
    assert_eq!(config.search.simulation_depth, 10);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let config = load_from_path(std::path::Path::new("/nonexistent/chess-mcts.toml"));
    assert_eq!(config.search.time_budget_ms, 1000);
}
