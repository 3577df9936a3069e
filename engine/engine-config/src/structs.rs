//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_exploration_weight() -> f32 {
    defaults::exploration_weight()
}
fn d_num_rollouts() -> u32 {
    defaults::num_rollouts()
}
fn d_simulation_depth() -> u32 {
    defaults::simulation_depth()
}
fn d_time_budget_ms() -> u64 {
    defaults::time_budget_ms()
}
fn d_seed() -> u64 {
    defaults::seed()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Settings shared by every binary
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Move search configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// UCB1 exploration constant
    #[serde(default = "d_exploration_weight")]
    pub exploration_weight: f32,
    /// Rollouts averaged per expanded node
    #[serde(default = "d_num_rollouts")]
    pub num_rollouts: u32,
    /// Maximum plies per rollout
    #[serde(default = "d_simulation_depth")]
    pub simulation_depth: u32,
    /// Per-move time budget
    #[serde(default = "d_time_budget_ms")]
    pub time_budget_ms: u64,
    /// Seed of the search's random number generator
    #[serde(default = "d_seed")]
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            exploration_weight: defaults::exploration_weight(),
            num_rollouts: defaults::num_rollouts(),
            simulation_depth: defaults::simulation_depth(),
            time_budget_ms: defaults::time_budget_ms(),
            seed: defaults::seed(),
        }
    }
}
