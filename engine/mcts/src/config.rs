//! MCTS configuration parameters.

use crate::search::SearchError;

/// Configuration for Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Exploration weight `C` in the UCB1 formula.
    /// Higher values encourage exploration, lower values favor exploitation.
    pub exploration_weight: f32,

    /// Independent rollouts averaged into a freshly expanded child's value.
    pub num_rollouts: u32,

    /// Ply cap of a single rollout.
    pub simulation_depth: u32,

    /// Wall-clock budget per move request, in milliseconds.
    /// The budget is checked between iterations only, so a search can
    /// overshoot it by the length of one iteration.
    pub time_budget_ms: u64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            exploration_weight: 1.0,
            num_rollouts: 10,
            simulation_depth: 10,
            time_budget_ms: 1000,
        }
    }
}

impl MctsConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            exploration_weight: 1.0,
            num_rollouts: 4,
            simulation_depth: 6,
            time_budget_ms: 200,
        }
    }

    /// Builder pattern: set the UCB1 exploration weight.
    pub fn with_exploration_weight(mut self, c: f32) -> Self {
        self.exploration_weight = c;
        self
    }

    /// Builder pattern: set rollouts per expansion.
    pub fn with_rollouts(mut self, n: u32) -> Self {
        self.num_rollouts = n;
        self
    }

    /// Builder pattern: set the rollout ply cap.
    pub fn with_simulation_depth(mut self, depth: u32) -> Self {
        self.simulation_depth = depth;
        self
    }

    /// Builder pattern: set the time budget.
    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    pub fn validate(&self) -> Result<(), SearchError> {
        if !self.exploration_weight.is_finite() || self.exploration_weight < 0.0 {
            return Err(SearchError::InvalidConfig(format!(
                "exploration_weight must be finite and non-negative, got {}",
                self.exploration_weight
            )));
        }
        if self.num_rollouts == 0 {
            return Err(SearchError::InvalidConfig(
                "num_rollouts must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
