//! MCTS search implementation.
//!
//! Implements the time-bounded search loop:
//! 1. Selection: descend through fully expanded nodes using UCB1, answering
//!    each of our moves with a uniformly sampled opponent reply
//! 2. Expansion: add one untried move and seed it with averaged rollouts
//! 3. Backpropagation: fold the value into every node on the way back up
//!
//! All moves are played on one shared game state and taken back in
//! reverse order before a descent returns.

use engine_core::{Clock, GameError, GameState, Side};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::evaluator::{Evaluator, EvaluatorError};
use crate::node::NodeId;
use crate::rollout::average_rollouts;
use crate::scope::MoveScope;
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Game error: {0}")]
    Game(#[from] GameError),

    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),

    #[error("No legal moves available")]
    NoLegalMoves,

    #[error("Search budget exhausted before any root move was expanded")]
    EmptyRoot,

    #[error("Inconsistent tree: {0}")]
    InconsistentTree(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Statistics of one root child.
#[derive(Debug, Clone, PartialEq)]
pub struct RootChild<M> {
    pub action: M,
    pub visits: u32,
    pub mean_value: f32,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// Best move to play
    pub action: M,

    /// Mean value of the chosen move, from the searching side's perspective
    pub value: f32,

    /// Root children ordered by mean value, best first
    pub root_children: Vec<RootChild<M>>,

    /// Number of completed select/expand/backpropagate iterations
    pub iterations: u32,

    /// Clock reading when the search stopped
    pub elapsed_ms: u64,
}

/// MCTS search state.
pub struct MctsSearch<'a, G: GameState, E: Evaluator<G>> {
    tree: MctsTree<G::Move>,
    evaluator: &'a E,
    config: MctsConfig,
    own_side: Side,
}

impl<'a, G: GameState, E: Evaluator<G>> MctsSearch<'a, G, E> {
    /// Create a new MCTS search for the side to move in `state`.
    pub fn new(state: &G, evaluator: &'a E, config: MctsConfig) -> Result<Self, SearchError> {
        config.validate()?;

        Ok(Self {
            tree: MctsTree::new(),
            evaluator,
            config,
            own_side: state.side_to_move(),
        })
    }

    /// Run iterations until the clock passes the configured budget.
    ///
    /// A single legal move is returned after one iteration regardless of
    /// the budget. The budget is only checked between iterations.
    pub fn run<C: Clock>(
        &mut self,
        state: &mut G,
        clock: &C,
        rng: &mut ChaCha20Rng,
    ) -> Result<SearchResult<G::Move>, SearchError> {
        let root_moves = state.legal_moves();
        if root_moves.is_empty() {
            return Err(SearchError::NoLegalMoves);
        }
        if state.side_to_move() != self.own_side {
            return Err(SearchError::InconsistentTree(format!(
                "search was created for {} but {} is to move",
                self.own_side,
                state.side_to_move()
            )));
        }

        let start_ply = state.ply_count();
        let mut iterations = 0u32;

        if root_moves.len() == 1 {
            self.iterate(state, rng)?;
            iterations = 1;
        } else {
            while clock.elapsed_ms() < self.config.time_budget_ms {
                self.iterate(state, rng)?;
                iterations += 1;
            }
        }

        if state.ply_count() != start_ply {
            return Err(SearchError::InconsistentTree(format!(
                "game state left at ply {} after search started at ply {}",
                state.ply_count(),
                start_ply
            )));
        }

        let root_children: Vec<RootChild<G::Move>> = self
            .tree
            .ranked_children()
            .into_iter()
            .map(|(action, id)| {
                let node = self.tree.get(id);
                RootChild {
                    action,
                    visits: node.visit_count,
                    mean_value: node.mean_value,
                }
            })
            .collect();

        let best = root_children.first().ok_or(SearchError::EmptyRoot)?;
        let elapsed_ms = clock.elapsed_ms();

        debug!(
            iterations,
            elapsed_ms,
            best = %best.action,
            value = best.mean_value,
            nodes = self.tree.len(),
            "MCTS search complete"
        );

        Ok(SearchResult {
            action: best.action.clone(),
            value: best.mean_value,
            iterations,
            elapsed_ms,
            root_children,
        })
    }

    /// Run one iteration from the root.
    fn iterate(&mut self, state: &mut G, rng: &mut ChaCha20Rng) -> Result<f32, SearchError> {
        let root = self.tree.root();
        let value = self.select(root, state, rng)?;
        self.tree.get_mut(root).visit();

        trace!(value, nodes = self.tree.len(), "MCTS iteration complete");
        Ok(value)
    }

    /// Descend from `node_id`, whose position is the current `state`.
    ///
    /// Returns the value of the sampled path from the searching side's
    /// perspective. `state` is restored before returning.
    fn select(
        &mut self,
        node_id: NodeId,
        state: &mut G,
        rng: &mut ChaCha20Rng,
    ) -> Result<f32, SearchError> {
        let legal = state.legal_moves();
        let expanded = self.tree.get(node_id).children.len();

        if expanded > legal.len() {
            return Err(SearchError::InconsistentTree(format!(
                "node {} has {} children but only {} legal moves",
                node_id.0,
                expanded,
                legal.len()
            )));
        }
        if expanded < legal.len() {
            return self.expand(node_id, state, &legal, rng);
        }
        if legal.is_empty() {
            // Terminal: checkmate or stalemate
            return Ok(self.evaluator.evaluate(state, self.own_side)?);
        }

        let (best_move, best_id) = self
            .tree
            .select_child(node_id, self.config.exploration_weight)
            .ok_or_else(|| {
                SearchError::InconsistentTree(format!("node {} has no children", node_id.0))
            })?;

        let mut scope = MoveScope::new(state);
        scope.apply(&best_move);
        self.tree.get_mut(best_id).visit();

        let replies = scope.legal_moves();
        let Some(reply) = replies.choose(rng).cloned() else {
            // Our move ended the game
            let value = self.evaluator.evaluate(&*scope, self.own_side)?;
            scope.close()?;
            self.tree.backpropagate(best_id, value);
            return Ok(value);
        };

        let reply_id = match self.tree.find_child(best_id, &reply) {
            Some(id) => {
                self.tree.get_mut(id).visit();
                id
            }
            None => self.tree.add_child(best_id, reply.clone(), 0.0),
        };

        scope.apply(&reply);
        let value = self.select(reply_id, &mut scope, rng)?;

        // The reply node stores the opponent's view of the same outcome
        self.tree.backpropagate(reply_id, -value);
        self.tree.backpropagate(best_id, value);

        scope.close()?;
        Ok(value)
    }

    /// Expand one untried move of `node_id` and seed it with rollouts.
    fn expand(
        &mut self,
        node_id: NodeId,
        state: &mut G,
        legal: &[G::Move],
        rng: &mut ChaCha20Rng,
    ) -> Result<f32, SearchError> {
        let node = self.tree.get(node_id);
        let untried: Vec<&G::Move> = legal.iter().filter(|mv| !node.has_child(mv)).collect();
        let mv = untried.choose(rng).map(|mv| (*mv).clone()).ok_or_else(|| {
            SearchError::InconsistentTree(format!(
                "node {} has no untried move but is not fully expanded",
                node_id.0
            ))
        })?;

        let mut scope = MoveScope::new(state);
        scope.apply(&mv);
        let value = average_rollouts(
            &mut *scope,
            self.evaluator,
            self.own_side,
            self.config.num_rollouts,
            self.config.simulation_depth,
            rng,
        )?;
        scope.close()?;

        trace!(node = node_id.0, mv = %mv, value, "expanded");
        self.tree.add_child(node_id, mv, value);
        Ok(value)
    }

    /// Side the search plays for.
    pub fn own_side(&self) -> Side {
        self.own_side
    }

    /// Get the search tree (for inspection/debugging).
    pub fn tree(&self) -> &MctsTree<G::Move> {
        &self.tree
    }

    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }
}

/// Convenience function to run a single MCTS search.
pub fn run_mcts<G, E, C>(
    state: &mut G,
    evaluator: &E,
    config: MctsConfig,
    clock: &C,
    rng: &mut ChaCha20Rng,
) -> Result<SearchResult<G::Move>, SearchError>
where
    G: GameState,
    E: Evaluator<G>,
    C: Clock,
{
    let mut search = MctsSearch::new(state, evaluator, config)?;
    search.run(state, clock, rng)
}
