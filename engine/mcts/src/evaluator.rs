//! Evaluator trait for static position scoring.
//!
//! Every value the search handles is expressed from the engine's point of
//! view: +1 is a won position for the side that started the search, -1 a
//! lost one, 0 a draw. Heuristic scores fall strictly inside that range.

use engine_core::{GameState, MaterialCounts, PieceKind, Side};
use thiserror::Error;

/// Errors that can occur during evaluation.
#[derive(Debug, Error)]
pub enum EvaluatorError {
    #[error("Evaluation failed: {0}")]
    EvaluationFailed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Trait for position evaluators.
///
/// Implementations could be:
/// - MaterialEvaluator: Weighted piece count (default)
/// - Learned evaluators wrapping a value network
pub trait Evaluator<G: GameState> {
    /// Score `state` from `own_side`'s perspective.
    ///
    /// # Returns
    /// A value in [-1, 1]: exactly ±1 for checkmate, 0 for a drawn terminal.
    fn evaluate(&self, state: &G, own_side: Side) -> Result<f32, EvaluatorError>;
}

/// Per-piece-kind material weights.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialWeights {
    weights: [f32; 6],
}

impl MaterialWeights {
    /// Build from weights in `PieceKind::ALL` order.
    pub fn new(weights: [f32; 6]) -> Self {
        Self { weights }
    }

    #[inline]
    pub fn weight(&self, kind: PieceKind) -> f32 {
        self.weights[kind.index()]
    }

    /// Weighted sum of one side's inventory.
    pub fn score(&self, counts: &MaterialCounts) -> f32 {
        counts
            .iter()
            .map(|(kind, count)| self.weight(kind) * count as f32)
            .sum()
    }
}

impl Default for MaterialWeights {
    /// Pawn 1, knight 3, bishop 3, rook 5, queen 9, king 0.
    fn default() -> Self {
        Self::new([1.0, 3.0, 3.0, 5.0, 9.0, 0.0])
    }
}

/// Largest material difference in a game without promotions:
/// 8 pawns + 2 knights + 2 bishops + 2 rooks + 1 queen.
pub const MAX_MATERIAL_DIFFERENTIAL: f32 = 39.0;

/// Material-count evaluator with terminal detection.
#[derive(Debug, Clone)]
pub struct MaterialEvaluator {
    weights: MaterialWeights,
    normalizer: f32,
}

impl Default for MaterialEvaluator {
    fn default() -> Self {
        Self {
            weights: MaterialWeights::default(),
            normalizer: MAX_MATERIAL_DIFFERENTIAL,
        }
    }
}

impl MaterialEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: MaterialWeights, normalizer: f32) -> Self {
        Self {
            weights,
            normalizer,
        }
    }

    pub fn weights(&self) -> &MaterialWeights {
        &self.weights
    }
}

impl<G: GameState> Evaluator<G> for MaterialEvaluator {
    fn evaluate(&self, state: &G, own_side: Side) -> Result<f32, EvaluatorError> {
        let to_move = state.side_to_move();

        if state.is_checkmate() {
            return Ok(if to_move == own_side { -1.0 } else { 1.0 });
        }
        if state.is_draw() {
            return Ok(0.0);
        }

        if !self.normalizer.is_finite() || self.normalizer <= 0.0 {
            return Err(EvaluatorError::InvalidState(format!(
                "material normalizer must be positive, got {}",
                self.normalizer
            )));
        }

        // Differential for the side to move, then flipped into our perspective
        let differential = self.weights.score(&state.material(to_move))
            - self.weights.score(&state.material(to_move.opponent()));
        let mut value = differential / self.normalizer;
        if to_move != own_side {
            value = -value;
        }

        // Promotions can push the raw differential past the nominal maximum
        Ok(value.clamp(-1.0, 1.0))
    }
}
