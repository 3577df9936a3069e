//! Random playouts used to seed the value of newly expanded nodes.

use engine_core::{GameState, Side};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::evaluator::Evaluator;
use crate::scope::MoveScope;
use crate::search::SearchError;

/// Play up to `depth` uniformly random moves, evaluate the final position
/// and take every move back.
///
/// The playout stops early when the side to move has no legal move or the
/// position is already a draw.
pub fn rollout<G, E>(
    state: &mut G,
    evaluator: &E,
    own_side: Side,
    depth: u32,
    rng: &mut ChaCha20Rng,
) -> Result<f32, SearchError>
where
    G: GameState,
    E: Evaluator<G>,
{
    let mut scope = MoveScope::new(state);

    for _ in 0..depth {
        if scope.is_draw() {
            break;
        }
        let moves = scope.legal_moves();
        let Some(mv) = moves.choose(rng) else {
            break;
        };
        scope.apply(mv);
    }

    let value = evaluator.evaluate(&*scope, own_side)?;
    scope.close()?;
    Ok(value)
}

/// Average of `count` independent rollouts from the current position.
///
/// With `count == 0` the position is scored statically.
pub fn average_rollouts<G, E>(
    state: &mut G,
    evaluator: &E,
    own_side: Side,
    count: u32,
    depth: u32,
    rng: &mut ChaCha20Rng,
) -> Result<f32, SearchError>
where
    G: GameState,
    E: Evaluator<G>,
{
    if count == 0 {
        return Ok(evaluator.evaluate(state, own_side)?);
    }

    let mut total = 0.0;
    for _ in 0..count {
        total += rollout(state, evaluator, own_side, depth, rng)?;
    }
    Ok(total / count as f32)
}
