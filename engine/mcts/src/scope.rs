//! Scoped make/undo on the shared game state.
//!
//! The search mutates a single game state in place. Every move applied
//! through a [`MoveScope`] is taken back in reverse order when the scope is
//! closed, and again on drop if an early return or a panic skipped the
//! close, so the shared state is never left holding moves of a finished
//! search step.

use std::ops::{Deref, DerefMut};

use engine_core::{GameError, GameState};
use tracing::error;

/// Guard owning the moves applied to a borrowed game state.
pub struct MoveScope<'a, G: GameState> {
    state: &'a mut G,
    applied: Vec<G::Move>,
}

impl<'a, G: GameState> MoveScope<'a, G> {
    pub fn new(state: &'a mut G) -> Self {
        Self {
            state,
            applied: Vec::new(),
        }
    }

    /// Apply `mv` and remember it for undo.
    pub fn apply(&mut self, mv: &G::Move) {
        self.state.apply(mv);
        self.applied.push(mv.clone());
    }

    /// Number of moves currently applied through this scope.
    pub fn depth(&self) -> usize {
        self.applied.len()
    }

    /// Undo every applied move, most recent first.
    pub fn close(mut self) -> Result<(), GameError> {
        self.unwind()
    }

    fn unwind(&mut self) -> Result<(), GameError> {
        while let Some(mv) = self.applied.pop() {
            self.state.undo(&mv)?;
        }
        Ok(())
    }
}

impl<G: GameState> Deref for MoveScope<'_, G> {
    type Target = G;

    fn deref(&self) -> &G {
        &*self.state
    }
}

impl<G: GameState> DerefMut for MoveScope<'_, G> {
    fn deref_mut(&mut self) -> &mut G {
        &mut *self.state
    }
}

impl<G: GameState> Drop for MoveScope<'_, G> {
    fn drop(&mut self) {
        if self.applied.is_empty() {
            return;
        }
        let pending = self.applied.len();
        if let Err(e) = self.unwind() {
            error!(pending, error = %e, "failed to restore game state while unwinding");
        }
    }
}
