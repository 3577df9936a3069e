//! GameState trait describing the rules-engine capabilities the search needs
//!
//! The search never owns a copy of the position. It mutates one shared state
//! in place with `apply` and restores it with `undo`, so implementations must
//! guarantee that an `apply`/`undo` pair leaves the state exactly as it was.

use std::fmt::{Debug, Display};

use crate::game_utils::{MaterialCounts, Side};

/// Capability set of a two-player, zero-sum, perfect-information game.
///
/// # Type Parameters
///
/// * `Move` - Opaque move value; only equality and display are required
///
/// # Example
///
/// ```rust
/// use engine_core::{GameError, GameState, MaterialCounts, Side};
///
/// /// Players alternately take one or two stones; taking the last stone wins.
/// #[derive(Debug, Clone, PartialEq)]
/// struct Nim {
///     stones: u32,
///     to_move: Side,
///     history: Vec<u32>,
/// }
///
/// impl GameState for Nim {
///     type Move = u32;
///
///     fn legal_moves(&self) -> Vec<u32> {
///         (1..=self.stones.min(2)).collect()
///     }
///
///     fn apply(&mut self, mv: &u32) {
///         self.stones -= *mv;
///         self.to_move = self.to_move.opponent();
///         self.history.push(*mv);
///     }
///
///     fn undo(&mut self, mv: &u32) -> Result<(), GameError> {
///         match self.history.last() {
///             Some(last) if last == mv => {
///                 self.history.pop();
///                 self.stones += *mv;
///                 self.to_move = self.to_move.opponent();
///                 Ok(())
///             }
///             Some(last) => Err(GameError::UndoMismatch {
///                 expected: last.to_string(),
///                 found: mv.to_string(),
///             }),
///             None => Err(GameError::EmptyHistory),
///         }
///     }
///
///     fn is_checkmate(&self) -> bool {
///         self.stones == 0
///     }
///
///     fn is_draw(&self) -> bool {
///         false
///     }
///
///     fn side_to_move(&self) -> Side {
///         self.to_move
///     }
///
///     fn material(&self, _side: Side) -> MaterialCounts {
///         MaterialCounts::default()
///     }
///
///     fn ply_count(&self) -> usize {
///         self.history.len()
///     }
/// }
///
/// let mut nim = Nim { stones: 3, to_move: Side::White, history: Vec::new() };
/// nim.apply(&2);
/// assert_eq!(nim.legal_moves(), vec![1]);
/// nim.undo(&2).unwrap();
/// assert_eq!(nim.stones, 3);
/// ```
pub trait GameState {
    /// Move type - small, comparable, printable
    type Move: Clone + PartialEq + Debug + Display;

    /// Enumerate the legal moves of the side to move.
    ///
    /// Returns an empty vector at checkmate or stalemate. The order must be
    /// deterministic for a given position so that seeded searches reproduce.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv` on the shared state.
    ///
    /// `mv` must come from `legal_moves()` of the current position.
    fn apply(&mut self, mv: &Self::Move);

    /// Take back `mv`, which must be the most recently applied move.
    ///
    /// # Errors
    ///
    /// `GameError::UndoMismatch` if `mv` is not the last applied move and
    /// `GameError::EmptyHistory` if nothing has been applied.
    fn undo(&mut self, mv: &Self::Move) -> Result<(), GameError>;

    /// The side to move is in check and has no legal move.
    fn is_checkmate(&self) -> bool;

    /// The position is a drawn terminal state.
    fn is_draw(&self) -> bool;

    /// Side whose turn it is.
    fn side_to_move(&self) -> Side;

    /// Piece inventory of one side.
    fn material(&self, side: Side) -> MaterialCounts;

    /// Number of applied moves that can still be undone.
    fn ply_count(&self) -> usize;
}

/// Error type for rules-engine operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("Undo mismatch: last applied move was {expected} but undo was asked for {found}")]
    UndoMismatch { expected: String, found: String },
    #[error("Undo requested with an empty move history")]
    EmptyHistory,
    #[error("Invalid position: {0}")]
    InvalidPosition(String),
    #[error("Illegal move: {0}")]
    IllegalMove(String),
}
