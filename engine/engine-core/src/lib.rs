//! Core traits and types shared by the search and the rules engines
//!
//! This crate provides the abstractions the search core consumes:
//! - `GameState`: legal moves, paired make/undo mutation, terminal queries, material
//! - `Side`, `PieceKind`, `MaterialCounts`: two-player bookkeeping
//! - `Clock`: elapsed-time source for budgeted searches

pub mod clock;
pub mod game_utils;
pub mod typed;

// Re-export main types for convenience
pub use clock::{Clock, StepClock, WallClock};
pub use game_utils::{MaterialCounts, PieceKind, Side};
pub use typed::{GameError, GameState};
