//! Chess rules engine adapter for the search core
//!
//! Wraps the `chess` crate's copy-make `Board` in a mutable state with an
//! undo history, so the search can apply and take back moves in place.
//!
//! # Usage
//!
//! ```rust
//! use engine_core::GameState;
//! use games_chess::ChessGame;
//!
//! let mut game = ChessGame::new();
//! let mv = game.parse_move("e2e4").unwrap();
//! game.apply(&mv);
//! assert_eq!(game.ply_count(), 1);
//! game.undo(&mv).unwrap();
//! assert_eq!(game, ChessGame::new());
//! ```

use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, Color, MoveGen, Piece, Square};
use engine_core::{GameError, GameState, MaterialCounts, PieceKind, Side};
use tracing::trace;

pub use chess::ChessMove;

/// Standard starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule applies.
const FIFTY_MOVE_PLIES: u32 = 100;

/// Everything needed to restore the position before a move.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Snapshot {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    mv: ChessMove,
}

/// Chess position with make/undo support
///
/// `apply` pushes a snapshot and `undo` pops it, so a paired
/// `apply`/`undo` restores the position exactly, including the
/// repetition history and move counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessGame {
    board: Board,
    halfmove_clock: u32,
    fullmove_number: u32,
    /// Hashes of every position on the current line, current one last
    positions: Vec<u64>,
    history: Vec<Snapshot>,
}

impl ChessGame {
    /// Create a game at the standard starting position.
    pub fn new() -> Self {
        Self::from_board(Board::default(), 0, 1)
    }

    /// Create a game from a FEN string.
    ///
    /// The halfmove clock and fullmove number fields are optional and
    /// default to `0` and `1`.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let board = Board::from_str(fen)
            .map_err(|e| GameError::InvalidPosition(format!("{fen}: {e}")))?;

        let mut fields = fen.split_whitespace().skip(4);
        let halfmove_clock = parse_counter(fields.next(), 0, fen)?;
        let fullmove_number = parse_counter(fields.next(), 1, fen)?;

        Ok(Self::from_board(board, halfmove_clock, fullmove_number))
    }

    fn from_board(board: Board, halfmove_clock: u32, fullmove_number: u32) -> Self {
        Self {
            board,
            halfmove_clock,
            fullmove_number,
            positions: vec![board.get_hash()],
            history: Vec::new(),
        }
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// FEN of the current position with the tracked move counters.
    pub fn fen(&self) -> String {
        let board_fen = self.board.to_string();
        let prefix: Vec<&str> = board_fen.split_whitespace().take(4).collect();
        format!(
            "{} {} {}",
            prefix.join(" "),
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Parse a move in coordinate notation (`e2e4`, `e7e8q`) and check
    /// that it is legal in the current position.
    pub fn parse_move(&self, text: &str) -> Result<ChessMove, GameError> {
        let text = text.trim();
        if !(4..=5).contains(&text.len()) || !text.is_ascii() {
            return Err(GameError::IllegalMove(text.to_string()));
        }

        let source = Square::from_str(&text[0..2])
            .map_err(|_| GameError::IllegalMove(text.to_string()))?;
        let dest = Square::from_str(&text[2..4])
            .map_err(|_| GameError::IllegalMove(text.to_string()))?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some('q') => Some(Piece::Queen),
            Some('r') => Some(Piece::Rook),
            Some('b') => Some(Piece::Bishop),
            Some('n') => Some(Piece::Knight),
            Some(_) => return Err(GameError::IllegalMove(text.to_string())),
        };

        let mv = ChessMove::new(source, dest, promotion);
        if self.board.legal(mv) {
            Ok(mv)
        } else {
            Err(GameError::IllegalMove(text.to_string()))
        }
    }

    /// Number of times the current position occurred on this line.
    pub fn repetitions(&self) -> usize {
        let current = self.board.get_hash();
        self.positions.iter().filter(|&&h| h == current).count()
    }

    /// Neither side can possibly deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = *self.board.pieces(Piece::Pawn)
            | *self.board.pieces(Piece::Rook)
            | *self.board.pieces(Piece::Queen);
        if heavy.popcnt() > 0 {
            return false;
        }

        let knights = *self.board.pieces(Piece::Knight);
        let bishops = *self.board.pieces(Piece::Bishop);
        let minors = knights.popcnt() + bishops.popcnt();
        if minors <= 1 {
            return true;
        }

        // Only bishops left, all on squares of one colour
        knights.popcnt() == 0 && same_square_colour(bishops)
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState for ChessGame {
    type Move = ChessMove;

    fn legal_moves(&self) -> Vec<ChessMove> {
        MoveGen::new_legal(&self.board).collect()
    }

    fn apply(&mut self, mv: &ChessMove) {
        debug_assert!(self.board.legal(*mv), "illegal move {mv} in {}", self.fen());

        self.history.push(Snapshot {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            mv: *mv,
        });

        let resets_clock = self.board.piece_on(mv.get_source()) == Some(Piece::Pawn)
            || self.board.piece_on(mv.get_dest()).is_some();
        if resets_clock {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if self.board.side_to_move() == Color::Black {
            self.fullmove_number += 1;
        }

        self.board = self.board.make_move_new(*mv);
        self.positions.push(self.board.get_hash());
    }

    fn undo(&mut self, mv: &ChessMove) -> Result<(), GameError> {
        let last = self.history.last().ok_or(GameError::EmptyHistory)?;
        if last.mv != *mv {
            return Err(GameError::UndoMismatch {
                expected: last.mv.to_string(),
                found: mv.to_string(),
            });
        }

        if let Some(snapshot) = self.history.pop() {
            self.board = snapshot.board;
            self.halfmove_clock = snapshot.halfmove_clock;
            self.fullmove_number = snapshot.fullmove_number;
            self.positions.pop();
        }

        trace!(mv = %mv, depth = self.history.len(), "undo");
        Ok(())
    }

    fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    fn is_draw(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
            || self.halfmove_clock >= FIFTY_MOVE_PLIES
            || self.repetitions() >= 3
            || self.is_insufficient_material()
    }

    fn side_to_move(&self) -> Side {
        to_side(self.board.side_to_move())
    }

    fn material(&self, side: Side) -> MaterialCounts {
        let own = *self.board.color_combined(to_color(side));
        let mut counts = MaterialCounts::default();
        for kind in PieceKind::ALL {
            let count = (*self.board.pieces(to_piece(kind)) & own).popcnt();
            counts.set(kind, count as u8);
        }
        counts
    }

    fn ply_count(&self) -> usize {
        self.history.len()
    }
}

pub fn to_side(color: Color) -> Side {
    match color {
        Color::White => Side::White,
        Color::Black => Side::Black,
    }
}

pub fn to_color(side: Side) -> Color {
    match side {
        Side::White => Color::White,
        Side::Black => Color::Black,
    }
}

fn to_piece(kind: PieceKind) -> Piece {
    match kind {
        PieceKind::Pawn => Piece::Pawn,
        PieceKind::Knight => Piece::Knight,
        PieceKind::Bishop => Piece::Bishop,
        PieceKind::Rook => Piece::Rook,
        PieceKind::Queen => Piece::Queen,
        PieceKind::King => Piece::King,
    }
}

fn same_square_colour(pieces: BitBoard) -> bool {
    let mut colours = pieces.map(|sq| (sq.get_rank().to_index() + sq.get_file().to_index()) % 2);
    match colours.next() {
        Some(first) => colours.all(|c| c == first),
        None => true,
    }
}

fn parse_counter(field: Option<&str>, default: u32, fen: &str) -> Result<u32, GameError> {
    match field {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| GameError::InvalidPosition(format!("{fen}: bad move counter '{s}'"))),
    }
}
