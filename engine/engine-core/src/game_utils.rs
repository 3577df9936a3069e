//! Shared bookkeeping types for two-player game implementations
//!
//! Sides and piece inventories are kept independent of any particular
//! board representation so the evaluator can score positions without
//! knowing the rules engine behind them.

use std::fmt;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => f.write_str("white"),
            Side::Black => f.write_str("black"),
        }
    }
}

/// Piece types in material-inventory order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All piece kinds, indexable by `PieceKind::index`.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Per-piece-kind counts for one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialCounts {
    counts: [u8; 6],
}

impl MaterialCounts {
    /// Build from counts in `PieceKind::ALL` order.
    pub fn from_counts(counts: [u8; 6]) -> Self {
        Self { counts }
    }

    #[inline]
    pub fn get(&self, kind: PieceKind) -> u8 {
        self.counts[kind.index()]
    }

    #[inline]
    pub fn set(&mut self, kind: PieceKind, count: u8) {
        self.counts[kind.index()] = count;
    }

    /// Iterate `(kind, count)` pairs in `PieceKind::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::ALL.iter().map(move |&kind| (kind, self.get(kind)))
    }

    /// Total number of pieces, kings included.
    pub fn total_pieces(&self) -> u32 {
        self.counts.iter().map(|&c| c as u32).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involution() {
        assert_eq!(Side::White.opponent(), Side::Black);
        assert_eq!(Side::Black.opponent(), Side::White);
        assert_eq!(Side::White.opponent().opponent(), Side::White);
    }

    #[test]
    fn test_piece_kind_index_matches_all() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_material_counts() {
        // Standard starting inventory
        let mut counts = MaterialCounts::from_counts([8, 2, 2, 2, 1, 1]);
        assert_eq!(counts.get(PieceKind::Pawn), 8);
        assert_eq!(counts.get(PieceKind::Queen), 1);
        assert_eq!(counts.total_pieces(), 16);

        counts.set(PieceKind::Queen, 0);
        assert_eq!(counts.get(PieceKind::Queen), 0);
        assert_eq!(counts.total_pieces(), 15);

        let collected: Vec<_> = counts.iter().collect();
        assert_eq!(collected[0], (PieceKind::Pawn, 8));
        assert_eq!(collected[5], (PieceKind::King, 1));
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(MaterialCounts::default().total_pieces(), 0);
    }
}
