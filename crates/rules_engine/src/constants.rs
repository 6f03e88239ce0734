//! Rules constants: movement offsets, the starting layout and draw limits
//!
//! Offsets are `(file, rank)` steps rather than 0..63 index deltas, so a step
//! off the edge is caught by [`crate::types::Square::offset`] instead of
//! wrapping onto the next rank.

use crate::types::PieceKind;

/// The 8 knight jumps
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// The 8 squares around a king
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
pub const QUEEN_DIRS: [(i8, i8); 8] = [
    (0, 1),
    (1, 0),
    (0, -1),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, -1),
    (-1, 1),
];

/// Piece kinds on the back rank from the a-file to the h-file
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// File both kings start on
pub const KING_HOME_FILE: u8 = 4;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without capture or pawn move before the fifty-move rule applies
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Occurrences of one position that make a repetition draw
pub const REPETITION_LIMIT: usize = 3;
