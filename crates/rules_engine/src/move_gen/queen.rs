//! Queen move generation
//!
//! Queens slide like a rook and a bishop combined: all eight directions.

use super::sliding;
use crate::board::Board;
use crate::constants::QUEEN_DIRS;
use crate::types::{Color, Square};

/// Generate queen moves from a given square
///
/// # Arguments
///
/// * `board` - Position to generate against
/// * `from` - Square the queen stands on
/// * `color` - Color of the queen
/// * `moves` - Output vector to append destinations to
pub fn generate_queen_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    sliding::generate_sliding_moves(board, from, color, &QUEEN_DIRS, moves);
}
