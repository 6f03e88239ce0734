//! Knight move generation
//!
//! Knights jump: the 8 L-shaped offsets, kept if on the board and not
//! occupied by a friendly piece. Pieces in between don't matter.

use crate::board::Board;
use crate::constants::KNIGHT_OFFSETS;
use crate::types::{Color, Square};

pub fn generate_knight_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    for (file_delta, rank_delta) in KNIGHT_OFFSETS {
        if let Some(target) = from.offset(file_delta, rank_delta) {
            if !board.is_friendly(target, color) {
                moves.push(target);
            }
        }
    }
}
