//! Rook move generation
//!
//! ## Rook Movement Rules
//!
//! - Rooks move along ranks and files
//! - Cannot jump over pieces
//! - Cannot move to squares occupied by own pieces
//! - Can capture opponent pieces on destination squares
//!
//! The castling rook jump is applied by the make/unmake routine, not here.

use super::sliding;
use crate::board::Board;
use crate::constants::ROOK_DIRS;
use crate::types::{Color, Square};

pub fn generate_rook_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    sliding::generate_sliding_moves(board, from, color, &ROOK_DIRS, moves);
}
