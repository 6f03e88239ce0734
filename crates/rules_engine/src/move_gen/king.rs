//! King move generation
//!
//! ## King Movement Rules
//!
//! - One square in any direction (up to 8 destinations)
//! - Cannot move onto its own pieces; may capture enemy pieces
//! - Moving into an attacked square is ruled out later by the validator
//!
//! ## Note on Castling
//!
//! Castling is not generated here because it depends on:
//! - The castling right for that side still being set
//! - King and rook both unmoved on their home squares
//! - No pieces between king and rook
//! - The king's square, transit square and destination not attacked
//!
//! Those are cross-piece conditions, checked in
//! [`crate::validator::castling_moves`].

use crate::board::Board;
use crate::constants::KING_OFFSETS;
use crate::types::{Color, Square};

/// Generate king moves from a given square, castling excluded
pub fn generate_king_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    for (file_delta, rank_delta) in KING_OFFSETS {
        if let Some(target) = from.offset(file_delta, rank_delta) {
            // Valid if destination is empty or holds an opponent piece
            if !board.is_friendly(target, color) {
                moves.push(target);
            }
        }
    }
}
