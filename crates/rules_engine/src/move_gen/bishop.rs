//! Bishop move generation
//!
//! Bishops slide diagonally until blocked by a piece or the board edge,
//! capturing an enemy blocker.

use super::sliding;
use crate::board::Board;
use crate::constants::BISHOP_DIRS;
use crate::types::{Color, Square};

/// Generate bishop moves from a given square
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = Vec::new();
/// generate_bishop_moves(&board, c1, Color::White, &mut moves);
/// ```
pub fn generate_bishop_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    sliding::generate_sliding_moves(board, from, color, &BISHOP_DIRS, moves);
}
