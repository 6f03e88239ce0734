//! Sliding piece move generation
//!
//! Common functionality for bishops, rooks and queens.
//!
//! ## Algorithm
//!
//! For each direction the piece may slide in:
//! 1. Step one square at a time until the board edge
//! 2. Empty squares are destinations; keep going
//! 3. The first occupied square ends the ray; it is a destination only if
//!    it holds an enemy piece (a capture)
//!
//! A sliding piece has at most 27 destinations (a queen in the centre),
//! so each ray scan is bounded.

use crate::board::Board;
use crate::types::{Color, Square};

/// Cast rays from `from` along each of `dirs`
///
/// # Arguments
///
/// * `board` - Position to generate against
/// * `from` - Square the sliding piece stands on
/// * `color` - Color of the moving piece
/// * `dirs` - `(file, rank)` unit steps to slide along
/// * `moves` - Output vector to append destinations to
pub fn generate_sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(file_delta, rank_delta) in dirs {
        let mut current = from;

        while let Some(next) = current.offset(file_delta, rank_delta) {
            match board.piece_at(next) {
                None => moves.push(next),
                Some(blocker) => {
                    if blocker.color != color {
                        moves.push(next);
                    }
                    break;
                }
            }
            current = next;
        }
    }
}

/// `true` if every square strictly between two aligned squares is empty
///
/// The squares must share a rank, a file or a diagonal; anything else
/// returns `false`.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let (file_delta, rank_delta) = from.delta(to);
    let aligned = file_delta == 0 || rank_delta == 0 || file_delta.abs() == rank_delta.abs();
    if from == to || !aligned {
        return false;
    }

    let step = (file_delta.signum(), rank_delta.signum());
    let mut current = from;

    while let Some(next) = current.offset(step.0, step.1) {
        if next == to {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }

    false
}
