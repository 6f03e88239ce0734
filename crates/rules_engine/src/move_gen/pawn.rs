//! Pawn move generation
//!
//! ## Pawn Movement Rules
//!
//! - **Forward push**: one square toward the opponent, destination empty
//! - **Double push**: from the starting rank, both squares empty
//! - **Captures**: one square diagonally forward onto an enemy piece
//! - **En passant**: diagonally forward onto the board's en-passant target
//!   when it is empty and the enemy pawn that skipped over it stands beside
//!   the mover; the validator turns this into a capture of that pawn
//! - **Promotion**: not decided here; the destination rank is enough for the
//!   validator and the apply step to substitute the piece

use crate::board::Board;
use crate::types::{Color, PieceKind, Square};

/// Generate pawn candidates from a given square
///
/// # Arguments
///
/// * `board` - Position to generate against
/// * `from` - Square the pawn stands on
/// * `color` - Color of the pawn
/// * `moves` - Output vector to append destinations to
///
/// # Examples
///
/// ```rust,ignore
/// let mut moves = Vec::new();
/// generate_pawn_moves(&Board::standard(), e2, Color::White, &mut moves);
/// // moves == [e3, e4]
/// ```
pub fn generate_pawn_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Square>) {
    let forward = color.forward();

    if let Some(one) = from.offset(0, forward) {
        if board.is_empty(one) {
            moves.push(one);

            if from.rank() == color.pawn_rank() {
                if let Some(two) = one.offset(0, forward) {
                    if board.is_empty(two) {
                        moves.push(two);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(target) = from.offset(side, forward) else {
            continue;
        };

        if board.is_enemy(target, color) {
            moves.push(target);
        } else if board.en_passant_target() == Some(target)
            && board.is_empty(target)
            && has_en_passant_victim(board, target, color)
        {
            moves.push(target);
        }
    }
}

/// An enemy pawn stands on the square an en-passant capture onto `target` removes
pub(crate) fn has_en_passant_victim(board: &Board, target: Square, color: Color) -> bool {
    target.rank() == color.en_passant_rank()
        && target
            .offset(0, -color.forward())
            .and_then(|victim| board.piece_at(victim))
            .is_some_and(|piece| piece.is(PieceKind::Pawn, !color))
}
