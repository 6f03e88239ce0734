//! Attack detection and square checking
//!
//! Answers "is this square attacked by that color?" and, on top of it,
//! "is this king in check?". Used by:
//! - the validator's self-check filter (does the move leave the king attacked?)
//! - castling (are the king's square, transit square and destination safe?)
//! - game status evaluation (is the side to move in check?)
//!
//! ## Algorithm
//!
//! Every piece of the attacking color is asked whether its movement pattern
//! reaches the target square on the current board. This is the candidate
//! generator's geometry with two differences that matter for attacks:
//! - pawns attack only their two forward diagonals, whether or not a piece
//!   stands there, and never attack with a push
//! - the occupant of the target square is ignored
//!
//! Nothing here consults the legal-move filter, so check detection never
//! recurses into itself.

use super::sliding::is_path_clear;
use crate::board::Board;
use crate::error::RulesResult;
use crate::types::{Color, Piece, PieceKind, Square};

/// Check if a square is under attack by pieces of the specified color
///
/// # Arguments
///
/// * `board` - The position
/// * `square` - Target square to check
/// * `by_color` - Color of pieces that might attack
///
/// # Examples
///
/// ```rust,ignore
/// // Is f1 covered by Black before White castles kingside?
/// let attacked = is_square_attacked(&board, f1, Color::Black);
/// ```
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces_of(by_color)
        .any(|(from, piece)| can_attack(board, piece, from, square))
}

/// Squares holding `by_color` pieces that attack `square`
pub fn attackers_of(board: &Board, square: Square, by_color: Color) -> Vec<Square> {
    board
        .pieces_of(by_color)
        .filter(|&(from, piece)| can_attack(board, piece, from, square))
        .map(|(from, _)| from)
        .collect()
}

/// Squares the piece on `from` attacks, whatever stands on them
///
/// Pawns contribute their two forward diagonals only. Empty when `from` is
/// empty.
pub fn attacks(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    Square::all()
        .filter(|&target| can_attack(board, piece, from, target))
        .collect()
}

/// Check if the king of a given color is attacked
///
/// # Errors
///
/// `InvariantViolation` if the color does not have exactly one king.
pub fn king_in_check(board: &Board, color: Color) -> RulesResult<bool> {
    let king = board.king_square(color)?;
    Ok(is_square_attacked(board, king, color.opponent()))
}

/// Check if a piece standing on `from` attacks `target`
pub fn can_attack(board: &Board, piece: Piece, from: Square, target: Square) -> bool {
    if from == target {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => can_pawn_attack(from, target, piece.color),
        PieceKind::Knight => can_knight_attack(from, target),
        PieceKind::Bishop => can_bishop_attack(board, from, target),
        PieceKind::Rook => can_rook_attack(board, from, target),
        PieceKind::Queen => {
            can_rook_attack(board, from, target) || can_bishop_attack(board, from, target)
        }
        PieceKind::King => can_king_attack(from, target),
    }
}

/// Pawns attack one square diagonally forward
fn can_pawn_attack(from: Square, to: Square, color: Color) -> bool {
    let (file_delta, rank_delta) = from.delta(to);
    rank_delta == color.forward() && file_delta.abs() == 1
}

/// Knights attack in an L-shape, ignoring pieces in between
fn can_knight_attack(from: Square, to: Square) -> bool {
    let (file_delta, rank_delta) = from.delta(to);
    let (file_delta, rank_delta) = (file_delta.abs(), rank_delta.abs());
    (file_delta == 2 && rank_delta == 1) || (file_delta == 1 && rank_delta == 2)
}

/// Bishops attack along an unblocked diagonal
fn can_bishop_attack(board: &Board, from: Square, to: Square) -> bool {
    let (file_delta, rank_delta) = from.delta(to);
    file_delta.abs() == rank_delta.abs() && is_path_clear(board, from, to)
}

/// Rooks attack along an unblocked rank or file
fn can_rook_attack(board: &Board, from: Square, to: Square) -> bool {
    let (file_delta, rank_delta) = from.delta(to);
    (file_delta == 0 || rank_delta == 0) && is_path_clear(board, from, to)
}

fn can_king_attack(from: Square, to: Square) -> bool {
    let (file_delta, rank_delta) = from.delta(to);
    file_delta.abs() <= 1 && rank_delta.abs() <= 1
}
