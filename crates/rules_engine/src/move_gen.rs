//! Candidate move generation
//!
//! Maps a piece on a board to the destination squares its movement rule
//! reaches, **before** the "own king not left in check" filter. Keeping this
//! layer free of the self-check simulation lets tests enumerate raw
//! candidates cheaply; [`crate::validator`] does the filtering.
//!
//! ## Module Structure
//!
//! - `pawn` - pushes, double push, diagonal captures, en-passant candidate
//! - `knight` / `king` - fixed offsets
//! - `sliding` with `bishop`, `rook`, `queen` - ray casting
//! - `attack` - attacked-square and check detection
//!
//! Castling destinations are not produced here; they depend on rook
//! position, empty transit squares and attacks, and are assembled by the
//! validator.

pub mod attack;
mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;
mod sliding;


pub use attack::{attackers_of, attacks, is_square_attacked, king_in_check};
pub(crate) use pawn::has_en_passant_victim;

use crate::board::Board;
use crate::types::{Color, Move, PieceKind, Square};

/// Candidate destinations for the piece on `from`
///
/// Empty when `from` is empty. The order follows the generator for the
/// piece kind and is not meaningful.
pub fn candidate_moves(board: &Board, from: Square) -> Vec<Square> {
    let mut moves = Vec::new();
    let Some(piece) = board.piece_at(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => pawn::generate_pawn_moves(board, from, piece.color, &mut moves),
        PieceKind::Knight => knight::generate_knight_moves(board, from, piece.color, &mut moves),
        PieceKind::Bishop => bishop::generate_bishop_moves(board, from, piece.color, &mut moves),
        PieceKind::Rook => rook::generate_rook_moves(board, from, piece.color, &mut moves),
        PieceKind::Queen => queen::generate_queen_moves(board, from, piece.color, &mut moves),
        PieceKind::King => king::generate_king_moves(board, from, piece.color, &mut moves),
    }

    moves
}

/// Every candidate move for one side, promotions not expanded
pub fn generate_pseudo_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(from, _)| {
            candidate_moves(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}
