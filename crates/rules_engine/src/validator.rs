//! Legal move validation
//!
//! Turns candidate moves into legal moves. A candidate is legal when, after
//! playing it, the mover's own king is not attacked. Castling is assembled
//! here too, since it depends on several pieces at once.
//!
//! # Self-check simulation
//!
//! Each candidate is played on a scratch copy of the board through a
//! [`Simulation`] guard. The guard applies the move with the same
//! make/unmake routine `GameState` uses and takes it back when dropped, on
//! every exit path, so the scratch board is always back to the original
//! position before the next candidate is tried. The caller's board is only
//! ever borrowed immutably.
//!
//! Attacks are tested with [`crate::move_gen::attack`], which never calls
//! back into this module.

use std::ops::Deref;

use tracing::trace;

use crate::board::Board;
use crate::constants::KING_HOME_FILE;
use crate::error::{IllegalReason, RulesError, RulesResult};
use crate::make_unmake::{make_move, unmake_move, UndoInfo};
use crate::move_gen::{candidate_moves, is_square_attacked, king_in_check};
use crate::types::{CastlingSide, Color, Move, MoveKind, Piece, PieceKind, Square};

/// A legal move together with what it does to the board
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResolvedMove {
    /// The request, with the default Queen filled in for a bare promotion
    pub mv: Move,
    pub kind: MoveKind,
}

// ============================================================================
// Scoped simulation
// ============================================================================

/// A move played on a board for the lifetime of the guard
///
/// Dereferences to the board with the move applied. Dropping the guard
/// unmakes the move.
pub(crate) struct Simulation<'a> {
    board: &'a mut Board,
    undo: UndoInfo,
}

impl<'a> Simulation<'a> {
    pub(crate) fn apply(board: &'a mut Board, mv: Move, kind: MoveKind) -> RulesResult<Self> {
        let undo = make_move(board, mv, kind)?;
        Ok(Simulation { board, undo })
    }
}

impl Deref for Simulation<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        self.board
    }
}

impl Drop for Simulation<'_> {
    fn drop(&mut self) {
        unmake_move(self.board, &self.undo);
    }
}

// ============================================================================
// Classification
// ============================================================================

/// What a geometrically valid move by `piece` does on this board
pub(crate) fn classify(board: &Board, piece: Piece, from: Square, to: Square) -> MoveKind {
    let (file_delta, rank_delta) = from.delta(to);

    match piece.kind {
        PieceKind::King if file_delta.abs() == 2 => CastlingSide::from_king_target(to.file())
            .map_or(MoveKind::Quiet, MoveKind::Castle),
        PieceKind::Pawn if rank_delta.abs() == 2 => MoveKind::DoublePush,
        PieceKind::Pawn if file_delta != 0 && board.is_empty(to) => MoveKind::EnPassant,
        _ if board.piece_at(to).is_some() => MoveKind::Capture,
        _ => MoveKind::Quiet,
    }
}

/// `true` if a pawn of this color moving to `to` must promote
#[inline]
pub(crate) fn is_promotion(piece: Piece, to: Square) -> bool {
    piece.kind == PieceKind::Pawn && to.rank() == piece.color.promotion_rank()
}

/// Play the move on the scratch board and test the mover's king
fn leaves_king_safe(
    scratch: &mut Board,
    mv: Move,
    kind: MoveKind,
    color: Color,
) -> RulesResult<bool> {
    let simulated = Simulation::apply(scratch, mv, kind)?;
    Ok(!king_in_check(&simulated, color)?)
}

// ============================================================================
// Legal moves
// ============================================================================

/// Legal destinations for the piece on `from`, sorted a1..h8
///
/// Includes castling destinations (the king's landing square) and
/// en-passant captures. A promoting pawn's destination appears once; the
/// promotion piece is chosen when the move is applied. Empty when `from` is
/// empty. The side to move is not consulted: the piece's own color decides
/// whose king must stay safe.
///
/// # Errors
///
/// `InvariantViolation` if either color lacks exactly one king.
pub fn legal_moves(board: &Board, from: Square) -> RulesResult<Vec<Square>> {
    let Some(piece) = board.piece_at(from) else {
        return Ok(Vec::new());
    };

    let mut scratch = board.clone();
    let mut moves = Vec::new();

    for to in candidate_moves(board, from) {
        let kind = classify(board, piece, from, to);
        if leaves_king_safe(&mut scratch, Move::new(from, to), kind, piece.color)? {
            moves.push(to);
        }
    }

    for to in castling_moves(board, from) {
        let side = CastlingSide::from_king_target(to.file())
            .ok_or_else(|| RulesError::invariant(format!("castling target {to} has no side")))?;
        if leaves_king_safe(
            &mut scratch,
            Move::new(from, to),
            MoveKind::Castle(side),
            piece.color,
        )? {
            moves.push(to);
        }
    }

    moves.sort_unstable();
    moves.dedup();
    Ok(moves)
}

/// Castling destinations for the king on `from`
///
/// A side is offered iff:
/// - its castling right is still set
/// - king and rook stand unmoved on their home squares
/// - every square strictly between them is empty
/// - the king's square, the square it crosses and its landing square are
///   not attacked by the opponent
pub fn castling_moves(board: &Board, from: Square) -> Vec<Square> {
    let mut moves = Vec::new();
    let Some(king) = board.piece_at(from) else {
        return moves;
    };

    let color = king.color;
    let rank = color.back_rank();
    if king.kind != PieceKind::King || king.has_moved || from != Square::at(KING_HOME_FILE, rank)
    {
        return moves;
    }

    for side in CastlingSide::BOTH {
        if !board.castling_rights().has(color, side) {
            continue;
        }

        let rook_home = Square::at(side.rook_file(), rank);
        let rook_ready = matches!(
            board.piece_at(rook_home),
            Some(rook) if rook.is(PieceKind::Rook, color) && !rook.has_moved
        );
        if !rook_ready {
            continue;
        }

        let (low, high) = if side.rook_file() < KING_HOME_FILE {
            (side.rook_file(), KING_HOME_FILE)
        } else {
            (KING_HOME_FILE, side.rook_file())
        };
        if ((low + 1)..high).any(|file| !board.is_empty(Square::at(file, rank))) {
            continue;
        }

        let target = side.king_target_file();
        let crossed = side.rook_target_file();
        let king_path = [KING_HOME_FILE, crossed, target];
        if king_path
            .iter()
            .any(|&file| is_square_attacked(board, Square::at(file, rank), color.opponent()))
        {
            continue;
        }

        moves.push(Square::at(target, rank));
    }

    moves
}

/// Check a move request against the board and classify it
///
/// Confirms there is a piece on `mv.from`, that `mv.to` is among its legal
/// destinations, and that the promotion choice fits: a pawn reaching the
/// last rank promotes to the named piece (Queen when none is named), and
/// naming a piece for any other move is rejected.
///
/// Turn order is not checked here; that belongs to `GameState`.
///
/// # Errors
///
/// `IllegalMove` with the reason, or `InvariantViolation` from the check test.
pub fn resolve(board: &Board, mv: Move) -> RulesResult<ResolvedMove> {
    let illegal = |reason| RulesError::illegal(mv.from, mv.to, reason);

    let piece = board
        .piece_at(mv.from)
        .ok_or_else(|| illegal(IllegalReason::NoPiece))?;

    if !legal_moves(board, mv.from)?.contains(&mv.to) {
        trace!(%mv, "destination not among legal moves");
        return Err(illegal(IllegalReason::Unreachable));
    }

    let promotion = match (is_promotion(piece, mv.to), mv.promotion) {
        (true, None) => Some(PieceKind::Queen),
        (true, Some(kind)) if kind.is_promotion_target() => Some(kind),
        (false, None) => None,
        _ => return Err(illegal(IllegalReason::InvalidPromotion)),
    };

    Ok(ResolvedMove {
        mv: Move { promotion, ..mv },
        kind: classify(board, piece, mv.from, mv.to),
    })
}

/// `true` if the request is a legal move on this board
pub fn is_legal(board: &Board, mv: &Move) -> bool {
    resolve(board, *mv).is_ok()
}

/// Every legal move for one color, promotions expanded to all four pieces
pub fn all_legal_moves(board: &Board, color: Color) -> RulesResult<Vec<ResolvedMove>> {
    let mut moves = Vec::new();

    for (from, piece) in board.pieces_of(color) {
        for to in legal_moves(board, from)? {
            let kind = classify(board, piece, from, to);
            if is_promotion(piece, to) {
                moves.extend(PieceKind::PROMOTIONS.into_iter().map(|promotion| ResolvedMove {
                    mv: Move::with_promotion(from, to, promotion),
                    kind,
                }));
            } else {
                moves.push(ResolvedMove {
                    mv: Move::new(from, to),
                    kind,
                });
            }
        }
    }

    Ok(moves)
}

/// `true` if the color has at least one legal move; stops at the first
pub fn has_any_legal_move(board: &Board, color: Color) -> RulesResult<bool> {
    for (from, _) in board.pieces_of(color) {
        if !legal_moves(board, from)?.is_empty() {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests;
