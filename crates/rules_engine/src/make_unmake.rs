//! Move making and unmaking
//!
//! The single routine that changes a board for a move, and its exact
//! inverse. Both [`crate::api::GameState::apply_move`] and the validator's
//! self-check simulation go through here, so a castling rook or an
//! en-passant victim is handled the same way in both.
//!
//! `make_move` trusts its input: the move must already have been resolved
//! by [`crate::validator::resolve`] (or come from the validator's own
//! candidate list). It checks only what it needs to stay atomic, before it
//! touches the board.

use crate::board::Board;
use crate::error::{RulesError, RulesResult};
use crate::types::{CastlingRights, CastlingSide, Color, Move, MoveKind, Piece, PieceKind, Square};

/// Information needed to undo a move
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UndoInfo {
    pub mv: Move,
    pub kind: MoveKind,
    /// The piece as it stood on `mv.from`, move flag included
    pub moved: Piece,
    /// Captured piece and the square it was taken on (differs from
    /// `mv.to` for en passant)
    pub captured: Option<(Square, Piece)>,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

/// Home squares of the castling rook for a side
fn rook_squares(side: CastlingSide, rank: u8) -> (Square, Square) {
    (
        Square::at(side.rook_file(), rank),
        Square::at(side.rook_target_file(), rank),
    )
}

/// Square of the pawn taken by an en-passant capture
pub(crate) fn en_passant_victim(mv: &Move) -> Square {
    Square::at(mv.to.file(), mv.from.rank())
}

/// Clear any castling right tied to a rook home square
fn revoke_rook_corner(rights: &mut CastlingRights, square: Square) {
    for color in Color::ALL {
        for side in CastlingSide::BOTH {
            if square == Square::at(side.rook_file(), color.back_rank()) {
                rights.revoke(color, side);
            }
        }
    }
}

/// Make a move on the board (returns undo information)
///
/// Applies capture, en-passant removal, the castling rook jump and
/// promotion substitution, then updates the en-passant target and the
/// castling rights.
///
/// # Errors
///
/// `InvariantViolation` if the origin is empty or a castling move finds no
/// rook to jump. The board is untouched in that case.
pub(crate) fn make_move(board: &mut Board, mv: Move, kind: MoveKind) -> RulesResult<UndoInfo> {
    let moved = board.piece_at(mv.from).ok_or_else(|| {
        RulesError::invariant(format!("no piece on {} to make move {mv}", mv.from))
    })?;

    if let MoveKind::Castle(side) = kind {
        let (rook_from, _) = rook_squares(side, mv.from.rank());
        if !matches!(board.piece_at(rook_from), Some(rook) if rook.is(PieceKind::Rook, moved.color))
        {
            return Err(RulesError::invariant(format!(
                "castling move {mv} has no rook on {rook_from}"
            )));
        }
    }

    let castling_rights = board.castling_rights();
    let en_passant_target = board.en_passant_target();

    board.remove(mv.from);
    let captured = match kind {
        MoveKind::EnPassant => {
            let victim = en_passant_victim(&mv);
            board.remove(victim).map(|piece| (victim, piece))
        }
        _ => board.remove(mv.to).map(|piece| (mv.to, piece)),
    };

    let landed = match mv.promotion {
        Some(promotion) => Piece {
            kind: promotion,
            ..moved.moved()
        },
        None => moved.moved(),
    };
    board.place(landed, mv.to);

    if let MoveKind::Castle(side) = kind {
        let (rook_from, rook_to) = rook_squares(side, mv.from.rank());
        if let Some(rook) = board.remove(rook_from) {
            board.place(rook.moved(), rook_to);
        }
    }

    let next_target = match kind {
        MoveKind::DoublePush => mv.from.offset(0, moved.color.forward()),
        _ => None,
    };
    board.set_en_passant_target(next_target);

    let rights = board.castling_rights_mut();
    if moved.kind == PieceKind::King {
        rights.revoke_all(moved.color);
    }
    revoke_rook_corner(rights, mv.from);
    revoke_rook_corner(rights, mv.to);

    Ok(UndoInfo {
        mv,
        kind,
        moved,
        captured,
        castling_rights,
        en_passant_target,
    })
}

/// Unmake a move on the board
///
/// Exact inverse of [`make_move`] for the same `UndoInfo`.
pub(crate) fn unmake_move(board: &mut Board, undo: &UndoInfo) {
    if let MoveKind::Castle(side) = undo.kind {
        let (rook_from, rook_to) = rook_squares(side, undo.mv.from.rank());
        if let Some(rook) = board.remove(rook_to) {
            // Castling needs an unmoved rook, so its flag was clear before
            board.place(
                Piece {
                    has_moved: false,
                    ..rook
                },
                rook_from,
            );
        }
    }

    board.remove(undo.mv.to);
    board.place(undo.moved, undo.mv.from);
    if let Some((square, piece)) = undo.captured {
        board.place(piece, square);
    }

    board.set_castling_rights(undo.castling_rights);
    board.set_en_passant_target(undo.en_passant_target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn board_from(fen: &str) -> Board {
        parse_fen(fen).unwrap().board
    }

    #[test]
    fn test_make_unmake_capture_restores_board() {
        let mut board = board_from("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        let before = board.clone();

        let undo = make_move(&mut board, Move::new(sq("e4"), sq("d5")), MoveKind::Capture).unwrap();
        assert_eq!(undo.captured.map(|(at, p)| (at, p.kind)), Some((sq("d5"), PieceKind::Pawn)));
        assert!(board.is_empty(sq("e4")));
        assert!(board.piece_at(sq("d5")).unwrap().is(PieceKind::Pawn, Color::White));

        unmake_move(&mut board, &undo);
        assert_eq!(board, before, "unmake must restore the exact board");
    }

    #[test]
    fn test_double_push_sets_en_passant_target() {
        let mut board = Board::standard();
        make_move(&mut board, Move::new(sq("d2"), sq("d4")), MoveKind::DoublePush).unwrap();
        assert_eq!(board.en_passant_target(), Some(sq("d3")));

        make_move(&mut board, Move::new(sq("g8"), sq("f6")), MoveKind::Quiet).unwrap();
        assert_eq!(board.en_passant_target(), None, "target lasts one half-move");
    }

    #[test]
    fn test_en_passant_removes_victim() {
        let mut board = board_from("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
        let before = board.clone();

        let undo =
            make_move(&mut board, Move::new(sq("e5"), sq("d6")), MoveKind::EnPassant).unwrap();
        assert!(board.is_empty(sq("d5")), "captured pawn removed from d5");
        assert_eq!(undo.captured.map(|(at, _)| at), Some(sq("d5")));

        unmake_move(&mut board, &undo);
        assert_eq!(board, before);
    }

    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let mut board = board_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let before = board.clone();

        let undo = make_move(
            &mut board,
            Move::new(sq("e1"), sq("c1")),
            MoveKind::Castle(CastlingSide::Queenside),
        )
        .unwrap();
        assert!(board.piece_at(sq("c1")).unwrap().is(PieceKind::King, Color::White));
        assert!(board.piece_at(sq("d1")).unwrap().is(PieceKind::Rook, Color::White));
        assert!(board.is_empty(sq("a1")));
        assert!(!board.castling_rights().any(Color::White));
        assert!(board.castling_rights().any(Color::Black));

        unmake_move(&mut board, &undo);
        assert_eq!(board, before);
    }

    #[test]
    fn test_rook_capture_on_corner_revokes_right() {
        let mut board = board_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        make_move(&mut board, Move::new(sq("h1"), sq("h8")), MoveKind::Capture).unwrap();

        let rights = board.castling_rights();
        assert!(!rights.has(Color::White, CastlingSide::Kingside), "moved rook");
        assert!(!rights.has(Color::Black, CastlingSide::Kingside), "captured rook");
        assert!(rights.has(Color::White, CastlingSide::Queenside));
        assert!(rights.has(Color::Black, CastlingSide::Queenside));
    }

    #[test]
    fn test_promotion_substitutes_piece() {
        let mut board = board_from("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        let undo = make_move(
            &mut board,
            Move::with_promotion(sq("e7"), sq("e8"), PieceKind::Knight),
            MoveKind::Quiet,
        )
        .unwrap();
        assert!(board.piece_at(sq("e8")).unwrap().is(PieceKind::Knight, Color::White));

        unmake_move(&mut board, &undo);
        assert!(board.piece_at(sq("e7")).unwrap().is(PieceKind::Pawn, Color::White));
        assert!(board.is_empty(sq("e8")));
    }

    #[test]
    fn test_make_move_from_empty_square_is_invariant_violation() {
        let mut board = Board::standard();
        let before = board.clone();
        let result = make_move(&mut board, Move::new(sq("e4"), sq("e5")), MoveKind::Quiet);
        assert!(matches!(result, Err(RulesError::InvariantViolation { .. })));
        assert_eq!(board, before);
    }
}
