//! Legal move filtering tests
//!
//! # Test Organization
//!
//! - `test_legal_*` - self-check filtering of candidates (pins, king moves)
//! - `test_castling_*` - castling preconditions
//! - `test_en_passant_*` - en-passant legality
//! - `test_resolve_*` - move requests, promotion choice, rejection reasons
//! - `test_all_legal_*` - whole-side enumeration

use super::*;
use crate::fen::parse_fen;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn squares(names: &[&str]) -> Vec<Square> {
    names.iter().map(|name| sq(name)).collect()
}

fn board_from(fen: &str) -> Board {
    parse_fen(fen).unwrap().board
}

// ============================================================================
// Self-check filtering
// ============================================================================

#[test]
fn test_legal_knight_from_start() {
    let board = Board::standard();
    assert_eq!(legal_moves(&board, sq("g1")).unwrap(), squares(&["f3", "h3"]));
}

#[test]
fn test_legal_empty_square_has_no_moves() {
    let board = Board::standard();
    assert!(legal_moves(&board, sq("e4")).unwrap().is_empty());
}

#[test]
fn test_legal_pinned_bishop_cannot_move() {
    let board = board_from("4k3/4r3/8/8/8/8/4B3/4K3 w - - 0 1");
    assert!(
        legal_moves(&board, sq("e2")).unwrap().is_empty(),
        "bishop pinned on the e-file has no legal move"
    );
}

#[test]
fn test_legal_pinned_rook_moves_along_pin() {
    let board = board_from("4k3/4r3/8/8/8/8/4R3/4K3 w - - 0 1");
    assert_eq!(
        legal_moves(&board, sq("e2")).unwrap(),
        squares(&["e3", "e4", "e5", "e6", "e7"])
    );
}

#[test]
fn test_legal_king_avoids_attacked_squares() {
    let board = board_from("4k3/8/8/8/8/8/3r4/4K3 w - - 0 1");
    assert_eq!(legal_moves(&board, sq("e1")).unwrap(), squares(&["f1", "d2"]));
}

#[test]
fn test_legal_must_answer_check() {
    // Rook gives check on the e-file; only blocking or stepping aside helps
    let board = board_from("4k3/4r3/8/8/8/8/8/N3K3 w - - 0 1");
    let knight = legal_moves(&board, sq("a1")).unwrap();
    assert!(knight.is_empty(), "knight on a1 cannot block or capture: {knight:?}");

    let board = board_from("4k3/4r3/8/8/8/8/8/2N1K3 w - - 0 1");
    let knight = legal_moves(&board, sq("c1")).unwrap();
    assert_eq!(knight, squares(&["e2"]), "knight may only block on e2");
}

#[test]
fn test_legal_missing_king_is_invariant_violation() {
    let mut board = Board::empty();
    board.place(Piece::new(PieceKind::Rook, Color::White), sq("a1"));
    board.place(Piece::new(PieceKind::King, Color::Black), sq("e8"));

    let result = legal_moves(&board, sq("a1"));
    assert!(matches!(result, Err(RulesError::InvariantViolation { .. })));
}

#[test]
fn test_simulation_restores_board_on_drop() {
    let mut board = board_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let before = board.clone();

    {
        let simulated = Simulation::apply(
            &mut board,
            Move::new(sq("e1"), sq("g1")),
            MoveKind::Castle(CastlingSide::Kingside),
        )
        .unwrap();
        assert!(simulated.piece_at(sq("f1")).is_some(), "rook jumped to f1");
    }

    assert_eq!(board, before, "dropping the guard unmakes the move");
}

// ============================================================================
// Castling
// ============================================================================

#[test]
fn test_castling_both_sides_available() {
    let board = board_from("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let moves = legal_moves(&board, sq("e1")).unwrap();
    assert!(moves.contains(&sq("g1")), "kingside offered");
    assert!(moves.contains(&sq("c1")), "queenside offered");

    let black = legal_moves(&board, sq("e8")).unwrap();
    assert!(black.contains(&sq("g8")) && black.contains(&sq("c8")));
}

#[test]
fn test_castling_blocked_by_piece() {
    let board = board_from("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
    let moves = castling_moves(&board, sq("e1"));
    assert_eq!(moves, squares(&["g1"]));
}

#[test]
fn test_castling_through_attacked_square() {
    let board = board_from("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    let moves = castling_moves(&board, sq("e1"));
    assert_eq!(moves, squares(&["c1"]), "f1 is covered by the rook on f8");
}

#[test]
fn test_castling_out_of_check() {
    let board = board_from("k3r3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
    assert!(castling_moves(&board, sq("e1")).is_empty());
}

#[test]
fn test_castling_queenside_b_file_may_be_attacked() {
    let board = board_from("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
    assert_eq!(castling_moves(&board, sq("e1")), squares(&["c1"]));
}

#[test]
fn test_castling_requires_right() {
    let board = board_from("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1");
    assert!(castling_moves(&board, sq("e1")).is_empty());
    assert!(!legal_moves(&board, sq("e1")).unwrap().contains(&sq("g1")));
}

// ============================================================================
// En passant
// ============================================================================

#[test]
fn test_en_passant_offered() {
    let board = board_from("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    assert_eq!(legal_moves(&board, sq("e5")).unwrap(), squares(&["d6", "e6"]));
    assert_eq!(
        classify(&board, board.piece_at(sq("e5")).unwrap(), sq("e5"), sq("d6")),
        MoveKind::EnPassant
    );
}

#[test]
fn test_en_passant_exposing_king_is_illegal() {
    // Both pawns leave rank 5, opening the rook's line to the king on a5
    let board = board_from("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
    assert_eq!(legal_moves(&board, sq("e5")).unwrap(), squares(&["e6"]));
}

// ============================================================================
// Resolving requests
// ============================================================================

#[test]
fn test_resolve_classifies_double_push() {
    let board = Board::standard();
    let resolved = resolve(&board, Move::new(sq("e2"), sq("e4"))).unwrap();
    assert_eq!(resolved.kind, MoveKind::DoublePush);
    assert_eq!(resolved.mv.promotion, None);
}

#[test]
fn test_resolve_rejection_reasons() {
    let board = Board::standard();

    let cases = [
        (Move::new(sq("e4"), sq("e5")), IllegalReason::NoPiece),
        (Move::new(sq("e2"), sq("e5")), IllegalReason::Unreachable),
        (Move::new(sq("a1"), sq("a3")), IllegalReason::Unreachable),
        (
            Move::with_promotion(sq("e2"), sq("e4"), PieceKind::Queen),
            IllegalReason::InvalidPromotion,
        ),
    ];

    for (mv, expected) in cases {
        match resolve(&board, mv) {
            Err(RulesError::IllegalMove { reason, .. }) => {
                assert_eq!(reason, expected, "wrong reason for {mv}")
            }
            other => panic!("{mv} should be illegal, got {other:?}"),
        }
    }
}

#[test]
fn test_resolve_promotion_defaults_to_queen() {
    let board = board_from("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");

    let resolved = resolve(&board, Move::new(sq("e7"), sq("e8"))).unwrap();
    assert_eq!(resolved.mv.promotion, Some(PieceKind::Queen));
    assert_eq!(resolved.kind, MoveKind::Quiet);

    let knight = resolve(&board, Move::with_promotion(sq("e7"), sq("e8"), PieceKind::Knight));
    assert_eq!(knight.unwrap().mv.promotion, Some(PieceKind::Knight));
}

#[test]
fn test_resolve_rejects_king_or_pawn_promotion() {
    let board = board_from("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    for kind in [PieceKind::King, PieceKind::Pawn] {
        let result = resolve(&board, Move::with_promotion(sq("e7"), sq("e8"), kind));
        assert!(
            matches!(
                result,
                Err(RulesError::IllegalMove {
                    reason: IllegalReason::InvalidPromotion,
                    ..
                })
            ),
            "promotion to {kind:?} must be rejected"
        );
    }
}

#[test]
fn test_is_legal_matches_resolve() {
    let board = Board::standard();
    assert!(is_legal(&board, &Move::new(sq("g1"), sq("f3"))));
    assert!(!is_legal(&board, &Move::new(sq("g1"), sq("g3"))));
}

// ============================================================================
// Whole-side enumeration
// ============================================================================

#[test]
fn test_all_legal_start_position() {
    let board = Board::standard();
    assert_eq!(all_legal_moves(&board, Color::White).unwrap().len(), 20);
    assert_eq!(all_legal_moves(&board, Color::Black).unwrap().len(), 20);
}

#[test]
fn test_all_legal_expands_promotions() {
    let board = board_from("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
    let moves = all_legal_moves(&board, Color::White).unwrap();

    let promotions: Vec<_> = moves.iter().filter_map(|m| m.mv.promotion).collect();
    assert_eq!(promotions, PieceKind::PROMOTIONS.to_vec());
    assert_eq!(moves.len(), 9, "four promotions plus five king moves");
}

#[test]
fn test_has_any_legal_move_in_stalemate() {
    let board = board_from("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    assert!(!has_any_legal_move(&board, Color::Black).unwrap());
    assert!(has_any_legal_move(&board, Color::White).unwrap());
}
