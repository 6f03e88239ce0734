//! Move history records
//!
//! Every applied move leaves a [`MoveRecord`] holding what the move did and
//! everything needed to take it back: the captured piece (captures are never
//! recovered from the board), the prior castling rights and en-passant
//! target, the clocks, and the status before the move.
//!
//! [`PositionKey`] is the repetition identity of a position, pushed once
//! per position reached.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::make_unmake::UndoInfo;
use crate::types::{
    CastlingRights, Color, GameStatus, Move, MoveKind, Piece, PieceKind, Square,
};
use crate::validator;

/// One applied move
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MoveRecord {
    /// The move as applied, promotion choice filled in
    pub mv: Move,
    pub kind: MoveKind,
    /// The moving piece as it stood before the move
    pub piece: Piece,
    /// Captured piece and the square it was taken on
    pub captured: Option<(Square, Piece)>,
    /// Status after the move
    pub status: GameStatus,

    castling_rights_before: CastlingRights,
    en_passant_before: Option<Square>,
    halfmove_clock_before: u32,
    fullmove_number_before: u32,
    status_before: GameStatus,
}

/// Game-level state captured before a move is applied
#[derive(Copy, Clone, Debug)]
pub(crate) struct Snapshot {
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
    pub status: GameStatus,
}

impl MoveRecord {
    pub(crate) fn new(undo: UndoInfo, before: Snapshot, status: GameStatus) -> Self {
        MoveRecord {
            mv: undo.mv,
            kind: undo.kind,
            piece: undo.moved,
            captured: undo.captured,
            status,
            castling_rights_before: undo.castling_rights,
            en_passant_before: undo.en_passant_target,
            halfmove_clock_before: before.halfmove_clock,
            fullmove_number_before: before.fullmove_number,
            status_before: before.status,
        }
    }

    /// Rebuild what the unmake routine needs
    pub(crate) fn undo_info(&self) -> UndoInfo {
        UndoInfo {
            mv: self.mv,
            kind: self.kind,
            moved: self.piece,
            captured: self.captured,
            castling_rights: self.castling_rights_before,
            en_passant_target: self.en_passant_before,
        }
    }

    pub(crate) fn snapshot_before(&self) -> Snapshot {
        Snapshot {
            halfmove_clock: self.halfmove_clock_before,
            fullmove_number: self.fullmove_number_before,
            status: self.status_before,
        }
    }

    pub fn color(&self) -> Color {
        self.piece.color
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castling(&self) -> bool {
        matches!(self.kind, MoveKind::Castle(_))
    }

    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        self.mv.promotion
    }

    /// Resets the fifty-move count
    pub fn is_irreversible(&self) -> bool {
        self.piece.kind == PieceKind::Pawn || self.is_capture()
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mv)?;
        match self.status {
            GameStatus::Check => f.write_str("+"),
            GameStatus::Checkmate => f.write_str("#"),
            _ => Ok(()),
        }
    }
}

/// Identity of a position for repetition counting
///
/// Move flags are not part of the key: two positions with the same pieces,
/// side to move, castling rights and en-passant target repeat. The target
/// only counts while an en-passant capture onto it is legal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct PositionKey {
    placement: [Option<(PieceKind, Color)>; Square::COUNT],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
}

impl PositionKey {
    pub(crate) fn new(board: &Board, side_to_move: Color) -> Self {
        PositionKey {
            placement: board.placement(),
            side_to_move,
            castling_rights: board.castling_rights(),
            en_passant_target: board
                .en_passant_target()
                .filter(|&target| en_passant_capture_exists(board, target, side_to_move)),
        }
    }
}

fn en_passant_capture_exists(board: &Board, target: Square, color: Color) -> bool {
    let Some(victim) = target.offset(0, -color.forward()) else {
        return false;
    };
    [-1, 1]
        .into_iter()
        .filter_map(|side| victim.offset(side, 0))
        .filter(|&from| board.piece_at(from).is_some_and(|piece| piece.is(PieceKind::Pawn, color)))
        .any(|from| validator::is_legal(board, &Move::new(from, target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::parse_fen;
    use crate::make_unmake::make_move;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_record_round_trips_undo_info() {
        let mut board = Board::standard();
        let undo = make_move(&mut board, Move::new(sq("e2"), sq("e4")), MoveKind::DoublePush)
            .unwrap();
        let before = Snapshot {
            halfmove_clock: 3,
            fullmove_number: 7,
            status: GameStatus::Check,
        };

        let record = MoveRecord::new(undo.clone(), before, GameStatus::InProgress);
        assert_eq!(record.undo_info(), undo);
        assert_eq!(record.snapshot_before().halfmove_clock, 3);
        assert_eq!(record.snapshot_before().fullmove_number, 7);
        assert_eq!(record.snapshot_before().status, GameStatus::Check);
        assert!(record.is_irreversible(), "pawn moves reset the clock");
        assert!(!record.is_capture());
        assert_eq!(record.color(), Color::White);
        assert_eq!(record.to_string(), "e2e4");
    }

    #[test]
    fn test_position_key_ignores_move_flags() {
        let board = Board::standard();
        let mut moved = board.clone();
        let knight = moved.remove(sq("g1")).unwrap();
        moved.place(knight.moved(), sq("g1"));

        assert_eq!(
            PositionKey::new(&board, Color::White),
            PositionKey::new(&moved, Color::White)
        );
        assert_ne!(
            PositionKey::new(&board, Color::White),
            PositionKey::new(&board, Color::Black)
        );
    }

    #[test]
    fn test_position_key_en_passant_only_when_capturable() {
        let pushed = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap()
            .board;
        let plain = parse_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1")
            .unwrap()
            .board;
        assert_eq!(
            PositionKey::new(&pushed, Color::Black),
            PositionKey::new(&plain, Color::Black),
            "no black pawn can take on e3"
        );

        let capturable = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap().board;
        let expired = parse_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2").unwrap().board;
        assert_ne!(
            PositionKey::new(&capturable, Color::White),
            PositionKey::new(&expired, Color::White)
        );
    }
}
