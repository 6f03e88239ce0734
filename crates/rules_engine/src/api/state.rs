//! Game state queries
//!
//! Status evaluation after each move, draw detection and the read-only
//! accessors hosts use to render or serialize the game.

use crate::board::Board;
use crate::constants::{FIFTY_MOVE_LIMIT, REPETITION_LIMIT};
use crate::error::RulesResult;
use crate::fen;
use crate::history::MoveRecord;
use crate::move_gen::king_in_check;
use crate::perft;
use crate::types::{CastlingRights, Color, DrawReason, GameStatus, Piece, PieceKind, Square};
use crate::validator::has_any_legal_move;

use super::GameState;

/// Status of the position for the side to move
///
/// - attacked, no legal move: Checkmate
/// - attacked: Check
/// - not attacked, no legal move: Stalemate
/// - otherwise InProgress
pub(crate) fn evaluate_status(board: &Board, side_to_move: Color) -> RulesResult<GameStatus> {
    let in_check = king_in_check(board, side_to_move)?;
    let can_move = has_any_legal_move(board, side_to_move)?;

    Ok(match (in_check, can_move) {
        (true, false) => GameStatus::Checkmate,
        (true, true) => GameStatus::Check,
        (false, false) => GameStatus::Stalemate,
        (false, true) => GameStatus::InProgress,
    })
}

/// `true` if neither side can possibly deliver mate
///
/// Covers bare kings, a single minor piece, and any number of bishops that
/// all stand on squares of one color.
fn insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::new();
    for (square, piece) in board.pieces() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors.push((square, piece.kind)),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [(first, _), rest @ ..] => {
            minors.iter().all(|&(_, kind)| kind == PieceKind::Bishop)
                && rest.iter().all(|(square, _)| square.is_light() == first.is_light())
        }
    }
}

impl GameState {
    pub fn current_status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Applied moves, oldest first
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.board.castling_rights()
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.board.en_passant_target()
    }

    /// `true` if the side to move is in check (mated included)
    pub fn is_check(&self) -> bool {
        matches!(self.status, GameStatus::Check | GameStatus::Checkmate)
    }

    /// The side that delivered mate, if the game ended that way
    pub fn winner(&self) -> Option<Color> {
        (self.status == GameStatus::Checkmate).then(|| self.side_to_move.opponent())
    }

    /// Half-moves since the last capture or pawn move
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// A draw condition that holds in the current position
    ///
    /// Reported next to the status, never instead of it: the game continues
    /// until a host acts on it. `None` once the game has ended by checkmate
    /// or stalemate. When several hold, insufficient material wins over the
    /// fifty-move rule, which wins over repetition.
    pub fn draw_reason(&self) -> Option<DrawReason> {
        if self.status.is_terminal() {
            return None;
        }

        if insufficient_material(&self.board) {
            Some(DrawReason::InsufficientMaterial)
        } else if self.halfmove_clock >= FIFTY_MOVE_LIMIT {
            Some(DrawReason::FiftyMoveRule)
        } else if self.repetition_count() >= REPETITION_LIMIT {
            Some(DrawReason::ThreefoldRepetition)
        } else {
            None
        }
    }

    /// How many times the current position has been reached
    pub fn repetition_count(&self) -> usize {
        match self.positions.last() {
            Some(current) => self.positions.iter().filter(|key| *key == current).count(),
            None => 0,
        }
    }

    /// FEN record of the current position
    pub fn to_fen(&self) -> String {
        fen::to_fen(
            &self.board,
            self.side_to_move,
            self.halfmove_clock,
            self.fullmove_number,
        )
    }

    /// Number of leaf nodes of the legal move tree `depth` plies deep
    pub fn perft(&self, depth: u32) -> RulesResult<u64> {
        perft::perft(&self.board, self.side_to_move, depth)
    }
}
