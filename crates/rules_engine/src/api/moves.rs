//! Move execution and validation
//!
//! Functions for applying and undoing moves and listing legal moves.

use tracing::{debug, error, trace};

use super::{evaluate_status, GameState};
use crate::error::{IllegalReason, RulesError, RulesResult};
use crate::history::{MoveRecord, PositionKey, Snapshot};
use crate::make_unmake::{make_move, unmake_move};
use crate::notation::parse_move;
use crate::types::{Color, GameStatus, Move, PieceKind, Square};
use crate::validator::{self, ResolvedMove};

impl GameState {
    /// Apply a move for the side to move
    ///
    /// # Arguments
    ///
    /// * `from` - Square of the piece to move
    /// * `to` - Destination square (the king's landing square when castling)
    /// * `promotion` - Piece to promote to; Queen when `None` and the move
    ///   promotes
    ///
    /// # Returns
    ///
    /// The status of the game after the move, seen from the new side to move.
    ///
    /// # Errors
    ///
    /// `IllegalMove` if the game is over, it is the other side's turn, `from`
    /// is empty, `to` is not a legal destination, or the promotion choice is
    /// invalid. Nothing changes in that case.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// // 1. e4
    /// let status = game.apply_move(e2, e4, None)?;
    /// assert_eq!(status, GameStatus::InProgress);
    /// ```
    pub fn apply_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> RulesResult<GameStatus> {
        let request = Move {
            from,
            to,
            promotion,
        };
        let resolved = self.check_request(request).inspect_err(|err| {
            debug!(mv = %request, %err, "move rejected");
        })?;

        let undo = make_move(&mut self.board, resolved.mv, resolved.kind)?;
        let next = self.side_to_move.opponent();
        let status = match evaluate_status(&self.board, next) {
            Ok(status) => status,
            Err(err) => {
                unmake_move(&mut self.board, &undo);
                error!(mv = %resolved.mv, %err, "position broke an invariant, move rolled back");
                return Err(err);
            }
        };

        let before = Snapshot {
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            status: self.status,
        };
        let record = MoveRecord::new(undo, before, status);

        self.halfmove_clock = if record.is_irreversible() {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if self.side_to_move == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        self.side_to_move = next;
        self.status = status;
        self.positions.push(PositionKey::new(&self.board, next));

        debug!(mv = %record.mv, kind = ?record.kind, %status, "move applied");
        if status != before.status {
            trace!(from = %before.status, to = %status, "status changed");
        }
        self.history.push(record);

        Ok(status)
    }

    /// Parse a coordinate move (`e2e4`, `e7e8n`) and apply it
    ///
    /// # Errors
    ///
    /// `OutOfBounds` for malformed notation, otherwise as [`Self::apply_move`].
    pub fn apply_notation(&mut self, notation: &str) -> RulesResult<GameStatus> {
        let mv = parse_move(notation)?;
        self.apply_move(mv.from, mv.to, mv.promotion)
    }

    /// Take back the last move
    ///
    /// Restores the board exactly (captured piece, castling rook, promotion,
    /// move flags, castling rights, en-passant target), the clocks and the
    /// status. Returns the record removed, or `None` at the start of the
    /// history.
    pub fn undo_move(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        unmake_move(&mut self.board, &record.undo_info());
        self.positions.pop();

        let before = record.snapshot_before();
        self.side_to_move = record.color();
        self.halfmove_clock = before.halfmove_clock;
        self.fullmove_number = before.fullmove_number;
        self.status = before.status;

        debug!(mv = %record.mv, status = %self.status, "move undone");
        Some(record)
    }

    /// Legal destinations for the piece on `square`, sorted
    ///
    /// Answers for whichever color stands there; turn order is only enforced
    /// when a move is applied.
    pub fn legal_moves_for(&self, square: Square) -> RulesResult<Vec<Square>> {
        validator::legal_moves(&self.board, square)
    }

    /// Every legal move for the side to move, promotions expanded
    pub fn legal_moves(&self) -> RulesResult<Vec<Move>> {
        if self.status.is_terminal() {
            return Ok(Vec::new());
        }
        let moves = validator::all_legal_moves(&self.board, self.side_to_move)?;
        Ok(moves.into_iter().map(|resolved| resolved.mv).collect())
    }

    /// `true` if the request would be accepted by [`Self::apply_move`]
    pub fn is_legal_move(&self, mv: &Move) -> bool {
        self.check_request(*mv).is_ok()
    }

    fn check_request(&self, request: Move) -> RulesResult<ResolvedMove> {
        let illegal = |reason| RulesError::illegal(request.from, request.to, reason);

        if self.status.is_terminal() {
            return Err(illegal(IllegalReason::GameOver));
        }

        let piece = self
            .board
            .piece_at(request.from)
            .ok_or_else(|| illegal(IllegalReason::NoPiece))?;
        if piece.color != self.side_to_move {
            return Err(illegal(IllegalReason::NotYourTurn));
        }

        validator::resolve(&self.board, request)
    }
}
