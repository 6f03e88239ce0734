//! Error types for the rules engine
//!
//! Rejected moves are expected and frequent, so they come back as values
//! (`RulesError::IllegalMove`) rather than panics. Only
//! `RulesError::InvariantViolation` signals a defect: the engine found a
//! position that can't arise from legal play (a missing king, say) and
//! refuses to guess.

use std::fmt;

use thiserror::Error;

use crate::types::Square;

/// Why a move request was rejected
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IllegalReason {
    /// The game already ended in checkmate or stalemate
    GameOver,
    /// The piece on the origin square belongs to the side not on move
    NotYourTurn,
    /// The origin square is empty
    NoPiece,
    /// The destination is not among the piece's legal moves
    Unreachable,
    /// A promotion piece was named for a non-promoting move, or the piece
    /// named can't be promoted to
    InvalidPromotion,
}

impl fmt::Display for IllegalReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IllegalReason::GameOver => "the game is over",
            IllegalReason::NotYourTurn => "it is not that side's turn",
            IllegalReason::NoPiece => "there is no piece on the origin square",
            IllegalReason::Unreachable => "the piece cannot legally reach that square",
            IllegalReason::InvalidPromotion => "invalid promotion",
        };
        f.write_str(text)
    }
}

/// Errors that can occur in the rules engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    /// Move rejected; the board is untouched
    #[error("Illegal move from {from} to {to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: IllegalReason,
    },

    /// Coordinate outside the 8x8 grid, or malformed notation
    #[error("Square out of bounds or malformed: {input:?}")]
    OutOfBounds { input: String },

    /// Internal consistency failure (e.g. no king of a color on the board)
    #[error("Invariant violated: {message}")]
    InvariantViolation { message: String },

    /// Position text could not be loaded
    #[error("Invalid FEN: {reason}")]
    InvalidFen { reason: String },
}

impl RulesError {
    pub(crate) fn illegal(from: Square, to: Square, reason: IllegalReason) -> Self {
        RulesError::IllegalMove { from, to, reason }
    }

    pub(crate) fn invariant(message: impl Into<String>) -> Self {
        RulesError::InvariantViolation {
            message: message.into(),
        }
    }

    pub(crate) fn fen(reason: impl Into<String>) -> Self {
        RulesError::InvalidFen {
            reason: reason.into(),
        }
    }

    /// `false` only for invariant violations, which callers should not retry
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, RulesError::InvariantViolation { .. })
    }
}

/// Result type alias for rules engine operations
pub type RulesResult<T> = Result<T, RulesError>;
