//! Game lifecycle management
//!
//! Creating games from the standard position or a FEN record, and resetting.

use tracing::debug;

use super::{evaluate_status, GameState};
use crate::board::Board;
use crate::error::RulesResult;
use crate::fen::parse_fen;
use crate::history::PositionKey;
use crate::types::{Color, GameStatus};

impl GameState {
    /// Create a new game with the initial position, White to move
    pub fn new() -> Self {
        let board = Board::standard();
        let positions = vec![PositionKey::new(&board, Color::White)];
        GameState {
            board,
            side_to_move: Color::White,
            history: Vec::new(),
            status: GameStatus::InProgress,
            halfmove_clock: 0,
            fullmove_number: 1,
            positions,
        }
    }

    /// Load a game from a FEN record
    ///
    /// The status is evaluated for the side to move, so a FEN of a mated
    /// position gives a finished game. History starts empty.
    ///
    /// # Errors
    ///
    /// `InvalidFen` if the record can't be parsed or describes an
    /// impossible position.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let game = GameState::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1")?;
    /// assert!(game.castling_rights().any(Color::White));
    /// ```
    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        let position = parse_fen(fen)?;
        let status = evaluate_status(&position.board, position.side_to_move)?;
        debug!(%fen, %status, "loaded position");

        let positions = vec![PositionKey::new(&position.board, position.side_to_move)];
        Ok(GameState {
            board: position.board,
            side_to_move: position.side_to_move,
            history: Vec::new(),
            status,
            halfmove_clock: position.halfmove_clock,
            fullmove_number: position.fullmove_number,
            positions,
        })
    }

    /// Reset the game to the starting position
    pub fn reset(&mut self) {
        *self = GameState::new();
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::new()
    }
}
