//! Public API for the rules engine
//!
//! [`GameState`] is the one stateful object a host talks to. It owns the
//! board, whose turn it is, the move history and the current status, and
//! it changes only through [`GameState::apply_move`] and
//! [`GameState::undo_move`].
//!
//! ## Module Organization
//!
//! - `game` - Game lifecycle (new, from_fen, reset)
//! - `moves` - Move application, undo and legal move queries
//! - `state` - Status evaluation, draw detection and read accessors

mod game;
mod moves;
mod state;


use crate::board::Board;
use crate::history::{MoveRecord, PositionKey};
use crate::types::{Color, GameStatus};

/// A game of chess in progress
///
/// Cloning gives an independent game; hosts wanting concurrent games own
/// one `GameState` per game.
#[derive(Clone, Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    history: Vec<MoveRecord>,
    status: GameStatus,
    halfmove_clock: u32,
    fullmove_number: u32,
    /// One key per position reached, the starting one included
    positions: Vec<PositionKey>,
}

pub(crate) use state::evaluate_status;
