//! # Chess Rules Engine
//!
//! Enforces the rules of standard chess for two players: which moves are
//! legal, what applying one does to the board, and whether the side to move
//! is in check, checkmated or stalemated. There is no search and no
//! evaluation; a host (terminal, GUI, network service) supplies the moves.
//!
//! ## Layers
//!
//! - [`board`] - 64 cells plus en-passant target and castling rights
//! - [`move_gen`] - candidate moves per piece and attack detection
//! - [`validator`] - self-check filtering, castling, move resolution
//! - [`api`] - [`GameState`], the state machine hosts talk to
//! - [`fen`] / [`notation`] - text formats at the boundary
//! - [`perft`] - node counting for move generator verification
//!
//! ## Usage
//!
//! ```rust,ignore
//! use rules_engine::{GameState, GameStatus};
//!
//! let mut game = GameState::new();
//! game.apply_notation("f2f3")?;
//! game.apply_notation("e7e5")?;
//! game.apply_notation("g2g4")?;
//! assert_eq!(game.apply_notation("d8h4")?, GameStatus::Checkmate);
//! ```

pub mod api;
pub mod board;
pub mod constants;
pub mod error;
pub mod fen;
pub mod history;
mod make_unmake;
pub mod move_gen;
pub mod notation;
pub mod perft;
pub mod types;
pub mod validator;

pub use api::GameState;
pub use board::Board;
pub use error::{IllegalReason, RulesError, RulesResult};
pub use history::MoveRecord;
pub use notation::{parse_move, parse_square};
pub use types::{
    CastlingRights, CastlingSide, Color, DrawReason, GameStatus, Move, MoveKind, Piece, PieceKind,
    Square,
};
pub use validator::ResolvedMove;
