//! Perft: legal move tree node counting
//!
//! Counts the leaf nodes of the legal move tree to a fixed depth. The
//! counts for well-known positions are published, so a mismatch pins down
//! a move generation bug (missed en passant, castling through check,
//! promotions not expanded) without any search or evaluation on top.

use crate::board::Board;
use crate::error::RulesResult;
use crate::types::Color;
use crate::validator::{all_legal_moves, Simulation};

/// Leaf node count `depth` plies below the position
///
/// # Examples
///
/// ```rust,ignore
/// assert_eq!(perft(&Board::standard(), Color::White, 3)?, 8_902);
/// ```
pub fn perft(board: &Board, side_to_move: Color, depth: u32) -> RulesResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = all_legal_moves(board, side_to_move)?;
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut scratch = board.clone();
    let mut nodes = 0;
    for resolved in moves {
        let child = Simulation::apply(&mut scratch, resolved.mv, resolved.kind)?;
        nodes += perft(&child, side_to_move.opponent(), depth - 1)?;
    }

    Ok(nodes)
}

/// Node count below each root move, for tracking down a mismatch
pub fn divide(board: &Board, side_to_move: Color, depth: u32) -> RulesResult<Vec<(String, u64)>> {
    let mut scratch = board.clone();
    let mut counts = Vec::new();

    for resolved in all_legal_moves(board, side_to_move)? {
        let child = Simulation::apply(&mut scratch, resolved.mv, resolved.kind)?;
        let nodes = perft(&child, side_to_move.opponent(), depth.saturating_sub(1))?;
        counts.push((resolved.mv.to_string(), nodes));
    }

    Ok(counts)
}
