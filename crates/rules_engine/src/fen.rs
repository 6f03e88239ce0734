//! FEN position loading and export
//!
//! Loads test and CLI start positions, and writes a position back out from
//! the board's read accessors. Move flags are not part of FEN, so the loader
//! derives them:
//! - pawns off their starting rank have moved
//! - a king has not moved if it stands on its home square and its color
//!   keeps a castling right
//! - a rook has not moved if it stands on a corner whose castling right is
//!   still set
//!
//! See [Forsyth–Edwards notation](https://en.wikipedia.org/wiki/Forsyth%E2%80%93Edwards_Notation).

use crate::board::Board;
use crate::constants::KING_HOME_FILE;
use crate::error::{RulesError, RulesResult};
use crate::move_gen::{has_en_passant_victim, king_in_check};
use crate::types::{CastlingRights, CastlingSide, Color, Piece, PieceKind, Square};

/// A position as described by one FEN record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FenPosition {
    pub board: Board,
    pub side_to_move: Color,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

/// Parse a FEN record
///
/// The halfmove clock and fullmove number may be omitted (they default to
/// 0 and 1). The position must have exactly one king per color, no pawns on
/// the first or last rank, and the side not on move must not be in check.
/// An en-passant square must be empty, with the square the pawn left empty
/// and the pawn that double-pushed standing in front of it.
///
/// # Errors
///
/// `InvalidFen` describing the first problem found.
pub fn parse_fen(fen: &str) -> RulesResult<FenPosition> {
    let mut fields = fen.split_whitespace();

    let placement = fields
        .next()
        .ok_or_else(|| RulesError::fen("missing piece placement"))?;
    let mut board = parse_placement(placement)?;

    let side_to_move = match fields.next() {
        Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => return Err(RulesError::fen(format!("bad active color {other:?}"))),
        None => return Err(RulesError::fen("missing active color")),
    };

    let rights = parse_castling(fields.next().unwrap_or("-"))?;
    board.set_castling_rights(rights);

    let en_passant = match fields.next().unwrap_or("-") {
        "-" => None,
        text => {
            let square: Square = text
                .parse()
                .map_err(|_| RulesError::fen(format!("bad en-passant square {text:?}")))?;
            let origin = square.offset(0, side_to_move.forward());
            if !board.is_empty(square)
                || !origin.is_some_and(|origin| board.is_empty(origin))
                || !has_en_passant_victim(&board, square, side_to_move)
            {
                return Err(RulesError::fen(format!(
                    "en-passant square {square} impossible with {side_to_move} to move"
                )));
            }
            Some(square)
        }
    };
    board.set_en_passant_target(en_passant);

    let halfmove_clock = parse_counter(fields.next(), 0, "halfmove clock")?;
    let fullmove_number = parse_counter(fields.next(), 1, "fullmove number")?.max(1);

    if let Some(extra) = fields.next() {
        return Err(RulesError::fen(format!("unexpected trailing field {extra:?}")));
    }

    derive_move_flags(&mut board);
    validate(&board, side_to_move)?;

    Ok(FenPosition {
        board,
        side_to_move,
        halfmove_clock,
        fullmove_number,
    })
}

fn parse_placement(placement: &str) -> RulesResult<Board> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(RulesError::fen(format!("expected 8 ranks, found {}", rows.len())));
    }

    let mut board = Board::empty();
    for (row_index, row) in rows.iter().enumerate() {
        let rank = 7 - row_index as u8;
        let mut file: u8 = 0;

        for symbol in row.chars() {
            if let Some(skip) = symbol.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(RulesError::fen(format!("bad empty-square count {skip}")));
                }
                file += skip as u8;
            } else {
                let piece = Piece::from_symbol(symbol)
                    .ok_or_else(|| RulesError::fen(format!("unknown piece {symbol:?}")))?;
                let square = Square::new(file, rank)
                    .ok_or_else(|| RulesError::fen(format!("rank {} is too long", rank + 1)))?;
                board.place(piece, square);
                file += 1;
            }

            if file > 8 {
                return Err(RulesError::fen(format!("rank {} is too long", rank + 1)));
            }
        }

        if file != 8 {
            return Err(RulesError::fen(format!(
                "rank {} describes {file} files",
                rank + 1
            )));
        }
    }

    Ok(board)
}

fn parse_castling(text: &str) -> RulesResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }

    for letter in text.chars() {
        let (color, side) = match letter {
            'K' => (Color::White, CastlingSide::Kingside),
            'Q' => (Color::White, CastlingSide::Queenside),
            'k' => (Color::Black, CastlingSide::Kingside),
            'q' => (Color::Black, CastlingSide::Queenside),
            _ => return Err(RulesError::fen(format!("bad castling field {text:?}"))),
        };
        rights.grant(color, side);
    }

    Ok(rights)
}

fn parse_counter(field: Option<&str>, default: u32, name: &str) -> RulesResult<u32> {
    match field {
        None => Ok(default),
        Some(text) => text
            .parse()
            .map_err(|_| RulesError::fen(format!("bad {name} {text:?}"))),
    }
}

fn derive_move_flags(board: &mut Board) {
    let rights = board.castling_rights();
    let pieces: Vec<(Square, Piece)> = board.pieces().collect();

    for (square, piece) in pieces {
        let home = piece.color.back_rank();
        let unmoved = match piece.kind {
            PieceKind::Pawn => square.rank() == piece.color.pawn_rank(),
            PieceKind::King => {
                square == Square::at(KING_HOME_FILE, home) && rights.any(piece.color)
            }
            PieceKind::Rook => CastlingSide::BOTH.into_iter().any(|side| {
                square == Square::at(side.rook_file(), home) && rights.has(piece.color, side)
            }),
            _ => true,
        };

        if !unmoved {
            board.place(piece.moved(), square);
        }
    }
}

fn validate(board: &Board, side_to_move: Color) -> RulesResult<()> {
    for color in Color::ALL {
        board
            .king_square(color)
            .map_err(|err| RulesError::fen(err.to_string()))?;
    }

    if let Some((square, _)) = board
        .pieces()
        .find(|(square, piece)| piece.kind == PieceKind::Pawn && matches!(square.rank(), 0 | 7))
    {
        return Err(RulesError::fen(format!("pawn on back rank at {square}")));
    }

    if king_in_check(board, side_to_move.opponent())? {
        return Err(RulesError::fen(format!(
            "{} is in check but it is {side_to_move} to move",
            side_to_move.opponent()
        )));
    }

    Ok(())
}

/// Write a FEN record from the board's read accessors
pub fn to_fen(
    board: &Board,
    side_to_move: Color,
    halfmove_clock: u32,
    fullmove_number: u32,
) -> String {
    let mut rows = Vec::with_capacity(8);
    for rank in (0..8).rev() {
        let mut row = String::new();
        let mut empty = 0;
        for file in 0..8 {
            match board.piece_at(Square::at(file, rank)) {
                Some(piece) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(piece.symbol());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }

    let side = match side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };
    let en_passant = board
        .en_passant_target()
        .map_or_else(|| "-".to_string(), |square| square.to_string());

    format!(
        "{} {side} {} {en_passant} {halfmove_clock} {fullmove_number}",
        rows.join("/"),
        board.castling_rights(),
    )
}
