//! Coordinate notation at the engine boundary
//!
//! Translates algebraic squares (`"e2"`) and coordinate moves (`"e2e4"`,
//! `"e7e8q"`) into the zero-based model: file = letter − 'a',
//! rank = digit − 1. Anything malformed is rejected here with
//! `RulesError::OutOfBounds`, before it can reach a `GameState`.

use std::str::FromStr;

use crate::error::RulesError;
use crate::types::{Move, PieceKind, Square};

impl FromStr for Square {
    type Err = RulesError;

    /// Performs the conversion using algebraic notation
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.as_bytes() {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Square::at(file - b'a', rank - b'1')),
            _ => Err(RulesError::OutOfBounds {
                input: text.to_string(),
            }),
        }
    }
}

impl FromStr for Move {
    type Err = RulesError;

    /// Parses `<from><to>[promotion]`, e.g. `g1f3` or `b7b8n`
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let malformed = || RulesError::OutOfBounds {
            input: text.to_string(),
        };

        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(malformed());
        }

        let from: Square = text[0..2].parse().map_err(|_| malformed())?;
        let to: Square = text[2..4].parse().map_err(|_| malformed())?;
        let promotion = match text[4..].chars().next() {
            None => None,
            Some(letter) => Some(PieceKind::from_letter(letter).ok_or_else(malformed)?),
        };

        Ok(Move {
            from,
            to,
            promotion,
        })
    }
}

/// Parse one algebraic square
pub fn parse_square(text: &str) -> Result<Square, RulesError> {
    text.trim().parse()
}

/// Parse one coordinate move
pub fn parse_move(text: &str) -> Result<Move, RulesError> {
    text.trim().parse()
}
