//! Board representation
//!
//! The [`Board`] owns the 64 cells plus the auxiliary state the rules need:
//! - `en_passant_target`: square a pawn skipped over on the previous
//!   half-move, if that half-move was a double push
//! - `castling_rights`: the four permanent castling flags
//!
//! Move generators and validators only ever see `&Board`. The mutators
//! (`place`, `remove` and the auxiliary setters) are crate-private and used
//! by the make/unmake routine and the FEN loader; they do no legality
//! checking.

use std::fmt;

use crate::constants::BACK_RANK;
use crate::error::{RulesError, RulesResult};
use crate::types::{self, CastlingRights, Color, Piece, PieceKind, Square};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Square::COUNT],
    en_passant_target: Option<Square>,
    castling_rights: CastlingRights,
}

impl Board {
    /// Board with no pieces and no castling rights
    pub fn empty() -> Self {
        Board {
            cells: [None; Square::COUNT],
            en_passant_target: None,
            castling_rights: CastlingRights::NONE,
        }
    }

    /// Standard starting position with all castling rights
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, &kind) in BACK_RANK.iter().enumerate() {
                board.place(
                    Piece::new(kind, color),
                    Square::at(file as u8, color.back_rank()),
                );
            }
            for file in 0..8 {
                board.place(
                    Piece::new(PieceKind::Pawn, color),
                    Square::at(file, color.pawn_rank()),
                );
            }
        }
        board.castling_rights = CastlingRights::ALL;
        board
    }

    /// Check if signed coordinates are within the 8x8 grid
    #[inline]
    pub const fn in_bounds(file: i8, rank: i8) -> bool {
        types::in_bounds(file, rank)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.cells[square.index()].is_none()
    }

    /// `true` iff the square holds a piece of the color opposite to `color`
    #[inline]
    pub fn is_enemy(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color != color)
    }

    #[inline]
    pub fn is_friendly(&self, square: Square, color: Color) -> bool {
        matches!(self.piece_at(square), Some(piece) if piece.color == color)
    }

    /// Put a piece on a square, returning whatever stood there
    #[inline]
    pub(crate) fn place(&mut self, piece: Piece, square: Square) -> Option<Piece> {
        self.cells[square.index()].replace(piece)
    }

    #[inline]
    pub(crate) fn remove(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    /// All occupied squares, a1 first
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|piece| (Square::from_index(index), piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Locate the king of a color
    ///
    /// # Errors
    ///
    /// `InvariantViolation` if that color has no king or more than one.
    pub fn king_square(&self, color: Color) -> RulesResult<Square> {
        let mut kings = self
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square);

        match (kings.next(), kings.next()) {
            (Some(square), None) => Ok(square),
            (None, _) => Err(RulesError::invariant(format!(
                "no {color} king on the board"
            ))),
            (Some(first), Some(second)) => Err(RulesError::invariant(format!(
                "more than one {color} king on the board ({first}, {second})"
            ))),
        }
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub(crate) fn set_en_passant_target(&mut self, target: Option<Square>) {
        self.en_passant_target = target;
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub(crate) fn set_castling_rights(&mut self, rights: CastlingRights) {
        self.castling_rights = rights;
    }

    #[inline]
    pub(crate) fn castling_rights_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling_rights
    }

    /// Occupancy by kind and color only, ignoring move flags
    ///
    /// Two boards with the same placement compare equal here even if one
    /// rook has wandered off and back.
    pub fn placement(&self) -> [Option<(PieceKind, Color)>; Square::COUNT] {
        self.cells
            .map(|cell| cell.map(|piece| (piece.kind, piece.color)))
    }
}

/// Diagram with rank 8 at the top, `.` for empty squares
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let symbol = self
                    .piece_at(Square::at(file, rank))
                    .map_or('.', Piece::symbol);
                write!(f, " {symbol}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    #[test]
    fn test_standard_board_layout() {
        let board = Board::standard();

        assert_eq!(board.pieces().count(), 32, "32 pieces at the start");
        assert_eq!(
            board.piece_at(sq("e1")),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.piece_at(sq("d8")),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq("c7")),
            Some(Piece::new(PieceKind::Pawn, Color::Black))
        );
        assert!(board.is_empty(sq("e4")));
        assert_eq!(board.castling_rights(), CastlingRights::ALL);
        assert_eq!(board.en_passant_target(), None);
    }

    #[test]
    fn test_enemy_and_friendly_queries() {
        let board = Board::standard();

        assert!(board.is_enemy(sq("e7"), Color::White));
        assert!(!board.is_enemy(sq("e2"), Color::White));
        assert!(!board.is_enemy(sq("e4"), Color::White), "empty is not enemy");
        assert!(board.is_friendly(sq("e2"), Color::White));
    }

    #[test]
    fn test_in_bounds() {
        assert!(Board::in_bounds(0, 0));
        assert!(Board::in_bounds(7, 7));
        assert!(!Board::in_bounds(-1, 3));
        assert!(!Board::in_bounds(3, 8));
    }

    #[test]
    fn test_king_square_invariant() {
        let board = Board::standard();
        assert_eq!(board.king_square(Color::Black), Ok(sq("e8")));

        let mut missing = Board::standard();
        missing.remove(sq("e8"));
        assert!(matches!(
            missing.king_square(Color::Black),
            Err(RulesError::InvariantViolation { .. })
        ));

        let mut doubled = Board::standard();
        doubled.place(Piece::new(PieceKind::King, Color::White), sq("e4"));
        assert!(matches!(
            doubled.king_square(Color::White),
            Err(RulesError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_place_and_remove() {
        let mut board = Board::empty();
        let knight = Piece::new(PieceKind::Knight, Color::Black);

        assert_eq!(board.place(knight, sq("f6")), None);
        assert_eq!(board.piece_at(sq("f6")), Some(knight));
        assert_eq!(board.remove(sq("f6")), Some(knight));
        assert!(board.is_empty(sq("f6")));
        assert_eq!(board.remove(sq("f6")), None);
    }

    #[test]
    fn test_display_diagram() {
        let text = Board::standard().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "8  r n b q k b n r");
        assert_eq!(lines[4], "4  . . . . . . . .");
        assert_eq!(lines[7], "1  R N B Q K B N R");
        assert_eq!(lines[8], "   a b c d e f g h");
    }
}
