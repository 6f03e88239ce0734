//! # Rules Engine Core Types
//!
//! ## Overview
//!
//! Value types shared by every layer of the engine: colors, piece kinds,
//! pieces, squares, castling rights, move requests and game status.
//! All of them are small `Copy` values so boards can be cloned cheaply for
//! the self-check simulation in [`crate::validator`].
//!
//! ## Square Mapping
//!
//! A [`Square`] is stored as a single index `rank * 8 + file`:
//! - index 0 = a1 (file 0, rank 0)
//! - index 7 = h1
//! - index 56 = a8
//! - index 63 = h8
//!
//! Squares are only ever built through checked constructors, so a stored
//! `Square` is always on the board. Off-board coordinates exist only as the
//! signed `(file, rank)` pairs tested by [`Square::offset`].
//!
//! ## Pieces and Move History Flags
//!
//! A [`Piece`] carries its `kind`, `color` and a `has_moved` flag. The flag
//! only matters for pawns (double push), rooks and kings (castling); the
//! other kinds carry it but nothing reads it.

use std::fmt;
use std::ops::Not;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Color
// ============================================================================

/// The two sides
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step pawns of this color advance by
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank holding this color's king and rooks at the start
    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    /// Rank this color's pawns start on (and may double-push from)
    #[inline]
    pub const fn pawn_rank(self) -> u8 {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank where this color's pawns promote
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Rank a pawn of this color lands on when capturing en passant
    #[inline]
    pub const fn en_passant_rank(self) -> u8 {
        match self {
            Color::White => 5,
            Color::Black => 2,
        }
    }
}

impl Not for Color {
    type Output = Color;

    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

// ============================================================================
// Pieces
// ============================================================================

/// The six piece kinds
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, in the order promotions are listed
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight
        )
    }

    /// Lowercase letter used in FEN and coordinate notation
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    /// Parse a piece letter, ignoring case
    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

/// A piece on the board
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    /// Set once the piece has left its starting square
    pub has_moved: bool,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Piece {
            kind,
            color,
            has_moved: false,
        }
    }

    /// Same piece with its move flag set
    pub const fn moved(self) -> Self {
        Piece {
            has_moved: true,
            ..self
        }
    }

    /// `true` if kind and color match, regardless of move history
    #[inline]
    pub fn is(self, kind: PieceKind, color: Color) -> bool {
        self.kind == kind && self.color == color
    }

    /// FEN letter: uppercase for White, lowercase for Black
    pub fn symbol(self) -> char {
        match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(symbol)?;
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

// ============================================================================
// Squares
// ============================================================================

/// Check if signed file/rank coordinates are on the board
#[inline]
pub const fn in_bounds(file: i8, rank: i8) -> bool {
    file >= 0 && file < 8 && rank >= 0 && rank < 8
}

/// One of the 64 cells, ordered a1, b1, .., h1, a2, .., h8
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub const COUNT: usize = 64;

    /// Build a square from zero-based file and rank, `None` if off the board
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    /// Infallible constructor for coordinates known to be on the board
    #[inline]
    pub(crate) const fn at(file: u8, rank: u8) -> Square {
        debug_assert!(file < 8 && rank < 8);
        Square(rank * 8 + file)
    }

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Square {
        debug_assert!(index < Self::COUNT);
        Square(index as u8)
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 & 7
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 >> 3
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Step by a signed file/rank offset, `None` when that leaves the board
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if in_bounds(file, rank) {
            Some(Square::at(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Signed `(file, rank)` distance from `self` to `other`
    #[inline]
    pub fn delta(self, other: Square) -> (i8, i8) {
        (
            other.file() as i8 - self.file() as i8,
            other.rank() as i8 - self.rank() as i8,
        )
    }

    /// `true` for light squares (h1 is light, a1 is dark)
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::COUNT as u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Square {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Castling
// ============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CastlingSide {
    Kingside,
    Queenside,
}

impl CastlingSide {
    pub const BOTH: [CastlingSide; 2] = [CastlingSide::Kingside, CastlingSide::Queenside];

    /// File the rook starts on
    pub const fn rook_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 7,
            CastlingSide::Queenside => 0,
        }
    }

    /// File the king lands on
    pub const fn king_target_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 6,
            CastlingSide::Queenside => 2,
        }
    }

    /// File the rook lands on, the square the king crossed
    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastlingSide::Kingside => 5,
            CastlingSide::Queenside => 3,
        }
    }

    pub(crate) fn from_king_target(file: u8) -> Option<CastlingSide> {
        CastlingSide::BOTH
            .into_iter()
            .find(|side| side.king_target_file() == file)
    }
}

/// The four castling permissions
///
/// Each flag is cleared for good once the king or the matching rook moves,
/// or the rook is captured on its home square. A set flag records intent
/// only; castling legality still checks the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights {
    white_kingside: bool,
    white_queenside: bool,
    black_kingside: bool,
    black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    fn flag_mut(&mut self, color: Color, side: CastlingSide) -> &mut bool {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => &mut self.white_kingside,
            (Color::White, CastlingSide::Queenside) => &mut self.white_queenside,
            (Color::Black, CastlingSide::Kingside) => &mut self.black_kingside,
            (Color::Black, CastlingSide::Queenside) => &mut self.black_queenside,
        }
    }

    pub const fn has(self, color: Color, side: CastlingSide) -> bool {
        match (color, side) {
            (Color::White, CastlingSide::Kingside) => self.white_kingside,
            (Color::White, CastlingSide::Queenside) => self.white_queenside,
            (Color::Black, CastlingSide::Kingside) => self.black_kingside,
            (Color::Black, CastlingSide::Queenside) => self.black_queenside,
        }
    }

    /// `true` if the color keeps at least one right
    pub const fn any(self, color: Color) -> bool {
        self.has(color, CastlingSide::Kingside) || self.has(color, CastlingSide::Queenside)
    }

    pub(crate) fn grant(&mut self, color: Color, side: CastlingSide) {
        *self.flag_mut(color, side) = true;
    }

    pub(crate) fn revoke(&mut self, color: Color, side: CastlingSide) {
        *self.flag_mut(color, side) = false;
    }

    pub(crate) fn revoke_all(&mut self, color: Color) {
        for side in CastlingSide::BOTH {
            self.revoke(color, side);
        }
    }
}

/// FEN castling field: `KQkq`, a subset of it, or `-`
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.white_kingside, 'K'),
            (self.white_queenside, 'Q'),
            (self.black_kingside, 'k'),
            (self.black_queenside, 'q'),
        ];
        let mut any = false;
        for (set, letter) in flags {
            if set {
                write!(f, "{letter}")?;
                any = true;
            }
        }
        if !any {
            f.write_str("-")?;
        }
        Ok(())
    }
}

// ============================================================================
// Moves
// ============================================================================

/// A move request: origin, destination and optional promotion choice
///
/// This is what callers hand to the engine. Whether it is a capture, a
/// castle or an en-passant capture is worked out by
/// [`crate::validator::resolve`] from the board, never by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

/// Coordinate notation: `e2e4`, `e7e8q`
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

/// What a legal move does to the board, beyond moving one piece
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MoveKind {
    /// Plain move onto an empty square
    Quiet,
    /// Takes the piece standing on the destination
    Capture,
    /// Pawn advance of two squares; sets the en-passant target
    DoublePush,
    /// Pawn takes the pawn beside it, landing behind that pawn
    EnPassant,
    /// King moves two squares, rook jumps over it
    Castle(CastlingSide),
}

// ============================================================================
// Game status
// ============================================================================

/// Outcome of the last applied move, from the side to move's point of view
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GameStatus {
    #[default]
    InProgress,
    /// Side to move is in check and has a legal reply
    Check,
    /// Side to move is in check with no legal move (terminal)
    Checkmate,
    /// Side to move is not in check and has no legal move (terminal)
    Stalemate,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate | GameStatus::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        };
        f.write_str(text)
    }
}

/// Draw conditions reported alongside the status
///
/// These never end the game on their own; a host decides whether to
/// adjudicate or let a player claim.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DrawReason {
    /// Neither side has mating material
    InsufficientMaterial,
    /// 100 half-moves without a capture or pawn move
    FiftyMoveRule,
    /// Same position reached for the third time
    ThreefoldRepetition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_coordinates() {
        let e4 = Square::new(4, 3).unwrap();
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::new(8, 0), None, "file 8 is off the board");
        assert_eq!(Square::new(0, 8), None, "rank 8 is off the board");
    }

    #[test]
    fn test_square_offset_stays_on_board() {
        let a1 = Square::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(0, -1), None);
        assert_eq!(a1.offset(1, 2), Square::new(1, 2));

        let h8 = Square::new(7, 7).unwrap();
        assert_eq!(h8.offset(1, 1), None);
        assert_eq!(h8.offset(-7, -7), Some(a1));
    }

    #[test]
    fn test_square_colors() {
        assert!(!Square::new(0, 0).unwrap().is_light(), "a1 is dark");
        assert!(Square::new(7, 0).unwrap().is_light(), "h1 is light");
        assert!(Square::new(3, 0).unwrap().is_light(), "d1 is light");
    }

    #[test]
    fn test_castling_rights_display() {
        assert_eq!(CastlingRights::ALL.to_string(), "KQkq");
        assert_eq!(CastlingRights::NONE.to_string(), "-");

        let mut rights = CastlingRights::ALL;
        rights.revoke_all(Color::White);
        rights.revoke(Color::Black, CastlingSide::Queenside);
        assert_eq!(rights.to_string(), "k");
        assert!(!rights.any(Color::White));
        assert!(rights.any(Color::Black));
    }

    #[test]
    fn test_piece_symbols() {
        assert_eq!(Piece::new(PieceKind::Knight, Color::White).symbol(), 'N');
        assert_eq!(Piece::new(PieceKind::Queen, Color::Black).symbol(), 'q');
        assert_eq!(
            Piece::from_symbol('K'),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(Piece::from_symbol('x'), None);
    }

    #[test]
    fn test_move_display() {
        let e7 = Square::new(4, 6).unwrap();
        let e8 = Square::new(4, 7).unwrap();
        assert_eq!(Move::new(e7, e8).to_string(), "e7e8");
        assert_eq!(
            Move::with_promotion(e7, e8, PieceKind::Knight).to_string(),
            "e7e8n"
        );
    }
}
