use super::types::Colour;
use thiserror::Error;

/******************************************\
|==========================================|
|               Piece Types                |
|==========================================|
\******************************************/

/// # Piece type representation
///
/// - The six kinds of chess piece, independent of colour

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    /// Number of elements in the PieceType enum
    pub const NUM: usize = 6;
}

crate::impl_from_to_primitive!(PieceType);
crate::impl_enum_iter!(PieceType);

/******************************************\
|==========================================|
|                  Pieces                  |
|==========================================|
\******************************************/

/// # Piece representation
///
/// - A coloured piece, with colour interleaved into the low bit so that
///   `piece >> 1` recovers the piece type and `piece & 1` the colour

#[rustfmt::skip]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Piece {
    WhitePawn, BlackPawn,
    WhiteKnight, BlackKnight,
    WhiteBishop, BlackBishop,
    WhiteRook, BlackRook,
    WhiteQueen, BlackQueen,
    WhiteKing, BlackKing,
}

impl Piece {
    /// Number of elements in the Piece enum
    pub const NUM: usize = 12;
}

crate::impl_from_to_primitive!(Piece);
crate::impl_enum_iter!(Piece);

/// FEN characters for each piece, in discriminator order
const PIECE_STR: &str = "PpNnBbRrQqKk";

impl Piece {
    /// Combines a colour and a piece type into a piece
    pub const fn from_parts(col: Colour, pt: PieceType) -> Self {
        unsafe { Self::from_unchecked(((pt as u8) << 1) | (col as u8)) }
    }

    /// Returns the piece type of the piece
    pub const fn pt(&self) -> PieceType {
        unsafe { PieceType::from_unchecked((*self as u8) >> 1) }
    }

    /// Returns the colour of the piece
    pub const fn colour(&self) -> Colour {
        unsafe { Colour::from_unchecked((*self as u8) & 1) }
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Piece {
    /// Displays the piece in its FEN representation (WhitePawn => 'P')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_STR.as_bytes()[self.index()] as char)
    }
}

impl std::fmt::Display for PieceType {
    /// Displays the piece type as its white FEN character (Knight => 'N')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", PIECE_STR.as_bytes()[(self.index()) << 1] as char)
    }
}

/******************************************\
|==========================================|
|              Parsing Strings             |
|==========================================|
\******************************************/

impl TryFrom<char> for Piece {
    type Error = ParsePieceError;

    /// Parses a FEN piece character ('P', 'n', ...) into a piece
    fn try_from(c: char) -> Result<Self, Self::Error> {
        PIECE_STR
            .find(c)
            .map(|index| unsafe { Piece::from_unchecked(index as u8) })
            .ok_or(ParsePieceError::InvalidChar(c))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParsePieceError {
    #[error("Invalid character for piece: '{0}', expected one of \"PpNnBbRrQqKk\"")]
    InvalidChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
