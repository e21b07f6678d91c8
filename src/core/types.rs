use super::square::Direction;
use thiserror::Error;

/******************************************\
|==========================================|
|                  Colour                  |
|==========================================|
\******************************************/

/// # Colour representation
///
/// - Represents the two sides of a chess game

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Colour {
    White,
    Black,
}

impl Colour {
    /// Number of elements in the Colour enum
    pub const NUM: usize = 2;

    /// Returns the pawn push direction of the colour
    pub const fn forward(self) -> Direction {
        match self {
            Colour::White => Direction::N,
            Colour::Black => Direction::S,
        }
    }
}

crate::impl_from_to_primitive!(Colour);
crate::impl_enum_iter!(Colour);

impl std::ops::Not for Colour {
    type Output = Colour;

    /// Returns the opposite colour
    fn not(self) -> Self::Output {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }
}

impl std::fmt::Display for Colour {
    /// Displays the colour in its FEN representation ('w' or 'b')
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Colour::White => write!(f, "w"),
            Colour::Black => write!(f, "b"),
        }
    }
}

/******************************************\
|==========================================|
|             Castling Rights              |
|==========================================|
\******************************************/

/// # Castling rights representation
///
/// - Bitflag set over the four castling rights (white/black, king/queen side)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castling(pub u8);

crate::impl_bit_ops!(Castling);

impl Castling {
    pub const WK: Castling = Castling(0b0001);
    pub const WQ: Castling = Castling(0b0010);
    pub const BK: Castling = Castling(0b0100);
    pub const BQ: Castling = Castling(0b1000);

    pub const NONE: Castling = Castling(0b0000);
    pub const WHITE: Castling = Castling(0b0011);
    pub const BLACK: Castling = Castling(0b1100);
    pub const ALL: Castling = Castling(0b1111);

    /// Number of distinct rights combinations
    pub const NUM: usize = 16;

    /// Returns true if all the rights in `rights` are present
    pub const fn has(&self, rights: Castling) -> bool {
        self.0 & rights.0 == rights.0
    }

    /// Adds the rights in `rights` to the set
    pub const fn set(&mut self, rights: Castling) {
        self.0 |= rights.0;
    }

    /// Removes the rights in `rights` from the set
    pub const fn remove(&mut self, rights: Castling) {
        self.0 &= !rights.0;
    }

    /// Keeps only the rights present in `mask`
    pub const fn mask(&mut self, mask: Castling) {
        self.0 &= mask.0;
    }

    /// Returns the king side right of `col`
    pub const fn king_side(col: Colour) -> Castling {
        match col {
            Colour::White => Castling::WK,
            Colour::Black => Castling::BK,
        }
    }

    /// Returns the queen side right of `col`
    pub const fn queen_side(col: Colour) -> Castling {
        match col {
            Colour::White => Castling::WQ,
            Colour::Black => Castling::BQ,
        }
    }

    /// Converts the rights set to its index (0..16)
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Castling {
    /// Displays the rights in their FEN representation ("KQkq", "-" when empty)
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        if self.has(Castling::WK) {
            write!(f, "K")?;
        }
        if self.has(Castling::WQ) {
            write!(f, "Q")?;
        }
        if self.has(Castling::BK) {
            write!(f, "k")?;
        }
        if self.has(Castling::BQ) {
            write!(f, "q")?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Castling {
    type Err = ParseCastlingError;

    /// Parses a FEN castling field ("KQkq", "Kq", "-") into a rights set
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseCastlingError::Empty);
        }

        if s == "-" {
            return Ok(Castling::NONE);
        }

        let mut rights = Castling::NONE;
        for c in s.chars() {
            let right = match c {
                'K' => Castling::WK,
                'Q' => Castling::WQ,
                'k' => Castling::BK,
                'q' => Castling::BQ,
                _ => return Err(ParseCastlingError::InvalidChar(c)),
            };
            if rights.has(right) {
                return Err(ParseCastlingError::DuplicateChar(c));
            }
            rights.set(right);
        }

        Ok(rights)
    }
}

/******************************************\
|==========================================|
|           Castling Parse Errors          |
|==========================================|
\******************************************/

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCastlingError {
    #[error("Empty castling rights string")]
    Empty,
    #[error("Invalid character for castling rights: '{0}', expected 'K', 'Q', 'k' or 'q'")]
    InvalidChar(char),
    #[error("Duplicate castling rights character: '{0}'")]
    DuplicateChar(char),
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
