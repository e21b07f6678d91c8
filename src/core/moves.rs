use super::piece::PieceType;
use super::square::Square;

/******************************************\
|==========================================|
|               Move Flags                 |
|==========================================|
\******************************************/

/// # Move flag representation
///
/// - Distinguishes the special move kinds the applier must handle. Capture
///   status is not encoded; it is read off the board when the move is made.

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveFlag {
    Quiet,
    DoublePawnPush,
    EnPassant,
    CastleKingSide,
    CastleQueenSide,
    PromoKnight,
    PromoBishop,
    PromoRook,
    PromoQueen,
}

impl MoveFlag {
    /// Number of elements in the MoveFlag enum
    pub const NUM: usize = 9;
}

crate::impl_from_to_primitive!(MoveFlag);

impl MoveFlag {
    /// Returns the promoted piece type for promotion flags, `None` otherwise
    pub const fn promotion(&self) -> Option<PieceType> {
        match self {
            MoveFlag::PromoKnight => Some(PieceType::Knight),
            MoveFlag::PromoBishop => Some(PieceType::Bishop),
            MoveFlag::PromoRook => Some(PieceType::Rook),
            MoveFlag::PromoQueen => Some(PieceType::Queen),
            _ => None,
        }
    }

    /// Returns the promotion flag for a promoted piece type, if valid
    pub const fn from_promotion(pt: PieceType) -> Option<MoveFlag> {
        match pt {
            PieceType::Knight => Some(MoveFlag::PromoKnight),
            PieceType::Bishop => Some(MoveFlag::PromoBishop),
            PieceType::Rook => Some(MoveFlag::PromoRook),
            PieceType::Queen => Some(MoveFlag::PromoQueen),
            _ => None,
        }
    }
}

/******************************************\
|==========================================|
|                  Moves                   |
|==========================================|
\******************************************/

/// # Move representation
///
/// - Packs origin, destination and flag into 16 bits:
///   bits 0-5 origin square, bits 6-11 destination square, bits 12-15 flag

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const FLAG_SHIFT: u16 = 12;
const SQUARE_MASK: u16 = 0b111111;

impl Move {
    /// Placeholder move used to fill unused move list slots
    pub const NULL: Move = Move(0);

    /// Creates a move from its origin, destination and flag
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move(
            ((from as u16) << FROM_SHIFT)
                | ((to as u16) << TO_SHIFT)
                | ((flag as u16) << FLAG_SHIFT),
        )
    }

    /// Returns the origin square of the move
    pub const fn from(&self) -> Square {
        unsafe { Square::from_unchecked(((self.0 >> FROM_SHIFT) & SQUARE_MASK) as u8) }
    }

    /// Returns the destination square of the move
    pub const fn to(&self) -> Square {
        unsafe { Square::from_unchecked(((self.0 >> TO_SHIFT) & SQUARE_MASK) as u8) }
    }

    /// Returns the flag of the move
    pub const fn flag(&self) -> MoveFlag {
        unsafe { MoveFlag::from_unchecked((self.0 >> FLAG_SHIFT) as u8) }
    }

    /// Returns true if the move is a promotion
    pub const fn is_promotion(&self) -> bool {
        (self.0 >> FLAG_SHIFT) >= MoveFlag::PromoKnight as u16
    }

    /// Returns true if the move is a castle (either side)
    pub const fn is_castle(&self) -> bool {
        matches!(
            self.flag(),
            MoveFlag::CastleKingSide | MoveFlag::CastleQueenSide
        )
    }
}

impl std::fmt::Display for Move {
    /// Displays the move in long algebraic notation ("e2e4", "e7e8q")
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(pt) = self.flag().promotion() {
            write!(f, "{}", pt.to_string().to_lowercase())?;
        }
        Ok(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
