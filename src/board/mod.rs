pub mod fen;
pub mod fingerprint;
pub mod movegen;
pub mod movement;
pub mod terminal;

pub use fen::{FenParseError, KILLER_FEN, START_FEN, TRICKY_FEN};
pub use movegen::MoveList;
pub use movement::{IllegalMoveError, UndoState};
pub use terminal::{GameStatus, RepetitionHistory, RepetitionTable};

use crate::core::*;
use crate::geometry::Geometry;

/******************************************\
|==========================================|
|                Constants                 |
|==========================================|
\******************************************/

pub const MAX_MOVES: usize = 256;

/******************************************\
|==========================================|
|                  Board                   |
|==========================================|
\******************************************/

/// # Board representation
///
/// - A full chess position: piece placement, side to move, castling rights,
///   en passant square, halfmove clock and game ply. King squares are cached
///   and kept in sync by the move applier.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    board: [Option<Piece>; Square::NUM],

    king_sq: [Square; Colour::NUM],

    stm: Colour,

    castle: Castling,

    enpassant: Option<Square>,

    fifty_move: u8,

    half_moves: u16,
}

/******************************************\
|==========================================|
|           Basic Implementation           |
|==========================================|
\******************************************/

impl Default for Board {
    fn default() -> Board {
        let mut board = Board::new();
        board.set(START_FEN).unwrap();
        board
    }
}

impl Board {
    /// Creates an empty board. The king square cache holds placeholders
    /// until `set` installs a position with one king per side.
    pub(crate) fn new() -> Board {
        Board {
            board: [None; Square::NUM],
            king_sq: [Square::E1, Square::E8],
            stm: Colour::White,
            castle: Castling::NONE,
            enpassant: None,
            fifty_move: 0,
            half_moves: 0,
        }
    }

    /// Returns the piece on `square`, if any
    #[inline]
    pub fn on(&self, square: Square) -> Option<Piece> {
        unsafe { *self.board.get_unchecked(square.index()) }
    }

    /// Returns the side to move
    #[inline]
    pub fn stm(&self) -> Colour {
        self.stm
    }

    /// Returns the current castling rights
    #[inline]
    pub fn castling(&self) -> Castling {
        self.castle
    }

    /// Returns the en passant capture square, if the last move was a double
    /// pawn push
    #[inline]
    pub fn ep(&self) -> Option<Square> {
        self.enpassant
    }

    /// Returns the square of the pawn that would be taken en passant
    #[inline]
    pub fn ep_target(&self) -> Option<Square> {
        self.enpassant
            .map(|sq| unsafe { sq.add_unchecked(-self.stm.forward()) })
    }

    /// Returns the halfmove clock for the fifty-move rule
    #[inline]
    pub fn fifty_move(&self) -> u8 {
        self.fifty_move
    }

    /// Returns the number of half moves played since the initial position
    #[inline]
    pub fn half_moves(&self) -> u16 {
        self.half_moves
    }

    /// Returns the fullmove number, starting at 1
    #[inline]
    pub fn full_moves(&self) -> u16 {
        self.half_moves / 2 + 1
    }

    /// Returns the square of the king of `col`
    #[inline]
    pub fn ksq(&self, col: Colour) -> Square {
        unsafe { *self.king_sq.get_unchecked(col.index()) }
    }

    /// Places `piece` on `square`, updating the king square cache
    #[inline]
    pub(crate) fn set_piece(&mut self, square: Square, piece: Piece) {
        self.board[square.index()] = Some(piece);
        if piece.pt() == PieceType::King {
            self.king_sq[piece.colour().index()] = square;
        }
    }

    /// Removes and returns the piece on `square`
    #[inline]
    pub(crate) fn clear_piece(&mut self, square: Square) -> Option<Piece> {
        self.board[square.index()].take()
    }

    pub(crate) fn set_stm(&mut self, stm: Colour) {
        self.stm = stm;
    }

    pub(crate) fn set_castling(&mut self, castle: Castling) {
        self.castle = castle;
    }

    pub(crate) fn set_ep(&mut self, enpassant: Option<Square>) {
        self.enpassant = enpassant;
    }

    pub(crate) fn set_clocks(&mut self, fifty_move: u8, half_moves: u16) {
        self.fifty_move = fifty_move;
        self.half_moves = half_moves;
    }
}

/******************************************\
|==========================================|
|             Attack Detection             |
|==========================================|
\******************************************/

impl Board {
    /// Returns true if `square` is attacked by any piece of colour `by`.
    ///
    /// Walks every ray radiating from `square`: the first occupied step on a
    /// ray settles it, attacking if the piece belongs to `by` and its type is
    /// in the step's attack mask, blocking otherwise.
    pub fn is_attacked(&self, square: Square, by: Colour) -> bool {
        let geo = Geometry::get();

        'rays: for ray in geo.rays(by, square) {
            for step in &ray.steps {
                if let Some(piece) = self.on(step.square) {
                    if piece.colour() == by && step.mask.contains(piece.pt()) {
                        return true;
                    }
                    continue 'rays;
                }
            }
        }

        false
    }

    /// Returns true if the side to move is in check
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_attacked(self.ksq(self.stm), !self.stm)
    }

    /// Returns true if an en passant capture onto `ep` is available to the
    /// side to move: the pushed pawn stands behind the square and a capturing
    /// pawn is adjacent to it
    pub(crate) fn ep_capturable(&self, ep: Square) -> bool {
        let target = unsafe { ep.add_unchecked(-self.stm.forward()) };
        if self.on(target) != Some(Piece::from_parts(!self.stm, PieceType::Pawn)) {
            return false;
        }

        let capturer = Piece::from_parts(self.stm, PieceType::Pawn);
        Geometry::get()
            .pawn_attacks(!self.stm, ep)
            .iter()
            .any(|&sq| self.on(sq) == Some(capturer))
    }
}

/******************************************\
|==========================================|
|                 Display                  |
|==========================================|
\******************************************/

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SEPARATOR: &str = "\n     +---+---+---+---+---+---+---+---+";

        writeln!(f, "{}", SEPARATOR)?;

        for rank in Rank::iter().rev() {
            write!(f, " {}   |", rank as u8 + 1)?;

            for file in File::iter() {
                let square = Square::from_parts(file, rank);
                let cell = match self.on(square) {
                    Some(piece) => piece.to_string(),
                    None => " ".to_string(),
                };
                write!(f, " {} |", cell)?;
            }

            writeln!(f, "{}", SEPARATOR)?;
        }

        writeln!(f)?;
        writeln!(f, "       A   B   C   D   E   F   G   H")?;
        writeln!(f)?;
        writeln!(f, "Current Side: {:?}", self.stm())?;
        writeln!(f, "Castling: {}", self.castle)?;
        writeln!(
            f,
            "En Passant Square: {}",
            match self.enpassant {
                Some(square) => square.to_string(),
                None => "None".to_string(),
            }
        )?;
        writeln!(f, "Half Move Clock: {}", self.fifty_move)?;
        writeln!(f, "Full Move: {}", self.full_moves())?;
        writeln!(f, "Fen: {}", self.fen())?;
        writeln!(f, "Key: {:#X}", self.fingerprint())?;

        Ok(())
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
