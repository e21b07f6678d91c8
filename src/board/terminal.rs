use super::Board;
use crate::core::*;
use std::collections::HashMap;

/******************************************\
|==========================================|
|               Game Status                |
|==========================================|
\******************************************/

/// # Game status representation
///
/// - The verdict on a position: still playable, decisive, or drawn

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is mated; the winner is recorded
    Checkmate(Colour),
    Stalemate,
    FiftyMoveDraw,
    ThreefoldRepetition,
    InsufficientMaterial,
}

impl GameStatus {
    /// Returns true for any status that ends the game
    pub const fn is_over(&self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }

    /// Returns true for any drawn status
    pub const fn is_draw(&self) -> bool {
        matches!(
            self,
            GameStatus::Stalemate
                | GameStatus::FiftyMoveDraw
                | GameStatus::ThreefoldRepetition
                | GameStatus::InsufficientMaterial
        )
    }
}

/******************************************\
|==========================================|
|           Repetition History             |
|==========================================|
\******************************************/

/// Source of position occurrence counts for the threefold repetition rule.
///
/// The count for a fingerprint must include the current position.
pub trait RepetitionHistory {
    fn occurrences(&self, fingerprint: u64) -> usize;
}

/// No history: repetition draws are never reported.
impl RepetitionHistory for () {
    fn occurrences(&self, _fingerprint: u64) -> usize {
        0
    }
}

/// # Repetition table
///
/// - Counts how often each fingerprint has occurred in the game so far.
///   Callers record a position after making a move and unrecord it when the
///   move is undone.

#[derive(Debug, Default, Clone)]
pub struct RepetitionTable {
    counts: HashMap<u64, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an occurrence of `fingerprint`, returning the new count
    pub fn record(&mut self, fingerprint: u64) -> u32 {
        let count = self.counts.entry(fingerprint).or_insert(0);
        *count += 1;
        *count
    }

    /// Removes one occurrence of `fingerprint`
    pub fn unrecord(&mut self, fingerprint: u64) {
        if let Some(count) = self.counts.get_mut(&fingerprint) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(&fingerprint);
            }
        }
    }
}

impl RepetitionHistory for RepetitionTable {
    fn occurrences(&self, fingerprint: u64) -> usize {
        self.counts.get(&fingerprint).copied().unwrap_or(0) as usize
    }
}

/******************************************\
|==========================================|
|           Terminal Evaluation            |
|==========================================|
\******************************************/

impl Board {
    /// Classifies the position for the side to move.
    ///
    /// Mate and stalemate are decided before the draw rules, so a mating
    /// move that also reaches the fifty-move threshold still wins. Pass `&()`
    /// as the history when repetition tracking is not wanted.
    pub fn status(&self, history: &impl RepetitionHistory) -> GameStatus {
        if !self.has_legal_move() {
            return match self.in_check() {
                true => GameStatus::Checkmate(!self.stm()),
                false => GameStatus::Stalemate,
            };
        }

        if self.is_fifty_move_draw() {
            return GameStatus::FiftyMoveDraw;
        }

        if self.is_threefold_repetition(history) {
            return GameStatus::ThreefoldRepetition;
        }

        if self.is_insufficient_material() {
            return GameStatus::InsufficientMaterial;
        }

        GameStatus::Ongoing
    }

    /// Returns true if the side to move is in check with no legal move
    pub fn is_checkmate(&self) -> bool {
        self.in_check() && !self.has_legal_move()
    }

    /// Returns true if the side to move has no legal move but is not in check
    pub fn is_stalemate(&self) -> bool {
        !self.in_check() && !self.has_legal_move()
    }

    /// Returns true once the halfmove clock reaches 100 (fifty full moves)
    pub fn is_fifty_move_draw(&self) -> bool {
        self.fifty_move() >= 100
    }

    /// Returns true if `history` has seen the current fingerprint three times
    pub fn is_threefold_repetition(&self, history: &impl RepetitionHistory) -> bool {
        history.occurrences(self.fingerprint()) >= 3
    }

    /// Returns true when neither side can possibly deliver mate: bare kings,
    /// a single minor piece, or bishops that all share one square colour
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut bishops = 0;
        let mut bishop_colour = None;

        for sq in Square::iter() {
            let Some(piece) = self.on(sq) else { continue };
            match piece.pt() {
                PieceType::King => {}
                PieceType::Knight => minors += 1,
                PieceType::Bishop => {
                    minors += 1;
                    bishops += 1;
                    let colour = (sq.file() as u8 + sq.rank() as u8) % 2;
                    match bishop_colour {
                        None => bishop_colour = Some(colour),
                        Some(c) if c != colour => return false,
                        Some(_) => {}
                    }
                }
                // A pawn, rook or queen is always enough material
                _ => return false,
            }
        }

        minors <= 1 || minors == bishops
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
