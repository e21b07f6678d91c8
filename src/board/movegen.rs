use super::{Board, MAX_MOVES};
use crate::core::*;
use crate::geometry::Geometry;

/******************************************\
|==========================================|
|                Move List                 |
|==========================================|
\******************************************/

/// # Move list representation
///
/// - A fixed-capacity list of moves; 256 covers every reachable position

#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: [Move::NULL; MAX_MOVES],
            len: 0,
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES, "MoveList overflow");
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves[..self.len].iter().copied()
    }

    pub fn contains(&self, mv: Move) -> bool {
        self.iter().any(|m| m == mv)
    }

    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

/******************************************\
|==========================================|
|          Pseudo Legal Generation         |
|==========================================|
\******************************************/

impl Board {
    /// Generates every pseudo-legal move for the side to move.
    ///
    /// Pseudo-legal moves obey piece movement, capture and castling rules but
    /// may still leave the mover's king attacked; `legal_moves` filters those.
    pub fn pseudo_legal_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        let us = self.stm();

        for from in Square::iter() {
            match self.on(from) {
                Some(piece) if piece.colour() == us => {
                    if piece.pt() == PieceType::Pawn {
                        self.gen_pawn_moves(from, &mut list);
                    } else {
                        self.gen_piece_moves(from, piece.pt(), &mut list);
                    }
                }
                _ => {}
            }
        }

        self.gen_castling(&mut list);

        list
    }

    /// Generates moves for a knight, bishop, rook, queen or king on `from` by
    /// walking its rays. A step is followed only while its attack mask names
    /// the moving piece type, so king steps and knight jumps stop after one
    /// step and sliders run until blocked.
    fn gen_piece_moves(&self, from: Square, pt: PieceType, list: &mut MoveList) {
        let us = self.stm();

        for ray in Geometry::get().rays(us, from) {
            for step in &ray.steps {
                if !step.mask.contains(pt) {
                    break;
                }
                match self.on(step.square) {
                    None => list.push(Move::new(from, step.square, MoveFlag::Quiet)),
                    Some(blocker) => {
                        if blocker.colour() != us {
                            list.push(Move::new(from, step.square, MoveFlag::Quiet));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn gen_pawn_moves(&self, from: Square, list: &mut MoveList) {
        let us = self.stm();
        let forward = us.forward();
        let promo_rank = Rank::Rank7.relative(us);
        let start_rank = Rank::Rank2.relative(us);

        // Pushes. A pawn never sits on the last rank, so the forward step
        // always lands on the board.
        debug_assert!(from.add(forward).is_some(), "pawn on the last rank");
        let push = unsafe { from.add_unchecked(forward) };
        if self.on(push).is_none() {
            if from.rank() == promo_rank {
                Self::push_promotions(from, push, list);
            } else {
                list.push(Move::new(from, push, MoveFlag::Quiet));

                if from.rank() == start_rank {
                    let double = unsafe { push.add_unchecked(forward) };
                    if self.on(double).is_none() {
                        list.push(Move::new(from, double, MoveFlag::DoublePawnPush));
                    }
                }
            }
        }

        // Captures, including en passant
        for &to in Geometry::get().pawn_attacks(us, from) {
            match self.on(to) {
                Some(victim) if victim.colour() != us => {
                    if from.rank() == promo_rank {
                        Self::push_promotions(from, to, list);
                    } else {
                        list.push(Move::new(from, to, MoveFlag::Quiet));
                    }
                }
                None if Some(to) == self.ep() => {
                    list.push(Move::new(from, to, MoveFlag::EnPassant));
                }
                _ => {}
            }
        }
    }

    fn push_promotions(from: Square, to: Square, list: &mut MoveList) {
        list.push(Move::new(from, to, MoveFlag::PromoQueen));
        list.push(Move::new(from, to, MoveFlag::PromoRook));
        list.push(Move::new(from, to, MoveFlag::PromoBishop));
        list.push(Move::new(from, to, MoveFlag::PromoKnight));
    }

    /// Generates castling moves. A castling right guarantees the king and
    /// rook still stand on their home squares; the squares between them must
    /// be empty and the king may not castle out of, through or into check.
    fn gen_castling(&self, list: &mut MoveList) {
        let us = self.stm();
        let them = !us;
        let ksq = Square::E1.relative(us);

        if self.castling().has(Castling::king_side(us)) {
            let f = Square::F1.relative(us);
            let g = Square::G1.relative(us);
            if self.on(f).is_none()
                && self.on(g).is_none()
                && !self.is_attacked(ksq, them)
                && !self.is_attacked(f, them)
                && !self.is_attacked(g, them)
            {
                list.push(Move::new(ksq, g, MoveFlag::CastleKingSide));
            }
        }

        if self.castling().has(Castling::queen_side(us)) {
            let b = Square::B1.relative(us);
            let c = Square::C1.relative(us);
            let d = Square::D1.relative(us);
            if self.on(b).is_none()
                && self.on(c).is_none()
                && self.on(d).is_none()
                && !self.is_attacked(ksq, them)
                && !self.is_attacked(d, them)
                && !self.is_attacked(c, them)
            {
                list.push(Move::new(ksq, c, MoveFlag::CastleQueenSide));
            }
        }
    }
}

/******************************************\
|==========================================|
|             Legal Generation             |
|==========================================|
\******************************************/

impl Board {
    /// Generates every legal move for the side to move.
    ///
    /// Each pseudo-legal move is applied to a scratch copy; it is kept if
    /// the mover's king is not attacked afterwards.
    pub fn legal_moves(&self) -> MoveList {
        let us = self.stm();
        let mut list = MoveList::new();
        let mut scratch = self.clone();

        for mv in self.pseudo_legal_moves().iter() {
            let undo = scratch.apply(mv);
            let legal = !scratch.is_attacked(scratch.ksq(us), !us);
            scratch.revert(mv, undo);
            if legal {
                list.push(mv);
            }
        }

        list
    }

    /// Returns true if the side to move has at least one legal move.
    ///
    /// Short-circuits on the first legal move found, so mate and stalemate
    /// tests do not pay for a full generation pass.
    pub fn has_legal_move(&self) -> bool {
        let us = self.stm();
        let mut scratch = self.clone();

        for mv in self.pseudo_legal_moves().iter() {
            let undo = scratch.apply(mv);
            let legal = !scratch.is_attacked(scratch.ksq(us), !us);
            scratch.revert(mv, undo);
            if legal {
                return true;
            }
        }

        false
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
