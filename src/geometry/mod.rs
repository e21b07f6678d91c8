//! Precomputed per-square ray geometry.
//!
//! Every square owns a sequence of rays radiating outwards: the eight compass
//! rays walked to the board edge plus one single-step ray per knight jump.
//! Each step on a ray carries an [`AttackMask`] naming the piece types that
//! attack the origin square from that step. Attack detection walks each ray
//! until the first occupied square; move generation for every non-pawn piece
//! walks the same rays, following a step only while the mask still names the
//! moving piece type.

use crate::core::{Colour, Direction, PieceType, Square};
use std::sync::OnceLock;

/******************************************\
|==========================================|
|               Attack Mask                |
|==========================================|
\******************************************/

/// # Attack mask representation
///
/// - Bitflag set over the six piece types, one bit per [`PieceType`]

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackMask(pub u8);

crate::impl_bit_ops!(AttackMask);

impl AttackMask {
    pub const NONE: AttackMask = AttackMask(0);

    /// Returns the mask containing only `pt`
    pub const fn of(pt: PieceType) -> Self {
        AttackMask(1 << pt.index())
    }

    /// Returns true if the mask contains `pt`
    pub const fn contains(&self, pt: PieceType) -> bool {
        self.0 & (1 << pt.index()) != 0
    }
}

/******************************************\
|==========================================|
|                   Rays                   |
|==========================================|
\******************************************/

/// A single step on a ray: the square reached and the piece types that
/// attack the ray origin from it.
#[derive(Debug, Clone, Copy)]
pub struct RayStep {
    pub square: Square,
    pub mask: AttackMask,
}

/// An ordered ray of steps radiating from a square, nearest step first.
#[derive(Debug, Clone)]
pub struct Ray {
    pub dir: Direction,
    pub steps: Vec<RayStep>,
}

/******************************************\
|==========================================|
|                 Geometry                 |
|==========================================|
\******************************************/

/// Precomputed ray tables, one set per attacker colour.
///
/// The two colour tables differ only in the pawn bits: a white pawn attacks
/// a square it stands south-east or south-west of, a black pawn the mirror.
pub struct Geometry {
    rays: [[Vec<Ray>; Square::NUM]; Colour::NUM],
    pawn_attacks: [[Vec<Square>; Square::NUM]; Colour::NUM],
}

static GEOMETRY: OnceLock<Geometry> = OnceLock::new();

impl Geometry {
    /// Returns the shared geometry tables, building them on first use
    pub fn get() -> &'static Geometry {
        GEOMETRY.get_or_init(Geometry::build)
    }

    /// Returns the rays radiating from `sq`, with pawn bits set for an
    /// attacker of colour `attacker`
    #[inline]
    pub fn rays(&self, attacker: Colour, sq: Square) -> &[Ray] {
        &self.rays[attacker.index()][sq.index()]
    }

    /// Returns the squares a pawn of colour `col` standing on `sq` attacks
    #[inline]
    pub fn pawn_attacks(&self, col: Colour, sq: Square) -> &[Square] {
        &self.pawn_attacks[col.index()][sq.index()]
    }

    fn build() -> Geometry {
        let rays = [
            std::array::from_fn(|sq| Self::build_square(Colour::White, index_square(sq))),
            std::array::from_fn(|sq| Self::build_square(Colour::Black, index_square(sq))),
        ];
        let pawn_attacks = [
            std::array::from_fn(|sq| Self::build_pawn_attacks(Colour::White, index_square(sq))),
            std::array::from_fn(|sq| Self::build_pawn_attacks(Colour::Black, index_square(sq))),
        ];
        Geometry { rays, pawn_attacks }
    }

    /// Builds all rays radiating from `sq` for an attacker of colour `attacker`
    fn build_square(attacker: Colour, sq: Square) -> Vec<Ray> {
        let mut rays = Vec::new();

        for dir in Direction::ORTHOGONAL {
            if let Some(ray) = Self::build_slider_ray(attacker, sq, dir) {
                rays.push(ray);
            }
        }
        for dir in Direction::DIAGONAL {
            if let Some(ray) = Self::build_slider_ray(attacker, sq, dir) {
                rays.push(ray);
            }
        }
        for dir in Direction::KNIGHT {
            if let Some(to) = sq.add(dir) {
                rays.push(Ray {
                    dir,
                    steps: vec![RayStep {
                        square: to,
                        mask: AttackMask::of(PieceType::Knight),
                    }],
                });
            }
        }

        rays
    }

    /// Walks from `sq` in `dir` to the board edge, assigning each step the
    /// mask of piece types that attack `sq` from it
    fn build_slider_ray(attacker: Colour, sq: Square, dir: Direction) -> Option<Ray> {
        let slider = if dir.is_diagonal() {
            AttackMask::of(PieceType::Bishop) | AttackMask::of(PieceType::Queen)
        } else {
            AttackMask::of(PieceType::Rook) | AttackMask::of(PieceType::Queen)
        };

        let mut steps = Vec::new();
        let mut cursor = sq.add(dir)?;
        loop {
            let mut mask = slider;
            if steps.is_empty() {
                mask |= AttackMask::of(PieceType::King);
                if Self::pawn_attack_dir(attacker, dir) {
                    mask |= AttackMask::of(PieceType::Pawn);
                }
            }
            steps.push(RayStep {
                square: cursor,
                mask,
            });
            match cursor.add(dir) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Some(Ray { dir, steps })
    }

    /// Whether a pawn of colour `attacker` one step away in `dir` attacks the
    /// ray origin. White pawns attack from the south, black pawns from the
    /// north.
    fn pawn_attack_dir(attacker: Colour, dir: Direction) -> bool {
        match attacker {
            Colour::White => matches!(dir, Direction::SE | Direction::SW),
            Colour::Black => matches!(dir, Direction::NE | Direction::NW),
        }
    }

    fn build_pawn_attacks(col: Colour, sq: Square) -> Vec<Square> {
        let dirs = match col {
            Colour::White => [Direction::NE, Direction::NW],
            Colour::Black => [Direction::SE, Direction::SW],
        };
        dirs.into_iter().filter_map(|dir| sq.add(dir)).collect()
    }
}

#[inline]
fn index_square(index: usize) -> Square {
    unsafe { Square::from_unchecked(index as u8) }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
