use super::Board;
use crate::core::*;
use crate::utils::prng::PRNG;

/******************************************\
|==========================================|
|              Key Tables                  |
|==========================================|
\******************************************/

/// Random key tables for position fingerprinting, generated at compile time.
///
/// The en passant keys are per file and only folded in when the stored en
/// passant square is set, which the board restricts to positions where the
/// capture is actually playable. Two positions therefore fingerprint alike
/// exactly when they are interchangeable for repetition purposes.
struct KeyTable {
    pieces: [[u64; Square::NUM]; Piece::NUM],
    castling: [u64; Castling::NUM],
    ep_file: [u64; File::NUM],
    side: u64,
}

const KEYS: KeyTable = generate_keys();

const fn generate_keys() -> KeyTable {
    let mut prng = PRNG::new(0x9E3779B97F4A7C15);

    let mut pieces = [[0u64; Square::NUM]; Piece::NUM];
    let mut piece = 0;
    while piece < Piece::NUM {
        let mut sq = 0;
        while sq < Square::NUM {
            pieces[piece][sq] = prng.random_u64();
            sq += 1;
        }
        piece += 1;
    }

    let mut castling = [0u64; Castling::NUM];
    let mut rights = 0;
    while rights < Castling::NUM {
        castling[rights] = prng.random_u64();
        rights += 1;
    }

    let mut ep_file = [0u64; File::NUM];
    let mut file = 0;
    while file < File::NUM {
        ep_file[file] = prng.random_u64();
        file += 1;
    }

    let side = prng.random_u64();

    KeyTable {
        pieces,
        castling,
        ep_file,
        side,
    }
}

/******************************************\
|==========================================|
|              Fingerprint                 |
|==========================================|
\******************************************/

impl Board {
    /// Computes the position fingerprint: a 64-bit key over piece placement,
    /// side to move, castling rights and any live en passant square.
    ///
    /// The halfmove clock and move counters are excluded, so positions that
    /// repeat for the threefold rule share a fingerprint.
    pub fn fingerprint(&self) -> u64 {
        let mut key = 0u64;

        for sq in Square::iter() {
            if let Some(piece) = self.on(sq) {
                key ^= KEYS.pieces[piece.index()][sq.index()];
            }
        }

        key ^= KEYS.castling[self.castling().index()];

        if let Some(ep) = self.ep() {
            key ^= KEYS.ep_file[ep.file().index()];
        }

        if self.stm() == Colour::Black {
            key ^= KEYS.side;
        }

        key
    }
}

/******************************************\
|==========================================|
|                Unit Tests                |
|==========================================|
\******************************************/
