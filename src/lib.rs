//! # raychess
//!
//! A chess position and rules engine built on precomputed per-square ray
//! geometry: attack detection, legal move generation, reversible move
//! application and terminal-state classification.
pub mod board;
pub mod core;
pub mod geometry;
pub mod utils;

pub use board::{
    Board, FenParseError, GameStatus, IllegalMoveError, MoveList, RepetitionHistory,
    RepetitionTable, UndoState,
};
pub use crate::core::*;
