// Core module exports

// Board representation value types
pub mod macros;
pub mod moves;
pub mod piece;
pub mod square;
pub mod types;

// Re-export common types for easier access
pub use moves::{Move, MoveFlag};
pub use piece::{Piece, PieceType};
pub use square::{Direction, File, Rank, Square};
pub use types::{Castling, Colour};
