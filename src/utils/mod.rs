pub mod perft;
pub mod prng;

pub use perft::perft;
