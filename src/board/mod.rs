pub mod attacks;
pub mod bitboard;
pub mod fen;
pub mod movegen;
pub mod moves;
pub mod position;

pub use moves::{Move, MoveList, Piece, MAX_MOVES};
pub use position::Position;
