//! Bitboard chess engine: perspective-flipping board, pseudo-legal move
//! generation, AES-round hashing and an iterative-deepening alpha-beta search.
pub mod bench;
pub mod board;
pub mod error;
pub mod perft;
pub mod search;
pub mod uci;
