//! Position fingerprint: AES rounds keyed by consecutive 16-byte slices of the
//! position, plus one self-keyed round for avalanche.
//!
//! `aes::hazmat::cipher_round` picks AES-NI / ARMv8 AES at runtime and falls
//! back to a constant-time software round elsewhere.

use aes::hazmat::cipher_round;
use aes::Block;

use crate::board::Position;

pub fn compute(pos: &Position) -> u64 {
    let bytes = pos.to_bytes();
    let mut state = Block::default();
    for chunk in bytes.chunks_exact(16) {
        let key = Block::clone_from_slice(chunk);
        cipher_round(&mut state, &key);
    }
    let key = state;
    cipher_round(&mut state, &key);

    let mut out = [0u8; 8];
    out.copy_from_slice(&state[..8]);
    u64::from_le_bytes(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_board_same_hash() {
        let a = Position::startpos();
        let b = Position::from_fen(crate::board::fen::START_FEN).unwrap();
        assert_eq!(compute(&a), compute(&b));
    }

    #[test]
    fn every_field_feeds_the_hash() {
        let base = Position::startpos();
        let h = compute(&base);

        let mut p = base;
        p.flipped = true;
        assert_ne!(compute(&p), h);

        for i in 0..4 {
            let mut p = base;
            p.castling[i] = false;
            assert_ne!(compute(&p), h, "castling right {}", i);
        }

        let mut p = base;
        p.ep = 1u64 << 44;
        assert_ne!(compute(&p), h);
    }
}
