//! Per-ply search scratch. Fingerprints live at `game_len + ply` so the played
//! game sits in front of the live search path and repetition checks see both.

use crate::board::{Move, MoveList};

pub const MAX_PLY: usize = 96;
pub const STACK_LEN: usize = 1024;

#[derive(Clone, Default)]
pub struct StackEntry {
    pub moves: MoveList,
    pub best_move: Option<Move>,
    pub killer: Option<Move>,
    pub position_hash: u64,
}

pub struct SearchStack {
    entries: Vec<StackEntry>,
    game_len: usize,
}

impl Default for SearchStack {
    fn default() -> Self { Self { entries: vec![StackEntry::default(); STACK_LEN], game_len: 0 } }
}

impl SearchStack {
    #[inline]
    pub fn entry(&self, ply: usize) -> &StackEntry { &self.entries[ply] }

    #[inline]
    pub fn entry_mut(&mut self, ply: usize) -> &mut StackEntry { &mut self.entries[ply] }

    /// Loads fingerprints of positions already played (oldest first). Only the
    /// most recent ones that fit ahead of the search window are kept.
    pub fn set_game_history(&mut self, hashes: &[u64]) {
        let keep = hashes.len().min(STACK_LEN - MAX_PLY);
        let recent = &hashes[hashes.len() - keep..];
        for (e, &h) in self.entries.iter_mut().zip(recent) {
            e.position_hash = h;
        }
        self.game_len = keep;
    }

    pub fn game_len(&self) -> usize { self.game_len }

    #[inline]
    pub fn record(&mut self, ply: usize, hash: u64) {
        self.entries[self.game_len + ply].position_hash = hash;
    }

    /// Same-side positions earlier on the path or in the game.
    pub fn is_repetition(&self, ply: usize, hash: u64) -> bool {
        let cur = self.game_len + ply;
        (0..cur).rev().skip(1).step_by(2).any(|i| self.entries[i].position_hash == hash)
    }

    /// New game: forget killers and game history.
    pub fn reset(&mut self) {
        for e in self.entries.iter_mut() {
            e.killer = None;
            e.best_move = None;
            e.position_hash = 0;
        }
        self.game_len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repetition_only_matches_same_parity() {
        let mut s = SearchStack::default();
        s.set_game_history(&[11, 22, 33]);
        s.record(0, 44);
        s.record(1, 55);
        // ply 2 sits at index 5; same-side entries are 3 (ply 0) and 1
        assert!(s.is_repetition(2, 44));
        assert!(s.is_repetition(2, 22));
        assert!(!s.is_repetition(2, 11));
        assert!(!s.is_repetition(2, 55));
        assert!(!s.is_repetition(2, 33));
    }

    #[test]
    fn long_history_is_truncated() {
        let mut s = SearchStack::default();
        let hashes: Vec<u64> = (1..=2000).collect();
        s.set_game_history(&hashes);
        assert_eq!(s.game_len(), STACK_LEN - MAX_PLY);
        // ply 1 is the side that made the last game move
        assert!(s.is_repetition(1, 2000));
        assert!(!s.is_repetition(1, 1999));
    }
}
