//! Direct-mapped transposition table.
//!
//! Slot = key mod capacity; the slot keeps only a 16-bit tag (key / capacity),
//! so distinct positions can alias. Writes always replace.

use log::info;

use crate::board::Move;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Bound {
    #[default]
    Upper,
    Lower,
    Exact,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    pub best: Option<Move>,
    pub tag: u16,
    pub score: i16,
    pub depth: i8,
    pub bound: Bound,
}

pub const DEFAULT_MB: usize = 64;

pub struct Tt {
    entries: Vec<Entry>,
}

impl Default for Tt {
    fn default() -> Self { Self::with_capacity_mb(DEFAULT_MB) }
}

impl Tt {
    pub fn with_capacity_entries(cap: usize) -> Self {
        Self { entries: vec![Entry::default(); cap.max(1)] }
    }

    pub fn with_capacity_mb(mb: usize) -> Self {
        let entries = (mb.max(1) * 1024 * 1024) / std::mem::size_of::<Entry>();
        info!("transposition table: {} MiB, {} entries", mb.max(1), entries);
        Self::with_capacity_entries(entries)
    }

    pub fn capacity(&self) -> usize { self.entries.len() }

    pub fn clear(&mut self) {
        self.entries.fill(Entry::default());
    }

    #[inline]
    fn slot(&self, key: u64) -> (usize, u16) {
        let len = self.entries.len() as u64;
        ((key % len) as usize, (key / len) as u16)
    }

    /// Entry whose tag matches `key`, if any.
    pub fn probe(&self, key: u64) -> Option<Entry> {
        let (idx, tag) = self.slot(key);
        let e = self.entries[idx];
        (e.tag == tag).then_some(e)
    }

    pub fn store(&mut self, key: u64, best: Option<Move>, score: i32, depth: i32, bound: Bound) {
        let (idx, tag) = self.slot(key);
        self.entries[idx] = Entry {
            best,
            tag,
            score: score.clamp(i16::MIN as i32, i16::MAX as i32) as i16,
            depth: depth.clamp(i8::MIN as i32, i8::MAX as i32) as i8,
            bound,
        };
    }
}
