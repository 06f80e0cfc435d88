use crate::board::Move;

/// Bonus cap; keeps the gravity update inside [-HISTORY_MAX, HISTORY_MAX].
const HISTORY_MAX: i32 = 1024;

/// Quiet-move ordering statistic indexed by [side parity][captured kind + 1][from][to].
pub struct History {
    table: Vec<i32>,
}

impl Default for History {
    fn default() -> Self { Self { table: vec![0; 2 * 7 * 64 * 64] } }
}

impl History {
    pub fn clear(&mut self) { self.table.fill(0); }

    #[inline]
    fn index(flipped: bool, mv: &Move) -> usize {
        let takes = mv.takes.map_or(0, |p| p.index() + 1);
        (((flipped as usize * 7 + takes) * 64 + mv.from as usize) * 64) + mv.to as usize
    }

    #[inline]
    pub fn get(&self, flipped: bool, mv: &Move) -> i32 { self.table[Self::index(flipped, mv)] }

    /// Cutoff move: pull towards +HISTORY_MAX by depth².
    pub fn reward(&mut self, flipped: bool, mv: &Move, depth: i32) {
        let bonus = (depth * depth).min(HISTORY_MAX);
        let h = &mut self.table[Self::index(flipped, mv)];
        *h += bonus - bonus * *h / HISTORY_MAX;
    }

    /// Move tried before the cutoff: pull towards -HISTORY_MAX by depth².
    pub fn penalize(&mut self, flipped: bool, mv: &Move, depth: i32) {
        let bonus = (depth * depth).min(HISTORY_MAX);
        let h = &mut self.table[Self::index(flipped, mv)];
        *h -= bonus + bonus * *h / HISTORY_MAX;
    }
}
