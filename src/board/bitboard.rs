//! Bit-level helpers over 64-bit square sets (a1 = bit 0, h8 = bit 63).

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = 0x8080_8080_8080_8080;
pub const RANK_2: u64 = 0x0000_0000_0000_FF00;
pub const RANK_8: u64 = 0xFF00_0000_0000_0000;

/// Mirrors the board vertically (rank 1 <-> rank 8).
#[inline]
pub fn flip_bb(bb: u64) -> u64 {
    bb.swap_bytes()
}

#[inline]
pub fn lsb(bb: u64) -> u8 {
    bb.trailing_zeros() as u8
}

#[inline]
pub fn count(bb: u64) -> u32 {
    bb.count_ones()
}

/// Shift by a signed amount and keep only the squares in `mask`.
#[inline]
pub fn shift(bb: u64, by: i32, mask: u64) -> u64 {
    if by > 0 { (bb << by) & mask } else { (bb >> -by) & mask }
}

#[inline]
pub fn west(bb: u64) -> u64 { (bb >> 1) & !FILE_H }

#[inline]
pub fn east(bb: u64) -> u64 { (bb << 1) & !FILE_A }

#[inline]
pub fn north(bb: u64) -> u64 { bb << 8 }

#[inline]
pub fn south(bb: u64) -> u64 { bb >> 8 }

#[inline]
pub fn nw(bb: u64) -> u64 { shift(bb, 7, !FILE_H) }

#[inline]
pub fn ne(bb: u64) -> u64 { east(north(bb)) }

#[inline]
pub fn sw(bb: u64) -> u64 { west(south(bb)) }

#[inline]
pub fn se(bb: u64) -> u64 { east(south(bb)) }

/// Iterates the set squares of a bitboard, lowest first.
pub struct Squares(pub u64);

impl Iterator for Squares {
    type Item = u8;

    #[inline]
    fn next(&mut self) -> Option<u8> {
        if self.0 == 0 { return None; }
        let sq = lsb(self.0);
        self.0 &= self.0 - 1;
        Some(sq)
    }
}
