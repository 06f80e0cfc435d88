//! Attack generation.
//!
//! Sliders use the hyperbola-quintessence identity: for a line mask that
//! excludes the origin, `(o - r) ^ rev(rev(o) - rev(r))` restricted to the mask
//! gives the attacked squares up to and including the first blocker in both
//! directions. Byte reversal is only a line reversal for files and diagonals,
//! so ranks are ray-cast instead.

use std::sync::OnceLock;

use super::bitboard::{flip_bb, shift, FILE_A, FILE_H};

fn xattack(sq: u8, blockers: u64, dir_mask: u64) -> u64 {
    let o = blockers & dir_mask;
    let r = 1u64 << sq;
    dir_mask & (o.wrapping_sub(r) ^ flip_bb(flip_bb(o).wrapping_sub(flip_bb(r))))
}

/// Up to seven steps from `sq` in one direction, stopping after a blocker.
fn ray(sq: u8, blockers: u64, by: i32, mask: u64) -> u64 {
    let mut result = shift(1u64 << sq, by, mask);
    for _ in 0..6 {
        result |= shift(result & !blockers, by, mask);
    }
    result
}

static DIAG_MASKS: OnceLock<[u64; 64]> = OnceLock::new();

fn diag_masks() -> &'static [u64; 64] {
    DIAG_MASKS.get_or_init(|| {
        let mut t = [0u64; 64];
        for (sq, m) in t.iter_mut().enumerate() {
            let sq = sq as u8;
            *m = ray(sq, 0, 9, !FILE_A) | ray(sq, 0, -9, !FILE_H);
        }
        t
    })
}

/// Builds the diagonal mask table up front so the first search doesn't pay for it.
pub fn init() {
    let _ = diag_masks();
}

pub fn bishop(sq: u8, blockers: u64) -> u64 {
    let masks = diag_masks();
    xattack(sq, blockers, masks[sq as usize])
        | xattack(sq, blockers, flip_bb(masks[(sq ^ 56) as usize]))
}

pub fn rook(sq: u8, blockers: u64) -> u64 {
    let file = (1u64 << sq) ^ (FILE_A << (sq % 8));
    xattack(sq, blockers, file)
        | ray(sq, blockers, 1, !FILE_A)
        | ray(sq, blockers, -1, !FILE_H)
}

pub fn knight(sq: u8) -> u64 {
    let bb = 1u64 << sq;
    ((bb << 15 | bb >> 17) & !FILE_H)
        | ((bb << 17 | bb >> 15) & !FILE_A)
        | ((bb << 10 | bb >> 6) & 0xFCFC_FCFC_FCFC_FCFC)
        | ((bb << 6 | bb >> 10) & 0x3F3F_3F3F_3F3F_3F3F)
}

pub fn king(sq: u8) -> u64 {
    let bb = 1u64 << sq;
    bb << 8
        | bb >> 8
        | ((bb >> 1 | bb >> 9 | bb << 7) & !FILE_H)
        | ((bb << 1 | bb << 9 | bb >> 7) & !FILE_A)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Slow reference: walk each direction square by square.
    fn walk(sq: u8, blockers: u64, dirs: &[(i32, i32)]) -> u64 {
        let mut out = 0;
        for &(df, dr) in dirs {
            let (mut f, mut r) = ((sq % 8) as i32, (sq / 8) as i32);
            loop {
                f += df;
                r += dr;
                if !(0..8).contains(&f) || !(0..8).contains(&r) { break; }
                let bit = 1u64 << (r * 8 + f);
                out |= bit;
                if blockers & bit != 0 { break; }
            }
        }
        out
    }

    #[test]
    fn sliders_match_reference_walk() {
        let occupancies = [0u64, 0x0000_0042_1800_2400, 0xFFFF_0000_0000_FFFF, 0x8142_2418_1824_4281, 0x00AA_5500_0055_AA00];
        for &occ in &occupancies {
            for sq in 0..64u8 {
                let rook_ref = walk(sq, occ, &[(1, 0), (-1, 0), (0, 1), (0, -1)]);
                let bishop_ref = walk(sq, occ, &[(1, 1), (-1, 1), (1, -1), (-1, -1)]);
                assert_eq!(rook(sq, occ), rook_ref, "rook sq {} occ {:#x}", sq, occ);
                assert_eq!(bishop(sq, occ), bishop_ref, "bishop sq {} occ {:#x}", sq, occ);
            }
        }
    }

    #[test]
    fn leapers_count() {
        assert_eq!(knight(0).count_ones(), 2);
        assert_eq!(knight(27).count_ones(), 8);
        assert_eq!(king(0).count_ones(), 3);
        assert_eq!(king(63).count_ones(), 3);
        assert_eq!(king(36).count_ones(), 8);
    }
}
