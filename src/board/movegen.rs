//! Pseudo-legal move generation. King safety is left to `Position::apply`.

use super::attacks;
use super::bitboard::{ne, north, nw, Squares, RANK_2, RANK_8};
use super::moves::{Move, MoveList, Piece};
use super::position::Position;

fn push_pawn_moves(pos: &Position, list: &mut MoveList, targets: u64, offset: i32) {
    for to in Squares(targets) {
        let from = (to as i32 + offset) as u8;
        let takes = pos.piece_on(to);
        if to > 55 {
            for promo in Piece::PROMOTIONS {
                list.push(Move::new(from, to, Some(promo), takes));
            }
        } else {
            list.push(Move::new(from, to, None, takes));
        }
    }
}

fn mobility(pos: &Position, sq: u8, piece: Piece) -> u64 {
    let blockers = pos.occupied();
    match piece {
        Piece::Knight => attacks::knight(sq),
        Piece::Bishop => attacks::bishop(sq, blockers),
        Piece::Rook => attacks::rook(sq, blockers),
        Piece::Queen => attacks::bishop(sq, blockers) | attacks::rook(sq, blockers),
        Piece::King => attacks::king(sq),
        Piece::Pawn => 0,
    }
}

/// Fills `list` with pseudo-legal moves. With `captures_only`, quiet moves are
/// skipped except push-promotions.
pub fn generate(pos: &Position, list: &mut MoveList, captures_only: bool) {
    list.clear();
    let all = pos.occupied();
    let pawns = pos.ours(Piece::Pawn);
    let to_mask = if captures_only { pos.colour[1] } else { !pos.colour[0] };

    if !captures_only {
        let double = north(north(pawns & RANK_2) & !all) & !all;
        push_pawn_moves(pos, list, double, -16);
    }
    let push_mask = if captures_only { RANK_8 } else { !0 };
    let single = north(pawns) & !all & push_mask;
    push_pawn_moves(pos, list, single, -8);
    push_pawn_moves(pos, list, nw(pawns) & (pos.colour[1] | pos.ep), -7);
    push_pawn_moves(pos, list, ne(pawns) & (pos.colour[1] | pos.ep), -9);

    if pos.castling[0] && all & 0x60 == 0 && !pos.is_attacked(4, 1) && !pos.is_attacked(5, 1) {
        list.push(Move::new(4, 6, None, None));
    }
    if pos.castling[1] && all & 0x0E == 0 && !pos.is_attacked(4, 1) && !pos.is_attacked(3, 1) {
        list.push(Move::new(4, 2, None, None));
    }

    for piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King] {
        for from in Squares(pos.ours(piece)) {
            for to in Squares(mobility(pos, from, piece) & to_mask) {
                list.push(Move::new(from, to, None, pos.piece_on(to)));
            }
        }
    }
}
