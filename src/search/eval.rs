use crate::board::bitboard::{count, north, Squares, FILE_A};
use crate::board::{Piece, Position};

const MATERIAL: [i32; 6] = [78, 308, 319, 483, 966, 0];

// Piece-square bonuses split into a rank term and a file term.
#[rustfmt::skip]
const PST_RANK: [[i32; 8]; 6] = [
    [  0, -12, -14, -13,  -1,  40, 114,   0],
    [-36, -19,   1,  16,  28,  28,   8, -25],
    [-27,  -9,   3,  10,  15,  15,   3,  -9],
    [-11, -19, -19,  -9,   6,  15,  21,  16],
    [-21, -13,  -9,  -3,   6,  16,   6,  16],
    [-20, -12,  -5,   6,  18,  24,  13, -15],
];

#[rustfmt::skip]
const PST_FILE: [[i32; 8]; 6] = [
    [ -2,   2,  -5,  -2,   0,   5,  10,  -8],
    [-28,  -7,   6,  15,  14,  13,   1, -14],
    [-13,   0,   3,   5,   6,   1,   5,  -7],
    [ -2,   0,   3,   5,   4,   6,  -2, -14],
    [-22,  -9,   2,   6,   5,   6,   6,   6],
    [-13,   3,   1,   0,  -2,  -2,   6, -10],
];

/// Bonus when no friendly pawn stands ahead on the piece's file.
const OPEN_FILE: [i32; 6] = [27, -11, -7, 25, 5, -7];
const BISHOP_PAIR: i32 = 35;
const TEMPO: i32 = 16;

// Mate scoring helpers
pub const MATE_SCORE: i32 = 30_000;
pub const DRAW_SCORE: i32 = 0;
pub const INF: i32 = 32_000;

/// Scores beyond this are forced mates.
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_SCORE - 1000
}

/// Terms for the side to move only.
fn side_score(pos: &Position) -> i32 {
    let mut score = 0;
    if count(pos.ours(Piece::Bishop)) > 1 {
        score += BISHOP_PAIR;
    }
    let own_pawns = pos.ours(Piece::Pawn);
    for piece in Piece::ALL {
        let p = piece.index();
        for sq in Squares(pos.ours(piece)) {
            if north(FILE_A << sq) & own_pawns == 0 {
                score += OPEN_FILE[p];
            }
            score += MATERIAL[p];
            score += PST_RANK[p][(sq >> 3) as usize];
            score += PST_FILE[p][(sq & 7) as usize];
        }
    }
    score
}

/// Static evaluation in centipawns from the side to move's point of view.
pub fn evaluate(pos: &Position) -> i32 {
    let mut other = *pos;
    other.flip();
    TEMPO + side_score(pos) - side_score(&other)
}
