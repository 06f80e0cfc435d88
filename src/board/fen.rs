use super::bitboard::{ne, nw};
use super::moves::Piece;
use super::position::Position;
use crate::error::FenError;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn parse_square(s: &str) -> Option<u8> {
    let b = s.as_bytes();
    if b.len() != 2 { return None; }
    let (f, r) = (b[0], b[1]);
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) { return None; }
    Some((r - b'1') * 8 + (f - b'a'))
}

fn square_name(sq: u8) -> String {
    format!("{}{}", (b'a' + sq % 8) as char, (b'1' + sq / 8) as char)
}

impl Position {
    /// Parses a FEN string. Black to move yields a flipped position. The move
    /// counters are accepted but not kept.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(FenError::FieldCount(fields.len()));
        }

        let mut pos = Position::empty();
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }
        for (i, row) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file = 0usize;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let piece = Piece::from_letter(c).ok_or(FenError::PieceLetter(c))?;
                if file >= 8 {
                    return Err(FenError::RankLength { rank: rank as usize + 1, files: file + 1 });
                }
                let bit = 1u64 << (rank * 8 + file as u8);
                pos.pieces[piece.index()] |= bit;
                pos.colour[if c.is_ascii_uppercase() { 0 } else { 1 }] |= bit;
                file += 1;
            }
            if file != 8 {
                return Err(FenError::RankLength { rank: rank as usize + 1, files: file });
            }
        }

        let black = match fields[1] {
            "w" => false,
            "b" => true,
            other => return Err(FenError::SideToMove(other.to_string())),
        };

        if fields[2] != "-" {
            for c in fields[2].chars() {
                let (idx, king_home, rook_home) = match c {
                    'K' => (0, 4, 7),
                    'Q' => (1, 4, 0),
                    'k' => (2, 60, 63),
                    'q' => (3, 60, 56),
                    other => return Err(FenError::Castling(other)),
                };
                let side = if idx < 2 { 0 } else { 1 };
                let king = pos.colour[side] & pos.pieces[Piece::King.index()];
                let rook = pos.colour[side] & pos.pieces[Piece::Rook.index()];
                pos.castling[idx] = king & (1u64 << king_home) != 0 && rook & (1u64 << rook_home) != 0;
            }
        }

        if fields[3] != "-" {
            let sq = parse_square(fields[3]).ok_or_else(|| FenError::EnPassant(fields[3].to_string()))?;
            let expected_rank = if black { 2 } else { 5 };
            if sq / 8 != expected_rank {
                return Err(FenError::EnPassant(fields[3].to_string()));
            }
            // The pawn that just double-pushed stands one rank past the square.
            let (victim, victim_side) = if black { (sq + 8, 0) } else { (sq - 8, 1) };
            let victim_pawn = pos.colour[victim_side] & pos.pieces[Piece::Pawn.index()] & (1u64 << victim) != 0;
            let square_empty = pos.occupied() & (1u64 << sq) == 0;
            if !victim_pawn || !square_empty {
                return Err(FenError::EnPassant(fields[3].to_string()));
            }
            pos.ep = 1u64 << sq;
        }

        if black {
            pos.flip();
        }
        Ok(pos)
    }

    pub fn to_fen(&self) -> String {
        let our_pawns = self.ours(Piece::Pawn);
        let ep_capturable = self.ep & (nw(our_pawns) | ne(our_pawns)) != 0;

        let mut white = *self;
        if white.flipped {
            white.flip();
        }

        let mut out = String::with_capacity(90);
        for rank in (0..8u8).rev() {
            let mut empty = 0;
            for file in 0..8u8 {
                let sq = rank * 8 + file;
                match white.piece_on(sq) {
                    Some(p) => {
                        if empty > 0 {
                            out.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        let c = p.letter();
                        out.push(if white.colour[0] & (1u64 << sq) != 0 { c.to_ascii_uppercase() } else { c });
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push_str(if self.flipped { " b " } else { " w " });
        let rights: String = ['K', 'Q', 'k', 'q']
            .iter()
            .zip(white.castling.iter())
            .filter(|(_, on)| **on)
            .map(|(&c, _)| c)
            .collect();
        out.push_str(if rights.is_empty() { "-" } else { &rights });
        out.push(' ');
        if ep_capturable && white.ep != 0 {
            out.push_str(&square_name(white.ep.trailing_zeros() as u8));
        } else {
            out.push('-');
        }
        out.push_str(" 0 1");
        out
    }
}
