use std::fmt;

use super::attacks;
use super::bitboard::{flip_bb, lsb, ne, nw, se, sw};
use super::moves::{Move, MoveList, Piece};
use super::movegen::generate;
use crate::error::MoveError;

/// Board state, always seen from the side to move: `colour[0]` is the mover,
/// `colour[1]` the opponent, and the mover's pawns always advance towards rank 8.
/// `flipped` records whether the real board is mirrored (black to move).
///
/// Castling rights are `[ours kingside, ours queenside, theirs kingside, theirs queenside]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub pieces: [u64; 6],
    pub colour: [u64; 2],
    pub ep: u64,
    pub castling: [bool; 4],
    pub flipped: bool,
}

impl Default for Position {
    fn default() -> Self { Self::startpos() }
}

impl Position {
    pub fn startpos() -> Self {
        Self {
            pieces: [
                0x00FF_0000_0000_FF00,
                0x4200_0000_0000_0042,
                0x2400_0000_0000_0024,
                0x8100_0000_0000_0081,
                0x0800_0000_0000_0008,
                0x1000_0000_0000_0010,
            ],
            colour: [0xFFFF, 0xFFFF_0000_0000_0000],
            ep: 0,
            castling: [true; 4],
            flipped: false,
        }
    }

    /// Empty board, white to move. Used by FEN parsing.
    pub fn empty() -> Self {
        Self { pieces: [0; 6], colour: [0; 2], ep: 0, castling: [false; 4], flipped: false }
    }

    #[inline]
    pub fn occupied(&self) -> u64 { self.colour[0] | self.colour[1] }

    #[inline]
    pub fn ours(&self, piece: Piece) -> u64 { self.colour[0] & self.pieces[piece.index()] }

    #[inline]
    pub fn theirs(&self, piece: Piece) -> u64 { self.colour[1] & self.pieces[piece.index()] }

    pub fn piece_on(&self, sq: u8) -> Option<Piece> {
        let bit = 1u64 << sq;
        Piece::ALL.into_iter().find(|p| self.pieces[p.index()] & bit != 0)
    }

    /// Mirror ranks, swap colours and castling rights: hands the move to the other side.
    pub fn flip(&mut self) {
        for bb in self.pieces.iter_mut() {
            *bb = flip_bb(*bb);
        }
        self.colour = [flip_bb(self.colour[1]), flip_bb(self.colour[0])];
        self.ep = flip_bb(self.ep);
        self.castling.swap(0, 2);
        self.castling.swap(1, 3);
        self.flipped = !self.flipped;
    }

    /// Is `sq` attacked by `colour[them]`?
    pub fn is_attacked(&self, sq: u8, them: usize) -> bool {
        let bb = 1u64 << sq;
        let theirs = self.colour[them];
        let pawns = theirs & self.pieces[Piece::Pawn.index()];
        let pawn_attacks = if them == 1 { sw(pawns) | se(pawns) } else { nw(pawns) | ne(pawns) };
        if pawn_attacks & bb != 0 {
            return true;
        }
        let blockers = self.occupied();
        let diag = self.pieces[Piece::Bishop.index()] | self.pieces[Piece::Queen.index()];
        let straight = self.pieces[Piece::Rook.index()] | self.pieces[Piece::Queen.index()];
        attacks::knight(sq) & theirs & self.pieces[Piece::Knight.index()] != 0
            || attacks::bishop(sq, blockers) & theirs & diag != 0
            || attacks::rook(sq, blockers) & theirs & straight != 0
            || attacks::king(sq) & theirs & self.pieces[Piece::King.index()] != 0
    }

    /// Is the side to move in check?
    pub fn in_check(&self) -> bool {
        let king = self.ours(Piece::King);
        king != 0 && self.is_attacked(lsb(king), 1)
    }

    /// Plays `mv` and flips the board. Returns false when the mover left its own
    /// king attacked; the position is still updated and should be discarded.
    pub fn apply(&mut self, mv: &Move) -> bool {
        let from = 1u64 << mv.from;
        let to = 1u64 << mv.to;
        let mask = from | to;
        debug_assert_eq!(mv.takes, self.piece_on(mv.to));
        let piece = match self.piece_on(mv.from) {
            Some(p) => p,
            None => {
                debug_assert!(false, "no piece on {}", mv.from);
                self.flip();
                return false;
            }
        };

        if let Some(taken) = mv.takes {
            self.colour[1] ^= to;
            self.pieces[taken.index()] ^= to;
        }

        if piece == Piece::King {
            let rook = match mv.to as i32 - mv.from as i32 {
                2 => 0xA0,
                -2 => 0x09,
                _ => 0,
            };
            self.colour[0] ^= rook;
            self.pieces[Piece::Rook.index()] ^= rook;
        }

        self.colour[0] ^= mask;
        self.pieces[piece.index()] ^= mask;

        if piece == Piece::Pawn && to == self.ep {
            self.colour[1] ^= to >> 8;
            self.pieces[Piece::Pawn.index()] ^= to >> 8;
        }
        self.ep = 0;

        if piece == Piece::Pawn && mv.to as i32 - mv.from as i32 == 16 {
            self.ep = to >> 8;
        }

        if let Some(promo) = mv.promo {
            self.pieces[Piece::Pawn.index()] ^= to;
            self.pieces[promo.index()] ^= to;
        }

        // Touching a king or rook home square kills the matching rights.
        if mask & 0x9000_0000_0000_0000 != 0 { self.castling[2] = false; }
        if mask & 0x1100_0000_0000_0000 != 0 { self.castling[3] = false; }
        if mask & 0x90 != 0 { self.castling[0] = false; }
        if mask & 0x11 != 0 { self.castling[1] = false; }

        self.flip();

        debug_assert!(self.is_consistent());

        let king = self.theirs(Piece::King);
        king == 0 || !self.is_attacked(lsb(king), 0)
    }

    /// Colour sets disjoint, piece sets pairwise disjoint, and both unions equal.
    pub fn is_consistent(&self) -> bool {
        if self.colour[0] & self.colour[1] != 0 {
            return false;
        }
        let mut union = 0u64;
        for bb in self.pieces {
            if union & bb != 0 {
                return false;
            }
            union |= bb;
        }
        union == self.occupied() && self.ep.count_ones() <= 1
    }

    /// Fully legal moves, for the protocol layer and tests. The search works on pseudo-legal lists.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut list = MoveList::new();
        generate(self, &mut list, false);
        list.iter()
            .copied()
            .filter(|m| {
                let mut child = *self;
                child.apply(m)
            })
            .collect()
    }

    pub fn is_legal(&self, mv: &Move) -> bool {
        let mut list = MoveList::new();
        generate(self, &mut list, false);
        list.contains(mv) && {
            let mut child = *self;
            child.apply(mv)
        }
    }

    /// Finds the legal move whose long algebraic form (in real-board coordinates) is `uci`.
    pub fn find_uci_move(&self, uci: &str) -> Result<Move, MoveError> {
        if !(4..=5).contains(&uci.len()) || !uci.is_ascii() {
            return Err(MoveError::Malformed(uci.to_string()));
        }
        self.legal_moves()
            .into_iter()
            .find(|m| m.to_uci(self.flipped) == uci)
            .ok_or_else(|| MoveError::NotFound(uci.to_string()))
    }

    pub fn make_move_uci(&mut self, uci: &str) -> Result<Move, MoveError> {
        let mv = self.find_uci_move(uci)?;
        self.apply(&mv);
        Ok(mv)
    }

    pub fn set_from_start_and_moves<S: AsRef<str>>(moves: &[S]) -> Result<Self, MoveError> {
        let mut pos = Self::startpos();
        for m in moves {
            pos.make_move_uci(m.as_ref())?;
        }
        Ok(pos)
    }

    /// Is black on move in the real game?
    pub fn black_to_move(&self) -> bool { self.flipped }

    /// Raw bytes fed to the hasher: every field at a fixed offset, padding zeroed.
    ///
    /// Flags and ep lead and the colour sets trail. The last 16 bytes are only
    /// partly mixed into the low half of the digest, and `colour[1]` is implied
    /// by the piece sets and `colour[0]`.
    pub fn to_bytes(&self) -> [u8; 80] {
        let mut out = [0u8; 80];
        for (i, &c) in self.castling.iter().enumerate() {
            out[i] = c as u8;
        }
        out[4] = self.flipped as u8;
        let words = std::iter::once(&self.ep).chain(self.pieces.iter()).chain(self.colour.iter());
        for (i, w) in words.enumerate() {
            out[8 + i * 8..16 + i * 8].copy_from_slice(&w.to_le_bytes());
        }
        out
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut white = *self;
        if white.flipped {
            white.flip();
        }
        for rank in (0..8u8).rev() {
            for file in 0..8u8 {
                let sq = rank * 8 + file;
                let bit = 1u64 << sq;
                let c = match white.piece_on(sq) {
                    Some(p) if white.colour[0] & bit != 0 => p.letter().to_ascii_uppercase(),
                    Some(p) => p.letter(),
                    None => '.',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        let mut score = crate::search::eval::evaluate(self);
        if self.flipped {
            score = -score;
        }
        writeln!(f)?;
        writeln!(f, "Turn: {}", if self.flipped { "Black" } else { "White" })?;
        writeln!(f, "Eval: {}", score)?;
        write!(f, "Fen: {}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_flip_is_identity() {
        let p = Position::startpos();
        let mut q = p;
        q.flip();
        assert_ne!(p, q);
        q.flip();
        assert_eq!(p, q);
    }

    #[test]
    fn startpos_is_symmetric_after_flip() {
        let mut p = Position::startpos();
        p.flip();
        assert_eq!(p.pieces, Position::startpos().pieces);
        assert_eq!(p.colour, Position::startpos().colour);
        assert!(p.flipped);
    }

    #[test]
    fn double_push_sets_ep_from_opponent_view() {
        let mut p = Position::startpos();
        let mv = p.find_uci_move("e2e4").unwrap();
        assert!(p.apply(&mv));
        // e3 seen from black's side is e6
        assert_eq!(p.ep, 1u64 << 44);
        let reply = p.find_uci_move("d7d5").unwrap();
        assert!(p.apply(&reply));
        assert_eq!(p.ep, 1u64 << 43);
    }
}
