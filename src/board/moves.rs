#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    pub const ALL: [Piece; 6] = [Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King];
    /// Promotion choices, in generation order.
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    #[inline]
    pub fn index(self) -> usize { self as usize }

    pub fn letter(self) -> char {
        match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        }
    }

    pub fn from_letter(c: char) -> Option<Piece> {
        match c.to_ascii_lowercase() {
            'p' => Some(Piece::Pawn),
            'n' => Some(Piece::Knight),
            'b' => Some(Piece::Bishop),
            'r' => Some(Piece::Rook),
            'q' => Some(Piece::Queen),
            'k' => Some(Piece::King),
            _ => None,
        }
    }
}

/// A move in side-to-move coordinates. `takes` must equal the piece on `to`
/// when the move is applied (`None` for quiet moves and en passant).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8,
    pub to: u8,
    pub promo: Option<Piece>,
    pub takes: Option<Piece>,
}

impl Move {
    pub fn new(from: u8, to: u8, promo: Option<Piece>, takes: Option<Piece>) -> Self {
        Self { from, to, promo, takes }
    }

    #[inline]
    pub fn is_capture(&self) -> bool { self.takes.is_some() }

    /// Long algebraic notation; `flipped` restores the real ranks when black is on move.
    pub fn to_uci(&self, flipped: bool) -> String {
        let flip = if flipped { 7 } else { 0 };
        let mut s = String::with_capacity(5);
        for sq in [self.from, self.to] {
            s.push((b'a' + sq % 8) as char);
            s.push((b'1' + ((sq / 8) ^ flip)) as char);
        }
        if let Some(p) = self.promo { s.push(p.letter()); }
        s
    }
}

/// Upper bound on pseudo-legal moves in any reachable position (218 legal, plus headroom).
pub const MAX_MOVES: usize = 256;

/// Fixed-capacity move buffer, reused per ply.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    len: usize,
}

impl Default for MoveList {
    fn default() -> Self { Self { moves: [Move::default(); MAX_MOVES], len: 0 } }
}

impl MoveList {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn clear(&mut self) { self.len = 0; }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.len < MAX_MOVES);
        self.moves[self.len] = mv;
        self.len += 1;
    }

    #[inline]
    pub fn len(&self) -> usize { self.len }

    #[inline]
    pub fn is_empty(&self) -> bool { self.len == 0 }

    #[inline]
    pub fn swap(&mut self, a: usize, b: usize) { self.moves[..self.len].swap(a, b); }

    pub fn as_slice(&self) -> &[Move] { &self.moves[..self.len] }

    pub fn iter(&self) -> std::slice::Iter<'_, Move> { self.as_slice().iter() }

    pub fn contains(&self, mv: &Move) -> bool { self.as_slice().contains(mv) }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    fn index(&self, i: usize) -> &Move { &self.as_slice()[i] }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_string_respects_orientation() {
        let m = Move::new(12, 28, None, None);
        assert_eq!(m.to_uci(false), "e2e4");
        assert_eq!(m.to_uci(true), "e7e5");
        let p = Move::new(52, 60, Some(Piece::Knight), None);
        assert_eq!(p.to_uci(false), "e7e8n");
        assert_eq!(p.to_uci(true), "e2e1n");
    }

    #[test]
    fn equality_is_structural() {
        let a = Move::new(1, 18, None, None);
        let b = Move::new(1, 18, None, Some(Piece::Pawn));
        assert_ne!(a, b);
        assert_eq!(a, Move::new(1, 18, None, None));
    }
}
