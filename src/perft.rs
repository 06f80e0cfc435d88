use crate::board::movegen::generate;
use crate::board::{MoveList, Position};

/// Counts leaf nodes exactly `depth` plies below `pos`, copying the position per move.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let mut nodes = 0u64;
    let mut moves = MoveList::new();
    generate(pos, &mut moves, false);
    for m in &moves {
        let mut child = *pos;
        if !child.apply(m) { continue; }
        nodes += perft(&child, depth - 1);
    }
    nodes
}

/// Leaf counts per legal root move, in generation order.
pub fn divide(pos: &Position, depth: u32) -> Vec<(String, u64)> {
    pos.legal_moves()
        .into_iter()
        .map(|m| {
            let mut child = *pos;
            child.apply(&m);
            (m.to_uci(pos.flipped), perft(&child, depth.saturating_sub(1)))
        })
        .collect()
}
