#![allow(dead_code)]

use fourk::board::Position;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Positions visited by uniformly random games from the start position. A
/// game restarts when it ends or gets long.
pub fn random_positions(seed: u64, count: usize) -> Vec<Position> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(count);
    let mut pos = Position::startpos();
    let mut plies = 0;
    while out.len() < count {
        let moves = pos.legal_moves();
        if moves.is_empty() || plies >= 200 {
            pos = Position::startpos();
            plies = 0;
            continue;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        pos.apply(&mv);
        plies += 1;
        out.push(pos);
    }
    out
}

/// Same position with colours swapped and the other side to move.
pub fn mirror_fen(fen: &str) -> String {
    let f: Vec<&str> = fen.split_whitespace().collect();
    let swap = |s: &str| -> String {
        s.chars()
            .map(|c| if c.is_ascii_uppercase() { c.to_ascii_lowercase() } else { c.to_ascii_uppercase() })
            .collect()
    };
    let board = f[0].split('/').rev().map(swap).collect::<Vec<_>>().join("/");
    let side = if f[1] == "w" { "b" } else { "w" };
    let castling = if f[2] == "-" {
        "-".to_string()
    } else {
        let mut c: Vec<char> = swap(f[2]).chars().collect();
        c.sort_by_key(|c| "KQkq".find(*c));
        c.into_iter().collect()
    };
    let ep = match f[3] {
        "-" => "-".to_string(),
        sq if sq.ends_with('3') => format!("{}6", &sq[..1]),
        sq => format!("{}3", &sq[..1]),
    };
    format!("{} {} {} {} 0 1", board, side, castling, ep)
}
