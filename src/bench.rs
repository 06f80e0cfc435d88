//! Fixed-depth search from the start position: a deterministic speed and
//! sanity check.

use serde::Serialize;
use std::time::Instant;

use crate::board::Position;
use crate::search::{SearchParams, Searcher};

pub const BENCH_DEPTH: u32 = 12;

#[derive(Debug, Clone, Serialize)]
pub struct BenchReport {
    pub depth: u32,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub nps: u64,
    pub bestmove: Option<String>,
    pub score_cp: i32,
}

/// Runs on a cleared table so repeated runs count the same nodes.
pub fn run(searcher: &mut Searcher, depth: u32) -> BenchReport {
    searcher.new_game();
    let pos = Position::startpos();
    let t0 = Instant::now();
    let res = searcher.search_with_params(&pos, SearchParams::fixed_depth(depth));
    let elapsed_ms = t0.elapsed().as_millis() as u64;
    let nps = if elapsed_ms > 0 { res.nodes * 1000 / elapsed_ms } else { 0 };
    BenchReport { depth, nodes: res.nodes, elapsed_ms, nps, bestmove: res.bestmove, score_cp: res.score_cp }
}
