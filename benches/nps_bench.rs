use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fourk::board::Position;
use fourk::search::{SearchParams, Searcher};
use std::time::{Duration, Instant};

const POSITIONS: [(&str, &str); 3] = [
    ("startpos", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
    ("kiwipete", "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"),
    ("endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1"),
];

fn run_once_nodes(s: &mut Searcher, pos: &Position, movetime_ms: u64) -> (u64, Duration) {
    s.new_game();
    let t0 = Instant::now();
    let r = s.search_with_params(pos, SearchParams::fixed_time(Duration::from_millis(movetime_ms)));
    (r.nodes, t0.elapsed())
}

fn bench_nps(c: &mut Criterion) {
    let mut group = c.benchmark_group("nps");
    group.sample_size(10);
    let mut s = Searcher::with_hash_mb(64);
    for (name, fen) in POSITIONS {
        let pos = Position::from_fen(fen).expect("bench fen");
        group.bench_function(format!("nps_{}", name), |ben| {
            ben.iter(|| {
                let (nodes, dt) = run_once_nodes(&mut s, black_box(&pos), 100);
                let nps = if dt.as_secs_f64() > 0.0 { nodes as f64 / dt.as_secs_f64() } else { 0.0 };
                // Criterion reports wall time; print the node rate alongside.
                println!("{}: nodes={}, elapsed={:.3} s, nps={:.1}", name, nodes, dt.as_secs_f64(), nps);
                black_box(nps)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nps);
criterion_main!(benches);
