use anyhow::{Context, Result};
use clap::Parser;
use fourk::board::Position;
use fourk::search::{SearchParams, Searcher};
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(name = "fourk-bench", version, about = "Benchmark fourk search NPS")]
struct Args {
    /// FEN string or 'startpos'
    #[arg(long, default_value = "startpos")]
    fen: String,

    /// Movetime in milliseconds (ignored if depth is set)
    #[arg(long, default_value_t = 1000)]
    movetime: u64,

    /// Fixed search depth (overrides movetime when > 0)
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// Transposition table size in MB
    #[arg(long, default_value_t = 64)]
    hash_mb: usize,

    /// Emit one JSON object instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut s = Searcher::with_hash_mb(args.hash_mb);

    let pos = if args.fen == "startpos" {
        Position::startpos()
    } else {
        Position::from_fen(&args.fen).with_context(|| format!("invalid FEN '{}'", args.fen))?
    };
    let p = if args.depth > 0 {
        SearchParams::fixed_depth(args.depth)
    } else {
        SearchParams::fixed_time(Duration::from_millis(args.movetime))
    };

    let t0 = Instant::now();
    let res = s.search_with_params(&pos, p);
    let dt = t0.elapsed();
    let nps = if dt.as_secs_f64() > 0.0 { res.nodes as f64 / dt.as_secs_f64() } else { 0.0 };
    if args.json {
        println!("{}", serde_json::to_string(&res).context("serialize search result")?);
    } else {
        println!(
            "bestmove={} score_cp={} depth={} nodes={} elapsed={:.3}s nps={:.1}",
            res.bestmove.unwrap_or_else(|| "(none)".to_string()),
            res.score_cp,
            res.depth,
            res.nodes,
            dt.as_secs_f64(),
            nps
        );
    }
    Ok(())
}
