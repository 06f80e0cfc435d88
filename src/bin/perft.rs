use anyhow::{Context, Result};
use fourk::board::Position;
use fourk::perft::perft;

#[derive(clap::Parser, Debug)]
#[command(name = "perft", about = "Perft driver for fourk")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// FEN string or "startpos"
    #[arg(value_name = "FEN", default_value = "startpos")]
    fen: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
    /// Print the leaf count below each root move
    #[arg(long, default_value_t = false)]
    divide: bool,
}

fn main() -> Result<()> {
    use clap::Parser;
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;
    use std::time::Instant;

    env_logger::init();
    let args = Args::parse();
    let depth = args.depth;
    if depth == 0 {
        if args.nps { println!("nodes: 1 elapsed: 0.000s nps: inf"); } else { println!("nodes: 1"); }
        return Ok(());
    }

    let base = if args.fen == "startpos" {
        Position::startpos()
    } else {
        Position::from_fen(&args.fen).with_context(|| format!("invalid FEN '{}'", args.fen))?
    };

    let root_moves = base.legal_moves();
    let bar = ProgressBar::new(root_moves.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} root moves {elapsed_precise}")
            .context("progress template")?,
    );

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build().context("thread pool")?;
    let t0 = Instant::now();
    let per_move: Vec<(String, u64)> = pool.install(|| {
        root_moves
            .par_iter()
            .map(|mv| {
                let mut child = base;
                child.apply(mv);
                let n = perft(&child, depth - 1);
                bar.inc(1);
                (mv.to_uci(base.flipped), n)
            })
            .collect()
    });
    bar.finish_and_clear();
    let dt = t0.elapsed().as_secs_f64();

    if args.divide {
        for (mv, n) in &per_move {
            println!("{mv}: {n}");
        }
    }
    let nodes: u64 = per_move.iter().map(|(_, n)| n).sum();
    if args.nps { println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON)); }
    else { println!("nodes: {nodes}"); }
    Ok(())
}
