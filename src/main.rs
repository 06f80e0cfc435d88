use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fourk::bench::{self, BENCH_DEPTH};
use fourk::board::Position;
use fourk::perft::perft;
use fourk::search::Searcher;
use fourk::uci::UciEngine;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "fourk chess engine (UCI on stdin/stdout)", long_about = None)]
struct Args {
    /// Transposition table size in MiB
    #[arg(long, default_value_t = 64)]
    hash_mb: usize,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fixed-depth search from the start position
    Bench {
        #[arg(long, default_value_t = BENCH_DEPTH)]
        depth: u32,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes to a fixed depth
    Perft {
        #[arg(value_name = "DEPTH")]
        depth: u32,
        /// FEN string or "startpos"
        #[arg(value_name = "FEN", default_value = "startpos")]
        fen: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Some(Command::Bench { depth, json }) => {
            let mut searcher = Searcher::with_hash_mb(args.hash_mb);
            let report = bench::run(&mut searcher, depth);
            if json {
                println!("{}", serde_json::to_string(&report).context("serialize bench report")?);
            } else {
                println!("{} nodes {} nps", report.nodes, report.nps);
            }
        }
        Some(Command::Perft { depth, fen }) => {
            let pos = if fen == "startpos" {
                Position::startpos()
            } else {
                Position::from_fen(&fen).with_context(|| format!("invalid FEN '{}'", fen))?
            };
            let t0 = Instant::now();
            let nodes = perft(&pos, depth);
            let dt = t0.elapsed().as_secs_f64();
            println!("nodes: {nodes} elapsed: {:.3}s nps: {:.1}", dt, nodes as f64 / dt.max(f64::EPSILON));
        }
        None => {
            UciEngine::with_hash_mb(args.hash_mb).run_loop().context("protocol loop")?;
        }
    }
    Ok(())
}
