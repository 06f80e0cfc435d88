use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use log::{debug, info, trace, warn};

use crate::bench::{self, BENCH_DEPTH};
use crate::board::{Piece, Position};
use crate::perft::perft;
use crate::search::alphabeta::{SearchInfo, SearchParams, Searcher};
use crate::search::hash;
use crate::search::tt::DEFAULT_MB;

/// Depth used by a bare `go`.
pub const DEFAULT_GO_DEPTH: u32 = 8;

pub struct UciEngine {
    pos: Position,
    /// Fingerprints before each reversible move since the last capture or pawn move.
    history: Vec<u64>,
    searcher: Searcher,
}

impl Default for UciEngine {
    fn default() -> Self { Self::with_hash_mb(DEFAULT_MB) }
}

impl UciEngine {
    pub fn new() -> Self { Self::default() }

    pub fn with_hash_mb(mb: usize) -> Self {
        Self { pos: Position::startpos(), history: Vec::new(), searcher: Searcher::with_hash_mb(mb) }
    }

    pub fn position(&self) -> &Position { &self.pos }

    fn cmd_uci(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "id name fourk {}", env!("CARGO_PKG_VERSION"))?;
        writeln!(out, "id author fourk developers")?;
        writeln!(out)?;
        writeln!(out, "option name Hash type spin default {} min 1 max 4096", DEFAULT_MB)?;
        writeln!(out, "option name Threads type spin default 1 min 1 max 1")?;
        writeln!(out, "uciok")
    }

    fn cmd_isready(&self, out: &mut dyn Write) -> io::Result<()> { writeln!(out, "readyok") }

    fn cmd_ucinewgame(&mut self) {
        info!("new game: clearing search tables");
        self.searcher.new_game();
        self.pos = Position::startpos();
        self.history.clear();
    }

    fn cmd_setoption(&mut self, args: &str) {
        // setoption name <id> value <x>
        let tokens: Vec<&str> = args.split_whitespace().collect();
        let name = tokens.iter().position(|t| *t == "name").and_then(|i| tokens.get(i + 1));
        let value = tokens.iter().position(|t| *t == "value").and_then(|i| tokens.get(i + 1));
        match (name, value) {
            (Some(n), Some(v)) if n.eq_ignore_ascii_case("hash") => match v.parse::<usize>() {
                Ok(mb) => self.searcher.set_tt_capacity_mb(mb.clamp(1, 4096)),
                Err(_) => warn!("bad Hash value '{}'", v),
            },
            _ => debug!("ignoring setoption {}", args),
        }
    }

    /// Plays one move string. An unknown move leaves the position where it was.
    fn play(&mut self, uci: &str) {
        let before = hash::compute(&self.pos);
        match self.pos.find_uci_move(uci) {
            Ok(mv) => {
                let irreversible = mv.is_capture() || self.pos.piece_on(mv.from) == Some(Piece::Pawn);
                self.pos.apply(&mv);
                if irreversible {
                    self.history.clear();
                } else {
                    self.history.push(before);
                }
            }
            Err(e) => warn!("{}", e),
        }
    }

    fn cmd_position(&mut self, args: &str) {
        // Supports: 'position startpos [moves ...]', 'position fen <fen> [moves ...]' and bare move lists
        self.pos = Position::startpos();
        self.history.clear();
        let mut tokens = args.split_whitespace().peekable();
        match tokens.peek() {
            Some(&"startpos") => {
                tokens.next();
            }
            Some(&"fen") => {
                tokens.next();
                let fen_fields: Vec<&str> = tokens.by_ref().take_while(|t| *t != "moves").collect();
                let fen = fen_fields.join(" ");
                match Position::from_fen(&fen) {
                    Ok(p) => self.pos = p,
                    Err(e) => warn!("bad FEN '{}': {}", fen, e),
                }
            }
            _ => {}
        }
        for tok in tokens {
            if tok == "moves" { continue; }
            self.play(tok);
        }
    }

    fn go_params(&self, args: &str) -> SearchParams {
        let mut tokens = args.split_whitespace();
        let mut clock = [None, None];
        let mut inc = [Duration::ZERO, Duration::ZERO];
        let mut movetime = None;
        let mut depth = None;
        while let Some(tok) = tokens.next() {
            let mut value = || {
                let raw = tokens.next().unwrap_or("");
                raw.parse::<u64>().map_err(|_| warn!("bad number '{}' after {}", raw, tok)).ok()
            };
            match tok {
                "wtime" => clock[0] = value().map(Duration::from_millis),
                "btime" => clock[1] = value().map(Duration::from_millis),
                "winc" => inc[0] = value().map(Duration::from_millis).unwrap_or_default(),
                "binc" => inc[1] = value().map(Duration::from_millis).unwrap_or_default(),
                "movetime" => movetime = value().map(Duration::from_millis),
                "depth" => depth = value().map(|d| u32::try_from(d).unwrap_or(u32::MAX)),
                _ => {}
            }
        }
        let side = self.pos.black_to_move() as usize;
        if let Some(d) = depth {
            SearchParams::fixed_depth(d.max(1))
        } else if let Some(t) = movetime {
            SearchParams::fixed_time(t)
        } else if let Some(remaining) = clock[side] {
            SearchParams::from_clock(remaining, inc[side])
        } else {
            SearchParams::fixed_depth(DEFAULT_GO_DEPTH)
        }
    }

    fn cmd_go(&mut self, args: &str, out: &mut dyn Write) -> io::Result<()> {
        let params = self.go_params(args);
        debug!("go: {:?}", params);
        self.searcher.set_game_history(&self.history);
        let res = self.searcher.search_with_info(&self.pos, params, &mut |info: &SearchInfo| {
            if let Err(e) = writeln!(out, "{}", info).and_then(|_| out.flush()) {
                debug!("dropped info line: {}", e);
            }
        });
        writeln!(out, "bestmove {}", res.bestmove.as_deref().unwrap_or("0000"))
    }

    fn cmd_perft(&self, args: &str, out: &mut dyn Write) -> io::Result<()> {
        let depth = match args.trim().parse::<u32>() {
            Ok(d) => d,
            Err(_) => {
                warn!("perft needs a depth, got '{}'", args);
                return Ok(());
            }
        };
        let t0 = Instant::now();
        let nodes = perft(&self.pos, depth);
        let ms = t0.elapsed().as_millis() as u64;
        let nps = if ms > 0 { nodes * 1000 / ms } else { 0 };
        writeln!(out, "info depth {} nodes {} time {} nps {}", depth, nodes, ms, nps)
    }

    fn cmd_bench(&mut self, args: &str, out: &mut dyn Write) -> io::Result<()> {
        let depth = args.trim().parse::<u32>().unwrap_or(BENCH_DEPTH);
        let report = bench::run(&mut self.searcher, depth);
        writeln!(out, "{} nodes {} nps", report.nodes, report.nps)
    }

    /// Handles one protocol line. Returns false when the engine should exit.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<bool> {
        let line = line.trim();
        trace!("<< {}", line);
        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match cmd {
            "" => {}
            "uci" => self.cmd_uci(out)?,
            "isready" => self.cmd_isready(out)?,
            "ucinewgame" => self.cmd_ucinewgame(),
            "setoption" => self.cmd_setoption(rest),
            "position" => self.cmd_position(rest),
            "go" => self.cmd_go(rest, out)?,
            "d" => writeln!(out, "{}", self.pos)?,
            "perft" => self.cmd_perft(rest, out)?,
            "bench" => self.cmd_bench(rest, out)?,
            "stop" | "ponderhit" => {}
            "quit" => return Ok(false),
            // Abbreviated commands dispatch on their first letter.
            other => match other.as_bytes()[0] {
                b'q' => return Ok(false),
                b'i' => self.cmd_isready(out)?,
                b'p' => self.cmd_position(rest),
                b'g' => self.cmd_go(rest, out)?,
                _ => debug!("ignoring '{}'", line),
            },
        }
        out.flush()?;
        Ok(true)
    }

    /// Reads stdin until `quit` or end of input.
    pub fn run_loop(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        for line in stdin.lock().lines() {
            let line = line?;
            let mut out = stdout.lock();
            if !self.handle_line(&line, &mut out)? {
                break;
            }
        }
        Ok(())
    }
}
