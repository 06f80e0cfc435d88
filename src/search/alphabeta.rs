use crate::board::movegen::generate;
use crate::board::{Move, Position};
use crate::search::eval::{evaluate, is_mate_score, DRAW_SCORE, INF, MATE_SCORE};
use crate::search::hash;
use crate::search::history::History;
use crate::search::stack::{SearchStack, MAX_PLY};
use crate::search::tt::{Bound, Tt};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

/// Deepest iteration the driver will start.
pub const MAX_DEPTH: u32 = MAX_PLY as u32 - 1;

const RFP_MARGIN: i32 = 47;
const RAZOR_MARGIN: i32 = 131;
const NULL_REDUCTION: i32 = 4;
const TIME_CHECK_MASK: u64 = 4095;

// Ordering weights: table move, captured value per piece step, killer.
const TT_MOVE_BONUS: i32 = 1 << 30;
const CAPTURE_WEIGHT: i32 = 921;
const KILLER_BONUS: i32 = 915;

#[derive(Default, Debug, Clone, Copy)]
pub struct SearchParams {
    /// Maximum iteration depth; 0 means unlimited.
    pub depth: u32,
    /// Hard limit, checked inside the tree.
    pub movetime: Option<Duration>,
    /// No new iteration starts after this much time.
    pub soft_time: Option<Duration>,
}

impl SearchParams {
    pub fn fixed_depth(depth: u32) -> Self {
        Self { depth, ..Self::default() }
    }

    pub fn fixed_time(movetime: Duration) -> Self {
        Self { depth: 0, movetime: Some(movetime), soft_time: Some(movetime / 2) }
    }

    /// Budget from the remaining clock: half the clock (plus half the increment)
    /// as hard limit, a sixteenth of that for starting new iterations.
    pub fn from_clock(remaining: Duration, increment: Duration) -> Self {
        let hard = remaining / 2 + increment / 2;
        Self { depth: 0, movetime: Some(hard), soft_time: Some(hard / 16) }
    }
}

#[derive(Default, Debug, Clone, Serialize)]
pub struct SearchResult {
    pub bestmove: Option<String>,
    #[serde(skip)]
    pub best: Option<Move>,
    pub score_cp: i32,
    pub nodes: u64,
    pub depth: u32,
}

/// One completed iteration.
#[derive(Debug, Clone)]
pub struct SearchInfo {
    pub depth: u32,
    pub score: i32,
    pub elapsed: Duration,
    pub nodes: u64,
    pub pv: Option<String>,
}

impl SearchInfo {
    pub fn nps(&self) -> u64 {
        let ms = self.elapsed.as_millis() as u64;
        if ms > 0 { self.nodes * 1000 / ms } else { 0 }
    }
}

impl fmt::Display for SearchInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "info depth {} ", self.depth)?;
        if is_mate_score(self.score) {
            let plies = MATE_SCORE - self.score.abs();
            let moves = (plies + 1) / 2;
            write!(f, "score mate {}", if self.score > 0 { moves } else { -moves })?;
        } else {
            write!(f, "score cp {}", self.score)?;
        }
        write!(f, " time {} nodes {} nps {}", self.elapsed.as_millis(), self.nodes, self.nps())?;
        if let Some(pv) = &self.pv {
            write!(f, " pv {}", pv)?;
        }
        Ok(())
    }
}

/// Owns all mutable search state. One search at a time per searcher; the
/// table and killers carry over between searches until `new_game`.
pub struct Searcher {
    tt: Tt,
    history: History,
    stack: SearchStack,
    pub(crate) nodes: u64,
    start: Instant,
    hard_limit: Option<Duration>,
    stopped: bool,
}

impl Default for Searcher {
    fn default() -> Self { Self::with_tt(Tt::default()) }
}

impl Searcher {
    fn with_tt(tt: Tt) -> Self {
        crate::board::attacks::init();
        Self {
            tt,
            history: History::default(),
            stack: SearchStack::default(),
            nodes: 0,
            start: Instant::now(),
            hard_limit: None,
            stopped: false,
        }
    }

    pub fn with_hash_mb(mb: usize) -> Self { Self::with_tt(Tt::with_capacity_mb(mb)) }

    pub fn set_tt_capacity_mb(&mut self, mb: usize) { self.tt = Tt::with_capacity_mb(mb); }

    /// Clears everything learned about the previous game.
    pub fn new_game(&mut self) {
        self.tt.clear();
        self.history.clear();
        self.stack.reset();
    }

    /// Fingerprints of the positions before each reversible move played so far.
    pub fn set_game_history(&mut self, hashes: &[u64]) { self.stack.set_game_history(hashes); }

    pub fn tt_probe(&self, pos: &Position) -> Option<(i32, Bound)> {
        self.tt.probe(hash::compute(pos)).map(|e| (e.depth as i32, e.bound))
    }

    pub fn search_depth(&mut self, pos: &Position, depth: u32) -> SearchResult {
        self.search_with_params(pos, SearchParams::fixed_depth(depth))
    }

    pub fn search_with_params(&mut self, pos: &Position, params: SearchParams) -> SearchResult {
        self.search_with_info(pos, params, &mut |_: &SearchInfo| {})
    }

    /// Iterative deepening. `report` sees every iteration that ran to completion.
    pub fn search_with_info(&mut self, pos: &Position, params: SearchParams, report: &mut dyn FnMut(&SearchInfo)) -> SearchResult {
        self.start = Instant::now();
        self.nodes = 0;
        self.stopped = false;
        self.hard_limit = params.movetime;
        self.history.clear();

        let max_depth = if params.depth == 0 { MAX_DEPTH } else { params.depth.min(MAX_DEPTH) };
        let mut best: Option<Move> = None;
        let mut score = 0;
        let mut completed = 0;

        for depth in 1..=max_depth {
            let s = self.alphabeta(pos, 0, depth as i32, -INF, INF, false);
            let candidate = self.stack.entry(0).best_move.filter(|m| pos.is_legal(m));
            if self.stopped {
                // Anything recorded at the root was fully searched.
                best = candidate.or(best);
                break;
            }
            best = candidate.or(best);
            score = s;
            completed = depth;

            let info = SearchInfo {
                depth,
                score,
                elapsed: self.start.elapsed(),
                nodes: self.nodes,
                pv: best.map(|m| m.to_uci(pos.flipped)),
            };
            debug!("depth {} score {} nodes {} elapsed {:?}", depth, score, self.nodes, info.elapsed);
            report(&info);

            if let Some(soft) = params.soft_time {
                if self.start.elapsed() > soft { break; }
            }
        }

        if best.is_none() {
            best = pos.legal_moves().first().copied();
        }
        SearchResult {
            bestmove: best.map(|m| m.to_uci(pos.flipped)),
            best,
            score_cp: score,
            nodes: self.nodes,
            depth: completed,
        }
    }

    fn out_of_time(&self) -> bool {
        matches!(self.hard_limit, Some(limit) if self.start.elapsed() > limit)
    }

    /// Highest-ordered move among `start..`, swapped into `start`.
    fn pick_move(&mut self, ply: usize, start: usize, tt_move: Option<Move>, killer: Option<Move>, flipped: bool) -> Move {
        let history = &self.history;
        let list = &mut self.stack.entry_mut(ply).moves;
        let mut best_idx = start;
        let mut best_score = i32::MIN;
        for i in start..list.len() {
            let m = list[i];
            let mut s = m.takes.map_or(0, |p| p.index() as i32 + 1) * CAPTURE_WEIGHT + history.get(flipped, &m);
            if tt_move == Some(m) { s += TT_MOVE_BONUS; }
            if killer == Some(m) { s += KILLER_BONUS; }
            if s > best_score {
                best_score = s;
                best_idx = i;
            }
        }
        list.swap(start, best_idx);
        list[start]
    }

    fn alphabeta(&mut self, pos: &Position, ply: usize, mut depth: i32, mut alpha: i32, beta: i32, do_null: bool) -> i32 {
        debug_assert!(alpha < beta);
        if ply >= MAX_PLY - 1 {
            return evaluate(pos);
        }

        let in_check = pos.in_check();
        if in_check {
            depth += 1;
        }

        if self.stopped {
            return alpha;
        }
        if (depth > 4 || self.nodes & TIME_CHECK_MASK == 0) && self.out_of_time() {
            self.stopped = true;
            return alpha;
        }

        let key = hash::compute(pos);
        let mut in_qsearch = depth <= 0;
        if !in_qsearch && ply > 0 && self.stack.is_repetition(ply, key) {
            return DRAW_SCORE;
        }
        self.stack.record(ply, key);

        let entry = self.tt.probe(key);
        let mut tt_move = None;
        match entry {
            Some(e) => {
                tt_move = e.best;
                let score = e.score as i32;
                let usable = match e.bound {
                    Bound::Exact => true,
                    Bound::Lower => score > alpha,
                    Bound::Upper => score <= alpha,
                };
                if alpha == beta - 1 && e.depth as i32 >= depth && usable {
                    return score;
                }
            }
            // Internal iterative reduction
            None => {
                if depth > 3 {
                    depth -= 1;
                }
            }
        }

        let mut static_eval = evaluate(pos);
        if let Some(e) = entry {
            let score = e.score as i32;
            let tighter = match e.bound {
                Bound::Exact => true,
                Bound::Lower => score > static_eval,
                Bound::Upper => score < static_eval,
            };
            if tighter {
                static_eval = score;
            }
        }

        // Stand pat
        if in_qsearch && static_eval > alpha {
            if static_eval >= beta {
                return static_eval;
            }
            alpha = static_eval;
        }

        if !in_qsearch && depth < 8 && alpha == beta - 1 && !in_check {
            // Reverse futility pruning
            if static_eval - RFP_MARGIN * depth >= beta {
                return static_eval;
            }
            // Razoring: hopeless nodes only look at captures
            in_qsearch = static_eval + RAZOR_MARGIN * depth <= alpha;
        }

        if depth > 2 && do_null && static_eval >= beta && alpha == beta - 1 && !in_check {
            let mut npos = *pos;
            npos.flip();
            npos.ep = 0;
            let score = -self.alphabeta(&npos, ply + 1, depth - NULL_REDUCTION, -beta, -alpha, false);
            if self.stopped {
                return alpha;
            }
            if score >= beta {
                return beta;
            }
        }

        let killer = {
            let e = self.stack.entry_mut(ply);
            generate(pos, &mut e.moves, in_qsearch);
            e.best_move = tt_move;
            e.killer
        };
        let num_moves = self.stack.entry(ply).moves.len();

        let mut moves_evaluated = 0;
        let mut quiets_evaluated = 0;
        let mut bound = Bound::Upper;
        let mut best_score = if in_qsearch { static_eval } else { -INF };

        for move_index in 0..num_moves {
            let mv = self.pick_move(ply, move_index, tt_move, killer, pos.flipped);

            let mut npos = *pos;
            self.nodes += 1;
            if !npos.apply(&mv) {
                continue;
            }

            // Principal variation search with late move reductions; anything
            // that beats alpha is re-searched at full depth and window.
            let mut low = if moves_evaluated == 0 { -beta } else { -alpha - 1 };
            moves_evaluated += 1;
            let mut reduction = if depth > 1 && moves_evaluated > 6 { 2 + moves_evaluated / 13 } else { 1 };

            let mut score;
            loop {
                score = -self.alphabeta(&npos, ply + 1, depth - reduction, low, -alpha, true);
                if self.stopped {
                    return alpha;
                }
                if score <= alpha || (low == -beta && reduction == 1) {
                    break;
                }
                low = -beta;
                reduction = 1;
            }

            best_score = best_score.max(score);

            if score > alpha {
                self.stack.entry_mut(ply).best_move = Some(mv);
                alpha = score;
                bound = Bound::Exact;
                if score >= beta {
                    bound = Bound::Lower;
                    self.history.reward(pos.flipped, &mv, depth);
                    for prev_index in 0..move_index {
                        let prev = self.stack.entry(ply).moves[prev_index];
                        self.history.penalize(pos.flipped, &prev, depth);
                    }
                    if !mv.is_capture() {
                        self.stack.entry_mut(ply).killer = Some(mv);
                    }
                    break;
                }
            }

            if !mv.is_capture() {
                quiets_evaluated += 1;
            }

            // Late move pruning
            if !in_check && alpha == beta - 1 && quiets_evaluated > 1 + depth * depth {
                break;
            }
        }

        if best_score == -INF {
            return if in_check { ply as i32 - MATE_SCORE } else { DRAW_SCORE };
        }

        let best = self.stack.entry(ply).best_move;
        self.tt.store(key, best, best_score, depth, bound);
        best_score
    }
}
