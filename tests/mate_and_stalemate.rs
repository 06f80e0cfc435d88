use fourk::board::Position;
use fourk::search::eval::{is_mate_score, MATE_SCORE};
use fourk::search::{SearchInfo, SearchParams, Searcher};

fn searcher() -> Searcher { Searcher::with_hash_mb(4) }

#[test]
fn checkmated_side_has_no_moves_and_a_mate_score() {
    let pos = Position::set_from_start_and_moves(&["f2f3", "e7e5", "g2g4", "d8h4"]).expect("fool's mate");
    assert!(pos.in_check());
    assert!(pos.legal_moves().is_empty());
    let res = searcher().search_depth(&pos, 4);
    assert_eq!(res.bestmove, None);
    assert_eq!(res.score_cp, -MATE_SCORE);
    assert!(is_mate_score(res.score_cp));
}

#[test]
fn stalemate_scores_zero() {
    let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("fen");
    assert!(!pos.in_check());
    assert!(pos.legal_moves().is_empty());
    let res = searcher().search_depth(&pos, 4);
    assert_eq!(res.bestmove, None);
    assert_eq!(res.score_cp, 0);
}

#[test]
fn finds_back_rank_mate_for_white() {
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen");
    let res = searcher().search_depth(&pos, 4);
    assert_eq!(res.bestmove.as_deref(), Some("a1a8"));
    assert_eq!(res.score_cp, MATE_SCORE - 1);
}

#[test]
fn finds_back_rank_mate_for_black() {
    let pos = Position::from_fen("r5k1/8/8/8/8/8/5PPP/6K1 b - - 0 1").expect("fen");
    let res = searcher().search_depth(&pos, 4);
    assert_eq!(res.bestmove.as_deref(), Some("a8a1"));
    assert!(is_mate_score(res.score_cp) && res.score_cp > 0);
}

#[test]
fn info_line_reports_mate_in_moves() {
    let pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").expect("fen");
    let mut lines = Vec::new();
    searcher().search_with_info(&pos, SearchParams::fixed_depth(3), &mut |info: &SearchInfo| lines.push(info.to_string()));
    let last = lines.last().expect("at least one iteration");
    assert!(last.contains("score mate 1"), "{last}");
    assert!(last.ends_with("pv a1a8"), "{last}");
}
