//! Cross-checks move generation against cozy-chess through FEN.
mod common;

use cozy_chess::Board;
use fourk::board::Position;
use fourk::perft::perft;

fn cozy_board(fen: &str) -> Board {
    Board::from_fen(fen, false).unwrap_or_else(|e| panic!("cozy rejected {fen}: {e:?}"))
}

fn cozy_perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    board.generate_moves(|moves| {
        for mv in moves {
            let mut child = board.clone();
            child.play_unchecked(mv);
            nodes += cozy_perft(&child, depth - 1);
        }
        false
    });
    nodes
}

#[test]
fn legal_move_counts_match_cozy_on_random_games() {
    for pos in common::random_positions(0xC0FFEE, 3000) {
        let fen = pos.to_fen();
        let board = cozy_board(&fen);
        let mut expected = 0;
        board.generate_moves(|moves| {
            expected += moves.len();
            false
        });
        assert_eq!(pos.legal_moves().len(), expected, "FEN {fen}");
    }
}

#[test]
fn perft_two_matches_cozy_on_random_games() {
    for pos in common::random_positions(7, 300) {
        let fen = pos.to_fen();
        assert_eq!(perft(&pos, 2), cozy_perft(&cozy_board(&fen), 2), "FEN {fen}");
    }
}

#[test]
fn kiwipete_perft_matches_cozy() {
    let pos = Position::from_fen(common::KIWIPETE).expect("kiwipete");
    assert_eq!(perft(&pos, 2), cozy_perft(&cozy_board(common::KIWIPETE), 2));
}
