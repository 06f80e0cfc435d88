//! Typed errors for the board-facing API. The search itself has no error channel.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    FieldCount(usize),
    #[error("expected 8 ranks in piece placement, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files")]
    RankLength { rank: usize, files: usize },
    #[error("unknown piece letter '{0}'")]
    PieceLetter(char),
    #[error("side to move must be 'w' or 'b', got '{0}'")]
    SideToMove(String),
    #[error("unknown castling letter '{0}'")]
    Castling(char),
    #[error("bad en passant square '{0}'")]
    EnPassant(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("malformed move string '{0}'")]
    Malformed(String),
    #[error("no legal move '{0}' in this position")]
    NotFound(String),
}
