pub mod alphabeta;
pub mod eval;
pub mod hash;
pub mod history;
pub mod stack;
pub mod tt;

pub use alphabeta::{SearchInfo, SearchParams, SearchResult, Searcher};
