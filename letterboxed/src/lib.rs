//! Solver for the Letter Boxed word-chain puzzle.
//!
//! Twelve letters sit on the four sides of a square. A solution is a chain of
//! dictionary words, each starting with the last letter of the one before,
//! that uses every letter at least once without ever taking two letters in a
//! row from the same side.

mod board;
mod error;
mod game;
mod solver;
pub mod trie;
pub mod words;

pub use board::{Board, LetterSlot, Marked, Side};
pub use error::{Error, Result};
pub use game::{Game, Rejection};
pub use solver::{SearchStats, Solution, Solver, SolverConfig};
pub use trie::PrefixTree;
