//! A configurable minimax agent for playing the board game 'Connect 4'
//!
//! This agent searches a bounded game tree with one of three interchangeable
//! strategies (plain alpha-beta, alpha-beta backed by a transposition table,
//! and iteratively deepened MTD(f)) and reports the chosen column, its
//! evaluation and the number of nodes visited.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::board::Board;
//! use connect4_minimax::solver::{Algorithm, Engine};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let (board, to_move) = Board::from_moves("112233")?;
//! let mut engine = Engine::new();
//! let result = engine.select_move(&board, Algorithm::AlphaBeta, 4, to_move)?;
//!
//! assert_eq!(result.column, 3);
//! assert!(result.score >= 10_000);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod error;

pub mod eval;

pub mod hashing;

pub mod transposition_table;

pub mod solver;

mod test;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

// ensure that the per-cell position encoding fits in a 128-bit key
const_assert!(2 * WIDTH * HEIGHT + 1 < 128);
