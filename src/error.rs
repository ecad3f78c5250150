//! The failure conditions the engine can report

use thiserror::Error;

/// Everything that can go wrong at the engine boundary
///
/// `IllegalMove` never occurs for callers that respect `legal_moves`;
/// `InvalidDepth` guards the root of the search, since depth 0 only makes
/// sense as the internal recursion terminator. The search itself is a total
/// function over legal states and has no failure modes of its own.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum EngineError {
    #[error("illegal move, column {column} is full or out of range")]
    IllegalMove { column: usize },

    #[error("invalid search depth {depth}, at least one ply is required")]
    InvalidDepth { depth: u32 },
}
