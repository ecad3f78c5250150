//! Tree-search strategies and the root move selector

use anyhow::{anyhow, Result};

use crate::board::{Board, Player};
use crate::error::EngineError;
use crate::eval::evaluate;
use crate::hashing::position_key;
use crate::transposition_table::{BoundType, TableEntry, TranspositionTable};

/// Base score of a decided position, before the depth preference is added
pub const WIN_SCORE: i32 = 10_000;

/// Window bound exceeding every reachable score
pub const INFINITY: i32 = 1_000_000;

/// The interchangeable tree-search strategies
///
/// All three agree on the chosen column and its evaluation for any fixed
/// position and depth; the table-assisted variants only change how much of
/// the tree gets visited along the way.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Algorithm {
    /// Depth-limited minimax with alpha-beta pruning
    AlphaBeta,
    /// Alpha-beta reusing bound-typed cached scores
    AlphaBetaTable,
    /// Iteratively deepened MTD(f) over the memory-enhanced search
    Mtdf,
}

/// The outcome of a root move selection
#[derive(Copy, Clone, Debug)]
pub struct SearchResult {
    /// The chosen column
    pub column: usize,
    /// The evaluation of the chosen column from the subject's perspective
    pub score: i32,
    /// Nodes visited across the whole root call (diagnostics only)
    pub nodes: u64,
}

/// Drives move selection for one game session
///
/// The engine owns the transposition table shared by the table-assisted
/// strategies. The table persists across `select_move` calls within a game
/// and must be cleared with [`reset_search_state`] when a new game starts.
///
/// [`reset_search_state`]: Engine::reset_search_state
pub struct Engine {
    transposition_table: TranspositionTable,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            transposition_table: TranspositionTable::new(),
        }
    }

    /// Drops every cached position from earlier searches
    pub fn reset_search_state(&mut self) {
        self.transposition_table.clear();
    }

    /// The number of positions currently cached
    pub fn cached_positions(&self) -> usize {
        self.transposition_table.len()
    }

    /// Picks the best column for `subject` to play on `board`
    ///
    /// Candidate columns are tried in ascending order and compared with a
    /// strict improvement test, so the first column reaching the best score
    /// wins ties. Each candidate is applied for the subject and the reply
    /// position is searched one ply shallower from the opponent's side.
    ///
    /// The board must hold at least one legal move; a depth of 0 is
    /// rejected with `InvalidDepth`.
    pub fn select_move(
        &mut self,
        board: &Board,
        algorithm: Algorithm,
        depth: u32,
        subject: Player,
    ) -> Result<SearchResult> {
        if depth == 0 {
            return Err(EngineError::InvalidDepth { depth }.into());
        }

        let mut searcher = Searcher::new(&mut self.transposition_table, subject);
        let mut best: Option<(usize, i32)> = None;

        for column in board.legal_moves() {
            let child = board.apply_move(column, subject)?;
            let score = match algorithm {
                Algorithm::AlphaBeta => {
                    searcher.alphabeta(&child, depth - 1, -INFINITY, INFINITY, false)?
                }
                Algorithm::AlphaBetaTable => {
                    searcher.alphabeta_with_table(&child, depth - 1, -INFINITY, INFINITY, false)?
                }
                // each candidate gets its own deepening pass, which warms
                // the table differently from a single shared root pass
                Algorithm::Mtdf => {
                    searcher.deepening_mtdf(&child, depth - 1, subject.opponent())?
                }
            };

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((column, score));
            }
        }

        let (column, score) =
            best.ok_or_else(|| anyhow!("no legal moves, the game is already over"))?;
        Ok(SearchResult {
            column,
            score,
            nodes: searcher.node_count,
        })
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// One in-flight search: the subject being optimised, a borrow of the
/// session's transposition table and the running node count
struct Searcher<'a> {
    transposition_table: &'a mut TranspositionTable,
    subject: Player,
    node_count: u64,
}

impl<'a> Searcher<'a> {
    fn new(transposition_table: &'a mut TranspositionTable, subject: Player) -> Self {
        Self {
            transposition_table,
            subject,
            node_count: 0,
        }
    }

    // decided positions prefer faster wins and slower losses
    fn winning_score(&self, winner: Player, depth: u32) -> i32 {
        if winner == self.subject {
            WIN_SCORE + depth as i32
        } else {
            -WIN_SCORE - depth as i32
        }
    }

    /// Plain depth-limited alpha-beta
    ///
    /// Terminal checks take priority over the depth limit; running out of
    /// depth or board falls back to the static evaluator. Maximizing nodes
    /// play the subject's tile, minimizing nodes the opponent's.
    fn alphabeta(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32> {
        self.node_count += 1;

        if let Some(winner) = board.winner().winner() {
            return Ok(self.winning_score(winner, depth));
        }
        if depth == 0 || board.is_full() {
            return Ok(evaluate(board, self.subject));
        }

        if maximizing {
            let mut value = -INFINITY;
            for column in board.legal_moves() {
                let child = board.apply_move(column, self.subject)?;
                value = value.max(self.alphabeta(&child, depth - 1, alpha, beta, false)?);
                alpha = alpha.max(value);
                if beta <= alpha {
                    // beta cutoff, a perfect opponent avoids this branch
                    break;
                }
            }
            Ok(value)
        } else {
            let mut value = INFINITY;
            for column in board.legal_moves() {
                let child = board.apply_move(column, self.subject.opponent())?;
                value = value.min(self.alphabeta(&child, depth - 1, alpha, beta, true)?);
                beta = beta.min(value);
                if beta <= alpha {
                    // alpha cutoff
                    break;
                }
            }
            Ok(value)
        }
    }

    /// Alpha-beta augmented with the bound-typed transposition table
    ///
    /// The cache is consulted before any terminal or heuristic check and
    /// refilled with the classified result on the way out.
    fn alphabeta_with_table(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> Result<i32> {
        self.node_count += 1;

        let to_move = if maximizing {
            self.subject
        } else {
            self.subject.opponent()
        };
        let key = position_key(board, to_move);
        // the window as received, before any cache-driven narrowing
        let (original_alpha, original_beta) = (alpha, beta);

        if let Some(entry) = self.transposition_table.get(key) {
            if entry.depth >= depth {
                match entry.bound {
                    BoundType::Exact => return Ok(entry.score),
                    BoundType::LowerBound => alpha = alpha.max(entry.score),
                    BoundType::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    // the tightened window is already closed
                    return Ok(entry.score);
                }
            }
        }

        if let Some(winner) = board.winner().winner() {
            return Ok(self.winning_score(winner, depth));
        }
        if depth == 0 || board.is_full() {
            return Ok(evaluate(board, self.subject));
        }

        let value = if maximizing {
            let mut value = -INFINITY;
            for column in board.legal_moves() {
                let child = board.apply_move(column, self.subject)?;
                value =
                    value.max(self.alphabeta_with_table(&child, depth - 1, alpha, beta, false)?);
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        } else {
            let mut value = INFINITY;
            for column in board.legal_moves() {
                let child = board.apply_move(column, self.subject.opponent())?;
                value =
                    value.min(self.alphabeta_with_table(&child, depth - 1, alpha, beta, true)?);
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        };

        self.store(key, value, depth, original_alpha, original_beta);
        Ok(value)
    }

    /// Memory-enhanced alpha-beta, driven by the player to move
    ///
    /// Same table discipline as [`alphabeta_with_table`], but the node
    /// maximizes exactly when the player to move is the search subject.
    /// MTD(f) re-invokes this search with shifting null windows and relies
    /// on the cached bounds staying valid across those invocations.
    ///
    /// [`alphabeta_with_table`]: Searcher::alphabeta_with_table
    fn alphabeta_memory(
        &mut self,
        board: &Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        to_move: Player,
    ) -> Result<i32> {
        self.node_count += 1;

        let key = position_key(board, to_move);
        let (original_alpha, original_beta) = (alpha, beta);

        if let Some(entry) = self.transposition_table.get(key) {
            if entry.depth >= depth {
                match entry.bound {
                    BoundType::Exact => return Ok(entry.score),
                    BoundType::LowerBound => alpha = alpha.max(entry.score),
                    BoundType::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return Ok(entry.score);
                }
            }
        }

        if let Some(winner) = board.winner().winner() {
            return Ok(self.winning_score(winner, depth));
        }
        if depth == 0 || board.is_full() {
            return Ok(evaluate(board, self.subject));
        }

        let maximizing = to_move == self.subject;
        let mut value = if maximizing { -INFINITY } else { INFINITY };
        for column in board.legal_moves() {
            let child = board.apply_move(column, to_move)?;
            let score =
                self.alphabeta_memory(&child, depth - 1, alpha, beta, to_move.opponent())?;
            if maximizing {
                value = value.max(score);
                alpha = alpha.max(value);
            } else {
                value = value.min(score);
                beta = beta.min(value);
            }
            if beta <= alpha {
                break;
            }
        }

        self.store(key, value, depth, original_alpha, original_beta);
        Ok(value)
    }

    // classify against the entry window and cache the result
    fn store(&mut self, key: u128, score: i32, depth: u32, original_alpha: i32, original_beta: i32) {
        let bound = if score <= original_alpha {
            // failed low, the true value is at most this score
            BoundType::UpperBound
        } else if score >= original_beta {
            // failed high, the true value is at least this score
            BoundType::LowerBound
        } else {
            BoundType::Exact
        };
        self.transposition_table
            .set(key, TableEntry { score, depth, bound });
    }

    /// Converges on the minimax value with zero-width probes around a guess
    ///
    /// Every probe either raises the lower bound or lowers the upper bound,
    /// and scores are integers, so the loop terminates.
    fn mtdf(&mut self, board: &Board, depth: u32, first_guess: i32, to_move: Player) -> Result<i32> {
        let mut guess = first_guess;
        let mut lower = -INFINITY;
        let mut upper = INFINITY;

        while lower < upper {
            let beta = guess.max(lower + 1);
            guess = self.alphabeta_memory(board, depth, beta - 1, beta, to_move)?;
            if guess < beta {
                // fail low, the true value sits below the probe
                upper = guess;
            } else {
                lower = guess;
            }
        }
        Ok(guess)
    }

    /// Runs MTD(f) at increasing depths, seeding each depth's first guess
    /// with the previous depth's result
    ///
    /// A close first guess lets MTD(f) converge in fewer probes, and the
    /// transposition table carries the shallower depths' work into the
    /// deeper ones.
    fn deepening_mtdf(&mut self, board: &Board, max_depth: u32, to_move: Player) -> Result<i32> {
        if max_depth == 0 {
            // still answer with a real evaluation when the root searches one ply
            return self.mtdf(board, 0, 0, to_move);
        }

        let mut guess = 0;
        for depth in 1..=max_depth {
            guess = self.mtdf(board, depth, guess, to_move)?;
        }
        Ok(guess)
    }
}
