//! Canonical board representation and game rules

use anyhow::{anyhow, Result};

use crate::error::EngineError;
use crate::{HEIGHT, WIDTH};

/// A single tile of the grid
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    fn is_empty(self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }
}

/// One of the two players
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// The result of scanning a board for alignments
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    Ongoing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl Outcome {
    /// The winning player, if the game has been won
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::PlayerOneWin => Some(Player::One),
            Outcome::PlayerTwoWin => Some(Player::Two),
            _ => None,
        }
    }
}

// each alignment direction once, the reverse runs are the same windows
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// A 7x6 Connect 4 grid, row 0 at the top
///
/// Boards are plain values: playing a move produces a new board and leaves
/// the original untouched. Within any column the occupied tiles form a
/// contiguous run starting at the bottom row, so a column is playable
/// exactly when its top tile is empty.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
        }
    }

    /// Builds a board from a string of 1-indexed columns, players
    /// alternating from player one
    ///
    /// Returns the board together with the player to move next. Rejects
    /// characters outside `1..=7`, drops into full columns and moves played
    /// after the game is already decided.
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<(Self, Player)> {
        let mut board = Self::new();
        let mut to_move = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if board.winner() != Outcome::Ongoing {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    board = board.apply_move(column - 1, to_move)?;
                    to_move = to_move.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok((board, to_move))
    }

    /// The tile at the given row (0 = top) and column
    pub fn get(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Plays `player`'s tile into `column`, returning the resulting board
    ///
    /// The tile drops to the lowest empty row of the column. Fails with
    /// `IllegalMove` when the column is out of range or full.
    pub fn apply_move(&self, column: usize, player: Player) -> Result<Board> {
        if column >= WIDTH {
            return Err(EngineError::IllegalMove { column }.into());
        }
        match (0..HEIGHT).rev().find(|&row| self.cells[row][column].is_empty()) {
            Some(row) => {
                let mut next = *self;
                next.cells[row][column] = player.cell();
                Ok(next)
            }
            None => Err(EngineError::IllegalMove { column }.into()),
        }
    }

    /// True if `column` can still receive a tile
    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    /// The columns that can receive a tile, in ascending order
    ///
    /// The order is significant: it fixes move generation and with it the
    /// tie-break order of every search strategy.
    pub fn legal_moves(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    /// True if no column can receive another tile
    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.playable(column))
    }

    /// The number of tiles on the board
    pub fn num_moves(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// Scans every direction for four equal tiles in a row
    ///
    /// Returns the matching player's win on the first alignment found, a
    /// draw for a full board without one, and `Ongoing` otherwise. Under
    /// legal play both players can never hold an alignment at once.
    pub fn winner(&self) -> Outcome {
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                let outcome = match self.cells[row][column] {
                    Cell::PlayerOne => Outcome::PlayerOneWin,
                    Cell::PlayerTwo => Outcome::PlayerTwoWin,
                    Cell::Empty => continue,
                };
                for &(dr, dc) in DIRECTIONS.iter() {
                    if self.run_of_four(row, column, dr, dc) {
                        return outcome;
                    }
                }
            }
        }

        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::Ongoing
        }
    }

    // four equal tiles starting at (row, column) along (dr, dc)?
    fn run_of_four(&self, row: usize, column: usize, dr: isize, dc: isize) -> bool {
        let last_row = row as isize + 3 * dr;
        let last_column = column as isize + 3 * dc;
        if last_row < 0
            || last_row >= HEIGHT as isize
            || last_column < 0
            || last_column >= WIDTH as isize
        {
            return false;
        }

        let cell = self.cells[row][column];
        (1..4).all(|step: isize| {
            let r = (row as isize + dr * step) as usize;
            let c = (column as isize + dc * step) as usize;
            self.cells[r][c] == cell
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
