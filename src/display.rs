use anyhow::{anyhow, Result};
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::board::{Board, Cell, Outcome, Player};
use connect4_minimax::{HEIGHT, WIDTH};

#[derive(Copy, Clone, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

/// Session-side pairing of the engine's board value with the running state
/// the interface needs between turns
pub struct GameSession {
    pub board: Board,
    pub to_move: Player,
    pub state: GameState,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::One,
            state: GameState::Playing,
        }
    }

    /// Plays a 1-indexed column for the player to move and updates the state
    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<()> {
        if column_one_indexed < 1 || column_one_indexed > WIDTH {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                WIDTH
            ));
        }

        self.board = self.board.apply_move(column_one_indexed - 1, self.to_move)?;
        self.to_move = self.to_move.opponent();
        self.state = match self.board.winner() {
            Outcome::Ongoing => GameState::Playing,
            Outcome::PlayerOneWin => GameState::PlayerOneWin,
            Outcome::PlayerTwoWin => GameState::PlayerTwoWin,
            Outcome::Draw => GameState::Draw,
        };
        Ok(())
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();

        let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;

        // row 0 is the top of the grid, so rows print in storage order
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                stdout.queue(PrintStyledContent(
                    style("O")
                        .attribute(Attribute::Bold)
                        .on(Color::DarkBlue)
                        .with(match self.board.get(row, column) {
                            Cell::PlayerOne => Color::Red,
                            Cell::PlayerTwo => Color::Yellow,
                            Cell::Empty => Color::DarkBlue,
                        }),
                ))?;
            }
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;
        Ok(())
    }
}
