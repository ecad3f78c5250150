//! Windowed heuristic scoring of non-terminal positions

use crate::board::{Board, Cell, Player, DIRECTIONS};
use crate::{HEIGHT, WIDTH};

/// The column whose tiles earn the positional bonus
const CENTER_COLUMN: usize = WIDTH / 2;

/// Bonus per subject tile in the center column
const CENTER_BONUS: i32 = 3;

/// Scores `board` from `subject`'s perspective
///
/// Every contiguous length-4 window along the four alignment directions
/// contributes according to its contents, then each subject tile in the
/// center column adds a small positional bonus. Windows mixing tiles of
/// both players are worth nothing.
///
/// # Notes
/// The scale is not anti-symmetric between the players: an opponent threat
/// costs less than the same threat of one's own earns, and a completed
/// opponent alignment scores nothing at all because the search handles
/// terminal positions before consulting the evaluator.
pub fn evaluate(board: &Board, subject: Player) -> i32 {
    let mut score = 0;

    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            for &(dr, dc) in DIRECTIONS.iter() {
                if let Some(window) = window_at(board, row, column, dr, dc) {
                    score += window_score(&window, subject);
                }
            }
        }
    }

    for row in 0..HEIGHT {
        if board.get(row, CENTER_COLUMN) == subject.cell() {
            score += CENTER_BONUS;
        }
    }

    score
}

// the four tiles starting at (row, column) along (dr, dc), if in bounds
fn window_at(
    board: &Board,
    row: usize,
    column: usize,
    dr: isize,
    dc: isize,
) -> Option<[Cell; 4]> {
    let last_row = row as isize + 3 * dr;
    let last_column = column as isize + 3 * dc;
    if last_row < 0 || last_row >= HEIGHT as isize || last_column < 0 || last_column >= WIDTH as isize
    {
        return None;
    }

    let mut window = [Cell::Empty; 4];
    for (step, tile) in window.iter_mut().enumerate() {
        let r = (row as isize + dr * step as isize) as usize;
        let c = (column as isize + dc * step as isize) as usize;
        *tile = board.get(r, c);
    }
    Some(window)
}

fn window_score(window: &[Cell; 4], subject: Player) -> i32 {
    let own = window.iter().filter(|&&tile| tile == subject.cell()).count();
    let theirs = window
        .iter()
        .filter(|&&tile| tile == subject.opponent().cell())
        .count();
    let empty = 4 - own - theirs;

    match (own, theirs, empty) {
        (4, 0, 0) => 100,
        (3, 0, 1) => 5,
        (2, 0, 2) => 2,
        (0, 3, 1) => -4,
        (0, 2, 2) => -1,
        _ => 0,
    }
}
