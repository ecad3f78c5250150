//! Canonical position keys for transposition lookups

use crate::board::{Board, Cell, Player};
use crate::{HEIGHT, WIDTH};

/// Builds the canonical key for a position and the side to move
///
/// The grid is serialized tile by tile into a base-3 number (top-left tile
/// first), then the side to move takes the lowest bit. Distinct positions
/// always produce distinct keys, and the same tiles with a different mover
/// hash differently, since the value of a position depends on who moves
/// next.
pub fn position_key(board: &Board, to_move: Player) -> u128 {
    let mut code: u128 = 0;
    for row in 0..HEIGHT {
        for column in 0..WIDTH {
            let digit = match board.get(row, column) {
                Cell::Empty => 0,
                Cell::PlayerOne => 1,
                Cell::PlayerTwo => 2,
            };
            code = code * 3 + digit;
        }
    }

    let turn = match to_move {
        Player::One => 0,
        Player::Two => 1,
    };
    (code << 1) | turn
}
