use anyhow::Result;

use std::io::{stdin, stdout, Write};

use connect4_minimax::board::Player;
use connect4_minimax::solver::{Algorithm, Engine};

mod display;
use display::*;

fn main() -> Result<()> {
    let stdin = stdin();
    // the engine holds the transposition table for the whole session
    let mut engine = Engine::new();

    println!("Welcome to Connect 4\n");

    let mut ai_players = (false, false);

    // choose AI control of player 1
    loop {
        let mut buffer = String::new();
        print!("Is player 1 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.0 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // choose AI control of player 2
    loop {
        let mut buffer = String::new();
        print!("Is player 2 AI controlled? y/n: ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => {
                ai_players.1 = true;
                break;
            }
            Some(_letter @ 'n') => break,
            _ => println!("Unknown answer given"),
        }
    }

    // choose the search strategy
    let algorithm = loop {
        let mut buffer = String::new();
        print!("Search strategy? 1: alpha-beta, 2: alpha-beta + table, 3: MTD(f): ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.trim() {
            "1" => break Algorithm::AlphaBeta,
            "2" => break Algorithm::AlphaBetaTable,
            "3" => break Algorithm::Mtdf,
            _ => println!("Unknown answer given"),
        }
    };

    // choose the search depth
    let depth = loop {
        let mut buffer = String::new();
        print!("Search depth? (4-8 recommended): ");
        stdout().flush().expect("failed to flush to stdout!");
        stdin.read_line(&mut buffer)?;
        match buffer.trim().parse::<u32>() {
            Ok(depth) if depth >= 1 => break depth,
            _ => println!("Invalid depth: {}", buffer.trim()),
        }
    };

    loop {
        let mut session = GameSession::new();

        // game loop
        loop {
            session.display().expect("Failed to draw board!");

            match session.state {
                GameState::Playing => {
                    let ai_turn = match session.to_move {
                        Player::One => ai_players.0,
                        Player::Two => ai_players.1,
                    };

                    let next_move = if ai_turn {
                        println!("AI is thinking...");
                        stdout().flush().expect("Failed to flush to stdout!");

                        // slow down play if both players are AI
                        if ai_players == (true, true) {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let result =
                            engine.select_move(&session.board, algorithm, depth, session.to_move)?;
                        println!(
                            "Best move: {} (evaluation {}, {} nodes searched)",
                            result.column + 1,
                            result.score,
                            result.nodes
                        );
                        result.column + 1

                    // human player
                    } else {
                        print!("Move input > ");
                        stdout().flush().expect("Failed to flush to stdout!");
                        let mut input_str = String::new();
                        stdin.read_line(&mut input_str)?;

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str);
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                    if let Err(err) = session.play_checked(next_move) {
                        println!("{}", err);
                        // try the move again
                        continue;
                    }
                }

                // end states
                GameState::PlayerOneWin => {
                    println!("Player 1 wins!");
                    break;
                }
                GameState::PlayerTwoWin => {
                    println!("Player 2 wins!");
                    break;
                }
                GameState::Draw => {
                    println!("Draw!");
                    break;
                }
            }
        }

        // stale cache entries must not leak into the next game
        engine.reset_search_state();

        let mut play_again = false;
        loop {
            let mut buffer = String::new();
            print!("Play again? y/n: ");
            stdout().flush().expect("failed to flush to stdout!");
            stdin.read_line(&mut buffer)?;
            match buffer.to_lowercase().chars().next() {
                Some(_letter @ 'y') => {
                    play_again = true;
                    break;
                }
                Some(_letter @ 'n') => break,
                _ => println!("Unknown answer given"),
            }
        }
        if !play_again {
            break;
        }
    }
    Ok(())
}
