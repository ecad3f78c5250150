#[cfg(test)]
pub mod test {
    use anyhow::Result;

    use crate::board::{Board, Cell, Outcome, Player};
    use crate::error::EngineError;
    use crate::eval::evaluate;
    use crate::hashing::position_key;
    use crate::solver::{Algorithm, Engine, WIN_SCORE};
    use crate::{HEIGHT, WIDTH};

    const ALGORITHMS: [Algorithm; 3] = [
        Algorithm::AlphaBeta,
        Algorithm::AlphaBetaTable,
        Algorithm::Mtdf,
    ];

    // drops tiles for explicit players, without the alternation of from_moves
    fn board_from(stones: &[(usize, Player)]) -> Result<Board> {
        let mut board = Board::new();
        for &(column, player) in stones {
            board = board.apply_move(column, player)?;
        }
        Ok(board)
    }

    // a full board without a single alignment: alternating row patterns of
    // period-2 column blocks never line up four in any direction
    fn full_draw_board() -> Result<Board> {
        const ROWS: [&str; HEIGHT] = [
            "AABBAAB", "BBAABBA", "AABBAAB", "BBAABBA", "AABBAAB", "BBAABBA",
        ];

        let mut board = Board::new();
        for column in 0..WIDTH {
            for row in (0..HEIGHT).rev() {
                let player = if ROWS[row].as_bytes()[column] == b'A' {
                    Player::One
                } else {
                    Player::Two
                };
                board = board.apply_move(column, player)?;
            }
        }
        Ok(board)
    }

    #[test]
    pub fn horizontal_win_detected() -> Result<()> {
        let board = board_from(&[
            (0, Player::One),
            (1, Player::One),
            (2, Player::One),
            (3, Player::One),
        ])?;
        assert_eq!(board.winner(), Outcome::PlayerOneWin);
        assert_eq!(board.winner().winner(), Some(Player::One));
        Ok(())
    }

    #[test]
    pub fn vertical_win_detected() -> Result<()> {
        let board = board_from(&[
            (2, Player::Two),
            (2, Player::Two),
            (2, Player::Two),
            (2, Player::Two),
        ])?;
        assert_eq!(board.winner(), Outcome::PlayerTwoWin);
        Ok(())
    }

    #[test]
    pub fn rising_diagonal_win_detected() -> Result<()> {
        // player one on (5,0), (4,1), (3,2), (2,3) with filler tiles below
        let board = board_from(&[
            (0, Player::One),
            (1, Player::Two),
            (1, Player::One),
            (2, Player::Two),
            (2, Player::Two),
            (2, Player::One),
            (3, Player::One),
            (3, Player::Two),
            (3, Player::One),
            (3, Player::One),
        ])?;
        assert_eq!(board.winner(), Outcome::PlayerOneWin);
        Ok(())
    }

    #[test]
    pub fn falling_diagonal_win_detected() -> Result<()> {
        // player two on (2,0), (3,1), (4,2), (5,3) with filler tiles below
        let board = board_from(&[
            (0, Player::One),
            (0, Player::One),
            (0, Player::One),
            (0, Player::Two),
            (1, Player::One),
            (1, Player::One),
            (1, Player::Two),
            (2, Player::One),
            (2, Player::Two),
            (3, Player::Two),
        ])?;
        assert_eq!(board.winner(), Outcome::PlayerTwoWin);
        Ok(())
    }

    #[test]
    pub fn blocked_runs_of_three_are_not_wins() -> Result<()> {
        // horizontal three with the fourth cell taken
        let board = board_from(&[
            (0, Player::One),
            (1, Player::One),
            (2, Player::One),
            (3, Player::Two),
        ])?;
        assert_eq!(board.winner(), Outcome::Ongoing);

        // vertical three capped by the opponent
        let board = board_from(&[
            (0, Player::One),
            (0, Player::One),
            (0, Player::One),
            (0, Player::Two),
        ])?;
        assert_eq!(board.winner(), Outcome::Ongoing);

        // rising diagonal three with the opponent on the fourth cell
        let board = board_from(&[
            (0, Player::One),
            (1, Player::Two),
            (1, Player::One),
            (2, Player::Two),
            (2, Player::Two),
            (2, Player::One),
            (3, Player::One),
            (3, Player::Two),
            (3, Player::One),
            (3, Player::Two),
        ])?;
        assert_eq!(board.winner(), Outcome::Ongoing);
        Ok(())
    }

    #[test]
    pub fn full_board_without_alignment_is_a_draw() -> Result<()> {
        let board = full_draw_board()?;

        assert!(board.is_full());
        assert_eq!(board.winner(), Outcome::Draw);
        assert!(board.legal_moves().is_empty());
        assert_eq!(board.num_moves(), WIDTH * HEIGHT);
        Ok(())
    }

    #[test]
    pub fn apply_move_is_pure() -> Result<()> {
        let board = board_from(&[(3, Player::One)])?;
        let before = board;

        let after = board.apply_move(3, Player::Two)?;
        assert_eq!(board, before);

        let mut changed = 0;
        for row in 0..HEIGHT {
            for column in 0..WIDTH {
                if after.get(row, column) != board.get(row, column) {
                    changed += 1;
                    assert_eq!((row, column), (HEIGHT - 2, 3));
                    assert_eq!(after.get(row, column), Cell::PlayerTwo);
                }
            }
        }
        assert_eq!(changed, 1);
        Ok(())
    }

    #[test]
    pub fn apply_move_rejects_illegal_drops() -> Result<()> {
        let mut board = Board::new();
        for _ in 0..HEIGHT / 2 {
            board = board.apply_move(0, Player::One)?;
            board = board.apply_move(0, Player::Two)?;
        }

        let err = board.apply_move(0, Player::One).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::IllegalMove { column: 0 })
        );

        let err = board.apply_move(WIDTH, Player::One).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::IllegalMove { column: WIDTH })
        );
        Ok(())
    }

    #[test]
    pub fn legal_moves_ascending_and_skip_full_columns() -> Result<()> {
        let mut board = Board::new();
        for _ in 0..HEIGHT / 2 {
            board = board.apply_move(2, Player::One)?;
            board = board.apply_move(2, Player::Two)?;
        }

        assert_eq!(board.legal_moves(), vec![0, 1, 3, 4, 5, 6]);
        assert!(!board.playable(2));
        Ok(())
    }

    #[test]
    pub fn from_moves_parses_and_rejects() -> Result<()> {
        let (board, to_move) = Board::from_moves("112233")?;
        assert_eq!(board.num_moves(), 6);
        assert_eq!(to_move, Player::One);

        assert!(Board::from_moves("8").is_err());
        assert!(Board::from_moves("x").is_err());
        // seventh drop into an already full column
        assert!(Board::from_moves("1111111").is_err());
        // the eighth move comes after player one has already won
        assert!(Board::from_moves("12121212").is_err());
        Ok(())
    }

    #[test]
    pub fn evaluator_scores_windows_and_center() -> Result<()> {
        let board = Board::new();
        assert_eq!(evaluate(&board, Player::One), 0);
        assert_eq!(evaluate(&board, Player::Two), 0);

        // a lone center tile is worth exactly the positional bonus
        let board = board_from(&[(3, Player::One)])?;
        assert_eq!(evaluate(&board, Player::One), 3);
        assert_eq!(evaluate(&board, Player::Two), 0);

        // bottom-row three: one 3+empty window and one 2+2 window
        let board = board_from(&[(0, Player::One), (1, Player::One), (2, Player::One)])?;
        assert_eq!(evaluate(&board, Player::One), 5 + 2);
        // the same threat viewed from the other side costs less than it earns
        assert_eq!(evaluate(&board, Player::Two), -4 - 1);

        // a completed alignment stacks the window scores and the center bonus
        let board = board_from(&[
            (0, Player::One),
            (1, Player::One),
            (2, Player::One),
            (3, Player::One),
        ])?;
        assert_eq!(evaluate(&board, Player::One), 100 + 5 + 2 + 3);
        assert_eq!(evaluate(&board, Player::Two), -4 - 1);
        Ok(())
    }

    #[test]
    pub fn position_keys_distinguish_mover_and_tiles() -> Result<()> {
        let board = Board::new();
        let one_to_move = position_key(&board, Player::One);
        let two_to_move = position_key(&board, Player::Two);
        // identical tiles, different mover: the keys differ in the turn bit
        assert_ne!(one_to_move, two_to_move);
        assert_eq!(one_to_move ^ two_to_move, 1);

        // different tiles always produce different keys
        let (left, _) = Board::from_moves("12")?;
        let (right, _) = Board::from_moves("21")?;
        assert_ne!(
            position_key(&left, Player::One),
            position_key(&right, Player::One)
        );

        // a genuine transposition reaches the same key
        let (first, first_mover) = Board::from_moves("1122")?;
        let (second, second_mover) = Board::from_moves("2211")?;
        assert_eq!(first, second);
        assert_eq!(first_mover, second_mover);
        assert_eq!(
            position_key(&first, first_mover),
            position_key(&second, second_mover)
        );
        Ok(())
    }

    #[test]
    pub fn strategies_agree_on_column_and_score() -> Result<()> {
        let positions = ["", "44", "443355", "12345"];

        for moves in positions.iter() {
            let (board, to_move) = Board::from_moves(moves)?;
            for &depth in [1, 3].iter() {
                let mut reference = None;
                for &algorithm in ALGORITHMS.iter() {
                    let mut engine = Engine::new();
                    let result = engine.select_move(&board, algorithm, depth, to_move)?;
                    match reference {
                        None => reference = Some((result.column, result.score)),
                        Some(expected) => assert_eq!(
                            (result.column, result.score),
                            expected,
                            "{:?} diverged on '{}' at depth {}",
                            algorithm,
                            moves,
                            depth
                        ),
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    pub fn selection_is_deterministic_across_cache_reuse() -> Result<()> {
        let (board, to_move) = Board::from_moves("4433")?;

        for &algorithm in [Algorithm::AlphaBetaTable, Algorithm::Mtdf].iter() {
            let mut engine = Engine::new();
            let cold = engine.select_move(&board, algorithm, 4, to_move)?;
            let warm = engine.select_move(&board, algorithm, 4, to_move)?;

            // cache reuse may change the node count but never the answer
            assert_eq!((cold.column, cold.score), (warm.column, warm.score));
            if algorithm == Algorithm::AlphaBetaTable {
                assert!(warm.nodes <= cold.nodes);
            }

            engine.reset_search_state();
            let fresh = engine.select_move(&board, algorithm, 4, to_move)?;
            assert_eq!(
                (cold.column, cold.score, cold.nodes),
                (fresh.column, fresh.score, fresh.nodes)
            );
        }
        Ok(())
    }

    #[test]
    pub fn table_prunes_no_worse_than_plain_alphabeta() -> Result<()> {
        for moves in ["", "443355", "4433"].iter() {
            let (board, to_move) = Board::from_moves(moves)?;

            let mut plain = Engine::new();
            let baseline = plain.select_move(&board, Algorithm::AlphaBeta, 4, to_move)?;

            let mut cached = Engine::new();
            let assisted = cached.select_move(&board, Algorithm::AlphaBetaTable, 4, to_move)?;

            assert_eq!((baseline.column, baseline.score), (assisted.column, assisted.score));
            assert!(assisted.nodes <= baseline.nodes);
        }
        Ok(())
    }

    #[test]
    pub fn open_three_forces_the_win() -> Result<()> {
        // an open-ended bottom-row three: both flanking columns win, the
        // lower one is found first
        let board = board_from(&[
            (1, Player::One),
            (2, Player::One),
            (3, Player::One),
            (1, Player::Two),
            (2, Player::Two),
        ])?;

        for &algorithm in ALGORITHMS.iter() {
            let mut engine = Engine::new();
            let result = engine.select_move(&board, algorithm, 4, Player::One)?;
            assert_eq!(result.column, 0, "{:?} missed the win", algorithm);
            assert!(result.score >= WIN_SCORE);
        }
        Ok(())
    }

    #[test]
    pub fn select_move_rejects_invalid_depth() {
        let mut engine = Engine::new();
        let err = engine
            .select_move(&Board::new(), Algorithm::AlphaBeta, 0, Player::One)
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::InvalidDepth { depth: 0 })
        );
    }

    #[test]
    pub fn select_move_needs_a_legal_move() -> Result<()> {
        let board = full_draw_board()?;
        let mut engine = Engine::new();
        assert!(engine
            .select_move(&board, Algorithm::AlphaBeta, 4, Player::One)
            .is_err());
        Ok(())
    }

    #[test]
    pub fn reset_search_state_clears_the_cache() -> Result<()> {
        let (board, to_move) = Board::from_moves("44")?;
        let mut engine = Engine::new();

        engine.select_move(&board, Algorithm::AlphaBetaTable, 3, to_move)?;
        assert!(engine.cached_positions() > 0);

        engine.reset_search_state();
        assert_eq!(engine.cached_positions(), 0);
        Ok(())
    }
}
