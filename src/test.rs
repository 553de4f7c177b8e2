#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use std::time::Instant;

    use crate::{
        board::{other_player, Board, Cell},
        config::{GameConfig, SearchConfig},
        evaluator::{evaluate, Heuristic, Score},
        outcome::{outcome, Outcome},
        rules::{apply_move, is_terminal, legal_moves, winner},
        solver::{choose_move, SearchMode, Solver},
    };

    /// The single cell that differs between a board and its successor
    fn played_index(before: &Board, after: &Board) -> Result<usize> {
        let changed: Vec<usize> = (0..before.num_cells())
            .filter(|&i| before.cell(i) != after.cell(i))
            .collect();
        match changed.as_slice() {
            [index] => Ok(*index),
            _ => Err(anyhow!("expected one changed cell, found {:?}", changed)),
        }
    }

    /// Exact game value by exhaustive minimax, without pruning
    fn exact_value(board: &Board, node_count: &mut usize) -> Score {
        *node_count += 1;
        let moves = legal_moves(board);
        if moves.is_empty() {
            return evaluate(board, Heuristic::Simple);
        }
        moves
            .into_iter()
            .map(|index| -exact_value(&apply_move(board, index).unwrap(), node_count))
            .max()
            .unwrap()
    }

    fn tic_tac_toe(layout: &str, to_move: Cell) -> Result<Board> {
        Ok(Board::from_layout(&GameConfig::default(), layout, to_move)?)
    }

    fn minimax(max_depth: Option<usize>) -> Solver {
        Solver::new(SearchConfig::with_depth(max_depth, SearchMode::Minimax))
    }

    #[test]
    pub fn opening_is_corner_or_centre() -> Result<()> {
        let board = Board::initial(&GameConfig::default())?;
        let mut solver = minimax(Some(9));
        let start_time = Instant::now();
        let next = solver.choose_move(&board);
        let time = Instant::now() - start_time;

        let index = played_index(&board, &next)?;
        assert!([0, 2, 4, 6, 8].contains(&index), "opened on edge {}", index);
        assert_eq!(next.cell(index), Cell::Cross);

        // pruning must beat the 549946 nodes of the full tree
        let mut full_tree = 0;
        assert_eq!(exact_value(&board, &mut full_tree), Score::Value(0));
        assert!(solver.node_count < full_tree);

        println!(
            "Opening search\n Time: {:.6}s, No. of positions: {}, full tree: {}",
            time.as_secs_f64(),
            solver.node_count,
            full_tree
        );
        Ok(())
    }

    #[test]
    pub fn takes_the_win_instead_of_blocking() -> Result<()> {
        let board = tic_tac_toe("XX.OO....", Cell::Cross)?;
        for depth in [Some(1), Some(2), Some(5), None] {
            let next = minimax(depth).choose_move(&board);
            assert_eq!(played_index(&board, &next)?, 2, "depth {:?}", depth);
            assert_eq!(winner(&next), Some(Cell::Cross));
        }
        Ok(())
    }

    #[test]
    pub fn blocks_the_only_threat() -> Result<()> {
        let board = tic_tac_toe("XX..O....", Cell::Nought)?;
        for depth in [Some(2), None] {
            let next = minimax(depth).choose_move(&board);
            assert_eq!(played_index(&board, &next)?, 2, "depth {:?}", depth);
        }
        Ok(())
    }

    #[test]
    pub fn forced_win_beats_heuristic() -> Result<()> {
        // plenty of earlier cells to admire, but only 22 finishes the row
        let config = GameConfig::new(5, 5, 3, false);
        let board = Board::from_layout(
            &config,
            ".....\n.....\nOO.O.\n.....\n...XX",
            Cell::Cross,
        )?;
        for heuristic in [Heuristic::Simple, Heuristic::OpenEnded] {
            let mut solver = Solver::new(SearchConfig {
                max_depth: Some(3),
                heuristic,
                ..SearchConfig::default()
            });
            let result = solver.search(&board);
            assert_eq!(result.score, Score::Win);
            assert_eq!(played_index(&board, &result.board)?, 22);
        }
        Ok(())
    }

    #[test]
    pub fn full_board_is_a_tie() -> Result<()> {
        let board = tic_tac_toe("XOXXOOOXX", Cell::Nought)?;
        assert!(is_terminal(&board));
        assert_eq!(winner(&board), None);
        assert_eq!(outcome(&board, Cell::Cross), Some(Outcome::Tie));
        // nothing to choose on a finished board
        assert_eq!(choose_move(&board, Some(3), SearchMode::Minimax), board);
        assert_eq!(choose_move(&board, Some(3), SearchMode::Random), board);
        Ok(())
    }

    #[test]
    pub fn gravity_stacks_columns() -> Result<()> {
        let config = GameConfig::new(4, 4, 3, true);
        let board = Board::from_layout(&config, "....\n....\n....\nX...", Cell::Nought)?;
        let moves = legal_moves(&board);
        assert!(moves.contains(&8));
        assert!(!moves.contains(&4));
        assert!(!moves.contains(&0));

        let board = apply_move(&board, 8)?;
        assert!(legal_moves(&board).contains(&4));
        assert!(!legal_moves(&board).contains(&0));
        Ok(())
    }

    #[test]
    pub fn minimax_plays_perfectly() -> Result<()> {
        let empty = Board::initial(&GameConfig::default())?;
        for first in 0..9 {
            let board = apply_move(&empty, first)?;
            let mut nodes = 0;
            let value = exact_value(&board, &mut nodes);

            let next = minimax(None).choose_move(&board);
            let reply = -exact_value(&next, &mut nodes);
            assert_eq!(
                reply, value,
                "reply to {} at {} is not optimal",
                first,
                played_index(&board, &next)?
            );
        }
        Ok(())
    }

    #[test]
    pub fn perfect_play_is_a_draw() -> Result<()> {
        let mut board = Board::initial(&GameConfig::default())?;
        let mut solver = minimax(None);
        while !is_terminal(&board) {
            board = solver.choose_move(&board);
        }
        assert_eq!(winner(&board), None);
        Ok(())
    }

    #[test]
    pub fn never_loses_to_random() -> Result<()> {
        for seed in 0..20u64 {
            let ai = if seed % 2 == 0 { Cell::Cross } else { Cell::Nought };
            let mut solver = minimax(None);
            let mut random = Solver::new(SearchConfig {
                mode: SearchMode::Random,
                seed: Some(seed),
                ..SearchConfig::default()
            });

            let mut board = Board::initial(&GameConfig::default())?;
            while !is_terminal(&board) {
                board = if board.to_move() == ai {
                    solver.choose_move(&board)
                } else {
                    random.choose_move(&board)
                };
            }
            assert_ne!(
                outcome(&board, other_player(ai)),
                Some(Outcome::HumanWin),
                "lost with seed {}: {}",
                seed,
                board.layout()
            );
        }
        Ok(())
    }

    #[test]
    pub fn random_mode_is_reproducible() -> Result<()> {
        let config = SearchConfig {
            mode: SearchMode::Random,
            seed: Some(7),
            ..SearchConfig::default()
        };
        let play_out = |mut solver: Solver| -> Result<Vec<String>> {
            let mut board = Board::initial(&GameConfig::new(4, 4, 3, true))?;
            let mut history = vec![];
            while !is_terminal(&board) {
                let next = solver.choose_move(&board);
                assert!(legal_moves(&board).contains(&played_index(&board, &next)?));
                board = next;
                history.push(board.layout());
            }
            Ok(history)
        };
        assert_eq!(play_out(Solver::new(config))?, play_out(Solver::new(config))?);
        Ok(())
    }

    #[test]
    pub fn random_opening_only_on_blank_boards() -> Result<()> {
        let random_opening = SearchConfig {
            random_opening: true,
            seed: Some(3),
            ..SearchConfig::default()
        };
        let random = SearchConfig {
            mode: SearchMode::Random,
            seed: Some(3),
            ..SearchConfig::default()
        };

        let empty = Board::initial(&GameConfig::default())?;
        let opening = Solver::new(random_opening).choose_move(&empty);
        assert_eq!(opening, Solver::new(random).choose_move(&empty));
        assert_eq!(opening.num_empty(), 8);

        // once a piece is down the search takes over
        let board = tic_tac_toe("XX..O....", Cell::Nought)?;
        let next = Solver::new(random_opening).choose_move(&board);
        assert_eq!(played_index(&board, &next)?, 2);
        Ok(())
    }

    #[test]
    pub fn parallel_search_matches_serial() -> Result<()> {
        let positions = [
            (GameConfig::default(), "X........", Cell::Nought, None),
            (GameConfig::default(), "X...O...X", Cell::Nought, None),
            (GameConfig::default(), "XX.OO....", Cell::Cross, Some(2)),
            (GameConfig::new(4, 4, 3, true), "....\n....\n.O..\n.XX.", Cell::Nought, Some(4)),
            (GameConfig::new(5, 4, 4, false), ".....\n..X..\n..O..\n.....", Cell::Cross, Some(3)),
        ];

        for (config, layout, to_move, max_depth) in positions.iter() {
            let board = Board::from_layout(config, layout, *to_move)?;
            for heuristic in [Heuristic::Simple, Heuristic::OpenEnded] {
                let serial = SearchConfig {
                    max_depth: *max_depth,
                    heuristic,
                    ..SearchConfig::default()
                };
                let parallel = SearchConfig {
                    parallel: true,
                    ..serial
                };
                let expected = Solver::new(serial).search(&board);
                let actual = Solver::new(parallel).search(&board);
                assert_eq!(actual.board, expected.board, "position {}", layout);
                assert_eq!(actual.score, expected.score, "position {}", layout);
            }
        }
        Ok(())
    }

    #[test]
    pub fn gravity_game_completes() -> Result<()> {
        let config = GameConfig::new(5, 4, 4, true);
        let mut board = Board::initial(&config)?;
        let mut solver = Solver::new(SearchConfig {
            max_depth: Some(4),
            heuristic: Heuristic::OpenEnded,
            ..SearchConfig::default()
        });
        while !is_terminal(&board) {
            let next = solver.choose_move(&board);
            let index = played_index(&board, &next)?;
            let below = index + config.width;
            assert!(below >= config.num_cells() || board.cell(below) != Cell::Empty);
            board = next;
        }
        assert!(outcome(&board, Cell::Cross).is_some());
        Ok(())
    }

    pub mod properties {
        use proptest::prelude::*;

        use crate::{
            board::{Board, Cell},
            config::GameConfig,
            rules::{apply_move, legal_moves, winner},
        };

        const ALL_DIRECTIONS: [(isize, isize); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];

        /// Whether `piece` fills some straight line of `row_length` cells
        fn has_line(board: &Board, piece: Cell) -> bool {
            let (width, height) = (board.width() as isize, board.height() as isize);
            let length = board.row_length() as isize;
            (0..height).any(|row| {
                (0..width).any(|col| {
                    ALL_DIRECTIONS.iter().any(|&(d_row, d_col)| {
                        (0..length).all(|k| {
                            let (r, c) = (row + d_row * k, col + d_col * k);
                            r >= 0
                                && c >= 0
                                && r < height
                                && c < width
                                && board.cell_at(r as usize, c as usize) == piece
                        })
                    })
                })
            })
        }

        fn any_board() -> impl Strategy<Value = Board> {
            (1usize..=5, 1usize..=5, any::<bool>())
                .prop_flat_map(|(width, height, gravity)| {
                    (
                        Just(width),
                        Just(height),
                        1..=width.max(height),
                        Just(gravity),
                        prop::collection::vec(
                            prop::sample::select(vec![Cell::Empty, Cell::Cross, Cell::Nought]),
                            width * height,
                        ),
                        prop::sample::select(vec![Cell::Cross, Cell::Nought]),
                    )
                })
                .prop_map(|(width, height, row_length, gravity, cells, to_move)| {
                    let config = GameConfig::new(width, height, row_length, gravity);
                    Board::from_cells(&config, cells, to_move).unwrap()
                })
        }

        /// A position reached by legal play on a gravity board
        fn played_gravity_board() -> impl Strategy<Value = Board> {
            (
                2usize..=6,
                2usize..=5,
                prop::collection::vec(any::<prop::sample::Index>(), 0..30),
            )
                .prop_map(|(width, height, choices)| {
                    let row_length = 3usize.min(width.max(height));
                    let config = GameConfig::new(width, height, row_length, true);
                    let mut board = Board::initial(&config).unwrap();
                    for choice in choices {
                        let moves = legal_moves(&board);
                        if moves.is_empty() {
                            break;
                        }
                        board = apply_move(&board, *choice.get(&moves)).unwrap();
                    }
                    board
                })
        }

        proptest! {
            #[test]
            fn winner_matches_brute_force(board in any_board()) {
                let crosses = has_line(&board, Cell::Cross);
                let noughts = has_line(&board, Cell::Nought);
                match winner(&board) {
                    Some(piece) => prop_assert!(has_line(&board, piece)),
                    None => prop_assert!(!crosses && !noughts),
                }
            }

            #[test]
            fn legal_moves_are_empty_cells(board in any_board()) {
                for index in legal_moves(&board) {
                    prop_assert_eq!(board.cell(index), Cell::Empty);
                }
            }

            #[test]
            fn apply_move_copies(board in any_board()) {
                let before = board.clone();
                for index in legal_moves(&board) {
                    let next = apply_move(&board, index).unwrap();
                    prop_assert_eq!(next.cell(index), board.to_move());
                    prop_assert_eq!(&board, &before);
                }
            }

            #[test]
            fn gravity_allows_the_lowest_cell_only(board in played_gravity_board()) {
                let moves = legal_moves(&board);
                let decided = winner(&board).is_some();
                for col in 0..board.width() {
                    let in_column: Vec<usize> = moves
                        .iter()
                        .copied()
                        .filter(|&i| i % board.width() == col)
                        .collect();
                    prop_assert!(in_column.len() <= 1);

                    let lowest_empty = (0..board.height())
                        .rev()
                        .map(|row| board.index(row, col))
                        .find(|&i| board.cell(i) == Cell::Empty);
                    if !decided {
                        prop_assert_eq!(in_column.first().copied(), lowest_empty);
                    }
                }
            }
        }
    }
}
