//! An agent to pick the computer's moves
//!
//! The search is a depth-limited negamax with fail-soft alpha-beta pruning. Every node
//! owns its own [`Board`], so sibling subtrees share nothing and the root can be split
//! across threads.
//!
//! # Cost
//! The tree grows roughly as `b^d` where the branching factor `b` is the number of
//! playable cells. Without a depth limit a large open board will not finish in any
//! reasonable time; bound the search with [`SearchConfig::max_depth`].

use log::{debug, trace};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{
    board::Board,
    config::SearchConfig,
    evaluator::{evaluate, Heuristic, Score},
    rules::{is_terminal, legal_moves},
};

/// How the computer chooses among its legal moves
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SearchMode {
    Minimax,
    Random,
}

/// A scored position and the board the search would move to
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub score: Score,
    pub board: Board,
}

/// Plain negamax search state, one per thread of work
struct Negamax {
    heuristic: Heuristic,
    node_count: usize,
}

impl Negamax {
    fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            node_count: 0,
        }
    }

    /// Scores `board` for its side to move and picks the child that achieves it
    ///
    /// At a leaf the board itself is returned since there is nothing to choose.
    fn search(&mut self, board: &Board, mut alpha: Score, beta: Score, depth_left: usize) -> SearchResult {
        self.node_count += 1;

        let moves = legal_moves(board);
        if moves.is_empty() || depth_left == 0 {
            return SearchResult {
                score: evaluate(board, self.heuristic),
                board: board.clone(),
            };
        }

        let mut children: Vec<Board> = moves.into_iter().map(|index| board.play(index)).collect();

        let mut best_score = Score::Loss;
        let mut best_child = 0;
        for (i, child) in children.iter().enumerate() {
            // the search window is flipped for the other player
            let score = -self.search(child, -beta, -alpha, depth_left - 1).score;
            // the opponent will never allow this line, stop looking at siblings
            if score >= beta {
                return SearchResult {
                    score,
                    board: child.clone(),
                };
            }
            if score > best_score {
                best_score = score;
                best_child = i;
                if score > alpha {
                    alpha = score;
                }
            }
        }

        SearchResult {
            score: best_score,
            board: children.swap_remove(best_child),
        }
    }
}

/// Chooses moves for the computer player
///
/// # Notes
/// In [`SearchMode::Minimax`] a forced win at any depth is always preferred over an
/// undecided position, however good the heuristic makes it look. Ties between equally
/// scored moves go to the first move in [`legal_moves`] order.
pub struct Solver {
    config: SearchConfig,
    rng: StdRng,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver`, seeding its random source from the config or the OS
    pub fn new(config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            config,
            rng,
            node_count: 0,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// The board after the computer's move
    ///
    /// A board that is already decided is handed back unchanged.
    pub fn choose_move(&mut self, board: &Board) -> Board {
        if is_terminal(board) {
            return board.clone();
        }

        let random = match self.config.mode {
            SearchMode::Random => true,
            SearchMode::Minimax => self.config.random_opening && board.is_blank(),
        };
        if random {
            return self.random_move(board);
        }

        self.search(board).board
    }

    /// Runs the full-window search from `board` at the configured depth
    pub fn search(&mut self, board: &Board) -> SearchResult {
        // no line of play is longer than the number of empty cells
        let depth = self.config.max_depth.unwrap_or_else(|| board.num_empty());
        let result = if self.config.parallel && depth > 0 && !is_terminal(board) {
            self.parallel_search(board, depth)
        } else {
            let mut negamax = Negamax::new(self.config.heuristic);
            let result = negamax.search(board, Score::Loss, Score::Win, depth);
            self.node_count += negamax.node_count;
            result
        };

        debug!(
            "searched {} nodes to depth {}, score {:?}, next {}",
            self.node_count,
            depth,
            result.score,
            result.board.layout()
        );
        result
    }

    /// Searches each root child on its own thread with a full window
    ///
    /// Taking the first child with the highest exact score picks the same move as the
    /// serial search, which only narrows the window for later siblings.
    fn parallel_search(&mut self, board: &Board, depth: usize) -> SearchResult {
        let heuristic = self.config.heuristic;
        let children: Vec<Board> = legal_moves(board)
            .into_iter()
            .map(|index| board.play(index))
            .collect();

        let scored: Vec<(Score, usize)> = children
            .par_iter()
            .map(|child| {
                let mut negamax = Negamax::new(heuristic);
                let score = -negamax.search(child, Score::Loss, Score::Win, depth - 1).score;
                (score, negamax.node_count)
            })
            .collect();

        self.node_count += 1 + scored.iter().map(|&(_, nodes)| nodes).sum::<usize>();

        let mut best_score = Score::Loss;
        let mut best_child = 0;
        for (i, &(score, _)) in scored.iter().enumerate() {
            if score > best_score {
                best_score = score;
                best_child = i;
            }
        }

        SearchResult {
            score: best_score,
            board: children[best_child].clone(),
        }
    }

    fn random_move(&mut self, board: &Board) -> Board {
        let moves = legal_moves(board);
        let index = moves[self.rng.random_range(0..moves.len())];
        trace!("random move at cell {} from {:?}", index, moves);
        board.play(index)
    }
}

/// One-shot move choice with an OS-seeded random source
///
/// `max_depth = None` searches to the end of the game.
pub fn choose_move(board: &Board, max_depth: Option<usize>, mode: SearchMode) -> Board {
    Solver::new(SearchConfig::with_depth(max_depth, mode)).choose_move(board)
}
