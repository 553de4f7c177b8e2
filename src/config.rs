//! Immutable game and search settings, built once at startup

use crate::{
    board::Cell, error::GameError, evaluator::Heuristic, solver::SearchMode, DEFAULT_HEIGHT,
    DEFAULT_ROW_LENGTH, DEFAULT_WIDTH,
};

/// The shape and rules of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    /// Number of pieces in a line needed to win
    pub row_length: usize,
    /// Pieces fall to the lowest empty cell of their column
    pub gravity: bool,
    pub first_player: Cell,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            row_length: DEFAULT_ROW_LENGTH,
            gravity: false,
            first_player: Cell::Cross,
        }
    }
}

impl GameConfig {
    pub fn new(width: usize, height: usize, row_length: usize, gravity: bool) -> Self {
        Self {
            width,
            height,
            row_length,
            gravity,
            first_player: Cell::Cross,
        }
    }

    pub fn with_first_player(mut self, first_player: Cell) -> Self {
        self.first_player = first_player;
        self
    }

    pub fn num_cells(&self) -> usize {
        self.width * self.height
    }

    /// Rejects boards on which nobody could ever win
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width == 0 || self.height == 0 {
            return Err(GameError::Configuration(format!(
                "board dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.row_length == 0 {
            return Err(GameError::Configuration(
                "row length must be at least 1".into(),
            ));
        }
        if self.row_length > self.width.max(self.height) {
            return Err(GameError::Configuration(format!(
                "row length {} exceeds board size {}x{}, no win is possible",
                self.row_length, self.width, self.height
            )));
        }
        if self.first_player == Cell::Empty {
            return Err(GameError::Configuration(
                "first player must be Cross or Nought".into(),
            ));
        }
        Ok(())
    }
}

/// How the computer opponent picks its moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// `None` searches until every line of play is decided
    pub max_depth: Option<usize>,
    pub mode: SearchMode,
    pub heuristic: Heuristic,
    /// Answer an empty board with a random move even in minimax mode
    pub random_opening: bool,
    /// Search the root's subtrees on the rayon thread pool
    pub parallel: bool,
    /// Fixed seed for the random number generator, for reproducible games
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            mode: SearchMode::Minimax,
            heuristic: Heuristic::Simple,
            random_opening: false,
            parallel: false,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_depth(max_depth: Option<usize>, mode: SearchMode) -> Self {
        Self {
            max_depth,
            mode,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_depth == Some(0) {
            return Err(GameError::Configuration(
                "search depth must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
