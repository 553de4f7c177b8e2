//! An agent for playing N-in-a-row games such as tic-tac-toe or 'Connect 4'
//!
//! Boards have any width, height and winning row length, and may drop pieces to the
//! bottom of their column. The computer picks moves with a depth-limited negamax
//! search, or at random.
//!
//! # Basic Usage
//!
//! ```
//! use inarow_ai::{board::*, rules::*, solver::*};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = create_initial_board(3, 3, 3, false, Cell::Cross)?;
//! let board = apply_move(&board, 4)?;
//! let board = choose_move(&board, None, SearchMode::Minimax);
//!
//! assert_eq!(board.num_empty(), 7);
//! assert!(!is_terminal(&board));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;

pub mod board;

pub mod config;

pub mod error;

pub mod evaluator;

pub mod outcome;

pub mod rules;

pub mod solver;

mod test;

pub use board::{create_initial_board, Board, Cell};
pub use config::{GameConfig, SearchConfig};
pub use error::{GameError, IllegalMoveReason};
pub use solver::{choose_move, SearchMode, Solver};

/// The default width of the game board in tiles
pub const DEFAULT_WIDTH: usize = 3;

/// The default height of the game board in tiles
pub const DEFAULT_HEIGHT: usize = 3;

/// The default number of pieces in a line needed to win
pub const DEFAULT_ROW_LENGTH: usize = 3;

// the default game must be winnable
const_assert!(DEFAULT_ROW_LENGTH <= DEFAULT_WIDTH || DEFAULT_ROW_LENGTH <= DEFAULT_HEIGHT);
const_assert!(DEFAULT_ROW_LENGTH >= 1);
