//! Legal moves, win detection and terminal classification

use crate::{
    board::{Board, Cell, DIRECTIONS},
    error::{GameError, IllegalMoveReason},
};

/// Every cell the side to move may play, in the order the search tries them
///
/// A decided game has no legal moves. Under gravity only the lowest empty cell of each
/// column is playable; bottom-row cells come first, then the rest in index order.
pub fn legal_moves(board: &Board) -> Vec<usize> {
    if winner(board).is_some() {
        return Vec::new();
    }

    let cells = board.cells();
    if !board.gravity() {
        return (0..cells.len())
            .filter(|&i| cells[i] == Cell::Empty)
            .collect();
    }

    let width = board.width();
    let bottom_row = board.num_cells() - width;
    let bottom = (bottom_row..cells.len()).filter(|&i| cells[i] == Cell::Empty);
    // the cell directly below is occupied
    let supported =
        (0..bottom_row).filter(|&i| cells[i] == Cell::Empty && cells[i + width] != Cell::Empty);
    bottom.chain(supported).collect()
}

/// The lowest playable cell of `column`, if any
///
/// Under gravity this is the only legal cell of the column.
pub fn legal_move_in_column(board: &Board, column: usize) -> Option<usize> {
    if column >= board.width() {
        return None;
    }
    legal_moves(board)
        .into_iter()
        .filter(|&i| i % board.width() == column)
        .max()
}

/// The piece holding a full run, if any
///
/// Runs are measured from every occupied cell along the four half-directions, which
/// finds each straight line once from its first cell.
pub fn winner(board: &Board) -> Option<Cell> {
    (0..board.num_cells())
        .filter(|&i| board.cell(i) != Cell::Empty)
        .find(|&i| {
            DIRECTIONS
                .iter()
                .any(|&direction| board.run_length(i, direction) == board.row_length())
        })
        .map(|i| board.cell(i))
}

/// Whether play has ended, by a win or by running out of playable cells
pub fn is_terminal(board: &Board) -> bool {
    legal_moves(board).is_empty()
}

/// The board after the side to move plays `index`
///
/// The input board is left untouched.
pub fn apply_move(board: &Board, index: usize) -> Result<Board, GameError> {
    if legal_moves(board).contains(&index) {
        return Ok(board.play(index));
    }

    let reason = if index >= board.num_cells() {
        IllegalMoveReason::OutOfRange
    } else if winner(board).is_some() {
        IllegalMoveReason::GameOver
    } else if board.cell(index) != Cell::Empty {
        IllegalMoveReason::Occupied
    } else {
        IllegalMoveReason::Unsupported
    };
    Err(GameError::IllegalMove { index, reason })
}
