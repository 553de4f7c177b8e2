//! Static scoring of positions from the point of view of the side to move

use crate::{
    board::{Board, Cell, DIRECTIONS},
    rules::{is_terminal, winner},
};

use std::ops::Neg;

/// A position score with exact infinities for decided games
///
/// Variant order gives `Loss < Value(_) < Win`, so a forced result always outranks any
/// heuristic sum.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum Score {
    Loss,
    Value(i64),
    Win,
}

impl Neg for Score {
    type Output = Score;

    fn neg(self) -> Score {
        match self {
            Score::Loss => Score::Win,
            Score::Value(v) => Score::Value(-v),
            Score::Win => Score::Loss,
        }
    }
}

pub const WIN_SCORE: Score = Score::Win;
pub const LOSE_SCORE: Score = Score::Loss;
pub const TIE_SCORE: Score = Score::Value(0);

/// Which partial-run heuristic scores undecided positions
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Heuristic {
    /// Sums run lengths; a blocked run is worth as much as an open one
    Simple,
    /// Counts a run twice when one of its ends is an empty cell
    OpenEnded,
}

/// Scores `board` for the side to move
///
/// A decided board is a win or loss for the side to move (in play the winner is always
/// the side that just moved, so this is a loss), a full board is a tie, and anything
/// else is scored by the heuristic.
pub fn evaluate(board: &Board, heuristic: Heuristic) -> Score {
    if is_terminal(board) {
        return match winner(board) {
            Some(piece) if piece == board.to_move() => WIN_SCORE,
            Some(_) => LOSE_SCORE,
            None => TIE_SCORE,
        };
    }
    Score::Value(run_score(board, heuristic))
}

/// Sum of partial runs for the side to move minus those of the opponent
pub fn run_score(board: &Board, heuristic: Heuristic) -> i64 {
    let mut score = 0;
    for index in 0..board.num_cells() {
        let piece = board.cell(index);
        if piece == Cell::Empty {
            continue;
        }
        for &direction in DIRECTIONS.iter() {
            let length = board.run_length(index, direction);
            let weight = match heuristic {
                Heuristic::Simple => length,
                Heuristic::OpenEnded => {
                    let open = [
                        board.step(index, -direction, 1),
                        board.step(index, direction, length as isize),
                    ]
                    .iter()
                    .flatten()
                    .any(|&end| board.cell(end) == Cell::Empty);
                    if open {
                        2 * length
                    } else {
                        length
                    }
                }
            };

            if piece == board.to_move() {
                score += weight as i64;
            } else {
                score -= weight as i64;
            }
        }
    }
    score
}
