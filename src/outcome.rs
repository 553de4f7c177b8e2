//! Results of finished rounds and the running score between human and computer

use std::fmt;

use crate::{
    board::{Board, Cell},
    rules::{is_terminal, winner},
};

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    HumanWin,
    AiWin,
    Tie,
}

/// Classifies a board for a human playing `human`, `None` while play continues
pub fn outcome(board: &Board, human: Cell) -> Option<Outcome> {
    // a win takes precedence over a board that also happens to be full
    match winner(board) {
        Some(piece) if piece == human => Some(Outcome::HumanWin),
        Some(_) => Some(Outcome::AiWin),
        None if is_terminal(board) => Some(Outcome::Tie),
        None => None,
    }
}

pub fn outcome_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::HumanWin => "Human wins.",
        Outcome::AiWin => "AI wins.",
        Outcome::Tie => "Tie.",
    }
}

/// Rounds won by each side across a session
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug)]
pub struct Tally {
    pub human: usize,
    pub ai: usize,
    pub tie: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::HumanWin => self.human += 1,
            Outcome::AiWin => self.ai += 1,
            Outcome::Tie => self.tie += 1,
        }
    }

    pub fn rounds(&self) -> usize {
        self.human + self.ai + self.tie
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Human: {}\nAI:    {}\nTie:   {}", self.human, self.ai, self.tie)
    }
}
