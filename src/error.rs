//! Errors surfaced by the game core

/// Why a requested cell cannot be played
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveReason {
    #[error("cell is off the board")]
    OutOfRange,

    #[error("cell is already occupied")]
    Occupied,

    #[error("the game is already decided")]
    GameOver,

    #[error("cell is not the lowest empty cell of its column")]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("illegal move at cell {index}: {reason}")]
    IllegalMove {
        index: usize,
        reason: IllegalMoveReason,
    },

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),
}
