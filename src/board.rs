//! Immutable board values
//!
//! Cells are stored row-major, top row first, so the cell at `(row, col)` lives at
//! `row * width + col` and the bottom row is `height - 1`.

use crate::{config::GameConfig, error::GameError};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Cross,
    Nought,
}

/// The piece that moves after `piece`
///
/// `Empty` has no opponent and maps to itself.
pub fn other_player(piece: Cell) -> Cell {
    match piece {
        Cell::Cross => Cell::Nought,
        Cell::Nought => Cell::Cross,
        Cell::Empty => Cell::Empty,
    }
}

/// A canonical half-direction for scanning runs
///
/// Scanning every cell in these four directions covers all eight, since a run
/// read backwards is found again from its other end.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Direction {
    pub d_row: isize,
    pub d_col: isize,
}

pub const VERTICAL: Direction = Direction { d_row: -1, d_col: 0 };
pub const DIAGONAL: Direction = Direction { d_row: -1, d_col: 1 };
pub const HORIZONTAL: Direction = Direction { d_row: 0, d_col: 1 };
pub const ANTI_DIAGONAL: Direction = Direction { d_row: 1, d_col: 1 };

pub const DIRECTIONS: [Direction; 4] = [VERTICAL, DIAGONAL, HORIZONTAL, ANTI_DIAGONAL];

impl std::ops::Neg for Direction {
    type Output = Direction;

    fn neg(self) -> Direction {
        Direction {
            d_row: -self.d_row,
            d_col: -self.d_col,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Board {
    width: usize,
    height: usize,
    row_length: usize,
    gravity: bool,
    cells: Vec<Cell>,
    to_move: Cell,
}

/// Creates the empty starting board for a game
pub fn create_initial_board(
    width: usize,
    height: usize,
    row_length: usize,
    gravity: bool,
    first_player: Cell,
) -> Result<Board, GameError> {
    Board::initial(&GameConfig::new(width, height, row_length, gravity).with_first_player(first_player))
}

impl Board {
    pub fn initial(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            width: config.width,
            height: config.height,
            row_length: config.row_length,
            gravity: config.gravity,
            cells: vec![Cell::Empty; config.num_cells()],
            to_move: config.first_player,
        })
    }

    /// Builds a board with arbitrary contents
    ///
    /// No attempt is made to check the position is reachable, so pieces may float
    /// under gravity or both sides may hold a winning run.
    pub fn from_cells(config: &GameConfig, cells: Vec<Cell>, to_move: Cell) -> Result<Self, GameError> {
        let mut board = Self::initial(config)?;
        if cells.len() != board.cells.len() {
            return Err(GameError::InvalidLayout(format!(
                "expected {} cells, got {}",
                board.cells.len(),
                cells.len()
            )));
        }
        if to_move == Cell::Empty {
            return Err(GameError::Configuration(
                "the side to move must be Cross or Nought".into(),
            ));
        }
        board.cells = cells;
        board.to_move = to_move;
        Ok(board)
    }

    /// Parses a row-major layout of `X`, `O` and ` ` or `.` for empty cells
    ///
    /// Line breaks are ignored so layouts can be written one row per line.
    pub fn from_layout(config: &GameConfig, layout: &str, to_move: Cell) -> Result<Self, GameError> {
        let cells = layout
            .chars()
            .filter(|&c| c != '\n')
            .map(|c| match c {
                'X' | 'x' => Ok(Cell::Cross),
                'O' | 'o' => Ok(Cell::Nought),
                ' ' | '.' => Ok(Cell::Empty),
                _ => Err(GameError::InvalidLayout(format!(
                    "could not parse '{}' as a cell",
                    c
                ))),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_cells(config, cells, to_move)
    }

    /// The inverse of [`Board::from_layout`], using `.` for empty cells
    pub fn layout(&self) -> String {
        self.cells
            .chunks(self.width)
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Cross => 'X',
                        Cell::Nought => 'O',
                        Cell::Empty => '.',
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_length(&self) -> usize {
        self.row_length
    }

    pub fn gravity(&self) -> bool {
        self.gravity
    }

    pub fn to_move(&self) -> Cell {
        self.to_move
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cell(&self, index: usize) -> Cell {
        self.cells[index]
    }

    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.width + col]
    }

    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.width, index % self.width)
    }

    pub fn num_empty(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Empty).count()
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&c| c == Cell::Empty)
    }

    /// The index `steps` cells away from `index` along `direction`, if it is on the board
    pub fn step(&self, index: usize, direction: Direction, steps: isize) -> Option<usize> {
        let (row, col) = self.row_col(index);
        let row = row as isize + direction.d_row * steps;
        let col = col as isize + direction.d_col * steps;
        if row < 0 || col < 0 || row >= self.height as isize || col >= self.width as isize {
            None
        } else {
            Some(row as usize * self.width + col as usize)
        }
    }

    /// Length of the run of same pieces starting at `index` and extending along `direction`
    ///
    /// Capped at the row length. An empty cell has a run of 0.
    pub fn run_length(&self, index: usize, direction: Direction) -> usize {
        let piece = self.cells[index];
        if piece == Cell::Empty {
            return 0;
        }
        let mut count = 1;
        while count < self.row_length {
            match self.step(index, direction, count as isize) {
                Some(next) if self.cells[next] == piece => count += 1,
                _ => break,
            }
        }
        count
    }

    /// The successor board with the side to move placed at `index`
    ///
    /// Callers are responsible for checking the move is legal.
    pub(crate) fn play(&self, index: usize) -> Board {
        let mut cells = self.cells.clone();
        cells[index] = self.to_move;
        Board {
            cells,
            to_move: other_player(self.to_move),
            ..*self
        }
    }
}
