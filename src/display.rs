use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, Print, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use inarow_ai::{Board, Cell};

/// Draws the board one row per line, top row first
///
/// Empty cells show the number a human types to play there. Under gravity the
/// column numbers are shown above the board instead.
pub fn display_board(board: &Board) -> Result<()> {
    let mut stdout = stdout();
    let cell_width = board.num_cells().to_string().len();

    if board.gravity() {
        let header: String = (1..=board.width())
            .map(|column| format!("[{:>w$}]", column, w = cell_width))
            .collect();
        stdout.queue(PrintStyledContent(
            style(header + "\n").attribute(Attribute::Bold),
        ))?;
    }

    for row in 0..board.height() {
        for col in 0..board.width() {
            let index = board.index(row, col);
            let glyph = match board.cell(index) {
                Cell::Cross => style(format!("{:^w$}", "X", w = cell_width))
                    .attribute(Attribute::Bold)
                    .with(Color::Red),
                Cell::Nought => style(format!("{:^w$}", "O", w = cell_width))
                    .attribute(Attribute::Bold)
                    .with(Color::Yellow),
                Cell::Empty if board.gravity() => style(" ".repeat(cell_width)),
                Cell::Empty => {
                    style(format!("{:>w$}", index + 1, w = cell_width)).with(Color::DarkGrey)
                }
            };
            stdout
                .queue(Print("["))?
                .queue(PrintStyledContent(glyph))?
                .queue(Print("]"))?;
        }
        stdout.queue(Print("\n"))?;
    }
    stdout.flush()?;
    Ok(())
}
