//! Puzzle file parsing.
//!
//! A puzzle file holds any number of puzzles. Each puzzle is either a single
//! line of 81 cells or a grid of nine lines of nine cells. Whitespace inside a
//! line is ignored, as are blank lines and lines starting with `#`.

use derive_more::{Display, Error};
use puzzlekit_core::{Board, BoardError};

/// Error returned when a puzzle file cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub(crate) enum InputError {
    /// A puzzle starting at `line` is malformed.
    #[display("line {line}: {source}")]
    Board { line: usize, source: BoardError },
    /// The file ends partway through a grid.
    #[display("line {line}: grid has {rows} rows, expected 9")]
    IncompleteGrid { line: usize, rows: usize },
}

/// A puzzle together with the line it starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Puzzle {
    pub(crate) line: usize,
    pub(crate) board: Board,
}

/// Parses every puzzle in `text`.
pub(crate) fn parse_puzzles(text: &str) -> Result<Vec<Puzzle>, InputError> {
    let mut puzzles = Vec::new();
    let mut grid: Vec<&str> = Vec::with_capacity(9);
    let mut grid_line = 0;

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let cells = trimmed.chars().filter(|ch| !ch.is_whitespace()).count();
        if grid.is_empty() && cells == 81 {
            puzzles.push(parse_board(trimmed, line)?);
            continue;
        }

        if grid.is_empty() {
            grid_line = line;
        }
        grid.push(trimmed);
        if grid.len() == 9 {
            puzzles.push(parse_board(&grid.join("\n"), grid_line)?);
            grid.clear();
        }
    }

    if !grid.is_empty() {
        return Err(InputError::IncompleteGrid {
            line: grid_line,
            rows: grid.len(),
        });
    }
    Ok(puzzles)
}

fn parse_board(text: &str, line: usize) -> Result<Puzzle, InputError> {
    let board = text
        .parse()
        .map_err(|source| InputError::Board { line, source })?;
    Ok(Puzzle { line, board })
}
