//! The 9x9 sudoku board.
//!
//! A [`Board`] is a plain `Copy` grid of [`Cell`]s. Solving code never mutates
//! a board it was handed; it derives a new one with [`Board::with_digit`] and
//! simply drops it when a branch fails.
//!
//! # Text format
//!
//! Boards parse from and display as text where `'1'..='9'` are given digits and
//! `'.'` marks an empty cell. The input is either nine lines of nine cells, or
//! a single line of 81 cells. Whitespace inside a line is ignored, so grouped
//! layouts such as `"53. .7. ..."` are accepted.

use std::{
    fmt::{self, Display, Write as _},
    str::FromStr,
};

use crate::{Digit, House, Position};

/// Marker used for an empty cell in the text format.
pub const EMPTY_CHAR: char = '.';

/// A single board cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// No digit placed.
    #[default]
    Empty,
    /// A placed digit.
    Filled(Digit),
}

impl Cell {
    /// Parses a cell character (`'.'` or `'1'..='9'`).
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        if ch == EMPTY_CHAR {
            return Some(Self::Empty);
        }
        match Digit::from_char(ch) {
            Some(digit) => Some(Self::Filled(digit)),
            None => None,
        }
    }

    /// Returns the text character for this cell.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Empty => EMPTY_CHAR,
            Self::Filled(digit) => digit.as_char(),
        }
    }

    /// Returns the placed digit, if any.
    #[must_use]
    pub const fn digit(self) -> Option<Digit> {
        match self {
            Self::Empty => None,
            Self::Filled(digit) => Some(digit),
        }
    }

    /// Returns `true` if no digit is placed.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.as_char())
    }
}

/// Error returned when input does not describe a well-formed 9x9 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum BoardError {
    /// The input does not have nine rows.
    #[display("expected 9 rows, found {count}")]
    RowCount {
        /// Number of rows found.
        count: usize,
    },
    /// A row does not have nine cells.
    #[display("row {row} has {len} cells, expected 9")]
    RowLength {
        /// Zero-based row index.
        row: usize,
        /// Number of cells in the row.
        len: usize,
    },
    /// Single-line input does not have 81 cells.
    #[display("expected 81 cells, found {count}")]
    CellCount {
        /// Number of cells found.
        count: usize,
    },
    /// A cell character is neither `'.'` nor a digit `'1'..='9'`.
    #[display("invalid cell {ch:?} at row {row}, column {column}")]
    InvalidCell {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// The offending character.
        ch: char,
    },
}

/// A digit placed more than once in a house.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("digit {digit} appears more than once in {house}")]
pub struct ConsistencyError {
    /// The repeated digit.
    pub digit: Digit,
    /// The house holding the repeats.
    pub house: House,
}

/// A 9x9 sudoku board.
///
/// # Examples
///
/// ```
/// use puzzlekit_core::{Board, Digit, Position};
///
/// let empty = Board::new();
/// let pos = Position::new(4, 4);
/// let board = empty.with_digit(pos, Digit::D5);
///
/// // The original board is untouched.
/// assert!(empty.is_empty_at(pos));
/// assert_eq!(board.digit_at(pos), Some(Digit::D5));
/// assert_eq!(board.empty_count(), 80);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; 9]; 9],
}

impl Board {
    /// Creates a board with every cell empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from rows of cell characters.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::RowCount`] or [`BoardError::RowLength`] if the
    /// input is not 9x9, and [`BoardError::InvalidCell`] for any character
    /// outside `'.'` and `'1'..='9'`.
    ///
    /// # Examples
    ///
    /// ```
    /// use puzzlekit_core::{Board, BoardError};
    ///
    /// let rows = vec![vec!['.'; 9]; 9];
    /// assert_eq!(Board::from_rows(&rows)?, Board::new());
    ///
    /// let short = vec![vec!['.'; 9]; 8];
    /// assert_eq!(Board::from_rows(&short), Err(BoardError::RowCount { count: 8 }));
    /// # Ok::<(), BoardError>(())
    /// ```
    pub fn from_rows<R>(rows: &[R]) -> Result<Self, BoardError>
    where
        R: AsRef<[char]>,
    {
        if rows.len() != 9 {
            return Err(BoardError::RowCount { count: rows.len() });
        }
        let mut board = Self::new();
        for (row, chars) in rows.iter().enumerate() {
            let chars = chars.as_ref();
            if chars.len() != 9 {
                return Err(BoardError::RowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (column, &ch) in chars.iter().enumerate() {
                board.cells[row][column] =
                    Cell::from_char(ch).ok_or(BoardError::InvalidCell { row, column, ch })?;
            }
        }
        Ok(board)
    }

    /// Returns the cell at `pos`.
    #[must_use]
    #[inline]
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[usize::from(pos.row())][usize::from(pos.column())]
    }

    /// Returns the digit at `pos`, if any.
    #[must_use]
    #[inline]
    pub fn digit_at(&self, pos: Position) -> Option<Digit> {
        self.cell(pos).digit()
    }

    /// Returns `true` if the cell at `pos` is empty.
    #[must_use]
    #[inline]
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.cell(pos).is_empty()
    }

    /// Sets the cell at `pos`.
    #[inline]
    pub fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[usize::from(pos.row())][usize::from(pos.column())] = cell;
    }

    /// Returns a copy of this board with `digit` placed at `pos`.
    #[must_use]
    #[inline]
    pub fn with_digit(&self, pos: Position, digit: Digit) -> Self {
        let mut board = *self;
        board.set(pos, Cell::Filled(digit));
        board
    }

    /// Returns an iterator over all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        Position::all().map(|pos| (pos, self.cell(pos)))
    }

    /// Returns the number of empty cells.
    #[must_use]
    pub fn empty_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_empty()).count()
    }

    /// Returns `true` if every cell holds a digit.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.cells.iter().flatten().all(|cell| !cell.is_empty())
    }

    /// Checks that no digit repeats within a row, column or box.
    ///
    /// Empty cells are ignored, so a partially filled board can be consistent.
    ///
    /// # Errors
    ///
    /// Returns the first repeated digit found, scanning rows, then columns,
    /// then boxes.
    pub fn check_consistency(&self) -> Result<(), ConsistencyError> {
        for house in House::ALL {
            let mut seen = 0_u16;
            for pos in house.positions() {
                let Some(digit) = self.digit_at(pos) else {
                    continue;
                };
                let bit = 1 << digit.index();
                if seen & bit != 0 {
                    return Err(ConsistencyError { digit, house });
                }
                seen |= bit;
            }
        }
        Ok(())
    }

    /// Returns `true` if the board is complete and consistent.
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.is_complete() && self.check_consistency().is_ok()
    }

    /// Returns the board as one 81-character line.
    #[must_use]
    pub fn to_line(&self) -> String {
        self.cells.iter().flatten().map(|cell| cell.as_char()).collect()
    }
}

impl FromStr for Board {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if let [line] = rows.as_slice() {
            if line.len() != 81 {
                return Err(BoardError::CellCount { count: line.len() });
            }
            let rows: Vec<&[char]> = line.chunks(9).collect();
            return Self::from_rows(&rows);
        }
        Self::from_rows(&rows)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_char('\n')?;
            }
            for cell in row {
                f.write_char(cell.as_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const PUZZLE: &str = "
        53..7....
        6..195...
        .98....6.
        8...6...3
        4..8.3..1
        7...2...6
        .6....28.
        ...419..5
        ....8..79
    ";

    const SOLUTION: &str = "
        534678912
        672195348
        198342567
        859761423
        426853791
        713924856
        961537284
        287419635
        345286179
    ";

    #[test]
    fn test_parse_grid() {
        let board: Board = PUZZLE.parse().unwrap();
        assert_eq!(board.digit_at(Position::new(0, 0)), Some(Digit::D5));
        assert_eq!(board.digit_at(Position::new(8, 8)), Some(Digit::D9));
        assert!(board.is_empty_at(Position::new(0, 2)));
        assert_eq!(board.empty_count(), 51);
        assert!(!board.is_complete());
    }

    #[test]
    fn test_parse_single_line_matches_grid() {
        let grid: Board = PUZZLE.parse().unwrap();
        let line: Board = grid.to_line().parse().unwrap();
        assert_eq!(grid, line);
        assert_eq!(grid.to_line().len(), 81);
    }

    #[test]
    fn test_parse_ignores_inner_whitespace() {
        let grouped = "
            53. .7. ...
            6.. 195 ...
            .98 ... .6.
            8.. .6. ..3
            4.. 8.3 ..1
            7.. .2. ..6
            .6. ... 28.
            ... 419 ..5
            ... .8. .79
        ";
        assert_eq!(grouped.parse::<Board>(), PUZZLE.parse::<Board>());
    }

    #[test]
    fn test_parse_rejects_bad_dimensions() {
        assert_eq!(
            "123".parse::<Board>(),
            Err(BoardError::CellCount { count: 3 })
        );
        assert_eq!(
            "123\n456".parse::<Board>(),
            Err(BoardError::RowCount { count: 2 })
        );

        let mut rows: Vec<&str> = SOLUTION.lines().filter(|l| !l.trim().is_empty()).collect();
        rows[3] = "85976142";
        assert_eq!(
            rows.join("\n").parse::<Board>(),
            Err(BoardError::RowLength { row: 3, len: 8 })
        );
    }

    #[test]
    fn test_parse_rejects_invalid_cell() {
        let line = format!("0{}", ".".repeat(80));
        assert_eq!(
            line.parse::<Board>(),
            Err(BoardError::InvalidCell {
                row: 0,
                column: 0,
                ch: '0'
            })
        );

        let mut rows = vec![vec!['.'; 9]; 9];
        rows[5][7] = 'x';
        assert_eq!(
            Board::from_rows(&rows),
            Err(BoardError::InvalidCell {
                row: 5,
                column: 7,
                ch: 'x'
            })
        );
    }

    #[test]
    fn test_display_round_trip() {
        let board: Board = PUZZLE.parse().unwrap();
        let text = board.to_string();
        assert_eq!(text.lines().count(), 9);
        assert_eq!(text.lines().next(), Some("53..7...."));
        assert_eq!(text.parse::<Board>(), Ok(board));
    }

    #[test]
    fn test_with_digit_leaves_original() {
        let board = Board::new();
        let pos = Position::new(2, 6);
        let placed = board.with_digit(pos, Digit::D4);
        assert!(board.is_empty_at(pos));
        assert_eq!(placed.cell(pos), Cell::Filled(Digit::D4));
        assert_eq!(placed.empty_count(), 80);
    }

    #[test]
    fn test_consistency() {
        let puzzle: Board = PUZZLE.parse().unwrap();
        assert!(puzzle.check_consistency().is_ok());
        assert!(!puzzle.is_solved());

        let solution: Board = SOLUTION.parse().unwrap();
        assert!(solution.is_solved());

        let row_clash = puzzle.with_digit(Position::new(0, 8), Digit::D5);
        assert_eq!(
            row_clash.check_consistency(),
            Err(ConsistencyError {
                digit: Digit::D5,
                house: House::Row { row: 0 }
            })
        );

        let column_clash = puzzle.with_digit(Position::new(8, 0), Digit::D5);
        assert_eq!(
            column_clash.check_consistency(),
            Err(ConsistencyError {
                digit: Digit::D5,
                house: House::Column { column: 0 }
            })
        );

        let box_clash = Board::new()
            .with_digit(Position::new(0, 0), Digit::D5)
            .with_digit(Position::new(1, 1), Digit::D5);
        assert_eq!(
            box_clash.check_consistency(),
            Err(ConsistencyError {
                digit: Digit::D5,
                house: House::Box { index: 0 }
            })
        );
    }

    proptest! {
        #[test]
        fn test_from_rows_reports_first_invalid_cell(
            rows in prop::collection::vec(
                prop::collection::vec(prop::sample::select(vec!['.', '1', '5', '9', '0', 'x']), 9),
                9,
            )
        ) {
            let first_bad = rows
                .iter()
                .enumerate()
                .flat_map(|(row, chars)| {
                    chars.iter().enumerate().map(move |(column, &ch)| (row, column, ch))
                })
                .find(|&(_, _, ch)| Cell::from_char(ch).is_none());

            match (Board::from_rows(&rows), first_bad) {
                (Ok(board), None) => {
                    let expected: String = rows.concat().into_iter().collect();
                    prop_assert_eq!(board.to_line(), expected);
                }
                (Err(err), Some((row, column, ch))) => {
                    prop_assert_eq!(err, BoardError::InvalidCell { row, column, ch });
                }
                (result, bad) => prop_assert!(false, "unexpected {result:?} for {bad:?}"),
            }
        }
    }

    #[test]
    fn test_cell_chars() {
        assert_eq!(Cell::from_char('.'), Some(Cell::Empty));
        assert_eq!(Cell::from_char('9'), Some(Cell::Filled(Digit::D9)));
        assert_eq!(Cell::from_char('0'), None);
        assert_eq!(Cell::Empty.to_string(), ".");
        assert_eq!(Cell::Filled(Digit::D2).to_string(), "2");
    }
}
