use puzzlekit_core::{Board, Digit, Position};
use tinyvec::ArrayVec;

use crate::PlacementState;

/// Legal columns for one digit within one free row.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CandidateRow {
    row: u8,
    columns: ArrayVec<[u8; 9]>,
}

impl CandidateRow {
    /// Returns the row index.
    #[must_use]
    pub fn row(&self) -> u8 {
        self.row
    }

    /// Returns the legal columns in ascending order.
    ///
    /// An empty slice means the digit cannot be placed in this row at all.
    #[must_use]
    pub fn columns(&self) -> &[u8] {
        &self.columns
    }
}

/// Candidate placements for a single digit.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DigitCandidates {
    rows: ArrayVec<[CandidateRow; 9]>,
    free_columns: ArrayVec<[u8; 9]>,
}

impl DigitCandidates {
    fn build(board: &Board, placed: &[Position]) -> Self {
        let free_columns: ArrayVec<[u8; 9]> = (0..9)
            .filter(|&column| placed.iter().all(|pos| pos.column() != column))
            .collect();

        let rows = (0..9)
            .filter(|&row| placed.iter().all(|pos| pos.row() != row))
            .map(|row| CandidateRow {
                row,
                columns: free_columns
                    .iter()
                    .copied()
                    .filter(|&column| is_legal(board, placed, Position::new(row, column)))
                    .collect(),
            })
            .collect();

        Self { rows, free_columns }
    }

    /// Returns the rows that do not yet hold this digit, ascending.
    #[must_use]
    pub fn rows(&self) -> &[CandidateRow] {
        &self.rows
    }

    /// Returns the columns that do not yet hold this digit, ascending.
    #[must_use]
    pub fn free_columns(&self) -> &[u8] {
        &self.free_columns
    }

    /// Returns `true` if some free row or free column has no legal cell.
    ///
    /// A blocked digit can never be completed, whatever the other digits do.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.rows.iter().any(|row| row.columns.is_empty())
            || self.free_columns.iter().any(|column| {
                !self
                    .rows
                    .iter()
                    .any(|row| row.columns.contains(column))
            })
    }
}

/// Per-digit map from free rows to the legal columns within them.
///
/// Built once from the initial board, it bounds where the search may place
/// each digit. Later placements only ever remove options, so the search still
/// re-checks every candidate against the board it is working on.
///
/// # Examples
///
/// ```
/// use puzzlekit_core::{Board, Digit, Position};
/// use puzzlekit_solver::{CandidateGraph, PlacementState};
///
/// let board = Board::new().with_digit(Position::new(0, 0), Digit::D1);
/// let state = PlacementState::extract(&board);
/// let graph = CandidateGraph::build(&board, &state);
///
/// let ones = graph.digit(Digit::D1);
/// assert_eq!(ones.rows().len(), 8);
/// // Row 1 shares the top-left box with the given 1.
/// assert_eq!(ones.rows()[0].row(), 1);
/// assert_eq!(ones.rows()[0].columns(), &[3, 4, 5, 6, 7, 8]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateGraph {
    digits: [DigitCandidates; 9],
}

impl CandidateGraph {
    /// Builds the graph for every digit of `board`.
    #[must_use]
    pub fn build(board: &Board, state: &PlacementState) -> Self {
        let digits = Digit::ALL.map(|digit| DigitCandidates::build(board, state.placements(digit)));
        Self { digits }
    }

    /// Returns the candidates for `digit`.
    #[must_use]
    pub fn digit(&self, digit: Digit) -> &DigitCandidates {
        &self.digits[digit.index()]
    }
}

/// Returns `true` if `pos` may receive a digit already placed at `placed`.
fn is_legal(board: &Board, placed: &[Position], pos: Position) -> bool {
    board.is_empty_at(pos)
        && !placed.iter().any(|p| p.box_index() == pos.box_index())
        && !placed
            .iter()
            .any(|p| p.row() == pos.row() || p.column() == pos.column())
}
