use log::{debug, trace};
use puzzlekit_core::{Board, Digit, Position};

use crate::{CandidateGraph, DigitOrder, PlacementState, Unsolvable};

/// Counters collected during a backtracking search.
///
/// # Examples
///
/// ```
/// use puzzlekit_core::Board;
/// use puzzlekit_solver::{BacktrackSolver, SearchStats};
///
/// let solver = BacktrackSolver::new();
/// let mut stats = SearchStats::new();
/// let solved = solver.solve_with_stats(&Board::new(), &mut stats)?;
///
/// assert!(solved.is_solved());
/// assert!(stats.placements() >= 81);
/// # Ok::<(), puzzlekit_solver::Unsolvable>(())
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    placements: u64,
    backtracks: u64,
    pruned: u64,
}

impl SearchStats {
    /// Creates an empty statistics object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of tentative placements made.
    #[must_use]
    pub fn placements(&self) -> u64 {
        self.placements
    }

    /// Returns the number of placements undone after their branch failed.
    #[must_use]
    pub fn backtracks(&self) -> u64 {
        self.backtracks
    }

    /// Returns the number of branches cut before descending into them.
    #[must_use]
    pub fn pruned(&self) -> u64 {
        self.pruned
    }
}

/// A cross-hatching backtracking solver.
///
/// Digits are filled one at a time in [`DigitOrder`]. For the current digit
/// the solver walks its free rows in ascending order and tries each legal
/// column in ascending order, producing a new [`Board`] per placement. When a
/// branch fails its board is dropped and the next column is tried.
///
/// With pruning enabled (the default) a placement is abandoned as soon as some
/// row or column still owed a digit has no empty cell left for it. Such a
/// branch could never complete, so pruning changes the amount of work but
/// never which solution is found.
///
/// # Examples
///
/// ```
/// use puzzlekit_core::{Board, Digit, Position};
/// use puzzlekit_solver::{BacktrackSolver, Unsolvable};
///
/// let solver = BacktrackSolver::new();
///
/// let solved = solver.solve(&Board::new())?;
/// assert_eq!(solved.digit_at(Position::new(0, 0)), Some(Digit::D1));
///
/// let clash = Board::new()
///     .with_digit(Position::new(0, 0), Digit::D5)
///     .with_digit(Position::new(0, 8), Digit::D5);
/// assert!(matches!(solver.solve(&clash), Err(Unsolvable::ConflictingGivens(_))));
/// # Ok::<(), Unsolvable>(())
/// ```
#[derive(Debug, Clone)]
pub struct BacktrackSolver {
    pruning: bool,
}

impl Default for BacktrackSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl BacktrackSolver {
    /// Creates a solver with dead-branch pruning enabled.
    #[must_use]
    pub fn new() -> Self {
        Self { pruning: true }
    }

    /// Disables dead-branch pruning.
    ///
    /// The search then only fails a branch when it reaches a row with no
    /// usable column. Results are identical; only the amount of work differs.
    #[must_use]
    pub fn without_pruning(mut self) -> Self {
        self.pruning = false;
        self
    }

    /// Solves `board`, returning the completed grid.
    ///
    /// # Errors
    ///
    /// Returns [`Unsolvable::ConflictingGivens`] if the givens repeat a digit
    /// within a house, or [`Unsolvable::SearchExhausted`] if no completion
    /// exists.
    pub fn solve(&self, board: &Board) -> Result<Board, Unsolvable> {
        self.solve_with_stats(board, &mut SearchStats::new())
    }

    /// Solves `board`, accumulating counters into `stats`.
    ///
    /// # Errors
    ///
    /// See [`solve`](Self::solve).
    pub fn solve_with_stats(
        &self,
        board: &Board,
        stats: &mut SearchStats,
    ) -> Result<Board, Unsolvable> {
        debug!("solving board with {} empty cells", board.empty_count());
        if let Err(err) = board.check_consistency() {
            debug!("rejecting board: {err}");
            return Err(err.into());
        }

        let state = PlacementState::extract(board);
        let graph = CandidateGraph::build(board, &state);
        let order = state.digit_order();

        if self.pruning && Digit::ALL.iter().any(|&d| graph.digit(d).is_blocked()) {
            debug!("rejecting board: a digit has a row or column with no legal cell");
            stats.pruned += 1;
            return Err(Unsolvable::SearchExhausted);
        }

        let mut search = Search {
            state: &state,
            graph: &graph,
            order,
            pruning: self.pruning,
            stats,
        };
        let result = search
            .fill_digit(*board, 0)
            .ok_or(Unsolvable::SearchExhausted);
        debug!(
            "search finished: solved={}, placements={}, backtracks={}, pruned={}",
            result.is_ok(),
            search.stats.placements,
            search.stats.backtracks,
            search.stats.pruned
        );
        result
    }
}

/// Solves `board` with a default [`BacktrackSolver`].
///
/// # Errors
///
/// See [`BacktrackSolver::solve`].
pub fn solve(board: &Board) -> Result<Board, Unsolvable> {
    BacktrackSolver::new().solve(board)
}

/// Rows, columns and boxes already holding the digit being placed.
#[derive(Debug, Clone, Copy, Default)]
struct Occupancy {
    rows: u16,
    columns: u16,
    boxes: u16,
}

impl Occupancy {
    fn from_positions(positions: &[Position]) -> Self {
        positions
            .iter()
            .fold(Self::default(), |occupancy, &pos| occupancy.with(pos))
    }

    fn admits(self, pos: Position) -> bool {
        self.rows & (1 << pos.row()) == 0
            && self.columns & (1 << pos.column()) == 0
            && self.boxes & (1 << pos.box_index()) == 0
    }

    #[must_use]
    fn with(self, pos: Position) -> Self {
        Self {
            rows: self.rows | (1 << pos.row()),
            columns: self.columns | (1 << pos.column()),
            boxes: self.boxes | (1 << pos.box_index()),
        }
    }
}

struct Search<'a> {
    state: &'a PlacementState,
    graph: &'a CandidateGraph,
    order: DigitOrder,
    pruning: bool,
    stats: &'a mut SearchStats,
}

impl Search<'_> {
    /// Starts placing the digit at step `step` of the order.
    fn fill_digit(&mut self, board: Board, step: usize) -> Option<Board> {
        let Some(digit) = self.order.get(step) else {
            return Some(board);
        };
        trace!(
            "placing digit {digit} in {} rows",
            self.graph.digit(digit).rows().len()
        );
        let occupancy = Occupancy::from_positions(self.state.placements(digit));
        self.fill_row(board, digit, occupancy, step, 0)
    }

    /// Places `digit` in its `row_index`-th free row, then recurses.
    fn fill_row(
        &mut self,
        board: Board,
        digit: Digit,
        occupancy: Occupancy,
        step: usize,
        row_index: usize,
    ) -> Option<Board> {
        let graph = self.graph;
        let Some(candidate) = graph.digit(digit).rows().get(row_index) else {
            return self.fill_digit(board, step + 1);
        };

        for &column in candidate.columns() {
            let pos = Position::new(candidate.row(), column);
            // earlier rows of this digit and earlier digits may have taken it
            if !board.is_empty_at(pos) || !occupancy.admits(pos) {
                continue;
            }

            let placed = board.with_digit(pos, digit);
            let occupancy = occupancy.with(pos);
            self.stats.placements += 1;

            if self.pruning && !self.has_room(&placed, digit, occupancy, step, row_index + 1) {
                self.stats.pruned += 1;
                continue;
            }
            if let Some(solved) = self.fill_row(placed, digit, occupancy, step, row_index + 1) {
                return Some(solved);
            }
            self.stats.backtracks += 1;
        }
        None
    }

    /// Returns `false` if some row or column still owed a digit has no empty
    /// legal cell left on `board`.
    fn has_room(
        &self,
        board: &Board,
        digit: Digit,
        occupancy: Occupancy,
        step: usize,
        next_row: usize,
    ) -> bool {
        let current = &self.graph.digit(digit).rows()[next_row..];
        let current_ok = current.iter().all(|candidate| {
            candidate.columns().iter().any(|&column| {
                let pos = Position::new(candidate.row(), column);
                board.is_empty_at(pos) && occupancy.admits(pos)
            })
        });
        if !current_ok {
            return false;
        }

        self.order.digits()[step + 1..].iter().all(|&later| {
            let candidates = self.graph.digit(later);
            let rows_ok = candidates.rows().iter().all(|candidate| {
                candidate
                    .columns()
                    .iter()
                    .any(|&column| board.is_empty_at(Position::new(candidate.row(), column)))
            });
            rows_ok
                && candidates.free_columns().iter().all(|&column| {
                    candidates.rows().iter().any(|candidate| {
                        candidate.columns().contains(&column)
                            && board.is_empty_at(Position::new(candidate.row(), column))
                    })
                })
        })
    }
}
