//! Cross-hatching backtracking solver for 9x9 sudoku.
//!
//! Solving runs in three stages:
//!
//! 1. [`PlacementState::extract`] records where each digit already sits and how
//!    many placements it still needs.
//! 2. [`CandidateGraph::build`] lists, per digit, every free row and the legal
//!    columns within it.
//! 3. [`BacktrackSolver`] places digits most-constrained-first (see
//!    [`DigitOrder`]), row by row, column by column, discarding a branch's board
//!    whenever it cannot be completed.
//!
//! # Examples
//!
//! ```
//! use puzzlekit_core::Board;
//! use puzzlekit_solver::solve;
//!
//! let puzzle: Board = "
//!     53..7....
//!     6..195...
//!     .98....6.
//!     8...6...3
//!     4..8.3..1
//!     7...2...6
//!     .6....28.
//!     ...419..5
//!     ....8..79
//! "
//! .parse()?;
//!
//! let solution = solve(&puzzle)?;
//! assert!(solution.is_solved());
//! assert_eq!(&solution.to_line()[..9], "534678912");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use self::{backtrack_solver::*, error::*, graph::*, state::*};

mod backtrack_solver;
mod error;
mod graph;
mod state;

#[cfg(test)]
mod testing;
