//! Core data structures for the puzzlekit sudoku solver.
//!
//! This crate provides the value types shared by the constraint solver and the
//! command-line front end. Every type here is a small `Copy` value, so solving
//! code can produce new boards instead of mutating shared ones.
//!
//! # Overview
//!
//! - [`digit`]: Type-safe representation of sudoku digits 1-9
//! - [`position`]: `(row, column)` coordinates on the 9x9 board
//! - [`house`]: Rows, columns and 3x3 sub-grids
//! - [`board`]: The [`Cell`] grid itself, with parsing and consistency checks
//!
//! # Examples
//!
//! ```
//! use puzzlekit_core::{Board, Digit, Position};
//!
//! let board: Board = "
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
//! assert_eq!(board.digit_at(Position::new(0, 0)), Some(Digit::D5));
//! assert!(board.is_empty_at(Position::new(0, 2)));
//! assert!(board.check_consistency().is_ok());
//! # Ok::<(), puzzlekit_core::BoardError>(())
//! ```

pub mod board;
pub mod digit;
pub mod house;
pub mod position;

pub use self::{
    board::{Board, BoardError, Cell, ConsistencyError},
    digit::Digit,
    house::House,
    position::Position,
};
