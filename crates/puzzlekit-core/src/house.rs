//! Rows, columns and boxes of the grid.
//!
//! # Examples
//!
//! ```
//! use puzzlekit_core::{House, Position};
//!
//! let house = House::box_of(Position::new(4, 5));
//! assert_eq!(house.to_string(), "box 5");
//! assert!(house.contains(Position::new(3, 3)));
//! assert_eq!(House::ALL.len(), 27);
//! ```

use std::fmt::{self, Display};

use crate::Position;

/// A Sudoku house (row, column, or 3×3 sub-grid).
///
/// Every digit must appear exactly once in each of the 27 houses of a solved
/// board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum House {
    /// A row identified by its index (0-8).
    Row {
        /// Row index (0-8).
        row: u8,
    },
    /// A column identified by its index (0-8).
    Column {
        /// Column index (0-8).
        column: u8,
    },
    /// A 3×3 box identified by its index (0-8, left to right, top to bottom).
    Box {
        /// Box index (0-8).
        index: u8,
    },
}

impl House {
    /// Array containing all houses in row, column, box order.
    pub const ALL: [Self; 27] = {
        let mut all = [Self::Row { row: 0 }; 27];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 9 {
            all[i] = Self::Row { row: i as u8 };
            all[i + 9] = Self::Column { column: i as u8 };
            all[i + 18] = Self::Box { index: i as u8 };
            i += 1;
        }
        all
    };

    /// Returns the box containing `pos`.
    #[must_use]
    pub const fn box_of(pos: Position) -> Self {
        Self::Box {
            index: pos.box_index(),
        }
    }

    /// Converts a cell index within the house (0-8) into an absolute [`Position`].
    ///
    /// # Panics
    ///
    /// Panics if `i` is not in the range 0-8.
    #[must_use]
    #[inline]
    pub const fn position_from_cell_index(self, i: u8) -> Position {
        assert!(i < 9);
        match self {
            House::Row { row } => Position::new(row, i),
            House::Column { column } => Position::new(i, column),
            House::Box { index } => Position::from_box(index, i),
        }
    }

    /// Returns the nine positions of this house in cell-index order.
    #[must_use]
    pub fn positions(self) -> [Position; 9] {
        let mut positions = [Position::default(); 9];
        for (i, slot) in (0..9).zip(&mut positions) {
            *slot = self.position_from_cell_index(i);
        }
        positions
    }

    /// Returns `true` if `pos` lies inside this house.
    #[must_use]
    pub const fn contains(self, pos: Position) -> bool {
        match self {
            House::Row { row } => pos.row() == row,
            House::Column { column } => pos.column() == column,
            House::Box { index } => pos.box_index() == index,
        }
    }
}

impl Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            House::Row { row } => write!(f, "row {}", row + 1),
            House::Column { column } => write!(f, "column {}", column + 1),
            House::Box { index } => write!(f, "box {}", index + 1),
        }
    }
}
