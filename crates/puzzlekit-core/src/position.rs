//! Board coordinates.

use std::fmt::{self, Display};

/// A cell position on the 9x9 board, addressed as `(row, column)`.
///
/// Both coordinates are in the range 0-8. Positions order row-major, which is
/// the order the solver visits cells in.
///
/// # Examples
///
/// ```
/// use puzzlekit_core::Position;
///
/// let pos = Position::new(4, 7);
/// assert_eq!(pos.row(), 4);
/// assert_eq!(pos.column(), 7);
/// assert_eq!(pos.box_index(), 5);
///
/// assert_eq!(Position::all().count(), 81);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    /// Creates a new position.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `column` is not in the range 0-8.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        assert!(row < 9 && column < 9);
        Self { row, column }
    }

    /// Creates the position of cell `cell` (0-8, row-major) within box `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` or `cell` is not in the range 0-8.
    #[must_use]
    pub const fn from_box(index: u8, cell: u8) -> Self {
        assert!(index < 9 && cell < 9);
        Self::new((index / 3) * 3 + cell / 3, (index % 3) * 3 + cell % 3)
    }

    /// Returns the row (0-8).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-8).
    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Returns the index of the 3x3 sub-grid containing this position.
    ///
    /// Boxes are numbered 0-8, left to right, top to bottom.
    #[must_use]
    pub const fn box_index(self) -> u8 {
        (self.row / 3) * 3 + self.column / 3
    }

    /// Returns an iterator over all 81 positions in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..9).flat_map(|row| (0..9).map(move |column| Self::new(row, column)))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}c{}", self.row + 1, self.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_index() {
        assert_eq!(Position::new(0, 0).box_index(), 0);
        assert_eq!(Position::new(2, 2).box_index(), 0);
        assert_eq!(Position::new(0, 3).box_index(), 1);
        assert_eq!(Position::new(3, 0).box_index(), 3);
        assert_eq!(Position::new(4, 4).box_index(), 4);
        assert_eq!(Position::new(8, 8).box_index(), 8);
    }

    #[test]
    fn test_from_box_round_trips_box_index() {
        for index in 0..9 {
            for cell in 0..9 {
                assert_eq!(Position::from_box(index, cell).box_index(), index);
            }
        }
        assert_eq!(Position::from_box(4, 0), Position::new(3, 3));
        assert_eq!(Position::from_box(8, 8), Position::new(8, 8));
    }

    #[test]
    fn test_all_is_row_major() {
        let all: Vec<_> = Position::all().collect();
        assert_eq!(all.len(), 81);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[1], Position::new(0, 1));
        assert_eq!(all[9], Position::new(1, 0));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(0, 0).to_string(), "r1c1");
        assert_eq!(Position::new(8, 3).to_string(), "r9c4");
    }

    #[test]
    #[should_panic]
    fn test_new_rejects_out_of_range() {
        let _ = Position::new(9, 0);
    }
}
