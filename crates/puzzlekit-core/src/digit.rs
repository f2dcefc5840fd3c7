//! Sudoku digit representation.

use std::fmt::{self, Display};

/// A sudoku digit in the range 1-9.
///
/// Each variant corresponds to exactly one digit value, so a board cell can
/// never hold an out-of-range number.
///
/// # Examples
///
/// ```
/// use puzzlekit_core::Digit;
///
/// let digit = Digit::D5;
/// assert_eq!(digit.value(), 5);
/// assert_eq!(digit.index(), 4);
/// assert_eq!(Digit::from_char('7'), Some(Digit::D7));
/// assert_eq!(Digit::from_char('.'), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Digit {
    /// The digit 1.
    D1 = 1,
    /// The digit 2.
    D2 = 2,
    /// The digit 3.
    D3 = 3,
    /// The digit 4.
    D4 = 4,
    /// The digit 5.
    D5 = 5,
    /// The digit 6.
    D6 = 6,
    /// The digit 7.
    D7 = 7,
    /// The digit 8.
    D8 = 8,
    /// The digit 9.
    D9 = 9,
}

impl Digit {
    /// Array containing all digits from 1 to 9, in ascending order.
    pub const ALL: [Self; 9] = [
        Self::D1,
        Self::D2,
        Self::D3,
        Self::D4,
        Self::D5,
        Self::D6,
        Self::D7,
        Self::D8,
        Self::D9,
    ];

    /// Creates a digit from a u8 value in the range 1-9.
    ///
    /// # Panics
    ///
    /// Panics if `value` is not in the range 1-9.
    ///
    /// ```should_panic
    /// use puzzlekit_core::Digit;
    ///
    /// let _ = Digit::from_value(0);
    /// ```
    #[must_use]
    pub fn from_value(value: u8) -> Self {
        Self::try_from_value(value).unwrap_or_else(|| panic!("Invalid digit value: {value}"))
    }

    /// Creates a digit from a u8 value, returning `None` outside 1-9.
    #[must_use]
    pub const fn try_from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::D1),
            2 => Some(Self::D2),
            3 => Some(Self::D3),
            4 => Some(Self::D4),
            5 => Some(Self::D5),
            6 => Some(Self::D6),
            7 => Some(Self::D7),
            8 => Some(Self::D8),
            9 => Some(Self::D9),
            _ => None,
        }
    }

    /// Parses a digit character `'1'..='9'`.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '1' => Some(Self::D1),
            '2' => Some(Self::D2),
            '3' => Some(Self::D3),
            '4' => Some(Self::D4),
            '5' => Some(Self::D5),
            '6' => Some(Self::D6),
            '7' => Some(Self::D7),
            '8' => Some(Self::D8),
            '9' => Some(Self::D9),
            _ => None,
        }
    }

    /// Returns the numeric value of this digit (1-9).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the zero-based index of this digit (0-8).
    ///
    /// Useful for indexing per-digit arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Returns the character used for this digit on a board.
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.value()) as char
    }
}

impl Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.value(), f)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> u8 {
        digit.value()
    }
}

impl From<Digit> for char {
    fn from(digit: Digit) -> char {
        digit.as_char()
    }
}
