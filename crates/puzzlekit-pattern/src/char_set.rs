//! Sets of pattern characters.
//!
//! Character classes only range over a fixed alphabet: tab, line feed,
//! carriage return and printable ASCII `' '..='~'`, 98 characters in that
//! order. [`CharSet`] stores a class as one bit per alphabet character.
//!
//! # Examples
//!
//! ```
//! use puzzlekit_pattern::CharSet;
//!
//! let lower = CharSet::range('a', 'z').unwrap();
//! assert_eq!(lower.len(), 26);
//! assert!(lower.contains('q'));
//! assert!(!lower.contains('Q'));
//!
//! // Ranges must run forward through the alphabet.
//! assert_eq!(CharSet::range('a', 'Z'), None);
//! ```

use std::fmt::{self, Display, Write as _};

/// Number of characters in the supported alphabet.
pub const ALPHABET_LEN: u8 = 98;

const CONTROL: [char; 3] = ['\t', '\n', '\r'];

/// Maps a character to its alphabet index.
#[allow(clippy::cast_possible_truncation)]
const fn index_of(ch: char) -> Option<u8> {
    match ch {
        '\t' => Some(0),
        '\n' => Some(1),
        '\r' => Some(2),
        ' '..='~' => Some((ch as u32 - ' ' as u32) as u8 + 3),
        _ => None,
    }
}

/// Maps an alphabet index back to its character.
fn char_at(index: u8) -> char {
    debug_assert!(index < ALPHABET_LEN);
    match index {
        0..=2 => CONTROL[usize::from(index)],
        _ => char::from(index - 3 + b' '),
    }
}

const fn span(start: u8, end: u8) -> u128 {
    let mut bits = 0;
    let mut i = start;
    while i <= end {
        bits |= 1 << i;
        i += 1;
    }
    bits
}

const fn span_chars(start: char, end: char) -> u128 {
    match (index_of(start), index_of(end)) {
        (Some(start), Some(end)) => span(start, end),
        _ => 0,
    }
}

/// A set of characters from the supported alphabet.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CharSet {
    bits: u128,
}

impl CharSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Every supported character; what `.` matches.
    pub const ANY: Self = Self {
        bits: span(0, ALPHABET_LEN - 1),
    };

    /// `\d`: the digits `0-9`.
    pub const DIGIT: Self = Self {
        bits: span_chars('0', '9'),
    };

    /// `\w`: `a-z`, `A-Z`, `0-9` and `_`.
    pub const WORD: Self = Self {
        bits: span_chars('a', 'z')
            | span_chars('A', 'Z')
            | span_chars('0', '9')
            | span_chars('_', '_'),
    };

    /// `\s`: tab and space.
    pub const WHITESPACE: Self = Self {
        bits: span_chars('\t', '\t') | span_chars(' ', ' '),
    };

    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Returns the set of characters from `start` to `end`, inclusive.
    ///
    /// Returns `None` if either bound lies outside the alphabet or `end`
    /// comes before `start`.
    #[must_use]
    pub const fn range(start: char, end: char) -> Option<Self> {
        match (index_of(start), index_of(end)) {
            (Some(s), Some(e)) if s <= e => Some(Self { bits: span(s, e) }),
            _ => None,
        }
    }

    /// Returns `true` if `ch` can be stored in a set.
    #[must_use]
    pub const fn is_supported(ch: char) -> bool {
        index_of(ch).is_some()
    }

    /// Adds `ch` to the set.
    ///
    /// Returns `false` and leaves the set unchanged if `ch` is outside the
    /// alphabet.
    pub fn insert(&mut self, ch: char) -> bool {
        let Some(index) = index_of(ch) else {
            return false;
        };
        self.bits |= 1 << index;
        true
    }

    /// Returns `true` if `ch` is in the set.
    #[must_use]
    #[inline]
    pub const fn contains(self, ch: char) -> bool {
        match index_of(ch) {
            Some(index) => self.bits & (1 << index) != 0,
            None => false,
        }
    }

    /// Returns the union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Returns the number of characters in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Returns `true` if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the characters in alphabet order.
    pub fn iter(self) -> impl Iterator<Item = char> {
        (0..ALPHABET_LEN)
            .filter(move |&index| self.bits & (1 << index) != 0)
            .map(char_at)
    }
}

impl std::ops::BitOr for CharSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Writes a character visibly, spelling control characters as escapes.
fn write_visible(f: &mut impl fmt::Write, ch: char) -> fmt::Result {
    match ch {
        '\t' => f.write_str("\\t"),
        '\n' => f.write_str("\\n"),
        '\r' => f.write_str("\\r"),
        _ => f.write_char(ch),
    }
}

/// Writes a literal, escaping characters that are special in patterns.
pub(crate) fn write_escaped(f: &mut impl fmt::Write, ch: char) -> fmt::Result {
    match ch {
        '.' | '+' | '*' | '?' | '{' | '[' | '\\' => {
            f.write_char('\\')?;
            f.write_char(ch)
        }
        _ => write_visible(f, ch),
    }
}

impl Display for CharSet {
    /// Formats the set as a class, collapsing runs of three or more
    /// consecutive characters into `a-z` ranges. [`CharSet::ANY`] prints as `.`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ANY {
            return f.write_char('.');
        }
        f.write_char('[')?;
        let chars: Vec<char> = self.iter().collect();
        let mut i = 0;
        while i < chars.len() {
            let mut j = i;
            while j + 1 < chars.len() && index_of(chars[j + 1]) == index_of(chars[j]).map(|x| x + 1)
            {
                j += 1;
            }
            if j - i >= 2 {
                write_visible(f, chars[i])?;
                f.write_char('-')?;
                write_visible(f, chars[j])?;
            } else {
                for &ch in &chars[i..=j] {
                    write_visible(f, ch)?;
                }
            }
            i = j + 1;
        }
        f.write_char(']')
    }
}
