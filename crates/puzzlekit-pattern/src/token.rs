use std::fmt::{self, Display, Write as _};

use crate::{CharSet, char_set::write_escaped};

/// A single unit of a tokenized pattern.
///
/// Literals and ranges each consume exactly one input character. A repeat
/// wraps one of them and consumes between `min` and `max` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Matches exactly this character.
    Literal(char),
    /// Matches any character in the set.
    Range(CharSet),
    /// Matches the inner token repeatedly.
    Repeat {
        /// The repeated token; never itself a repeat.
        token: Box<Token>,
        /// Minimum number of repetitions.
        min: u32,
        /// Maximum number of repetitions, or `None` for no upper bound.
        max: Option<u32>,
    },
}

impl Token {
    /// Creates a repeat of `token`.
    #[must_use]
    pub fn repeat(token: Self, min: u32, max: Option<u32>) -> Self {
        Self::Repeat {
            token: Box::new(token),
            min,
            max,
        }
    }

    /// Returns `true` if this token consumes `ch` on its own.
    ///
    /// A repeat never matches directly; the matcher tests its inner token.
    #[must_use]
    #[inline]
    pub fn matches_char(&self, ch: char) -> bool {
        match self {
            Self::Literal(literal) => *literal == ch,
            Self::Range(set) => set.contains(ch),
            Self::Repeat { .. } => false,
        }
    }

    /// Returns `true` if this is a [`Token::Repeat`].
    #[must_use]
    pub fn is_repeat(&self) -> bool {
        matches!(self, Self::Repeat { .. })
    }
}

impl Display for Token {
    /// Formats the token in pattern syntax.
    ///
    /// Quantifiers print in their shortest form, so `a{0,1}` displays as
    /// `a?`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(ch) => write_escaped(f, *ch),
            Self::Range(set) => write!(f, "{set}"),
            Self::Repeat { token, min, max } => {
                write!(f, "{token}")?;
                match (*min, *max) {
                    (1, None) => f.write_char('+'),
                    (0, None) => f.write_char('*'),
                    (0, Some(1)) => f.write_char('?'),
                    (min, None) => write!(f, "{{{min},}}"),
                    (min, Some(max)) if min == max => write!(f, "{{{min}}}"),
                    (min, Some(max)) => write!(f, "{{{min},{max}}}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_char() {
        assert!(Token::Literal('a').matches_char('a'));
        assert!(!Token::Literal('a').matches_char('A'));
        assert!(Token::Range(CharSet::DIGIT).matches_char('7'));
        assert!(!Token::Range(CharSet::DIGIT).matches_char('x'));
        assert!(!Token::repeat(Token::Literal('a'), 0, None).matches_char('a'));
    }

    #[test]
    fn test_display() {
        let a = || Token::Literal('a');
        assert_eq!(Token::Literal('.').to_string(), "\\.");
        assert_eq!(Token::Range(CharSet::ANY).to_string(), ".");
        assert_eq!(Token::repeat(a(), 1, None).to_string(), "a+");
        assert_eq!(Token::repeat(a(), 0, None).to_string(), "a*");
        assert_eq!(Token::repeat(a(), 0, Some(1)).to_string(), "a?");
        assert_eq!(Token::repeat(a(), 3, None).to_string(), "a{3,}");
        assert_eq!(Token::repeat(a(), 2, Some(2)).to_string(), "a{2}");
        assert_eq!(
            Token::repeat(Token::Range(CharSet::DIGIT), 2, Some(3)).to_string(),
            "[0-9]{2,3}"
        );
    }
}
