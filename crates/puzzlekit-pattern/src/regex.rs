//! Compiled patterns for repeated matching.
//!
//! ```
//! use puzzlekit_pattern::Regex;
//!
//! let re = Regex::new("\\d{3}")?;
//! assert_eq!(re.as_str(), "\\d{3}");
//! assert!(["123", "999"].iter().all(|c| re.is_match(c)));
//! # Ok::<(), puzzlekit_pattern::PatternError>(())
//! ```

use std::{fmt, str::FromStr};

use derive_more::{Display, Error};

use crate::{MatchOutcome, PatternError, RejectReason, Token, matcher, tokenize};

/// Error returned by [`Regex::validate`] for a candidate that does not match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("candidate does not match: {reason}")]
pub struct NoMatch {
    reason: RejectReason,
}

impl NoMatch {
    /// Returns why the candidate was rejected.
    #[must_use]
    pub fn reason(&self) -> RejectReason {
        self.reason
    }
}

/// A tokenized pattern, ready to match candidates.
///
/// # Examples
///
/// ```
/// use puzzlekit_pattern::Regex;
///
/// let re: Regex = "colou?r".parse()?;
/// assert!(re.is_match("color"));
/// assert!(re.is_match("colour"));
/// assert!(!re.is_match("colouur"));
///
/// assert_eq!(re.validate("colour"), Ok("colour"));
/// assert!(re.validate("colors").is_err());
/// # Ok::<(), puzzlekit_pattern::PatternError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Regex {
    pattern: String,
    tokens: Vec<Token>,
}

impl Regex {
    /// Tokenizes `pattern`.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if `pattern` is malformed.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let tokens = tokenize(pattern)?;
        Ok(Self {
            pattern: pattern.to_owned(),
            tokens,
        })
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Returns the token list.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Runs the pattern against `candidate`.
    #[must_use]
    pub fn run(&self, candidate: &str) -> MatchOutcome {
        matcher::run(&self.tokens, candidate)
    }

    /// Returns `true` if `candidate` matches in full.
    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        self.run(candidate).is_accept()
    }

    /// Returns `candidate` unchanged if it matches.
    ///
    /// # Errors
    ///
    /// Returns [`NoMatch`] with the rejection reason otherwise.
    pub fn validate<'c>(&self, candidate: &'c str) -> Result<&'c str, NoMatch> {
        match self.run(candidate) {
            MatchOutcome::Accept => Ok(candidate),
            MatchOutcome::Reject(reason) => Err(NoMatch { reason }),
        }
    }
}

impl FromStr for Regex {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Regex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}
