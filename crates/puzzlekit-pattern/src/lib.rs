//! A small pattern language with a greedy, single-pass matcher.
//!
//! Patterns are tokenized once into a flat list of [`Token`]s and then run
//! against any number of candidate strings. Matching is anchored at both
//! ends and repeats never give characters back, so `a*a` matches nothing.
//! See [`tokenize`] for the accepted syntax.
//!
//! # Examples
//!
//! ```
//! use puzzlekit_pattern::{MatchOutcome, RejectReason, Regex};
//!
//! let re = Regex::new("[0-9]{2,3}")?;
//! assert!(re.is_match("42"));
//! assert!(re.is_match("123"));
//! assert_eq!(
//!     re.run("4"),
//!     MatchOutcome::Reject(RejectReason::RangeNotSatisfied { offset: 1 })
//! );
//! # Ok::<(), puzzlekit_pattern::PatternError>(())
//! ```

pub use self::{char_set::*, matcher::*, regex::*, token::*, tokenizer::*};

mod char_set;
mod matcher;
mod regex;
mod token;
mod tokenizer;
