//! Greedy single-pass matcher.
//!
//! The matcher walks the token list and the candidate in lock step and never
//! revisits a decision: a repeat consumes every character it can before the
//! next token is tried. This makes matching linear in the candidate length,
//! at the cost of rejecting some inputs a backtracking engine would accept.
//! `a*a` never matches anything because the repeat swallows every `a`.
//!
//! Matching is always anchored at both ends. A literal or range that does
//! not match the next character rejects the candidate outright; the token is
//! never skipped, so `abc` does not accept `ac`.

use derive_more::{Display, IsVariant};
use log::trace;

use crate::Token;

/// Result of running a token list against a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IsVariant)]
pub enum MatchOutcome {
    /// Every token was satisfied and the whole candidate was consumed.
    Accept,
    /// The candidate does not match.
    Reject(RejectReason),
}

/// Why a candidate was rejected.
///
/// Offsets count characters from the start of the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum RejectReason {
    /// All tokens were satisfied before the candidate ended.
    #[display("unexpected trailing input at offset {offset}")]
    InputRemaining {
        /// Offset of the first unconsumed character.
        offset: usize,
    },
    /// A literal or range token did not match the next character.
    #[display("unexpected {found:?} at offset {offset}")]
    Mismatch {
        /// Offset of the offending character.
        offset: usize,
        /// The offending character.
        found: char,
    },
    /// A repeat stopped before reaching its minimum count.
    #[display("too few repetitions at offset {offset}")]
    RangeNotSatisfied {
        /// Offset where the repeat stopped.
        offset: usize,
    },
    /// The candidate ended while a literal or range token still needed input.
    #[display("unexpected end of input")]
    InputExhausted,
}

/// Runs `tokens` against `candidate` and reports the outcome.
///
/// # Examples
///
/// ```
/// use puzzlekit_pattern::{MatchOutcome, RejectReason, run, tokenize};
///
/// let tokens = tokenize("[0-9]{2,3}").unwrap();
/// assert_eq!(run(&tokens, "123"), MatchOutcome::Accept);
/// assert_eq!(
///     run(&tokens, "1234"),
///     MatchOutcome::Reject(RejectReason::InputRemaining { offset: 3 })
/// );
/// ```
#[must_use]
pub fn run(tokens: &[Token], candidate: &str) -> MatchOutcome {
    let outcome = Run::new(tokens, candidate).finish();
    trace!("matched {candidate:?} against {} tokens: {outcome:?}", tokens.len());
    outcome
}

/// Returns `true` if `candidate` matches `tokens` in full.
#[must_use]
pub fn matches(tokens: &[Token], candidate: &str) -> bool {
    run(tokens, candidate).is_accept()
}

/// Cursor state of one matching run.
struct Run<'a> {
    tokens: &'a [Token],
    input: std::iter::Peekable<std::str::Chars<'a>>,
    /// Index of the current token.
    position: usize,
    /// Characters consumed so far.
    offset: usize,
    /// Repetitions taken by the current repeat token.
    count: u32,
}

impl<'a> Run<'a> {
    fn new(tokens: &'a [Token], candidate: &'a str) -> Self {
        Self {
            tokens,
            input: candidate.chars().peekable(),
            position: 0,
            offset: 0,
            count: 0,
        }
    }

    fn consume(&mut self) {
        self.input.next();
        self.offset += 1;
    }

    fn advance(&mut self) {
        self.position += 1;
        self.count = 0;
    }

    fn finish(mut self) -> MatchOutcome {
        loop {
            let next = self.input.peek().copied();
            let Some(token) = self.tokens.get(self.position) else {
                return match next {
                    None => MatchOutcome::Accept,
                    Some(_) => MatchOutcome::Reject(RejectReason::InputRemaining {
                        offset: self.offset,
                    }),
                };
            };

            match token {
                Token::Repeat { token, min, max } => {
                    let has_room = max.is_none_or(|max| self.count < max);
                    match next {
                        Some(ch) if has_room && token.matches_char(ch) => {
                            self.consume();
                            self.count += 1;
                        }
                        _ if self.count >= *min => self.advance(),
                        _ => {
                            return MatchOutcome::Reject(RejectReason::RangeNotSatisfied {
                                offset: self.offset,
                            });
                        }
                    }
                }
                token => match next {
                    None => return MatchOutcome::Reject(RejectReason::InputExhausted),
                    Some(ch) if token.matches_char(ch) => {
                        self.consume();
                        self.advance();
                    }
                    Some(found) => {
                        return MatchOutcome::Reject(RejectReason::Mismatch {
                            offset: self.offset,
                            found,
                        });
                    }
                },
            }
        }
    }
}
