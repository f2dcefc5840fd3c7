//! Pattern tokenizer.
//!
//! Tokenizing runs in two passes. The first lexes the pattern into atoms
//! (literals and ranges) and bare quantifiers. The second folds every
//! quantifier into the atom before it, producing [`Token::Repeat`].
//!
//! All offsets in [`PatternError`] count characters, not bytes.

use derive_more::{Display, Error};
use log::trace;

use crate::{CharSet, Token};

/// Error returned when a pattern cannot be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PatternError {
    /// A `[` without a matching `]`.
    #[display("unterminated character class starting at offset {offset}")]
    UnterminatedClass {
        /// Offset of the opening `[`.
        offset: usize,
    },
    /// A class with no members, `[]`.
    #[display("empty character class at offset {offset}")]
    EmptyClass {
        /// Offset of the opening `[`.
        offset: usize,
    },
    /// A class range that runs backwards or leaves the alphabet.
    #[display("invalid class range {start:?}-{end:?} at offset {offset}")]
    InvalidRange {
        /// First character of the range.
        start: char,
        /// Last character of the range.
        end: char,
        /// Offset of `start`.
        offset: usize,
    },
    /// A class member outside the supported alphabet.
    #[display("unsupported character {ch:?} in class at offset {offset}")]
    UnsupportedChar {
        /// The rejected character.
        ch: char,
        /// Offset of `ch`.
        offset: usize,
    },
    /// A `{` without a matching `}`.
    #[display("unterminated repeat range starting at offset {offset}")]
    UnterminatedRepeat {
        /// Offset of the opening `{`.
        offset: usize,
    },
    /// A repeat range whose body is not `n`, `n,` or `n,m` with `n <= m`.
    #[display("malformed repeat range {{{body}}} at offset {offset}")]
    MalformedRepeat {
        /// The text between the braces.
        body: String,
        /// Offset of the opening `{`.
        offset: usize,
    },
    /// A `\` at the very end of the pattern.
    #[display("trailing backslash at offset {offset}")]
    TrailingEscape {
        /// Offset of the backslash.
        offset: usize,
    },
    /// A quantifier with no token before it.
    #[display("quantifier at offset {offset} has nothing to repeat")]
    NothingToRepeat {
        /// Offset of the quantifier.
        offset: usize,
    },
}

/// Output of the lexing pass.
#[derive(Debug)]
enum Lexeme {
    Atom(Token),
    Quantifier {
        min: u32,
        max: Option<u32>,
        offset: usize,
    },
}

/// Tokenizes `pattern`.
///
/// # Syntax
///
/// | Syntax   | Token                                   |
/// |----------|-----------------------------------------|
/// | `x`      | literal `x`                             |
/// | `\x`     | literal `x`, for any `x` except below   |
/// | `\d`     | digits `0-9`                            |
/// | `\w`     | `a-z`, `A-Z`, `0-9` and `_`             |
/// | `\s`     | tab and space                           |
/// | `.`      | any supported character                 |
/// | `[...]`  | class of single characters and `a-z`    |
/// | `+`      | previous token, one or more times       |
/// | `*`      | previous token, zero or more times      |
/// | `?`      | previous token, zero or one time        |
/// | `{n}`    | previous token, exactly `n` times       |
/// | `{n,}`   | previous token, at least `n` times      |
/// | `{n,m}`  | previous token, `n` to `m` times        |
///
/// Inside a class the first `]` closes it and a `-` at either end is a
/// literal. Backslashes have no meaning inside a class.
///
/// # Errors
///
/// Returns a [`PatternError`] describing the first problem found.
///
/// # Examples
///
/// ```
/// use puzzlekit_pattern::{CharSet, Token, tokenize};
///
/// let tokens = tokenize("a\\d+").unwrap();
/// assert_eq!(
///     tokens,
///     [
///         Token::Literal('a'),
///         Token::repeat(Token::Range(CharSet::DIGIT), 1, None),
///     ]
/// );
/// ```
pub fn tokenize(pattern: &str) -> Result<Vec<Token>, PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    let lexemes = lex(&chars)?;
    let tokens = fold_quantifiers(lexemes)?;
    trace!("tokenized {pattern:?} into {} tokens", tokens.len());
    Ok(tokens)
}

fn lex(chars: &[char]) -> Result<Vec<Lexeme>, PatternError> {
    let mut lexemes = Vec::new();
    let mut offset = 0;
    while let Some(&ch) = chars.get(offset) {
        let (lexeme, len) = match ch {
            '{' => {
                let close = find_from(chars, offset + 1, '}')
                    .ok_or(PatternError::UnterminatedRepeat { offset })?;
                let (min, max) = parse_repeat(&chars[offset + 1..close], offset)?;
                (Lexeme::Quantifier { min, max, offset }, close + 1 - offset)
            }
            '[' => {
                let close = find_from(chars, offset + 1, ']')
                    .ok_or(PatternError::UnterminatedClass { offset })?;
                let set = parse_class(&chars[offset + 1..close], offset)?;
                (Lexeme::Atom(Token::Range(set)), close + 1 - offset)
            }
            '.' => (Lexeme::Atom(Token::Range(CharSet::ANY)), 1),
            '+' => (quantifier(1, None, offset), 1),
            '*' => (quantifier(0, None, offset), 1),
            '?' => (quantifier(0, Some(1), offset), 1),
            '\\' => {
                let escaped = chars
                    .get(offset + 1)
                    .ok_or(PatternError::TrailingEscape { offset })?;
                let token = match escaped {
                    'd' => Token::Range(CharSet::DIGIT),
                    'w' => Token::Range(CharSet::WORD),
                    's' => Token::Range(CharSet::WHITESPACE),
                    &other => Token::Literal(other),
                };
                (Lexeme::Atom(token), 2)
            }
            _ => (Lexeme::Atom(Token::Literal(ch)), 1),
        };
        lexemes.push(lexeme);
        offset += len;
    }
    Ok(lexemes)
}

fn quantifier(min: u32, max: Option<u32>, offset: usize) -> Lexeme {
    Lexeme::Quantifier { min, max, offset }
}

fn find_from(chars: &[char], start: usize, target: char) -> Option<usize> {
    chars[start..]
        .iter()
        .position(|&ch| ch == target)
        .map(|i| start + i)
}

/// Parses the body of `{...}`; `offset` is that of the opening brace.
fn parse_repeat(body: &[char], offset: usize) -> Result<(u32, Option<u32>), PatternError> {
    let text: String = body.iter().collect();
    let malformed = || PatternError::MalformedRepeat {
        body: text.clone(),
        offset,
    };
    let parse = |s: &str| {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        s.parse::<u32>().ok()
    };

    let (min, max) = match text.split_once(',') {
        None => {
            let n = parse(&text).ok_or_else(malformed)?;
            (n, Some(n))
        }
        Some((min, "")) => (parse(min).ok_or_else(malformed)?, None),
        Some((min, max)) => (
            parse(min).ok_or_else(malformed)?,
            Some(parse(max).ok_or_else(malformed)?),
        ),
    };
    if max.is_some_and(|max| max < min) {
        return Err(malformed());
    }
    Ok((min, max))
}

/// Parses the body of `[...]`; `offset` is that of the opening bracket.
fn parse_class(body: &[char], offset: usize) -> Result<CharSet, PatternError> {
    if body.is_empty() {
        return Err(PatternError::EmptyClass { offset });
    }

    let mut set = CharSet::new();
    let mut i = 0;
    while i < body.len() {
        let start = body[i];
        let member_offset = offset + 1 + i;
        if body.get(i + 1) == Some(&'-') && i + 2 < body.len() {
            let end = body[i + 2];
            let range = CharSet::range(start, end).ok_or(PatternError::InvalidRange {
                start,
                end,
                offset: member_offset,
            })?;
            set = set.union(range);
            i += 3;
        } else {
            if !set.insert(start) {
                return Err(PatternError::UnsupportedChar {
                    ch: start,
                    offset: member_offset,
                });
            }
            i += 1;
        }
    }
    Ok(set)
}

fn fold_quantifiers(lexemes: Vec<Lexeme>) -> Result<Vec<Token>, PatternError> {
    let mut tokens: Vec<Token> = Vec::with_capacity(lexemes.len());
    let mut repeatable = false;
    for lexeme in lexemes {
        match lexeme {
            Lexeme::Atom(token) => {
                tokens.push(token);
                repeatable = true;
            }
            Lexeme::Quantifier { min, max, offset } => {
                let token = tokens
                    .pop()
                    .filter(|_| repeatable)
                    .ok_or(PatternError::NothingToRepeat { offset })?;
                tokens.push(Token::repeat(token, min, max));
                repeatable = false;
            }
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn lit(ch: char) -> Token {
        Token::Literal(ch)
    }

    fn range(start: char, end: char) -> Token {
        Token::Range(CharSet::range(start, end).unwrap())
    }

    #[test]
    fn test_literals() {
        assert_eq!(tokenize("abc").unwrap(), [lit('a'), lit('b'), lit('c')]);
        assert!(tokenize("").unwrap().is_empty());
        assert_eq!(tokenize("a]}").unwrap(), [lit('a'), lit(']'), lit('}')]);
    }

    #[test]
    fn test_escapes() {
        assert_eq!(
            tokenize("\\d\\w\\s").unwrap(),
            [
                Token::Range(CharSet::DIGIT),
                Token::Range(CharSet::WORD),
                Token::Range(CharSet::WHITESPACE),
            ]
        );
        assert_eq!(
            tokenize("\\.\\+\\[\\\\").unwrap(),
            [lit('.'), lit('+'), lit('['), lit('\\')]
        );
    }

    #[test]
    fn test_dot_is_any() {
        assert_eq!(tokenize(".").unwrap(), [Token::Range(CharSet::ANY)]);
    }

    #[test]
    fn test_quantifiers() {
        assert_eq!(tokenize("a+").unwrap(), [Token::repeat(lit('a'), 1, None)]);
        assert_eq!(tokenize("a*").unwrap(), [Token::repeat(lit('a'), 0, None)]);
        assert_eq!(tokenize("a?").unwrap(), [Token::repeat(lit('a'), 0, Some(1))]);
        assert_eq!(
            tokenize("a{3}").unwrap(),
            [Token::repeat(lit('a'), 3, Some(3))]
        );
        assert_eq!(
            tokenize("a{2,}").unwrap(),
            [Token::repeat(lit('a'), 2, None)]
        );
        assert_eq!(
            tokenize("a{2,5}").unwrap(),
            [Token::repeat(lit('a'), 2, Some(5))]
        );
        assert_eq!(
            tokenize("a{0,0}").unwrap(),
            [Token::repeat(lit('a'), 0, Some(0))]
        );
    }

    #[test]
    fn test_quantifier_applies_to_previous_token_only() {
        assert_eq!(
            tokenize("colou?r").unwrap(),
            [
                lit('c'),
                lit('o'),
                lit('l'),
                lit('o'),
                Token::repeat(lit('u'), 0, Some(1)),
                lit('r'),
            ]
        );
    }

    #[test]
    fn test_classes() {
        assert_eq!(tokenize("[a-z]").unwrap(), [range('a', 'z')]);

        let mut set = CharSet::range('0', '9').unwrap();
        set.insert('x');
        set.insert('_');
        assert_eq!(tokenize("[0-9x_]").unwrap(), [Token::Range(set)]);

        assert_eq!(
            tokenize("[0-9]{2,3}").unwrap(),
            [Token::repeat(range('0', '9'), 2, Some(3))]
        );
    }

    #[test]
    fn test_class_dash_at_edges_is_literal() {
        let mut leading = CharSet::new();
        leading.insert('-');
        leading.insert('a');
        assert_eq!(tokenize("[-a]").unwrap(), [Token::Range(leading)]);
        assert_eq!(tokenize("[a-]").unwrap(), [Token::Range(leading)]);
    }

    #[test]
    fn test_class_metacharacters_are_literal() {
        let mut set = CharSet::new();
        set.insert('.');
        set.insert('+');
        set.insert('\\');
        assert_eq!(tokenize("[.+\\]").unwrap(), [Token::Range(set)]);
    }

    #[test]
    fn test_first_bracket_closes_class() {
        assert_eq!(tokenize("[a]]").unwrap(), [range('a', 'a'), lit(']')]);
    }

    #[test]
    fn test_class_errors() {
        assert_eq!(
            tokenize("ab[cd"),
            Err(PatternError::UnterminatedClass { offset: 2 })
        );
        assert_eq!(tokenize("x[]"), Err(PatternError::EmptyClass { offset: 1 }));
        assert_eq!(
            tokenize("[az-a]"),
            Err(PatternError::InvalidRange {
                start: 'z',
                end: 'a',
                offset: 2,
            })
        );
        assert_eq!(
            tokenize("[a-é]"),
            Err(PatternError::InvalidRange {
                start: 'a',
                end: 'é',
                offset: 1,
            })
        );
        assert_eq!(
            tokenize("[aé]"),
            Err(PatternError::UnsupportedChar { ch: 'é', offset: 2 })
        );
    }

    #[test]
    fn test_repeat_errors() {
        assert_eq!(
            tokenize("a{2"),
            Err(PatternError::UnterminatedRepeat { offset: 1 })
        );
        for body in ["", ",", ",3", "x", "1,x", "-1", "+1", "3,2", "1,2,3"] {
            let pattern = format!("a{{{body}}}");
            assert_eq!(
                tokenize(&pattern),
                Err(PatternError::MalformedRepeat {
                    body: body.to_owned(),
                    offset: 1,
                }),
                "pattern {pattern:?}"
            );
        }
        assert_eq!(
            tokenize("a{99999999999}"),
            Err(PatternError::MalformedRepeat {
                body: "99999999999".to_owned(),
                offset: 1,
            })
        );
    }

    #[test]
    fn test_nothing_to_repeat() {
        assert_eq!(
            tokenize("+a"),
            Err(PatternError::NothingToRepeat { offset: 0 })
        );
        assert_eq!(
            tokenize("a+*"),
            Err(PatternError::NothingToRepeat { offset: 2 })
        );
        assert_eq!(
            tokenize("a?{2}"),
            Err(PatternError::NothingToRepeat { offset: 2 })
        );
    }

    #[test]
    fn test_trailing_escape() {
        assert_eq!(
            tokenize("ab\\"),
            Err(PatternError::TrailingEscape { offset: 2 })
        );
    }

    #[test]
    fn test_offsets_count_chars() {
        assert_eq!(
            tokenize("éé[ab"),
            Err(PatternError::UnterminatedClass { offset: 2 })
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            PatternError::MalformedRepeat {
                body: "3,2".to_owned(),
                offset: 4,
            }
            .to_string(),
            "malformed repeat range {3,2} at offset 4"
        );
        assert_eq!(
            PatternError::NothingToRepeat { offset: 0 }.to_string(),
            "quantifier at offset 0 has nothing to repeat"
        );
    }

    proptest! {
        #[test]
        fn test_tokenize_is_deterministic(pattern in "\\PC{0,24}") {
            prop_assert_eq!(tokenize(&pattern), tokenize(&pattern));
        }

        #[test]
        fn test_plain_text_tokenizes_to_literals(text in "[a-zA-Z0-9 ,;:!@#%&=<>~-]{0,24}") {
            let tokens = tokenize(&text).unwrap();
            let expected: Vec<Token> = text.chars().map(Token::Literal).collect();
            prop_assert_eq!(tokens, expected);
        }

        #[test]
        fn test_repeat_never_nests(pattern in "[ab.+*?\\[\\]{}0-9,\\\\-]{0,16}") {
            if let Ok(tokens) = tokenize(&pattern) {
                for token in tokens {
                    if let Token::Repeat { token, .. } = token {
                        prop_assert!(!token.is_repeat());
                    }
                }
            }
        }
    }
}
