//! Shared puzzle fixtures and assertions for solver tests.

use puzzlekit_core::{Board, Digit, House};

/// The well-known puzzle from the Wikipedia sudoku article.
pub(crate) const CLASSIC_PUZZLE: &str = "
    53. .7. ...
    6.. 195 ...
    .98 ... .6.
    8.. .6. ..3
    4.. 8.3 ..1
    7.. .2. ..6
    .6. ... 28.
    ... 419 ..5
    ... .8. .79
";

/// The unique solution of [`CLASSIC_PUZZLE`].
pub(crate) const CLASSIC_SOLUTION: &str = "
    534 678 912
    672 195 348
    198 342 567
    859 761 423
    426 853 791
    713 924 856
    961 537 284
    287 419 635
    345 286 179
";

/// A sparse puzzle with a unique solution that needs deep backtracking.
pub(crate) const HARD_PUZZLE: &str = "
    8.. ... ...
    ..3 6.. ...
    .7. .9. 2..
    .5. ..7 ...
    ... .45 7..
    ... 1.. .3.
    ..1 ... .68
    ..8 5.. .1.
    .9. ... 4..
";

/// The unique solution of [`HARD_PUZZLE`].
pub(crate) const HARD_SOLUTION: &str = "
    812 753 649
    943 682 175
    675 491 283
    154 237 896
    369 845 721
    287 169 534
    521 974 368
    438 526 917
    796 318 452
";

/// A board with no givens.
pub(crate) const EMPTY_BOARD: &str = "
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
";

/// The grid the solver produces from [`EMPTY_BOARD`].
pub(crate) const EMPTY_BOARD_FILL: &str = "
    123 456 789
    789 123 456
    456 789 123
    214 365 978
    978 214 365
    365 978 214
    531 642 897
    897 531 642
    642 897 531
";

/// Consistent givens where 9 has no legal cell in row 0.
pub(crate) const BLOCKED_PUZZLE: &str = "
    123 456 78.
    ... ... ..9
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
    ... ... ...
";

/// Parses a fixture board.
///
/// # Panics
///
/// Panics if the fixture is malformed.
#[track_caller]
pub(crate) fn board(s: &str) -> Board {
    s.parse().unwrap()
}

/// Asserts that `solved` is a valid completion of `puzzle`.
///
/// # Panics
///
/// Panics if `solved` is incomplete, breaks a house constraint, or changes a
/// given of `puzzle`.
#[track_caller]
pub(crate) fn assert_valid_solution(puzzle: &Board, solved: &Board) {
    assert!(solved.is_complete(), "solution is incomplete:\n{solved}");
    for house in House::ALL {
        let mut digits: Vec<Digit> = house
            .positions()
            .iter()
            .filter_map(|&pos| solved.digit_at(pos))
            .collect();
        digits.sort();
        assert_eq!(digits, Digit::ALL, "{house} is not a permutation:\n{solved}");
    }
    for (pos, cell) in puzzle.cells() {
        if let Some(digit) = cell.digit() {
            assert_eq!(
                solved.digit_at(pos),
                Some(digit),
                "given {digit} at {pos} was changed:\n{solved}"
            );
        }
    }
}
