use puzzlekit_core::{Board, Digit, Position};

/// Per-digit record of the digits already on a board.
///
/// For every digit this holds the positions where it is placed, in row-major
/// order, and how many placements it still needs to reach nine. For any board
/// where no digit appears more than nine times,
/// `remaining(d) + placements(d).len() == 9`.
///
/// # Examples
///
/// ```
/// use puzzlekit_core::{Board, Digit, Position};
/// use puzzlekit_solver::PlacementState;
///
/// let board = Board::new().with_digit(Position::new(2, 3), Digit::D7);
/// let state = PlacementState::extract(&board);
///
/// assert_eq!(state.placements(Digit::D7), &[Position::new(2, 3)]);
/// assert_eq!(state.remaining(Digit::D7), 8);
/// assert_eq!(state.remaining(Digit::D1), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementState {
    placed: [Vec<Position>; 9],
    remaining: [u8; 9],
}

impl PlacementState {
    /// Walks every cell of `board` once and records each placed digit.
    ///
    /// Digits that never appear keep an empty placement list and a remaining
    /// count of nine.
    #[must_use]
    pub fn extract(board: &Board) -> Self {
        let mut placed: [Vec<Position>; 9] = Default::default();
        let mut remaining = [9_u8; 9];
        for (pos, cell) in board.cells() {
            let Some(digit) = cell.digit() else {
                continue;
            };
            placed[digit.index()].push(pos);
            remaining[digit.index()] = remaining[digit.index()].saturating_sub(1);
        }
        Self { placed, remaining }
    }

    /// Returns the positions already holding `digit`, row-major.
    #[must_use]
    pub fn placements(&self, digit: Digit) -> &[Position] {
        &self.placed[digit.index()]
    }

    /// Returns how many more times `digit` must be placed.
    #[must_use]
    pub fn remaining(&self, digit: Digit) -> u8 {
        self.remaining[digit.index()]
    }

    /// Returns the digits ordered most-constrained-first.
    #[must_use]
    pub fn digit_order(&self) -> DigitOrder {
        DigitOrder::new(self)
    }
}

/// The order in which the solver fills digits.
///
/// Digits are sorted ascending by remaining count, so the digit with the
/// fewest placements left goes first. Ties keep ascending digit order, which
/// makes the search, and therefore the solution it finds, reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitOrder {
    digits: [Digit; 9],
}

impl DigitOrder {
    /// Computes the order for `state`.
    #[must_use]
    pub fn new(state: &PlacementState) -> Self {
        let mut digits = Digit::ALL;
        // stable: equal counts stay in digit order
        digits.sort_by_key(|&digit| state.remaining(digit));
        Self { digits }
    }

    /// Returns the ordered digits.
    #[must_use]
    pub fn digits(&self) -> &[Digit; 9] {
        &self.digits
    }

    /// Returns the digit at step `index` of the order.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Digit> {
        self.digits.get(index).copied()
    }
}
