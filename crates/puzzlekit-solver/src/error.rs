use puzzlekit_core::ConsistencyError;

/// The puzzle has no completion.
///
/// This is the expected negative result of a search, not a malformed-input
/// error: the board parsed fine but no valid grid extends it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum Unsolvable {
    /// The givens already repeat a digit within a house.
    #[display("givens conflict: {_0}")]
    ConflictingGivens(#[from] ConsistencyError),
    /// Every branch of the search was exhausted.
    #[display("no solution exists")]
    SearchExhausted,
}
