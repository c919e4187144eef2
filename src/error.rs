use thiserror::Error;

use crate::location::Location;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum BuilderInvalidReason {
    /// A feature was placed outside the bounds specified by `dims` on a builder.
    #[error("{0:?} lies outside the board")]
    FeatureOutOfBounds(Location),
    /// A terminus was placed on a cell already holding another terminus.
    #[error("{0:?} already holds a terminus")]
    OverlappingFeature(Location),
    /// Both termini of a color were placed on the same cell.
    #[error("both termini of {0:?} are at the same location")]
    DegenerateTermini(char),
    /// The same display character was used for two colors.
    #[error("color {0:?} was added twice")]
    DuplicateColor(char),
    /// More colors were added than a [`ColorSet`](crate::color::ColorSet) can hold.
    #[error("more than {} colors", crate::color::MAX_COLORS)]
    TooManyColors,
}

/// A builder could not produce a board; every reason it collected is listed.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("invalid board: {}", .reasons.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "))]
pub struct BuildError {
    /// Every problem found, in the order it arose.
    pub reasons: Vec<BuilderInvalidReason>,
}

/// Reasons a puzzle text may fail to parse.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ParseError {
    /// The text has no rows.
    #[error("puzzle is empty")]
    Empty,
    /// A row differs in length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        /// Index of the offending row, counting non-empty lines from 0.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// A color appears only once.
    #[error("color {0:?} has a single endpoint")]
    UnpairedColor(char),
    /// A color appears more than twice.
    #[error("color {0:?} has more than two endpoints")]
    TooManyEndpoints(char),
    /// The parsed termini do not form a valid board.
    #[error(transparent)]
    Invalid(#[from] BuildError),
}

/// Reasons a search may end without a solution.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum SolverFailure {
    /// Every reachable state was expanded without finding a solution.
    /// With dead-end pruning enabled this does not prove the puzzle has none.
    #[error("no solution found (queue exhausted)")]
    Unreachable,
    /// The priority queue outgrew the node budget.
    #[error("node budget exhausted with {nodes} nodes queued")]
    Full {
        /// Nodes still queued when the search stopped.
        nodes: usize,
    },
}
