use std::cmp::Ordering;

use ndarray::Array2;
use strum::VariantArray;

use crate::location::Location;

/// The four ways a flow may step on a square grid.
///
/// [`VARIANTS`](VariantArray::VARIANTS) lists them in the order children are expanded during search.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum SquareStep {
    /// Toward column 0.
    Left,
    /// Away from column 0.
    Right,
    /// Toward row 0.
    Up,
    /// Away from row 0.
    Down,
}

impl SquareStep {
    /// Attempt the step from `location` in the direction specified by `self` and return the resultant [`Location`].
    ///
    /// The result may lie outside the board; see [`Puzzle::neighbor`](crate::Puzzle::neighbor) for a checked version.
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Left => location.offset_by((-1, 0)),
            Self::Right => location.offset_by((1, 0)),
            Self::Up => location.offset_by((0, -1)),
            Self::Down => location.offset_by((0, 1)),
        }
    }

    /// The single direction leading from `a` straight toward `b`.
    ///
    /// Returns [`None`] unless `a` and `b` are distinct and share a row or column.
    pub fn toward(a: Location, b: Location) -> Option<Self> {
        match (a.0.cmp(&b.0), a.1.cmp(&b.1)) {
            (Ordering::Equal, Ordering::Less) => Some(Self::Down),
            (Ordering::Equal, Ordering::Greater) => Some(Self::Up),
            (Ordering::Less, Ordering::Equal) => Some(Self::Right),
            (Ordering::Greater, Ordering::Equal) => Some(Self::Left),
            _ => None,
        }
    }

    /// The one-character arrow used when listing moves.
    pub fn arrow(&self) -> char {
        match self {
            Self::Left => '←',
            Self::Right => '→',
            Self::Up => '↑',
            Self::Down => '↓',
        }
    }

    /// Dump the specified [`ndarray::Array2`] one row per line.
    pub(crate) fn print(board: Array2<char>) -> String {
        let mut out = String::with_capacity(board.nrows() * (board.ncols() + 1));

        for row in board.rows() {
            for col in row {
                out.push(*col);
            }
            out.push('\n');
        }

        out
    }
}
