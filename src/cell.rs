use crate::color::ColorId;

/// The contents of one grid cell.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Cell {
    /// Not yet covered by any flow.
    #[default]
    Free,
    /// The cell a flow starts from.
    Initial {
        /// The flow starting here.
        color: ColorId,
    },
    /// The cell a flow must reach; `completed` once its flow has arrived.
    Goal {
        /// The flow ending here.
        color: ColorId,
        /// Whether that flow has arrived.
        completed: bool,
    },
    /// A cell covered by a flow in progress; `head` marks the cell the flow was last extended into.
    Path {
        /// The flow covering this cell.
        color: ColorId,
        /// Whether this is the end the flow grows from.
        head: bool,
    },
}

impl Cell {
    /// The color occupying this cell, if any.
    pub fn color(&self) -> Option<ColorId> {
        match *self {
            Cell::Free => None,
            Cell::Initial { color } | Cell::Goal { color, .. } | Cell::Path { color, .. } => Some(color),
        }
    }

    /// Whether no flow occupies this cell.
    pub fn is_free(&self) -> bool {
        matches!(self, Cell::Free)
    }

    pub(crate) fn display(&self, displays: &[char]) -> char {
        match *self {
            Cell::Free => '.',
            Cell::Initial { color } | Cell::Goal { color, .. } => displays[color].to_ascii_uppercase(),
            Cell::Path { color, .. } => displays[color].to_ascii_lowercase(),
        }
    }
}
