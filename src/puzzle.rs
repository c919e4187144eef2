use itertools::Itertools;

use crate::color::ColorId;
use crate::location::{Dimension, Location};
use crate::shape::SquareStep;

/// The fixed endpoints of one color.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Flow {
    /// The character this color is drawn with.
    pub display: char,
    /// Where the flow starts; the only end that is ever extended.
    pub initial: Location,
    /// Where the flow must arrive.
    pub goal: Location,
}

/// Everything about a puzzle that does not change while it is searched.
#[derive(Clone, Debug)]
pub struct Puzzle {
    // width, height
    pub(crate) dims: (Dimension, Dimension),
    pub(crate) flows: Vec<Flow>,
    pub(crate) color_order: Vec<ColorId>,
}

impl Puzzle {
    pub(crate) fn new(dims: (Dimension, Dimension), flows: Vec<Flow>) -> Self {
        let color_order = (0..flows.len()).collect_vec();
        Self { dims, flows, color_order }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.dims.0.get()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.dims.1.get()
    }

    /// Number of flows to connect.
    pub fn num_colors(&self) -> usize {
        self.flows.len()
    }

    /// The termini and display character of `color`.
    pub fn flow(&self, color: ColorId) -> &Flow {
        &self.flows[color]
    }

    /// Where the flow of `color` starts.
    pub fn initial(&self, color: ColorId) -> Location {
        self.flows[color].initial
    }

    /// Where the flow of `color` must arrive.
    pub fn goal(&self, color: ColorId) -> Location {
        self.flows[color].goal
    }

    /// The order in which colors are considered for branching; see [`order_colors`](crate::order::order_colors).
    pub fn color_order(&self) -> &[ColorId] {
        &self.color_order
    }

    pub(crate) fn displays(&self) -> Vec<char> {
        self.flows.iter().map(|flow| flow.display).collect_vec()
    }

    /// Whether `location` lies on the board.
    pub fn contains(&self, location: Location) -> bool {
        location.0 < self.width() && location.1 < self.height()
    }

    /// The location one step from `location` in `direction`, or [`None`] if that step leaves the board.
    pub fn neighbor(&self, location: Location, direction: SquareStep) -> Option<Location> {
        Some(direction.attempt_from(location)).filter(|next| self.contains(*next))
    }

    /// All on-board neighbors of `location`, in expansion order.
    pub fn neighbors(&self, location: Location) -> impl Iterator<Item = Location> + '_ {
        use strum::VariantArray;

        SquareStep::VARIANTS.iter().filter_map(move |dir| self.neighbor(location, *dir))
    }

    /// Number of cells between `location` and the nearest edge of the board.
    pub fn wall_distance(&self, location: Location) -> usize {
        let x = location.0.min(self.width() - 1 - location.0);
        let y = location.1.min(self.height() - 1 - location.1);
        x.min(y)
    }
}
