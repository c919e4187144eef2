use itertools::Itertools;
use ndarray::Array2;
use strum::VariantArray;

use crate::cell::Cell;
use crate::color::{ColorId, ColorSet};
use crate::location::Location;
use crate::puzzle::Puzzle;
use crate::shape::SquareStep;

/// Accumulated cost of a sequence of moves.
pub type Cost = u32;

const MOVE_COST: Cost = 1;

/// One extension of a flow by a single cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Move {
    /// The flow being extended.
    pub color: ColorId,
    /// Where its head steps.
    pub direction: SquareStep,
}

/// A snapshot of the board: which cell holds what, and where every flow currently ends.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct State {
    pub(crate) cells: Array2<Cell>,
    pub(crate) heads: Vec<Location>,
    pub(crate) num_free: usize,
    pub(crate) completed: ColorSet,
}

impl State {
    /// The untouched state of `puzzle`: only termini placed, every head at its initial cell.
    pub(crate) fn new(puzzle: &Puzzle) -> Self {
        let mut cells = Array2::from_shape_simple_fn((puzzle.height(), puzzle.width()), Cell::default);
        for (color, flow) in puzzle.flows.iter().enumerate() {
            cells[flow.initial.as_index()] = Cell::Initial { color };
            cells[flow.goal.as_index()] = Cell::Goal { color, completed: false };
        }

        let num_free = cells.iter().filter(|cell| cell.is_free()).count();

        Self {
            cells,
            heads: puzzle.flows.iter().map(|flow| flow.initial).collect_vec(),
            num_free,
            completed: ColorSet::default(),
        }
    }

    /// The cell at `location`, or [`None`] if `location` is off the board.
    pub fn cell(&self, location: Location) -> Option<Cell> {
        self.cells.get(location.as_index()).copied()
    }

    /// Whether the cell at `location` is on the board and [`Free`](Cell::Free).
    pub fn is_free(&self, location: Location) -> bool {
        self.cell(location).is_some_and(|cell| cell.is_free())
    }

    /// Number of cells no flow covers yet.
    pub fn num_free(&self) -> usize {
        self.num_free
    }

    /// Colors whose head has reached their goal.
    pub fn completed(&self) -> ColorSet {
        self.completed
    }

    /// Whether the flow of `color` has reached its goal.
    pub fn is_completed(&self, color: ColorId) -> bool {
        self.completed.contains(color)
    }

    /// Where the flow of `color` currently ends.
    pub fn head(&self, color: ColorId) -> Location {
        self.heads[color]
    }

    /// Whether `color` has not yet left its initial cell.
    pub fn is_unstarted(&self, puzzle: &Puzzle, color: ColorId) -> bool {
        self.heads[color] == puzzle.initial(color)
    }

    /// Number of [`Free`](Cell::Free) cells orthogonally adjacent to `location`.
    pub fn num_free_neighbors(&self, puzzle: &Puzzle, location: Location) -> usize {
        puzzle.neighbors(location).filter(|n| self.is_free(*n)).count()
    }

    /// Whether the flow of `color` may be extended one cell in `direction`.
    ///
    /// A flow may enter its own goal or a free cell, provided the free cell does not touch the flow anywhere except at its current head.
    pub fn can_move(&self, puzzle: &Puzzle, color: ColorId, direction: SquareStep) -> bool {
        if self.completed.contains(color) {
            return false;
        }

        let head = self.heads[color];
        let Some(dest) = puzzle.neighbor(head, direction) else {
            return false;
        };

        match self.cells[dest.as_index()] {
            Cell::Goal { color: goal_color, .. } => goal_color == color,
            Cell::Free => !puzzle.neighbors(dest).any(|n| {
                n != head && matches!(
                    self.cells[n.as_index()],
                    Cell::Path { color: c, .. } | Cell::Initial { color: c } if c == color
                )
            }),
            _ => false,
        }
    }

    /// Extend the flow of `color` one cell in `direction`, returning the cost of doing so.
    ///
    /// # Panics
    /// The move must satisfy [`Self::can_move`]; moves off the board or onto an occupied cell panic.
    pub fn make_move(&mut self, puzzle: &Puzzle, color: ColorId, direction: SquareStep) -> Cost {
        let head = self.heads[color];
        let dest = direction.attempt_from(head);
        debug_assert!(puzzle.contains(dest));

        if let Cell::Path { head: is_head, .. } = &mut self.cells[head.as_index()] {
            *is_head = false;
        }

        match &mut self.cells[dest.as_index()] {
            Cell::Goal { completed, .. } => {
                *completed = true;
                self.completed.insert(color);
            }
            cell @ Cell::Free => {
                *cell = Cell::Path { color, head: true };
                self.num_free -= 1;
            }
            other => unreachable!("illegal move of color {} into {:?}", color, other),
        }

        self.heads[color] = dest;
        MOVE_COST
    }

    /// Number of directions in which `color` can currently move.
    pub fn legal_moves(&self, puzzle: &Puzzle, color: ColorId) -> usize {
        SquareStep::VARIANTS.iter()
            .filter(|dir| self.can_move(puzzle, color, **dir))
            .count()
    }

    /// Pick the color to branch on, among the colors not yet completed, in the puzzle's branching order.
    ///
    /// With `most_constrained`, the color with the fewest legal moves wins, earlier colors breaking ties.
    /// Returns [`None`] once every color is completed.
    pub fn next_move_color(&self, puzzle: &Puzzle, most_constrained: bool) -> Option<ColorId> {
        let mut candidates = puzzle.color_order.iter()
            .copied()
            .filter(|color| !self.completed.contains(*color));

        if most_constrained {
            candidates.min_by_key(|color| self.legal_moves(puzzle, *color))
        } else {
            candidates.next()
        }
    }

    /// No free cell remains and every color has reached its goal.
    pub fn is_solved(&self, puzzle: &Puzzle) -> bool {
        self.num_free == 0 && self.completed == ColorSet::full(puzzle.num_colors())
    }

    /// Draw this state using the display characters of `puzzle`.
    pub fn render(&self, puzzle: &Puzzle) -> String {
        let displays = puzzle.displays();
        SquareStep::print(self.cells.map(|cell| cell.display(&displays)))
    }
}
