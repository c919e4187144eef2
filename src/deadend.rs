//! Detection of cells that no future sequence of moves can use.
//!
//! A free cell must eventually be crossed by a flow, so it needs a way in and a way out.
//! An initial cell needs a way out, a goal cell a way in and a head a way forward.
//! Only heads and unstarted initial cells count as a way in, since path bodies never move again.

use crate::cell::Cell;
use crate::location::Location;
use crate::puzzle::Puzzle;
use crate::state::State;

/// What the neighbors of a candidate cell offer it.
#[derive(Default)]
struct Openings {
    free_neighbors: usize,
    // for a free candidate
    can_enter_from: bool,
    can_go_to: bool,
    // for terminus and head candidates of the same color
    can_enter_goal_from: bool,
    init_can_go_to: bool,
    head_can_go_to: bool,
}

impl Openings {
    fn around(puzzle: &Puzzle, state: &State, location: Location, own_color: Option<usize>) -> Self {
        let mut openings = Self::default();

        for neighbor in puzzle.neighbors(location) {
            let Some(cell) = state.cell(neighbor) else { continue };
            let same_color = cell.color().is_some() && cell.color() == own_color;

            match cell {
                Cell::Free => openings.free_neighbors += 1,
                Cell::Goal { completed: false, .. } => {
                    openings.can_go_to = true;
                    if same_color {
                        openings.head_can_go_to = true;
                        openings.init_can_go_to = true;
                    }
                }
                Cell::Goal { completed: true, .. } => {
                    // an initial cell that stepped straight into its goal
                    if same_color {
                        openings.init_can_go_to = true;
                    }
                }
                Cell::Path { head, .. } => {
                    if head {
                        openings.can_enter_from = true;
                        if same_color {
                            openings.can_enter_goal_from = true;
                        }
                    }
                    if same_color {
                        openings.init_can_go_to = true;
                    }
                }
                Cell::Initial { color } => {
                    if state.is_unstarted(puzzle, color) {
                        openings.can_enter_from = true;
                        if same_color {
                            openings.can_enter_goal_from = true;
                        }
                    }
                }
            }
        }

        openings
    }
}

/// Whether the cell at `location` has become a dead end in `state`.
///
/// Free neighbors are wildcards, usable as either a way in or a way out.
/// Path bodies and completed goals are never dead ends.
pub fn is_dead_end_cell(puzzle: &Puzzle, state: &State, location: Location) -> bool {
    let Some(cell) = state.cell(location) else {
        return false;
    };
    let openings = Openings::around(puzzle, state, location, cell.color());
    let any_free = openings.free_neighbors > 0;

    let alive = match cell {
        Cell::Free => {
            usize::from(openings.can_enter_from) + usize::from(openings.can_go_to) + openings.free_neighbors >= 2
        }
        Cell::Goal { completed, .. } => completed || openings.can_enter_goal_from || any_free,
        Cell::Initial { .. } => openings.init_can_go_to || any_free,
        Cell::Path { head: true, .. } => openings.head_can_go_to || any_free,
        Cell::Path { head: false, .. } => true,
    };

    !alive
}

/// Scan the whole board for a dead end, stopping at the first one found.
///
/// Cells with two or more free neighbors are skipped without classification, as are path bodies.
pub fn has_dead_end(puzzle: &Puzzle, state: &State) -> bool {
    state.cells.indexed_iter()
        .map(|(index, _)| Location::from(index))
        .filter(|location| state.num_free_neighbors(puzzle, *location) <= 1)
        .filter(|location| !matches!(state.cell(*location), Some(Cell::Path { head: false, .. })))
        .any(|location| is_dead_end_cell(puzzle, state, location))
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::builder::{BoardBuilder, Builder};
    use crate::deadend::{has_dead_end, is_dead_end_cell};
    use crate::location::Location;
    use crate::shape::SquareStep;

    fn dims(width: usize, height: usize) -> (NonZero<usize>, NonZero<usize>) {
        (NonZero::new(width).unwrap(), NonZero::new(height).unwrap())
    }

    #[test]
    fn free_cell_between_two_free_cells() {
        let board = BoardBuilder::with_dims(dims(3, 1)).build().unwrap();

        assert!(!is_dead_end_cell(&board.puzzle, &board.state, Location(1, 0)));
        // each end has a single free neighbor and nothing else
        assert!(is_dead_end_cell(&board.puzzle, &board.state, Location(0, 0)));
    }

    #[test]
    fn isolated_free_cell() {
        let board = BoardBuilder::with_dims(dims(1, 1)).build().unwrap();

        assert!(is_dead_end_cell(&board.puzzle, &board.state, Location(0, 0)));
        assert!(has_dead_end(&board.puzzle, &board.state));
    }

    #[test]
    fn free_cell_between_head_and_goal() {
        // A . A: the free cell is entered from the unstarted initial and exits to the goal
        let board = BoardBuilder::with_dims(dims(3, 1))
            .add_termini('A', (Location(0, 0), Location(2, 0)))
            .build()
            .unwrap();

        assert!(!is_dead_end_cell(&board.puzzle, &board.state, Location(1, 0)));
        assert!(!has_dead_end(&board.puzzle, &board.state));
    }

    #[test]
    fn free_cell_beside_foreign_goal() {
        // A B .
        // A B .
        let board = BoardBuilder::with_dims(dims(3, 2))
            .add_termini('A', (Location(0, 0), Location(0, 1)))
            .add_termini('B', (Location(1, 1), Location(1, 0)))
            .build()
            .unwrap();

        // an open goal and a free cell make a way in and a way out
        assert!(!is_dead_end_cell(&board.puzzle, &board.state, Location(2, 0)));

        let mut state = board.state.clone();
        state.make_move(&board.puzzle, 1, SquareStep::Up);
        state.make_move(&board.puzzle, 0, SquareStep::Down);

        // both flows are done, leaving the right column with nobody to fill it
        assert!(is_dead_end_cell(&board.puzzle, &state, Location(2, 0)));
        assert!(has_dead_end(&board.puzzle, &state));
    }

    #[test]
    fn path_body_is_never_a_dead_end() {
        let board = BoardBuilder::with_dims(dims(4, 1))
            .add_termini('A', (Location(0, 0), Location(3, 0)))
            .build()
            .unwrap();
        let mut state = board.state.clone();
        state.make_move(&board.puzzle, 0, SquareStep::Right);
        state.make_move(&board.puzzle, 0, SquareStep::Right);

        assert!(!is_dead_end_cell(&board.puzzle, &state, Location(1, 0)));
        // the head sits next to its own goal
        assert!(!is_dead_end_cell(&board.puzzle, &state, Location(2, 0)));
        assert!(!has_dead_end(&board.puzzle, &state));
    }

    #[test]
    fn head_beside_own_goal() {
        // A . A
        // B . B
        let board = BoardBuilder::with_dims(dims(3, 2))
            .add_termini('A', (Location(0, 0), Location(2, 0)))
            .add_termini('B', (Location(0, 1), Location(2, 1)))
            .build()
            .unwrap();
        let mut state = board.state.clone();
        state.make_move(&board.puzzle, 1, SquareStep::Right);

        assert!(!is_dead_end_cell(&board.puzzle, &state, Location(1, 1)));
        // entered from A's initial or B's head, left into A's goal
        assert!(!is_dead_end_cell(&board.puzzle, &state, Location(1, 0)));
    }

    #[test]
    fn stranded_head() {
        // A . B A
        // C C B .
        let board = BoardBuilder::with_dims(dims(4, 2))
            .add_termini('A', (Location(0, 0), Location(3, 0)))
            .add_termini('B', (Location(2, 0), Location(2, 1)))
            .add_termini('C', (Location(0, 1), Location(1, 1)))
            .build()
            .unwrap();
        let mut state = board.state.clone();
        state.make_move(&board.puzzle, 0, SquareStep::Right);

        assert!(is_dead_end_cell(&board.puzzle, &state, Location(1, 0)));
        assert!(has_dead_end(&board.puzzle, &state));
    }

    #[test]
    fn completed_terminals_are_satisfied() {
        let board = BoardBuilder::with_dims(dims(2, 1))
            .add_termini('A', (Location(0, 0), Location(1, 0)))
            .build()
            .unwrap();
        let mut state = board.state.clone();
        state.make_move(&board.puzzle, 0, SquareStep::Right);

        assert!(!is_dead_end_cell(&board.puzzle, &state, Location(0, 0)));
        assert!(!is_dead_end_cell(&board.puzzle, &state, Location(1, 0)));
        assert!(!has_dead_end(&board.puzzle, &state));
    }

    #[test]
    fn goal_cut_off_from_its_flow() {
        // the goal of A is boxed in by B's termini
        // A B A
        // . B .
        let board = BoardBuilder::with_dims(dims(3, 2))
            .add_termini('A', (Location(0, 0), Location(2, 0)))
            .add_termini('B', (Location(1, 0), Location(1, 1)))
            .build()
            .unwrap();
        let mut state = board.state.clone();
        state.make_move(&board.puzzle, 1, SquareStep::Down);
        state.make_move(&board.puzzle, 0, SquareStep::Down);

        // (2, 1) only borders a live goal: one opening is not enough
        assert!(is_dead_end_cell(&board.puzzle, &state, Location(2, 1)));
        assert!(has_dead_end(&board.puzzle, &state));
    }
}
