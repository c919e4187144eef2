use std::fmt::{Display, Formatter};

use log::info;

use crate::config::SearchConfig;
use crate::error::SolverFailure;
use crate::order::order_colors;
use crate::puzzle::Puzzle;
use crate::search::{dijkstra, SearchOutcome, SearchReport};
use crate::state::State;

/// A puzzle together with the current state of its cells.
///
/// [`Board`]s should be built using a [`Builder`](crate::builder::Builder) such as [`BoardBuilder`](crate::builder::BoardBuilder),
/// or parsed from text with [`str::parse`].
#[derive(Clone, Debug)]
pub struct Board {
    pub(crate) puzzle: Puzzle,
    pub(crate) state: State,
}

impl Board {
    /// The fixed part of this board: dimensions, termini and branching order.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// The current contents of every cell.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Fix the branching order per `config` and run a bounded search from the current state.
    ///
    /// The board itself is left unsolved; the report carries the final state and moves on success.
    pub fn search(&mut self, config: &SearchConfig) -> SearchReport {
        order_colors(&mut self.puzzle, config);
        dijkstra(&self.puzzle, &self.state, config)
    }

    /// Solves this board, consuming it and returning the solved version.
    ///
    /// Returns [`SolverFailure::Unreachable`] if the queue ran dry and [`SolverFailure::Full`] if the node budget ran out.
    pub fn solve(mut self, config: &SearchConfig) -> Result<Self, SolverFailure> {
        let report = self.search(config);

        match report.outcome {
            SearchOutcome::Success => {
                info!("solved in {} moves after {:.3}s", report.moves.len(), report.elapsed.as_secs_f64());
                if let Some(state) = report.final_state {
                    self.state = state;
                }
                Ok(self)
            }
            SearchOutcome::Unreachable => Err(SolverFailure::Unreachable),
            SearchOutcome::Full => Err(SolverFailure::Full { nodes: report.nodes }),
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.state.render(&self.puzzle))
    }
}
