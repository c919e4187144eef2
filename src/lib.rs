#![warn(missing_docs)]

//! # `permanganate-flow`
//!
//! A solver for [Numberlink](https://en.wikipedia.org/wiki/Numberlink) as posited in the mobile game Flow Free.
//! Begin by building a board object using [`BoardBuilder`](builder::BoardBuilder) or by parsing puzzle text,
//! then call [`solve()`](crate::Board::solve), consuming the board and yielding a solved version of the board.
//!
//! # Internals
//! Every color has an initial cell its flow grows from and a goal cell it must reach.
//! A move extends one flow by one cell, and the solver performs a uniform-cost (Dijkstra) search over move sequences,
//! in the spirit of [Matt Zucker's solver](https://mzucker.github.io/2016/08/28/flow-solver.html).
//!
//! A high level overview is as follows:
//!
//! 1. Colors are put in a branching order, either sorted on how constrained they look or shuffled from a seed.
//! 2. Flows whose endpoints share an open row or column are walked straight to their goal.
//! 3. The cheapest state is popped from a priority queue and one color, the one with the fewest legal moves,
//!    is extended in every legal direction.
//! 4. Children containing a dead end, a cell that can no longer be entered and left, are dropped on the spot.
//! 5. The search stops at the first state with every cell covered and every flow connected,
//!    when the queue runs dry, or when the queue outgrows its node budget.
//!
//! Nodes live in an arena for the whole search and refer to their parent by handle, so the winning move sequence
//! can be read back and everything is freed at once when the search returns.

pub use board::Board;
pub use builder::Builder;
pub use cell::Cell;
pub use color::{ColorId, ColorSet, MAX_COLORS};
pub use config::SearchConfig;
pub use error::{BuildError, BuilderInvalidReason, ParseError, SolverFailure};
pub use location::{Dimension, Location};
pub use puzzle::{Flow, Puzzle};
pub use search::{SearchOutcome, SearchReport};
pub use shape::SquareStep;
pub use state::{Cost, Move, State};

pub(crate) mod arena;
pub(crate) mod board;
pub mod builder;
pub(crate) mod cell;
pub(crate) mod color;
pub(crate) mod config;
pub mod deadend;
pub(crate) mod error;
pub(crate) mod location;
pub mod order;
pub(crate) mod puzzle;
pub mod search;
pub(crate) mod shape;
pub(crate) mod state;
