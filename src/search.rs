//! Bounded Dijkstra search over move sequences.
//!
//! Every node lives in an [`Arena`] for the whole run; the priority queue only holds [`NodeId`]s.
//! The queue is capped by a node budget, so every run ends in success, exhaustion or a full queue.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

use itertools::Itertools;
use log::{debug, info, trace};
use strum::VariantArray;

use crate::arena::{Arena, Node, NodeId};
use crate::color::ColorId;
use crate::config::{SearchConfig, MEGABYTE};
use crate::deadend::has_dead_end;
use crate::puzzle::Puzzle;
use crate::shape::SquareStep;
use crate::state::{Cost, Move, State};

/// How a search ended.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchOutcome {
    /// A state with every cell covered and every flow connected was reached.
    Success,
    /// The queue ran dry, from the unlinked root too if straight flows were linked first.
    /// With dead-end pruning enabled this does not prove the puzzle unsolvable.
    Unreachable,
    /// The queue outgrew the node budget.
    Full,
}

/// Everything a search run reports back.
#[derive(Clone, Debug)]
pub struct SearchReport {
    /// How the run ended.
    pub outcome: SearchOutcome,
    /// Wall-clock time spent searching.
    pub elapsed: Duration,
    /// Nodes left in the priority queue when the search stopped.
    pub nodes: usize,
    /// Nodes registered over the whole run, popped ones included.
    pub generated: usize,
    /// The queue capacity the run was given.
    pub budget: usize,
    /// On success, the solved state.
    pub final_state: Option<State>,
    /// On success, the cost of the solution.
    pub cost: Option<Cost>,
    /// On success, every move from the initial state to [`Self::final_state`].
    pub moves: Vec<Move>,
}

/// Queue entry; the cheapest node pops first, and among equals the one queued earliest.
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd)]
struct FrontierKey {
    cost: Cost,
    order: u64,
    node: NodeId,
}

#[derive(Debug, Default)]
struct Frontier {
    heap: BinaryHeap<Reverse<FrontierKey>>,
    pushed: u64,
}

impl Frontier {
    fn push(&mut self, node: NodeId, cost: Cost) {
        self.heap.push(Reverse(FrontierKey { cost, order: self.pushed, node }));
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<NodeId> {
        self.heap.pop().map(|Reverse(key)| key.node)
    }

    fn peek(&self) -> Option<NodeId> {
        self.heap.peek().map(|Reverse(key)| key.node)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// How many queued nodes a search of `puzzle` may hold.
///
/// An explicit [`node_limit`](SearchConfig::node_limit) wins; otherwise the memory ceiling is divided by the size of one node.
pub fn node_budget(puzzle: &Puzzle, config: &SearchConfig) -> usize {
    config.node_limit.unwrap_or_else(|| (config.max_mb * MEGABYTE / Node::footprint(puzzle) as f64).floor() as usize)
}

/// Whether the straight line from the initial cell of `color` toward its goal, stepping in `direction`, is obstructed.
///
/// The scan starts beside the initial cell and walks over free cells; it is clear only if it arrives at the goal.
pub fn path_blocked(puzzle: &Puzzle, state: &State, color: ColorId, direction: SquareStep) -> bool {
    let goal = puzzle.goal(color);
    let mut cursor = puzzle.neighbor(puzzle.initial(color), direction);

    while let Some(location) = cursor {
        if location == goal {
            return false;
        }
        if !state.is_free(location) {
            return true;
        }
        cursor = puzzle.neighbor(location, direction);
    }

    true
}

/// Walk every color whose endpoints share an open row or column straight to its goal.
///
/// Each step becomes a node chained off the previous one; the last node is returned as the new root.
/// A color stops early if another linked flow has since crossed its line.
pub(crate) fn link_straight_flows(puzzle: &Puzzle, arena: &mut Arena, root: NodeId) -> NodeId {
    let directions = (0..puzzle.num_colors())
        .filter_map(|color| {
            SquareStep::toward(puzzle.initial(color), puzzle.goal(color))
                .filter(|dir| !path_blocked(puzzle, &arena[root].state, color, *dir))
                .map(|dir| (color, dir))
        })
        .collect_vec();

    let mut current = root;
    for (color, direction) in directions {
        while !arena[current].state.is_completed(color) && arena[current].state.can_move(puzzle, color, direction) {
            let child = Node::child(puzzle, current, &arena[current], Move { color, direction });
            current = arena.register(child);
        }
    }

    if current != root {
        debug!("linked straight flows in {} moves", arena[current].cost - arena[root].cost);
    }

    current
}

/// Run the main loop from `root` until it finds a solution, runs dry or outgrows `budget`.
fn expand(
    puzzle: &Puzzle,
    arena: &mut Arena,
    frontier: &mut Frontier,
    root: NodeId,
    budget: usize,
    config: &SearchConfig,
) -> (SearchOutcome, Option<NodeId>) {
    frontier.push(root, arena[root].cost);
    if arena[root].state.is_solved(puzzle) {
        return (SearchOutcome::Success, Some(root));
    }

    while let Some(id) = frontier.pop() {
        let Some(color) = arena[id].state.next_move_color(puzzle, config.most_constrained) else {
            continue;
        };

        for direction in SquareStep::VARIANTS.iter().copied() {
            if !arena[id].state.can_move(puzzle, color, direction) {
                continue;
            }
            if frontier.len() > budget {
                return (SearchOutcome::Full, None);
            }

            let child = Node::child(puzzle, id, &arena[id], Move { color, direction });
            if config.check_dead_ends && has_dead_end(puzzle, &child.state) {
                trace!("pruned color {} moving {:?} at cost {}", color, direction, child.cost);
                continue;
            }

            let solved = child.state.is_solved(puzzle);
            let cost = child.cost;
            let child = arena.register(child);
            if solved {
                return (SearchOutcome::Success, Some(child));
            }
            frontier.push(child, cost);
        }
    }

    (SearchOutcome::Unreachable, None)
}

/// Solve `puzzle` from `initial` by uniform-cost search, bounded by the node budget derived from `config`.
///
/// The branching order stored in `puzzle` is used as is; see [`order_colors`](crate::order::order_colors).
///
/// Straight flows are only a shortcut: if the search from the linked root runs dry,
/// it is repeated from `initial` itself, so linking never changes whether a solution is found.
pub fn dijkstra(puzzle: &Puzzle, initial: &State, config: &SearchConfig) -> SearchReport {
    let budget = node_budget(puzzle, config);
    info!(
        "will search up to {} nodes ({:.2} MB); {} free cells at start",
        budget,
        budget as f64 * Node::footprint(puzzle) as f64 / MEGABYTE,
        initial.num_free(),
    );

    let start = Instant::now();
    let mut arena = Arena::with_capacity(budget.min(1 << 16));
    let mut frontier = Frontier::default();

    let root = arena.register(Node::root(initial.clone()));
    let linked = match config.link_straight_flows {
        true => link_straight_flows(puzzle, &mut arena, root),
        false => root,
    };

    let mut result = expand(puzzle, &mut arena, &mut frontier, linked, budget, config);
    if result.0 == SearchOutcome::Unreachable && linked != root {
        debug!("no solution with straight flows linked; searching again from the unlinked root");
        frontier = Frontier::default();
        result = expand(puzzle, &mut arena, &mut frontier, root, budget, config);
    }
    let (outcome, solution) = result;

    let elapsed = start.elapsed();

    if outcome == SearchOutcome::Full && config.diagnostics {
        if let Some(next) = frontier.peek() {
            let node = &arena[next];
            debug!(
                "cheapest queued node: cost {}, {} free cells, {} colors completed\n{}",
                node.cost,
                node.state.num_free(),
                node.state.completed().len(),
                node.state.render(puzzle),
            );
        }
    }

    debug!(
        "search finished: {:?} after {:.3}s, {} queued, {} generated",
        outcome,
        elapsed.as_secs_f64(),
        frontier.len(),
        arena.len(),
    );

    SearchReport {
        outcome,
        elapsed,
        nodes: frontier.len(),
        generated: arena.len(),
        budget,
        final_state: solution.map(|id| arena[id].state.clone()),
        cost: solution.map(|id| arena[id].cost),
        moves: solution.map(|id| arena.moves_to(id)).unwrap_or_default(),
    }
}
