use std::mem::size_of;
use std::ops::Index;

use crate::cell::Cell;
use crate::location::Location;
use crate::puzzle::Puzzle;
use crate::state::{Cost, Move, State};

/// Handle to a [`Node`] held by an [`Arena`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct NodeId(usize);

/// A point in the search tree: the state reached, what it cost and how it was reached.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) cost: Cost,
    pub(crate) state: State,
    pub(crate) parent: Option<NodeId>,
    pub(crate) step: Option<Move>,
}

impl Node {
    pub(crate) fn root(state: State) -> Self {
        Self { cost: 0, state, parent: None, step: None }
    }

    /// Apply `step` to a copy of the state held by `parent`.
    pub(crate) fn child(puzzle: &Puzzle, parent_id: NodeId, parent: &Node, step: Move) -> Self {
        let mut state = parent.state.clone();
        let move_cost = state.make_move(puzzle, step.color, step.direction);

        Self {
            cost: parent.cost + move_cost,
            state,
            parent: Some(parent_id),
            step: Some(step),
        }
    }

    /// Bytes taken by one node of `puzzle`, counting the heap storage of its state.
    pub(crate) fn footprint(puzzle: &Puzzle) -> usize {
        size_of::<Node>()
            + puzzle.width() * puzzle.height() * size_of::<Cell>()
            + puzzle.num_colors() * size_of::<Location>()
    }
}

/// Append-only owner of every node registered during one search.
///
/// Nodes are never removed individually; dropping the arena releases them all at once.
#[derive(Debug, Default)]
pub(crate) struct Arena {
    nodes: Vec<Node>,
}

impl Arena {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self { nodes: Vec::with_capacity(capacity) }
    }

    pub(crate) fn register(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Moves leading from the root to `id`, oldest first.
    pub(crate) fn moves_to(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut cursor = Some(id);

        while let Some(current) = cursor {
            let node = &self[current];
            moves.extend(node.step);
            cursor = node.parent;
        }

        moves.reverse();
        moves
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::arena::{Arena, Node};
    use crate::builder::{BoardBuilder, Builder};
    use crate::location::Location;
    use crate::shape::SquareStep;
    use crate::state::Move;

    #[test]
    fn chain_of_children() {
        let board = BoardBuilder::with_dims((NonZero::new(4).unwrap(), NonZero::new(1).unwrap()))
            .add_termini('A', (Location(0, 0), Location(3, 0)))
            .build()
            .unwrap();
        let step = Move { color: 0, direction: SquareStep::Right };

        let mut arena = Arena::default();
        let root = arena.register(Node::root(board.state.clone()));
        let first = arena.register(Node::child(&board.puzzle, root, &arena[root], step));
        let second = arena.register(Node::child(&board.puzzle, first, &arena[first], step));

        assert_eq!(arena.len(), 3);
        assert_eq!(arena[second].parent, Some(first));
        assert_eq!(arena[second].cost, arena[first].cost + 1);
        assert_eq!(arena[second].state.num_free(), 0);
        assert_eq!(arena.moves_to(second), vec![step, step]);
        assert!(arena.moves_to(root).is_empty());
    }
}
