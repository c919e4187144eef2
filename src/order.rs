//! The order in which colors are offered for branching.

use std::cmp::Reverse;
use std::time::{SystemTime, UNIX_EPOCH};

use itertools::Itertools;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::color::{ColorId, MAX_COLORS};
use crate::config::SearchConfig;
use crate::puzzle::Puzzle;

/// Per-color facts used to rank colors for branching.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ColorFeatures {
    color: ColorId,
    user_index: usize,
    // initial, goal
    wall_dist: (usize, usize),
    min_dist: usize,
}

impl ColorFeatures {
    fn of(puzzle: &Puzzle, color: ColorId, priority: &[char]) -> Self {
        let flow = puzzle.flow(color);
        Self {
            color,
            user_index: priority.iter().position(|c| *c == flow.display).unwrap_or(MAX_COLORS),
            wall_dist: (puzzle.wall_distance(flow.initial), puzzle.wall_distance(flow.goal)),
            min_dist: flow.initial.manhattan_to(flow.goal),
        }
    }

    /// Colors pinned by the user come first, then those starting near a wall and ending deep inside the board,
    /// then those whose endpoints lie far apart.
    fn rank(&self) -> (usize, usize, Reverse<usize>, Reverse<usize>) {
        (self.user_index, self.wall_dist.0, Reverse(self.wall_dist.1), Reverse(self.min_dist))
    }
}

/// Fisher-Yates shuffle of `order`, fully determined by `seed`.
pub(crate) fn shuffle(order: &mut [ColorId], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for i in (1..order.len()).rev() {
        let j = rng.random_range(0..=i);
        order.swap(i, j);
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_micros() as u64)
        .unwrap_or_default()
}

/// Fix the order in which colors are offered to [`State::next_move_color`](crate::State::next_move_color).
///
/// Either a seeded shuffle or a deterministic sort on color features, depending on [`SearchConfig::random_order`].
pub fn order_colors(puzzle: &mut Puzzle, config: &SearchConfig) {
    let mut order = (0..puzzle.num_colors()).collect_vec();

    if config.random_order {
        let seed = config.seed.unwrap_or_else(clock_seed);
        debug!("shuffling branching order with seed {}", seed);
        shuffle(&mut order, seed);
    } else {
        order = order.into_iter()
            .map(|color| ColorFeatures::of(puzzle, color, &config.color_priority))
            .sorted_by_key(ColorFeatures::rank)
            .map(|features| features.color)
            .collect_vec();
    }

    puzzle.color_order = order;

    if config.most_constrained {
        info!("branching on the most constrained color, ties broken in order {}", order_string(puzzle));
    } else {
        info!("branching on colors in order {}", order_string(puzzle));
    }
}

fn order_string(puzzle: &Puzzle) -> String {
    puzzle.color_order.iter().map(|color| puzzle.flow(*color).display).collect()
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;

    use crate::builder::{BoardBuilder, Builder};
    use crate::config::SearchConfig;
    use crate::location::Location;
    use crate::order::{order_colors, shuffle};

    fn three_flows() -> crate::Board {
        // A . . . .
        // . B . C .
        // . . . . .
        // . B . . .
        // A . . C .
        BoardBuilder::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
            .add_termini('A', (Location(0, 0), Location(0, 4)))
            .add_termini('B', (Location(1, 1), Location(1, 3)))
            .add_termini('C', (Location(3, 4), Location(3, 1)))
            .build()
            .unwrap()
    }

    #[test]
    fn features_sort() {
        let mut board = three_flows();
        order_colors(&mut board.puzzle, &SearchConfig::default());

        // C starts on the wall and ends inside; A is on the wall at both ends; B starts inside
        assert_eq!(board.puzzle.color_order(), &[2, 0, 1]);
    }

    #[test]
    fn user_priority_comes_first() {
        let mut board = three_flows();
        let config = SearchConfig { color_priority: vec!['B'], ..Default::default() };
        order_colors(&mut board.puzzle, &config);

        assert_eq!(board.puzzle.color_order(), &[1, 2, 0]);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let mut board = three_flows();
        let config = SearchConfig { random_order: true, seed: Some(7), ..Default::default() };
        order_colors(&mut board.puzzle, &config);
        let first = board.puzzle.color_order().to_vec();
        order_colors(&mut board.puzzle, &config);

        assert_eq!(board.puzzle.color_order(), first.as_slice());

        let mut sorted = first.clone();
        sorted.sort();
        assert_eq!(sorted, vec![0, 1, 2]);
    }

    #[test]
    fn shuffle_keeps_every_color() {
        for seed in 0..32 {
            let mut order = (0..10).collect::<Vec<_>>();
            shuffle(&mut order, seed);
            order.sort();
            assert_eq!(order, (0..10).collect::<Vec<_>>());
        }
    }
}
