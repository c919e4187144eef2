/// Bytes in a megabyte, as used by [`SearchConfig::max_mb`].
pub const MEGABYTE: f64 = 1024.0 * 1024.0;

/// Knobs for a single search run.
///
/// Every run starts from scratch; to get a different outcome after [`Full`](crate::SolverFailure::Full) or
/// [`Unreachable`](crate::SolverFailure::Unreachable), change these and search again.
#[derive(Clone, Debug)]
pub struct SearchConfig {
    /// Hard cap on queued nodes. Takes precedence over [`Self::max_mb`] when set.
    pub node_limit: Option<usize>,
    /// Memory ceiling, in megabytes, from which the node cap is derived when [`Self::node_limit`] is unset.
    pub max_mb: f64,
    /// Drop children whose board contains a dead end.
    pub check_dead_ends: bool,
    /// Commit flows whose endpoints share an unobstructed row or column before searching.
    pub link_straight_flows: bool,
    /// Shuffle the branching order instead of sorting colors by their features.
    pub random_order: bool,
    /// Seed for [`Self::random_order`]; the wall clock is used when unset.
    pub seed: Option<u64>,
    /// Branch on the color with the fewest legal moves rather than the first unfinished one.
    pub most_constrained: bool,
    /// Display characters of colors to branch on first, in order.
    pub color_priority: Vec<char>,
    /// Log the cheapest queued node when the search runs out of room.
    pub diagnostics: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            node_limit: None,
            max_mb: 128.0,
            check_dead_ends: true,
            link_straight_flows: true,
            random_order: false,
            seed: None,
            most_constrained: true,
            color_priority: Vec::new(),
            diagnostics: false,
        }
    }
}
