use tilewalk_paths::{DEFAULT_MAX_EXPANSIONS, Frontier};

/// Startup configuration of a [`RouteFinder`](crate::RouteFinder).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RouteConfig {
    /// Halt when a search fails again for a goal coordinate that already
    /// failed once.
    pub stop_on_unreachable_destination: bool,
    /// Halt when a failed search produces a route identical to an earlier
    /// failed one, i.e. the actor would shuttle back and forth.
    pub stop_on_unreachable_route: bool,
    /// Bound on node expansions per search.
    pub max_expansions: usize,
    pub frontier: Frontier,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            stop_on_unreachable_destination: false,
            stop_on_unreachable_route: true,
            max_expansions: DEFAULT_MAX_EXPANSIONS,
            frontier: Frontier::Scan,
        }
    }
}

impl RouteConfig {
    pub fn with_stop_on_unreachable_destination(mut self, on: bool) -> Self {
        self.stop_on_unreachable_destination = on;
        self
    }

    pub fn with_stop_on_unreachable_route(mut self, on: bool) -> Self {
        self.stop_on_unreachable_route = on;
        self
    }

    pub fn with_max_expansions(mut self, max: usize) -> Self {
        self.max_expansions = max;
        self
    }

    pub fn with_frontier(mut self, frontier: Frontier) -> Self {
        self.frontier = frontier;
        self
    }
}
