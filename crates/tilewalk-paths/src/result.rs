use std::fmt;

use tilewalk_core::Point;

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The goal was reached; the route ends on it.
    Arrived,
    /// Every reachable cell was expanded without meeting the goal; the
    /// route ends at the closest cell found.
    Approximate,
    /// The expansion bound was hit first; the route ends at the closest
    /// cell found so far.
    LimitExceeded,
}

impl Outcome {
    /// Short tag used in search logs.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Arrived => "Arrived",
            Self::Approximate => "Near",
            Self::LimitExceeded => "Limit",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.tag())
    }
}

/// The route found by [`Searcher::search`](crate::Searcher::search).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// Waypoints from the first step after the start up to the target cell.
    /// Empty only when start and goal coincide. When nothing beat the start
    /// cell, this holds the start cell alone.
    pub path: Vec<Point>,
    pub outcome: Outcome,
    /// Number of nodes whose neighbours were evaluated.
    pub expansions: usize,
}

impl SearchResult {
    #[inline]
    pub fn arrived(&self) -> bool {
        self.outcome == Outcome::Arrived
    }

    #[inline]
    pub fn terminated_by_limit(&self) -> bool {
        self.outcome == Outcome::LimitExceeded
    }

    /// Last waypoint, i.e. the goal when [`arrived`](Self::arrived).
    pub fn target(&self) -> Option<Point> {
        self.path.last().copied()
    }
}
