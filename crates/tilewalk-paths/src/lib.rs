//! Bounded best-first route search on tile grids.
//!
//! [`Searcher`] finds a route from a start cell towards a goal through any
//! [`TileMap`](tilewalk_core::TileMap). Cardinal steps cost
//! [`CARDINAL_COST`] and diagonal steps cost [`DIAGONAL_COST`], so among
//! routes of equal length the one with fewer diagonals wins. The distance
//! estimate is the map's Euclidean [`distance`](tilewalk_core::TileMap::distance).
//!
//! A search always yields something usable: when the goal cannot be reached,
//! either because the open list ran dry or because the expansion bound was
//! hit, the route leads to the closest cell seen.
//!
//! Like gruid's `PathRange`, a `Searcher` keeps its node arena and lists
//! between calls, so repeated searches stop allocating once warmed up.

mod node;
mod result;
mod search;

pub use node::Frontier;
pub use result::{Outcome, SearchResult};
pub use search::Searcher;

/// Cost of a cardinal (one-axis) step.
pub const CARDINAL_COST: f64 = 1.0;

/// Cost of a diagonal step.
pub const DIAGONAL_COST: f64 = 1.5;

/// Default bound on node expansions per search.
pub const DEFAULT_MAX_EXPANSIONS: usize = 2000;
