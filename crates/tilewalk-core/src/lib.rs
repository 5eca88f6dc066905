//! **tilewalk-core**: geometry and map primitives shared by the tilewalk
//! crates.
//!
//! This crate provides the integer [`Point`], the eight keypad
//! [`Direction`]s, the [`TileMap`] trait through which the search engine
//! queries stepping, passability and wrap-aware offsets, and [`TileGrid`],
//! a plain boolean map implementing it.

pub mod dir;
pub mod geom;
pub mod grid;
pub mod map;

pub use dir::Direction;
pub use geom::Point;
pub use grid::{GridError, TileGrid};
pub use map::TileMap;
