//! Route following for tile-grid actors.
//!
//! Each movement tick the caller asks a [`DirectionFinder`] which way an
//! actor should step towards a goal. [`RouteFinder`] answers from the
//! route buffered in the actor's [`RouteState`] when it still leads to the
//! same goal, and otherwise runs a fresh bounded search.
//!
//! Searches that fail to reach the goal are remembered twice: by goal
//! coordinate and by [`RouteSignature`]. Seeing the same failure again means
//! the actor is stuck, and depending on [`RouteConfig`] the finder answers
//! [`Heading::Halt`] so the caller can give up on automatic movement.
//!
//! | State | Meaning |
//! |---|---|
//! | [`Phase::Idle`] | no buffered route |
//! | [`Phase::Buffered`] | a route to the recorded goal is buffered |

mod config;
mod finder;
mod heading;
mod signature;
mod state;

pub use config::RouteConfig;
pub use finder::{DirectionFinder, Mover, RouteFinder};
pub use heading::{Halt, Heading};
pub use signature::RouteSignature;
pub use state::{Phase, RouteState};
