use std::collections::{HashSet, VecDeque};

use log::debug;
use tilewalk_core::Point;

use crate::signature::RouteSignature;

/// Whether an actor currently has a route to follow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Buffered,
}

/// Pathfinding state owned by one actor.
///
/// Holds the buffered route, the goal it was planned for, and the memory of
/// goals and routes that failed to arrive. A finder mutates it only through
/// the actor's own direction requests.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteState {
    pub(crate) route: VecDeque<Point>,
    pub(crate) goal: Option<Point>,
    pub(crate) unreachable_goals: HashSet<Point>,
    pub(crate) unreachable_routes: HashSet<RouteSignature>,
}

impl RouteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.route.is_empty() {
            Phase::Idle
        } else {
            Phase::Buffered
        }
    }

    /// Remaining waypoints, next one first.
    pub fn route(&self) -> &VecDeque<Point> {
        &self.route
    }

    /// Goal the buffered route was planned for.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    pub fn is_unreachable_goal(&self, goal: Point) -> bool {
        self.unreachable_goals.contains(&goal)
    }

    pub fn is_unreachable_route(&self, sig: &RouteSignature) -> bool {
        self.unreachable_routes.contains(sig)
    }

    pub fn unreachable_goal_count(&self) -> usize {
        self.unreachable_goals.len()
    }

    pub fn unreachable_route_count(&self) -> usize {
        self.unreachable_routes.len()
    }

    /// Drop the buffered route. The goal record is kept.
    pub fn clear_route(&mut self) {
        if !self.route.is_empty() {
            self.route.clear();
            debug!("route buffer cleared");
        }
    }

    /// Forget every goal and route recorded as unreachable.
    pub fn clear_memos(&mut self) {
        if !self.unreachable_goals.is_empty() {
            self.unreachable_goals.clear();
            debug!("unreachable goals cleared");
        }
        if !self.unreachable_routes.is_empty() {
            self.unreachable_routes.clear();
            debug!("unreachable routes cleared");
        }
    }

    /// Back to a fresh state, as after a teleport.
    pub fn reset(&mut self) {
        self.clear_route();
        self.clear_memos();
        self.goal = None;
    }

    pub(crate) fn remember_failure(&mut self, goal: Point, sig: RouteSignature) {
        debug!("unreachable goal {goal}, route {sig}");
        self.unreachable_goals.insert(goal);
        self.unreachable_routes.insert(sig);
    }
}
