use std::time::Instant;

use log::{debug, info};
use tilewalk_core::{Direction, Point, TileMap};
use tilewalk_paths::Searcher;

use crate::config::RouteConfig;
use crate::heading::{Halt, Heading};
use crate::signature::RouteSignature;
use crate::state::RouteState;

/// What a finder needs to know about the actor it steers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mover {
    pub pos: Point,
    /// Whether the actor may move diagonally at all. When it may not, every
    /// heading handed back is cardinal, including the fallbacks.
    pub diagonal: bool,
}

impl Mover {
    pub fn new(pos: Point, diagonal: bool) -> Self {
        Self { pos, diagonal }
    }
}

/// Decides, once per movement tick, which way an actor steps towards a goal.
pub trait DirectionFinder<M: TileMap + ?Sized> {
    /// Next heading for `mover` towards `goal`, updating `state`.
    fn next_direction(
        &mut self,
        map: &M,
        mover: Mover,
        state: &mut RouteState,
        goal: Point,
    ) -> Heading;

    /// The actor was relocated instantly; nothing buffered is valid.
    fn on_teleport(&mut self, state: &mut RouteState) {
        debug!("teleport: route state reset");
        state.reset();
    }
}

/// [`DirectionFinder`] that buffers a searched route and follows it until
/// the goal changes or the route runs out.
#[derive(Debug)]
pub struct RouteFinder {
    config: RouteConfig,
    searcher: Searcher,
    searches: usize,
}

impl Default for RouteFinder {
    fn default() -> Self {
        Self::new(RouteConfig::default())
    }
}

impl RouteFinder {
    pub fn new(config: RouteConfig) -> Self {
        Self {
            config,
            searcher: Searcher::new(config.frontier),
            searches: 0,
        }
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Number of searches run so far.
    pub fn searches(&self) -> usize {
        self.searches
    }

    /// Heading along the buffered route. Waypoints the actor already stands
    /// on are dropped; the next one stays buffered until it is reached.
    fn follow<M: TileMap + ?Sized>(
        map: &M,
        mover: Mover,
        state: &mut RouteState,
    ) -> Option<Direction> {
        while let Some(&head) = state.route.front() {
            if head != mover.pos {
                return towards(map, mover, head);
            }
            state.route.pop_front();
        }
        None
    }
}

impl<M: TileMap + ?Sized> DirectionFinder<M> for RouteFinder {
    fn next_direction(
        &mut self,
        map: &M,
        mover: Mover,
        state: &mut RouteState,
        goal: Point,
    ) -> Heading {
        match state.goal {
            Some(recorded) if recorded == goal => {
                if let Some(dir) = Self::follow(map, mover, state) {
                    debug!(
                        "buffered step {dir} from {}, {} waypoints left",
                        mover.pos,
                        state.route.len()
                    );
                    return Heading::Step(dir);
                }
            }
            Some(recorded) => {
                debug!("goal changed {recorded} -> {goal}");
                state.clear_memos();
            }
            None => {}
        }
        state.clear_route();
        state.goal = Some(goal);

        if mover.pos == goal {
            state.clear_memos();
            return Heading::Halt(Halt::AtGoal);
        }

        let started = Instant::now();
        let result = self.searcher.search(
            map,
            mover.pos,
            goal,
            mover.diagonal,
            self.config.max_expansions,
        );
        self.searches += 1;
        info!(
            "searched {} -> {}: {} expansions in {:.2} ms {}",
            mover.pos,
            goal,
            result.expansions,
            started.elapsed().as_secs_f64() * 1000.0,
            result.outcome,
        );

        let arrived = result.arrived();
        let sig = RouteSignature::new(&result.path);
        state.route = result.path.into();

        if arrived {
            state.clear_memos();
        } else {
            if self.config.stop_on_unreachable_destination && state.is_unreachable_goal(goal) {
                info!("automatic movement stopped: destination {goal} is unreachable");
                state.clear_route();
                return Heading::Halt(Halt::UnreachableDestination);
            }
            if self.config.stop_on_unreachable_route && state.is_unreachable_route(&sig) {
                info!("automatic movement stopped: route {sig} already failed");
                state.clear_route();
                return Heading::Halt(Halt::UnreachableRoute);
            }
            state.remember_failure(goal, sig);
        }

        let first = state.route.front().copied();
        first
            .and_then(|wp| towards(map, mover, wp))
            .or_else(|| towards(map, mover, goal))
            .map_or(Heading::Halt(Halt::NoRoute), Heading::Step)
    }
}

/// Direction along the wrap-aware straight line from the mover to `to`.
/// A mover without diagonals keeps the longer axis, horizontal on a tie.
fn towards<M: TileMap + ?Sized>(map: &M, mover: Mover, to: Point) -> Option<Direction> {
    let dx = map.delta_x(to.x, mover.pos.x);
    let dy = map.delta_y(to.y, mover.pos.y);
    if mover.diagonal || dx == 0 || dy == 0 {
        Direction::from_delta(dx, dy)
    } else if dx.abs() >= dy.abs() {
        Direction::from_delta(dx, 0)
    } else {
        Direction::from_delta(0, dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Phase;
    use tilewalk_core::TileGrid;

    const MAZE: &str = "
############
#@...#.....#
#.##.#.###.#
#.#..#...#.#
#.#.####.#.#
#...#......#
###.#.####.#
#.....#...G#
############
";

    // The goal sits in a walled block; (4, 1) and (4, 5) are the closest
    // floor cells.
    const SEALED: &str = "
#########
#@......#
#.#####.#
#.##G##.#
#.#####.#
#.......#
#########
";

    fn grid(s: &str) -> (TileGrid, Point, Point) {
        let g = TileGrid::from_ascii(s).unwrap();
        let start = g.require_mark('@').unwrap();
        let goal = g.require_mark('G').unwrap();
        (g, start, goal)
    }

    /// Walk until a halt or `ticks` run out. Returns the final position, the
    /// halt if any, and the tick it happened on.
    fn walk(
        map: &TileGrid,
        finder: &mut RouteFinder,
        state: &mut RouteState,
        mut pos: Point,
        goal: Point,
        diagonal: bool,
        ticks: usize,
    ) -> (Point, Option<Halt>, usize) {
        for tick in 0..ticks {
            match finder.next_direction(map, Mover::new(pos, diagonal), state, goal) {
                Heading::Step(d) => {
                    assert!(diagonal || !d.is_diagonal());
                    if map.can_step(pos, d) {
                        pos = map.step(pos, d);
                    }
                }
                Heading::Halt(h) => return (pos, Some(h), tick),
            }
        }
        (pos, None, ticks)
    }

    #[test]
    fn walks_maze_with_one_search() {
        let (g, start, goal) = grid(MAZE);
        for diagonal in [true, false] {
            let mut finder = RouteFinder::default();
            let mut state = RouteState::new();
            let (end, halt, ticks) = walk(&g, &mut finder, &mut state, start, goal, diagonal, 100);
            assert_eq!(end, goal);
            assert_eq!(halt, Some(Halt::AtGoal));
            assert_eq!(finder.searches(), 1);
            assert!(ticks > 0);
            assert_eq!(state.phase(), Phase::Idle);
        }
    }

    #[test]
    fn start_is_goal_halts_without_search() {
        let (g, start, _) = grid(MAZE);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let h = finder.next_direction(&g, Mover::new(start, true), &mut state, start);
        assert_eq!(h, Heading::Halt(Halt::AtGoal));
        assert_eq!(h.code(), 0);
        assert_eq!(finder.searches(), 0);
    }

    #[test]
    fn repeated_calls_without_moving_are_idempotent() {
        let (g, start, goal) = grid(MAZE);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let mover = Mover::new(start, true);
        let first = finder.next_direction(&g, mover, &mut state, goal);
        let snapshot = state.clone();
        for _ in 0..5 {
            assert_eq!(finder.next_direction(&g, mover, &mut state, goal), first);
        }
        assert_eq!(state, snapshot);
        assert_eq!(state.goal(), Some(goal));
        assert_eq!(finder.searches(), 1);
    }

    #[test]
    fn drops_reached_waypoints() {
        let g = TileGrid::new(6, 3);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let goal = Point::new(4, 0);
        let h = finder.next_direction(&g, Mover::new(Point::new(0, 0), true), &mut state, goal);
        assert_eq!(h, Heading::Step(Direction::Right));
        assert_eq!(state.route().len(), 4);

        let h = finder.next_direction(&g, Mover::new(Point::new(1, 0), true), &mut state, goal);
        assert_eq!(h, Heading::Step(Direction::Right));
        assert_eq!(state.route().front(), Some(&Point::new(2, 0)));

        // Pushed off the route: head back to the next waypoint.
        let h = finder.next_direction(&g, Mover::new(Point::new(1, 2), true), &mut state, goal);
        assert_eq!(h, Heading::Step(Direction::UpRight));
        assert_eq!(finder.searches(), 1);
    }

    #[test]
    fn goal_change_searches_again_and_forgets_failures() {
        let (g, start, sealed_goal) = grid(SEALED);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let mover = Mover::new(start, true);

        finder.next_direction(&g, mover, &mut state, sealed_goal);
        assert!(state.is_unreachable_goal(sealed_goal));

        // Another unreachable goal: old failures go, the new one is recorded.
        let outside = Point::new(0, 0);
        finder.next_direction(&g, mover, &mut state, outside);
        assert_eq!(finder.searches(), 2);
        assert_eq!(state.goal(), Some(outside));
        assert!(!state.is_unreachable_goal(sealed_goal));
        assert!(state.is_unreachable_goal(outside));
        assert_eq!(state.unreachable_goal_count(), 1);
        assert_eq!(state.unreachable_route_count(), 1);
    }

    #[test]
    fn teleport_resets_state() {
        let (g, start, goal) = grid(SEALED);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        finder.next_direction(&g, Mover::new(start, true), &mut state, goal);
        assert_eq!(state.phase(), Phase::Buffered);
        DirectionFinder::<TileGrid>::on_teleport(&mut finder, &mut state);
        assert_eq!(state, RouteState::new());
    }

    #[test]
    fn repeated_failing_route_halts() {
        let (g, _, goal) = grid(SEALED);
        // Nothing beside the enclosure is closer to the goal than this cell.
        let pos = Point::new(4, 1);
        let mover = Mover::new(pos, true);

        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let h = finder.next_direction(&g, mover, &mut state, goal);
        assert_eq!(h, Heading::Step(Direction::Down));
        assert_eq!(state.route().iter().copied().collect::<Vec<_>>(), vec![pos]);

        let h = finder.next_direction(&g, mover, &mut state, goal);
        assert_eq!(h, Heading::Halt(Halt::UnreachableRoute));
        assert_eq!(finder.searches(), 2);
        assert_eq!(state.phase(), Phase::Idle);

        // Asking again for the same goal halts again.
        let h = finder.next_direction(&g, mover, &mut state, goal);
        assert_eq!(h, Heading::Halt(Halt::UnreachableRoute));
    }

    #[test]
    fn failing_route_repeats_when_policy_off() {
        let (g, _, goal) = grid(SEALED);
        let mover = Mover::new(Point::new(4, 1), true);
        let mut finder = RouteFinder::new(RouteConfig::default().with_stop_on_unreachable_route(false));
        let mut state = RouteState::new();
        for _ in 0..3 {
            let h = finder.next_direction(&g, mover, &mut state, goal);
            assert_eq!(h, Heading::Step(Direction::Down));
        }
        assert_eq!(finder.searches(), 3);
    }

    #[test]
    fn walking_into_sealed_goal_eventually_halts() {
        let (g, start, goal) = grid(SEALED);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let (end, halt, _) = walk(&g, &mut finder, &mut state, start, goal, true, 50);
        assert_eq!(halt, Some(Halt::UnreachableRoute));
        assert!((g.distance(end, goal) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn unreachable_destination_halts_on_second_failure() {
        let (g, start, goal) = grid(SEALED);
        let config = RouteConfig::default()
            .with_stop_on_unreachable_destination(true)
            .with_stop_on_unreachable_route(false);
        let mut finder = RouteFinder::new(config);
        let mut state = RouteState::new();
        let mover = Mover::new(start, true);

        assert!(!finder.next_direction(&g, mover, &mut state, goal).is_halt());
        state.clear_route();
        let h = finder.next_direction(&g, mover, &mut state, goal);
        assert_eq!(h, Heading::Halt(Halt::UnreachableDestination));
        assert_eq!(h.code(), 0);
    }

    #[test]
    fn arrival_clears_failures() {
        let (mut g, start, goal) = grid(SEALED);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let mover = Mover::new(start, true);

        finder.next_direction(&g, mover, &mut state, goal);
        assert_eq!(state.unreachable_goal_count(), 1);

        // Open the enclosure and plan again.
        g.set_floor(Point::new(4, 2), true);
        state.clear_route();
        let h = finder.next_direction(&g, mover, &mut state, goal);
        assert!(!h.is_halt());
        assert_eq!(state.unreachable_goal_count(), 0);
        assert_eq!(state.unreachable_route_count(), 0);
        assert_eq!(state.route().back(), Some(&goal));
    }

    #[test]
    fn walled_in_actor_faces_goal() {
        let (g, start, goal) = grid("###.\n#@#G\n###.");
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let h = finder.next_direction(&g, Mover::new(start, true), &mut state, goal);
        assert_eq!(h, Heading::Step(Direction::Right));
    }

    #[test]
    fn cardinal_mover_never_gets_a_diagonal() {
        // Walled in, so the heading comes from the raw goal offset (2, 1).
        let g = TileGrid::from_ascii("####\n#.##\n####").unwrap();
        let start = Point::new(1, 1);
        let goal = Point::new(3, 2);
        let mut finder = RouteFinder::default();

        let mut state = RouteState::new();
        let h = finder.next_direction(&g, Mover::new(start, true), &mut state, goal);
        assert_eq!(h, Heading::Step(Direction::DownRight));

        let mut state = RouteState::new();
        let h = finder.next_direction(&g, Mover::new(start, false), &mut state, goal);
        assert_eq!(h, Heading::Step(Direction::Right));

        // Pushed off a cardinal route, the way back is cardinal too.
        let g = TileGrid::new(6, 3);
        let goal = Point::new(4, 0);
        let mut state = RouteState::new();
        finder.next_direction(&g, Mover::new(Point::new(0, 0), false), &mut state, goal);
        let h = finder.next_direction(&g, Mover::new(Point::new(1, 2), false), &mut state, goal);
        assert_eq!(state.route().front(), Some(&Point::new(1, 0)));
        assert_eq!(h, Heading::Step(Direction::Up));
    }

    #[test]
    fn limit_exceeded_is_followed_and_memoized() {
        let (g, start, goal) = grid(MAZE);
        let mut finder = RouteFinder::new(RouteConfig::default().with_max_expansions(3));
        let mut state = RouteState::new();
        let mover = Mover::new(start, true);

        let h = finder.next_direction(&g, mover, &mut state, goal);
        let dir = h.direction().unwrap();
        assert!(g.can_step(start, dir));
        assert_eq!(state.phase(), Phase::Buffered);
        assert_ne!(state.route().back(), Some(&goal));
        assert_eq!(state.unreachable_goal_count(), 1);
        assert_eq!(state.unreachable_route_count(), 1);

        // The same truncated search comes back with the same route.
        state.clear_route();
        let h = finder.next_direction(&g, mover, &mut state, goal);
        assert_eq!(h, Heading::Halt(Halt::UnreachableRoute));
        assert_eq!(finder.searches(), 2);

        // Unbounded, the goal is reached.
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        finder.next_direction(&g, mover, &mut state, goal);
        assert_eq!(state.route().back(), Some(&goal));
        assert_eq!(state.unreachable_goal_count(), 0);
    }

    #[test]
    fn goal_aliasing_actor_on_loop_has_no_route() {
        let g = TileGrid::new(4, 1).with_wrap(true, false);
        let mut finder = RouteFinder::default();
        let mut state = RouteState::new();
        let h = finder.next_direction(&g, Mover::new(Point::new(0, 0), false), &mut state, Point::new(4, 0));
        assert_eq!(h, Heading::Halt(Halt::NoRoute));
    }

    #[test]
    fn usable_as_trait_object() {
        let (g, start, goal) = grid(MAZE);
        let mut finder: Box<dyn DirectionFinder<TileGrid>> = Box::new(RouteFinder::default());
        let mut state = RouteState::new();
        let h = finder.next_direction(&g, Mover::new(start, false), &mut state, goal);
        assert_eq!(h.direction().map(|d| d.is_diagonal()), Some(false));
        finder.on_teleport(&mut state);
        assert_eq!(state.phase(), Phase::Idle);
    }
}
