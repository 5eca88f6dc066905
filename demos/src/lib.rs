//! Shared walking simulation used by the `walk` demo.
//!
//! A [`Scenario`] is an ASCII map with an `@` start and a `G` goal. [`walk`]
//! asks a [`RouteFinder`] for a heading every tick and moves the actor when
//! the step is legal, the way a game's movement controller would.

use std::fmt;
use std::io;
use std::path::Path;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tilewalk_core::{GridError, Point, TileGrid, TileMap};
use tilewalk_route::{DirectionFinder, Halt, Heading, Mover, RouteConfig, RouteFinder, RouteState};

/// Map used when no map file is given.
pub const COURTYARD: &str = include_str!("../maps/courtyard.txt");
/// A goal walled in on every side.
pub const SEALED: &str = include_str!("../maps/sealed.txt");

pub const START_MARK: char = '@';
pub const GOAL_MARK: char = 'G';
const TRAIL_MARK: char = '*';

#[derive(Debug, Clone)]
pub struct Scenario {
    pub map: TileGrid,
    pub start: Point,
    pub goal: Point,
}

impl Scenario {
    pub fn parse(s: &str) -> Result<Self, DemoError> {
        let map = TileGrid::from_ascii(s)?;
        let start = map.require_mark(START_MARK)?;
        let goal = map.require_mark(GOAL_MARK)?;
        Ok(Self { map, start, goal })
    }

    pub fn load(path: &Path) -> Result<Self, DemoError> {
        Self::parse(&std::fs::read_to_string(path)?)
    }

    /// Turn floor cells into walls at random with probability `density`.
    /// The start and goal cells are left alone.
    pub fn scatter(&mut self, seed: u64, density: f64) {
        let mut rng = StdRng::seed_from_u64(seed);
        for y in 0..self.map.height() {
            for x in 0..self.map.width() {
                let p = Point::new(x, y);
                if p == self.start || p == self.goal || !self.map.is_floor(p) {
                    continue;
                }
                if rng.random_bool(density) {
                    self.map.set_floor(p, false);
                }
            }
        }
    }
}

/// Result of a simulated walk.
#[derive(Debug, Clone, PartialEq)]
pub struct Walk {
    /// Every position occupied, starting with the start cell.
    pub trail: Vec<Point>,
    /// Halt that ended the walk, or `None` if the tick budget ran out.
    pub halt: Option<Halt>,
    /// Ticks on which the actor tried to step but was blocked.
    pub blocked: usize,
    pub searches: usize,
}

impl Walk {
    pub fn end(&self) -> Point {
        self.trail.last().copied().unwrap_or_default()
    }

    pub fn arrived(&self) -> bool {
        self.halt == Some(Halt::AtGoal)
    }

    /// Whether the finder gave up on the goal.
    pub fn stuck(&self) -> bool {
        self.halt.is_some_and(Halt::is_stuck)
    }
}

/// Walk the scenario's actor towards its goal for at most `max_ticks`.
pub fn walk(scenario: &Scenario, config: RouteConfig, diagonal: bool, max_ticks: usize) -> Walk {
    let map = &scenario.map;
    let mut finder = RouteFinder::new(config);
    let mut state = RouteState::new();
    let mut pos = scenario.start;
    let mut trail = vec![pos];
    let mut blocked = 0;
    let mut halt = None;

    for _ in 0..max_ticks {
        match finder.next_direction(map, Mover::new(pos, diagonal), &mut state, scenario.goal) {
            Heading::Step(dir) => {
                if map.can_step(pos, dir) {
                    pos = map.step(pos, dir);
                    trail.push(pos);
                } else {
                    blocked += 1;
                }
            }
            Heading::Halt(h) => {
                halt = Some(h);
                break;
            }
        }
    }
    if halt.is_none() {
        log::warn!("walk gave up after {max_ticks} ticks at {pos}");
    }

    Walk {
        trail,
        halt,
        blocked,
        searches: finder.searches(),
    }
}

/// Draw the map with the trail, start, goal and final position.
pub fn render(scenario: &Scenario, walk: &Walk) -> String {
    let end = walk.end();
    scenario.map.to_ascii(|p| {
        if p == end {
            Some(START_MARK)
        } else if p == scenario.goal {
            Some(GOAL_MARK)
        } else if walk.trail.contains(&p) {
            Some(TRAIL_MARK)
        } else {
            None
        }
    })
}

/// Parse a JSON [`RouteConfig`]; missing fields take their defaults.
pub fn parse_config(s: &str) -> Result<RouteConfig, DemoError> {
    Ok(serde_json::from_str(s)?)
}

pub fn load_config(path: &Path) -> Result<RouteConfig, DemoError> {
    parse_config(&std::fs::read_to_string(path)?)
}

/// Errors raised while setting up a demo run.
#[derive(Debug)]
pub enum DemoError {
    Io(io::Error),
    Config(serde_json::Error),
    Grid(GridError),
    Usage(String),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::Config(e) => write!(f, "bad config: {e}"),
            Self::Grid(e) => write!(f, "bad map: {e}"),
            Self::Usage(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Grid(e) => Some(e),
            Self::Usage(_) => None,
        }
    }
}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for DemoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e)
    }
}

impl From<GridError> for DemoError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
