//! A boolean tile map with optional looping axes.
//!
//! [`TileGrid`] is the reference [`TileMap`]: each cell is either floor or
//! wall, steps wrap on looping axes, and a diagonal step is allowed when at
//! least one of the two L-shaped detours around the corner is open.

use std::fmt;

use crate::dir::Direction;
use crate::geom::Point;
use crate::map::TileMap;

/// Character parsed as a wall by [`TileGrid::from_ascii`].
pub const WALL: char = '#';
/// Character parsed as plain floor by [`TileGrid::from_ascii`].
pub const FLOOR: char = '.';

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RawTileGrid")
)]
pub struct TileGrid {
    width: i32,
    height: i32,
    /// `true` for floor, row-major.
    floor: Vec<bool>,
    wrap_x: bool,
    wrap_y: bool,
    marks: Vec<(char, Point)>,
}

impl TileGrid {
    /// Create an all-floor grid with bounded axes.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            floor: vec![true; width as usize * height as usize],
            wrap_x: false,
            wrap_y: false,
            marks: Vec::new(),
        }
    }

    /// Parse an ASCII map.
    ///
    /// `#` is a wall, every other character is floor. Characters other than
    /// `#` and `.` are additionally recorded as marks (see
    /// [`mark`](Self::mark)). Blank lines at either end are ignored; all
    /// remaining lines must have the same width.
    pub fn from_ascii(s: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = s
            .trim_matches(|c| c == '\n' || c == '\r')
            .lines()
            .collect();
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.chars().count(),
            _ => return Err(GridError::Empty),
        };

        let mut grid = Self::new(width as i32, rows.len() as i32);
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::Ragged {
                    line: y + 1,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let p = Point::new(x as i32, y as i32);
                match ch {
                    WALL => grid.set_floor(p, false),
                    FLOOR => {}
                    other => grid.marks.push((other, p)),
                }
            }
        }
        Ok(grid)
    }

    /// Enable or disable wrapping on each axis.
    pub fn with_wrap(mut self, wrap_x: bool, wrap_y: bool) -> Self {
        self.wrap_x = wrap_x;
        self.wrap_y = wrap_y;
        self
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn wraps_x(&self) -> bool {
        self.wrap_x
    }

    pub fn wraps_y(&self) -> bool {
        self.wrap_y
    }

    /// Whether `p` lies on the map.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height
    }

    /// Whether `p` is on the map and is floor.
    pub fn is_floor(&self, p: Point) -> bool {
        self.contains(p) && self.floor[self.idx(p)]
    }

    /// Turn a cell into floor or wall. Positions off the map are ignored.
    pub fn set_floor(&mut self, p: Point, floor: bool) {
        if self.contains(p) {
            let i = self.idx(p);
            self.floor[i] = floor;
        }
    }

    /// First position carrying the mark `ch`, if any.
    pub fn mark(&self, ch: char) -> Option<Point> {
        self.marks.iter().find(|(c, _)| *c == ch).map(|&(_, p)| p)
    }

    /// Like [`mark`](Self::mark), but a missing mark is an error.
    pub fn require_mark(&self, ch: char) -> Result<Point, GridError> {
        self.mark(ch).ok_or(GridError::MissingMark(ch))
    }

    /// All marks in reading order.
    pub fn marks(&self) -> &[(char, Point)] {
        &self.marks
    }

    /// Render the map back to ASCII. `overlay` may replace the character
    /// drawn at any position.
    pub fn to_ascii(&self, overlay: impl Fn(Point) -> Option<char>) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let p = Point::new(x, y);
                let ch = overlay(p).unwrap_or(if self.is_floor(p) { FLOOR } else { WALL });
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        p.y as usize * self.width as usize + p.x as usize
    }

    fn wrap(v: i32, len: i32, looping: bool) -> i32 {
        if looping && len > 0 {
            v.rem_euclid(len)
        } else {
            v
        }
    }

    fn short_way(delta: i32, len: i32, looping: bool) -> i32 {
        if looping && delta.abs() > len / 2 {
            if delta < 0 { delta + len } else { delta - len }
        } else {
            delta
        }
    }
}

/// Number of cells in a `width` x `height` grid, or `None` for negative
/// or overflowing sizes.
#[cfg(any(test, feature = "serde"))]
fn cell_count(width: i32, height: i32) -> Option<usize> {
    let w = usize::try_from(width).ok()?;
    let h = usize::try_from(height).ok()?;
    w.checked_mul(h)
}

/// Serialized form of [`TileGrid`], checked before it becomes one.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTileGrid {
    width: i32,
    height: i32,
    floor: Vec<bool>,
    wrap_x: bool,
    wrap_y: bool,
    marks: Vec<(char, Point)>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTileGrid> for TileGrid {
    type Error = GridError;

    fn try_from(raw: RawTileGrid) -> Result<Self, GridError> {
        if cell_count(raw.width, raw.height) != Some(raw.floor.len()) {
            return Err(GridError::BadSize {
                width: raw.width,
                height: raw.height,
                cells: raw.floor.len(),
            });
        }
        Ok(Self {
            width: raw.width,
            height: raw.height,
            floor: raw.floor,
            wrap_x: raw.wrap_x,
            wrap_y: raw.wrap_y,
            marks: raw.marks,
        })
    }
}

impl TileMap for TileGrid {
    fn step(&self, p: Point, dir: Direction) -> Point {
        let q = p + dir.offset();
        Point::new(
            Self::wrap(q.x, self.width, self.wrap_x),
            Self::wrap(q.y, self.height, self.wrap_y),
        )
    }

    fn can_pass(&self, p: Point, dir: Direction) -> bool {
        self.is_floor(self.step(p, dir))
    }

    fn can_pass_diagonally(&self, p: Point, horz: Direction, vert: Direction) -> bool {
        let beside = self.step(p, horz);
        let below = self.step(p, vert);
        (self.can_pass(p, vert) && self.can_pass(below, horz))
            || (self.can_pass(p, horz) && self.can_pass(beside, vert))
    }

    fn delta_x(&self, a: i32, b: i32) -> i32 {
        Self::short_way(a - b, self.width, self.wrap_x)
    }

    fn delta_y(&self, a: i32, b: i32) -> i32 {
        Self::short_way(a - b, self.height, self.wrap_y)
    }
}

/// Errors that can occur when parsing an ASCII map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The input has no rows, or its first row is empty.
    Empty,
    /// A row's width differs from the first row's.
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A required mark character does not appear in the map.
    MissingMark(char),
    /// Stored dimensions that do not match the number of cells.
    BadSize {
        width: i32,
        height: i32,
        cells: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tile grid: empty map"),
            Self::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "tile grid: line {line} has width {found}, expected {expected}"
            ),
            Self::MissingMark(ch) => write!(f, "tile grid: no \u{201c}{ch}\u{201d} mark in map"),
            Self::BadSize {
                width,
                height,
                cells,
            } => write!(f, "tile grid: {width}x{height} map with {cells} cells"),
        }
    }
}

impl std::error::Error for GridError {}
