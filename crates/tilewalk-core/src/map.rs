use crate::dir::Direction;
use crate::geom::Point;

/// Geometry and movement legality of a tile map, as seen by one actor.
///
/// The search engine never looks at tiles directly; everything it knows
/// about the world comes through this trait. Implementations decide how
/// coordinates wrap and what blocks movement.
pub trait TileMap {
    /// Cell reached by one step from `p` towards `dir`, wrapping around
    /// looping axes. The result may lie off the map on bounded axes.
    fn step(&self, p: Point, dir: Direction) -> Point;

    /// Whether a cardinal step from `p` towards `dir` is legal.
    fn can_pass(&self, p: Point, dir: Direction) -> bool;

    /// Whether a diagonal step from `p` combining `horz` and `vert` is legal.
    fn can_pass_diagonally(&self, p: Point, horz: Direction, vert: Direction) -> bool;

    /// Signed horizontal offset `a - b`, taking the short way round when
    /// the X axis loops.
    fn delta_x(&self, a: i32, b: i32) -> i32;

    /// Signed vertical offset `a - b`, taking the short way round when
    /// the Y axis loops.
    fn delta_y(&self, a: i32, b: i32) -> i32;

    /// Euclidean distance between two cells measured with the wrap-aware
    /// deltas.
    fn distance(&self, a: Point, b: Point) -> f64 {
        let dx = f64::from(self.delta_x(a.x, b.x));
        let dy = f64::from(self.delta_y(a.y, b.y));
        dx.hypot(dy)
    }

    /// Whether moving one step from `p` towards `dir` is legal, dispatching
    /// to the cardinal or diagonal query.
    fn can_step(&self, p: Point, dir: Direction) -> bool {
        match dir.split() {
            Some((horz, vert)) => self.can_pass_diagonally(p, horz, vert),
            None => self.can_pass(p, dir),
        }
    }
}
