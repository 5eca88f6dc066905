//! The eight movement directions in numeric-keypad convention.
//!
//! ```text
//! 7 8 9
//! 4 . 6
//! 1 2 3
//! ```
//!
//! Code 5 is unused and 0 is reserved by callers for "no movement".

use std::fmt;

use crate::geom::Point;

/// A compass direction identified by its keypad digit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Direction {
    DownLeft = 1,
    Down = 2,
    DownRight = 3,
    Left = 4,
    Right = 6,
    UpLeft = 7,
    Up = 8,
    UpRight = 9,
}

impl Direction {
    /// All eight directions in ascending keypad order. The search engine
    /// evaluates neighbours in exactly this order.
    pub const ALL: [Direction; 8] = [
        Direction::DownLeft,
        Direction::Down,
        Direction::DownRight,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::Up,
        Direction::UpRight,
    ];

    /// The four cardinal directions in ascending keypad order.
    pub const CARDINAL: [Direction; 4] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
    ];

    /// Keypad digit of this direction.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Parse a keypad digit. Returns `None` for 0, 5 and anything above 9.
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::DownLeft),
            2 => Some(Self::Down),
            3 => Some(Self::DownRight),
            4 => Some(Self::Left),
            6 => Some(Self::Right),
            7 => Some(Self::UpLeft),
            8 => Some(Self::Up),
            9 => Some(Self::UpRight),
            _ => None,
        }
    }

    /// Unit offset of one step in this direction (Y grows down).
    pub const fn offset(self) -> Point {
        match self {
            Self::DownLeft => Point::new(-1, 1),
            Self::Down => Point::new(0, 1),
            Self::DownRight => Point::new(1, 1),
            Self::Left => Point::new(-1, 0),
            Self::Right => Point::new(1, 0),
            Self::UpLeft => Point::new(-1, -1),
            Self::Up => Point::new(0, -1),
            Self::UpRight => Point::new(1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::DownLeft | Self::DownRight | Self::UpLeft | Self::UpRight
        )
    }

    /// Split a diagonal into its (horizontal, vertical) cardinal parts.
    /// Cardinal directions return `None`.
    pub const fn split(self) -> Option<(Direction, Direction)> {
        match self {
            Self::DownLeft => Some((Self::Left, Self::Down)),
            Self::DownRight => Some((Self::Right, Self::Down)),
            Self::UpLeft => Some((Self::Left, Self::Up)),
            Self::UpRight => Some((Self::Right, Self::Up)),
            _ => None,
        }
    }

    /// Direction whose offset has the same signs as `(dx, dy)`.
    ///
    /// Only the signs matter, so `(5, -2)` maps to [`Direction::UpRight`].
    /// Returns `None` when both components are zero.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (-1, 1) => Some(Self::DownLeft),
            (0, 1) => Some(Self::Down),
            (1, 1) => Some(Self::DownRight),
            (-1, 0) => Some(Self::Left),
            (1, 0) => Some(Self::Right),
            (-1, -1) => Some(Self::UpLeft),
            (0, -1) => Some(Self::Up),
            (1, -1) => Some(Self::UpRight),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DownLeft => "down-left",
            Self::Down => "down",
            Self::DownRight => "down-right",
            Self::Left => "left",
            Self::Right => "right",
            Self::UpLeft => "up-left",
            Self::Up => "up",
            Self::UpRight => "up-right",
        };
        f.write_str(name)
    }
}
