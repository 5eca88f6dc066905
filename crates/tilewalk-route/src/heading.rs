use std::fmt;

use tilewalk_core::Direction;

/// Why a [`DirectionFinder`](crate::DirectionFinder) gave no direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Halt {
    /// The actor already stands on the goal.
    AtGoal,
    /// No direction could be derived from the route or the raw goal.
    NoRoute,
    /// The goal coordinate failed before and is treated as unreachable.
    UnreachableDestination,
    /// The same failing route came up again.
    UnreachableRoute,
}

impl Halt {
    /// Whether the caller should cancel automatic movement, as opposed to
    /// simply not moving this tick.
    pub fn is_stuck(self) -> bool {
        matches!(self, Self::UnreachableDestination | Self::UnreachableRoute)
    }
}

impl fmt::Display for Halt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::AtGoal => "at goal",
            Self::NoRoute => "no route",
            Self::UnreachableDestination => "unreachable destination",
            Self::UnreachableRoute => "unreachable route",
        };
        f.write_str(s)
    }
}

/// Answer to a direction request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    Step(Direction),
    Halt(Halt),
}

impl Heading {
    /// Keypad code of the step, or 0 for a halt.
    pub fn code(self) -> u8 {
        match self {
            Self::Step(d) => d.code(),
            Self::Halt(_) => 0,
        }
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Step(d) => Some(d),
            Self::Halt(_) => None,
        }
    }

    pub fn is_halt(self) -> bool {
        matches!(self, Self::Halt(_))
    }
}
