use std::fmt;

use tilewalk_core::Point;

/// Canonical text of a route, `(x,y)-(x,y)-…`, used to recognise a route
/// that was already tried and failed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSignature(String);

impl RouteSignature {
    pub fn new(path: &[Point]) -> Self {
        let parts: Vec<String> = path.iter().map(|p| format!("({},{})", p.x, p.y)).collect();
        Self(parts.join("-"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
