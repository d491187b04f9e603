//! Bounds parsing and tap-point resolution.
//!
//! uiautomator reports each node's screen rectangle as a `bounds` attribute
//! with the literal grammar `[x1,y1][x2,y2]`. Anything that deviates from
//! that grammar means the node has no usable geometry, so [`parse_bounds`]
//! answers with `None` rather than an error and callers skip the node.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A screen rectangle in absolute pixel coordinates.
///
/// Invariant: `x1 <= x2` and `y1 <= y2`. [`parse_bounds`] rejects input
/// that would violate this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Rect {
    /// Center of the rectangle using floor integer division.
    ///
    /// Floor division is a contract, not an implementation detail: tap
    /// coordinates derived from a rectangle must not drift by a pixel
    /// between releases.
    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: ((self.x1 as u64 + self.x2 as u64) / 2) as u32,
            y: ((self.y1 as u64 + self.y2 as u64) / 2) as u32,
        }
    }
}

/// A tap target on the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

fn bounds_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\[(\d+),(\d+)\]\[(\d+),(\d+)\]$").expect("bounds pattern is valid")
    })
}

/// Parse a `[x1,y1][x2,y2]` bounds descriptor.
///
/// Returns `None` for any other shape (missing bracket, non-numeric,
/// negative, trailing garbage, reversed corners, overflowing numbers).
/// Never panics and never returns an error: a node without parsable
/// bounds is simply not a tap target.
#[must_use]
pub fn parse_bounds(s: &str) -> Option<Rect> {
    let caps = bounds_pattern().captures(s)?;
    let x1: u32 = caps[1].parse().ok()?;
    let y1: u32 = caps[2].parse().ok()?;
    let x2: u32 = caps[3].parse().ok()?;
    let y2: u32 = caps[4].parse().ok()?;

    if x1 > x2 || y1 > y2 {
        return None;
    }

    Some(Rect { x1, y1, x2, y2 })
}
