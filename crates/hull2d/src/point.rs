//! Point type and the orientation primitive shared by both engines.
//!
//! - `Point`: immutable `(x, y)`, exact equality, hashable by value.
//! - `cross_product`: signed doubled area of `(a, b, c)`; `> 0` means `c` is left of `a→b`.
//! - `leftmost`/`rightmost`: extreme selection with a fixed tie-break.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// A point in the plane. Equality is exact coordinate equality.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn to_vec2(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

// NaN coordinates break reflexivity; callers feeding NaN get degenerate results.
impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // +0.0 == -0.0, so both must hash alike.
        fn bits(v: f64) -> u64 {
            if v == 0.0 {
                0.0f64.to_bits()
            } else {
                v.to_bits()
            }
        }
        bits(self.x).hash(state);
        bits(self.y).hash(state);
    }
}

impl From<Vector2<f64>> for Point {
    #[inline]
    fn from(v: Vector2<f64>) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vector2<f64> {
    #[inline]
    fn from(p: Point) -> Self {
        p.to_vec2()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Signed area of the parallelogram spanned by `b - a` and `c - a`.
///
/// Positive: `c` lies left of the directed line `a→b` (counter-clockwise turn).
/// Negative: right. Zero: collinear.
#[inline]
pub fn cross_product(a: Point, b: Point, c: Point) -> f64 {
    let ab = b.to_vec2() - a.to_vec2();
    let ac = c.to_vec2() - a.to_vec2();
    ab.x * ac.y - ab.y * ac.x
}

/// Side of `c` relative to the directed line `a→b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Right,
    Collinear,
}

#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> Orientation {
    let d = cross_product(a, b, c);
    if d > 0.0 {
        Orientation::Left
    } else if d < 0.0 {
        Orientation::Right
    } else {
        Orientation::Collinear
    }
}

/// Squared Euclidean distance.
#[inline]
pub fn dist2(a: Point, b: Point) -> f64 {
    (b.to_vec2() - a.to_vec2()).norm_squared()
}

#[inline]
fn lexicographic_cmp(a: &Point, b: &Point) -> Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(Ordering::Equal)
        .then(a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal))
}

/// Index of the minimum point under `(x, y)` lexicographic order.
///
/// Among exact duplicates the first in input order wins. A lexicographic extreme is
/// always a hull vertex, never the interior of a vertical hull edge.
pub fn leftmost(points: &[Point]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        match best {
            Some(b) if lexicographic_cmp(p, &points[b]) != Ordering::Less => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Index of the maximum point under `(x, y)` lexicographic order (first on exact ties).
pub fn rightmost(points: &[Point]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in points.iter().enumerate() {
        match best {
            Some(b) if lexicographic_cmp(p, &points[b]) != Ordering::Greater => {}
            _ => best = Some(i),
        }
    }
    best
}
