//! Helpers for consuming hull output as a polygon.

use std::cmp::Ordering;

use crate::point::{cross_product, dist2, Point};

/// Order convex-position points counter-clockwise around their centroid.
///
/// Intended for QuickHull's unordered vertex set. Starts from the smallest polar angle
/// in `(-π, π]`.
pub fn sort_ccw<I>(points: I) -> Vec<Point>
where
    I: IntoIterator<Item = Point>,
{
    let mut out: Vec<Point> = points.into_iter().collect();
    if out.len() < 3 {
        return out;
    }
    let n = out.len() as f64;
    let center = Point::new(
        out.iter().map(|p| p.x).sum::<f64>() / n,
        out.iter().map(|p| p.y).sum::<f64>() / n,
    );
    let angle = |p: &Point| (p.y - center.y).atan2(p.x - center.x);
    out.sort_by(|a, b| {
        angle(a)
            .partial_cmp(&angle(b))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                dist2(center, *a)
                    .partial_cmp(&dist2(center, *b))
                    .unwrap_or(Ordering::Equal)
            })
    });
    out
}

/// Twice the signed area; positive for counter-clockwise vertex order.
pub fn signed_area2(polygon: &[Point]) -> f64 {
    let k = polygon.len();
    (0..k)
        .map(|i| {
            let (p, q) = (polygon[i], polygon[(i + 1) % k]);
            p.x * q.y - q.x * p.y
        })
        .sum()
}

/// True if `p` is on or inside the convex polygon (either winding).
///
/// One- and two-vertex polygons are treated as a point and a segment.
pub fn encloses(polygon: &[Point], p: Point) -> bool {
    match polygon.len() {
        0 => false,
        1 => polygon[0] == p,
        2 => {
            let (a, b) = (polygon[0], polygon[1]);
            cross_product(a, b, p) == 0.0
                && p.x >= a.x.min(b.x)
                && p.x <= a.x.max(b.x)
                && p.y >= a.y.min(b.y)
                && p.y <= a.y.max(b.y)
        }
        k => {
            let sign = if signed_area2(polygon) >= 0.0 { 1.0 } else { -1.0 };
            (0..k).all(|i| sign * cross_product(polygon[i], polygon[(i + 1) % k], p) >= 0.0)
        }
    }
}
