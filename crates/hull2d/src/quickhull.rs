//! QuickHull: parallel divide-and-conquer convex hull.
//!
//! Model
//! - Split the field by the line through the lexicographic extremes `lo → hi`.
//! - For each side, pick the point furthest from the bounding edge, then recurse on the
//!   points strictly outside the two new edges. The two recursive branches run as a
//!   fork-join pair (`rayon::join`) on disjoint subsets.
//! - Branches share one `HullSink`: insert-if-absent into the vertex set and the matching
//!   `Point` step happen in one critical section.
//!
//! Output
//! - An UNORDERED vertex set (use `polygon::sort_ccw` to get a polygon) and a trace whose
//!   cross-branch interleaving may differ between runs. The vertex set does not.
//! - Points exactly on a partition line are dropped, so collinear boundary points and the
//!   interior of all-collinear inputs are not reported (only the two extremes are).

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rayon::prelude::*;

use crate::cfg::HullCfg;
use crate::point::{cross_product, leftmost, rightmost, Point};
use crate::trace::Trace;

/// Hull vertices and trace under construction, shared by all branches of one run.
struct HullSink {
    inner: Mutex<SinkState>,
}

#[derive(Default)]
struct SinkState {
    hull: HashSet<Point>,
    trace: Trace,
}

impl HullSink {
    fn new() -> Self {
        Self {
            inner: Mutex::new(SinkState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        // A panicking branch propagates through `rayon::join`; the state itself stays valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert `p` and record its `Point` step, unless it is already a hull vertex.
    fn insert_point(&self, p: Point) -> bool {
        let mut state = self.lock();
        if state.hull.insert(p) {
            state.trace.push_point(p);
            true
        } else {
            false
        }
    }

    fn push_edge(&self, from: Point, to: Point) {
        self.lock().trace.push_edge(from, to);
    }

    fn into_parts(self) -> (HashSet<Point>, Trace) {
        let state = self.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        (state.hull, state.trace)
    }
}

/// Convex hull vertices of `points` (unordered) plus the construction trace.
///
/// Uses `HullCfg::default()`. Fewer than 3 points yield an empty set and trace.
pub fn quick_hull(points: &[Point]) -> (HashSet<Point>, Trace) {
    quick_hull_with(points, HullCfg::default())
}

pub fn quick_hull_with(points: &[Point], cfg: HullCfg) -> (HashSet<Point>, Trace) {
    if points.len() < 3 {
        return (HashSet::new(), Trace::new());
    }
    let (lo, hi) = match (leftmost(points), rightmost(points)) {
        (Some(lo), Some(hi)) => (points[lo], points[hi]),
        _ => return (HashSet::new(), Trace::new()),
    };

    let sink = HullSink::new();
    sink.insert_point(lo);
    sink.insert_point(hi);

    let above = points_left_of(lo, hi, points, cfg);
    let below = points_left_of(hi, lo, points, cfg);
    tracing::debug!(
        n = points.len(),
        above = above.len(),
        below = below.len(),
        "quickhull partition"
    );
    rayon::join(
        || expand(lo, hi, above, &sink, cfg),
        || expand(hi, lo, below, &sink, cfg),
    );

    let (hull, trace) = sink.into_parts();
    tracing::debug!(hull = hull.len(), steps = trace.len(), "quickhull done");
    (hull, trace)
}

/// Process the points strictly left of `a → b`.
fn expand(a: Point, b: Point, subset: Vec<Point>, sink: &HullSink, cfg: HullCfg) {
    let Some(c) = furthest_from_line(a, b, &subset, cfg) else {
        return;
    };
    sink.insert_point(c);

    let outside_ac = points_left_of(a, c, &subset, cfg);
    let outside_cb = points_left_of(c, b, &subset, cfg);
    drop(subset);

    rayon::join(
        || {
            sink.push_edge(a, c);
            expand(a, c, outside_ac, sink, cfg)
        },
        || {
            sink.push_edge(c, b);
            expand(c, b, outside_cb, sink, cfg)
        },
    );
}

/// Points with `cross_product(a, b, p) > 0`, in input order.
fn points_left_of(a: Point, b: Point, points: &[Point], cfg: HullCfg) -> Vec<Point> {
    let left = |p: &Point| cross_product(a, b, *p) > 0.0;
    if cfg.use_parallel(points.len()) {
        points.par_iter().copied().filter(left).collect()
    } else {
        points.iter().copied().filter(left).collect()
    }
}

/// Point maximizing `|cross_product(a, b, ·)|`.
///
/// Ties go to the smallest projection onto `a → b`, then the earliest position. Among
/// equidistant points that rule always lands on a hull vertex rather than the middle of
/// an edge parallel to `a–b`.
fn furthest_from_line(a: Point, b: Point, points: &[Point], cfg: HullCfg) -> Option<Point> {
    let dir = b.to_vec2() - a.to_vec2();
    let key = |(i, p): (usize, &Point)| FurthestKey {
        dist: cross_product(a, b, *p).abs(),
        proj: dir.dot(&(p.to_vec2() - a.to_vec2())),
        index: i,
    };
    let best = if cfg.use_parallel(points.len()) {
        points.par_iter().enumerate().map(key).reduce_with(FurthestKey::better)
    } else {
        points.iter().enumerate().map(key).reduce(FurthestKey::better)
    };
    best.map(|k| points[k.index])
}

#[derive(Clone, Copy, Debug)]
struct FurthestKey {
    dist: f64,
    proj: f64,
    index: usize,
}

impl FurthestKey {
    /// Reduction combiner; a strict total order on finite keys.
    #[inline]
    fn better(x: Self, y: Self) -> Self {
        let y_wins = y.dist > x.dist
            || (y.dist == x.dist && (y.proj < x.proj || (y.proj == x.proj && y.index < x.index)));
        if y_wins {
            y
        } else {
            x
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    fn set(raw: &[(f64, f64)]) -> HashSet<Point> {
        pts(raw).into_iter().collect()
    }

    #[test]
    fn square_drops_interior_point() {
        let field = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (2.0, 2.0)]);
        let (hull, trace) = quick_hull(&field);
        assert_eq!(hull, set(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]));
        assert!(trace.is_replayable());
        // Extremes are committed first.
        let first: Vec<Point> = trace.points().take(2).collect();
        assert_eq!(first, pts(&[(0.0, 0.0), (4.0, 4.0)]));
    }

    #[test]
    fn degenerate_inputs() {
        for n in 0..3 {
            let field: Vec<Point> = (0..n).map(|i| Point::new(i as f64, 1.0)).collect();
            let (hull, trace) = quick_hull(&field);
            assert!(hull.is_empty());
            assert!(trace.is_empty());
        }
        let (hull, _) = quick_hull(&pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        assert_eq!(hull, set(&[(0.0, 0.0), (2.0, 0.0)]));
        let (hull, trace) = quick_hull(&pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]));
        assert_eq!(hull, set(&[(1.0, 1.0)]));
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn duplicates_and_collinear_edges() {
        let field = pts(&[
            (0.0, 0.0),
            (2.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (4.0, 4.0),
            (0.0, 2.0),
            (0.0, 4.0),
            (0.0, 0.0),
            (1.0, 3.0),
        ]);
        let (hull, trace) = quick_hull(&field);
        assert_eq!(hull, set(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]));
        // Every vertex appears exactly once as a point step.
        assert_eq!(trace.points().count(), hull.len());
        assert!(trace.points().all(|p| hull.contains(&p)));
    }

    #[test]
    fn every_edge_is_preceded_by_its_endpoints() {
        let mut rng = StdRng::seed_from_u64(7);
        let field: Vec<Point> = (0..2000)
            .map(|_| Point::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)))
            .collect();
        let (hull, trace) = quick_hull_with(&field, HullCfg { parallel_cutoff: 16 });
        assert!(trace.is_replayable());
        for (a, b) in trace.edges() {
            assert!(hull.contains(&a) && hull.contains(&b));
        }
    }

    #[test]
    fn result_independent_of_scheduling() {
        let mut rng = StdRng::seed_from_u64(42);
        let field: Vec<Point> = (0..5000)
            .map(|_| Point::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
            .collect();
        let (seq, seq_trace) = quick_hull_with(&field, HullCfg::SEQUENTIAL);
        for cutoff in [1, 64, 4096] {
            for _ in 0..3 {
                let (par, par_trace) = quick_hull_with(&field, HullCfg { parallel_cutoff: cutoff });
                assert_eq!(par, seq);
                assert_eq!(par_trace.len(), seq_trace.len());
            }
        }
    }

    #[test]
    fn furthest_point_ties_prefer_smallest_projection() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        let forward = pts(&[(1.0, 2.0), (3.0, 2.0), (2.0, 1.0)]);
        let backward = pts(&[(3.0, 2.0), (2.0, 1.0), (1.0, 2.0)]);
        for cfg in [HullCfg::SEQUENTIAL, HullCfg { parallel_cutoff: 1 }] {
            assert_eq!(furthest_from_line(a, b, &forward, cfg), Some(Point::new(1.0, 2.0)));
            assert_eq!(furthest_from_line(a, b, &backward, cfg), Some(Point::new(1.0, 2.0)));
        }
        assert_eq!(furthest_from_line(a, b, &[], HullCfg::default()), None);
    }

    #[test]
    fn edge_parallel_to_split_line_keeps_only_corners() {
        // Top edge is parallel to lo–hi; its midpoint comes first in input order.
        let field = pts(&[(2.0, 3.0), (3.0, 3.0), (0.0, 0.0), (1.0, 3.0), (5.0, 0.0), (2.0, -1.0)]);
        let (hull, _) = quick_hull(&field);
        assert_eq!(
            hull,
            set(&[(0.0, 0.0), (5.0, 0.0), (1.0, 3.0), (3.0, 3.0), (2.0, -1.0)])
        );
    }
}
