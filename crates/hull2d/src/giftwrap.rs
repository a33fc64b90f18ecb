//! Gift wrapping (Jarvis march) with a parallel best-next scan.
//!
//! Model
//! - Start at the lexicographic leftmost point; from `current`, choose `next` such that no
//!   point lies strictly right of `current → next`; append and advance until the wrap
//!   returns to the start. `O(n·h)`.
//! - The scan over all candidates is a map/reduce over `(index, point)` with an explicit
//!   combiner (`wrap_pick`), so the chosen point does not depend on how rayon splits the work.
//!
//! Output
//! - Hull vertices in path order: counter-clockwise, starting at the leftmost point.
//! - Collinear candidates resolve to the farther one, so boundary points between two
//!   vertices are skipped and the vertex set matches `quickhull`.

use rayon::prelude::*;

use crate::cfg::HullCfg;
use crate::point::{cross_product, dist2, leftmost, Point};
use crate::trace::Trace;

/// Convex hull of `points` in path order plus the construction trace.
///
/// Uses `HullCfg::default()`. Fewer than 3 points yield an empty path and trace.
pub fn gift_wrap(points: &[Point]) -> (Vec<Point>, Trace) {
    gift_wrap_with(points, HullCfg::default())
}

pub fn gift_wrap_with(points: &[Point], cfg: HullCfg) -> (Vec<Point>, Trace) {
    if points.len() < 3 {
        return (Vec::new(), Trace::new());
    }
    let Some(start) = leftmost(points).map(|i| points[i]) else {
        return (Vec::new(), Trace::new());
    };

    let mut hull = Vec::new();
    let mut trace = Trace::new();
    trace.push_point(start);

    let mut current = start;
    let mut closed = false;
    // A hull has at most `n` vertices; the bound only bites on non-finite input.
    for _ in 0..points.len() {
        hull.push(current);
        let Some(next) = best_next(current, points, cfg) else {
            // Every point coincides with `current`.
            closed = true;
            break;
        };
        if next == start {
            trace.push_edge(current, next);
            closed = true;
            break;
        }
        trace.push_point(next);
        trace.push_edge(current, next);
        current = next;
    }
    if !closed {
        tracing::warn!(
            n = points.len(),
            vertices = hull.len(),
            "gift wrap did not close; input likely has non-finite coordinates"
        );
    }
    tracing::debug!(hull = hull.len(), steps = trace.len(), "giftwrap done");
    (hull, trace)
}

/// The candidate with no other point strictly right of `current → candidate`.
/// `None` when every point equals `current`.
fn best_next(current: Point, points: &[Point], cfg: HullCfg) -> Option<Point> {
    let candidate = |(i, p): (usize, &Point)| (*p != current).then_some((i, *p));
    let pick = |best, cand| wrap_pick(current, best, cand);
    let best = if cfg.use_parallel(points.len()) {
        points
            .par_iter()
            .enumerate()
            .filter_map(candidate)
            .reduce_with(pick)
    } else {
        points.iter().enumerate().filter_map(candidate).reduce(pick)
    };
    best.map(|(_, p)| p)
}

/// Reduction combiner: the more clockwise of two candidates as seen from `current`;
/// collinear ones resolve to the farther, exact duplicates to the lower index.
///
/// Seen from a hull vertex all points lie within a half-plane, so this is a total
/// order and the reduction is associative.
#[inline]
fn wrap_pick(current: Point, best: (usize, Point), cand: (usize, Point)) -> (usize, Point) {
    let turn = cross_product(current, best.1, cand.1);
    if turn < 0.0 {
        cand
    } else if turn > 0.0 {
        best
    } else {
        let (d_best, d_cand) = (dist2(current, best.1), dist2(current, cand.1));
        if d_cand > d_best || (d_cand == d_best && cand.0 < best.0) {
            cand
        } else {
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    fn random_field(seed: u64, n: usize) -> Vec<Point> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..n)
            .map(|_| Point::new(rng.gen_range(0.0..1000.0), rng.gen_range(0.0..1000.0)))
            .collect()
    }

    #[test]
    fn square_path_is_ccw_from_leftmost() {
        let field = pts(&[(2.0, 2.0), (0.0, 4.0), (4.0, 4.0), (4.0, 0.0), (0.0, 0.0)]);
        let (hull, trace) = gift_wrap(&field);
        assert_eq!(hull, pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]));
        assert!(trace.is_replayable());
        assert_eq!(trace.points().collect::<Vec<_>>(), hull);
        let edges: Vec<_> = trace.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[3], (Point::new(0.0, 4.0), Point::new(0.0, 0.0)));
    }

    #[test]
    fn degenerate_inputs() {
        for n in 0..3 {
            let field: Vec<Point> = (0..n).map(|i| Point::new(0.0, i as f64)).collect();
            let (hull, trace) = gift_wrap(&field);
            assert!(hull.is_empty() && trace.is_empty());
        }
        let (hull, trace) = gift_wrap(&pts(&[(1.0, 0.0), (0.0, 0.0), (2.0, 0.0)]));
        assert_eq!(hull, pts(&[(0.0, 0.0), (2.0, 0.0)]));
        assert!(trace.is_replayable());
        let (hull, _) = gift_wrap(&pts(&[(3.0, 3.0), (3.0, 3.0), (3.0, 3.0)]));
        assert_eq!(hull, pts(&[(3.0, 3.0)]));
    }

    #[test]
    fn non_finite_field_stops_at_the_iteration_bound() {
        // The NaN point wins every scan it takes part in, so the wrap never closes.
        let field = pts(&[(f64::NAN, 2.0), (0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        let (hull, _) = gift_wrap_with(&field, HullCfg::SEQUENTIAL);
        assert_eq!(hull.len(), field.len());
        assert_eq!(hull[0], Point::new(0.0, 0.0));
        assert!(hull[1].x.is_nan());
        let (hull, _) = gift_wrap_with(&field, HullCfg { parallel_cutoff: 1 });
        assert!(hull.len() <= field.len());
    }

    #[test]
    fn skips_collinear_boundary_points_and_duplicates() {
        let field = pts(&[
            (0.0, 2.0),
            (0.0, 4.0),
            (2.0, 0.0),
            (4.0, 4.0),
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 0.0),
            (4.0, 2.0),
            (2.0, 4.0),
        ]);
        let (hull, _) = gift_wrap(&field);
        assert_eq!(hull, pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]));
    }

    #[test]
    fn every_point_is_left_of_or_on_each_edge() {
        let field = random_field(3, 3000);
        let (hull, _) = gift_wrap(&field);
        assert!(hull.len() >= 3);
        for k in 0..hull.len() {
            let (a, b) = (hull[k], hull[(k + 1) % hull.len()]);
            assert!(field.iter().all(|p| cross_product(a, b, *p) >= 0.0));
        }
    }

    #[test]
    fn parallel_scan_matches_sequential() {
        let field = random_field(11, 4000);
        let (seq, seq_trace) = gift_wrap_with(&field, HullCfg::SEQUENTIAL);
        for cutoff in [1, 100, 1024] {
            let (par, par_trace) = gift_wrap_with(&field, HullCfg { parallel_cutoff: cutoff });
            assert_eq!(par, seq);
            assert_eq!(par_trace, seq_trace);
        }
    }

    #[test]
    fn input_order_does_not_change_path() {
        let mut field = random_field(5, 500);
        let (base, _) = gift_wrap(&field);
        let mut rng = StdRng::seed_from_u64(99);
        field.shuffle(&mut rng);
        let (shuffled, _) = gift_wrap_with(&field, HullCfg { parallel_cutoff: 8 });
        assert_eq!(shuffled, base);
    }

    #[test]
    fn pick_is_order_independent_on_collinear_ties() {
        let c = Point::new(0.0, 0.0);
        let near = (0, Point::new(1.0, 0.0));
        let far = (1, Point::new(2.0, 0.0));
        let dup = (2, Point::new(2.0, 0.0));
        assert_eq!(wrap_pick(c, near, far), far);
        assert_eq!(wrap_pick(c, far, near), far);
        assert_eq!(wrap_pick(c, dup, far), far);
        assert_eq!(wrap_pick(c, far, dup), far);
        let below = (3, Point::new(1.0, -1.0));
        assert_eq!(wrap_pick(c, far, below), below);
        assert_eq!(wrap_pick(c, below, far), below);
    }
}
