//! Construction trace: the ordered record of point selections and edges.
//!
//! A trace is append-only while an engine runs and is handed to the caller when the
//! run returns. Consumers replay it step by step; they need a valid order, not a
//! canonical one (QuickHull branches interleave nondeterministically).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::point::Point;

/// One committed decision of a hull engine.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// A point was selected as a hull vertex.
    Point(Point),
    /// A (conceptual) edge from `from` to `to` was committed.
    Edge { from: Point, to: Point },
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace(Vec<Step>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push_point(&mut self, p: Point) {
        self.0.push(Step::Point(p));
    }

    #[inline]
    pub fn push_edge(&mut self, from: Point, to: Point) {
        self.0.push(Step::Edge { from, to });
    }

    pub fn steps(&self) -> &[Step] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Points of all `Step::Point` entries, in trace order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.0.iter().filter_map(|s| match *s {
            Step::Point(p) => Some(p),
            Step::Edge { .. } => None,
        })
    }

    /// Endpoints of all `Step::Edge` entries, in trace order.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.0.iter().filter_map(|s| match *s {
            Step::Edge { from, to } => Some((from, to)),
            Step::Point(_) => None,
        })
    }

    /// True if every edge endpoint was the subject of a `Point` step earlier in the trace.
    pub fn is_replayable(&self) -> bool {
        let mut seen: HashSet<Point> = HashSet::new();
        for step in &self.0 {
            match *step {
                Step::Point(p) => {
                    seen.insert(p);
                }
                Step::Edge { from, to } => {
                    if !seen.contains(&from) || !seen.contains(&to) {
                        return false;
                    }
                }
            }
        }
        true
    }

    pub fn into_steps(self) -> Vec<Step> {
        self.0
    }
}

impl From<Vec<Step>> for Trace {
    fn from(steps: Vec<Step>) -> Self {
        Self(steps)
    }
}

impl IntoIterator for Trace {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replayable_requires_points_before_edges() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(1.0, 0.0);
        let mut t = Trace::new();
        t.push_point(a);
        t.push_point(b);
        t.push_edge(a, b);
        assert!(t.is_replayable());
        assert_eq!(t.points().count(), 2);
        assert_eq!(t.edges().collect::<Vec<_>>(), vec![(a, b)]);

        let bad = Trace::from(vec![Step::Point(a), Step::Edge { from: a, to: b }, Step::Point(b)]);
        assert!(!bad.is_replayable());
    }

    #[test]
    fn serializes_with_kind_tags() {
        let mut t = Trace::new();
        t.push_point(Point::new(1.0, 2.0));
        t.push_edge(Point::new(1.0, 2.0), Point::new(3.0, 4.0));
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json[0]["kind"], "point");
        assert_eq!(json[0]["x"], 1.0);
        assert_eq!(json[1]["kind"], "edge");
        assert_eq!(json[1]["to"]["y"], 4.0);
        let back: Trace = serde_json::from_value(json).unwrap();
        assert_eq!(back, t);
    }
}
