//! Validity oracle: pure predicates over a problem and a (partial) placement.
//!
//! Every search strategy consults these to prune branches, and callers use
//! `validate` for one-shot checks of externally supplied solutions. Nothing
//! here keeps state, so any branch may call in at any time.

use crate::geom::{dist2, Point, Polygon, Segment};
use crate::problem::Problem;

/// Scale applied to the relative squared-length deviation.
pub const STRETCH_SCALE: f64 = 1_000_000.0;

/// `|cand² / orig² − 1| × 10⁶`.
///
/// A zero-length original edge yields `+inf`: such an edge is always bad.
pub fn stretch_factor(original: &Segment, candidate: &Segment) -> f64 {
    let orig = original.squared_length();
    if orig == 0.0 {
        return f64::INFINITY;
    }
    (candidate.squared_length() / orig - 1.0).abs() * STRETCH_SCALE
}

/// Stretch factor of edge `k` placed at `(a, b)`.
#[inline]
pub fn edge_stretch(problem: &Problem, k: usize, a: Point, b: Point) -> f64 {
    stretch_factor(problem.original_segment(k), &Segment::new(a, b))
}

#[inline]
pub fn is_bad_length(problem: &Problem, k: usize, a: Point, b: Point) -> bool {
    edge_stretch(problem, k, a, b) > problem.epsilon as f64
}

/// Boundary-inclusive point-in-hole test.
#[inline]
pub fn is_inside(hole: &Polygon, p: Point) -> bool {
    hole.contains(p)
}

/// True if the segment leaves the hole.
///
/// Endpoints and midpoint must be inside, and no hole edge may be crossed. A
/// hit where either segment contains an endpoint of the other is a touch,
/// not a crossing.
pub fn is_bad_bound(hole: &Polygon, seg: &Segment) -> bool {
    if !hole.contains(seg.begin) || !hole.contains(seg.end) || !hole.contains(seg.midpoint()) {
        return true;
    }
    hole.edges().any(|h| {
        seg.intersection(&h).is_some()
            && !h.contains_point(seg.begin)
            && !h.contains_point(seg.end)
            && !seg.contains_point(h.begin)
            && !seg.contains_point(h.end)
    })
}

/// Both checks for edge `k` placed at `(a, b)`.
#[inline]
pub fn edge_is_valid(problem: &Problem, k: usize, a: Point, b: Point) -> bool {
    !is_bad_length(problem, k, a, b) && !is_bad_bound(&problem.hole, &Segment::new(a, b))
}

/// Sum over hole corners of the squared distance to the nearest point.
///
/// An empty point set scores `i64::MAX`.
pub fn dislikes(hole: &Polygon, points: &[Point]) -> i64 {
    if points.is_empty() {
        return i64::MAX;
    }
    hole.vertices()
        .iter()
        .map(|&h| {
            points
                .iter()
                .map(|&v| dist2(h, v))
                .fold(f64::INFINITY, f64::min)
        })
        .sum::<f64>() as i64
}

/// Every edge whose endpoints are both assigned is valid.
///
/// With `selected`, edges with no endpoint in that index list are ignored
/// (they belong to the fixed part of an incremental search).
pub fn is_valid_so_far(
    problem: &Problem,
    placement: &[Option<Point>],
    selected: Option<&[usize]>,
) -> bool {
    problem.figure.edges.iter().enumerate().all(|(k, e)| {
        if let Some(sel) = selected {
            if !sel.contains(&e.a) && !sel.contains(&e.b) {
                return true;
            }
        }
        match (placement[e.a], placement[e.b]) {
            (Some(a), Some(b)) => edge_is_valid(problem, k, a, b),
            _ => true,
        }
    })
}

/// Whether `v` may move to `p` without invalidating an edge to an assigned
/// neighbour. `placement[v]` itself is ignored.
pub fn accepts(problem: &Problem, placement: &[Option<Point>], v: usize, p: Point) -> bool {
    problem.incident_edges(v).iter().all(|&k| {
        let e = problem.edge(k);
        match placement[e.other(v)] {
            Some(po) => edge_is_valid(problem, k, p, po),
            None => true,
        }
    })
}

/// Full validation report for a complete solution.
#[derive(Clone, Debug, PartialEq)]
pub struct Validation {
    pub bad_bounds: Vec<usize>,
    pub bad_lengths: Vec<usize>,
    pub dislikes: i64,
    pub stretch_factors: Vec<f64>,
}

impl Validation {
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.bad_bounds.is_empty() && self.bad_lengths.is_empty()
    }

    /// A regression: valid turned invalid, or both valid with more dislikes.
    pub fn is_worse_than(&self, other: &Validation) -> bool {
        if other.is_valid() && !self.is_valid() {
            return true;
        }
        other.is_valid() && self.is_valid() && self.dislikes > other.dislikes
    }
}

/// Evaluate every edge of a complete solution.
///
/// Assumes `solution.len() == problem.vertex_count()` (see `Problem::check_solution`).
pub fn validate(problem: &Problem, solution: &[Point]) -> Validation {
    let mut bad_bounds = Vec::new();
    let mut bad_lengths = Vec::new();
    let mut stretch_factors = Vec::with_capacity(problem.edge_count());
    for (k, e) in problem.figure.edges.iter().enumerate() {
        let seg = Segment::new(solution[e.a], solution[e.b]);
        if is_bad_bound(&problem.hole, &seg) {
            bad_bounds.push(k);
        }
        let s = stretch_factor(problem.original_segment(k), &seg);
        if s > problem.epsilon as f64 {
            bad_lengths.push(k);
        }
        stretch_factors.push(s);
    }
    Validation {
        bad_bounds,
        bad_lengths,
        dislikes: dislikes(&problem.hole, solution),
        stretch_factors,
    }
}
