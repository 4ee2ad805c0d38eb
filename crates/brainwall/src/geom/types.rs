//! Point and segment primitives.
//!
//! - `Point`: alias for `Vector2<f64>` (addition, deltas, equality from nalgebra).
//! - `Segment`: closed segment with exact endpoint-aware intersection.

use nalgebra::Vector2;

/// Numerical tolerance for collinearity and range checks.
pub const EPS: f64 = 1e-9;

/// 2D point; lattice points carry integral coordinates.
pub type Point = Vector2<f64>;

/// Squared Euclidean distance.
#[inline]
pub fn dist2(a: Point, b: Point) -> f64 {
    (a - b).norm_squared()
}

/// z-component of the 2D cross product `a × b`.
#[inline]
pub fn cross(a: Point, b: Point) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Closed line segment `[begin, end]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub begin: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(begin: Point, end: Point) -> Self {
        Self { begin, end }
    }

    #[inline]
    pub fn squared_length(&self) -> f64 {
        dist2(self.begin, self.end)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.begin).norm()
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.begin + self.end) * 0.5
    }

    /// True if `p` lies on the segment (collinear and inside the endpoint box).
    pub fn contains_point(&self, p: Point) -> bool {
        if cross(self.end - self.begin, p - self.begin).abs() > EPS {
            return false;
        }
        let (lo_x, hi_x) = minmax(self.begin.x, self.end.x);
        let (lo_y, hi_y) = minmax(self.begin.y, self.end.y);
        p.x >= lo_x - EPS && p.x <= hi_x + EPS && p.y >= lo_y - EPS && p.y <= hi_y + EPS
    }

    /// Unique intersection point of two closed segments.
    ///
    /// Returns `None` for disjoint segments and for collinear segments that
    /// overlap in more than one point. Touching at an endpoint returns that
    /// endpoint exactly. The result does not depend on argument order.
    pub fn intersection(&self, other: &Segment) -> Option<Point> {
        // Fixed evaluation order keeps the floating result symmetric.
        if self.coords() <= other.coords() {
            intersect_ordered(self, other)
        } else {
            intersect_ordered(other, self)
        }
    }

    #[inline]
    fn coords(&self) -> [f64; 4] {
        [self.begin.x, self.begin.y, self.end.x, self.end.y]
    }
}

#[inline]
fn minmax(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

fn intersect_ordered(a: &Segment, b: &Segment) -> Option<Point> {
    let p = a.begin;
    let r = a.end - a.begin;
    let q = b.begin;
    let s = b.end - b.begin;

    if r.norm_squared() == 0.0 {
        return b.contains_point(p).then_some(p);
    }
    if s.norm_squared() == 0.0 {
        return a.contains_point(q).then_some(q);
    }

    let qp = q - p;
    let denom = cross(r, s);
    if denom.abs() <= EPS {
        if cross(qp, r).abs() > EPS {
            // parallel, distinct lines
            return None;
        }
        return collinear_touch(a, b);
    }

    let t = cross(qp, s) / denom;
    let u = cross(qp, r) / denom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }
    let hit = if t == 0.0 {
        a.begin
    } else if t == 1.0 {
        a.end
    } else if u == 0.0 {
        b.begin
    } else if u == 1.0 {
        b.end
    } else {
        p + r * t
    };
    Some(hit)
}

/// Collinear segments share a unique point only when they meet end to end.
fn collinear_touch(a: &Segment, b: &Segment) -> Option<Point> {
    let r = a.end - a.begin;
    let rr = r.norm_squared();
    let t0 = (b.begin - a.begin).dot(&r) / rr;
    let t1 = (b.end - a.begin).dot(&r) / rr;
    let (lo, hi) = minmax(t0, t1);
    if hi == 0.0 {
        Some(a.begin)
    } else if lo == 1.0 {
        Some(a.end)
    } else {
        None
    }
}
