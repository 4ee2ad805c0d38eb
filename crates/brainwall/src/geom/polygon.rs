//! Hole polygon: boundary-inclusive containment and lattice interior.

use super::types::{Point, Segment};

/// Simple polygon given by its corners in order (closing edge implied).
///
/// Invariants:
/// - `min`/`max` are the axis-aligned bounds of `vertices`, computed once.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point>,
    min: Point,
    max: Point,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for v in &vertices {
            min = min.inf(v);
            max = max.sup(v);
        }
        Self { vertices, min, max }
    }

    #[inline]
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box `(min, max)`.
    #[inline]
    pub fn bounds(&self) -> (Point, Point) {
        (self.min, self.max)
    }

    /// Boundary edges, closing edge last.
    pub fn edges(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    /// Ray-casting point-in-polygon; points on the boundary are inside.
    ///
    /// A horizontal ray runs from `p` to the right of the bounding box. A hit on
    /// an edge endpoint counts only when the edge's other endpoint lies strictly
    /// above `p`, so a vertex the ray passes through is counted once (or not
    /// at all for a local extremum).
    pub fn contains(&self, p: Point) -> bool {
        if self.vertices.is_empty() {
            return false;
        }
        if self.edges().any(|e| e.contains_point(p)) {
            return true;
        }
        let ray = Segment::new(p, Point::new(self.max.x.max(p.x) + 1.0, p.y));
        let mut crossings = 0usize;
        for edge in self.edges() {
            let Some(hit) = edge.intersection(&ray) else {
                continue;
            };
            let counts = if hit == edge.begin {
                edge.end.y > p.y
            } else if hit == edge.end {
                edge.begin.y > p.y
            } else {
                true
            };
            if counts {
                crossings += 1;
            }
        }
        crossings % 2 == 1
    }

    /// All lattice points of the bounding box that lie inside, row by row.
    pub fn interior_points(&self) -> Vec<Point> {
        if self.vertices.is_empty() {
            return Vec::new();
        }
        let (x0, x1) = (self.min.x.ceil() as i64, self.max.x.floor() as i64);
        let (y0, y1) = (self.min.y.ceil() as i64, self.max.y.floor() as i64);
        let mut out = Vec::new();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Point::new(x as f64, y as f64);
                if self.contains(p) {
                    out.push(p);
                }
            }
        }
        out
    }
}
