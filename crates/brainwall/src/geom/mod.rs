//! Lattice 2D geometry (points, segments, hole polygon).
//!
//! Purpose
//! - Provide the primitives every validity check is built from: segment
//!   containment and intersection, boundary-inclusive point-in-polygon, and
//!   lattice enumeration of the hole interior.
//!
//! Conventions
//! - Points are `nalgebra::Vector2<f64>`. Problem inputs are integral and
//!   midpoints are half-integral, so all cross products stay exact for
//!   realistic coordinate ranges; `EPS` only absorbs noise from derived points.
//! - Intersections that land on an endpoint are snapped to that endpoint so
//!   callers can compare with `==`.
//!
//! Code cross-refs: `oracle::{is_bad_bound, is_inside}`, `Polygon::interior_points`

mod polygon;
mod types;

pub use polygon::Polygon;
pub use types::{cross, dist2, Point, Segment, EPS};
