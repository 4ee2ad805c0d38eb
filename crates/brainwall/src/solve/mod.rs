//! Placement heuristics: expansion functions and drivers for the search engine.
//!
//! - `brute_force` / `enumerate_placements`: exhaustive DFS filling empty
//!   slots with interior lattice points, most constrained vertex first.
//! - `incremental_brute_force`: the same over a selected subset of an
//!   existing solution.
//! - `corner_matching`: DFS pinning hole corners to figure vertices, pruned by
//!   figure-graph distances.
//! - `refine`: best-first repair of invalid ("yellow") edges by small moves.
//!
//! Randomized drivers take `&mut R: Rng` so callers control seeding.

mod brute_force;
mod constrained;
mod corner;
mod incremental;
mod refine;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geom::{Point, Polygon};

pub use brute_force::{brute_force, enumerate_placements};
pub use constrained::most_constrained_vertex;
pub use corner::corner_matching;
pub use incremental::incremental_brute_force;
pub use refine::{refine, RefineCfg, RefineMove, RefineState};

/// Interior lattice points of `hole`, shuffled once.
pub(crate) fn shuffled_candidates<R: Rng + ?Sized>(hole: &Polygon, rng: &mut R) -> Vec<Point> {
    let mut points = hole.interior_points();
    points.shuffle(rng);
    points
}

/// `Some` when every slot is assigned.
#[inline]
pub(crate) fn complete(placement: &[Option<Point>]) -> Option<Vec<Point>> {
    placement.iter().copied().collect()
}

#[cfg(test)]
mod tests;
