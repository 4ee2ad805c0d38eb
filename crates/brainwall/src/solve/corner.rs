//! Pin hole corners onto figure vertices.
//!
//! Depth `d` assigns corner `order[d]` to some empty vertex. A vertex may only
//! take a corner if every assigned vertex lies within its figure-graph
//! distance (scaled by the largest stretch epsilon allows) and the edges to
//! assigned neighbours stay valid.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geom::{Point, EPS};
use crate::oracle::{accepts, STRETCH_SCALE};
use crate::problem::{Placement, Problem};
use crate::search::{search, Cancel, DepthFirstSearch, SearchNode};

/// Corner assignment: one hole corner per depth, in shuffled order.
pub(super) struct CornerSearch<'a> {
    problem: &'a Problem,
    order: Vec<usize>,
    reach: Vec<Vec<f64>>,
    slack: f64,
    /// Depth at which every assignable corner is taken.
    pub target: usize,
}

impl<'a> CornerSearch<'a> {
    pub fn new<R: Rng + ?Sized>(problem: &'a Problem, rng: &mut R) -> Self {
        let corners = problem.hole.len();
        let mut order: Vec<usize> = (0..corners).collect();
        order.shuffle(rng);
        Self {
            problem,
            order,
            reach: problem.graph_distances(),
            slack: (1.0 + problem.epsilon as f64 / STRETCH_SCALE).sqrt(),
            target: corners.min(problem.vertex_count()),
        }
    }

    /// Empty vertices (in random order) that may take the next corner.
    pub fn children<R: Rng + ?Sized>(
        &self,
        node: &SearchNode<Placement, ()>,
        rng: &mut R,
    ) -> Vec<SearchNode<Placement, ()>> {
        if node.depth >= self.target {
            return Vec::new();
        }
        let corner = self.problem.hole.vertices()[self.order[node.depth]];
        let mut free: Vec<usize> = (0..node.state.len())
            .filter(|&v| node.state[v].is_none())
            .collect();
        free.shuffle(rng);
        free.into_iter()
            .filter(|&v| within_reach(&node.state, &self.reach[v], corner, self.slack))
            .filter(|&v| accepts(self.problem, &node.state, v, corner))
            .map(|v| node.extend_with((), |s| s[v] = Some(corner)))
            .collect()
    }
}

/// Place figure vertices on hole corners; fill the rest at random.
///
/// The first node assigning `min(corners, vertices)` corners wins. If the
/// search ends or is cancelled before that, the deepest node seen is used.
/// Vertices left empty get random interior lattice points. `None` only when
/// such a point is needed and the hole has none.
pub fn corner_matching<R, C>(problem: &Problem, rng: &mut R, cancel: C) -> Option<Vec<Point>>
where
    R: Rng + ?Sized,
    C: Cancel,
{
    let n = problem.vertex_count();
    let corners = CornerSearch::new(problem, rng);
    let target = corners.target;

    let mut deepest: Option<SearchNode<Placement, ()>> = None;
    {
        let expand = |node: &SearchNode<Placement, ()>| corners.children(node, &mut *rng);
        for node in search(vec![None; n], DepthFirstSearch, cancel, expand) {
            let done = node.depth == target;
            if deepest.as_ref().map_or(true, |d| node.depth > d.depth) {
                deepest = Some(node);
            }
            if done {
                break;
            }
        }
    }

    let placement = deepest.map_or_else(|| vec![None; n], |d| d.state);
    let pinned = placement.iter().filter(|s| s.is_some()).count();
    tracing::info!(pinned, target, "corner matching finished");
    let interior = problem.hole.interior_points();
    placement
        .into_iter()
        .map(|slot| slot.or_else(|| interior.choose(&mut *rng).copied()))
        .collect()
}

/// Every assigned vertex `w` is within `reach[w]` of `p`, up to `slack`.
fn within_reach(placement: &[Option<Point>], reach: &[f64], p: Point, slack: f64) -> bool {
    placement
        .iter()
        .zip(reach)
        .all(|(slot, &d)| slot.map_or(true, |q| (q - p).norm() <= d * slack + EPS))
}
