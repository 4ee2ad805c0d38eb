//! Exhaustive assignment of empty slots to interior lattice points.

use rand::Rng;

use super::{complete, most_constrained_vertex, shuffled_candidates};
use crate::geom::Point;
use crate::oracle::{accepts, dislikes};
use crate::problem::{Placement, Problem};
use crate::search::{search, Cancel, DepthFirstSearch, SearchNode};

/// Lazily enumerate every complete valid placement reachable from `root`.
///
/// Assigned slots of `root` stay fixed. Each level fills the most constrained
/// empty slot with every candidate whose edges to assigned neighbours are
/// valid, in candidate order. Edges between two fixed slots are never checked.
pub fn enumerate_placements<'a, C>(
    problem: &'a Problem,
    candidates: &'a [Point],
    root: Placement,
    cancel: C,
) -> impl Iterator<Item = Vec<Point>> + 'a
where
    C: Cancel + 'a,
{
    let expand = move |node: &SearchNode<Placement, ()>| {
        let parent = node.clone();
        let next = most_constrained_vertex(problem, &parent.state);
        let pool = match next {
            Some(_) => candidates,
            None => &candidates[..0],
        };
        pool.iter().filter_map(move |&p| {
            let v = next?;
            accepts(problem, &parent.state, v, p).then(|| parent.extend_with((), |s| s[v] = Some(p)))
        })
    };
    search(root, DepthFirstSearch, cancel, expand).filter_map(|node| complete(&node.state))
}

/// Minimum-dislikes complete placement over all interior lattice points.
///
/// Candidates are shuffled once. Returns `None` if no complete valid
/// placement was found before `cancel` fired.
pub fn brute_force<R, C>(problem: &Problem, rng: &mut R, cancel: C) -> Option<Vec<Point>>
where
    R: Rng + ?Sized,
    C: Cancel,
{
    let candidates = shuffled_candidates(&problem.hole, rng);
    let root = vec![None; problem.vertex_count()];
    best_by_dislikes(
        problem,
        enumerate_placements(problem, &candidates, root, cancel),
    )
}

/// First placement with the fewest dislikes.
pub(super) fn best_by_dislikes(
    problem: &Problem,
    placements: impl Iterator<Item = Vec<Point>>,
) -> Option<Vec<Point>> {
    let mut seen = 0usize;
    let best = placements
        .inspect(|_| seen += 1)
        .map(|s| (dislikes(&problem.hole, &s), s))
        .min_by_key(|(d, _)| *d);
    match &best {
        Some((d, _)) => tracing::info!(complete = seen, dislikes = *d, "exhaustive search finished"),
        None => tracing::info!("exhaustive search found no complete placement"),
    }
    best.map(|(_, s)| s)
}
