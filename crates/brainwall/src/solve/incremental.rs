use rand::Rng;

use super::brute_force::{best_by_dislikes, enumerate_placements};
use super::shuffled_candidates;
use crate::geom::Point;
use crate::oracle::is_valid_so_far;
use crate::problem::{Placement, Problem, ProblemError};
use crate::search::Cancel;

/// Brute force over the `selected` vertices of `solution`; the rest stay put.
///
/// Edges with no selected endpoint are not checked, so an invalid fixed part
/// does not block the search. `Ok(None)` means no valid completion was found.
pub fn incremental_brute_force<R, C>(
    problem: &Problem,
    solution: &[Point],
    selected: &[usize],
    rng: &mut R,
    cancel: C,
) -> Result<Option<Vec<Point>>, ProblemError>
where
    R: Rng + ?Sized,
    C: Cancel,
{
    problem.check_solution(solution)?;
    problem.check_selected(selected)?;
    let mut root: Placement = solution.iter().copied().map(Some).collect();
    for &v in selected {
        root[v] = None;
    }
    let candidates = shuffled_candidates(&problem.hole, rng);
    let best = best_by_dislikes(
        problem,
        enumerate_placements(problem, &candidates, root, cancel),
    );
    debug_assert!(best.as_ref().map_or(true, |b| {
        let full: Placement = b.iter().copied().map(Some).collect();
        is_valid_so_far(problem, &full, Some(selected))
    }));
    Ok(best)
}
