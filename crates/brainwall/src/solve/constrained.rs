use crate::geom::Point;
use crate::problem::Problem;

/// Vertex to assign next, or `None` once every slot is filled.
///
/// Picks the empty end of the longest original edge with exactly one assigned
/// end. Without such an edge, an empty end of the longest edge between two
/// empty slots; failing that (isolated vertices), the first empty slot.
/// Ties go to the edge listed first. Never returns an assigned vertex.
pub fn most_constrained_vertex(problem: &Problem, placement: &[Option<Point>]) -> Option<usize> {
    let mut anchored: Option<(f64, usize)> = None;
    let mut loose: Option<(f64, usize)> = None;
    for (k, e) in problem.figure.edges.iter().enumerate() {
        let (slot, v) = match (placement[e.a].is_some(), placement[e.b].is_some()) {
            (true, false) => (&mut anchored, e.b),
            (false, true) => (&mut anchored, e.a),
            (false, false) => (&mut loose, e.a),
            (true, true) => continue,
        };
        let len = problem.original_segment(k).squared_length();
        if slot.map_or(true, |(best, _)| len > best) {
            *slot = Some((len, v));
        }
    }
    anchored
        .or(loose)
        .map(|(_, v)| v)
        .or_else(|| placement.iter().position(Option::is_none))
}
