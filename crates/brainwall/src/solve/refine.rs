//! Best-first repair of yellow edges.
//!
//! An edge is yellow when its length is out of tolerance or it leaves the
//! hole. A move shifts one endpoint of a yellow edge by a small lattice delta
//! so that the edge's length becomes acceptable and every edge touching the
//! moved vertex stays inside the hole. An edge is fixed at most once per
//! branch.

use std::cmp::Ordering;

use crate::geom::{Point, Segment};
use crate::oracle::{is_bad_bound, is_bad_length, stretch_factor};
use crate::problem::{Problem, ProblemError};
use crate::search::{search, BestFirstCfg, BestFirstSearch, Cancel, SearchNode};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefineCfg {
    /// Moves are lattice deltas of length at most `radius + 0.5`.
    pub radius: i32,
    /// Best-first frontier capacity.
    pub capacity: usize,
}

impl Default for RefineCfg {
    fn default() -> Self {
        Self {
            radius: 5,
            capacity: BestFirstCfg::default().capacity,
        }
    }
}

/// Complete placement with its yellow edges.
#[derive(Clone, Debug, PartialEq)]
pub struct RefineState {
    pub vertices: Vec<Point>,
    pub yellow: Vec<usize>,
    /// Largest stretch factor among yellow edges; 0 when none.
    pub worst_stretch: f64,
}

impl RefineState {
    pub fn new(problem: &Problem, vertices: Vec<Point>) -> Self {
        let mut yellow = Vec::new();
        let mut worst_stretch = 0.0f64;
        for (k, e) in problem.figure.edges.iter().enumerate() {
            let seg = Segment::new(vertices[e.a], vertices[e.b]);
            let stretch = stretch_factor(problem.original_segment(k), &seg);
            if stretch > problem.epsilon as f64 || is_bad_bound(&problem.hole, &seg) {
                yellow.push(k);
                worst_stretch = worst_stretch.max(stretch);
            }
        }
        Self {
            vertices,
            yellow,
            worst_stretch,
        }
    }

    /// Fewer yellow edges first, then the smaller worst stretch.
    pub fn rank(&self, other: &Self) -> Ordering {
        self.yellow
            .len()
            .cmp(&other.yellow.len())
            .then(self.worst_stretch.total_cmp(&other.worst_stretch))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RefineMove {
    pub fixed_edge: usize,
    pub vertex: usize,
    pub delta: (i32, i32),
}

/// Nonzero lattice deltas within `radius + 0.5`, shortest first.
pub(super) fn deltas(radius: i32) -> Vec<(i32, i32)> {
    let limit = (f64::from(radius) + 0.5).powi(2);
    let mut out: Vec<(i32, i32)> = (-radius..=radius)
        .flat_map(|x| (-radius..=radius).map(move |y| (x, y)))
        .filter(|&(x, y)| (x, y) != (0, 0) && f64::from(x * x + y * y) <= limit)
        .collect();
    out.sort_by_key(|&(x, y)| x * x + y * y);
    out
}

pub(super) fn children(
    problem: &Problem,
    deltas: &[(i32, i32)],
    node: &SearchNode<RefineState, RefineMove>,
) -> Vec<SearchNode<RefineState, RefineMove>> {
    let state = &node.state;
    let mut out = Vec::new();
    for &k in &state.yellow {
        if node.moves.iter().any(|m| m.fixed_edge == k) {
            continue;
        }
        let e = problem.edge(k);
        for (v, w) in [(e.a, e.b), (e.b, e.a)] {
            let from = state.vertices[v];
            let anchor = state.vertices[w];
            for &(dx, dy) in deltas {
                let to = from + Point::new(f64::from(dx), f64::from(dy));
                if is_bad_length(problem, k, to, anchor) || !stays_inside(problem, &state.vertices, v, to) {
                    continue;
                }
                let mut vertices = state.vertices.clone();
                vertices[v] = to;
                let mv = RefineMove {
                    fixed_edge: k,
                    vertex: v,
                    delta: (dx, dy),
                };
                out.push(node.extend(RefineState::new(problem, vertices), mv));
            }
        }
    }
    out
}

/// No edge touching `v` leaves the hole once `v` sits at `to`.
fn stays_inside(problem: &Problem, vertices: &[Point], v: usize, to: Point) -> bool {
    problem.incident_edges(v).iter().all(|&j| {
        let other = vertices[problem.edge(j).other(v)];
        !is_bad_bound(&problem.hole, &Segment::new(to, other))
    })
}

/// Best placement reachable by repairing yellow edges of `solution`.
///
/// The input is itself a candidate, so the result never has more yellow
/// edges than `solution`. Stops early once no yellow edge remains.
pub fn refine<C: Cancel>(
    problem: &Problem,
    solution: &[Point],
    cfg: RefineCfg,
    cancel: C,
) -> Result<Vec<Point>, ProblemError> {
    problem.check_solution(solution)?;
    let deltas = deltas(cfg.radius);
    let root = RefineState::new(problem, solution.to_vec());
    let before = root.yellow.len();
    let strategy = BestFirstSearch::with_cfg(
        RefineState::rank,
        BestFirstCfg {
            capacity: cfg.capacity,
        },
    );
    let expand = |node: &SearchNode<RefineState, RefineMove>| children(problem, &deltas, node);

    let mut best: Option<RefineState> = None;
    let mut visited = 0usize;
    for node in search(root, strategy, cancel, expand) {
        visited += 1;
        if best.as_ref().map_or(true, |b| node.state.rank(b) == Ordering::Less) {
            best = Some(node.state);
        }
        if best.as_ref().is_some_and(|b| b.yellow.is_empty()) {
            break;
        }
    }
    let Some(best) = best else {
        return Ok(solution.to_vec());
    };
    tracing::info!(before, after = best.yellow.len(), visited, "refine finished");
    Ok(best.vertices)
}
