//! Rubber-band relaxation: edges act as springs pulling toward their
//! original lengths, then every vertex snaps to the nearest lattice point.
//!
//! Useful as a cheap pre-pass before `refine` or `optimize`; the result is
//! not checked against the hole.

use crate::geom::{Point, EPS};
use crate::problem::{Problem, ProblemError};
use crate::search::Cancel;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RelaxCfg {
    /// Upper bound on passes.
    pub iterations: usize,
    /// Step per pass at each end, times the edge's relative length error
    /// `len / natural - 1`. Short and long edges stretched by the same ratio
    /// move by the same distance.
    pub stiffness: f64,
}

impl Default for RelaxCfg {
    fn default() -> Self {
        Self {
            iterations: 1_000,
            stiffness: 0.01,
        }
    }
}

/// Relax `solution`, keeping `pinned` vertices in place.
///
/// Stops after `cfg.iterations` passes, when no vertex moves by more than
/// `EPS`, or when `cancel` fires. Coordinates are rounded half up.
pub fn rubber_band<C: Cancel>(
    problem: &Problem,
    solution: &[Point],
    pinned: &[usize],
    cfg: RelaxCfg,
    cancel: C,
) -> Result<Vec<Point>, ProblemError> {
    problem.check_solution(solution)?;
    problem.check_selected(pinned)?;
    let n = solution.len();
    let mut fixed = vec![false; n];
    for &v in pinned {
        fixed[v] = true;
    }

    let mut pos = solution.to_vec();
    let mut force = vec![Point::zeros(); n];
    let mut passes = 0usize;
    while passes < cfg.iterations && !cancel.is_cancelled() {
        passes += 1;
        force.iter_mut().for_each(|f| *f = Point::zeros());
        for (k, e) in problem.figure.edges.iter().enumerate() {
            let natural = problem.original_segment(k).length();
            let d = pos[e.b] - pos[e.a];
            let len = d.norm();
            if len < EPS || natural < EPS {
                continue;
            }
            // stretched edges pull their ends together, compressed ones push
            let pull = d * (cfg.stiffness * (len / natural - 1.0) / len);
            force[e.a] += pull;
            force[e.b] -= pull;
        }
        let mut largest = 0.0f64;
        for v in (0..n).filter(|&v| !fixed[v]) {
            pos[v] += force[v];
            largest = largest.max(force[v].norm());
        }
        if largest < EPS {
            break;
        }
    }
    tracing::debug!(passes, "rubber band relaxed");
    Ok(pos.into_iter().map(|p| p.map(|c| (c + 0.5).floor())).collect())
}
