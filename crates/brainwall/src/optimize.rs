//! Coordinate-descent local search over complete placements.
//!
//! Each sweep visits the vertices in random order and moves each one to the
//! best lattice point of a `(2r+1)^2` neighbourhood, judged by a `Metric`
//! restricted to the edges touching that vertex. Only strict improvements are
//! taken. The full schedule runs a feasibility phase and then a dislikes
//! phase, each until its own cancel signal fires or a sweep moves nothing.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::geom::{dist2, Point, Segment};
use crate::oracle::{dislikes, edge_stretch, is_bad_bound};
use crate::problem::{Problem, ProblemError};
use crate::search::Cancel;

/// Lexicographic score of one vertex; smaller is better.
///
/// Field order is the comparison order.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Metric {
    /// Sum of `stretch - epsilon` over incident edges exceeding epsilon;
    /// `+inf` if an incident edge leaves the hole.
    pub stretch: f64,
    pub dislikes: i64,
    /// Squared distance to the nearest hole corner.
    pub corner: f64,
}

impl Metric {
    pub const WORST: Metric = Metric {
        stretch: f64::INFINITY,
        dislikes: 0,
        corner: 0.0,
    };
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Objective {
    /// Only the stretch excess counts.
    #[default]
    Feasibility,
    /// Stretch excess, then dislikes, then corner distance.
    Dislikes,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OptimizeCfg {
    /// Neighbourhood half-width per axis.
    pub radius: i32,
}

impl Default for OptimizeCfg {
    fn default() -> Self {
        Self { radius: 3 }
    }
}

/// One accepted move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub vertex: usize,
    pub from: Point,
    pub to: Point,
    pub before: Metric,
    pub after: Metric,
}

/// Metric of vertex `v` in `solution`.
///
/// A vertex outside the hole, or with an incident edge leaving it, scores
/// `Metric::WORST`.
pub fn vertex_metric(problem: &Problem, solution: &[Point], v: usize, objective: Objective) -> Metric {
    let at = solution[v];
    if !problem.hole.contains(at) {
        return Metric::WORST;
    }
    let incident = problem.incident_edges(v);
    let leaves = incident.iter().any(|&k| {
        let e = problem.edge(k);
        is_bad_bound(&problem.hole, &Segment::new(solution[e.a], solution[e.b]))
    });
    if leaves {
        return Metric::WORST;
    }
    let eps = problem.epsilon as f64;
    let stretch = incident
        .iter()
        .map(|&k| {
            let e = problem.edge(k);
            edge_stretch(problem, k, solution[e.a], solution[e.b])
        })
        .filter(|&s| s > eps)
        .map(|s| s - eps)
        .sum::<f64>();
    match objective {
        Objective::Feasibility => Metric {
            stretch,
            dislikes: 0,
            corner: 0.0,
        },
        Objective::Dislikes => Metric {
            stretch,
            dislikes: dislikes(&problem.hole, solution),
            corner: problem
                .hole
                .vertices()
                .iter()
                .map(|&h| dist2(h, at))
                .fold(f64::INFINITY, f64::min),
        },
    }
}

/// One pass over all vertices in random order; returns the moves taken.
///
/// Candidates are scanned row by row; the first strictly best one wins and
/// the current position wins all ties.
pub fn sweep<R: Rng + ?Sized>(
    problem: &Problem,
    solution: &mut [Point],
    objective: Objective,
    cfg: OptimizeCfg,
    rng: &mut R,
) -> Vec<Step> {
    let mut order: Vec<usize> = (0..solution.len()).collect();
    order.shuffle(rng);
    let r = cfg.radius;
    let mut steps = Vec::new();
    for v in order {
        let from = solution[v];
        let before = vertex_metric(problem, solution, v, objective);
        let (mut best, mut best_at) = (before, from);
        for dy in -r..=r {
            for dx in -r..=r {
                let to = from + Point::new(f64::from(dx), f64::from(dy));
                solution[v] = to;
                let m = vertex_metric(problem, solution, v, objective);
                if m < best {
                    best = m;
                    best_at = to;
                }
            }
        }
        solution[v] = best_at;
        if best_at != from {
            tracing::debug!(vertex = v, ?from, to = ?best_at, ?before, after = ?best, "move");
            steps.push(Step {
                vertex: v,
                from,
                to: best_at,
                before,
                after: best,
            });
        }
    }
    steps
}

/// Sweep until `cancel` fires or a sweep moves nothing.
pub fn local_search<R, C>(
    problem: &Problem,
    mut solution: Vec<Point>,
    objective: Objective,
    cfg: OptimizeCfg,
    rng: &mut R,
    cancel: C,
) -> Vec<Point>
where
    R: Rng + ?Sized,
    C: Cancel,
{
    let mut sweeps = 0usize;
    let mut moves = 0usize;
    while !cancel.is_cancelled() {
        sweeps += 1;
        let taken = sweep(problem, &mut solution, objective, cfg, rng).len();
        moves += taken;
        if taken == 0 {
            break;
        }
    }
    tracing::debug!(?objective, sweeps, moves, "local search finished");
    solution
}

/// Feasibility phase, then dislikes phase, each with its own signal.
pub fn optimize<R, C1, C2>(
    problem: &Problem,
    solution: &[Point],
    cfg: OptimizeCfg,
    rng: &mut R,
    feasibility: C1,
    dislikes_phase: C2,
) -> Result<Vec<Point>, ProblemError>
where
    R: Rng + ?Sized,
    C1: Cancel,
    C2: Cancel,
{
    problem.check_solution(solution)?;
    let feasible = local_search(
        problem,
        solution.to_vec(),
        Objective::Feasibility,
        cfg,
        rng,
        feasibility,
    );
    let out = local_search(problem, feasible, Objective::Dislikes, cfg, rng, dislikes_phase);
    tracing::info!(
        before = dislikes(&problem.hole, solution),
        after = dislikes(&problem.hole, &out),
        "optimize finished"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::validate;
    use crate::problem::Edge;
    use crate::search::{Deadline, Never};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square(side: f64) -> Vec<Point> {
        vec![p(0.0, 0.0), p(side, 0.0), p(side, side), p(0.0, side)]
    }

    fn path(epsilon: u64) -> Problem {
        Problem::new(
            square(6.0),
            vec![p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0)],
            vec![Edge::new(0, 1), Edge::new(1, 2)],
            epsilon,
        )
        .unwrap()
    }

    #[test]
    fn metric_orders_lexicographically() {
        let m = |stretch, dislikes, corner| Metric {
            stretch,
            dislikes,
            corner,
        };
        assert!(m(0.0, 9, 9.0) < m(1.0, 0, 0.0));
        assert!(m(0.0, 5, 9.0) < m(0.0, 6, 0.0));
        assert!(m(0.0, 5, 1.0) < m(0.0, 5, 2.0));
        assert!(m(1e12, 0, 0.0) < Metric::WORST);
        assert!(!(m(0.0, 5, 1.0) < m(0.0, 5, 1.0)));
    }

    #[test]
    fn leaving_the_hole_scores_worst() {
        let pr = path(0);
        let sol = [p(1.0, 1.0), p(3.0, 1.0), p(3.0, 8.0)];
        assert_eq!(vertex_metric(&pr, &sol, 2, Objective::Dislikes), Metric::WORST);
        assert_eq!(vertex_metric(&pr, &sol, 1, Objective::Feasibility), Metric::WORST);
        assert!(vertex_metric(&pr, &sol, 0, Objective::Feasibility) < Metric::WORST);
    }

    #[test]
    fn every_accepted_move_strictly_improves() {
        let pr = path(100_000);
        let mut sol = vec![p(2.0, 2.0), p(3.0, 3.0), p(4.0, 2.0)];
        let mut rng = StdRng::seed_from_u64(1);
        for objective in [Objective::Feasibility, Objective::Dislikes] {
            for _ in 0..4 {
                for step in sweep(&pr, &mut sol, objective, OptimizeCfg::default(), &mut rng) {
                    assert!(step.after < step.before, "{step:?}");
                    assert_ne!(step.from, step.to);
                }
            }
        }
    }

    #[test]
    fn feasibility_phase_repairs_a_short_edge() {
        let pr = path(0);
        // edge 0 has length 1 instead of 2
        let start = vec![p(2.0, 2.0), p(3.0, 2.0), p(3.0, 4.0)];
        assert!(!validate(&pr, &start).is_valid());
        let mut rng = StdRng::seed_from_u64(5);
        let got = optimize(&pr, &start, OptimizeCfg::default(), &mut rng, Never, Never).unwrap();
        assert!(validate(&pr, &got).is_valid(), "{got:?}");
    }

    #[test]
    fn valid_input_stays_valid_and_never_gains_dislikes() {
        let pr = path(250_000);
        let start = vec![p(2.0, 2.0), p(4.0, 2.0), p(4.0, 4.0)];
        assert!(validate(&pr, &start).is_valid());
        for seed in 0..4 {
            let mut rng = StdRng::seed_from_u64(seed);
            let got = optimize(&pr, &start, OptimizeCfg::default(), &mut rng, Never, Never).unwrap();
            let report = validate(&pr, &got);
            assert!(report.is_valid(), "seed {seed}: {got:?}");
            assert!(report.dislikes <= validate(&pr, &start).dislikes);
        }
    }

    #[test]
    fn second_run_at_local_optimum_changes_nothing() {
        let pr = path(250_000);
        let start = vec![p(2.0, 2.0), p(4.0, 2.0), p(4.0, 4.0)];
        let mut rng = StdRng::seed_from_u64(9);
        let once = optimize(&pr, &start, OptimizeCfg::default(), &mut rng, Never, Never).unwrap();
        let twice = optimize(&pr, &once, OptimizeCfg::default(), &mut rng, Never, Never).unwrap();
        assert_eq!(once, twice);
        let mut again = once.clone();
        assert!(sweep(&pr, &mut again, Objective::Dislikes, OptimizeCfg::default(), &mut rng).is_empty());
    }

    #[test]
    fn cancelled_phases_return_input() {
        let pr = path(0);
        let start = vec![p(2.0, 2.0), p(3.0, 2.0), p(3.0, 4.0)];
        let mut rng = StdRng::seed_from_u64(5);
        let expired = Deadline::after(Duration::ZERO);
        let got = optimize(&pr, &start, OptimizeCfg::default(), &mut rng, expired, expired).unwrap();
        assert_eq!(got, start);
    }
}
