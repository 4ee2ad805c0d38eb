use super::corner::CornerSearch;
use super::refine::{children, deltas};
use super::*;
use crate::geom::Point;
use crate::oracle::{dislikes, validate};
use crate::problem::{Edge, Placement, Problem, ProblemError};
use crate::search::{search, Deadline, DepthFirstSearch, Never, SearchNode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn square(side: f64) -> Vec<Point> {
    vec![p(0.0, 0.0), p(side, 0.0), p(side, side), p(0.0, side)]
}

/// Two unit edges in a 2x2 square; only exact unit lengths pass.
fn hinge() -> Problem {
    Problem::new(
        square(2.0),
        vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)],
        vec![Edge::new(0, 1), Edge::new(1, 2)],
        150_000,
    )
    .unwrap()
}

#[test]
fn most_constrained_follows_longest_anchored_edge() {
    let pr = Problem::new(
        square(10.0),
        vec![p(0.0, 0.0), p(3.0, 0.0), p(3.0, 1.0), p(5.0, 5.0)],
        vec![Edge::new(0, 1), Edge::new(1, 2)],
        0,
    )
    .unwrap();
    let at = Some(p(1.0, 1.0));
    // nothing placed: end of the longest edge
    assert_eq!(most_constrained_vertex(&pr, &[None, None, None, None]), Some(0));
    assert_eq!(most_constrained_vertex(&pr, &[at, None, None, None]), Some(1));
    assert_eq!(most_constrained_vertex(&pr, &[at, at, None, None]), Some(2));
    assert_eq!(most_constrained_vertex(&pr, &[None, None, at, None]), Some(1));
    // isolated vertex comes last
    assert_eq!(most_constrained_vertex(&pr, &[at, at, at, None]), Some(3));
    assert_eq!(most_constrained_vertex(&pr, &[at, at, at, at]), None);
}

#[test]
fn exhaustive_enumeration_matches_hand_count() {
    // v1 anywhere on the 3x3 lattice, v0 and v2 each on one of its unit
    // neighbours: sum of deg(v1)^2 = 4*2^2 + 4*3^2 + 4^2 = 68.
    let pr = hinge();
    let candidates = pr.hole.interior_points();
    assert_eq!(candidates.len(), 9);
    let all: Vec<Vec<Point>> =
        enumerate_placements(&pr, &candidates, vec![None; 3], Never).collect();
    assert_eq!(all.len(), 68);
    for s in &all {
        assert!(validate(&pr, s).is_valid(), "{s:?}");
    }
}

#[test]
fn brute_force_finds_minimum_dislikes() {
    let pr = hinge();
    let mut rng = StdRng::seed_from_u64(7);
    let best = brute_force(&pr, &mut rng, Never).expect("fixture is solvable");
    assert!(validate(&pr, &best).is_valid());
    // middle vertex in the centre, ends on opposite sides
    assert_eq!(dislikes(&pr.hole, &best), 4);
}

#[test]
fn brute_force_respects_cancellation() {
    let pr = hinge();
    let mut rng = StdRng::seed_from_u64(7);
    assert_eq!(brute_force(&pr, &mut rng, Deadline::after(Duration::ZERO)), None);
}

#[test]
fn incremental_moves_only_selected_vertices() {
    let pr = hinge();
    let mut rng = StdRng::seed_from_u64(3);
    let start = vec![p(1.0, 0.0), p(1.0, 1.0), p(2.0, 1.0)];
    let got = incremental_brute_force(&pr, &start, &[2], &mut rng, Never)
        .unwrap()
        .expect("four unit neighbours of the centre");
    assert_eq!(&got[..2], &start[..2]);
    assert_eq!(got[2], p(1.0, 2.0));
    assert_eq!(dislikes(&pr.hole, &got), 4);
}

#[test]
fn incremental_ignores_edges_between_fixed_vertices() {
    let pr = hinge();
    let mut rng = StdRng::seed_from_u64(3);
    // edge 0 is too long, but neither of its ends is selected
    let start = vec![p(0.0, 0.0), p(1.0, 1.0), p(2.0, 2.0)];
    assert!(!validate(&pr, &start).is_valid());
    let got = incremental_brute_force(&pr, &start, &[2], &mut rng, Never).unwrap();
    let got = got.expect("edge 1 can be repaired");
    assert_eq!(got[0], start[0]);
    assert_eq!(validate(&pr, &got).bad_lengths, vec![0]);
}

#[test]
fn incremental_rejects_bad_inputs() {
    let pr = hinge();
    let mut rng = StdRng::seed_from_u64(3);
    let start = vec![p(1.0, 0.0), p(1.0, 1.0), p(1.0, 2.0)];
    assert_eq!(
        incremental_brute_force(&pr, &start, &[5], &mut rng, Never),
        Err(ProblemError::SelectedOutOfRange { vertex: 5, count: 3 })
    );
    assert_eq!(
        incremental_brute_force(&pr, &start[..2], &[0], &mut rng, Never),
        Err(ProblemError::SolutionLength {
            expected: 3,
            got: 2
        })
    );
}

#[test]
fn corner_matching_pins_square_onto_square() {
    let pr = Problem::new(
        square(2.0),
        square(2.0),
        vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 0)],
        0,
    )
    .unwrap();
    for seed in 0..5 {
        let mut rng = StdRng::seed_from_u64(seed);
        let got = corner_matching(&pr, &mut rng, Never).expect("square fits");
        let report = validate(&pr, &got);
        assert!(report.is_valid(), "seed {seed}: {got:?}");
        assert_eq!(report.dislikes, 0);
    }
}

#[test]
fn corner_matching_fills_leftover_vertices_inside() {
    let mut figure = square(2.0);
    figure.push(p(1.0, 1.0));
    let pr = Problem::new(
        square(2.0),
        figure,
        vec![
            Edge::new(0, 1),
            Edge::new(1, 2),
            Edge::new(2, 3),
            Edge::new(3, 0),
            Edge::new(0, 4),
        ],
        0,
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(11);
    let got = corner_matching(&pr, &mut rng, Never).expect("hole has lattice points");
    assert_eq!(got.len(), 5);
    for &q in &got {
        assert!(pr.hole.contains(q), "{q:?}");
    }
    // every corner is taken, possibly by the pendant vertex
    assert_eq!(dislikes(&pr.hole, &got), 0);
}

#[test]
fn corner_search_prunes_vertices_out_of_graph_reach() {
    // path 0-1-2 with unit edges; epsilon allows lengths up to sqrt(2)
    let pr = Problem::new(
        square(10.0),
        vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)],
        vec![Edge::new(0, 1), Edge::new(1, 2)],
        1_000_000,
    )
    .unwrap();
    let reach = pr.graph_distances();
    assert_eq!(reach[0][2], 2.0);
    let slack = 2f64.sqrt();

    let mut rng = StdRng::seed_from_u64(3);
    let corners = CornerSearch::new(&pr, &mut rng);
    assert_eq!(corners.target, 3);
    let expand = |n: &SearchNode<Placement, ()>| corners.children(n, &mut rng);
    let nodes: Vec<_> = search(vec![None; 3], DepthFirstSearch, Never, expand).collect();

    for n in &nodes {
        for (a, b) in [(0, 1), (0, 2), (1, 2)] {
            if let (Some(x), Some(y)) = (n.state[a], n.state[b]) {
                assert!((x - y).norm() <= reach[a][b] * slack + 1e-9, "{:?}", n.state);
            }
        }
    }
    // 0 and 2 share no edge, but any two corners are at least 10 apart
    assert_eq!(nodes.iter().map(|n| n.depth).max(), Some(1));
    assert_eq!(nodes.len(), 4);
}

fn stick(len: f64) -> Problem {
    Problem::new(
        square(10.0),
        vec![p(0.0, 0.0), p(len, 0.0)],
        vec![Edge::new(0, 1)],
        0,
    )
    .unwrap()
}

#[test]
fn refine_repairs_a_short_edge() {
    let pr = stick(3.0);
    let start = vec![p(2.0, 2.0), p(2.0, 4.0)];
    assert_eq!(RefineState::new(&pr, start.clone()).yellow, vec![0]);
    let got = refine(&pr, &start, RefineCfg::default(), Never).unwrap();
    assert!(validate(&pr, &got).is_valid(), "{got:?}");
}

#[test]
fn refine_keeps_valid_input() {
    let pr = stick(3.0);
    let start = vec![p(2.0, 2.0), p(5.0, 2.0)];
    let got = refine(&pr, &start, RefineCfg::default(), Never).unwrap();
    assert_eq!(got, start);
}

#[test]
fn refine_never_adds_yellow_edges() {
    // far too long for any small move to fix
    let pr = stick(40.0);
    let start = vec![p(2.0, 2.0), p(8.0, 2.0)];
    let got = refine(&pr, &start, RefineCfg::default(), Never).unwrap();
    let before = RefineState::new(&pr, start.clone());
    let after = RefineState::new(&pr, got.clone());
    assert!(after.yellow.len() <= before.yellow.len());
    assert_eq!(got, start);
}

#[test]
fn refine_rank_prefers_fewer_then_milder_yellow() {
    let pr = Problem::new(
        square(10.0),
        vec![p(0.0, 0.0), p(2.0, 0.0), p(4.0, 0.0)],
        vec![Edge::new(0, 1), Edge::new(1, 2)],
        0,
    )
    .unwrap();
    let one_bad = RefineState::new(&pr, vec![p(1.0, 1.0), p(3.0, 1.0), p(6.0, 1.0)]);
    let two_bad = RefineState::new(&pr, vec![p(1.0, 1.0), p(4.0, 1.0), p(7.0, 1.0)]);
    let one_mild = RefineState::new(&pr, vec![p(1.0, 1.0), p(3.0, 1.0), p(5.0, 2.0)]);
    assert_eq!((one_bad.yellow.len(), two_bad.yellow.len()), (1, 2));
    assert_eq!(one_bad.rank(&two_bad), std::cmp::Ordering::Less);
    assert_eq!(one_mild.yellow.len(), 1);
    assert_eq!(one_mild.rank(&one_bad), std::cmp::Ordering::Less);
}

#[test]
fn refine_rejects_wrong_length_solution() {
    let pr = stick(3.0);
    assert!(refine(&pr, &[p(1.0, 1.0)], RefineCfg::default(), Never).is_err());
}

/// Path 0-1-2 with edges of length 3; edge 1 starts too short.
fn bent_path() -> (Problem, Vec<Point>) {
    let pr = Problem::new(
        square(20.0),
        vec![p(0.0, 0.0), p(3.0, 0.0), p(6.0, 0.0)],
        vec![Edge::new(0, 1), Edge::new(1, 2)],
        0,
    )
    .unwrap();
    (pr, vec![p(2.0, 2.0), p(5.0, 2.0), p(5.0, 4.0)])
}

#[test]
fn refine_fixes_each_edge_at_most_once_per_branch() {
    let (pr, start) = bent_path();
    let steps = deltas(5);
    let root = RefineState::new(&pr, start);
    assert_eq!(root.yellow, vec![1]);
    let expand = |n: &SearchNode<RefineState, RefineMove>| children(&pr, &steps, n);
    let nodes: Vec<_> = search(root, DepthFirstSearch, Never, expand).take(5_000).collect();

    for n in &nodes {
        let mut fixed: Vec<usize> = n.moves.iter().map(|m| m.fixed_edge).collect();
        fixed.sort_unstable();
        fixed.dedup();
        assert_eq!(fixed.len(), n.moves.len(), "{:?}", n.moves);
    }
    assert!(nodes.iter().all(|n| n.depth <= 2));
    // moving vertex 1 to fix edge 0 can break edge 1 again
    assert!(nodes.iter().any(|n| n
        .state
        .yellow
        .iter()
        .any(|k| n.moves.iter().any(|m| m.fixed_edge == *k))));
}

#[test]
fn refine_clears_a_path_with_one_bent_edge() {
    let (pr, start) = bent_path();
    let got = refine(&pr, &start, RefineCfg::default(), Never).unwrap();
    assert!(validate(&pr, &got).is_valid(), "{got:?}");
    assert_eq!(got[0], start[0]);
}
