//! Problem model: hole polygon, figure graph, and stretch tolerance.
//!
//! A `Problem` is immutable once built and is shared by reference across all
//! search branches. Derived tables (adjacency, incident edges, original edge
//! segments) are computed once in `Problem::new`.

use thiserror::Error;

use crate::geom::{Point, Polygon, Segment};

/// Per-vertex slot during search; `None` means not yet assigned.
pub type Placement = Vec<Option<Point>>;

/// Structural problems with caller-supplied inputs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ProblemError {
    #[error("hole needs at least 3 corners, got {0}")]
    DegenerateHole(usize),
    #[error("edge {edge} references vertex {vertex}, but the figure has {count} vertices")]
    EdgeOutOfRange {
        edge: usize,
        vertex: usize,
        count: usize,
    },
    #[error("edge {0} connects a vertex to itself")]
    SelfLoop(usize),
    #[error("solution has {got} vertices, but the figure has {expected}")]
    SolutionLength { expected: usize, got: usize },
    #[error("selected vertex {vertex} is out of range for {count} vertices")]
    SelectedOutOfRange { vertex: usize, count: usize },
}

/// Undirected figure edge between two vertex indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    #[inline]
    pub fn touches(&self, v: usize) -> bool {
        self.a == v || self.b == v
    }

    /// The endpoint opposite to `v` (assumes `touches(v)`).
    #[inline]
    pub fn other(&self, v: usize) -> usize {
        if self.a == v {
            self.b
        } else {
            self.a
        }
    }
}

/// Figure graph in its original pose.
#[derive(Clone, Debug)]
pub struct Figure {
    pub vertices: Vec<Point>,
    pub edges: Vec<Edge>,
}

/// A placement problem instance.
#[derive(Clone, Debug)]
pub struct Problem {
    pub hole: Polygon,
    pub figure: Figure,
    /// Stretch tolerance scaled by 10^6.
    pub epsilon: u64,
    neighbors: Vec<Vec<usize>>,
    incident: Vec<Vec<usize>>,
    originals: Vec<Segment>,
}

impl Problem {
    /// Build and structurally check a problem.
    ///
    /// Zero-length original edges are accepted; every placement of such an
    /// edge is rated infinitely stretched.
    pub fn new(
        hole: Vec<Point>,
        vertices: Vec<Point>,
        edges: Vec<Edge>,
        epsilon: u64,
    ) -> Result<Self, ProblemError> {
        if hole.len() < 3 {
            return Err(ProblemError::DegenerateHole(hole.len()));
        }
        let n = vertices.len();
        let mut neighbors = vec![Vec::new(); n];
        let mut incident = vec![Vec::new(); n];
        let mut originals = Vec::with_capacity(edges.len());
        for (k, e) in edges.iter().enumerate() {
            for v in [e.a, e.b] {
                if v >= n {
                    return Err(ProblemError::EdgeOutOfRange {
                        edge: k,
                        vertex: v,
                        count: n,
                    });
                }
            }
            if e.a == e.b {
                return Err(ProblemError::SelfLoop(k));
            }
            neighbors[e.a].push(e.b);
            neighbors[e.b].push(e.a);
            incident[e.a].push(k);
            incident[e.b].push(k);
            let seg = Segment::new(vertices[e.a], vertices[e.b]);
            if seg.squared_length() == 0.0 {
                tracing::warn!(edge = k, "zero-length original edge; it can never be placed");
            }
            originals.push(seg);
        }
        Ok(Self {
            hole: Polygon::new(hole),
            figure: Figure { vertices, edges },
            epsilon,
            neighbors,
            incident,
            originals,
        })
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.figure.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.figure.edges.len()
    }

    #[inline]
    pub fn edge(&self, k: usize) -> Edge {
        self.figure.edges[k]
    }

    /// Original (unplaced) segment of edge `k`.
    #[inline]
    pub fn original_segment(&self, k: usize) -> &Segment {
        &self.originals[k]
    }

    /// Vertices adjacent to `v` (with multiplicity for parallel edges).
    #[inline]
    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[v]
    }

    /// Indices of the edges touching `v`.
    #[inline]
    pub fn incident_edges(&self, v: usize) -> &[usize] {
        &self.incident[v]
    }

    /// All-pairs shortest path lengths over the figure graph, weighting each
    /// edge by its original Euclidean length. Unreachable pairs are `+inf`.
    pub fn graph_distances(&self) -> Vec<Vec<f64>> {
        let n = self.vertex_count();
        let mut d = vec![vec![f64::INFINITY; n]; n];
        for (i, row) in d.iter_mut().enumerate() {
            row[i] = 0.0;
        }
        for (k, e) in self.figure.edges.iter().enumerate() {
            let w = self.originals[k].length();
            if w < d[e.a][e.b] {
                d[e.a][e.b] = w;
                d[e.b][e.a] = w;
            }
        }
        // Floyd–Warshall
        for k in 0..n {
            for i in 0..n {
                let dik = d[i][k];
                if !dik.is_finite() {
                    continue;
                }
                for j in 0..n {
                    let via = dik + d[k][j];
                    if via < d[i][j] {
                        d[i][j] = via;
                    }
                }
            }
        }
        d
    }

    /// Check that `solution` has one point per figure vertex.
    pub fn check_solution(&self, solution: &[Point]) -> Result<(), ProblemError> {
        if solution.len() != self.vertex_count() {
            return Err(ProblemError::SolutionLength {
                expected: self.vertex_count(),
                got: solution.len(),
            });
        }
        Ok(())
    }

    /// Check that every selected index names a figure vertex.
    pub fn check_selected(&self, selected: &[usize]) -> Result<(), ProblemError> {
        let count = self.vertex_count();
        match selected.iter().find(|&&v| v >= count) {
            Some(&vertex) => Err(ProblemError::SelectedOutOfRange { vertex, count }),
            None => Ok(()),
        }
    }
}
