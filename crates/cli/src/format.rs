//! Contest JSON files: problems, solutions, and validation reports.

use anyhow::{Context, Result};
use brainwall::oracle::Validation;
use brainwall::{Edge, Point, Problem};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// `{"hole": [[x,y],..], "epsilon": e, "figure": {"edges": [[a,b],..], "vertices": [[x,y],..]}}`.
///
/// Unknown fields (bonuses and the like) are ignored.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ProblemFile {
    pub hole: Vec<[i64; 2]>,
    pub epsilon: u64,
    pub figure: FigureFile,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct FigureFile {
    pub edges: Vec<[usize; 2]>,
    pub vertices: Vec<[i64; 2]>,
}

/// `{"vertices": [[x,y],..]}`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct SolutionFile {
    pub vertices: Vec<[i64; 2]>,
}

fn point([x, y]: [i64; 2]) -> Point {
    Point::new(x as f64, y as f64)
}

impl ProblemFile {
    pub fn into_problem(self) -> Result<Problem> {
        let hole = self.hole.into_iter().map(point).collect();
        let vertices = self.figure.vertices.into_iter().map(point).collect();
        let edges = self
            .figure
            .edges
            .into_iter()
            .map(|[a, b]| Edge::new(a, b))
            .collect();
        Ok(Problem::new(hole, vertices, edges, self.epsilon)?)
    }
}

impl SolutionFile {
    pub fn points(&self) -> Vec<Point> {
        self.vertices.iter().copied().map(point).collect()
    }

    /// Lattice coordinates; heuristics only produce integral points.
    pub fn from_points(points: &[Point]) -> Self {
        Self {
            vertices: points
                .iter()
                .map(|p| [p.x.round() as i64, p.y.round() as i64])
                .collect(),
        }
    }
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

pub fn read_problem(path: &Path) -> Result<Problem> {
    read_json::<ProblemFile>(path)?
        .into_problem()
        .with_context(|| format!("checking problem {}", path.display()))
}

pub fn read_solution(path: &Path) -> Result<Vec<Point>> {
    Ok(read_json::<SolutionFile>(path)?.points())
}

pub fn report_json(report: &Validation) -> Value {
    json!({
        "valid": report.is_valid(),
        "dislikes": report.dislikes,
        "bad_bounds": report.bad_bounds,
        "bad_lengths": report.bad_lengths,
        "stretch_factors": report.stretch_factors,
    })
}
