//! Lattice placement of a figure graph inside a hole polygon.
//!
//! Layers, bottom up:
//! - `geom`: points, segments, the hole polygon and its inside test.
//! - `problem`: validated problem instance and derived graph tables.
//! - `oracle`: pure validity predicates and dislikes scoring.
//! - `search`: generic lazy DFS / bounded best-first engine.
//! - `solve`: placement heuristics built on the engine.
//! - `optimize`, `relax`: local improvement of complete placements.
//!
//! Everything is single-threaded and pull-driven; long runs are bounded by a
//! `search::Cancel` signal supplied by the caller.

pub mod geom;
pub mod optimize;
pub mod oracle;
pub mod problem;
pub mod relax;
pub mod search;
pub mod solve;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::{Point, Polygon, Segment};
pub use problem::{Edge, Placement, Problem, ProblemError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::geom::{Point, Polygon, Segment, EPS};
    pub use crate::optimize::{optimize, Objective, OptimizeCfg};
    pub use crate::oracle::{dislikes, validate, Validation};
    pub use crate::problem::{Edge, Placement, Problem, ProblemError};
    pub use crate::relax::{rubber_band, RelaxCfg};
    pub use crate::search::{AnyOf, Cancel, Deadline, Never, SearchNode, Strategy};
    pub use crate::solve::{
        brute_force, corner_matching, incremental_brute_force, refine, RefineCfg,
    };
}
