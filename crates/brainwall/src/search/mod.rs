//! Generic lazy tree search over arbitrary state and move types.
//!
//! Purpose
//! - Drive every placement heuristic through one engine: the caller supplies a
//!   root state and an expansion function `&node -> children`, picks a
//!   strategy, and consumes the resulting node iterator.
//!
//! Model
//! - `SearchNode` owns its state; `extend` copies, so branches never alias.
//! - `DepthFirst`: LIFO over lazily produced children (backtracking).
//! - `BestFirst`: capacity-bounded frontier ordered by a state comparator;
//!   overflow evicts the worst entry (beam-like, lossy by construction).
//! - Both poll a `Cancel` signal on every pull and simply end the sequence
//!   when it fires. Dropping the iterator stops all further work.
//!
//! Code cross-refs: `solve::{brute_force, corner, refine}`

mod best_first;
mod cancel;
mod dfs;
mod node;

use std::cmp::Ordering;

pub use best_first::{BestFirst, BestFirstCfg};
pub use cancel::{AnyOf, Cancel, Deadline, Never};
pub use dfs::DepthFirst;
pub use node::SearchNode;

/// A way of enumerating a search tree.
pub trait Strategy<'a, S, M> {
    /// Lazily enumerate nodes reachable from `root` via `expand`.
    fn search<C, E, I>(
        self,
        root: SearchNode<S, M>,
        cancel: C,
        expand: E,
    ) -> Box<dyn Iterator<Item = SearchNode<S, M>> + 'a>
    where
        C: Cancel + 'a,
        E: FnMut(&SearchNode<S, M>) -> I + 'a,
        I: IntoIterator<Item = SearchNode<S, M>> + 'a,
        I::IntoIter: 'a;
}

/// Exhaustive depth-first backtracking.
#[derive(Clone, Copy, Debug, Default)]
pub struct DepthFirstSearch;

impl<'a, S: 'a, M: 'a> Strategy<'a, S, M> for DepthFirstSearch {
    fn search<C, E, I>(
        self,
        root: SearchNode<S, M>,
        cancel: C,
        expand: E,
    ) -> Box<dyn Iterator<Item = SearchNode<S, M>> + 'a>
    where
        C: Cancel + 'a,
        E: FnMut(&SearchNode<S, M>) -> I + 'a,
        I: IntoIterator<Item = SearchNode<S, M>> + 'a,
        I::IntoIter: 'a,
    {
        Box::new(DepthFirst::new(root, cancel, expand))
    }
}

/// Capacity-bounded best-first search; `cmp` returns `Less` for the better state.
#[derive(Clone, Copy, Debug)]
pub struct BestFirstSearch<F> {
    pub cmp: F,
    pub cfg: BestFirstCfg,
}

impl<F> BestFirstSearch<F> {
    pub fn new(cmp: F) -> Self {
        Self {
            cmp,
            cfg: BestFirstCfg::default(),
        }
    }

    pub fn with_cfg(cmp: F, cfg: BestFirstCfg) -> Self {
        Self { cmp, cfg }
    }
}

impl<'a, S, M, F> Strategy<'a, S, M> for BestFirstSearch<F>
where
    S: Clone + 'a,
    M: Clone + 'a,
    F: Fn(&S, &S) -> Ordering + 'a,
{
    fn search<C, E, I>(
        self,
        root: SearchNode<S, M>,
        cancel: C,
        expand: E,
    ) -> Box<dyn Iterator<Item = SearchNode<S, M>> + 'a>
    where
        C: Cancel + 'a,
        E: FnMut(&SearchNode<S, M>) -> I + 'a,
        I: IntoIterator<Item = SearchNode<S, M>> + 'a,
        I::IntoIter: 'a,
    {
        Box::new(BestFirst::new(root, self.cmp, self.cfg, cancel, expand))
    }
}

/// Start a search from a bare root state.
pub fn search<'a, S, M, St, C, E, I>(
    root: S,
    strategy: St,
    cancel: C,
    expand: E,
) -> Box<dyn Iterator<Item = SearchNode<S, M>> + 'a>
where
    St: Strategy<'a, S, M>,
    C: Cancel + 'a,
    E: FnMut(&SearchNode<S, M>) -> I + 'a,
    I: IntoIterator<Item = SearchNode<S, M>> + 'a,
    I::IntoIter: 'a,
{
    strategy.search(SearchNode::root(root), cancel, expand)
}
