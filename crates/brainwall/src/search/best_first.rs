//! Capacity-bounded best-first search.
//!
//! The frontier is an ordered set keyed by the caller's state comparator with
//! an insertion counter as tiebreak, so both the best entry (next to expand)
//! and the worst entry (next to evict) are reachable in `O(log n)`.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::rc::Rc;

use super::cancel::Cancel;
use super::node::SearchNode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestFirstCfg {
    /// Maximum frontier size; overflow evicts the worst-ranked entry.
    pub capacity: usize,
}

impl Default for BestFirstCfg {
    fn default() -> Self {
        Self { capacity: 100_000 }
    }
}

struct Ranked<S, M, F> {
    node: SearchNode<S, M>,
    seq: u64,
    cmp: Rc<F>,
}

impl<S, M, F: Fn(&S, &S) -> Ordering> Ord for Ranked<S, M, F> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.cmp)(&self.node.state, &other.node.state).then(self.seq.cmp(&other.seq))
    }
}

impl<S, M, F: Fn(&S, &S) -> Ordering> PartialOrd for Ranked<S, M, F> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S, M, F: Fn(&S, &S) -> Ordering> PartialEq for Ranked<S, M, F> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S, M, F: Fn(&S, &S) -> Ordering> Eq for Ranked<S, M, F> {}

/// Best-first enumeration.
///
/// Each pull first expands the node yielded by the previous pull, then pops
/// and yields the best frontier entry. Equal-ranked nodes come out in
/// insertion order. The root is the first node yielded.
pub struct BestFirst<S, M, C, E, F> {
    frontier: BTreeSet<Ranked<S, M, F>>,
    pending: Option<SearchNode<S, M>>,
    cmp: Rc<F>,
    capacity: usize,
    seq: u64,
    evicted: u64,
    peak: usize,
    cancel: C,
    expand: E,
}

impl<S, M, C, E, F, I> BestFirst<S, M, C, E, F>
where
    S: Clone,
    M: Clone,
    C: Cancel,
    E: FnMut(&SearchNode<S, M>) -> I,
    I: IntoIterator<Item = SearchNode<S, M>>,
    F: Fn(&S, &S) -> Ordering,
{
    pub fn new(root: SearchNode<S, M>, cmp: F, cfg: BestFirstCfg, cancel: C, expand: E) -> Self {
        let mut this = Self {
            frontier: BTreeSet::new(),
            pending: None,
            cmp: Rc::new(cmp),
            capacity: cfg.capacity.max(1),
            seq: 0,
            evicted: 0,
            peak: 0,
            cancel,
            expand,
        };
        this.push(root);
        this
    }

    #[inline]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    /// Largest frontier size observed so far.
    #[inline]
    pub fn peak_frontier(&self) -> usize {
        self.peak
    }

    /// Entries dropped because the frontier was full.
    #[inline]
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    fn push(&mut self, node: SearchNode<S, M>) {
        let seq = self.seq;
        self.seq += 1;
        let entry = Ranked {
            node,
            seq,
            cmp: Rc::clone(&self.cmp),
        };
        if self.frontier.len() >= self.capacity {
            self.evicted += 1;
            // the newcomer loses ties: its sequence number is the largest
            if self.frontier.last().is_some_and(|worst| entry > *worst) {
                return;
            }
            self.frontier.pop_last();
        }
        self.frontier.insert(entry);
        self.peak = self.peak.max(self.frontier.len());
    }
}

impl<S, M, C, E, F, I> Iterator for BestFirst<S, M, C, E, F>
where
    S: Clone,
    M: Clone,
    C: Cancel,
    E: FnMut(&SearchNode<S, M>) -> I,
    I: IntoIterator<Item = SearchNode<S, M>>,
    F: Fn(&S, &S) -> Ordering,
{
    type Item = SearchNode<S, M>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cancel.is_cancelled() {
            self.pending = None;
            self.frontier.clear();
            return None;
        }
        if let Some(parent) = self.pending.take() {
            for child in (self.expand)(&parent) {
                if self.cancel.is_cancelled() {
                    self.frontier.clear();
                    return None;
                }
                self.push(child);
            }
        }
        let best = self.frontier.pop_first()?.node;
        self.pending = Some(best.clone());
        Some(best)
    }
}
