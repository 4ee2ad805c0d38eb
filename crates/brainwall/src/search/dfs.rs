//! Depth-first backtracking over lazily produced children.

use super::cancel::Cancel;
use super::node::SearchNode;

/// Depth-first enumeration; yields the root, then every child in pre-order.
///
/// The stack holds one child iterator per open level, so memory is
/// proportional to depth and children are produced only when pulled.
/// `expand` is called when a node is yielded to obtain its (lazy) children.
pub struct DepthFirst<S, M, C, E, I>
where
    I: IntoIterator<Item = SearchNode<S, M>>,
{
    root: Option<SearchNode<S, M>>,
    stack: Vec<I::IntoIter>,
    cancel: C,
    expand: E,
    done: bool,
}

impl<S, M, C, E, I> DepthFirst<S, M, C, E, I>
where
    C: Cancel,
    E: FnMut(&SearchNode<S, M>) -> I,
    I: IntoIterator<Item = SearchNode<S, M>>,
{
    pub fn new(root: SearchNode<S, M>, cancel: C, expand: E) -> Self {
        Self {
            root: Some(root),
            stack: Vec::new(),
            cancel,
            expand,
            done: false,
        }
    }

    #[inline]
    fn open(&mut self, node: &SearchNode<S, M>) {
        let children = (self.expand)(node).into_iter();
        self.stack.push(children);
    }
}

impl<S, M, C, E, I> Iterator for DepthFirst<S, M, C, E, I>
where
    C: Cancel,
    E: FnMut(&SearchNode<S, M>) -> I,
    I: IntoIterator<Item = SearchNode<S, M>>,
{
    type Item = SearchNode<S, M>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            if self.cancel.is_cancelled() {
                self.done = true;
                self.stack.clear();
                return None;
            }
            if let Some(root) = self.root.take() {
                self.open(&root);
                return Some(root);
            }
            let Some(top) = self.stack.last_mut() else {
                self.done = true;
                return None;
            };
            match top.next() {
                Some(child) => {
                    self.open(&child);
                    return Some(child);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
