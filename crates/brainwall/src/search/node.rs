//! Search node: owned state snapshot plus the move path that reached it.

/// One node of the search tree.
///
/// Invariants:
/// - `depth == moves.len()` for nodes built via `root`/`extend`.
/// - The state is owned; children never share mutable state with the parent.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchNode<S, M> {
    pub state: S,
    pub depth: usize,
    pub moves: Vec<M>,
}

impl<S, M> SearchNode<S, M> {
    #[inline]
    pub fn root(state: S) -> Self {
        Self {
            state,
            depth: 0,
            moves: Vec::new(),
        }
    }

    /// Child with `state`, one level deeper, `mv` appended to the path.
    pub fn extend(&self, state: S, mv: M) -> Self
    where
        M: Clone,
    {
        let mut moves = Vec::with_capacity(self.moves.len() + 1);
        moves.extend_from_slice(&self.moves);
        moves.push(mv);
        Self {
            state,
            depth: self.depth + 1,
            moves,
        }
    }

    /// Copy the parent's state, apply `edit`, and extend with the result.
    pub fn extend_with(&self, mv: M, edit: impl FnOnce(&mut S)) -> Self
    where
        S: Clone,
        M: Clone,
    {
        let mut state = self.state.clone();
        edit(&mut state);
        self.extend(state, mv)
    }

    #[inline]
    pub fn last_move(&self) -> Option<&M> {
        self.moves.last()
    }
}
