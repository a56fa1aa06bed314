//! Bounded, linear undo/redo history of canvas snapshots.
//!
//! The history always holds at least one snapshot and a cursor
//! (`position`) to the one currently displayed. Entries after the cursor
//! are redo-able; committing while entries exist after the cursor drops
//! them (no branching). Once more than `capacity` snapshots are held the
//! oldest is evicted, so after enough commits the undo floor is the oldest
//! retained snapshot rather than the blank canvas the history was seeded
//! with.
//!
//! ```
//! use podium::history::History;
//!
//! let mut history = History::with_capacity("blank", 3);
//! history.commit("a");
//! history.commit("b");
//! assert_eq!(*history.undo(), "a");
//! assert_eq!(*history.redo(), "b");
//! ```

use std::collections::VecDeque;

use crate::model::HISTORY_CAPACITY;

#[derive(Debug, Clone)]
pub struct History<S> {
    snapshots: VecDeque<S>,
    position: usize,
    capacity: usize,
}

impl<S> History<S> {
    /// Seed a history holding exactly `blank`, with the default capacity.
    pub fn new(blank: S) -> Self {
        Self::with_capacity(blank, HISTORY_CAPACITY)
    }

    /// Seed a history holding exactly `blank`.
    ///
    /// A capacity below 1 is raised to 1 so the history is never empty.
    pub fn with_capacity(blank: S, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut snapshots = VecDeque::with_capacity(capacity + 1);
        snapshots.push_back(blank);
        Self {
            snapshots,
            position: 0,
            capacity,
        }
    }

    /// Record a newly committed state and make it current.
    ///
    /// Redo states after the cursor are discarded first. If the history
    /// then exceeds its capacity the oldest snapshot is evicted.
    pub fn commit(&mut self, snapshot: S) {
        self.snapshots.truncate(self.position + 1);
        self.snapshots.push_back(snapshot);
        while self.snapshots.len() > self.capacity {
            self.snapshots.pop_front();
        }
        self.position = self.snapshots.len() - 1;
    }

    /// Step back one state. At the floor this returns the current state.
    pub fn undo(&mut self) -> &S {
        if self.position > 0 {
            self.position -= 1;
        }
        self.current()
    }

    /// Step forward one state. At the tail this returns the current state.
    pub fn redo(&mut self) -> &S {
        if self.position + 1 < self.snapshots.len() {
            self.position += 1;
        }
        self.current()
    }

    /// Drop every snapshot and reseed with `blank`.
    pub fn clear(&mut self, blank: S) {
        self.snapshots.clear();
        self.snapshots.push_back(blank);
        self.position = 0;
    }

    pub fn current(&self) -> &S {
        // position < len is maintained by every mutator
        &self.snapshots[self.position]
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position + 1 < self.snapshots.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Snapshots from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &S> {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(history: &History<char>) -> Vec<char> {
        history.iter().copied().collect()
    }

    #[test]
    fn starts_with_single_blank() {
        let history = History::new('_');
        assert_eq!(history.len(), 1);
        assert_eq!(history.position(), 0);
        assert_eq!(*history.current(), '_');
        assert_eq!(history.capacity(), HISTORY_CAPACITY);
    }

    #[test]
    fn commit_moves_cursor_to_tail() {
        let mut history = History::new('_');
        history.commit('a');
        history.commit('b');
        assert_eq!(history.position(), 2);
        assert_eq!(*history.current(), 'b');
    }

    #[test]
    fn undo_at_floor_is_noop() {
        let mut history = History::new('_');
        assert_eq!(*history.undo(), '_');
        assert_eq!(history.position(), 0);
        assert!(!history.can_undo());
    }

    #[test]
    fn redo_at_tail_is_noop() {
        let mut history = History::new('_');
        history.commit('a');
        assert_eq!(*history.redo(), 'a');
        assert_eq!(history.position(), 1);
        assert!(!history.can_redo());
    }

    #[test]
    fn commit_after_undo_discards_future() {
        let mut history = History::new('_');
        history.commit('a');
        history.commit('b');
        history.commit('c');
        history.undo();
        history.undo();
        history.commit('x');
        assert_eq!(contents(&history), vec!['_', 'a', 'x']);
        assert_eq!(*history.redo(), 'x');
    }

    #[test]
    fn eviction_drops_oldest_including_blank() {
        let mut history = History::with_capacity('_', 3);
        for c in ['a', 'b', 'c'] {
            history.commit(c);
        }
        assert_eq!(contents(&history), vec!['a', 'b', 'c']);
        assert_eq!(history.position(), 2);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut history = History::with_capacity('_', 0);
        history.commit('a');
        assert_eq!(contents(&history), vec!['a']);
        assert_eq!(*history.undo(), 'a');
    }

    #[test]
    fn clear_reseeds() {
        let mut history = History::new('_');
        history.commit('a');
        history.commit('b');
        history.undo();
        history.clear('.');
        assert_eq!(contents(&history), vec!['.']);
        assert_eq!(history.position(), 0);
        assert!(!history.can_redo());
    }
}
