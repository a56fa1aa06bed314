//! Tests for the undo/redo history as the canvases use it.

use podium::history::History;

fn contents(history: &History<char>) -> String {
    history.iter().collect()
}

fn committed(capacity: usize, snapshots: &str) -> History<char> {
    let mut history = History::with_capacity('_', capacity);
    for c in snapshots.chars() {
        history.commit(c);
    }
    history
}

// === Round trip ===

#[test]
fn undo_then_redo_round_trips_below_capacity() {
    let capacity = 6;
    for n in 0..capacity {
        let letters: String = ('a'..='z').take(n).collect();
        let mut history = committed(capacity, &letters);
        let latest = *history.current();

        for _ in 0..n {
            history.undo();
        }
        assert_eq!(*history.current(), '_', "after {n} undos");

        for _ in 0..n {
            history.redo();
        }
        assert_eq!(*history.current(), latest, "after {n} redos");
    }
}

#[test]
fn floor_and_tail_are_noops() {
    let mut history = committed(4, "ab");
    assert_eq!(*history.redo(), 'b');
    assert_eq!(history.position(), 2);

    history.undo();
    history.undo();
    assert_eq!(*history.undo(), '_');
    assert_eq!(history.position(), 0);
    assert_eq!(contents(&history), "_ab");
}

// === Editing after undo ===

#[test]
fn commit_after_undo_discards_redo_states() {
    let mut history = committed(5, "abc");
    history.undo();
    history.commit('x');
    assert_eq!(contents(&history), "_abx");
    assert!(!history.can_redo());
    assert_eq!(*history.redo(), 'x');
}

// === Eviction ===

#[test]
fn length_never_exceeds_capacity() {
    let mut history = History::with_capacity(0u32, 3);
    for i in 1..=20 {
        history.commit(i);
        assert!(history.len() <= 3);
        assert_eq!(history.position(), history.len() - 1);
    }
}

#[test]
fn undo_floor_is_oldest_retained_snapshot() {
    let mut history = committed(3, "abcdefg");
    let oldest = *history.iter().next().unwrap();
    for _ in 0..10 {
        history.undo();
    }
    assert_eq!(*history.current(), oldest);
    assert_eq!(oldest, 'e');
}

#[test]
fn capacity_three_scenario() {
    let mut history = committed(3, "ABCD");
    assert_eq!(contents(&history), "BCD");
    assert_eq!(history.position(), 2);

    history.undo();
    history.undo();
    assert_eq!(history.position(), 0);
    assert_eq!(*history.current(), 'B');

    history.commit('E');
    assert_eq!(contents(&history), "BE");
    assert_eq!(*history.redo(), 'E');
    assert_eq!(history.position(), 1);
}
