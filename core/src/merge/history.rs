use std::collections::VecDeque;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::*;

/// State captured before a move so it can be undone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub board: Array2<Tile>,
    pub score: u32,
    pub move_count: u32,
}

/// Fixed-capacity undo stack; pushing past capacity evicts the oldest entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl History {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, entry: HistoryEntry) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u32) -> HistoryEntry {
        HistoryEntry {
            board: Array2::default([2, 2]),
            score,
            move_count: score,
        }
    }

    #[test]
    fn evicts_oldest_past_capacity() {
        let mut history = History::new(10);
        for score in 0..12 {
            history.push(entry(score));
        }

        assert_eq!(history.len(), 10);
        let mut popped = Vec::new();
        while let Some(entry) = history.pop() {
            popped.push(entry.score);
        }
        assert_eq!(popped, (2..12).rev().collect::<Vec<_>>());
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut history = History::new(0);
        history.push(entry(1));
        assert!(history.is_empty());
    }
}
