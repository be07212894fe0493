//! Bounded, deduplicated, insertion-ordered window of integers

use std::collections::VecDeque;

/// Default window capacity
pub const WINDOW_SIZE: usize = 10;

/// Per-merge bookkeeping, used for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub inserted: usize,
    pub duplicates: usize,
    pub evicted: usize,
}

/// Fixed-capacity FIFO of distinct integers
///
/// Entries are kept in arrival order. A value already resident is never
/// re-inserted or moved. When the window is full, inserting a new value
/// evicts the oldest entry first.
///
/// Membership is a linear scan over at most `capacity` entries.
#[derive(Debug, Clone)]
pub struct SlidingWindow {
    entries: VecDeque<i64>,
    capacity: usize,
}

impl SlidingWindow {
    /// Create an empty window. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, value: i64) -> bool {
        self.entries.contains(&value)
    }

    /// Copy of the entries, oldest first
    pub fn snapshot(&self) -> Vec<i64> {
        self.entries.iter().copied().collect()
    }

    /// Insert a single value. Returns false if it was already present.
    pub fn insert(&mut self, value: i64) -> bool {
        self.insert_tracked(value).0
    }

    fn insert_tracked(&mut self, value: i64) -> (bool, bool) {
        if self.contains(value) {
            return (false, false);
        }

        let evicted = if self.entries.len() == self.capacity {
            self.entries.pop_front().is_some()
        } else {
            false
        };

        self.entries.push_back(value);
        (true, evicted)
    }

    /// Fold candidates into the window in iteration order
    pub fn merge(&mut self, candidates: &[i64]) -> MergeStats {
        let mut stats = MergeStats::default();

        for &candidate in candidates {
            match self.insert_tracked(candidate) {
                (true, evicted) => {
                    stats.inserted += 1;
                    if evicted {
                        stats.evicted += 1;
                    }
                }
                (false, _) => stats.duplicates += 1,
            }
        }

        stats
    }

    /// Mean of the entries rounded to 2 decimals, 0.0 when empty
    pub fn average(&self) -> f64 {
        super::average::rounded_mean(self.entries.iter().copied())
    }
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self::new(WINDOW_SIZE)
    }
}
