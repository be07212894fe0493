//! Process-wide owner of the sliding window
//!
//! `WindowStore` is constructed once at startup and shared by cloning the
//! handle. Every access goes through one mutex, so a merge (before
//! snapshot, insert/evict loop, after snapshot, average) is atomic with
//! respect to every other merge or read.

use super::sliding::SlidingWindow;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Result of one merge, serialized as the `/numbers` response body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeResult {
    #[serde(rename = "windowPrevState")]
    pub before: Vec<i64>,
    #[serde(rename = "windowCurrState")]
    pub after: Vec<i64>,
    /// Unfiltered fetch result, echoed verbatim
    #[serde(rename = "numbers")]
    pub candidates: Vec<i64>,
    pub avg: f64,
}

/// Point-in-time view without mutation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowState {
    #[serde(rename = "windowCurrState")]
    pub entries: Vec<i64>,
    pub avg: f64,
    pub capacity: usize,
}

#[derive(Debug, Clone)]
pub struct WindowStore {
    inner: Arc<Mutex<SlidingWindow>>,
}

impl WindowStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SlidingWindow::new(capacity))),
        }
    }

    // The window is consistent after every single insert step, so a
    // poisoned guard is still safe to use.
    fn lock(&self) -> MutexGuard<'_, SlidingWindow> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Merge fetched numbers into the window and report both snapshots
    ///
    /// This is the only mutation path for the window.
    pub fn merge_and_snapshot(&self, candidates: Vec<i64>) -> MergeResult {
        let mut window = self.lock();

        let before = window.snapshot();
        let stats = window.merge(&candidates);
        let after = window.snapshot();
        let avg = window.average();
        drop(window);

        log::debug!(
            "Merged {} candidates: {} inserted, {} duplicates, {} evicted (len {})",
            candidates.len(),
            stats.inserted,
            stats.duplicates,
            stats.evicted,
            after.len()
        );

        MergeResult {
            before,
            after,
            candidates,
            avg,
        }
    }

    pub fn state(&self) -> WindowState {
        let window = self.lock();
        WindowState {
            entries: window.snapshot(),
            avg: window.average(),
            capacity: window.capacity(),
        }
    }
}

impl Default for WindowStore {
    fn default() -> Self {
        Self::new(super::sliding::WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_empty_then_primes() {
        let store = WindowStore::default();

        let result = store.merge_and_snapshot(vec![2, 3, 5, 7]);

        assert!(result.before.is_empty());
        assert_eq!(result.after, vec![2, 3, 5, 7]);
        assert_eq!(result.candidates, vec![2, 3, 5, 7]);
        assert_eq!(result.avg, 4.25);
    }

    #[test]
    fn test_scenario_fibonacci_after_primes() {
        let store = WindowStore::default();
        store.merge_and_snapshot(vec![2, 3, 5, 7]);

        let result = store.merge_and_snapshot(vec![1, 1, 2, 3, 5]);

        assert_eq!(result.before, vec![2, 3, 5, 7]);
        assert_eq!(result.after, vec![2, 3, 5, 7, 1]);
        // Echoed unfiltered
        assert_eq!(result.candidates, vec![1, 1, 2, 3, 5]);
        assert_eq!(result.avg, 3.6);
    }

    #[test]
    fn test_duplicate_only_merge_keeps_snapshots_equal() {
        let store = WindowStore::default();
        store.merge_and_snapshot(vec![9, 14, 27, 32]);

        let result = store.merge_and_snapshot(vec![32, 9]);

        assert_eq!(result.before, result.after);
        assert_eq!(result.after, vec![9, 14, 27, 32]);
    }

    #[test]
    fn test_empty_store_average_is_zero() {
        let store = WindowStore::default();
        let result = store.merge_and_snapshot(Vec::new());
        assert_eq!(result.avg, 0.0);
        assert!(result.after.is_empty());

        let state = store.state();
        assert_eq!(state.capacity, 10);
        assert_eq!(state.avg, 0.0);
    }

    #[test]
    fn test_clones_share_one_window() {
        let store = WindowStore::new(3);
        let other = store.clone();

        store.merge_and_snapshot(vec![1, 2]);
        let result = other.merge_and_snapshot(vec![3, 4]);

        assert_eq!(result.before, vec![1, 2]);
        assert_eq!(result.after, vec![2, 3, 4]);
        assert_eq!(store.state().entries, vec![2, 3, 4]);
    }

    #[test]
    fn test_response_field_names() {
        let result = MergeResult {
            before: vec![],
            after: vec![2],
            candidates: vec![2],
            avg: 2.0,
        };

        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "windowPrevState": [],
                "windowCurrState": [2],
                "numbers": [2],
                "avg": 2.0
            })
        );
    }

    #[test]
    fn test_concurrent_merges_preserve_invariants() {
        let store = WindowStore::new(10);
        let mut handles = Vec::new();

        for t in 0..8i64 {
            let store = store.clone();
            handles.push(std::thread::spawn(move || {
                for i in 0..200i64 {
                    let result = store.merge_and_snapshot(vec![i % 17, t * 1000 + i, i % 5]);
                    assert!(result.after.len() <= 10);
                    let mut sorted = result.after.clone();
                    sorted.sort_unstable();
                    sorted.dedup();
                    assert_eq!(sorted.len(), result.after.len());
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let state = store.state();
        assert_eq!(state.entries.len(), 10);
    }
}
