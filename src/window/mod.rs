//! Window Store - bounded deduplicated number window
//!
//! # Architecture
//!
//! ```text
//! Fetch result (Vec<i64>)
//!     ↓
//! WindowStore::merge_and_snapshot  (single mutex)
//!     ├─ before snapshot
//!     ├─ SlidingWindow::merge      (skip duplicates, FIFO evict)
//!     ├─ after snapshot
//!     └─ rounded_mean
//!     ↓
//! MergeResult → JSON response
//! ```

pub mod average;
pub mod sliding;
pub mod store;

pub use average::rounded_mean;
pub use sliding::{MergeStats, SlidingWindow, WINDOW_SIZE};
pub use store::{MergeResult, WindowState, WindowStore};
