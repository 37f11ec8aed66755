//! Engine run metrics.
//!
//! Counters collected while a matcher runs. They are cheap (a handful of
//! integer increments per step) and always on; the verbose API and the CLI
//! report surface them.
//!
//! ## Design notes
//!
//! - `BacktrackMetrics::max_stack_depth` never exceeds the input length in
//!   chars.
//! - `MemoMetrics::entries` never exceeds `(|text| + 1) * (|pattern| + 1)`.

use std::time::Duration;

/// Counters for one [`BacktrackingMatcher`](super::BacktrackingMatcher) run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackMetrics {
    /// Number of state transitions taken.
    pub steps: usize,
    /// Resume points pushed.
    pub pushes: usize,
    /// Resume points popped.
    pub pops: usize,
    pub max_stack_depth: usize,
    pub duration: Duration,
}

/// Counters for one [`MemoizedMatcher`](super::MemoizedMatcher) run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MemoMetrics {
    /// Subproblems entered, including ones answered from the table.
    pub calls: usize,
    /// Calls answered from the table.
    pub hits: usize,
    /// Subproblems solved and stored.
    pub entries: usize,
    pub max_depth: usize,
    pub duration: Duration,
}
