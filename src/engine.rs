//! Matching engines.
//!
//! Two independent decision procedures answer the same question: does `text`
//! match `pattern` in full? They share no code beyond the input types, so each
//! can be used to check the other.
//!
//! ```text
//!                 ┌─ compile()              (compiler.rs)
//! pattern ────────┤     │ AtomSequence
//!                 │     v
//!                 │  BacktrackingMatcher    (backtrack.rs)
//!                 │     - explicit state machine + LIFO resume stack
//!                 │     - StepObserver per transition (trace.rs)
//!                 │                                          ├─ bool
//!                 └─ MemoizedMatcher        (memo.rs)        │
//!                       - recurrence over raw indices        │
//!                       - (s, p) memo table                 ─┘
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compiler.rs`: turns pattern text into an `AtomSequence`, rejecting
//!   unbound `*` and collapsing redundant repeat pairs.
//! - `backtrack.rs`: the fast path. No recursion; stack depth is bounded by the
//!   input length. Exponential in the worst case on uncompressed repeat chains.
//! - `memo.rs`: the reference oracle. O(|text| * |pattern|) time and space,
//!   total over any pattern string.
//! - `trace.rs`: the transition observer side-channel.
//! - `metrics.rs`: per-run counters and timings.
//!
//! ## Debugging
//!
//! Set `REGMATCH_DEBUG=1` to print compile summaries and, from the CLI, one
//! line per automaton transition.

#[path = "engine/backtrack.rs"]
mod backtrack;
#[path = "engine/compiler.rs"]
mod compiler;
#[path = "engine/memo.rs"]
mod memo;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/trace.rs"]
mod trace;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use backtrack::{BacktrackEntry, BacktrackingMatcher, ControlState, MatchCursor, MatchOutcome};
pub use compiler::{CompileOptions, compile, compile_with};
pub use memo::{MemoOutcome, MemoizedMatcher};
pub use metrics::{BacktrackMetrics, MemoMetrics};
pub use trace::{CursorSnapshot, DebugTrace, NoTrace, StepObserver, StepRecorder};
pub(crate) use trace::debug_enabled;
