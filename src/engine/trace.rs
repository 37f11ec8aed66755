//! Transition observers.
//!
//! The backtracking matcher reports every state transition to a
//! [`StepObserver`]. Observers only see copies of the cursor, so nothing they
//! do can influence the outcome.
//!
//! - [`NoTrace`] is the default and compiles down to nothing.
//! - [`DebugTrace`] prints one line per transition to stderr.
//! - [`StepRecorder`] keeps snapshots in memory (verbose API, tests).

use super::backtrack::ControlState;

/// Returns true when `REGMATCH_DEBUG` is set in the environment.
pub(crate) fn debug_enabled() -> bool {
    std::env::var_os("REGMATCH_DEBUG").is_some()
}

/// Copy of the automaton's position after one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorSnapshot {
    /// 1-based transition counter.
    pub step: usize,
    /// State the transition left the cursor in.
    pub state: ControlState,
    pub string_index: usize,
    pub atom_index: usize,
    pub stack_depth: usize,
}

/// Receives a snapshot after every transition of a matching run.
pub trait StepObserver {
    fn on_step(&mut self, snapshot: &CursorSnapshot);
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl StepObserver for NoTrace {
    #[inline(always)]
    fn on_step(&mut self, _snapshot: &CursorSnapshot) {}
}

/// Prints `[step] ...` lines to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugTrace;

impl DebugTrace {
    pub(crate) fn line(s: &CursorSnapshot) -> String {
        format!(
            "[step] n={} state={:?} s_idx={} atom_idx={} stack={}",
            s.step, s.state, s.string_index, s.atom_index, s.stack_depth
        )
    }
}

impl StepObserver for DebugTrace {
    fn on_step(&mut self, s: &CursorSnapshot) {
        eprintln!("{}", DebugTrace::line(s));
    }
}

/// Keeps up to `limit` snapshots and counts the rest.
#[derive(Debug, Clone)]
pub struct StepRecorder {
    limit: usize,
    steps: Vec<CursorSnapshot>,
    dropped: usize,
}

impl StepRecorder {
    pub fn new(limit: usize) -> Self {
        StepRecorder { limit, steps: Vec::new(), dropped: 0 }
    }

    pub fn steps(&self) -> &[CursorSnapshot] {
        &self.steps
    }

    /// Snapshots seen after the limit was reached.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn into_steps(self) -> Vec<CursorSnapshot> {
        self.steps
    }
}

impl StepObserver for StepRecorder {
    fn on_step(&mut self, snapshot: &CursorSnapshot) {
        if self.steps.len() < self.limit {
            self.steps.push(*snapshot);
        } else {
            self.dropped += 1;
        }
    }
}

impl<T: StepObserver + ?Sized> StepObserver for &mut T {
    fn on_step(&mut self, snapshot: &CursorSnapshot) {
        (**self).on_step(snapshot);
    }
}

/// Both observers see every snapshot, first `.0` then `.1`.
impl<A: StepObserver, B: StepObserver> StepObserver for (A, B) {
    fn on_step(&mut self, snapshot: &CursorSnapshot) {
        self.0.on_step(snapshot);
        self.1.on_step(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(step: usize) -> CursorSnapshot {
        CursorSnapshot { step, state: ControlState::TryMatchAtom, string_index: 0, atom_index: 0, stack_depth: 0 }
    }

    #[test]
    fn recorder_caps_and_counts() {
        let mut rec = StepRecorder::new(2);
        for i in 1..=5 {
            rec.on_step(&snap(i));
        }
        assert_eq!(rec.steps().len(), 2);
        assert_eq!(rec.steps()[1].step, 2);
        assert_eq!(rec.dropped(), 3);
    }

    #[test]
    fn mut_ref_forwards() {
        fn feed<O: StepObserver>(mut observer: O) {
            observer.on_step(&snap(1));
        }

        let mut rec = StepRecorder::new(10);
        feed(&mut rec);
        feed(&mut rec);
        assert_eq!(rec.into_steps().len(), 2);
    }

    #[test]
    fn pair_feeds_both_sides() {
        let mut left = StepRecorder::new(1);
        let mut right = StepRecorder::new(10);
        let mut pair = (&mut left, &mut right);
        for i in 1..=3 {
            pair.on_step(&snap(i));
        }
        assert_eq!((left.steps().len(), left.dropped()), (1, 2));
        assert_eq!(right.steps().len(), 3);
    }

    #[test]
    fn debug_line_names_every_field() {
        let s = CursorSnapshot {
            step: 7,
            state: ControlState::AttemptBacktrack,
            string_index: 3,
            atom_index: 1,
            stack_depth: 2,
        };
        assert_eq!(DebugTrace::line(&s), "[step] n=7 state=AttemptBacktrack s_idx=3 atom_idx=1 stack=2");
    }

    #[test]
    fn debug_trace_observes_a_full_run() {
        let matcher = crate::BacktrackingMatcher::new("a*ab").unwrap();
        let mut trace = DebugTrace;
        let mut rec = StepRecorder::new(usize::MAX);
        let outcome = matcher.run("aab", (&mut trace, &mut rec));
        assert!(outcome.matched);
        assert_eq!(rec.steps().len(), outcome.metrics.steps);
        assert_eq!(rec.steps().last().map(|s| s.state), Some(ControlState::Success));
    }
}
