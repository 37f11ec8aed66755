//! Backtracking automaton.
//!
//! Walks a compiled [`AtomSequence`] over the input with an explicit control
//! state and an explicit LIFO stack of resume points. There is no recursion, so
//! long inputs cannot overflow the call stack.
//!
//! ## States
//!
//! ```text
//!                 ┌──────────── accepted, repeatable, char present ───┐
//!                 v                                                   │
//!   start ──▶ TryMatchAtom ─────────────────────────────────────────────┘
//!                 │  accepted once / repeat stops
//!                 v
//!          ComputeNextAtom ── atoms left ──▶ TryMatchAtom
//!                 │ atoms done
//!                 ├─ text done ──▶ Success
//!                 v
//!          AttemptBacktrack ◀── rejected, not repeatable
//!                 │ stack empty ──▶ Failure
//!                 └─ pop ──▶ TryMatchAtom
//! ```
//!
//! ## Resume points
//!
//! A repeatable atom consumes greedily. Every time it takes a character at
//! string index `i` it pushes `(i, atom + 1)`: "stop repeating before `i` and
//! carry on with the next atom". Popping entries in LIFO order therefore tries
//! the longest repetition first and gives characters back one at a time.
//!
//! ```text
//! text "aab", atoms [a*][a][b]
//!
//! a* takes s=0   push (0, 1)
//! a* takes s=1   push (1, 1)
//! a* sees 'b'    rejected, move to [a] at s=2
//! [a] sees 'b'   rejected ──▶ pop (1, 1)
//! [a] takes s=1, [b] takes s=2, atoms done, text done ──▶ Success
//! ```
//!
//! Entries are only pushed while consuming input, so the stack never holds
//! more entries than the text has characters. No entry is pushed for the last
//! atom: resuming past it with input left over could never succeed.
//!
//! Nothing is memoized across backtracks. Uncompressed chains such as
//! `a*a*a*a*c` can take exponential time on adversarial input; the compiler's
//! redundancy collapse removes the common cases and
//! [`MemoizedMatcher`](super::MemoizedMatcher) is the bounded alternative.

use super::compiler::{CompileOptions, compile_with};
use super::metrics::BacktrackMetrics;
use super::trace::{CursorSnapshot, NoTrace, StepObserver};
use crate::{AtomSequence, InvalidPatternError, MatchAtom};
use std::cmp::Ordering;
use std::time::Instant;

/// Control state of the automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlState {
    /// Decide whether to finish or test the next atom.
    ComputeNextAtom,
    /// Test the current atom against the current input character.
    TryMatchAtom,
    /// Terminal: the whole text matched the whole sequence.
    Success,
    /// Resume from the most recent saved point, if any.
    AttemptBacktrack,
    /// Terminal: no resume points left.
    Failure,
}

impl ControlState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ControlState::Success | ControlState::Failure)
    }
}

/// A point to resume from when a greedy repetition over-consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacktrackEntry {
    pub string_index: usize,
    pub next_atom_index: usize,
}

/// Working state of one matching run.
///
/// Created fresh by every run and never shared. The transition methods are
/// public so single steps can be driven and inspected from outside.
#[derive(Debug, Clone)]
pub struct MatchCursor {
    state: ControlState,
    string_index: usize,
    atom_index: usize,
    stack: Vec<BacktrackEntry>,
}

impl MatchCursor {
    /// Initial cursor for `atoms`. An empty sequence goes straight to the
    /// finish check.
    pub fn start(atoms: &[MatchAtom]) -> Self {
        let state = if atoms.is_empty() { ControlState::ComputeNextAtom } else { ControlState::TryMatchAtom };
        MatchCursor { state, string_index: 0, atom_index: 0, stack: Vec::new() }
    }

    pub fn state(&self) -> ControlState {
        self.state
    }

    pub fn string_index(&self) -> usize {
        self.string_index
    }

    pub fn atom_index(&self) -> usize {
        self.atom_index
    }

    /// Saved resume points, oldest first.
    pub fn stack(&self) -> &[BacktrackEntry] {
        &self.stack
    }

    pub fn snapshot(&self, step: usize) -> CursorSnapshot {
        CursorSnapshot {
            step,
            state: self.state,
            string_index: self.string_index,
            atom_index: self.atom_index,
            stack_depth: self.stack.len(),
        }
    }

    /// Advance by one transition. Terminal states are left unchanged.
    pub fn step(&mut self, text: &[char], atoms: &[MatchAtom]) {
        match self.state {
            ControlState::ComputeNextAtom => self.compute_next_atom(text.len(), atoms.len()),
            ControlState::TryMatchAtom => self.try_match_atom(text, atoms),
            ControlState::AttemptBacktrack => self.attempt_backtrack(),
            ControlState::Success | ControlState::Failure => {}
        }
    }

    /// Test the current atom against the current input character.
    ///
    /// ```text
    /// atom        accepted, char   accepted, end   rejected
    /// once        s+1, a+1         -               backtrack
    /// repeatable  push, s+1        a+1             a+1
    /// ```
    pub fn try_match_atom(&mut self, text: &[char], atoms: &[MatchAtom]) {
        let Some(atom) = atoms.get(self.atom_index) else {
            self.state = ControlState::ComputeNextAtom;
            return;
        };
        let c = text.get(self.string_index).copied();

        match (atom.repeatable, atom.accepts(c), c) {
            (false, true, _) => {
                self.string_index += 1;
                self.atom_index += 1;
                self.state = ControlState::ComputeNextAtom;
            }
            (false, false, _) => self.state = ControlState::AttemptBacktrack,
            (true, true, Some(_)) => {
                if self.atom_index + 1 < atoms.len() {
                    self.stack.push(BacktrackEntry {
                        string_index: self.string_index,
                        next_atom_index: self.atom_index + 1,
                    });
                }
                self.string_index += 1;
                self.state = ControlState::TryMatchAtom;
            }
            // Input exhausted, or the repetition hit a character it rejects:
            // either way it stops here and the next atom takes over.
            (true, _, _) => {
                self.atom_index += 1;
                self.state = ControlState::ComputeNextAtom;
            }
        }
    }

    /// Finish if the atoms are used up, otherwise go test the next one.
    pub fn compute_next_atom(&mut self, text_len: usize, atoms_len: usize) {
        self.state = if self.atom_index < atoms_len {
            ControlState::TryMatchAtom
        } else if self.string_index >= text_len {
            ControlState::Success
        } else {
            ControlState::AttemptBacktrack
        };
    }

    /// Pop the newest resume point, or fail for good.
    pub fn attempt_backtrack(&mut self) {
        self.state = match self.stack.pop() {
            Some(entry) => {
                self.string_index = entry.string_index;
                self.atom_index = entry.next_atom_index;
                ControlState::TryMatchAtom
            }
            None => ControlState::Failure,
        };
    }
}

/// Result of a traced or measured run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOutcome {
    pub matched: bool,
    pub metrics: BacktrackMetrics,
}

/// The compiled fast-path matcher.
///
/// Compile once, match many times:
///
/// ```
/// use regmatch::BacktrackingMatcher;
///
/// let m = BacktrackingMatcher::new("c*a*b*").unwrap();
/// assert!(m.is_match("aab"));
/// assert!(!m.is_match("aabc"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BacktrackingMatcher {
    pattern: String,
    atoms: AtomSequence,
}

impl BacktrackingMatcher {
    /// Compile `pattern` with default options.
    pub fn new(pattern: &str) -> Result<Self, InvalidPatternError> {
        Self::with_options(pattern, &CompileOptions::default())
    }

    pub fn with_options(pattern: &str, options: &CompileOptions) -> Result<Self, InvalidPatternError> {
        let atoms = compile_with(pattern, options)?;
        Ok(BacktrackingMatcher { pattern: pattern.to_string(), atoms })
    }

    /// The pattern text this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn atoms(&self) -> &AtomSequence {
        &self.atoms
    }

    /// True if all of `text` matches the whole pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.run(text, NoTrace).matched
    }

    /// Run to completion, reporting each transition to `observer`.
    pub fn run<O: StepObserver>(&self, text: &str, mut observer: O) -> MatchOutcome {
        let started = Instant::now();
        let text: Vec<char> = text.chars().collect();
        let atoms = self.atoms.atoms();
        let mut cursor = MatchCursor::start(atoms);
        let mut metrics = BacktrackMetrics::default();

        while !cursor.state.is_terminal() {
            let depth_before = cursor.stack.len();
            cursor.step(&text, atoms);
            metrics.steps += 1;

            match cursor.stack.len().cmp(&depth_before) {
                Ordering::Greater => {
                    metrics.pushes += 1;
                    metrics.max_stack_depth = metrics.max_stack_depth.max(cursor.stack.len());
                }
                Ordering::Less => metrics.pops += 1,
                Ordering::Equal => {}
            }

            observer.on_step(&cursor.snapshot(metrics.steps));
        }

        metrics.duration = started.elapsed();
        MatchOutcome { matched: cursor.state == ControlState::Success, metrics }
    }
}
