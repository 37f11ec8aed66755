//! Memoized reference matcher.
//!
//! A direct recursive definition of "text matches pattern", evaluated over raw
//! char indices with every `(s, p)` subproblem cached for the duration of one
//! call:
//!
//! ```text
//! m(s, p) = s == |text|                                   if p == |pattern|
//!         = m(s, p+2) || (hit(s, p) && m(s+1, p))         if pattern[p+1] == '*'
//!         = hit(s, p) && m(s+1, p+1)                      otherwise
//!
//! hit(s, p) = s < |text| && (pattern[p] == '.' || pattern[p] == text[s])
//! ```
//!
//! Each subproblem is solved at most once, so a call costs
//! O(|text| * |pattern|) time and space no matter how the pattern is shaped.
//! That bound is what makes this the oracle for the backtracking automaton.
//!
//! There is no compile step and therefore no failure mode: a `*` with nothing
//! to repeat is simply compared as a literal character.
//!
//! The recurrence is evaluated from an explicit frame stack instead of native
//! recursion. A chain of pending subproblems can be `|text| + |pattern|` long,
//! and that must not be limited by the thread's stack size.

use super::metrics::MemoMetrics;
use std::time::Instant;

/// Result of a measured run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoOutcome {
    pub matched: bool,
    pub metrics: MemoMetrics,
}

/// The memoized recursive matcher.
///
/// ```
/// use regmatch::MemoizedMatcher;
///
/// assert!(MemoizedMatcher::is_match("aab", "c*a*b"));
/// assert!(!MemoizedMatcher::is_match("mississippi", "mis*is*p*."));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoizedMatcher;

impl MemoizedMatcher {
    /// True if all of `text` matches the whole of `pattern`.
    pub fn is_match(text: &str, pattern: &str) -> bool {
        Self::run(text, pattern).matched
    }

    /// Decide the match and report how much of the table was used.
    pub fn run(text: &str, pattern: &str) -> MemoOutcome {
        let started = Instant::now();
        let text: Vec<char> = text.chars().collect();
        let pattern: Vec<char> = pattern.chars().collect();

        let mut solver = Solver::new(&text, &pattern);
        let matched = solver.solve(0, 0);

        let mut metrics = solver.metrics;
        metrics.duration = started.elapsed();
        MemoOutcome { matched, metrics }
    }
}

/// Per-call state: the inputs, the `(s, p)` table and the pending frames.
struct Solver<'a> {
    text: &'a [char],
    pattern: &'a [char],
    /// Row-major `(|text| + 1) x (|pattern| + 1)`.
    memo: Vec<Option<bool>>,
    frames: Vec<Frame>,
    metrics: MemoMetrics,
}

/// A subproblem waiting on the answer of the one it descended into.
#[derive(Debug, Clone, Copy)]
struct Frame {
    s: usize,
    p: usize,
    slot: usize,
    resume: Resume,
}

/// Which branch of the recurrence a [`Frame`] is waiting on.
#[derive(Debug, Clone, Copy)]
enum Resume {
    /// `m(s, p+2)` of a starred atom; `hit` decides whether `m(s+1, p)` is tried next.
    Skip { hit: bool },
    /// `m(s+1, p)` of a starred atom.
    Repeat,
    /// `m(s+1, p+1)` of a single atom.
    Advance,
}

enum Step {
    Done(bool),
    Descend(usize, usize),
}

impl<'a> Solver<'a> {
    fn new(text: &'a [char], pattern: &'a [char]) -> Self {
        let cells = (text.len() + 1) * (pattern.len() + 1);
        Solver { text, pattern, memo: vec![None; cells], frames: Vec::new(), metrics: MemoMetrics::default() }
    }

    fn slot(&self, s: usize, p: usize) -> usize {
        s * (self.pattern.len() + 1) + p
    }

    /// Evaluate `m(s, p)`. Pending subproblems live on `self.frames` rather
    /// than the call stack, so input length is bounded by memory only.
    fn solve(&mut self, s: usize, p: usize) -> bool {
        let mut step = self.enter(s, p);
        loop {
            step = match step {
                Step::Descend(s, p) => self.enter(s, p),
                Step::Done(answer) => match self.frames.pop() {
                    Some(frame) => self.resume(frame, answer),
                    None => return answer,
                },
            };
        }
    }

    /// Start on `m(s, p)`: answer it from the base case or the table, or open
    /// a frame and descend into its first branch.
    fn enter(&mut self, s: usize, p: usize) -> Step {
        self.metrics.calls += 1;

        if p >= self.pattern.len() {
            return Step::Done(s >= self.text.len());
        }

        let slot = self.slot(s, p);
        if let Some(known) = self.memo[slot] {
            self.metrics.hits += 1;
            return Step::Done(known);
        }

        self.metrics.max_depth = self.metrics.max_depth.max(self.frames.len() + 1);

        let pc = self.pattern[p];
        let hit = self.text.get(s).is_some_and(|&sc| pc == '.' || pc == sc);

        if self.pattern.get(p + 1) == Some(&'*') {
            self.frames.push(Frame { s, p, slot, resume: Resume::Skip { hit } });
            Step::Descend(s, p + 2)
        } else if hit {
            self.frames.push(Frame { s, p, slot, resume: Resume::Advance });
            Step::Descend(s + 1, p + 1)
        } else {
            self.finish(slot, false)
        }
    }

    /// Continue `frame` now that the branch it waited on answered `answer`.
    fn resume(&mut self, frame: Frame, answer: bool) -> Step {
        match frame.resume {
            Resume::Skip { hit: true } if !answer => {
                self.frames.push(Frame { resume: Resume::Repeat, ..frame });
                Step::Descend(frame.s + 1, frame.p)
            }
            Resume::Skip { .. } | Resume::Repeat | Resume::Advance => self.finish(frame.slot, answer),
        }
    }

    fn finish(&mut self, slot: usize, answer: bool) -> Step {
        self.memo[slot] = Some(answer);
        self.metrics.entries += 1;
        Step::Done(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_scenarios() {
        let cases = [
            ("aa", "a", false),
            ("aa", "a*", true),
            ("mississippi", "mis*is*p*.", false),
            ("aab", "c*a*b*", true),
            ("a", "ab*", true),
            ("aaaaaaaaaaaaab", "a*a*a*a*a*a*a*a*a*a*a*a*b", true),
            ("aaaaaaaaaaaaac", "a*a*a*a*a*a*a*a*a*a*a*a*b", false),
        ];
        for (text, pattern, expected) in cases {
            assert_eq!(MemoizedMatcher::is_match(text, pattern), expected, "{text:?} ~ {pattern:?}");
        }
    }

    #[test]
    fn empty_pattern() {
        assert!(MemoizedMatcher::is_match("", ""));
        assert!(!MemoizedMatcher::is_match("x", ""));
    }

    #[test]
    fn wildcards() {
        for c in ['a', 'Z', '.', '*', '\n', 'é', '🦀'] {
            assert!(MemoizedMatcher::is_match(&c.to_string(), "."));
        }
        for text in ["", "a", "anything at all", "🦀🦀"] {
            assert!(MemoizedMatcher::is_match(text, ".*"));
        }
    }

    #[test]
    fn unbound_star_is_a_literal() {
        assert!(MemoizedMatcher::is_match("*abc", "*abc"));
        assert!(!MemoizedMatcher::is_match("abc", "*abc"));
        assert!(MemoizedMatcher::is_match("a*", "a**"));
        assert!(MemoizedMatcher::is_match("aaa*", "a**"));
    }

    #[test]
    fn table_is_bounded() {
        let text = "a".repeat(40);
        let pattern = "a*".repeat(20) + "b";
        let out = MemoizedMatcher::run(&text, &pattern);
        assert!(!out.matched);
        assert!(out.metrics.entries <= (text.len() + 1) * (pattern.len() + 1));
        assert!(out.metrics.hits > 0);
        assert!(out.metrics.max_depth <= text.len() + pattern.len());
    }

    #[test]
    fn deterministic() {
        let a = MemoizedMatcher::run("mississippi", "mis*is*ip*.");
        let b = MemoizedMatcher::run("mississippi", "mis*is*ip*.");
        assert!(a.matched);
        assert_eq!((a.matched, a.metrics.calls, a.metrics.entries), (b.matched, b.metrics.calls, b.metrics.entries));
    }

    #[test]
    fn long_text_does_not_exhaust_the_thread_stack() {
        let text = "a".repeat(100_000);
        assert!(MemoizedMatcher::is_match(&text, "a*"));
        assert!(MemoizedMatcher::is_match(&text, ".*a"));
        assert!(!MemoizedMatcher::is_match(&text, "a*b"));

        let out = MemoizedMatcher::run(&text, "a*");
        assert!(out.matched);
        assert!(out.metrics.max_depth > text.len());
    }

    #[test]
    fn short_circuit_skips_the_repeat_branch() {
        // m(0, 2) answers true immediately, so the starred atom never consumes.
        let out = MemoizedMatcher::run("b", "a*b");
        assert!(out.matched);
        assert_eq!(out.metrics.entries, 2);
        assert_eq!(out.metrics.max_depth, 2);
    }
}
