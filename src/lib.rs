use std::fmt;

#[macro_use]
mod macros;
mod api;
mod engine;
mod selftest;

pub use api::{
    CrossCheck, Engine, EngineMetrics, EngineReport, EngineSet, MatchDetails, MatchResult, MatchResultVerbose, Options,
    cross_check, is_match, is_match_with, match_verbose_traced, match_verbose_with, match_with,
};
pub use engine::{
    BacktrackEntry, BacktrackMetrics, BacktrackingMatcher, CompileOptions, ControlState, CursorSnapshot, DebugTrace,
    MatchCursor, MatchOutcome, MemoMetrics, MemoOutcome, MemoizedMatcher, NoTrace, StepObserver, StepRecorder,
    compile, compile_with,
};
pub use selftest::{Expectation, SELF_TEST_TOKEN, Scenario, ScenarioFailure, SelfTestReport, run_self_test, scenarios};

// --- Atoms ------------------------------------------------------------------

/// What a single atom matches against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// Exactly this character.
    Literal(char),
    /// Any one character (`.`).
    Wildcard,
}

/// The smallest matchable unit of a pattern.
///
/// Valid atoms written as pattern text:
///
/// ```text
/// "a"   Literal('a'), once
/// "a*"  Literal('a'), zero or more
/// "."   Wildcard, once
/// ".*"  Wildcard, zero or more
/// ```
///
/// `"aa"` is two atoms and `"*"` on its own is not an atom at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MatchAtom {
    pub kind: AtomKind,
    pub repeatable: bool,
}

impl MatchAtom {
    pub const fn literal(c: char) -> Self {
        MatchAtom { kind: AtomKind::Literal(c), repeatable: false }
    }

    pub const fn wildcard() -> Self {
        MatchAtom { kind: AtomKind::Wildcard, repeatable: false }
    }

    /// Same atom, marked zero-or-more.
    pub const fn repeated(self) -> Self {
        MatchAtom { kind: self.kind, repeatable: true }
    }

    /// Decide whether this atom accepts the next input character.
    ///
    /// `None` means the input is exhausted; only a repeatable atom accepts it,
    /// because a repetition may always stop with zero further matches.
    ///
    /// ```text
    /// atom    None   Some(x)
    /// a       no     x == 'a'
    /// a*      yes    x == 'a'
    /// .       no     yes
    /// .*      yes    yes
    /// ```
    pub fn accepts(&self, c: Option<char>) -> bool {
        match (c, self.kind) {
            (None, _) => self.repeatable,
            (Some(c), AtomKind::Literal(expected)) => c == expected,
            (Some(_), AtomKind::Wildcard) => true,
        }
    }

    /// True if `next`, placed right after `self`, can never change what the
    /// pair matches.
    ///
    /// Only two shapes qualify: `.*` followed by any repeatable atom, and `x*`
    /// followed by `x*`. Different literal stars such as `a*b*` are never
    /// collapsed.
    pub fn absorbs(&self, next: &MatchAtom) -> bool {
        if !self.repeatable || !next.repeatable {
            return false;
        }
        match (self.kind, next.kind) {
            (AtomKind::Wildcard, _) => true,
            (AtomKind::Literal(a), AtomKind::Literal(b)) => a == b,
            (AtomKind::Literal(_), AtomKind::Wildcard) => false,
        }
    }
}

impl fmt::Display for MatchAtom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            AtomKind::Literal(c) => write!(f, "{c}")?,
            AtomKind::Wildcard => f.write_str(".")?,
        }
        if self.repeatable {
            f.write_str("*")?;
        }
        Ok(())
    }
}

/// Compiled form of a pattern: the atoms the backtracking matcher walks.
///
/// Produced once per pattern by [`compile`] and never mutated afterwards.
/// Displaying a sequence yields its canonical pattern text (after any
/// redundancy collapse), e.g. `"a*a*b"` compiles and displays as `"a*b"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AtomSequence {
    atoms: Vec<MatchAtom>,
}

impl AtomSequence {
    pub fn new(atoms: Vec<MatchAtom>) -> Self {
        AtomSequence { atoms }
    }

    pub fn atoms(&self) -> &[MatchAtom] {
        &self.atoms
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn last(&self) -> Option<&MatchAtom> {
        self.atoms.last()
    }

    pub(crate) fn push(&mut self, atom: MatchAtom) {
        self.atoms.push(atom);
    }
}

impl fmt::Display for AtomSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for atom in &self.atoms {
            write!(f, "{atom}")?;
        }
        Ok(())
    }
}

// --- Errors -----------------------------------------------------------------

/// Why a pattern failed to compile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidPatternReason {
    /// The pattern starts with `*`.
    LeadingStar,
    /// A `*` follows another `*` and has nothing to repeat.
    UnboundStar,
}

/// A malformed pattern: some `*` has no literal or `.` to bind to.
///
/// Raised only by the compiler. Matching itself never fails; "no match" is a
/// plain `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPatternError {
    /// The pattern as given.
    pub pattern: String,
    /// Char offset of the offending `*`.
    pub position: usize,
    pub reason: InvalidPatternReason,
}

impl fmt::Display for InvalidPatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.reason {
            InvalidPatternReason::LeadingStar => "pattern starts with '*'",
            InvalidPatternReason::UnboundStar => "'*' has no preceding atom to repeat",
        };
        write!(f, "invalid pattern \"{}\": {} (at offset {})", self.pattern, what, self.position)
    }
}

impl std::error::Error for InvalidPatternError {}
