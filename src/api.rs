use crate::engine::{
    BacktrackMetrics, BacktrackingMatcher, CompileOptions, CursorSnapshot, MemoMetrics, MemoizedMatcher, NoTrace,
    StepObserver, StepRecorder, compile_with,
};
use crate::InvalidPatternError;
use std::time::{Duration, Instant};

/// Which matcher answers a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Engine {
    /// Compiled backtracking automaton (fast path).
    #[default]
    Backtracking,
    /// Memoized recursive matcher (reference oracle).
    Memoized,
}

impl Engine {
    pub fn name(self) -> &'static str {
        match self {
            Engine::Backtracking => "backtracking",
            Engine::Memoized => "memoized",
        }
    }

    fn as_set(self) -> EngineSet {
        match self {
            Engine::Backtracking => EngineSet::BACKTRACKING,
            Engine::Memoized => EngineSet::MEMOIZED,
        }
    }
}

bitflags::bitflags! {
    /// A set of engines to run side by side in [`match_verbose_with`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct EngineSet: u8 {
        const BACKTRACKING = 1 << 0;
        const MEMOIZED     = 1 << 1;
    }
}

/// Options that affect matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Engine whose answer is returned.
    pub engine: Engine,
    /// Collapse redundant repeat atoms at compile time. Never changes results.
    pub collapse_redundant: bool,
    /// Maximum number of automaton transitions kept by verbose runs (0 = none).
    pub trace_limit: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { engine: Engine::Backtracking, collapse_redundant: true, trace_limit: 0 }
    }
}

impl Options {
    fn compile_options(&self) -> CompileOptions {
        CompileOptions { collapse_redundant: self.collapse_redundant }
    }
}

/// Result from [`match_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub text: String,
    pub pattern: String,
    pub matched: bool,
    pub engine: Engine,
    /// Compile + match time.
    pub elapsed: Duration,
}

/// Engine-specific counters in an [`EngineReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineMetrics {
    Backtracking(BacktrackMetrics),
    Memoized(MemoMetrics),
}

/// One engine's answer in a verbose run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineReport {
    pub engine: Engine,
    pub matched: bool,
    pub elapsed: Duration,
    pub metrics: EngineMetrics,
}

/// Additional details returned by [`match_verbose_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDetails {
    /// Canonical text of the compiled atoms, e.g. `"a*b"` for `"a*a*b"`.
    pub atoms: String,
    pub atom_count: usize,
    pub compile: Duration,
    pub total: Duration,
    /// Reports in engine order (backtracking first).
    pub engines: Vec<EngineReport>,
    /// First `Options::trace_limit` automaton transitions.
    pub trace: Vec<CursorSnapshot>,
    /// Transitions past the limit that were not kept.
    pub trace_dropped: usize,
}

/// Result from [`match_verbose_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResultVerbose {
    pub text: String,
    pub pattern: String,
    /// Answer of `Options::engine`.
    pub matched: bool,
    /// True when every engine that ran gave the same answer.
    pub agree: bool,
    pub elapsed: Duration,
    pub details: MatchDetails,
}

/// Both engines' answers for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossCheck {
    pub backtracking: bool,
    pub memoized: bool,
}

impl CrossCheck {
    pub fn agree(&self) -> bool {
        self.backtracking == self.memoized
    }
}

/// Decide whether all of `text` matches `pattern`, using the backtracking
/// engine and default options.
///
/// # Example
/// ```
/// assert_eq!(regmatch::is_match("aa", "a*"), Ok(true));
/// assert_eq!(regmatch::is_match("aa", "a"), Ok(false));
/// assert!(regmatch::is_match("abc", "*abc").is_err());
/// ```
pub fn is_match(text: &str, pattern: &str) -> Result<bool, InvalidPatternError> {
    is_match_with(text, pattern, &Options::default())
}

/// Decide a match with the engine and compile options in `options`.
///
/// The pattern is validated even when the memoized engine is selected, so a
/// malformed pattern is always reported as an error rather than answered.
pub fn is_match_with(text: &str, pattern: &str, options: &Options) -> Result<bool, InvalidPatternError> {
    match options.engine {
        Engine::Backtracking => {
            let matcher = BacktrackingMatcher::with_options(pattern, &options.compile_options())?;
            Ok(matcher.is_match(text))
        }
        Engine::Memoized => {
            compile_with(pattern, &options.compile_options())?;
            Ok(MemoizedMatcher::is_match(text, pattern))
        }
    }
}

/// Like [`is_match_with`] but returns the inputs and timing alongside.
pub fn match_with(text: &str, pattern: &str, options: &Options) -> Result<MatchResult, InvalidPatternError> {
    let started = Instant::now();
    let matched = is_match_with(text, pattern, options)?;
    Ok(MatchResult {
        text: text.to_string(),
        pattern: pattern.to_string(),
        matched,
        engine: options.engine,
        elapsed: started.elapsed(),
    })
}

/// Run every engine in `engines` (plus `options.engine`) and collect metrics,
/// an optional transition trace, and whether the answers agree.
pub fn match_verbose_with(
    text: &str,
    pattern: &str,
    options: &Options,
    engines: EngineSet,
) -> Result<MatchResultVerbose, InvalidPatternError> {
    match_verbose_traced(text, pattern, options, engines, NoTrace)
}

/// Like [`match_verbose_with`], but every backtracking transition is also
/// reported to `observer`. The automaton still runs once; `observer` sees
/// nothing if the backtracking engine is not in the set.
pub fn match_verbose_traced<O: StepObserver>(
    text: &str,
    pattern: &str,
    options: &Options,
    engines: EngineSet,
    mut observer: O,
) -> Result<MatchResultVerbose, InvalidPatternError> {
    let total_start = Instant::now();
    let engines = engines | options.engine.as_set();

    let compile_start = Instant::now();
    let matcher = BacktrackingMatcher::with_options(pattern, &options.compile_options())?;
    let compile = compile_start.elapsed();

    let mut reports = Vec::new();
    let mut trace = Vec::new();
    let mut trace_dropped = 0;

    if engines.contains(EngineSet::BACKTRACKING) {
        let mut recorder = StepRecorder::new(options.trace_limit);
        let outcome = matcher.run(text, (&mut recorder, &mut observer));
        trace_dropped = recorder.dropped();
        trace = recorder.into_steps();
        reports.push(EngineReport {
            engine: Engine::Backtracking,
            matched: outcome.matched,
            elapsed: outcome.metrics.duration,
            metrics: EngineMetrics::Backtracking(outcome.metrics),
        });
    }

    if engines.contains(EngineSet::MEMOIZED) {
        let outcome = MemoizedMatcher::run(text, pattern);
        reports.push(EngineReport {
            engine: Engine::Memoized,
            matched: outcome.matched,
            elapsed: outcome.metrics.duration,
            metrics: EngineMetrics::Memoized(outcome.metrics),
        });
    }

    let matched = reports.iter().find(|r| r.engine == options.engine).is_some_and(|r| r.matched);
    let agree = reports.windows(2).all(|w| w[0].matched == w[1].matched);
    let total = total_start.elapsed();

    let details = MatchDetails {
        atoms: matcher.atoms().to_string(),
        atom_count: matcher.atoms().len(),
        compile,
        total,
        engines: reports,
        trace,
        trace_dropped,
    };

    Ok(MatchResultVerbose {
        text: text.to_string(),
        pattern: pattern.to_string(),
        matched,
        agree,
        elapsed: total,
        details,
    })
}

/// Answer the query with both engines.
pub fn cross_check(text: &str, pattern: &str) -> Result<CrossCheck, InvalidPatternError> {
    let backtracking = BacktrackingMatcher::new(pattern)?.is_match(text);
    let memoized = MemoizedMatcher::is_match(text, pattern);
    Ok(CrossCheck { backtracking, memoized })
}
