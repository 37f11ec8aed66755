//! Built-in regression scenarios.
//!
//! The list below is a binding contract: every scenario must hold for both
//! engines. The CLI runs it when its first argument is [`SELF_TEST_TOKEN`].

use crate::engine::debug_enabled;
use crate::{Engine, InvalidPatternError, Options, is_match_with};
use once_cell::sync::Lazy;
use std::time::{Duration, Instant};

/// First CLI argument that runs the self-test instead of a match.
pub const SELF_TEST_TOKEN: &str = "test_cases";

/// What a scenario requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// The pattern compiles and the match decision equals this value.
    Match(bool),
    /// The pattern is rejected at compile time.
    InvalidPattern,
}

/// One `(text, pattern)` query with its required answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub text: &'static str,
    pub pattern: &'static str,
    pub expected: Expectation,
}

impl Scenario {
    fn holds(&self, got: &Result<bool, InvalidPatternError>) -> bool {
        match (self.expected, got) {
            (Expectation::Match(want), Ok(matched)) => want == *matched,
            (Expectation::InvalidPattern, Err(_)) => true,
            _ => false,
        }
    }
}

static SCENARIOS: Lazy<Vec<Scenario>> = Lazy::new(|| {
    vec![
        scenario!("aa", "a" => false),
        scenario!("aa", "a*" => true),
        scenario!("mississippi", "mis*is*p*." => false),
        scenario!("aab", "c*a*b*" => true),
        scenario!("a", "ab*" => true),
        scenario!("aaaaaaaaaaaaab", "a*a*a*a*a*a*a*a*a*a*a*a*b" => true),
        scenario!("aaaaaaaaaaaaac", "a*a*a*a*a*a*a*a*a*a*a*a*b" => false),
        scenario!("", "" => true),
        scenario!("x", "" => false),
        scenario!("x", "." => true),
        scenario!("any text at all", ".*" => true),
        scenario!("", "*abc" => invalid),
    ]
});

/// The built-in scenario list.
pub fn scenarios() -> &'static [Scenario] {
    &SCENARIOS
}

/// A scenario that did not hold for one engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioFailure {
    pub scenario: Scenario,
    pub engine: Engine,
    pub got: Result<bool, InvalidPatternError>,
}

/// Outcome of [`run_self_test`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfTestReport {
    /// Scenario/engine pairs checked.
    pub checks: usize,
    pub failures: Vec<ScenarioFailure>,
    pub elapsed: Duration,
}

impl SelfTestReport {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Check every built-in scenario against both engines.
pub fn run_self_test() -> SelfTestReport {
    let started = Instant::now();
    let debug = debug_enabled();
    let mut checks = 0;
    let mut failures = Vec::new();

    for scenario in scenarios() {
        for engine in [Engine::Backtracking, Engine::Memoized] {
            let options = Options { engine, ..Options::default() };
            let got = is_match_with(scenario.text, scenario.pattern, &options);
            checks += 1;

            let ok = scenario.holds(&got);
            if debug {
                eprintln!(
                    "[selftest] engine={} text=\"{}\" pattern=\"{}\" expected={:?} got={:?} ok={}",
                    engine.name(),
                    scenario.text,
                    scenario.pattern,
                    scenario.expected,
                    got,
                    ok
                );
            }
            if !ok {
                failures.push(ScenarioFailure { scenario: *scenario, engine, got });
            }
        }
    }

    SelfTestReport { checks, failures, elapsed: started.elapsed() }
}
