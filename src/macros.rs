/// Build a self-test [`Scenario`](crate::Scenario).
///
/// ```text
/// scenario!("aa", "a*" => true)        must match
/// scenario!("aa", "a" => false)        must not match
/// scenario!("", "*abc" => invalid)     pattern must be rejected at compile time
/// ```
#[macro_export]
macro_rules! scenario {
    ($text:literal, $pattern:literal => invalid) => {
        $crate::Scenario { text: $text, pattern: $pattern, expected: $crate::Expectation::InvalidPattern }
    };
    ($text:literal, $pattern:literal => $expected:literal) => {
        $crate::Scenario { text: $text, pattern: $pattern, expected: $crate::Expectation::Match($expected) }
    };
}
