use crate::engine::{BacktrackingMatcher, CompileOptions, MemoizedMatcher, compile, compile_with};
use crate::{AtomKind, AtomSequence};

const PATTERN_ATOMS: [&str; 6] = ["a", "a*", "b", "b*", ".", ".*"];

/// Every concatenation of up to `max_atoms` items from `PATTERN_ATOMS`.
fn all_patterns(max_atoms: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_atoms {
        let next: Vec<String> =
            frontier.iter().flat_map(|p| PATTERN_ATOMS.iter().map(move |a| format!("{p}{a}"))).collect();
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

/// Every string over `alphabet` of length `0..=max_len`.
fn all_texts(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut out = vec![String::new()];
    let mut frontier = vec![String::new()];
    for _ in 0..max_len {
        let next: Vec<String> =
            frontier.iter().flat_map(|t| alphabet.iter().map(move |c| format!("{t}{c}"))).collect();
        out.extend(next.iter().cloned());
        frontier = next;
    }
    out
}

/// Translate compiled atoms into an anchored `regex` crate pattern.
fn to_regex(atoms: &AtomSequence) -> regex::Regex {
    let mut re = String::from("(?s)^(?:");
    for atom in atoms.atoms() {
        match atom.kind {
            AtomKind::Literal(c) => re.push_str(&regex::escape(&c.to_string())),
            AtomKind::Wildcard => re.push('.'),
        }
        if atom.repeatable {
            re.push('*');
        }
    }
    re.push_str(")$");
    regex::Regex::new(&re).unwrap()
}

#[test]
fn table_cases_both_engines() {
    // (expected, text, pattern)
    let cases: Vec<(bool, &str, &str)> = vec![
        (false, "aa", "a"),
        (true, "aa", "a*"),
        (true, "ab", ".*"),
        (true, "aab", "c*a*b"),
        (false, "mississippi", "mis*is*p*."),
        (true, "mississippi", "mis*is*ip*."),
        (true, "a", "ab*"),
        (true, "aaaaaaaaaaaaab", "a*a*a*a*a*a*a*a*a*a*a*a*b"),
        (false, "aaaaaaaaaaaaac", "a*a*a*a*a*a*a*a*a*a*a*a*b"),
        (true, "", ""),
        (false, "x", ""),
        (true, "", "x*y*.*"),
        (false, "", "x*y."),
        (true, "abcd", "d*a.c*.d"),
        (false, "ab", ".*c"),
        (true, "aaa", "a*a"),
        (true, "aaa", "ab*a*c*a"),
        (false, "aaba", "ab*a*c*a"),
        (true, "bbbba", ".*a*a"),
        (false, "a", ".*..a*"),
        (true, "ab", ".*..a*"),
        (true, "line\nbreak", "line.break"),
        (true, "héllo", "h.l*o"),
        (true, "🦀🦀🦀", "🦀*"),
        (true, "a\\xb", "a\\.b*"),
        (false, "a.b", "a\\.b"),
    ];

    for (expected, text, pattern) in cases {
        let backtracking = BacktrackingMatcher::new(pattern).unwrap().is_match(text);
        let memoized = MemoizedMatcher::is_match(text, pattern);
        assert_eq!(backtracking, expected, "backtracking: {text:?} ~ {pattern:?}");
        assert_eq!(memoized, expected, "memoized: {text:?} ~ {pattern:?}");
    }
}

#[test]
fn engines_agree_exhaustively() {
    let texts = all_texts(&['a', 'b'], 5);
    for pattern in all_patterns(4) {
        let matcher = BacktrackingMatcher::new(&pattern).unwrap();
        for text in &texts {
            assert_eq!(
                matcher.is_match(text),
                MemoizedMatcher::is_match(text, &pattern),
                "engines disagree: {text:?} ~ {pattern:?}"
            );
        }
    }
}

#[test]
fn compression_is_sound() {
    let uncompressed = CompileOptions { collapse_redundant: false };
    let texts = all_texts(&['a', 'b', 'c'], 4);
    for pattern in all_patterns(4) {
        let compressed = BacktrackingMatcher::new(&pattern).unwrap();
        let plain = BacktrackingMatcher::with_options(&pattern, &uncompressed).unwrap();
        assert!(compressed.atoms().len() <= plain.atoms().len());
        for text in &texts {
            assert_eq!(compressed.is_match(text), plain.is_match(text), "collapse changed {text:?} ~ {pattern:?}");
        }
    }
}

#[test]
fn regex_crate_agrees() {
    let texts = all_texts(&['a', 'b'], 5);
    for pattern in all_patterns(3) {
        let atoms = compile(&pattern).unwrap();
        let re = to_regex(&atoms);
        let matcher = BacktrackingMatcher::new(&pattern).unwrap();
        for text in &texts {
            assert_eq!(matcher.is_match(text), re.is_match(text), "regex disagrees: {text:?} ~ {pattern:?}");
        }
    }
}

#[test]
fn no_adjacent_redundant_atoms_after_compile() {
    for pattern in all_patterns(4) {
        let atoms = compile(&pattern).unwrap();
        for pair in atoms.atoms().windows(2) {
            assert!(!pair[0].absorbs(&pair[1]), "{pattern:?} compiled to {atoms}");
        }
    }
}

#[test]
fn results_are_deterministic() {
    let texts = all_texts(&['a', 'b'], 3);
    for pattern in all_patterns(2) {
        let matcher = BacktrackingMatcher::new(&pattern).unwrap();
        for text in &texts {
            let first = (matcher.is_match(text), MemoizedMatcher::is_match(text, &pattern));
            let second = (matcher.is_match(text), MemoizedMatcher::is_match(text, &pattern));
            assert_eq!(first, second);
        }
    }
}

#[test]
fn wildcard_boundaries() {
    let dot = BacktrackingMatcher::new(".").unwrap();
    let dot_star = BacktrackingMatcher::new(".*").unwrap();
    for c in ['a', 'z', '0', ' ', '.', '*', '\n', 'é', 'ß', '🦀'] {
        let s = c.to_string();
        assert!(dot.is_match(&s), "{s:?}");
        assert!(MemoizedMatcher::is_match(&s, "."), "{s:?}");
        assert!(!dot.is_match(&format!("{s}{s}")));
    }
    for text in all_texts(&['a', '.', '*'], 4) {
        assert!(dot_star.is_match(&text));
        assert!(MemoizedMatcher::is_match(&text, ".*"));
    }
}

#[test]
fn empty_pattern_matches_only_empty_text() {
    let empty = BacktrackingMatcher::new("").unwrap();
    assert!(empty.is_match(""));
    assert!(MemoizedMatcher::is_match("", ""));
    for text in all_texts(&['a', 'b'], 3).iter().filter(|t| !t.is_empty()) {
        assert!(!empty.is_match(text));
        assert!(!MemoizedMatcher::is_match(text, ""));
    }
}

#[test]
fn malformed_patterns_rejected_but_memo_is_total() {
    for pattern in ["*", "*abc", "a**", ".**b", "ab*c**"] {
        assert!(compile(pattern).is_err(), "{pattern:?}");
        assert!(BacktrackingMatcher::new(pattern).is_err(), "{pattern:?}");
        // Answers, never panics.
        let _ = MemoizedMatcher::is_match("abc", pattern);
    }
}

#[test]
fn long_repeat_chains_stay_fast() {
    let pattern = "a*".repeat(50) + "b";
    let hit = "a".repeat(200) + "b";
    let miss = "a".repeat(200) + "c";

    let matcher = BacktrackingMatcher::new(&pattern).unwrap();
    assert_eq!(matcher.atoms().len(), 2);
    assert!(matcher.is_match(&hit));
    assert!(!matcher.is_match(&miss));

    let out = MemoizedMatcher::run(&miss, &pattern);
    assert!(!out.matched);
    assert!(out.metrics.entries <= (miss.len() + 1) * (pattern.len() + 1));
    assert!(MemoizedMatcher::is_match(&hit, &pattern));
}

#[test]
fn uncompressed_chain_still_correct_on_short_input() {
    let uncompressed = CompileOptions { collapse_redundant: false };
    let plain = compile_with("a*a*a*a*b", &uncompressed).unwrap();
    assert_eq!(plain.len(), 5);
    let matcher = BacktrackingMatcher::with_options("a*a*a*a*b", &uncompressed).unwrap();
    assert!(matcher.is_match("aaaaaab"));
    assert!(!matcher.is_match("aaaaaac"));
}

#[test]
fn matchers_are_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BacktrackingMatcher>();
    assert_send_sync::<MemoizedMatcher>();

    let matcher = std::sync::Arc::new(BacktrackingMatcher::new("a*b.").unwrap());
    let handles: Vec<_> = ["aabx", "bx", "aab", "ccc"]
        .into_iter()
        .map(|text| {
            let matcher = std::sync::Arc::clone(&matcher);
            std::thread::spawn(move || (matcher.is_match(text), MemoizedMatcher::is_match(text, "a*b.")))
        })
        .collect();
    let answers: Vec<(bool, bool)> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(answers, vec![(true, true), (true, true), (false, false), (false, false)]);
}
