//! Pattern compilation.
//!
//! Turns pattern text into the `AtomSequence` the backtracking matcher walks.
//! Each step consumes one base character and, optionally, the `*` after it:
//!
//! ```text
//! "c*a*b."  ──▶  [c*] [a*] [b] [.]
//!  ^^ base + star   ^ base only
//! ```
//!
//! ## Redundancy collapse
//!
//! Chains like `a*a*a*a*` match exactly what `a*` matches but would give the
//! automaton one resume point per atom per consumed character. When a new atom
//! is absorbed by the last *appended* atom (see [`MatchAtom::absorbs`]) it is
//! dropped:
//!
//! ```text
//! a*a*a*b   ──▶  [a*] [b]
//! .*a*.*b   ──▶  [.*] [b]
//! a*b*a*    ──▶  [a*] [b*] [a*]      (different literals: kept)
//! ```
//!
//! The collapse only ever removes atoms whose language is already covered, so
//! it never changes an accept/reject outcome.

use super::debug_enabled;
use crate::{AtomKind, AtomSequence, InvalidPatternError, InvalidPatternReason, MatchAtom};

/// Knobs for [`compile_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    /// Drop repeat atoms already covered by the preceding one. On by default;
    /// switching it off yields the literal atom-per-base sequence.
    pub collapse_redundant: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions { collapse_redundant: true }
    }
}

/// Compile `pattern` with default options.
pub fn compile(pattern: &str) -> Result<AtomSequence, InvalidPatternError> {
    compile_with(pattern, &CompileOptions::default())
}

/// Compile `pattern` into an [`AtomSequence`].
///
/// Fails if any `*` has no literal or `.` immediately before it to repeat,
/// which covers both a leading `*` and a doubled `**`.
pub fn compile_with(pattern: &str, options: &CompileOptions) -> Result<AtomSequence, InvalidPatternError> {
    let mut atoms = AtomSequence::default();
    let mut collapsed = 0usize;
    let mut chars = pattern.chars().enumerate().peekable();

    while let Some((pos, c)) = chars.next() {
        let kind = match c {
            '*' => {
                let reason =
                    if pos == 0 { InvalidPatternReason::LeadingStar } else { InvalidPatternReason::UnboundStar };
                return Err(InvalidPatternError { pattern: pattern.to_string(), position: pos, reason });
            }
            '.' => AtomKind::Wildcard,
            c => AtomKind::Literal(c),
        };
        let repeatable = chars.next_if(|&(_, next)| next == '*').is_some();
        let atom = MatchAtom { kind, repeatable };

        if options.collapse_redundant && atoms.last().is_some_and(|last| last.absorbs(&atom)) {
            collapsed += 1;
            continue;
        }
        atoms.push(atom);
    }

    if debug_enabled() {
        eprintln!("{}", compile_summary(pattern, &atoms, collapsed));
    }

    Ok(atoms)
}

fn compile_summary(pattern: &str, atoms: &AtomSequence, collapsed: usize) -> String {
    format!("[compile] pattern=\"{}\" atoms=\"{}\" count={} collapsed={}", pattern, atoms, atoms.len(), collapsed)
}
