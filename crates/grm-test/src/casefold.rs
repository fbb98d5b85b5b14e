// ASCII case-folding input acceptors.
//
// Folding covers ASCII letters only: bytes outside A-Z/a-z,
// including every byte of a multi-byte UTF-8 sequence, are matched exactly.

use grm_fst::arc::Arc;
use grm_fst::{Automaton, Label, WEIGHT_ONE};

/// `true` for `a`..=`z`.
#[inline]
pub fn is_ascii_lower(b: u8) -> bool {
    b.is_ascii_lowercase()
}

/// `true` for `A`..=`Z`.
#[inline]
pub fn is_ascii_upper(b: u8) -> bool {
    b.is_ascii_uppercase()
}

/// The other-case spelling of an ASCII letter, or `None` for any other byte.
#[inline]
pub fn toggle_ascii_case(b: u8) -> Option<u8> {
    if is_ascii_lower(b) {
        Some(b.to_ascii_uppercase())
    } else if is_ascii_upper(b) {
        Some(b.to_ascii_lowercase())
    } else {
        None
    }
}

/// Build an acceptor for every spelling of `input` that differs only in the
/// case of its ASCII letters.
///
/// The result is a chain of `input.len() + 1` states. Each byte contributes an
/// arc for itself and, for letters, a parallel arc for the other case between
/// the same two states. The last state is final. Empty input gives a single
/// state that is both start and final.
pub fn case_fold_acceptor(input: &[u8]) -> Automaton {
    let mut fst = Automaton::new();
    let mut state = fst.add_state();
    fst.set_start(state);
    for &c in input {
        let next = fst.add_state();
        fst.add_arc(state, letter_arc(c, next));
        if let Some(other) = toggle_ascii_case(c) {
            fst.add_arc(state, letter_arc(other, next));
        }
        state = next;
    }
    fst.set_final(state, WEIGHT_ONE);
    fst
}

#[inline]
fn letter_arc(c: u8, next: u32) -> Arc {
    let label = Label::from(c);
    Arc::new(label, label, WEIGHT_ONE, next)
}
