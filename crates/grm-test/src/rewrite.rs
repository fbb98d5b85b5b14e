// Rewrite invocation: exact bytes, or a case-folded acceptor in their place.

use grm_fst::RuleEngine;

use crate::casefold::case_fold_acceptor;

/// Outcome of running one input through a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub succeeded: bool,
    /// Meaningful only when `succeeded` is true.
    pub output: Vec<u8>,
}

impl RewriteResult {
    fn from_output(output: Option<Vec<u8>>) -> Self {
        match output {
            Some(output) => Self {
                succeeded: true,
                output,
            },
            None => Self {
                succeeded: false,
                output: Vec::new(),
            },
        }
    }
}

/// Rewrite `input` with `rule`.
///
/// With `case_insensitive` set, the input is replaced by an acceptor for all
/// of its ASCII case variants, so an exact-case rule matches regardless of how
/// the input letters are cased. Only the input is folded; the caller compares
/// the output against the reference as written.
///
/// A rule that yields nothing is a normal, unsuccessful result.
pub fn rewrite<E>(engine: &E, rule: &str, input: &[u8], case_insensitive: bool) -> RewriteResult
where
    E: RuleEngine + ?Sized,
{
    let output = if case_insensitive {
        engine.rewrite_automaton(rule, &case_fold_acceptor(input))
    } else {
        engine.rewrite_bytes(rule, input)
    };
    RewriteResult::from_output(output)
}
