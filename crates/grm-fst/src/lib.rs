//! Rule archive engine for grammar regression tests.
//!
//! This crate loads a bundle of named, precompiled rewrite rules and runs
//! inputs through them. An input is either a raw byte string or an acceptor
//! [`Automaton`] (for example one that admits several spellings of the same
//! string); in both cases the lowest-cost output of the rule is returned.
//!
//! # Architecture
//!
//! - [`format`] -- Archive header parsing and validation
//! - [`arc`] -- Fixed-layout arc and state records
//! - [`automaton`] -- Mutable arena-backed automaton and the read-only [`Fst`] view
//! - [`rule`] -- Compiled rules with flat state/arc tables
//! - [`archive`] -- Named rule sets: loading and writing archives
//! - [`compose`] -- Best-first search over the composition of input and rule

pub mod arc;
pub mod archive;
pub mod automaton;
pub mod compose;
pub mod format;
pub mod rule;

pub use archive::{ArchiveBuilder, RuleSet};
pub use automaton::{Automaton, Fst};
pub use rule::Rule;

/// Error type for archive parsing and loading.
#[derive(Debug, thiserror::Error)]
pub enum FarError {
    #[error("invalid magic number in archive header")]
    InvalidMagic,
    #[error("archive too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("invalid rule name at byte offset {offset}")]
    InvalidRuleName { offset: usize },
    #[error("duplicate rule name `{0}`")]
    DuplicateRule(String),
    #[error("rule `{rule}`: state {state} out of range (rule has {state_count} states)")]
    StateOutOfRange {
        rule: String,
        state: u32,
        state_count: u32,
    },
    #[error("rule `{rule}`: arcs of state {state} exceed the arc table")]
    ArcOutOfRange { rule: String, state: u32 },
    #[error("failed to access archive {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Symbol label. Bytes map to labels `0..=255`; label [`EPSILON`] matches nothing.
pub type Label = u32;

/// Tropical cost: lower is better, costs add along a path.
pub type Weight = u32;

/// Index of a state within an automaton or rule.
pub type StateId = u32;

/// The empty label.
pub const EPSILON: Label = 0;

/// The multiplicative identity of the tropical semiring (zero cost).
pub const WEIGHT_ONE: Weight = 0;

/// Maximum number of product states expanded by a single rewrite. A search
/// that needs more gives up with no output.
pub const MAX_SEARCH_STEPS: u32 = 1_000_000;

/// Entry points the regression harness needs from a loaded rule archive.
///
/// Implementations must be callable any number of times against the same
/// loaded rules without re-initialisation.
pub trait RuleEngine {
    /// Rewrite `input` with the named rule, matching it exactly.
    ///
    /// Returns `None` if the rule does not exist or produces no output.
    fn rewrite_bytes(&self, rule: &str, input: &[u8]) -> Option<Vec<u8>>;

    /// Rewrite every string accepted by `input` with the named rule and
    /// return the cheapest output.
    fn rewrite_automaton(&self, rule: &str, input: &Automaton) -> Option<Vec<u8>>;
}
