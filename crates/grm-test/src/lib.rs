//! Regression test runner for rewrite-rule archives.
//!
//! Reads a corpus of `RULE<sep>input<sep>reference` lines, rewrites each
//! input with the named rule from a loaded archive, and compares the result
//! with the reference. Failures are printed one per line; an optional report
//! file records every scored line in `go test` output format so existing
//! tooling can pick it up.
//!
//! # Architecture
//!
//! - [`parser`] -- Splits corpus lines into test cases
//! - [`exclude`] -- Line numbers to skip
//! - [`casefold`] -- Acceptors that admit every ASCII case variant of an input
//! - [`rewrite`] -- Calls into the rule engine, exact or case-insensitive
//! - [`report`] -- Console diagnostics and the structured report
//! - [`runner`] -- The per-line read/parse/rewrite/compare loop
//! - [`cli`] -- Command-line arguments and run configuration
//! - [`logging`] -- `tracing` subscriber setup

pub mod casefold;
pub mod cli;
pub mod exclude;
pub mod logging;
pub mod parser;
pub mod report;
pub mod rewrite;
pub mod runner;

pub use cli::Config;
pub use exclude::ExclusionSet;
pub use parser::{ParseOutcome, TestCase};
pub use report::{Reporter, RunSummary};

/// Errors that abort a run.
///
/// Per-test failures are never errors; they are recorded in the
/// [`RunSummary`] and the run continues.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("line {line}: test lines must be of the form RULE{separator}input{separator}reference: {text}")]
    MalformedLine {
        line: usize,
        text: String,
        separator: char,
    },
    #[error("exclusion file line {line}: `{text}` is not a line number")]
    BadExclusion { line: usize, text: String },
    #[error(transparent)]
    Archive(#[from] grm_fst::FarError),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl HarnessError {
    /// Wrap an I/O error with a short description of what was being done.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }
}
