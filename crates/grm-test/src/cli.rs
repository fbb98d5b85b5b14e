// Command-line arguments and the run configuration derived from them.

use std::path::PathBuf;

use clap::Parser;

use crate::parser::DEFAULT_SEPARATOR;

/// Environment variable consulted when `--far` is not given.
pub const FAR_ENV: &str = "GRM_TEST_FAR";

/// Regression tests for rewrite-rule archives.
///
/// Reads test lines of the form RULE<sep>input<sep>reference (from CORPUS or
/// stdin), rewrites each input with the named rule and compares the result
/// with the reference. Mismatches are printed; nothing is printed when every
/// test passes.
#[derive(Debug, Clone, Parser)]
#[command(name = "grm-test", version)]
pub struct Args {
    /// Path to the rule archive.
    #[arg(long, env = FAR_ENV, value_name = "PATH")]
    pub far: PathBuf,

    /// Test every line with this rule, ignoring the rule named on the line.
    #[arg(long, value_name = "NAME")]
    pub rule: Option<String>,

    /// File of corpus line numbers to skip, one per line.
    #[arg(long, value_name = "PATH")]
    pub exclude: Option<PathBuf>,

    /// Field separator: a single character, or `\t` / `tab`.
    #[arg(long, value_name = "CHAR", default_value = "\\t", value_parser = parse_separator)]
    pub separator: char,

    /// Write a `go test` style report to this file.
    #[arg(short = 'o', long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Ignore the ASCII case of inputs (references are compared as written).
    #[arg(long)]
    pub ignore_case: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Test corpus. Read from stdin when omitted.
    #[arg(value_name = "CORPUS")]
    pub corpus: Option<PathBuf>,
}

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub far: PathBuf,
    /// Non-empty rule name forced onto every test line.
    pub rule_override: Option<String>,
    pub exclude: Option<PathBuf>,
    pub separator: char,
    /// Where to write the structured report, if anywhere.
    pub report: Option<PathBuf>,
    pub ignore_case: bool,
    pub corpus: Option<PathBuf>,
    pub verbosity: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            far: PathBuf::new(),
            rule_override: None,
            exclude: None,
            separator: DEFAULT_SEPARATOR,
            report: None,
            ignore_case: false,
            corpus: None,
            verbosity: 0,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            far: args.far,
            rule_override: args.rule.filter(|rule| !rule.is_empty()),
            exclude: args.exclude,
            separator: args.separator,
            report: args.output,
            ignore_case: args.ignore_case,
            corpus: args.corpus,
            verbosity: args.verbose,
        }
    }
}

fn parse_separator(value: &str) -> Result<char, String> {
    if matches!(value, "\\t" | "tab") {
        return Ok('\t');
    }
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("separator must be a single character, got `{value}`")),
    }
}
