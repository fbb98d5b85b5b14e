// The test loop: read, skip or parse, rewrite, compare, report.

use std::io::{BufRead, Write};

use grm_fst::RuleEngine;

use crate::HarnessError;
use crate::cli::Config;
use crate::exclude::ExclusionSet;
use crate::parser::{self, ParseOutcome, TestCase};
use crate::report::{Outcome, Reporter, RunSummary};
use crate::rewrite::{self, RewriteResult};

/// Score a rewrite against the test's reference, byte for byte.
pub fn judge(case: &TestCase, result: RewriteResult) -> Outcome {
    if !result.succeeded {
        Outcome::RewriteFailed
    } else if result.output == case.reference {
        Outcome::Pass
    } else {
        Outcome::Mismatch {
            output: result.output,
        }
    }
}

/// Run every test in `corpus` and finish the report.
///
/// Lines are numbered from 1 and every physical line counts, including blank
/// lines, comments and exclusions. Comments and excluded lines are skipped
/// before the line is split into fields, so an excluded line may be
/// malformed. Any other malformed line aborts the run; the lines reported up
/// to that point stay in the report, without a trailer.
pub fn run<B, E, C, R>(
    mut corpus: B,
    engine: &E,
    exclusions: &ExclusionSet,
    config: &Config,
    mut reporter: Reporter<C, R>,
) -> Result<RunSummary, HarnessError>
where
    B: BufRead,
    E: RuleEngine + ?Sized,
    C: Write,
    R: Write,
{
    let rule_override = config.rule_override.as_deref();
    let mut raw = Vec::new();
    let mut line_number: usize = 0;

    loop {
        raw.clear();
        let read = corpus
            .read_until(b'\n', &mut raw)
            .map_err(|e| HarnessError::io("failed to read test corpus", e))?;
        if read == 0 {
            break;
        }
        if raw.last() == Some(&b'\n') {
            raw.pop();
        }

        line_number += 1;

        if parser::is_comment(&raw) || exclusions.contains(line_number) {
            tracing::trace!(line = line_number, "skipped");
            reporter.skip();
            continue;
        }

        let case = match parser::parse_line(&raw, line_number, config.separator, rule_override)? {
            ParseOutcome::Test(case) => case,
            ParseOutcome::Comment => unreachable!("comment lines are skipped above"),
        };

        let result = rewrite::rewrite(engine, &case.rule, &case.input, config.ignore_case);
        let outcome = judge(&case, result);
        tracing::debug!(
            line = line_number,
            rule = %case.rule,
            pass = matches!(outcome, Outcome::Pass),
            "scored"
        );
        reporter.record(case.line_number, &case.input, &case.reference, &outcome)?;
    }

    let summary = reporter.finish()?;
    tracing::debug!(
        lines = line_number,
        passed = summary.passed,
        failed = summary.failed,
        skipped = summary.skipped,
        "run complete"
    );
    Ok(summary)
}
