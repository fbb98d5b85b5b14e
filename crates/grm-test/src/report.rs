// Console diagnostics and the `go test` style report.

use std::borrow::Cow;
use std::io::Write;

use crate::HarnessError;

/// How a scored line ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pass,
    /// The rule produced `output`, which differs from the reference.
    Mismatch { output: Vec<u8> },
    /// The rule produced nothing for the input.
    RewriteFailed,
}

/// Pass/fail bookkeeping for a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub any_fail: bool,
    pub any_success: bool,
    pub passed: usize,
    pub failed: usize,
    /// Comments, blank lines and excluded lines.
    pub skipped: usize,
}

impl RunSummary {
    /// Process exit code for this run: 0 when nothing failed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        u8::from(self.any_fail)
    }
}

/// Writes per-failure diagnostics to `console` and, if configured, the
/// structured report to `report`.
///
/// Report layout per scored line:
///
/// ```text
/// === RUN TestLine12
/// --- FAIL: TestLine12 (0.00s)
///     Expected [XYZ] got [XYQ]
/// ```
///
/// [`finish`](Self::finish) appends a `NoTests` pass when nothing was scored
/// and a final `PASS` or `FAIL` line.
pub struct Reporter<C: Write, R: Write> {
    console: C,
    report: Option<R>,
    summary: RunSummary,
}

impl<C: Write, R: Write> Reporter<C, R> {
    pub fn new(console: C, report: Option<R>) -> Self {
        Self {
            console,
            report,
            summary: RunSummary::default(),
        }
    }

    /// Count a line that produced no test.
    pub fn skip(&mut self) {
        self.summary.skipped += 1;
    }

    /// Record the outcome of the test on `line`.
    pub fn record(
        &mut self,
        line: usize,
        input: &[u8],
        reference: &[u8],
        outcome: &Outcome,
    ) -> Result<(), HarnessError> {
        self.report_line(format_args!("=== RUN TestLine{line}"))?;
        match outcome {
            Outcome::Pass => {
                self.summary.any_success = true;
                self.summary.passed += 1;
                self.report_line(format_args!("--- PASS: TestLine{line} (0.00s)"))?;
            }
            Outcome::Mismatch { output } => {
                self.summary.any_fail = true;
                self.summary.failed += 1;
                let (input, reference, output) = (text(input), text(reference), text(output));
                self.console_line(format_args!(
                    "Line {line} [{input}]: Expected [{reference}] got [{output}]"
                ))?;
                self.report_line(format_args!(
                    "--- FAIL: TestLine{line} (0.00s)\n    Expected [{reference}] got [{output}]"
                ))?;
            }
            Outcome::RewriteFailed => {
                self.summary.any_fail = true;
                self.summary.failed += 1;
                let input = text(input);
                self.console_line(format_args!("Line {line} [{input}]: Rewrite failed"))?;
                self.report_line(format_args!(
                    "--- FAIL: TestLine{line} (0.00s)\n    Rewrite failed"
                ))?;
            }
        }
        Ok(())
    }

    /// Write the report trailer, flush both sinks and return the totals.
    pub fn finish(mut self) -> Result<RunSummary, HarnessError> {
        if !self.summary.any_fail && !self.summary.any_success {
            // The report must contain at least one result
            self.report_line(format_args!("=== RUN NoTests\n--- PASS: NoTests (0.00s)"))?;
        }
        let verdict = if self.summary.any_fail { "FAIL" } else { "PASS" };
        self.report_line(format_args!("{verdict}"))?;

        if let Some(report) = self.report.as_mut() {
            report
                .flush()
                .map_err(|e| HarnessError::io("failed to write report", e))?;
        }
        self.console
            .flush()
            .map_err(|e| HarnessError::io("failed to write diagnostics", e))?;
        Ok(self.summary)
    }

    fn report_line(&mut self, line: std::fmt::Arguments<'_>) -> Result<(), HarnessError> {
        match self.report.as_mut() {
            Some(report) => writeln!(report, "{line}")
                .map_err(|e| HarnessError::io("failed to write report", e)),
            None => Ok(()),
        }
    }

    fn console_line(&mut self, line: std::fmt::Arguments<'_>) -> Result<(), HarnessError> {
        writeln!(self.console, "{line}")
            .map_err(|e| HarnessError::io("failed to write diagnostics", e))
    }
}

fn text(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestReporter<'a> = Reporter<&'a mut Vec<u8>, &'a mut Vec<u8>>;

    /// Run `record` against a reporter with both sinks, then finish it.
    fn run(record: impl FnOnce(&mut TestReporter<'_>)) -> (RunSummary, String, String) {
        let mut console = Vec::new();
        let mut report = Vec::new();
        let mut reporter = Reporter::new(&mut console, Some(&mut report));
        record(&mut reporter);
        let summary = reporter.finish().unwrap();
        (
            summary,
            String::from_utf8(console).unwrap(),
            String::from_utf8(report).unwrap(),
        )
    }

    #[test]
    fn pass_writes_report_only() {
        let (summary, console, report) = run(|r| {
            r.record(1, b"abc", b"XYZ", &Outcome::Pass).unwrap();
        });
        assert!(summary.any_success);
        assert!(!summary.any_fail);
        assert_eq!(summary.exit_code(), 0);
        assert_eq!(console, "");
        assert_eq!(
            report,
            "=== RUN TestLine1\n--- PASS: TestLine1 (0.00s)\nPASS\n"
        );
    }

    #[test]
    fn mismatch_writes_both() {
        let (summary, console, report) = run(|r| {
            let outcome = Outcome::Mismatch {
                output: b"XYQ".to_vec(),
            };
            r.record(3, b"abc", b"XYZ", &outcome).unwrap();
        });
        assert!(summary.any_fail);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code(), 1);
        assert_eq!(console, "Line 3 [abc]: Expected [XYZ] got [XYQ]\n");
        assert_eq!(
            report,
            "=== RUN TestLine3\n--- FAIL: TestLine3 (0.00s)\n    Expected [XYZ] got [XYQ]\nFAIL\n"
        );
    }

    #[test]
    fn rewrite_failure_writes_both() {
        let (_, console, report) = run(|r| {
            r.record(2, b"qq", b"x", &Outcome::RewriteFailed).unwrap();
        });
        assert_eq!(console, "Line 2 [qq]: Rewrite failed\n");
        assert_eq!(
            report,
            "=== RUN TestLine2\n--- FAIL: TestLine2 (0.00s)\n    Rewrite failed\nFAIL\n"
        );
    }

    #[test]
    fn nothing_scored_emits_no_tests() {
        let (summary, console, report) = run(|r| r.skip());
        assert_eq!(summary.skipped, 1);
        assert_eq!(console, "");
        assert_eq!(report, "=== RUN NoTests\n--- PASS: NoTests (0.00s)\nPASS\n");
    }

    #[test]
    fn mixed_results_fail_overall() {
        let (summary, _, report) = run(|r| {
            r.record(1, b"a", b"b", &Outcome::Pass).unwrap();
            r.record(2, b"c", b"d", &Outcome::RewriteFailed).unwrap();
        });
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.failed, 1);
        assert!(!report.contains("NoTests"));
        assert!(report.ends_with("FAIL\n"));
    }

    #[test]
    fn without_report_only_console_is_written() {
        let mut console = Vec::new();
        let mut r: Reporter<&mut Vec<u8>, Vec<u8>> = Reporter::new(&mut console, None);
        r.record(5, b"in", b"ref", &Outcome::RewriteFailed).unwrap();
        let summary = r.finish().unwrap();
        assert!(summary.any_fail);
        assert_eq!(String::from_utf8(console).unwrap(), "Line 5 [in]: Rewrite failed\n");
    }

    #[test]
    fn invalid_utf8_is_rendered_lossily() {
        let (_, console, _) = run(|r| {
            let outcome = Outcome::Mismatch {
                output: b"n\xFFo".to_vec(),
            };
            r.record(1, b"\xFF", b"ok", &outcome).unwrap();
        });
        assert_eq!(console, "Line 1 [\u{FFFD}]: Expected [ok] got [n\u{FFFD}o]\n");
    }
}
