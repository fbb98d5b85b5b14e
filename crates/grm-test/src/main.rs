// grm-test: run a regression corpus against a rule archive.
//
// Usage:
//   grm-test --far RULES.far [--rule NAME] [--exclude FILE] [--separator C]
//            [-o REPORT] [--ignore-case] [-v...] [CORPUS]
//
// Failures are printed to stdout, one per line. Exit code 0 means every test
// passed; 1 means a test failed or the run could not complete.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter};
use std::process::ExitCode;

use clap::Parser;

use grm_fst::RuleSet;
use grm_test::cli::{Args, Config};
use grm_test::{ExclusionSet, HarnessError, Reporter, logging, runner};

fn main() -> ExitCode {
    let config = Config::from(Args::parse());
    logging::init(config.verbosity);

    match run_main(&config) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run_main(config: &Config) -> Result<u8, HarnessError> {
    let rules = RuleSet::load(&config.far)?;
    let exclusions = ExclusionSet::load(config.exclude.as_deref())?;

    let report = match &config.report {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                HarnessError::io(format!("couldn't create report file {}", path.display()), e)
            })?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let stdout = io::stdout();
    let reporter = Reporter::new(BufWriter::new(stdout.lock()), report);

    let corpus: Box<dyn BufRead> = match &config.corpus {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                HarnessError::io(format!("couldn't open test corpus {}", path.display()), e)
            })?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let summary = runner::run(corpus, &rules, &exclusions, config, reporter)?;
    Ok(summary.exit_code())
}
