//! The compiler driver: CLI parsing, per-file pipeline orchestration,
//! diagnostic reporting, and exit codes (spec.md §6, §7).

pub mod cli;
pub mod error;
pub mod pipeline;

use std::fs::File;
use std::io::Write;

use anyhow::Context;
use cli::{InputSource, OutputTarget};
use error::DriverError;
use quadc_util::{Diagnostic, SourceMap};

/// Runs the driver end to end and returns the process exit code: `0`
/// if every file compiled cleanly, `1` otherwise (spec.md §6).
pub fn run<I: IntoIterator<Item = String>>(args: I) -> i32 {
    let config = match cli::parse_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    let mut sink: Box<dyn Write> = match open_output(&config.output) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };

    let mut sources = SourceMap::new();
    let mut any_failed = false;

    for input in &config.inputs {
        let (label, path) = match input {
            InputSource::Stdin => ("-".to_string(), None),
            InputSource::File(path) => (path.display().to_string(), Some(path.as_path())),
        };

        let source = match pipeline::read_source(path) {
            Ok(source) => source,
            Err(e) => {
                eprintln!("error: {e}");
                any_failed = true;
                continue;
            }
        };

        let (_, result) = pipeline::run_file(&label, source, &mut sources, &mut sink, config.verbose);
        if let Err(e) = result {
            report(&e, &sources);
            any_failed = true;
        }
    }

    if any_failed {
        1
    } else {
        0
    }
}

fn open_output(output: &OutputTarget) -> anyhow::Result<Box<dyn Write>> {
    match output {
        OutputTarget::Stdout => Ok(Box::new(std::io::stdout())),
        OutputTarget::File(path) => {
            let file = File::create(path).with_context(|| format!("opening output file {}", path.display()))?;
            Ok(Box::new(file))
        }
    }
}

/// Renders `e` to stderr. Errors carrying a source span (lex, syntax,
/// semantic) get the `path:line:column: error: message` form spec.md
/// §7 requires; everything else (I/O, an internal label-resolution
/// bug) is reported plainly since it has no position in source text.
fn report(e: &DriverError, sources: &SourceMap) {
    match e {
        DriverError::Parse(parse_error) => {
            let diagnostic = Diagnostic::error(parse_error.span(), parse_error.to_string());
            eprintln!("{}", diagnostic.render(sources));
        }
        other => eprintln!("error: {other}"),
    }
}
