use std::path::PathBuf;
use thiserror::Error;

/// Aggregates every stage's fallible outcome into the one error type
/// `run_file` can return (spec.md §7's four kinds, plus I/O and
/// argument-parsing failures the spec's taxonomy doesn't name but a
/// real binary still has to report).
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("{0}")]
    Cli(#[from] crate::cli::CliError),
    #[error("reading {}: {source}", path.display())]
    Read { path: PathBuf, #[source] source: std::io::Error },
    #[error(transparent)]
    Parse(#[from] quadc_par::ParseError),
    #[error(transparent)]
    Gen(#[from] quadc_gen::GenError),
}
