//! Per-file pipeline orchestration (spec.md §5): lex → parse → lower →
//! select → resolve → print, each stage fully completing before the
//! next begins, one file at a time.

use std::io::{Read, Write};

use quadc_util::{FileId, SourceMap};

use crate::error::DriverError;

/// Compiles one file's source text and writes its resolved Quad
/// instructions to `out`. Returns the `FileId` it registered `path`
/// under in `sources`, so a caller can render a later error's span.
/// When `verbose`, traces each phase's entry to stderr as it runs.
pub fn run_file<W: Write>(path: &str, source: String, sources: &mut SourceMap, out: &mut W, verbose: bool) -> (FileId, Result<(), DriverError>) {
    let file_id = sources.add_file(path, source);

    macro_rules! trace {
        ($phase:expr) => {
            if verbose {
                eprintln!("{path}: {}", $phase);
            }
        };
    }

    let result = (|| -> Result<(), DriverError> {
        trace!("lex+parse");
        let program = quadc_par::parse(file_id, sources.contents(file_id))?;
        trace!("lower");
        let blocks = quadc_mir::gen(&program);
        trace!("select");
        let selected = quadc_lir::select(&blocks);
        trace!("resolve+emit");
        quadc_gen::generate(&selected, out)?;
        Ok(())
    })();

    (file_id, result)
}

/// Reads `path`'s contents, or stdin's if `path` is `None`.
pub fn read_source(path: Option<&std::path::Path>) -> Result<String, DriverError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| DriverError::Read { path: path.to_path_buf(), source }),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| DriverError::Read { path: std::path::PathBuf::from("-"), source })?;
            Ok(buf)
        }
    }
}
