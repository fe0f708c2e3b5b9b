//! Command-line parsing (spec.md §6): one or more positional input
//! paths, one optional `-o`/`--output-file` (default `-`, meaning
//! stdout), and one optional `-v`/`--verbose` phase-tracing flag. A
//! path of `-` on either side means the corresponding standard stream.
//! No other flags — the source language has nothing for an
//! optimization level, emit kind, or target triple to apply to.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub inputs: Vec<InputSource>,
    pub output: OutputTarget,
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CliError {
    #[error("no input files given")]
    NoInputs,
    #[error("'{flag}' requires a value")]
    MissingValue { flag: String },
    #[error("unrecognized argument '{arg}'")]
    Unrecognized { arg: String },
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Config, CliError> {
    let mut inputs = Vec::new();
    let mut output = OutputTarget::Stdout;
    let mut verbose = false;

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-o" | "--output-file" => {
                let value = iter.next().ok_or_else(|| CliError::MissingValue { flag: arg.clone() })?;
                output = to_output_target(&value);
            }
            "-v" | "--verbose" => verbose = true,
            "-" => inputs.push(InputSource::Stdin),
            _ if arg.starts_with('-') && arg.len() > 1 => {
                return Err(CliError::Unrecognized { arg });
            }
            _ => inputs.push(InputSource::File(PathBuf::from(arg))),
        }
    }

    if inputs.is_empty() {
        return Err(CliError::NoInputs);
    }

    Ok(Config { inputs, output, verbose })
}

fn to_output_target(value: &str) -> OutputTarget {
    if value == "-" {
        OutputTarget::Stdout
    } else {
        OutputTarget::File(PathBuf::from(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_single_input_defaults_output_to_stdout() {
        let config = parse_args(["a.cpl".to_string()]).unwrap();
        assert_eq!(config.inputs, vec![InputSource::File(PathBuf::from("a.cpl"))]);
        assert_eq!(config.output, OutputTarget::Stdout);
        assert!(!config.verbose);
    }

    #[test]
    fn dash_v_turns_on_verbose_tracing() {
        let config = parse_args(["a.cpl".to_string(), "--verbose".to_string()]).unwrap();
        assert!(config.verbose);
    }

    #[test]
    fn dash_o_sets_the_output_file() {
        let config = parse_args(["a.cpl".to_string(), "-o".to_string(), "out.qd".to_string()]).unwrap();
        assert_eq!(config.output, OutputTarget::File(PathBuf::from("out.qd")));
    }

    #[test]
    fn a_bare_dash_as_output_means_stdout_explicitly() {
        let config = parse_args(["a.cpl".to_string(), "-o".to_string(), "-".to_string()]).unwrap();
        assert_eq!(config.output, OutputTarget::Stdout);
    }

    #[test]
    fn a_bare_dash_as_input_means_stdin() {
        let config = parse_args(["-".to_string()]).unwrap();
        assert_eq!(config.inputs, vec![InputSource::Stdin]);
    }

    #[test]
    fn multiple_positional_inputs_are_all_collected_in_order() {
        let config = parse_args(["a.cpl".to_string(), "b.cpl".to_string()]).unwrap();
        assert_eq!(config.inputs, vec![InputSource::File(PathBuf::from("a.cpl")), InputSource::File(PathBuf::from("b.cpl"))]);
    }

    #[test]
    fn no_inputs_is_an_error() {
        assert_eq!(parse_args(Vec::<String>::new()), Err(CliError::NoInputs));
    }

    #[test]
    fn output_file_without_a_value_is_an_error() {
        assert_eq!(
            parse_args(["a.cpl".to_string(), "-o".to_string()]),
            Err(CliError::MissingValue { flag: "-o".to_string() })
        );
    }
}
