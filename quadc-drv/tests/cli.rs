//! End-to-end CLI tests driving the real `quadc` binary, covering the
//! concrete scenarios spec.md §8 lists verbatim.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn quadc_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_quadc"))
}

#[test]
fn minimal_program_compiles_to_just_halt() {
    Command::new(quadc_bin()).arg("-").write_stdin("{ }").assert().success().stdout("HALT\n");
}

#[test]
fn add_two_ints_lowers_to_the_expected_instruction_sequence() {
    let source = "a,b,c : int;\n{ input(a); input(b); c = a + b; output(c); }\n";
    Command::new(quadc_bin())
        .arg("-")
        .write_stdin(source)
        .assert()
        .success()
        .stdout("IINP a\nIINP b\nIADD c a b\nIPRT c\nHALT\n");
}

#[test]
fn mixed_type_arithmetic_inserts_an_implicit_cast() {
    let source = "x:int; y:float; { y = x + 1.5; }";
    Command::new(quadc_bin()).arg("-").write_stdin(source).assert().success().stdout("ITOR t1 x\nRADD y t1 1.5\nHALT\n");
}

#[test]
fn switch_with_default_falls_through_from_the_matched_case() {
    let source = "x,y:int; { x=2; y=0; switch(x) { case 1: y=y+1; case 2: y=y+10; default: y=y+100; } output(y); }";
    Command::new(quadc_bin())
        .arg("-")
        .write_stdin(source)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("IADD y y 10")
                .and(predicate::str::contains("IADD y y 100"))
                .and(predicate::str::contains("IPRT y"))
                .and(predicate::str::ends_with("HALT\n")),
        );
}

#[test]
fn a_lex_error_is_reported_at_its_source_location_with_a_nonzero_exit() {
    Command::new(quadc_bin())
        .arg("-")
        .write_stdin("{ $ }")
        .assert()
        .failure()
        .stderr(predicate::str::contains("-:1:").and(predicate::str::contains("error")));
}

#[test]
fn output_file_flag_writes_the_resolved_program_to_the_given_path() {
    let dir = tempfile::TempDir::new().expect("create temp dir");
    let out_path = dir.path().join("out.qd");

    Command::new(quadc_bin()).arg("-").arg("-o").arg(&out_path).write_stdin("{ }").assert().success();

    assert_eq!(std::fs::read_to_string(&out_path).unwrap(), "HALT\n");
}

#[test]
fn no_input_files_is_a_usage_error() {
    Command::new(quadc_bin()).assert().failure().stderr(predicate::str::contains("no input files"));
}

#[test]
fn or_over_float_operands_still_lowers_with_int_prefixed_instructions() {
    let source = "a,b:float; { output(a || b); }";
    Command::new(quadc_bin())
        .arg("-")
        .write_stdin(source)
        .assert()
        .success()
        .stdout("INQL _a a 0\nINQL _b b 0\nIADD t1 _a _b\nIPRT t1\nHALT\n");
}

#[test]
fn a_comparison_result_used_in_an_enclosing_arithmetic_expression_is_accepted_as_int() {
    let source = "x,y:float; z:int; { z = (x<y) + 1; }";
    Command::new(quadc_bin()).arg("-").write_stdin(source).assert().success().stdout("RLSS t1 x y\nIADD z t1 1\nHALT\n");
}

#[test]
fn verbose_flag_traces_phases_to_stderr_without_touching_stdout() {
    Command::new(quadc_bin())
        .arg("-")
        .arg("--verbose")
        .write_stdin("{ }")
        .assert()
        .success()
        .stdout("HALT\n")
        .stderr(predicate::str::contains("lex+parse").and(predicate::str::contains("resolve+emit")));
}
