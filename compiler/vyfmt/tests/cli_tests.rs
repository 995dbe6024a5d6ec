#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end tests of the `vyfmt` command line.
//!
//! Each test builds a scratch project in a temporary directory, runs the
//! formatter with parsed arguments and inspects the files, the captured
//! output and the exit code.

use std::fs;
use std::path::Path;

use clap::Parser as _;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vyfmt::{run, Options, Printer, EXIT_FAILURE, EXIT_WOULD_CHANGE};

const MESSY: &str = "x=1\ny  =  [1,2]\n";
const CLEAN: &str = "x = 1\ny = [1, 2]\n";

struct Outcome {
    code: u8,
    stdout: String,
    stderr: String,
}

fn vyfmt(args: &[&str], stdin: &str) -> Outcome {
    let options =
        Options::try_parse_from(std::iter::once("vyfmt").chain(args.iter().copied())).unwrap();
    let printer = Printer::new(Vec::new(), Vec::new());
    let code = run(&options, stdin.as_bytes(), &printer);
    let (out, err) = printer.into_inner();
    Outcome {
        code,
        stdout: String::from_utf8(out).unwrap(),
        stderr: String::from_utf8(err).unwrap(),
    }
}

fn write(dir: &TempDir, relative: &str, contents: &str) -> String {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn read(path: impl AsRef<Path>) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn formats_directory_in_place() {
    let dir = TempDir::new().unwrap();
    let messy = write(&dir, "contracts/messy.vy", MESSY);
    let clean = write(&dir, "contracts/clean.vy", CLEAN);
    let root = dir.path().to_string_lossy().into_owned();

    let outcome = vyfmt(&[&root], "");
    assert_eq!(outcome.code, 0, "{}", outcome.stderr);
    assert_eq!(read(&messy), CLEAN);
    assert_eq!(read(&clean), CLEAN);
    assert!(outcome.stderr.contains(&format!("reformatted {messy}")));
    assert!(outcome
        .stderr
        .contains("1 file reformatted, 1 file left unchanged."));
    assert!(outcome.stderr.contains("All done!"));
}

#[test]
fn check_reports_without_writing() {
    let dir = TempDir::new().unwrap();
    let messy = write(&dir, "messy.vy", MESSY);

    let outcome = vyfmt(&["--check", &messy], "");
    assert_eq!(outcome.code, EXIT_WOULD_CHANGE);
    assert_eq!(read(&messy), MESSY);
    assert!(outcome.stderr.contains(&format!("would reformat {messy}")));
    assert!(outcome.stderr.contains("1 file would be reformatted."));
    assert!(outcome.stderr.contains("Oh no!"));
}

#[test]
fn check_passes_on_clean_files() {
    let dir = TempDir::new().unwrap();
    let clean = write(&dir, "clean.vy", CLEAN);

    let outcome = vyfmt(&["--check", &clean], "");
    assert_eq!(outcome.code, 0);
    assert!(outcome.stderr.contains("1 file would be left unchanged."));
}

#[test]
fn diff_prints_unified_diff() {
    let dir = TempDir::new().unwrap();
    let messy = write(&dir, "messy.vy", MESSY);

    let outcome = vyfmt(&["--diff", &messy], "");
    assert_eq!(outcome.code, EXIT_WOULD_CHANGE);
    assert_eq!(read(&messy), MESSY);
    assert!(outcome.stdout.starts_with(&format!("--- {messy}\n+++ {messy}\n")));
    assert!(outcome.stdout.contains("-x=1\n"));
    assert!(outcome.stdout.contains("+x = 1\n"));
}

#[test]
fn parse_failure_exits_123_and_keeps_file() {
    let dir = TempDir::new().unwrap();
    let broken = write(&dir, "broken.vy", "def f(:\n    pass\n");
    let messy = write(&dir, "messy.vy", MESSY);

    let outcome = vyfmt(&[&broken, &messy], "");
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert_eq!(read(&broken), "def f(:\n    pass\n");
    assert_eq!(read(&messy), CLEAN);
    assert!(outcome.stderr.contains(&format!(
        "error: cannot format {broken}: Unable to parse input file, are you sure the Vyper code is valid?"
    )));
    assert!(outcome
        .stderr
        .contains("1 file reformatted, 1 file failed to reformat."));
}

#[test]
fn missing_path_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.vy").to_string_lossy().into_owned();

    let outcome = vyfmt(&[&missing], "");
    assert_eq!(outcome.code, EXIT_FAILURE);
    assert!(outcome
        .stderr
        .contains(&format!("error: cannot format {missing}: invalid path")));
}

#[test]
fn line_length_option_is_honored() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "long.vy",
        "x = some_function(first_argument, second_argument)\n",
    );

    let outcome = vyfmt(&["-l", "40", &path], "");
    assert_eq!(outcome.code, 0);
    assert!(read(&path).lines().all(|line| line.len() <= 40));
}

#[test]
fn not_in_place_prints_to_stdout() {
    let dir = TempDir::new().unwrap();
    let messy = write(&dir, "messy.vy", MESSY);

    let outcome = vyfmt(&["--in-place", "false", &messy], "");
    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.stdout, CLEAN);
    assert_eq!(read(&messy), MESSY);
}

#[test]
fn stdin_to_stdout() {
    let outcome = vyfmt(&["-q", "-"], MESSY);
    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.stdout, CLEAN);
    assert_eq!(outcome.stderr, "");
}

#[test]
fn quiet_suppresses_summary() {
    let dir = TempDir::new().unwrap();
    let messy = write(&dir, "messy.vy", MESSY);

    let outcome = vyfmt(&["-q", &messy], "");
    assert_eq!(outcome.code, 0);
    assert_eq!(outcome.stderr, "");
    assert_eq!(read(&messy), CLEAN);
}

#[test]
fn verbose_mentions_unchanged_files() {
    let dir = TempDir::new().unwrap();
    let clean = write(&dir, "clean.vy", CLEAN);

    let outcome = vyfmt(&["-v", &clean], "");
    assert!(outcome
        .stderr
        .contains(&format!("{clean} already well formatted, good job.")));
}

#[test]
fn empty_directory_has_nothing_to_do() {
    let dir = TempDir::new().unwrap();
    write(&dir, "notes.txt", "not vyper");
    let root = dir.path().to_string_lossy().into_owned();

    let outcome = vyfmt(&[&root], "");
    assert_eq!(outcome.code, 0);
    assert!(outcome.stderr.contains("Nothing to do"));
}

#[test]
fn interface_files_are_formatted() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "interfaces/IToken.vyi",
        "@external\ndef transfer(to:address,amount:uint256)->bool:\n    ...\n",
    );
    let root = dir.path().to_string_lossy().into_owned();

    let outcome = vyfmt(&[&root], "");
    assert_eq!(outcome.code, 0, "{}", outcome.stderr);
    assert!(read(&path).contains("def transfer(to: address, amount: uint256) -> bool:"));
}
