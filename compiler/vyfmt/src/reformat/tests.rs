#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;

use clap::Parser as _;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;

fn options(args: &[&str]) -> Options {
    Options::try_parse_from(std::iter::once("vyfmt").chain(args.iter().copied())).unwrap()
}

fn printer() -> Printer<Vec<u8>, Vec<u8>> {
    Printer::new(Vec::new(), Vec::new())
}

fn stdout(printer: Printer<Vec<u8>, Vec<u8>>) -> String {
    String::from_utf8(printer.into_inner().0).unwrap()
}

#[test]
fn contents_are_formatted() {
    let formatted = format_file_contents(
        &Parser::new(),
        Path::new("a.vy"),
        "x=[1,2]\n",
        &FormatConfig::default(),
        true,
    )
    .unwrap();
    assert_eq!(formatted, "x = [1, 2]\n");
}

#[test]
fn unparsable_contents_fail() {
    let error = format_file_contents(
        &Parser::new(),
        Path::new("a.vy"),
        "x = = 1\n",
        &FormatConfig::default(),
        true,
    )
    .unwrap_err();
    assert!(matches!(error, FileError::Parse { .. }));
}

#[test]
fn diff_has_headers_and_hunks() {
    let diff = unified_diff("x=1\n", "x = 1\n", "a.vy", "a.vy");
    assert!(diff.starts_with("--- a.vy\n+++ a.vy\n"), "{diff}");
    assert!(diff.contains("-x=1\n"), "{diff}");
    assert!(diff.contains("+x = 1\n"), "{diff}");
}

#[test]
fn in_place_rewrites_changed_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.vy");
    fs::write(&path, "x=1\n").unwrap();

    let p = printer();
    let changed = reformat_file(&Parser::new(), &path, &options(&[]), &p).unwrap();
    assert_eq!(changed, Changed::Yes);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x = 1\n");
    assert_eq!(stdout(p), "");
}

#[test]
fn check_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.vy");
    fs::write(&path, "x=1\n").unwrap();

    let p = printer();
    let changed = reformat_file(&Parser::new(), &path, &options(&["--check"]), &p).unwrap();
    assert_eq!(changed, Changed::Yes);
    assert_eq!(fs::read_to_string(&path).unwrap(), "x=1\n");
    assert_eq!(stdout(p), "");
}

#[test]
fn not_in_place_prints_result() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.vy");
    fs::write(&path, "x=1\n").unwrap();

    let p = printer();
    reformat_file(&Parser::new(), &path, &options(&["--in-place", "false"]), &p).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x=1\n");
    assert_eq!(stdout(p), "x = 1\n");
}

#[test]
fn unchanged_file_has_no_diff() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("a.vy");
    fs::write(&path, "x = 1\n").unwrap();

    let p = printer();
    let changed = reformat_file(&Parser::new(), &path, &options(&["--diff"]), &p).unwrap();
    assert_eq!(changed, Changed::No);
    assert_eq!(stdout(p), "");
}

#[test]
fn missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let error = reformat_file(
        &Parser::new(),
        &dir.path().join("gone.vy"),
        &options(&[]),
        &printer(),
    )
    .unwrap_err();
    assert!(matches!(error, FileError::Io(_)));
}

#[test]
fn stdin_goes_to_stdout() {
    let p = printer();
    let changed = reformat_stdin(&Parser::new(), "x=1\n", &options(&["-"]), &p).unwrap();
    assert_eq!(changed, Changed::Yes);
    assert_eq!(stdout(p), "x = 1\n");
}

#[test]
fn stdin_diff_names_streams() {
    let p = printer();
    reformat_stdin(&Parser::new(), "x=1\n", &options(&["--diff", "-"]), &p).unwrap();
    assert!(stdout(p).starts_with("--- STDIN\n+++ STDOUT\n"));
}
