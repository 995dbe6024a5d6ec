#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use super::*;

fn touch(dir: &TempDir, relative: &str) -> PathBuf {
    let path = dir.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, "x = 1\n").unwrap();
    path
}

fn relative(dir: &TempDir, files: &[PathBuf]) -> Vec<String> {
    files
        .iter()
        .map(|path| {
            path.strip_prefix(dir.path())
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn finds_vyper_sources_recursively() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "token.vy");
    touch(&dir, "interfaces/IToken.vyi");
    touch(&dir, "README.md");
    touch(&dir, "nested/deeper/vault.vy");

    let sources = collect_sources(&[dir.path().to_path_buf()]);
    assert!(sources.errors.is_empty());
    assert_eq!(
        relative(&dir, &sources.files),
        ["interfaces/IToken.vyi", "nested/deeper/vault.vy", "token.vy"]
    );
}

#[test]
fn skips_excluded_directories() {
    let dir = TempDir::new().unwrap();
    touch(&dir, "src/main.vy");
    touch(&dir, "build/out.vy");
    touch(&dir, ".venv/lib/dep.vy");
    touch(&dir, ".git/hooks/x.vy");

    let sources = collect_sources(&[dir.path().to_path_buf()]);
    assert_eq!(relative(&dir, &sources.files), ["src/main.vy"]);
}

#[test]
fn explicit_files_ignore_extension() {
    let dir = TempDir::new().unwrap();
    let path = touch(&dir, "contract.txt");

    let sources = collect_sources(&[path.clone()]);
    assert_eq!(sources.files, [path]);
}

#[test]
fn missing_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.vy");

    let sources = collect_sources(&[missing.clone()]);
    assert!(sources.files.is_empty());
    assert_eq!(sources.errors.len(), 1);
    assert_eq!(sources.errors[0].0, missing);
    assert!(matches!(sources.errors[0].1, FileError::NotFound));
}

#[test]
fn argument_order_is_kept() {
    let dir = TempDir::new().unwrap();
    let b = touch(&dir, "b.vy");
    let a = touch(&dir, "a.vy");

    let sources = collect_sources(&[b.clone(), a.clone()]);
    assert_eq!(sources.files, [b, a]);
}
