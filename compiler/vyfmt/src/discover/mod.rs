//! Finding the files to format.
//!
//! Directories are walked recursively for Vyper sources, skipping the usual
//! build, virtualenv and tool directories. A file named explicitly is always
//! formatted, whatever its extension.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::FileError;

/// Extensions of Vyper sources.
pub const VYPER_EXTENSIONS: &[&str] = &["vy", "vyi"];

/// Directory names never descended into.
pub const EXCLUDED_DIRECTORIES: &[&str] = &[
    "build",
    "buck-out",
    ".nox",
    "venv",
    ".direnv",
    ".eggs",
    "__pypackages__",
    ".ipynb_checkpoints",
    "dist",
    "_build",
    ".git",
    ".hg",
    ".mypy_cache",
    ".tox",
    ".venv",
    ".idea",
];

/// Files found for a set of command-line paths.
#[derive(Debug, Default)]
pub struct Sources {
    /// In argument order; files of one directory sorted by path.
    pub files: Vec<PathBuf>,
    /// Paths that do not exist or could not be read.
    pub errors: Vec<(PathBuf, FileError)>,
}

/// Expand `paths` into the files to format.
pub fn collect_sources(paths: &[PathBuf]) -> Sources {
    let mut sources = Sources::default();
    for path in paths {
        if path.is_dir() {
            visit_vyper_files(path, &mut sources);
        } else if path.is_file() {
            sources.files.push(path.clone());
        } else {
            sources.errors.push((path.clone(), FileError::NotFound));
        }
    }
    debug!(
        files = sources.files.len(),
        errors = sources.errors.len(),
        "collected sources"
    );
    sources
}

fn is_vyper_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VYPER_EXTENSIONS.contains(&ext))
}

fn is_excluded(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| EXCLUDED_DIRECTORIES.contains(&name))
}

fn visit_vyper_files(dir: &Path, sources: &mut Sources) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(source) => {
            sources.errors.push((dir.to_path_buf(), FileError::Io(source)));
            return;
        }
    };

    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        if path.is_dir() {
            if !is_excluded(&path) {
                visit_vyper_files(&path, sources);
            }
        } else if is_vyper_file(&path) {
            sources.files.push(path);
        }
    }
}

#[cfg(test)]
mod tests;
