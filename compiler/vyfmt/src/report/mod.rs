//! Per-file messages, the closing summary and the exit code.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::FileError;
use crate::printer::Printer;

/// Exit code when some file failed.
pub const EXIT_FAILURE: u8 = 123;

/// Exit code when a check or diff run found files that would change.
pub const EXIT_WOULD_CHANGE: u8 = 1;

/// Whether formatting changed a file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Changed {
    No,
    Yes,
}

/// Tally of a run.
#[derive(Debug, Default)]
pub struct Report {
    pub dry_run: bool,
    pub quiet: bool,
    pub verbose: bool,
    pub change_count: usize,
    pub same_count: usize,
    pub failure_count: usize,
}

impl Report {
    pub fn new(dry_run: bool, quiet: bool, verbose: bool) -> Self {
        Report {
            dry_run,
            quiet,
            verbose,
            ..Report::default()
        }
    }

    /// Record a file that formatted successfully.
    pub fn done<O: Write, E: Write>(
        &mut self,
        path: &Path,
        changed: Changed,
        printer: &Printer<O, E>,
    ) {
        debug!(path = %path.display(), ?changed, "done");
        match changed {
            Changed::Yes => {
                if self.verbose || !self.quiet {
                    let verb = if self.dry_run {
                        "would reformat"
                    } else {
                        "reformatted"
                    };
                    printer.err(&format!("{verb} {}", path.display()));
                }
                self.change_count += 1;
            }
            Changed::No => {
                if self.verbose {
                    printer.err(&format!(
                        "{} already well formatted, good job.",
                        path.display()
                    ));
                }
                self.same_count += 1;
            }
        }
    }

    /// Record a file that could not be formatted. Errors are printed even
    /// when quiet.
    pub fn failed<O: Write, E: Write>(
        &mut self,
        path: &Path,
        error: &FileError,
        printer: &Printer<O, E>,
    ) {
        warn!(path = %path.display(), %error, "cannot format");
        printer.err(&format!("error: cannot format {}: {error}", path.display()));
        if let Some(details) = error.details() {
            printer.err_raw(details);
        }
        self.failure_count += 1;
    }

    /// 123 if any file failed, 1 if a dry run found changes, 0 otherwise.
    pub fn return_code(&self) -> u8 {
        if self.failure_count > 0 {
            EXIT_FAILURE
        } else if self.change_count > 0 && self.dry_run {
            EXIT_WOULD_CHANGE
        } else {
            0
        }
    }
}

fn files(count: usize) -> String {
    if count == 1 {
        "1 file".to_owned()
    } else {
        format!("{count} files")
    }
}

/// Summary sentence, e.g. "1 file reformatted, 2 files left unchanged."
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (reformatted, unchanged, failed) = if self.dry_run {
            (
                "would be reformatted",
                "would be left unchanged",
                "would fail to reformat",
            )
        } else {
            ("reformatted", "left unchanged", "failed to reformat")
        };

        let mut parts = Vec::new();
        if self.change_count > 0 {
            parts.push(format!("{} {reformatted}", files(self.change_count)));
        }
        if self.same_count > 0 {
            parts.push(format!("{} {unchanged}", files(self.same_count)));
        }
        if self.failure_count > 0 {
            parts.push(format!("{} {failed}", files(self.failure_count)));
        }
        write!(f, "{}.", parts.join(", "))
    }
}
