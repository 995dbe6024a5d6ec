//! Command-line options.

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use vy_fmt::{FormatConfig, DEFAULT_MAX_WIDTH};

/// The uncompromising Vyper code formatter.
#[derive(Clone, Debug, Parser)]
#[command(name = "vyfmt", version)]
pub struct Options {
    /// Max line length.
    #[arg(short = 'l', long, default_value_t = DEFAULT_MAX_WIDTH)]
    pub line_length: usize,

    /// Overwrite files in place.
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub in_place: bool,

    /// Compares input and output AST to ensure similarity. On by default.
    #[arg(long, default_value_t = true, action = ArgAction::Set, value_name = "BOOL")]
    pub safe: bool,

    /// Don't write the files back, just return the status. Return code 0
    /// means nothing would change, 1 means some files would be reformatted
    /// and 123 means there was an internal error.
    #[arg(long)]
    pub check: bool,

    /// Don't write the files back, just output a diff for each file on stdout.
    #[arg(long)]
    pub diff: bool,

    /// Don't emit non-error messages to stderr. Errors are still emitted.
    #[arg(short, long)]
    pub quiet: bool,

    /// Also emit messages to stderr about files that were not changed.
    #[arg(short, long)]
    pub verbose: bool,

    /// Files or directories to format; `-` reads stdin.
    #[arg(value_name = "SRC")]
    pub src: Vec<PathBuf>,
}

/// What happens to the formatted text of a file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WriteBack {
    /// Overwrite the file.
    InPlace,
    /// Print the formatted text to stdout.
    Stdout,
    /// Only report whether the file would change.
    Check,
    /// Print a unified diff to stdout.
    Diff,
}

impl Options {
    pub fn write_back(&self) -> WriteBack {
        if self.check {
            WriteBack::Check
        } else if self.diff {
            WriteBack::Diff
        } else if self.in_place {
            WriteBack::InPlace
        } else {
            WriteBack::Stdout
        }
    }

    pub fn format_config(&self) -> FormatConfig {
        FormatConfig::with_max_width(self.line_length)
    }

    /// True when the only source is `-`.
    pub fn reads_stdin(&self) -> bool {
        matches!(self.src.as_slice(), [only] if only == Path::new("-"))
    }

    /// Check and diff runs only predict what formatting would do.
    pub fn is_dry_run(&self) -> bool {
        self.check || self.diff
    }
}
