//! Command-line front end of the Vyper formatter.
//!
//! [`run`] expands the command-line sources into files, formats them in
//! parallel with rayon and reports each outcome in argument order. Console
//! output from the workers goes through a shared [`Printer`].
//!
//! # Exit codes
//!
//! - `0`: every file formatted (or nothing to do)
//! - `1`: `--check` or `--diff` found files that would change
//! - `123`: some file failed to parse, format or pass the safety check

mod discover;
mod error;
mod options;
mod printer;
mod reformat;
mod report;

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Once;

use rayon::prelude::*;
use tracing::debug;
use vy_parse::Parser;

pub use discover::{collect_sources, Sources, EXCLUDED_DIRECTORIES, VYPER_EXTENSIONS};
pub use error::{render_parse_error, FileError};
pub use options::{Options, WriteBack};
pub use printer::Printer;
pub use reformat::{format_file_contents, reformat_file, reformat_stdin, unified_diff};
pub use report::{Changed, Report, EXIT_FAILURE, EXIT_WOULD_CHANGE};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Only installs a subscriber if `RUST_LOG` is set, e.g.
/// `RUST_LOG=vy_fmt=debug`. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};
        use tracing_tree::HierarchicalLayer;

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(HierarchicalLayer::new(2).with_targets(true))
                .try_init();
        }
    });
}

/// Run the formatter as the command line asks and return the exit code.
pub fn run<O, E>(options: &Options, mut stdin: impl Read, printer: &Printer<O, E>) -> u8
where
    O: Write + Send,
    E: Write + Send,
{
    let parser = Parser::new();
    let mut report = Report::new(options.is_dry_run(), options.quiet, options.verbose);

    if options.reads_stdin() {
        let mut input = String::new();
        let result = match stdin.read_to_string(&mut input) {
            Ok(_) => reformat_stdin(&parser, &input, options, printer),
            Err(error) => Err(FileError::Io(error)),
        };
        record(&mut report, Path::new("-"), result, printer);
    } else {
        let paths = if options.src.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            options.src.clone()
        };
        let sources = collect_sources(&paths);
        if sources.files.is_empty() && sources.errors.is_empty() {
            if !options.quiet {
                printer.err("No Vyper files are present to be formatted. Nothing to do.");
            }
            return 0;
        }

        for (path, error) in &sources.errors {
            report.failed(path, error, printer);
        }

        debug!(files = sources.files.len(), "formatting");
        let results: Vec<Result<Changed, FileError>> = sources
            .files
            .par_iter()
            .map(|path| reformat_file(&parser, path, options, printer))
            .collect();
        for (path, result) in sources.files.iter().zip(results) {
            record(&mut report, path, result, printer);
        }
    }

    if options.verbose || !options.quiet {
        printer.err(if report.return_code() == 0 {
            "All done!"
        } else {
            "Oh no!"
        });
        printer.err(&report.to_string());
    }
    report.return_code()
}

fn record<O: Write, E: Write>(
    report: &mut Report,
    path: &Path,
    result: Result<Changed, FileError>,
    printer: &Printer<O, E>,
) {
    match result {
        Ok(changed) => report.done(path, changed, printer),
        Err(error) => report.failed(path, &error, printer),
    }
}
