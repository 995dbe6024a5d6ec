//! Formatting one file or stdin, and writing the result back.

use std::fs;
use std::io::Write;
use std::path::Path;

use similar::TextDiff;
use tracing::{debug, debug_span};
use vy_fmt::{format_tree, FormatConfig};
use vy_parse::equivalence::ast_equivalent;
use vy_parse::Parser;

use crate::error::FileError;
use crate::options::{Options, WriteBack};
use crate::printer::Printer;
use crate::report::Changed;

/// Lines of context around each hunk of a diff.
const DIFF_CONTEXT: usize = 3;

/// Format `contents`, read from `path`.
///
/// With `safe`, the result is parsed again and must have the same syntax
/// tree as the input.
pub fn format_file_contents(
    parser: &Parser,
    path: &Path,
    contents: &str,
    config: &FormatConfig,
    safe: bool,
) -> Result<String, FileError> {
    let tree = parser
        .parse(contents)
        .map_err(|error| FileError::parse(path, contents, error))?;
    let formatted = format_tree(tree, config)?;

    if safe {
        match ast_equivalent(parser, contents, &formatted) {
            Ok(true) => {}
            Ok(false) => return Err(FileError::AstChanged),
            Err(error) => return Err(FileError::InvalidOutput(error)),
        }
    }
    Ok(formatted)
}

/// Unified diff from `original` to `formatted`.
pub fn unified_diff(original: &str, formatted: &str, from: &str, to: &str) -> String {
    TextDiff::from_lines(original, formatted)
        .unified_diff()
        .context_radius(DIFF_CONTEXT)
        .header(from, to)
        .to_string()
}

/// Format the file at `path` and write the result back as `options` ask.
pub fn reformat_file<O: Write, E: Write>(
    parser: &Parser,
    path: &Path,
    options: &Options,
    printer: &Printer<O, E>,
) -> Result<Changed, FileError> {
    let _span = debug_span!("reformat", path = %path.display()).entered();

    let contents = fs::read_to_string(path)?;
    let formatted =
        format_file_contents(parser, path, &contents, &options.format_config(), options.safe)?;
    let changed = if formatted == contents {
        Changed::No
    } else {
        Changed::Yes
    };
    debug!(?changed, "formatted");

    match options.write_back() {
        WriteBack::InPlace => {
            if changed == Changed::Yes {
                fs::write(path, &formatted)?;
            }
        }
        WriteBack::Stdout => printer.out(&formatted),
        WriteBack::Check => {}
        WriteBack::Diff => {
            if changed == Changed::Yes {
                let name = path.display().to_string();
                printer.out(&unified_diff(&contents, &formatted, &name, &name));
            }
        }
    }
    Ok(changed)
}

/// Format text read from stdin. The result always goes to stdout.
pub fn reformat_stdin<O: Write, E: Write>(
    parser: &Parser,
    input: &str,
    options: &Options,
    printer: &Printer<O, E>,
) -> Result<Changed, FileError> {
    let formatted = format_file_contents(
        parser,
        Path::new("<stdin>"),
        input,
        &options.format_config(),
        options.safe,
    )?;
    let changed = if formatted == input {
        Changed::No
    } else {
        Changed::Yes
    };

    match options.write_back() {
        WriteBack::Check => {}
        WriteBack::Diff => {
            if changed == Changed::Yes {
                printer.out(&unified_diff(input, &formatted, "STDIN", "STDOUT"));
            }
        }
        WriteBack::InPlace | WriteBack::Stdout => printer.out(&formatted),
    }
    Ok(changed)
}

#[cfg(test)]
mod tests;
