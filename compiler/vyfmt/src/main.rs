//! Vyper formatter CLI.

use std::io;
use std::process::ExitCode;

use clap::Parser as _;
use vyfmt::{init_tracing, run, Options, Printer};

fn main() -> ExitCode {
    init_tracing();
    let options = Options::parse();
    let printer = Printer::new(io::stdout(), io::stderr());
    let code = run(&options, io::stdin(), &printer);
    ExitCode::from(code)
}
