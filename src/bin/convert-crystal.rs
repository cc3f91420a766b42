use std::process::ExitCode;

use clap::Parser;
use crysconv::cli::{self, convert::Args};

fn main() -> ExitCode {
    cli::execute(Args::parse())
}
