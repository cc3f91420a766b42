use std::process::ExitCode;

use clap::Parser;
use crysconv::cli::{self, compare::Args};

fn main() -> ExitCode {
    cli::execute(Args::parse())
}
