use std::process::ExitCode;

use clap::Parser;
use crysconv::cli::{self, pwo2poscar::Args};

fn main() -> ExitCode {
    cli::execute(Args::parse())
}
