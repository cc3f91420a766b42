use std::process::ExitCode;

use clap::Parser;
use crysconv::cli::{self, poscar2pwi::Args};

fn main() -> ExitCode {
    cli::execute(Args::parse())
}
