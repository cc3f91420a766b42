use std::process::ExitCode;

use clap::Parser;
use crysconv::cli::{self, gen_strain::Args};

fn main() -> ExitCode {
    cli::execute(Args::parse())
}
