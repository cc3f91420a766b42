use std::process::ExitCode;

use clap::Parser;
use crysconv::cli::{self, gen_bands::Args};

fn main() -> ExitCode {
    cli::execute(Args::parse())
}
