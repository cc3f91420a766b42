use std::process::ExitCode;

use clap::Parser;
use crysconv::cli::{self, gen_dos::Args};

fn main() -> ExitCode {
    cli::execute(Args::parse())
}
