// src/cli/pwo2poscar.rs

use std::path::PathBuf;

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::config::Settings;
use crate::error::Result;
use crate::io::{poscar, qe};
use crate::utils::report;

/// Write the final structure of a Quantum ESPRESSO output as POSCAR
#[derive(Parser, Debug)]
#[command(name = "pwo2poscar", version, about, long_about = None)]
pub struct Args {
    /// POSCAR file to write
    #[arg(short, long)]
    pub poscar: PathBuf,

    /// Quantum ESPRESSO output file to read
    #[arg(short = 'o', long)]
    pub pwo: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Tool for Args {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(&self, _settings: &Settings) -> Result<String> {
        let structure = qe::parse(&self.pwo)?;
        log::info!(
            "\n{}",
            report::structure_summary(&structure, &self.pwo.display().to_string())
        );
        poscar::write(&self.poscar, &structure)?;

        Ok(report::message(&format!(
            "Generated POSCAR file: {}",
            self.poscar.display()
        )))
    }
}
