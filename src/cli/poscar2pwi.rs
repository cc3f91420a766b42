// src/cli/poscar2pwi.rs

use std::path::PathBuf;

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::config::Settings;
use crate::decks;
use crate::error::Result;
use crate::template::DeckTemplate;
use crate::utils::report;

/// Convert a VASP POSCAR file to a Quantum ESPRESSO input file
#[derive(Parser, Debug)]
#[command(name = "poscar2pwi", version, about, long_about = None)]
pub struct Args {
    /// Path to the POSCAR file
    #[arg(short, long)]
    pub poscar: PathBuf,

    /// Path to the JSON template file
    #[arg(short, long)]
    pub template: PathBuf,

    /// Quantum ESPRESSO input file to write
    #[arg(short = 'i', long)]
    pub pwi: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Tool for Args {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(&self, _settings: &Settings) -> Result<String> {
        let structure = super::read_structure(&self.poscar)?;
        let template = DeckTemplate::load(&self.template)?;
        std::fs::write(&self.pwi, decks::scf_deck(&structure, &template)?)?;

        Ok(report::message(&format!(
            "Generated Quantum Espresso SCF input file: {}",
            self.pwi.display()
        )))
    }
}
