// src/cli/gen_pdos.rs

use std::path::PathBuf;

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::config::Settings;
use crate::decks;
use crate::error::Result;
use crate::template::DeckTemplate;
use crate::utils::report;

/// Generate SCF, NSCF and projwfc.x inputs from a POSCAR and a JSON template
#[derive(Parser, Debug)]
#[command(name = "gen-pdos", version, about, long_about = None)]
pub struct Args {
    /// Path to the POSCAR file
    #[arg(short, long)]
    pub poscar: PathBuf,

    /// Path to the JSON template file
    #[arg(short, long)]
    pub template: PathBuf,

    /// Name used for prefix, title and outdir
    #[arg(long = "system-name", visible_alias = "sn")]
    pub system_name: String,

    /// Quantum ESPRESSO SCF input file to write
    #[arg(short, long)]
    pub scf: PathBuf,

    /// Quantum ESPRESSO NSCF input file to write
    #[arg(short, long)]
    pub nscf: PathBuf,

    /// projwfc.x input file to write
    #[arg(short = 'd', long)]
    pub pdos: PathBuf,

    /// Prefix of the files projwfc.x writes
    #[arg(short = 'f', long = "pdos-data")]
    pub pdos_data: PathBuf,

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

        let set = decks::pdos_decks(
            &structure,
            &template,
            &self.system_name,
            &self.pdos_data.to_string_lossy(),
        )?;
        set.write(&self.scf, &self.nscf, &self.pdos)?;

        Ok(report::banner(&[
            ("Quantum Espresso SCF input file", self.scf.as_path()),
            ("Quantum Espresso NSCF input file", self.nscf.as_path()),
            ("Quantum Espresso PDOS input file", self.pdos.as_path()),
            ("PDOS data collection file", self.pdos_data.as_path()),
        ]))
    }
}
