// src/cli/gen_dos.rs

use std::path::PathBuf;

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::config::Settings;
use crate::decks::{self, DosWindow};
use crate::error::Result;
use crate::template::DeckTemplate;
use crate::utils::report;

/// Generate SCF, NSCF and dos.x inputs from a POSCAR and a JSON template
#[derive(Parser, Debug)]
#[command(name = "gen-dos", version, about, long_about = None)]
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

    /// dos.x input file to write
    #[arg(short, long)]
    pub dos: PathBuf,

    /// File dos.x writes the DOS to
    #[arg(short = 'f', long = "dos-data")]
    pub dos_data: PathBuf,

    /// Lower end of the energy window (eV)
    #[arg(long, allow_hyphen_values = true)]
    pub emin: Option<f64>,

    /// Upper end of the energy window (eV)
    #[arg(long, allow_hyphen_values = true)]
    pub emax: Option<f64>,

    /// Energy step (eV)
    #[arg(long)]
    pub delta_e: Option<f64>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Tool for Args {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(&self, settings: &Settings) -> Result<String> {
        let structure = super::read_structure(&self.poscar)?;
        let template = DeckTemplate::load(&self.template)?;

        let window = DosWindow {
            emin: self.emin.unwrap_or(settings.dos_emin),
            emax: self.emax.unwrap_or(settings.dos_emax),
            delta_e: self.delta_e.unwrap_or(settings.dos_delta_e),
        };
        let set = decks::dos_decks(
            &structure,
            &template,
            &self.system_name,
            &self.dos_data.to_string_lossy(),
            window,
        )?;
        set.write(&self.scf, &self.nscf, &self.dos)?;

        Ok(report::banner(&[
            ("Quantum Espresso SCF input file", self.scf.as_path()),
            ("Quantum Espresso NSCF input file", self.nscf.as_path()),
            ("Quantum Espresso DOS input file", self.dos.as_path()),
            ("DOS data collection file", self.dos_data.as_path()),
        ]))
    }
}
