// src/cli/gen_bands.rs

use std::path::PathBuf;

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::config::Settings;
use crate::decks;
use crate::error::Result;
use crate::physics::kpath::{self, Convention};
use crate::template::DeckTemplate;
use crate::utils::report;

/// Generate SCF, band-structure NSCF and bands.x inputs along the
/// high-symmetry path of a structure
#[derive(Parser, Debug)]
#[command(name = "gen-bands", version, about, long_about = None)]
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

    /// Quantum ESPRESSO band-structure input file to write
    #[arg(short, long)]
    pub nscf: PathBuf,

    /// bands.x input file to write
    #[arg(short, long)]
    pub bands: PathBuf,

    /// File bands.x writes its data to
    #[arg(short = 'f', long = "bands-data")]
    pub bands_data: PathBuf,

    /// Points between consecutive path vertices
    #[arg(long)]
    pub points_per_segment: Option<usize>,

    /// Band path convention: setyawan-curtarolo (ASE labels) or hpkot (seekpath)
    #[arg(long, default_value = "setyawan-curtarolo")]
    pub convention: Convention,

    /// Override symmetry tolerance (Angstrom)
    #[arg(long)]
    pub symprec: Option<f64>,

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

        let symprec = self.symprec.unwrap_or(settings.symprec);
        let density = self.points_per_segment.unwrap_or(settings.points_per_segment);
        let path = kpath::calculate_kpath_with(&structure, symprec, self.convention)?;

        let set = decks::band_decks(
            &structure,
            &template,
            &self.system_name,
            &self.bands_data.to_string_lossy(),
            &path,
            density,
        )?;
        set.write(&self.scf, &self.nscf, &self.bands)?;

        Ok(report::banner(&[
            ("Generated Quantum Espresso SCF input file", self.scf.as_path()),
            ("Generated Quantum Espresso NSCF input file", self.nscf.as_path()),
            ("Generated Quantum Espresso BANDS input file", self.bands.as_path()),
            ("BANDS data will be collected in file", self.bands_data.as_path()),
        ]))
    }
}
