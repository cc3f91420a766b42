// src/cli/gen_strain.rs

use std::path::PathBuf;

use clap::Parser;

use super::{CommonArgs, Tool};
use crate::config::Settings;
use crate::error::Result;
use crate::io::poscar;
use crate::physics::strain::{self, Axis};
use crate::utils::report;

/// Apply uniaxial strain to a POSCAR structure
#[derive(Parser, Debug)]
#[command(name = "gen-strain", version, about, long_about = None)]
pub struct Args {
    /// Path to the input POSCAR file
    #[arg(short, long)]
    pub input_poscar: PathBuf,

    /// Direction of the strain (x, y or z)
    #[arg(short = 'd', long)]
    pub strain_direction: Axis,

    /// Strain percentage to apply (negative compresses)
    #[arg(short = 's', long, allow_hyphen_values = true)]
    pub strain_percentage: f64,

    /// Path to write the strained POSCAR file
    #[arg(short, long)]
    pub output_poscar: PathBuf,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Tool for Args {
    fn common(&self) -> &CommonArgs {
        &self.common
    }

    fn run(&self, _settings: &Settings) -> Result<String> {
        let structure = super::read_structure(&self.input_poscar)?;
        let strained =
            strain::apply_uniaxial_strain(&structure, self.strain_direction, self.strain_percentage)?;
        poscar::write(&self.output_poscar, &strained)?;

        Ok(report::message(&format!(
            "Strained atomic structure written to {}",
            self.output_poscar.display()
        )))
    }
}
